//! ### CONFIG - Rate, filter and interface options (`0xF5`, 1 byte, R/W)
//!
//! Controls the inactive duration in normal mode, the IIR filter coefficient and the 3-wire SPI interface.
//!
//! Writes to this register in normal mode may be ignored by the device. The driver therefore
//! writes it before CTRL_MEAS switches the device out of sleep mode.
//!
//! ### Default values
//! 0x00 (0.5 ms standby, filter off, 4-wire SPI)
#![doc(alias = "CONFIG")]
use crate::register::{InvalidRegisterField, Readable, Reg, UnexpectedValue, Writable};

/// Marker type for CONFIG (0xF5) register
pub struct Config;
impl Reg for Config { const ADDR: u8 = 0xF5; }

/// The payload for the CONFIG (0xF5) register.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigFields {
    /// Inactive duration between measurements in normal mode.
    pub standby_time: StandbyTime,
    /// The IIR filter coefficient.
    ///
    /// Read more about the IIR filter in the datasheet section 3.4.4
    pub iir_filter: IIRFilterCoefficient,
    /// Enables the 3-wire SPI interface.
    pub spi3w_en: bool,
}

impl Readable for Config {
    type Out = ConfigFields;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(ConfigFields {
            standby_time: StandbyTime::try_from((b[0] >> 5) & 0b111)
                .map_err(|e| InvalidRegisterField::new(Self::ADDR, e.0, 5))?,
            iir_filter: IIRFilterCoefficient::try_from((b[0] >> 2) & 0b111)
                .map_err(|e| InvalidRegisterField::new(Self::ADDR, e.0, 2))?,
            spi3w_en: b[0] & 0b1 != 0,
        })
    }
}

impl Writable for Config {
    type In = ConfigFields;

    fn encode(v: &Self::In, out: &mut [u8]) {
        let t_sb: u8 = v.standby_time.into();
        let filter: u8 = v.iir_filter.into();
        out[0] = (t_sb << 5) | (filter << 2) | v.spi3w_en as u8;
    }
}

/// Inactive duration `t_standby` between two measurements in normal mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StandbyTime {
    Ms0_5   = 0b000,
    Ms62_5  = 0b001,
    Ms125   = 0b010,
    Ms250   = 0b011,
    Ms500   = 0b100,
    Ms1000  = 0b101,
    Ms10    = 0b110,
    Ms20    = 0b111,
}

impl TryFrom<u8> for StandbyTime {
    type Error = UnexpectedValue;
    fn try_from(field: u8) -> Result<Self, Self::Error> {
        match field {
            0b000 => Ok(StandbyTime::Ms0_5),
            0b001 => Ok(StandbyTime::Ms62_5),
            0b010 => Ok(StandbyTime::Ms125),
            0b011 => Ok(StandbyTime::Ms250),
            0b100 => Ok(StandbyTime::Ms500),
            0b101 => Ok(StandbyTime::Ms1000),
            0b110 => Ok(StandbyTime::Ms10),
            0b111 => Ok(StandbyTime::Ms20),
            other => Err(UnexpectedValue(other)),
        }
    }
}

impl From<StandbyTime> for u8 {
    fn from(t: StandbyTime) -> u8 {
        t as u8
    }
}

/// This enum holds all configurable IIR filter coefficients.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IIRFilterCoefficient {
    /// Filter off
    Off     = 0b000,
    /// Filter coefficient is 2
    Coef2   = 0b001,
    /// Filter coefficient is 4
    Coef4   = 0b010,
    /// Filter coefficient is 8
    Coef8   = 0b011,
    /// Filter coefficient is 16
    Coef16  = 0b100,
}

impl TryFrom<u8> for IIRFilterCoefficient {
    type Error = UnexpectedValue;
    fn try_from(field: u8) -> Result<Self, Self::Error> {
        match field {
            0b000 => Ok(IIRFilterCoefficient::Off),
            0b001 => Ok(IIRFilterCoefficient::Coef2),
            0b010 => Ok(IIRFilterCoefficient::Coef4),
            0b011 => Ok(IIRFilterCoefficient::Coef8),
            0b100..=0b111 => Ok(IIRFilterCoefficient::Coef16),
            other => Err(UnexpectedValue(other)),
        }
    }
}

impl From<IIRFilterCoefficient> for u8 {
    fn from(c: IIRFilterCoefficient) -> u8 {
        c as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_decode() {
        let reg = Config::decode(&[0b0000_0000]).unwrap();
        assert_eq!(StandbyTime::Ms0_5, reg.standby_time);
        assert_eq!(IIRFilterCoefficient::Off, reg.iir_filter);
        assert!(!reg.spi3w_en);

        let reg = Config::decode(&[0b1010_0001]).unwrap();
        assert_eq!(StandbyTime::Ms1000, reg.standby_time);
        assert_eq!(IIRFilterCoefficient::Off, reg.iir_filter);
        assert!(reg.spi3w_en);

        let reg = Config::decode(&[0b0001_0100]).unwrap();
        assert_eq!(StandbyTime::Ms0_5, reg.standby_time);
        assert_eq!(IIRFilterCoefficient::Coef16, reg.iir_filter);
    }

    #[test]
    fn config_encode() {
        let mut buffer = [0u8; 1];
        Config::encode(&ConfigFields {
            standby_time: StandbyTime::Ms1000,
            iir_filter: IIRFilterCoefficient::Off,
            spi3w_en: false,
        }, &mut buffer);
        assert_eq!([0b1010_0000], buffer);

        Config::encode(&ConfigFields {
            standby_time: StandbyTime::Ms500,
            iir_filter: IIRFilterCoefficient::Coef4,
            spi3w_en: true,
        }, &mut buffer);
        assert_eq!([0b1000_1001], buffer);
    }

    #[test]
    fn filter_maps_upper_patterns_to_coefficient_16() {
        assert_eq!(Ok(IIRFilterCoefficient::Coef16), IIRFilterCoefficient::try_from(0b101));
        assert_eq!(Err(UnexpectedValue(8)), IIRFilterCoefficient::try_from(8));
    }
}
