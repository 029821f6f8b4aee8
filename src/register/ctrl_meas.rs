//! ### CTRL_MEAS - Pressure and temperature data acquisition options (`0xF4`, 1 byte, R/W)
//!
//! Sets the temperature and pressure oversampling and the sensor power mode.
//!
//! A write to this register is also what latches a change made to [`CTRL_HUM`](crate::register::ctrl_hum),
//! so it must always come after a humidity oversampling write.
//!
//! ### Default values
//! 0x00 (Both measurements skipped, sleep mode)
#![doc(alias = "CTRL_MEAS")]
use crate::register::{InvalidRegisterField, Readable, Reg, UnexpectedValue, Writable};

/// Marker type for CTRL_MEAS (0xF4) register
pub struct CtrlMeas;
impl Reg for CtrlMeas { const ADDR: u8 = 0xF4; }

/// The payload for the CTRL_MEAS (0xF4) register.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CtrlMeasFields {
    pub osrs_t: Oversampling,
    pub osrs_p: Oversampling,
    pub mode: PowerMode,
}

impl Readable for CtrlMeas {
    type Out = CtrlMeasFields;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(CtrlMeasFields {
            osrs_t: Oversampling::try_from((b[0] >> 5) & 0b111)
                .map_err(|e| InvalidRegisterField::new(Self::ADDR, e.0, 5))?,
            osrs_p: Oversampling::try_from((b[0] >> 2) & 0b111)
                .map_err(|e| InvalidRegisterField::new(Self::ADDR, e.0, 2))?,
            mode: PowerMode::try_from(b[0] & 0b11)
                .map_err(|e| InvalidRegisterField::new(Self::ADDR, e.0, 0))?,
        })
    }
}

impl Writable for CtrlMeas {
    type In = CtrlMeasFields;

    fn encode(v: &Self::In, out: &mut [u8]) {
        let osrs_t: u8 = v.osrs_t.into();
        let osrs_p: u8 = v.osrs_p.into();
        let mode: u8 = v.mode.into();
        out[0] = (osrs_t << 5) | (osrs_p << 2) | mode;
    }
}

/// Oversampling settings shared by the temperature, pressure and humidity channels.
///
/// Higher oversampling reduces noise at the cost of measurement time and current.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Oversampling {
    /// The channel is not measured. Its output register keeps `0x80000` (or `0x8000` for humidity).
    Skipped,
    X1,
    X2,
    X4,
    X8,
    X16,
}

impl Oversampling {
    /// Number of ADC conversions per measurement.
    pub fn factor(&self) -> u32 {
        match self {
            Oversampling::Skipped => 0,
            Oversampling::X1 => 1,
            Oversampling::X2 => 2,
            Oversampling::X4 => 4,
            Oversampling::X8 => 8,
            Oversampling::X16 => 16,
        }
    }
}

impl TryFrom<u8> for Oversampling {
    type Error = UnexpectedValue;
    fn try_from(field: u8) -> Result<Self, Self::Error> {
        match field {
            0b000 => Ok(Oversampling::Skipped),
            0b001 => Ok(Oversampling::X1),
            0b010 => Ok(Oversampling::X2),
            0b011 => Ok(Oversampling::X4),
            0b100 => Ok(Oversampling::X8),
            // The datasheet maps every remaining 3-bit pattern to x16
            0b101..=0b111 => Ok(Oversampling::X16),
            other => Err(UnexpectedValue(other)),
        }
    }
}

impl From<Oversampling> for u8 {
    fn from(o: Oversampling) -> u8 {
        match o {
            Oversampling::Skipped => 0b000,
            Oversampling::X1 => 0b001,
            Oversampling::X2 => 0b010,
            Oversampling::X4 => 0b011,
            Oversampling::X8 => 0b100,
            Oversampling::X16 => 0b101,
        }
    }
}

/// Describes the different power modes that can be set in the CTRL_MEAS register.
///
/// For more information, see section 3.3 in the datasheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    /// Sleep mode. This is the default mode after power on reset.
    Sleep,
    /// Forced mode. A single measurement is performed after which the device returns to Sleep mode.
    Forced,
    /// Normal mode. Measurements are performed continuously, separated by the configured standby time.
    Normal,
}

impl TryFrom<u8> for PowerMode {
    type Error = UnexpectedValue;
    fn try_from(field: u8) -> Result<Self, Self::Error> {
        match field {
            0b00 => Ok(PowerMode::Sleep),
            0b01 | 0b10 => Ok(PowerMode::Forced),
            0b11 => Ok(PowerMode::Normal),
            other => Err(UnexpectedValue(other)),
        }
    }
}

impl From<PowerMode> for u8 {
    fn from(mode: PowerMode) -> u8 {
        match mode {
            PowerMode::Sleep => 0b00,
            PowerMode::Forced => 0b01,
            PowerMode::Normal => 0b11,
        }
    }
}
