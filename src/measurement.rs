//! Compensated readings.
//!
//! All values are kept in the fixed-point formats the compensation formulas produce, so nothing
//! is lost until the caller asks for a float.

use core::fmt::{Debug, Formatter};

/// Fine-resolution temperature (`t_fine`), the link between temperature compensation and the
/// pressure and humidity formulas.
///
/// Only [`compensate_temperature`](crate::compensation::compensate_temperature) hands these out,
/// and the type is neither `Clone` nor `Copy`: it is meant to be borrowed by the pressure and
/// humidity compensation of the same cycle and then dropped.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FineTemperature(pub(crate) i32);

impl FineTemperature {
    pub fn value(&self) -> i32 {
        self.0
    }
}

/// Temperature in hundredths of a degree Celsius (2508 = 25.08 °C).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Temperature(pub i32);

impl Temperature {
    pub fn centi_celsius(&self) -> i32 {
        self.0
    }

    pub fn celsius(&self) -> f32 {
        self.0 as f32 / 100.0
    }
}

/// Pressure in Pascal as unsigned Q24.8 (24 integer bits, 8 fractional bits).
///
/// Compensation never yields a negative pressure; those results saturate at 0.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pressure(pub u32);

impl Pressure {
    pub fn q24_8(&self) -> u32 {
        self.0
    }

    pub fn pascal(&self) -> f32 {
        self.0 as f32 / 256.0
    }

    pub fn hectopascal(&self) -> f32 {
        self.pascal() / 100.0
    }
}

/// Relative humidity in percent as unsigned Q22.10 (22 integer bits, 10 fractional bits).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Humidity(pub u32);

impl Humidity {
    pub fn q22_10(&self) -> u32 {
        self.0
    }

    pub fn percent(&self) -> f32 {
        self.0 as f32 / 1024.0
    }
}

/// One complete compensated reading. All three values come from the same measurement cycle.
#[derive(Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    pub temperature: Temperature,
    pub pressure: Pressure,
    pub humidity: Humidity,
}

impl Measurement {
    pub fn temperature_celsius(&self) -> f32 {
        self.temperature.celsius()
    }

    pub fn pressure_hectopascal(&self) -> f32 {
        self.pressure.hectopascal()
    }

    pub fn humidity_percent(&self) -> f32 {
        self.humidity.percent()
    }
}

impl Debug for Measurement {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Measurement")
            .field("temperature_c", &self.temperature_celsius())
            .field("pressure_hpa", &self.pressure_hectopascal())
            .field("humidity_rh", &self.humidity_percent())
            .finish()
    }
}

#[cfg(feature = "uom")]
impl Measurement {
    pub fn temperature_uom(&self) -> uom::si::f32::ThermodynamicTemperature {
        uom::si::f32::ThermodynamicTemperature::new::<uom::si::thermodynamic_temperature::degree_celsius>(self.temperature_celsius())
    }

    pub fn pressure_uom(&self) -> uom::si::f32::Pressure {
        uom::si::f32::Pressure::new::<uom::si::pressure::pascal>(self.pressure.pascal())
    }

    pub fn humidity_uom(&self) -> uom::si::f32::Ratio {
        uom::si::f32::Ratio::new::<uom::si::ratio::percent>(self.humidity_percent())
    }
}
