//! # bme280-rs
//!
//! A `no_std` driver for the Bosch BME280 combined temperature, pressure and humidity sensor,
//! built on the blocking `embedded-hal` 1.0 traits.
//!
//! The driver probes the device, optionally soft-resets it, applies a [`Configuration`] and
//! loads the factory calibration. Raw samples are then compensated with the fixed-point formulas
//! from the datasheet, bit for bit.
//!
//! ```rust,no_run
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::i2c::I2c;
//! use bme280_rs::{Bme280, Bme280Result, ResetPolicy, SdoPinState};
//! use bme280_rs::config::{Configuration, Preset};
//! # fn demo<I: I2c, D: DelayNs>(i2c: I, mut delay: D) -> Bme280Result<(), I::Error> {
//!
//! let config = Configuration::from_preset(Preset::WeatherMonitoring);
//! let mut device = Bme280::new_i2c(i2c, SdoPinState::Low, &config, ResetPolicy::Soft, &mut delay)?;
//!
//! let measurement = device.measure_forced(&mut delay)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `log` / `defmt`: log register traffic and driver events through either framework.
//! - `uom`: typed physical quantities on [`Measurement`].
#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible in every other module
#[macro_use]
mod fmt;

mod bme280;
pub mod bus;
pub mod calibration;
pub mod compensation;
pub mod config;
pub mod error;
pub mod measurement;
pub mod register;
pub mod sampling;

#[cfg(test)]
mod testing;

pub use crate::bme280::{Bme280, ResetPolicy, SdoPinState};
pub use crate::calibration::CalibrationData;
pub use crate::config::Configuration;
pub use crate::error::Bme280Error;
pub use crate::measurement::Measurement;

/// Type alias used to simplify return types throughout the driver
pub type Bme280Result<T, BusError> = Result<T, Bme280Error<BusError>>;
