//! Errors that can occur when using the BME280 device.
//!
//! This module provides an error type that encapsulates all possible errors that can occur during communication with the BME280.
//! It is generic over the underlying bus (spi/i2c) error type.

use crate::config::ConfigurationError;
use crate::register::InvalidRegisterField;

/// This represents all possible errors that can occur when using the BME280 device.
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bme280Error<BusError> {
    /// An error has occurred in the SPI / I2C driver
    Bus(BusError),

    /// The transport delivered fewer bytes than requested.
    ///
    /// This points at a wiring or protocol fault and is never retried by the driver.
    ShortRead {
        register: u8,
        expected: usize,
        received: usize,
    },

    /// A configuration value is outside the documented register field range.
    InvalidConfiguration(ConfigurationError),

    /// Unable to communicate with BME280
    ///
    /// Could possibly indicate an error with pin configuration and/or wiring.
    NotConnected,

    /// The device did not finish a reset or a measurement in time.
    Timeout,

    /// Reading from a register returned unexpected data. This should not happen in normal circumstances.
    ///
    /// Could possibly indicate a bug in the driver, or less likely, a faulty chip or interference.
    UnexpectedRegisterData(InvalidRegisterField),
}

impl<BusError> From<ConfigurationError> for Bme280Error<BusError> {
    fn from(e: ConfigurationError) -> Self {
        Bme280Error::InvalidConfiguration(e)
    }
}

impl<BusError> From<InvalidRegisterField> for Bme280Error<BusError> {
    fn from(e: InvalidRegisterField) -> Self {
        Bme280Error::UnexpectedRegisterData(e)
    }
}
