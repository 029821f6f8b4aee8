//! ### ID - Chip identification number (`0xD0`, 1 byte, R)
//!
//! Contains the chip identification code, which will always be 0x60 for BME280.
//!
//! ### Default values
//! 0x60
#![doc(alias = "ID")]
use crate::register::{InvalidRegisterField, Readable, Reg};

/// The value of the ID register on every BME280.
pub const BME280_CHIP_ID: u8 = 0x60;

/// Marker struct for the ID (0xD0) register
///
/// - **Length:** 1 byte
/// - **Access:** Read-only
///
/// Used with [`Bme280::read::<ChipId>()`](crate::Bme280::read) or [`Bme280::is_connected`](crate::Bme280::is_connected)
pub struct ChipId;
impl Reg for ChipId { const ADDR: u8 = 0xD0; }

impl Readable for ChipId {
    type Out = u8;
    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(b[0])
    }
}
