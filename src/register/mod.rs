//! Register catalogue for the BME280.
//!
//! Every register (or fixed-size register block) the driver touches has a marker type here
//! that carries its address and length, and knows how to decode / encode its payload.

pub mod calibration;
pub mod chip_id;
pub mod config;
pub mod ctrl_hum;
pub mod ctrl_meas;
pub mod data;
pub mod reset;
pub mod status;

/// The largest register block the driver reads in one transaction (calibration block 1).
pub const MAX_REG_BYTES: usize = 24;

#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidRegisterField {
    pub register: u8,
    pub value: u8,
    pub bit_offset: u8,
}

impl InvalidRegisterField {
    pub fn new(register: u8, value: u8, bit_offset: u8) -> Self {
        Self { register, value, bit_offset }
    }
}

#[derive(Debug, PartialEq)]
pub struct UnexpectedValue(pub u8);

pub trait Reg { const ADDR: u8; }

pub trait Readable: Reg {
    type Out;
    const N: usize = 1;
    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField>;
}

pub trait Writable: Reg {
    type In;
    const N: usize = 1;
    fn encode(v: &Self::In, out: &mut [u8]);
}
