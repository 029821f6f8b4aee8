//! Calibration (trimming) parameter blocks.
//!
//! The 18 coefficients are spread over three non-contiguous blocks in NVM. The markers here
//! only move the raw bytes; [`CalibrationData`](crate::CalibrationData) does the decoding.
use crate::register::{InvalidRegisterField, Readable, Reg};

/// Marker type for calib00..calib23 (0x88 - 0x9F): dig_T1..dig_T3 and dig_P1..dig_P9.
pub struct CalibrationTp;
impl Reg for CalibrationTp { const ADDR: u8 = 0x88; }

impl Readable for CalibrationTp {
    type Out = [u8; 24];
    const N: usize = 24;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        let mut out = [0u8; 24];
        out.copy_from_slice(&b[..Self::N]);
        Ok(out)
    }
}

/// Marker type for calib25 (0xA1): dig_H1.
pub struct CalibrationH1;
impl Reg for CalibrationH1 { const ADDR: u8 = 0xA1; }

impl Readable for CalibrationH1 {
    type Out = u8;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(b[0])
    }
}

/// Marker type for calib26..calib32 (0xE1 - 0xE7): dig_H2..dig_H6.
pub struct CalibrationH;
impl Reg for CalibrationH { const ADDR: u8 = 0xE1; }

impl Readable for CalibrationH {
    type Out = [u8; 7];
    const N: usize = 7;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        let mut out = [0u8; 7];
        out.copy_from_slice(&b[..Self::N]);
        Ok(out)
    }
}
