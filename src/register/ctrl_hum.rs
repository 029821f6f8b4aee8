//! ### CTRL_HUM - Humidity data acquisition options (`0xF2`, 1 byte, R/W)
//!
//! Sets the humidity oversampling. Changes only become effective after a subsequent write to
//! [`CTRL_MEAS`](crate::register::ctrl_meas).
#![doc(alias = "CTRL_HUM")]
use crate::register::ctrl_meas::Oversampling;
use crate::register::{InvalidRegisterField, Readable, Reg, Writable};

/// Marker type for CTRL_HUM (0xF2) register
pub struct CtrlHum;
impl Reg for CtrlHum { const ADDR: u8 = 0xF2; }

impl Readable for CtrlHum {
    type Out = Oversampling;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Oversampling::try_from(b[0] & 0b111)
            .map_err(|e| InvalidRegisterField::new(Self::ADDR, e.0, 0))
    }
}

impl Writable for CtrlHum {
    type In = Oversampling;

    fn encode(v: &Self::In, out: &mut [u8]) {
        let osrs_h: u8 = (*v).into();
        out[0] = osrs_h & 0b111;
    }
}
