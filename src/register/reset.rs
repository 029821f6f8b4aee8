//! ### RESET - Soft reset (`0xE0`, 1 byte, Write-only)
//!
//! Writing 0xB6 resets the device using the complete power-on-reset procedure.
//! Any other value is ignored by the device.
//!
//! See also: [`Bme280::soft_reset()`](crate::Bme280::soft_reset)
#![doc(alias = "RESET")]
use crate::register::{Reg, Writable};

/// Marker type for RESET (0xE0) register
pub struct Reset;
impl Reg for Reset { const ADDR: u8 = 0xE0; }

/// The payload for the RESET (0xE0) register.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ResetCommand {
    /// Triggers a power-on reset. All user configuration settings are overwritten with their default state.
    SoftReset,
}

impl From<ResetCommand> for u8 {
    fn from(cmd: ResetCommand) -> u8 {
        match cmd {
            ResetCommand::SoftReset => 0xB6,
        }
    }
}

impl Writable for Reset {
    type In = ResetCommand;
    fn encode(v: &Self::In, out: &mut [u8]) {
        out[0] = (*v).into();
    }
}
