use crate::register::{InvalidRegisterField, Readable, Reg};

/// Marker struct for the STATUS (0xF3) register
///
/// - **Length:** 1 byte
/// - **Access:** Read-only
///
/// Used with [`Bme280::read::<Status>()`](crate::Bme280::read) or the convenience method
/// [`Bme280::status`](crate::Bme280::status).
pub struct Status;
impl Reg for Status { const ADDR: u8 = 0xF3; }

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusFlags {
    pub measuring: bool,
    pub im_update: bool,
}

impl StatusFlags {
    /// Is a conversion running?
    ///
    /// Goes back to `false` once the results have been transferred to the data registers.
    pub fn measuring(&self) -> bool { self.measuring }

    /// Is the NVM being copied to the image registers?
    ///
    /// This happens at power-on and after a soft reset.
    pub fn nvm_updating(&self) -> bool { self.im_update }
}

impl Readable for Status {
    type Out = StatusFlags;
    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(StatusFlags {
            measuring: (b[0] & 0b0000_1000) != 0,
            im_update: (b[0] & 0b0000_0001) != 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_decode() {
        let reg = Status::decode(&[0b0000_0000]).unwrap();
        assert!(!reg.measuring());
        assert!(!reg.nvm_updating());

        let reg = Status::decode(&[0b0000_1000]).unwrap();
        assert!(reg.measuring());
        assert!(!reg.nvm_updating());

        let reg = Status::decode(&[0b0000_0001]).unwrap();
        assert!(!reg.measuring());
        assert!(reg.nvm_updating());

        // Reserved bits are ignored
        let reg = Status::decode(&[0b1111_0110]).unwrap();
        assert!(!reg.nvm_updating());
    }
}
