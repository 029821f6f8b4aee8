use crate::bus::RegisterTransport;
use crate::register::calibration::{CalibrationH, CalibrationH1, CalibrationTp};
use crate::Bme280Result;

/// Factory calibration coefficients, read once from NVM.
///
/// Field names follow the datasheet (section 4.2.2) so the compensation code can be checked
/// against it line by line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationData {
    pub dig_t1: u16,
    pub dig_t2: i16,
    pub dig_t3: i16,
    pub dig_p1: u16,
    pub dig_p2: i16,
    pub dig_p3: i16,
    pub dig_p4: i16,
    pub dig_p5: i16,
    pub dig_p6: i16,
    pub dig_p7: i16,
    pub dig_p8: i16,
    pub dig_p9: i16,
    pub dig_h1: u8,
    pub dig_h2: i16,
    pub dig_h3: u8,
    pub dig_h4: i16,
    pub dig_h5: i16,
    pub dig_h6: i8,
}

impl CalibrationData {
    /// Reads all three calibration blocks and decodes them.
    ///
    /// The blocks are read back to back without any write in between. A short read on any of
    /// them aborts immediately.
    pub fn read<B: RegisterTransport>(bus: &mut B) -> Bme280Result<Self, B::Error> {
        let tp = bus.read::<CalibrationTp>()?;
        let h1 = bus.read::<CalibrationH1>()?;
        let h = bus.read::<CalibrationH>()?;

        let calibration = Self::decode(&tp, h1, &h);
        debug!("calibration: {:?}", calibration);

        Ok(calibration)
    }

    /// Decodes the raw bytes of calib00..calib23 (`tp`), calib25 (`h1`) and calib26..calib32 (`h`).
    pub fn decode(tp: &[u8; 24], h1: u8, h: &[u8; 7]) -> Self {
        Self {
            dig_t1: u16::from_le_bytes([tp[0], tp[1]]),
            dig_t2: i16::from_le_bytes([tp[2], tp[3]]),
            dig_t3: i16::from_le_bytes([tp[4], tp[5]]),
            dig_p1: u16::from_le_bytes([tp[6], tp[7]]),
            dig_p2: i16::from_le_bytes([tp[8], tp[9]]),
            dig_p3: i16::from_le_bytes([tp[10], tp[11]]),
            dig_p4: i16::from_le_bytes([tp[12], tp[13]]),
            dig_p5: i16::from_le_bytes([tp[14], tp[15]]),
            dig_p6: i16::from_le_bytes([tp[16], tp[17]]),
            dig_p7: i16::from_le_bytes([tp[18], tp[19]]),
            dig_p8: i16::from_le_bytes([tp[20], tp[21]]),
            dig_p9: i16::from_le_bytes([tp[22], tp[23]]),
            dig_h1: h1,
            dig_h2: i16::from_le_bytes([h[0], h[1]]),
            dig_h3: h[2],
            // 0xE4 holds H4[11:4], 0xE5 holds H4[3:0] in its low nibble and H5[3:0] in its high nibble
            dig_h4: sign_extend_12(((h[3] as u16) << 4) | (h[4] as u16 & 0x0F)),
            dig_h5: sign_extend_12(((h[5] as u16) << 4) | (h[4] as u16 >> 4)),
            dig_h6: h[6] as i8,
        }
    }
}

/// Sign-extends a 12-bit two's complement value.
fn sign_extend_12(v: u16) -> i16 {
    ((v << 4) as i16) >> 4
}
