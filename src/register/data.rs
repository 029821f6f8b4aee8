use crate::register::{InvalidRegisterField, Readable, Reg};

/// Marker struct for the TEMP_MSB, TEMP_LSB and TEMP_XLSB (0xFA - 0xFC) registers.
///
/// Decodes to the raw 20-bit temperature ADC value. The low nibble of TEMP_XLSB is unused
/// and shifted out.
///
/// - **Length:** 3 bytes
/// - **Access:** Read-only
pub struct TemperatureData;
impl Reg for TemperatureData { const ADDR: u8 = 0xFA; }

impl Readable for TemperatureData {
    type Out = i32;
    const N: usize = 3;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(decode_20_bit(b))
    }
}

/// Marker struct for the PRESS_MSB, PRESS_LSB and PRESS_XLSB (0xF7 - 0xF9) registers.
///
/// Decodes to the raw 20-bit pressure ADC value.
///
/// - **Length:** 3 bytes
/// - **Access:** Read-only
pub struct PressureData;
impl Reg for PressureData { const ADDR: u8 = 0xF7; }

impl Readable for PressureData {
    type Out = i32;
    const N: usize = 3;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(decode_20_bit(b))
    }
}

/// Marker struct for the HUM_MSB and HUM_LSB (0xFD - 0xFE) registers.
///
/// Decodes to the raw 16-bit humidity ADC value.
///
/// - **Length:** 2 bytes
/// - **Access:** Read-only
pub struct HumidityData;
impl Reg for HumidityData { const ADDR: u8 = 0xFD; }

impl Readable for HumidityData {
    type Out = i32;
    const N: usize = 2;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(u16::from_be_bytes([b[0], b[1]]) as i32)
    }
}

fn decode_20_bit(b: &[u8]) -> i32 {
    (u32::from_be_bytes([0, b[0], b[1], b[2]]) >> 4) as i32
}
