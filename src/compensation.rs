//! Fixed-point compensation formulas from datasheet section 4.2.3.
//!
//! These are pure functions: raw ADC value plus calibration in, compensated value out. Every
//! intermediate is an `i64`. Plausible calibration sets never overflow it, and the products that
//! can overflow for implausible ones wrap like the 64-bit two's complement reference code instead
//! of panicking. `>>` on signed integers is an arithmetic shift, which is what the reference code
//! relies on.

use crate::calibration::CalibrationData;
use crate::measurement::{FineTemperature, Humidity, Pressure, Temperature};

/// Upper clamp of the humidity intermediate, 100 %RH in Q22.10 shifted left by 12.
const HUMIDITY_MAX: i64 = 419_430_400;

/// Compensates a raw 20-bit temperature sample.
///
/// Returns `t_fine`, which the pressure and humidity formulas need, together with the temperature
/// in 0.01 °C.
pub fn compensate_temperature(raw: i32, cal: &CalibrationData) -> (FineTemperature, Temperature) {
    let adc_t = raw as i64;
    let dig_t1 = cal.dig_t1 as i64;
    let dig_t2 = cal.dig_t2 as i64;
    let dig_t3 = cal.dig_t3 as i64;

    let var1 = (((adc_t >> 3) - (dig_t1 << 1)) * dig_t2) >> 11;
    let var2 = (((((adc_t >> 4) - dig_t1) * ((adc_t >> 4) - dig_t1)) >> 12) * dig_t3) >> 14;

    // t_fine is a 32-bit quantity in the reference implementation
    let t_fine = (var1 + var2) as i32;
    let temperature = (t_fine as i64 * 5 + 128) >> 8;

    (FineTemperature(t_fine), Temperature(temperature as i32))
}

/// Compensates a raw 20-bit pressure sample. The result is in Pascal as Q24.8.
///
/// Returns `Pressure(0)` when the calibration makes the divisor zero. Results outside the Q24.8
/// range, which only implausible calibration sets produce, are clamped to it.
pub fn compensate_pressure(raw: i32, cal: &CalibrationData, t_fine: &FineTemperature) -> Pressure {
    let adc_p = raw as i64;

    let mut var1 = t_fine.0 as i64 - 128_000;
    let mut var2 = var1.wrapping_mul(var1).wrapping_mul(cal.dig_p6 as i64);
    var2 = var2.wrapping_add(var1.wrapping_mul(cal.dig_p5 as i64) << 17);
    var2 = var2.wrapping_add((cal.dig_p4 as i64) << 35);
    var1 = (var1.wrapping_mul(var1).wrapping_mul(cal.dig_p3 as i64) >> 8)
        .wrapping_add(var1.wrapping_mul(cal.dig_p2 as i64) << 12);
    var1 = (1i64 << 47).wrapping_add(var1).wrapping_mul(cal.dig_p1 as i64) >> 33;

    if var1 == 0 {
        return Pressure(0);
    }

    let mut p = 1_048_576 - adc_p;
    p = floor_div((p << 31).wrapping_sub(var2).wrapping_mul(3125), var1);
    let var1 = (cal.dig_p9 as i64).wrapping_mul(p >> 13).wrapping_mul(p >> 13) >> 25;
    let var2 = (cal.dig_p8 as i64).wrapping_mul(p) >> 19;
    p = (p.wrapping_add(var1).wrapping_add(var2) >> 8).wrapping_add((cal.dig_p7 as i64) << 4);

    Pressure(p.clamp(0, u32::MAX as i64) as u32)
}

/// Compensates a raw 16-bit humidity sample. The result is in %RH as Q22.10, always within
/// `0..=102400` (0 to 100 %RH).
pub fn compensate_humidity(raw: i32, cal: &CalibrationData, t_fine: &FineTemperature) -> Humidity {
    let adc_h = raw as i64;
    let dig_h1 = cal.dig_h1 as i64;
    let dig_h2 = cal.dig_h2 as i64;
    let dig_h3 = cal.dig_h3 as i64;
    let dig_h4 = cal.dig_h4 as i64;
    let dig_h5 = cal.dig_h5 as i64;
    let dig_h6 = cal.dig_h6 as i64;

    let mut v = t_fine.0 as i64 - 76_800;
    let offset = ((adc_h << 14) - (dig_h4 << 20) - dig_h5.wrapping_mul(v) + 16_384) >> 15;
    let scale = (((v.wrapping_mul(dig_h6) >> 10)
        .wrapping_mul((v.wrapping_mul(dig_h3) >> 11) + 32_768)
        >> 10)
        .wrapping_add(2_097_152)
        .wrapping_mul(dig_h2)
        .wrapping_add(8_192))
        >> 14;
    v = offset.wrapping_mul(scale);
    v = v.wrapping_sub(((v >> 15).wrapping_mul(v >> 15) >> 7).wrapping_mul(dig_h1) >> 4);
    v = v.clamp(0, HUMIDITY_MAX);

    Humidity((v >> 12) as u32)
}

/// Integer division rounding towards negative infinity.
fn floor_div(a: i64, b: i64) -> i64 {
    let q = a.wrapping_div(b);
    if (a.wrapping_rem(b) != 0) && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}
