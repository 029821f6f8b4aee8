//! Fixed-interval blocking sampling loop.

use core::ops::ControlFlow;

use embedded_hal::delay::DelayNs;

use crate::bus::RegisterTransport;
use crate::error::Bme280Error;
use crate::measurement::Measurement;
use crate::Bme280;

/// One reading per second.
pub const DEFAULT_INTERVAL_MS: u32 = 1000;

/// Reads a [`Measurement`] every `interval_ms` and hands it to `sink`.
///
/// Failed reads are passed on too, so the sink decides whether to skip the cycle or stop. The loop
/// ends as soon as `sink` returns [`ControlFlow::Break`]. There is no sleep after the last cycle.
///
/// # Examples
///
/// ```rust,no_run
/// # use core::ops::ControlFlow;
/// # use embedded_hal::delay::DelayNs;
/// # use bme280_rs::Bme280;
/// # use bme280_rs::bus::RegisterTransport;
/// use bme280_rs::sampling::{run, DEFAULT_INTERVAL_MS};
/// # fn demo<B: RegisterTransport, D: DelayNs>(mut device: Bme280<B>, mut delay: D) {
///
/// let mut remaining = 10;
/// run(&mut device, &mut delay, DEFAULT_INTERVAL_MS, |result| {
///     if let Ok(measurement) = result {
///         println!("{:?}", measurement);
///     }
///     remaining -= 1;
///     if remaining == 0 { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
/// });
/// # }
/// ```
pub fn run<B, D, F>(device: &mut Bme280<B>, delay: &mut D, interval_ms: u32, mut sink: F)
where
    B: RegisterTransport,
    D: DelayNs,
    F: FnMut(Result<Measurement, Bme280Error<B::Error>>) -> ControlFlow<()>,
{
    loop {
        let result = device.read_sensor_data();
        if result.is_err() {
            warn!("sampling cycle failed");
        }

        if sink(result).is_break() {
            debug!("sampling stopped");
            return;
        }

        delay.delay_ms(interval_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;
    use crate::measurement::Temperature;
    use crate::register::calibration::{CalibrationH, CalibrationH1, CalibrationTp};
    use crate::register::chip_id::ChipId;
    use crate::register::data::{HumidityData, PressureData, TemperatureData};
    use crate::testing::{FakeBus, FakeDelay, CALIBRATION_H, CALIBRATION_H1, CALIBRATION_TP};
    use crate::ResetPolicy;

    fn device(temperature: &[u8]) -> Bme280<FakeBus<8>> {
        let mut bus: FakeBus<8> = FakeBus::new();
        bus.with_response::<ChipId>(&[0x60]);
        bus.with_response::<CalibrationTp>(&CALIBRATION_TP);
        bus.with_response::<CalibrationH1>(&[CALIBRATION_H1]);
        bus.with_response::<CalibrationH>(&CALIBRATION_H);
        bus.with_response::<TemperatureData>(temperature);
        bus.with_response::<PressureData>(&[0x65, 0x5A, 0xC0]);
        bus.with_response::<HumidityData>(&[0x75, 0x30]);

        Bme280::new(bus, &Configuration::default(), ResetPolicy::None, &mut FakeDelay::new()).unwrap()
    }

    #[test]
    fn stops_on_break_and_sleeps_between_cycles() {
        let mut device = device(&[0x7E, 0xED, 0x00]);
        let mut delay = FakeDelay::new();
        let mut cycles = 0;

        run(&mut device, &mut delay, DEFAULT_INTERVAL_MS, |result| {
            assert_eq!(Temperature(2508), result.unwrap().temperature);
            cycles += 1;
            if cycles == 3 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        assert_eq!(3, cycles);
        assert_eq!(2_000_000_000, delay.total_ns);
        assert_eq!(9, device.release().reads().len() - 4);
    }

    #[test]
    fn errors_reach_the_sink() {
        let mut device = device(&[0x7E]);
        let mut delay = FakeDelay::new();
        let mut errors = 0;

        run(&mut device, &mut delay, 250, |result| {
            assert_eq!(
                Err(Bme280Error::ShortRead { register: 0xFA, expected: 3, received: 1 }),
                result
            );
            errors += 1;
            if errors == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        assert_eq!(250_000_000, delay.total_ns);
    }
}
