use crate::bus::{I2c, RegisterTransport, Spi};
use crate::calibration::CalibrationData;
use crate::compensation::{compensate_humidity, compensate_pressure, compensate_temperature};
use crate::config::Configuration;
use crate::error::Bme280Error;
use crate::measurement::{FineTemperature, Measurement};
use crate::register::chip_id::{ChipId, BME280_CHIP_ID};
use crate::register::config::Config;
use crate::register::ctrl_hum::CtrlHum;
use crate::register::ctrl_meas::{CtrlMeas, Oversampling, PowerMode};
use crate::register::data::{HumidityData, PressureData, TemperatureData};
use crate::register::reset::{Reset, ResetCommand};
use crate::register::status::{Status, StatusFlags};
use crate::register::{Readable, Writable};
use crate::Bme280Result;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::SevenBitAddress;

/// Type alias for a Bme280 chip communicating over I2C
type Bme280I2c<T> = Bme280<I2c<T>>;

/// Type alias for a Bme280 chip communicating over SPI
type Bme280Spi<T> = Bme280<Spi<T>>;

/// How many times the chip id is probed before giving up.
const PROBE_ATTEMPTS: u32 = 5;

/// Upper bound on STATUS polls, both after a soft reset and at the end of a forced measurement.
const MAX_STATUS_POLLS: u32 = 32;

/// Main Bme280 driver struct
pub struct Bme280<B> {
    bus: B,
    calibration: CalibrationData,
    max_measurement_time_us: u32,
}

impl<T> Bme280I2c<T>
where
    T: embedded_hal::i2c::I2c,
{
    /// Constructs a new Bme280 driver instance with a given configuration that communicates over I2C
    ///
    /// This function will:
    /// - Probe for a connected BME280 device.
    /// - Perform a soft reset if `reset` == [`ResetPolicy::Soft`]
    /// - Apply the given configuration
    /// - Load calibration coefficients from NVM
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use embedded_hal::delay::DelayNs;
    /// # use embedded_hal::i2c::I2c;
    /// # use bme280_rs::Bme280Result;
    ///  use bme280_rs::{Bme280, SdoPinState, ResetPolicy};
    ///  use bme280_rs::config::Configuration;
    /// # fn demo<I: I2c, D: DelayNs>(i2c: I, mut delay: D) -> Bme280Result<(), I::Error> {
    ///
    ///  let device = Bme280::new_i2c(
    ///     i2c,
    ///     SdoPinState::Low,
    ///     &Configuration::default(),
    ///     ResetPolicy::Soft,
    ///     &mut delay
    ///  )?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new_i2c<D: DelayNs>(
        i2c: T,
        sdo_pin_state: SdoPinState,
        config: &Configuration,
        reset: ResetPolicy,
        delay: &mut D,
    ) -> Bme280Result<Self, T::Error> {
        Self::new(I2c::new(i2c, sdo_pin_state.into()), config, reset, delay)
    }
}

impl<T> Bme280Spi<T>
where
    T: embedded_hal::spi::SpiDevice,
{
    /// Constructs a new Bme280 driver instance with a given configuration that communicates over SPI
    ///
    /// See [`Bme280::new_i2c`] for the start-up sequence.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use embedded_hal::delay::DelayNs;
    /// # use embedded_hal::spi::SpiDevice;
    /// # use bme280_rs::Bme280Result;
    ///  use bme280_rs::{Bme280, ResetPolicy};
    ///  use bme280_rs::config::{Configuration, Preset};
    /// # fn demo<S: SpiDevice, D: DelayNs>(spi: S, mut delay: D) -> Bme280Result<(), S::Error> {
    ///
    ///  let device = Bme280::new_spi(
    ///     spi,
    ///     &Configuration::from_preset(Preset::WeatherMonitoring),
    ///     ResetPolicy::Soft,
    ///     &mut delay
    ///  )?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new_spi<D: DelayNs>(
        spi: T,
        config: &Configuration,
        reset: ResetPolicy,
        delay: &mut D,
    ) -> Bme280Result<Self, T::Error> {
        Self::new(Spi::new(spi), config, reset, delay)
    }
}

impl<B> Bme280<B>
where
    B: RegisterTransport,
{
    /// Probes if the device is ready by attempting to read ChipId `attempts` times with a 1 ms delay.
    ///
    /// Returns [`Bme280Error::NotConnected`] if no response is received.
    fn probe_ready<D: DelayNs>(
        bus: &mut B,
        delay: &mut D,
        attempts: u32,
    ) -> Bme280Result<(), B::Error> {
        for _ in 0..attempts {
            match bus.read::<ChipId>() {
                Ok(BME280_CHIP_ID) => return Ok(()),
                Ok(id) => warn!("unexpected chip id {:#x}", id),
                Err(_) => warn!("chip id probe failed"),
            }

            delay.delay_ms(1);
        }

        Err(Bme280Error::NotConnected)
    }

    /// Creates a driver on top of any [`RegisterTransport`].
    ///
    /// The calibration set is read after the configuration has been written, so a soft reset never
    /// races the NVM copy.
    pub fn new<D: DelayNs>(
        mut bus: B,
        config: &Configuration,
        reset: ResetPolicy,
        delay: &mut D,
    ) -> Bme280Result<Self, B::Error> {
        // The datasheet (table 1) specifies 2 ms start-up time
        Self::probe_ready(&mut bus, delay, PROBE_ATTEMPTS)?;

        let mut device = Bme280 {
            bus,
            calibration: CalibrationData::default(),
            max_measurement_time_us: 0,
        };

        if reset == ResetPolicy::Soft {
            device.soft_reset(delay)?;
        }

        device.configure(config)?;
        device.calibration = CalibrationData::read(&mut device.bus)?;

        Ok(device)
    }

    /// Applies the given configuration by writing CONFIG, CTRL_HUM and CTRL_MEAS, in that order.
    ///
    /// CTRL_HUM only takes effect once CTRL_MEAS is written, and CONFIG writes may be ignored in
    /// normal mode, so CTRL_MEAS always goes last.
    pub fn configure(&mut self, config: &Configuration) -> Bme280Result<(), B::Error> {
        let ctrl_meas = config.ctrl_meas();

        self.bus.write::<Config>(&config.config())?;
        self.bus.write::<CtrlHum>(&config.ctrl_hum())?;
        self.bus.write::<CtrlMeas>(&ctrl_meas)?;

        self.max_measurement_time_us =
            calculate_maximum_measurement_time(ctrl_meas.osrs_t, ctrl_meas.osrs_p, config.ctrl_hum());
        info!(
            "configured {:?}, max measurement time {} us",
            config,
            self.max_measurement_time_us
        );

        Ok(())
    }

    /// Validates raw register field values and applies them.
    ///
    /// Nothing is written if any value is out of range.
    ///
    /// See [`Configuration::from_register_fields`] for the accepted ranges.
    #[allow(clippy::too_many_arguments)]
    pub fn configure_raw(
        &mut self,
        osrs_t: u8,
        osrs_p: u8,
        osrs_h: u8,
        mode: u8,
        t_sb: u8,
        filter: u8,
        spi3w_en: bool,
    ) -> Bme280Result<(), B::Error> {
        let config =
            Configuration::from_register_fields(osrs_t, osrs_p, osrs_h, mode, t_sb, filter, spi3w_en)?;

        self.configure(&config)
    }

    /// Read a register (or fixed-size register block) using a **typed marker**.
    ///
    /// You pass a marker type from [`crate::register`] (e.g. `register::ctrl_meas::CtrlMeas`) and
    /// get back its decoded value (`R::Out`).
    ///
    /// # Examples
    /// ```rust,no_run
    /// # use bme280_rs::{register, Bme280, Bme280Result};
    /// # use bme280_rs::bus::RegisterTransport;
    /// # fn demo<B: RegisterTransport>(mut device: Bme280<B>) -> Bme280Result<(), B::Error> {
    /// let id: u8 = device.read::<register::chip_id::ChipId>()?;
    /// assert_eq!(id, 0x60);
    /// # Ok(()) }
    /// ```
    pub fn read<R: Readable>(&mut self) -> Bme280Result<R::Out, B::Error> {
        self.bus.read::<R>()
    }

    /// Write a register using a **typed marker**.
    ///
    /// This performs a direct write of the provided fields. Writing CTRL_HUM this way has no
    /// effect until CTRL_MEAS is written as well.
    pub fn write<W: Writable>(&mut self, v: &W::In) -> Bme280Result<(), B::Error> {
        self.bus.write::<W>(v)
    }

    /// Determines if the BME280 device is connected by attempting to read the CHIP_ID (0xD0) register.
    pub fn is_connected(&mut self) -> Bme280Result<bool, B::Error> {
        let id = self.bus.read::<ChipId>()?;

        Ok(id == BME280_CHIP_ID)
    }

    /// Triggers a soft reset and waits for the NVM copy to finish.
    ///
    /// Returns [`Bme280Error::Timeout`] if STATUS still reports an NVM update after 32 polls.
    ///
    /// **Note:** This resets the chip to factory defaults, not to the configuration that was provided when constructing the driver.
    pub fn soft_reset<D: DelayNs>(&mut self, delay: &mut D) -> Bme280Result<(), B::Error> {
        self.bus.write::<Reset>(&ResetCommand::SoftReset)?;

        for _ in 0..MAX_STATUS_POLLS {
            delay.delay_ms(1);

            if !self.status()?.nvm_updating() {
                debug!("soft reset complete");
                return Ok(());
            }
        }

        Err(Bme280Error::Timeout)
    }

    /// Returns the status from the STATUS (0xF3) register.
    pub fn status(&mut self) -> Bme280Result<StatusFlags, B::Error> {
        self.bus.read::<Status>()
    }

    /// Changes the power mode, keeping the oversampling settings in CTRL_MEAS.
    pub fn set_mode(&mut self, mode: PowerMode) -> Bme280Result<(), B::Error> {
        let mut ctrl_meas = self.bus.read::<CtrlMeas>()?;
        ctrl_meas.mode = mode;
        self.bus.write::<CtrlMeas>(&ctrl_meas)?;

        Ok(())
    }

    /// Reads the current power mode from the CTRL_MEAS (0xF4) register
    pub fn mode(&mut self) -> Bme280Result<PowerMode, B::Error> {
        Ok(self.bus.read::<CtrlMeas>()?.mode)
    }

    /// Reads the uncompensated 20-bit temperature sample.
    pub fn read_raw_temperature(&mut self) -> Bme280Result<i32, B::Error> {
        self.bus.read::<TemperatureData>()
    }

    /// Reads the uncompensated 20-bit pressure sample.
    pub fn read_raw_pressure(&mut self) -> Bme280Result<i32, B::Error> {
        self.bus.read::<PressureData>()
    }

    /// Reads the uncompensated 16-bit humidity sample.
    pub fn read_raw_humidity(&mut self) -> Bme280Result<i32, B::Error> {
        self.bus.read::<HumidityData>()
    }

    fn read_fine_temperature(&mut self) -> Bme280Result<FineTemperature, B::Error> {
        let raw = self.read_raw_temperature()?;

        Ok(compensate_temperature(raw, &self.calibration).0)
    }

    /// Reads the temperature in °C.
    pub fn read_temperature(&mut self) -> Bme280Result<f32, B::Error> {
        let raw = self.read_raw_temperature()?;
        let (_, temperature) = compensate_temperature(raw, &self.calibration);

        Ok(temperature.celsius())
    }

    /// Reads the pressure in hPa.
    ///
    /// Pressure compensation depends on the temperature, so this reads the temperature too.
    pub fn read_pressure(&mut self) -> Bme280Result<f32, B::Error> {
        let t_fine = self.read_fine_temperature()?;
        let raw = self.read_raw_pressure()?;

        Ok(compensate_pressure(raw, &self.calibration, &t_fine).hectopascal())
    }

    /// Reads the relative humidity in %.
    ///
    /// Humidity compensation depends on the temperature, so this reads the temperature too.
    pub fn read_humidity(&mut self) -> Bme280Result<f32, B::Error> {
        let t_fine = self.read_fine_temperature()?;
        let raw = self.read_raw_humidity()?;

        Ok(compensate_humidity(raw, &self.calibration, &t_fine).percent())
    }

    /// Reads the latest **calibrated** temperature, pressure and humidity.
    ///
    /// In normal mode, call this at most once per measurement period, otherwise the same data is
    /// read again. In sleep mode the data registers keep the last result. Use
    /// [`measure_forced`](Self::measure_forced) to trigger a new one.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use bme280_rs::{Bme280, Bme280Result};
    /// # use bme280_rs::bus::RegisterTransport;
    /// # fn demo<B: RegisterTransport>(mut device: Bme280<B>) -> Bme280Result<(), B::Error> {
    /// let data = device.read_sensor_data()?;
    /// println!("{:.2} °C, {:.2} hPa, {:.2} %", data.temperature_celsius(), data.pressure_hectopascal(), data.humidity_percent());
    /// # Ok(()) }
    /// ```
    pub fn read_sensor_data(&mut self) -> Bme280Result<Measurement, B::Error> {
        let raw_temperature = self.read_raw_temperature()?;
        let raw_pressure = self.read_raw_pressure()?;
        let raw_humidity = self.read_raw_humidity()?;

        let (t_fine, temperature) = compensate_temperature(raw_temperature, &self.calibration);
        let measurement = Measurement {
            temperature,
            pressure: compensate_pressure(raw_pressure, &self.calibration, &t_fine),
            humidity: compensate_humidity(raw_humidity, &self.calibration, &t_fine),
        };
        trace!("measurement: {:?}", measurement);

        Ok(measurement)
    }

    /// Triggers a single measurement in forced mode and returns its result.
    ///
    /// Waits for [`max_measurement_time_us`](Self::max_measurement_time_us), then polls
    /// STATUS until the conversion has finished. The device returns to sleep mode afterwards.
    pub fn measure_forced<D: DelayNs>(&mut self, delay: &mut D) -> Bme280Result<Measurement, B::Error> {
        self.set_mode(PowerMode::Forced)?;
        delay.delay_us(self.max_measurement_time_us);

        let mut polls = 0;
        while self.status()?.measuring() {
            polls += 1;
            if polls >= MAX_STATUS_POLLS {
                return Err(Bme280Error::Timeout);
            }

            delay.delay_ms(1);
        }

        self.read_sensor_data()
    }

    /// Returns the maximum measurement time in microseconds for the applied configuration.
    ///
    /// See datasheet section 9.1 (appendix B). Skipped channels do not contribute.
    pub fn max_measurement_time_us(&self) -> u32 {
        self.max_measurement_time_us
    }

    /// Returns the calibration coefficients read during construction.
    pub fn calibration(&self) -> CalibrationData {
        self.calibration
    }

    /// Gives back the underlying transport.
    pub fn release(self) -> B {
        self.bus
    }
}

/// Calculates the maximum measurement time in microseconds.
///
/// t = 1.25 ms + 2.3 ms * T_os + (2.3 ms * P_os + 0.575 ms) + (2.3 ms * H_os + 0.575 ms)
fn calculate_maximum_measurement_time(
    temperature_oversampling: Oversampling,
    pressure_oversampling: Oversampling,
    humidity_oversampling: Oversampling,
) -> u32 {
    let with_overhead = |o: Oversampling| match o {
        Oversampling::Skipped => 0,
        o => 2300 * o.factor() + 575,
    };

    1250
        + 2300 * temperature_oversampling.factor()
        + with_overhead(pressure_oversampling)
        + with_overhead(humidity_oversampling)
}

/// This enum should reflect the physical state of the SDO pin. This is used to determine the I2C address
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SdoPinState {
    /// SDO is pulled high by connection to VDDIO
    High,
    /// SDO is pulled low by connection to GND
    Low,
}

impl From<SdoPinState> for SevenBitAddress {
    fn from(state: SdoPinState) -> Self {
        match state {
            SdoPinState::High => 0x77,
            SdoPinState::Low => 0x76,
        }
    }
}

/// What to do at startup before applying [`Configuration`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResetPolicy {
    /// Write 0xB6 to RESET and wait for `STATUS.im_update` to clear (recommended default).
    Soft,
    /// Don’t reset; leave the chip as-is.
    None,
}
