use crate::register::config::{ConfigFields, IIRFilterCoefficient, StandbyTime};
use crate::register::ctrl_meas::{CtrlMeasFields, Oversampling, PowerMode};

/// Complete sensor configuration, applied with [`Bme280::configure`](crate::Bme280::configure).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Configuration {
    pub(crate) temperature_oversampling: Oversampling,
    pub(crate) pressure_oversampling: Oversampling,
    pub(crate) humidity_oversampling: Oversampling,
    pub(crate) mode: PowerMode,
    pub(crate) standby_time: StandbyTime,
    pub(crate) iir_filter_coefficient: IIRFilterCoefficient,
    pub(crate) spi3w_enabled: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            temperature_oversampling: Oversampling::X1,
            pressure_oversampling: Oversampling::X1,
            humidity_oversampling: Oversampling::X1,
            mode: PowerMode::Normal,
            standby_time: StandbyTime::Ms1000,
            iir_filter_coefficient: IIRFilterCoefficient::Off,
            spi3w_enabled: false,
        }
    }
}

impl Configuration {
    pub fn temperature_oversampling(mut self, temperature_oversampling: Oversampling) -> Self {
        self.temperature_oversampling = temperature_oversampling;

        self
    }

    pub fn pressure_oversampling(mut self, pressure_oversampling: Oversampling) -> Self {
        self.pressure_oversampling = pressure_oversampling;

        self
    }

    pub fn humidity_oversampling(mut self, humidity_oversampling: Oversampling) -> Self {
        self.humidity_oversampling = humidity_oversampling;

        self
    }

    pub fn power_mode(mut self, power_mode: PowerMode) -> Self {
        self.mode = power_mode;

        self
    }

    /// Sets the inactive duration between measurements. Only used in [`PowerMode::Normal`].
    pub fn standby_time(mut self, standby_time: StandbyTime) -> Self {
        self.standby_time = standby_time;

        self
    }

    pub fn iir_filter_coefficient(mut self, filter_coefficient: IIRFilterCoefficient) -> Self {
        self.iir_filter_coefficient = filter_coefficient;

        self
    }

    /// Enables the 3-wire SPI interface. Leave this off for I2C and 4-wire SPI.
    pub fn spi3w_enabled(mut self, enabled: bool) -> Self {
        self.spi3w_enabled = enabled;

        self
    }

    /// Builds a configuration from raw register field values, as found in the datasheet tables.
    ///
    /// Every value is checked against the width of its field (3 bits, 2 bits for `mode`). Values
    /// that do not fit are rejected instead of being masked.
    pub fn from_register_fields(
        osrs_t: u8,
        osrs_p: u8,
        osrs_h: u8,
        mode: u8,
        t_sb: u8,
        filter: u8,
        spi3w_en: bool,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            temperature_oversampling: Oversampling::try_from(osrs_t)
                .map_err(|e| ConfigurationError::new(ConfigurationField::TemperatureOversampling, e.0))?,
            pressure_oversampling: Oversampling::try_from(osrs_p)
                .map_err(|e| ConfigurationError::new(ConfigurationField::PressureOversampling, e.0))?,
            humidity_oversampling: Oversampling::try_from(osrs_h)
                .map_err(|e| ConfigurationError::new(ConfigurationField::HumidityOversampling, e.0))?,
            mode: PowerMode::try_from(mode)
                .map_err(|e| ConfigurationError::new(ConfigurationField::Mode, e.0))?,
            standby_time: StandbyTime::try_from(t_sb)
                .map_err(|e| ConfigurationError::new(ConfigurationField::StandbyTime, e.0))?,
            iir_filter_coefficient: IIRFilterCoefficient::try_from(filter)
                .map_err(|e| ConfigurationError::new(ConfigurationField::Filter, e.0))?,
            spi3w_enabled: spi3w_en,
        })
    }

    /// Recommended settings from datasheet section 3.5.
    pub fn from_preset(p: Preset) -> Self {
        match p {
            Preset::WeatherMonitoring => Configuration::default()
                .power_mode(PowerMode::Forced),
            Preset::HumiditySensing => Configuration::default()
                .power_mode(PowerMode::Forced)
                .pressure_oversampling(Oversampling::Skipped),
            Preset::IndoorNavigation => Configuration::default()
                .temperature_oversampling(Oversampling::X2)
                .pressure_oversampling(Oversampling::X16)
                .standby_time(StandbyTime::Ms0_5)
                .iir_filter_coefficient(IIRFilterCoefficient::Coef16),
            Preset::Gaming => Configuration::default()
                .pressure_oversampling(Oversampling::X4)
                .humidity_oversampling(Oversampling::Skipped)
                .standby_time(StandbyTime::Ms0_5)
                .iir_filter_coefficient(IIRFilterCoefficient::Coef16),
        }
    }

    pub fn mode(&self) -> PowerMode {
        self.mode
    }

    pub(crate) fn ctrl_hum(&self) -> Oversampling {
        self.humidity_oversampling
    }

    pub(crate) fn ctrl_meas(&self) -> CtrlMeasFields {
        CtrlMeasFields {
            osrs_t: self.temperature_oversampling,
            osrs_p: self.pressure_oversampling,
            mode: self.mode,
        }
    }

    pub(crate) fn config(&self) -> ConfigFields {
        ConfigFields {
            standby_time: self.standby_time,
            iir_filter: self.iir_filter_coefficient,
            spi3w_en: self.spi3w_enabled,
        }
    }
}

/// Use cases from datasheet section 3.5.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Preset {
    /// Forced mode, x1 oversampling everywhere, filter off. One reading per minute is plenty.
    WeatherMonitoring,
    /// Forced mode, pressure skipped, filter off.
    HumiditySensing,
    /// Normal mode, 0.5 ms standby, pressure x16, temperature x2, humidity x1, filter 16.
    IndoorNavigation,
    /// Normal mode, 0.5 ms standby, pressure x4, temperature x1, humidity skipped, filter 16.
    Gaming,
}

/// Which configuration argument was rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigurationField {
    TemperatureOversampling,
    PressureOversampling,
    HumidityOversampling,
    Mode,
    StandbyTime,
    Filter,
}

/// A raw configuration value does not fit its register field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigurationError {
    pub field: ConfigurationField,
    pub value: u8,
}

impl ConfigurationError {
    pub fn new(field: ConfigurationField, value: u8) -> Self {
        Self { field, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_power_on_friendly_settings() {
        let config = Configuration::default();

        assert_eq!(Oversampling::X1, config.ctrl_hum());
        assert_eq!(
            CtrlMeasFields { osrs_t: Oversampling::X1, osrs_p: Oversampling::X1, mode: PowerMode::Normal },
            config.ctrl_meas()
        );
        assert_eq!(
            ConfigFields { standby_time: StandbyTime::Ms1000, iir_filter: IIRFilterCoefficient::Off, spi3w_en: false },
            config.config()
        );
    }

    #[test]
    fn from_register_fields_accepts_documented_ranges() {
        let config = Configuration::from_register_fields(0b010, 0b101, 0b001, 0b11, 0b000, 0b101, false).unwrap();

        assert_eq!(
            Configuration::default()
                .temperature_oversampling(Oversampling::X2)
                .pressure_oversampling(Oversampling::X16)
                .standby_time(StandbyTime::Ms0_5)
                .iir_filter_coefficient(IIRFilterCoefficient::Coef16),
            config
        );
    }

    #[test]
    fn from_register_fields_rejects_out_of_range_values() {
        assert_eq!(
            Err(ConfigurationError::new(ConfigurationField::TemperatureOversampling, 8)),
            Configuration::from_register_fields(8, 1, 1, 3, 5, 0, false)
        );
        assert_eq!(
            Err(ConfigurationError::new(ConfigurationField::HumidityOversampling, 9)),
            Configuration::from_register_fields(1, 1, 9, 3, 5, 0, false)
        );
        assert_eq!(
            Err(ConfigurationError::new(ConfigurationField::Mode, 4)),
            Configuration::from_register_fields(1, 1, 1, 4, 5, 0, false)
        );
        assert_eq!(
            Err(ConfigurationError::new(ConfigurationField::StandbyTime, 0xFF)),
            Configuration::from_register_fields(1, 1, 1, 3, 0xFF, 0, false)
        );
        assert_eq!(
            Err(ConfigurationError::new(ConfigurationField::Filter, 16)),
            Configuration::from_register_fields(1, 1, 1, 3, 5, 16, false)
        );
    }

    #[test]
    fn presets() {
        let config = Configuration::from_preset(Preset::HumiditySensing);
        assert_eq!(PowerMode::Forced, config.mode());
        assert_eq!(Oversampling::Skipped, config.ctrl_meas().osrs_p);
        assert_eq!(Oversampling::X1, config.ctrl_hum());

        let config = Configuration::from_preset(Preset::Gaming);
        assert_eq!(Oversampling::Skipped, config.ctrl_hum());
        assert_eq!(IIRFilterCoefficient::Coef16, config.config().iir_filter);
    }
}
