//! Runtime configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use ignition_hal::Level;

use crate::units::{Hertz, Micros, MilliHertz, Rpm};
use crate::{IgnitionError, IgnitionResult};

/// Level the pulse output takes while the coil is charging
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    /// Output high during the pulse, low otherwise
    #[default]
    ActiveHigh,
    /// Output low during the pulse, high otherwise
    ActiveLow,
}

impl Polarity {
    /// Output level during the pulse
    pub const fn active_level(self) -> Level {
        match self {
            Polarity::ActiveHigh => Level::High,
            Polarity::ActiveLow => Level::Low,
        }
    }

    /// Output level between pulses and while disabled
    pub const fn inactive_level(self) -> Level {
        match self {
            Polarity::ActiveHigh => Level::Low,
            Polarity::ActiveLow => Level::High,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Polarity {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Polarity::ActiveHigh => defmt::write!(fmt, "ActiveHigh"),
            Polarity::ActiveLow => defmt::write!(fmt, "ActiveLow"),
        }
    }
}

/// Configuration for the ignition driver.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
#[derive(Debug, Clone)]
pub struct IgnitionConfig {
    pub rpm_min: Rpm,
    pub rpm_max: Rpm,
    pub default_rpm: Rpm,
    pub coarse_step: u32,
    pub fine_step: u32,
    pub pulse_width: Micros,
    pub debounce_ticks: u32,
    pub src_clock: Hertz,
    pub polarity: Polarity,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub idle_callback: Option<fn()>,
}

impl Default for IgnitionConfig {
    fn default() -> Self {
        Self {
            rpm_min: Rpm(2500),
            rpm_max: Rpm(9000),
            default_rpm: Rpm(6900),
            coarse_step: 10,
            fine_step: 1,
            pulse_width: Micros(2000),
            debounce_ticks: 15,
            src_clock: Hertz(12_000_000),
            polarity: Polarity::ActiveHigh,
            idle_callback: None,
        }
    }
}

impl IgnitionConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> IgnitionConfigBuilder {
        IgnitionConfigBuilder::default()
    }

    /// Check that the values describe a usable controller.
    pub fn validate(&self) -> IgnitionResult<()> {
        let in_range = self.rpm_min <= self.default_rpm && self.default_rpm <= self.rpm_max;
        if self.rpm_min > self.rpm_max
            || !in_range
            || self.coarse_step == 0
            || self.fine_step == 0
            || self.pulse_width.0 == 0
            || self.src_clock.0 == 0
        {
            return Err(IgnitionError::InvalidArgument);
        }
        Ok(())
    }

    /// Restrict a speed to the configured range.
    pub fn clamp_rpm(&self, rpm: Rpm) -> Rpm {
        rpm.clamp_to(self.rpm_min, self.rpm_max)
    }

    /// Pulse frequency for a commanded speed, clamped to range first.
    pub fn frequency_for(&self, rpm: Rpm) -> MilliHertz {
        self.clamp_rpm(rpm).to_millihertz()
    }
}

/// Builder for ergonomic configuration construction.
#[derive(Debug, Clone, Default)]
pub struct IgnitionConfigBuilder {
    config: IgnitionConfig,
}

impl IgnitionConfigBuilder {
    /// Sets the commanded RPM range.
    pub fn rpm_range(mut self, min: u32, max: u32) -> Self {
        self.config.rpm_min = Rpm(min);
        self.config.rpm_max = Rpm(max);
        self
    }

    /// Sets the RPM commanded at start-up.
    pub fn default_rpm(mut self, rpm: u32) -> Self {
        self.config.default_rpm = Rpm(rpm);
        self
    }

    /// Sets the RPM steps for normal and fast mode.
    pub fn steps(mut self, coarse: u32, fine: u32) -> Self {
        self.config.coarse_step = coarse;
        self.config.fine_step = fine;
        self
    }

    /// Sets the coil charge time.
    pub fn pulse_width_us(mut self, width: u32) -> Self {
        self.config.pulse_width = Micros(width);
        self
    }

    /// Sets the shared debounce guard.
    pub fn debounce_ticks(mut self, ticks: u32) -> Self {
        self.config.debounce_ticks = ticks;
        self
    }

    /// Sets the timer source clock.
    pub fn src_clock_hz(mut self, hz: u32) -> Self {
        self.config.src_clock = Hertz(hz);
        self
    }

    /// Sets the output polarity.
    pub fn polarity(mut self, polarity: Polarity) -> Self {
        self.config.polarity = polarity;
        self
    }

    /// Sets the idle callback function.
    pub fn idle_callback(mut self, callback: fn()) -> Self {
        self.config.idle_callback = Some(callback);
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> IgnitionConfig {
        self.config
    }
}
