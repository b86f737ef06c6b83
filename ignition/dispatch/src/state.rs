//! Main-loop runtime state

use ignition_core::{IgnitionConfig, Micros, Rpm};

/// Values owned by the dispatch loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeState {
    /// Operator target
    pub commanded: Rpm,
    /// Speed currently programmed into the timer
    pub applied: Rpm,
    pub output_enabled: bool,
    /// Coil charge time
    pub pulse_width: Micros,
}

impl RuntimeState {
    /// Start-up values: both speeds at the configured default, output off
    pub fn from_config(config: &IgnitionConfig) -> Self {
        let rpm = config.clamp_rpm(config.default_rpm);
        Self {
            commanded: rpm,
            applied: rpm,
            output_enabled: false,
            pulse_width: config.pulse_width,
        }
    }

    /// Commanded and applied speeds agree
    pub fn is_matched(&self) -> bool {
        self.commanded == self.applied
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RuntimeState {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "RuntimeState{{cmd: {}, applied: {}, on: {}}}",
            self.commanded,
            self.applied,
            self.output_enabled
        );
    }
}
