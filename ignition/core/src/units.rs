//! Physical units used by the driver

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Numerator of the RPM to milli-hertz scale factor (33.333)
pub const RPM_TO_MILLIHERTZ_NUM: u64 = 33_333;

/// Denominator of the RPM to milli-hertz scale factor
pub const RPM_TO_MILLIHERTZ_DEN: u64 = 1_000;

/// Shaft speed in revolutions per minute
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rpm(pub u32);

impl Rpm {
    /// Create a new speed
    pub const fn new(rpm: u32) -> Self {
        Self(rpm)
    }

    /// Get the raw value
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Restrict to `[min, max]`
    pub fn clamp_to(self, min: Rpm, max: Rpm) -> Rpm {
        Rpm(self.0.clamp(min.0, max.0))
    }

    /// One step up, snapping to `max` when the step would reach or pass it
    pub fn step_up(self, step: u32, max: Rpm) -> Rpm {
        if self.0 >= max.0.saturating_sub(step) {
            max
        } else {
            Rpm(self.0 + step)
        }
    }

    /// One step down, snapping to `min` when the step would reach or pass it
    pub fn step_down(self, step: u32, min: Rpm) -> Rpm {
        if self.0 <= min.0.saturating_add(step) {
            min
        } else {
            Rpm(self.0 - step)
        }
    }

    /// Electrical pulse rate for this speed, truncated to whole milli-hertz
    ///
    /// Saturates at `u32::MAX` for speeds far outside any configured range.
    pub fn to_millihertz(self) -> MilliHertz {
        let freq = u64::from(self.0) * RPM_TO_MILLIHERTZ_NUM / RPM_TO_MILLIHERTZ_DEN;
        MilliHertz(u32::try_from(freq).unwrap_or(u32::MAX))
    }
}

impl fmt::Display for Rpm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Rpm {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}rpm", self.0);
    }
}

/// Frequency in milli-hertz
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MilliHertz(pub u32);

impl MilliHertz {
    /// Get the raw value
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for MilliHertz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}mHz", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MilliHertz {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}mHz", self.0);
    }
}

/// Frequency in hertz
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hertz(pub u32);

impl Hertz {
    /// Get the raw value
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Hertz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Hz", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Hertz {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}Hz", self.0);
    }
}

/// Duration in microseconds
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Micros(pub u32);

impl Micros {
    /// Get the raw value
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Micros {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}us", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Micros {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}us", self.0);
    }
}
