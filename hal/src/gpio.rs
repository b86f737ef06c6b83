//! GPIO (General Purpose Input/Output) abstraction

use core::ops::Not;

use crate::error::HalResult;

/// GPIO pin levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Low level (0V)
    Low,
    /// High level (VCC)
    High,
}

impl Level {
    /// `true` for [`Level::High`]
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }

    /// `true` for [`Level::Low`]
    pub const fn is_low(self) -> bool {
        matches!(self, Level::Low)
    }
}

impl Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Level {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Level::Low => defmt::write!(fmt, "Low"),
            Level::High => defmt::write!(fmt, "High"),
        }
    }
}

/// Interrupt trigger edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Rising edge
    Rising,
    /// Falling edge
    Falling,
    /// Both edges
    Both,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Edge {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Edge::Rising => defmt::write!(fmt, "Rising"),
            Edge::Falling => defmt::write!(fmt, "Falling"),
            Edge::Both => defmt::write!(fmt, "Both"),
        }
    }
}

/// GPIO pin trait (object-safe)
pub trait GpioPin {
    /// Read current level
    fn read(&self) -> HalResult<Level>;

    /// Write level (for output pins)
    fn write(&mut self, level: Level) -> HalResult<()>;

    /// Toggle output
    fn toggle(&mut self) -> HalResult<()> {
        let current = self.read()?;
        self.write(!current)
    }

    /// Get pin number
    fn pin_number(&self) -> u32;
}
