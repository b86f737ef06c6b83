//! Operator commands serviced by the main loop

use core::fmt;

/// One pending action for the dispatch loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    /// Nothing pending; the resting state
    #[default]
    None,
    /// Raise the commanded RPM by one step
    Increase,
    /// Lower the commanded RPM by one step
    Decrease,
    /// Flip output enable
    ToggleOutput,
    /// Program the commanded RPM into the timer
    ApplyFrequency,
    /// Re-program the fixed pulse width
    ApplyPulseWidth,
}

impl Command {
    /// `true` for [`Command::None`]
    pub const fn is_none(self) -> bool {
        matches!(self, Command::None)
    }

    /// Short name used in logs
    pub const fn name(self) -> &'static str {
        match self {
            Command::None => "None",
            Command::Increase => "Increase",
            Command::Decrease => "Decrease",
            Command::ToggleOutput => "ToggleOutput",
            Command::ApplyFrequency => "ApplyFrequency",
            Command::ApplyPulseWidth => "ApplyPulseWidth",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Command {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=str}", self.name());
    }
}
