//! Indicator LEDs

/// The two board LEDs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Led {
    /// Green, lit while pulses are enabled
    StatusA,
    /// Red, lit while commanded and applied RPM differ
    StatusB,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Led {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Led::StatusA => defmt::write!(fmt, "StatusA"),
            Led::StatusB => defmt::write!(fmt, "StatusB"),
        }
    }
}

/// Two independent boolean indicator outputs
pub trait StatusLeds {
    /// Drive one LED
    fn set(&mut self, led: Led, on: bool);

    /// Current state of one LED
    fn is_on(&self, led: Led) -> bool;

    /// Light both LEDs
    fn set_all(&mut self) {
        self.set(Led::StatusA, true);
        self.set(Led::StatusB, true);
    }

    /// Turn both LEDs off
    fn reset_all(&mut self) {
        self.set(Led::StatusA, false);
        self.set(Led::StatusB, false);
    }
}
