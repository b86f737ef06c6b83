//! Errors raised by peripheral drivers

use core::fmt;

/// Peripheral driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalError {
    /// Argument outside what the peripheral accepts (slot, output, value range)
    InvalidParameter,
    /// Peripheral is running and cannot be reconfigured
    Busy,
    /// Every timer event is already scheduled
    NoFreeEvent,
    /// Device reported a fault; the code is driver-specific
    Device(i32),
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter => write!(f, "parameter out of range"),
            Self::Busy => write!(f, "peripheral running"),
            Self::NoFreeEvent => write!(f, "no free timer event"),
            Self::Device(code) => write!(f, "device fault {}", code),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

#[cfg(feature = "defmt")]
impl defmt::Format for HalError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidParameter => defmt::write!(fmt, "InvalidParameter"),
            Self::Busy => defmt::write!(fmt, "Busy"),
            Self::NoFreeEvent => defmt::write!(fmt, "NoFreeEvent"),
            Self::Device(code) => defmt::write!(fmt, "Device({})", code),
        }
    }
}

/// Result type for peripheral operations
pub type HalResult<T> = Result<T, HalError>;
