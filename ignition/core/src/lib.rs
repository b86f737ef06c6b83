#![no_std]
#![forbid(unsafe_code)]

//! # Ignition Core
//!
//! Types shared by every layer of the ignition-coil driver: the operator
//! [`Command`] set, physical units, the millisecond [`TickSource`] and the
//! runtime [`IgnitionConfig`].

#[cfg(feature = "std")]
extern crate std;

use core::fmt;

use ignition_hal::HalError;

pub mod command;
pub mod config;
pub mod time;
pub mod units;

pub use command::*;
pub use config::*;
pub use time::*;
pub use units::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type used throughout the driver
pub type IgnitionResult<T> = Result<T, IgnitionError>;

/// Error classification for driver operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnitionError {
    /// Frequency/width combination producing an invalid or non-firing pulse
    InvalidArgument,
    /// No free timer events left during setup
    ResourceExhausted,
    /// Command stack full, the command was discarded
    CommandDropped,
    /// A collaborator reported a hardware failure
    Hal(HalError),
}

impl From<HalError> for IgnitionError {
    fn from(err: HalError) -> Self {
        match err {
            HalError::NoFreeEvent => IgnitionError::ResourceExhausted,
            other => IgnitionError::Hal(other),
        }
    }
}

impl fmt::Display for IgnitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnitionError::InvalidArgument => write!(f, "Invalid pulse argument"),
            IgnitionError::ResourceExhausted => write!(f, "Timer events exhausted"),
            IgnitionError::CommandDropped => write!(f, "Command stack full"),
            IgnitionError::Hal(err) => write!(f, "Hardware error: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for IgnitionError {}

#[cfg(feature = "defmt")]
impl defmt::Format for IgnitionError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            IgnitionError::InvalidArgument => defmt::write!(fmt, "InvalidArgument"),
            IgnitionError::ResourceExhausted => defmt::write!(fmt, "ResourceExhausted"),
            IgnitionError::CommandDropped => defmt::write!(fmt, "CommandDropped"),
            IgnitionError::Hal(err) => defmt::write!(fmt, "Hal({})", err),
        }
    }
}
