//! Hardware Abstraction Layer (HAL) for the ignition-coil driver
//!
//! Vendor-agnostic traits for the peripherals the controller touches: the
//! match-compare timer producing the coil pulse, edge-triggered pin
//! interrupts, the status display and the two indicator LEDs.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

pub mod display;
pub mod error;
pub mod gpio;
pub mod interrupt;
pub mod led;
pub mod timer;

// Re-export commonly used types
pub use display::StatusDisplay;
pub use error::{HalError, HalResult};
pub use gpio::{Edge, GpioPin, Level};
pub use interrupt::{PinInterruptController, PinInterruptSlot};
pub use led::{Led, StatusLeds};
pub use timer::{EventId, MatchSlot, MatchTimer, OutputId};
