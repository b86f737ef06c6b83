//! Host port for the ignition-coil driver
//!
//! Software stand-ins for every peripheral the controller touches, so the
//! full command logic runs and can be observed on a development machine:
//!
//! - [`SimTimer`]: match-compare timer with a cycle-stepping model of the
//!   output line, reporting a [`Waveform`] per run.
//! - [`TextDisplay`]: page-addressed character framebuffer.
//! - [`SimLeds`]: the two status LEDs.
//! - [`SimPins`] / [`SimPin`]: pin-interrupt router and readable input pins.
//! - [`ticker`]: drift-free millisecond tick thread.
//! - [`logger`]: coloured terminal `log` backend.

pub mod display;
pub mod leds;
pub mod logger;
pub mod pins;
pub mod ticker;
pub mod timer;

pub use display::TextDisplay;
pub use leds::SimLeds;
pub use pins::{SimPin, SimPins};
pub use timer::{SimTimer, Waveform};

use thiserror::Error;

/// Errors raised by the host port
#[derive(Debug, Error)]
pub enum SimError {
    #[error("unknown log level `{0}`")]
    LogLevel(String),

    #[error("logger already installed")]
    Logger(#[from] log::SetLoggerError),

    #[error("tick period must be non-zero")]
    ZeroPeriod,

    #[error("failed to spawn ticker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Result alias for host port operations
pub type SimResult<T> = Result<T, SimError>;
