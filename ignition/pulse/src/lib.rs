#![no_std]
#![forbid(unsafe_code)]

//! # Ignition Pulse
//!
//! Turns a pulse rate (milli-hertz) and a coil charge time (microseconds)
//! into match values for a free-running match-compare timer, and updates a
//! running channel without ever leaving the output latched active.
//!
//! ## Module Overview
//! - [`spec`]      – Unit to tick conversions and the [`PulseSpec`] pair.
//! - [`generator`] – [`PulseGenerator`] owning the timer, and [`PulseChannel`].
//!
//! Every conversion multiplies before dividing in 64-bit arithmetic, so a
//! tens-of-megahertz clock times a microsecond or milli-hertz quantity keeps
//! its sub-unit precision.

#[cfg(test)]
extern crate std;

pub mod generator;
pub mod spec;

pub use generator::{PulseChannel, PulseGenerator};
pub use spec::{counter_clock, period_ticks, pulse_ticks, PulseSpec, PulseTicks};

#[cfg(test)]
mod tests;
