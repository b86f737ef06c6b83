#![no_std]
#![forbid(unsafe_code)]

//! # Ignition Sequencer
//!
//! Serializes asynchronous operator inputs into one ordered stream of
//! [`Command`](ignition_core::Command)s for the cooperative main loop.
//!
//! Input interrupts call [`Sequencer::on_edge`]; every edge passes one
//! [`DebounceGate`] shared by all inputs, then pushes onto a bounded
//! [`CommandStack`]. The main loop drains the stack with
//! [`Sequencer::take`], most recent command first.
//!
//! ## Module Overview
//! - [`stack`]     – [`CommandStack`], fixed-capacity LIFO.
//! - [`debounce`]  – [`DebounceGate`], minimum-interval edge filter.
//! - [`input`]     – [`InputSource`] table and [`register_inputs`].
//! - [`sequencer`] – [`Sequencer`] shared context and edge handlers.

pub mod debounce;
pub mod input;
pub mod sequencer;
pub mod stack;

pub use debounce::{DebounceGate, DEFAULT_GUARD_TICKS};
pub use input::{encoder_command, register_inputs, InputBinding, InputPins, InputSource, INPUT_BINDINGS};
pub use sequencer::{EdgeOutcome, Sequencer};
pub use stack::{CommandStack, STACK_CAPACITY};
