#![no_std]
#![forbid(unsafe_code)]

//! # Ignition Dispatch
//!
//! The cooperative main loop. Each [`Dispatcher::poll`] takes the most
//! recent command off the shared [`Sequencer`](ignition_sequencer::Sequencer),
//! applies it to the runtime state and the pulse generator, and refreshes
//! the status screen and LEDs. Nothing here blocks; an empty stack is the
//! idle state.

pub mod dispatcher;
pub mod screen;
pub mod state;

pub use dispatcher::Dispatcher;
pub use state::RuntimeState;
