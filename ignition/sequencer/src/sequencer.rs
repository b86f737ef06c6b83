//! Shared sequencer context

use core::cell::RefCell;

use critical_section::Mutex;
use ignition_core::{Command, IgnitionConfig, IgnitionResult, Tick};
use ignition_hal::{Level, PinInterruptSlot};

use crate::debounce::DebounceGate;
use crate::input::{encoder_command, InputSource};
use crate::stack::CommandStack;

/// What an input edge did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeOutcome {
    /// A command was pushed
    Accepted(Command),
    /// The switch turned fine stepping on; nothing was pushed
    Toggled,
    /// Inside the guard window; no effect
    Debounced,
    /// Accepted but the stack was full
    Dropped(Command),
    /// Unarmed input or unknown slot
    Ignored,
}

#[cfg(feature = "defmt")]
impl defmt::Format for EdgeOutcome {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            EdgeOutcome::Accepted(cmd) => defmt::write!(fmt, "Accepted({})", cmd),
            EdgeOutcome::Toggled => defmt::write!(fmt, "Toggled"),
            EdgeOutcome::Debounced => defmt::write!(fmt, "Debounced"),
            EdgeOutcome::Dropped(cmd) => defmt::write!(fmt, "Dropped({})", cmd),
            EdgeOutcome::Ignored => defmt::write!(fmt, "Ignored"),
        }
    }
}

#[derive(Debug)]
struct State {
    stack: CommandStack,
    gate: DebounceGate,
    fast_mode: bool,
}

/// Command stack, debounce gate and fast-mode flag, shared between the
/// input interrupts and the main loop
///
/// Every access runs inside a critical section, so a push from an
/// interrupt never interleaves with a pop in the loop.
pub struct Sequencer {
    state: Mutex<RefCell<State>>,
    coarse_step: u32,
    fine_step: u32,
}

impl Sequencer {
    /// Empty sequencer with fast mode off
    pub const fn new(guard_ticks: u32, coarse_step: u32, fine_step: u32) -> Self {
        Self {
            state: Mutex::new(RefCell::new(State {
                stack: CommandStack::new(),
                gate: DebounceGate::new(guard_ticks),
                fast_mode: false,
            })),
            coarse_step,
            fine_step,
        }
    }

    pub fn from_config(config: &IgnitionConfig) -> Self {
        Self::new(config.debounce_ticks, config.coarse_step, config.fine_step)
    }

    /// Route an edge on `source` seen at `now`
    ///
    /// `phase_a` is the encoder phase A level read when the interrupt
    /// fired; only phase B edges use it. Safe to call from interrupt
    /// context: it never blocks and never fails.
    pub fn on_edge(&self, source: InputSource, now: Tick, phase_a: Level) -> EdgeOutcome {
        if !source.is_armed() {
            return EdgeOutcome::Ignored;
        }

        let outcome = critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            if !state.gate.try_accept(now) {
                return EdgeOutcome::Debounced;
            }

            let command = match source {
                InputSource::EncoderPhaseB => encoder_command(phase_a.is_high()),
                InputSource::Button => Command::ToggleOutput,
                InputSource::Switch => {
                    state.fast_mode = !state.fast_mode;
                    if state.fast_mode {
                        return EdgeOutcome::Toggled;
                    }
                    Command::ApplyFrequency
                }
                InputSource::EncoderPhaseA => return EdgeOutcome::Ignored,
            };

            match state.stack.push(command) {
                Ok(()) => EdgeOutcome::Accepted(command),
                Err(_) => EdgeOutcome::Dropped(command),
            }
        });

        // interrupt context: trace only, callers report the outcome
        match outcome {
            EdgeOutcome::Debounced => log::trace!("{} edge at {} debounced", source.name(), now),
            EdgeOutcome::Dropped(cmd) => log::trace!("{} edge dropped {}", source.name(), cmd),
            _ => {}
        }
        outcome
    }

    /// [`Sequencer::on_edge`] for the input wired to `slot`
    pub fn on_pin_interrupt(&self, slot: PinInterruptSlot, now: Tick, phase_a: Level) -> EdgeOutcome {
        match InputSource::from_slot(slot) {
            Some(source) => self.on_edge(source, now, phase_a),
            None => EdgeOutcome::Ignored,
        }
    }

    /// Push a follow-up command from the main loop
    pub fn push(&self, command: Command) -> IgnitionResult<()> {
        let result = critical_section::with(|cs| self.state.borrow_ref_mut(cs).stack.push(command));
        if result.is_err() {
            log::warn!("command stack full, {} dropped", command);
        }
        result
    }

    /// Remove the top command for servicing
    pub fn take(&self) -> Option<Command> {
        critical_section::with(|cs| self.state.borrow_ref_mut(cs).stack.pop())
    }

    /// Top of the stack without removing it
    pub fn current(&self) -> Command {
        critical_section::with(|cs| self.state.borrow_ref(cs).stack.current())
    }

    /// Number of pending commands
    pub fn pending(&self) -> usize {
        critical_section::with(|cs| self.state.borrow_ref(cs).stack.len())
    }

    pub fn fast_mode(&self) -> bool {
        critical_section::with(|cs| self.state.borrow_ref(cs).fast_mode)
    }

    /// RPM step for the current fast-mode setting
    pub fn step(&self) -> u32 {
        if self.fast_mode() {
            self.fine_step
        } else {
            self.coarse_step
        }
    }

    /// Tick of the last accepted edge
    pub fn last_accepted(&self) -> Option<Tick> {
        critical_section::with(|cs| self.state.borrow_ref(cs).gate.last_accepted())
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::from_config(&IgnitionConfig::default())
    }
}
