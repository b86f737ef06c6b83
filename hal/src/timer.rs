//! Match-compare timer abstraction
//!
//! Models a free-running counter with a pool of match registers and events,
//! in the shape of the LPC8xx State Configurable Timer (SCT). An event fires
//! when the counter equals the value held in its match register; events can
//! reset the counter (limit) and drive outputs high or low.

use crate::error::HalResult;
use crate::gpio::Level;

/// Handle of a scheduled timer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EventId(pub u8);

/// Index of a match register
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchSlot(pub u8);

/// Index of a timer output line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct OutputId(pub u8);

#[cfg(feature = "defmt")]
impl defmt::Format for EventId {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "EV{}", self.0);
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MatchSlot {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "MATCH{}", self.0);
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for OutputId {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "OUT{}", self.0);
    }
}

/// Match-compare timer trait
///
/// Register accessors are fallible so that implementations can reject
/// out-of-range slots; run control and output forcing cannot fail.
pub trait MatchTimer {
    /// Total number of events the peripheral provides
    fn event_capacity(&self) -> usize;

    /// Number of events already scheduled
    fn events_in_use(&self) -> usize;

    /// Programmed prescaler field; the counter clock is `src / (prescaler + 1)`
    fn prescaler(&self) -> u32;

    /// Run the two 16-bit halves as a single 32-bit counter
    fn set_unified(&mut self) -> HalResult<()>;

    /// Allocate an event and a match register firing at `value`
    fn schedule_match_event(&mut self, value: u32) -> HalResult<EventId>;

    /// Match register an event compares against
    fn match_slot(&self, event: EventId) -> HalResult<MatchSlot>;

    /// Read the live match register
    fn read_match(&self, slot: MatchSlot) -> HalResult<u32>;

    /// Write the live match register
    fn write_match(&mut self, slot: MatchSlot, value: u32) -> HalResult<()>;

    /// Write the reload register copied into the live one at each limit
    fn write_match_reload(&mut self, slot: MatchSlot, value: u32) -> HalResult<()>;

    /// Reset the counter whenever `event` fires
    fn set_limit_event(&mut self, event: EventId) -> HalResult<()>;

    /// Drive `output` to `level` whenever `event` fires
    fn set_output_action(&mut self, output: OutputId, event: EventId, level: Level)
        -> HalResult<()>;

    /// Force `output` to `level` immediately
    fn force_output(&mut self, output: OutputId, level: Level);

    /// Let the counter run
    fn start(&mut self);

    /// Halt the counter, keeping its value
    fn stop(&mut self);

    /// Set the counter back to zero
    fn reset_counter(&mut self);

    /// Whether the counter is running
    fn is_running(&self) -> bool;
}
