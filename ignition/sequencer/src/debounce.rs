//! Debounce gate shared by the operator inputs

use ignition_core::Tick;

/// Default guard interval, in ticks
pub const DEFAULT_GUARD_TICKS: u32 = 15;

/// Minimum-interval filter on accepted edges
///
/// An edge is accepted when strictly more than `guard` ticks have passed
/// since the last accepted one. Rejected edges leave the gate unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceGate {
    guard: u32,
    last_accepted: Option<Tick>,
}

impl DebounceGate {
    pub const fn new(guard: u32) -> Self {
        Self {
            guard,
            last_accepted: None,
        }
    }

    pub const fn guard(&self) -> u32 {
        self.guard
    }

    pub const fn last_accepted(&self) -> Option<Tick> {
        self.last_accepted
    }

    /// Whether an edge at `now` would pass, without consuming the gate
    pub fn is_open(&self, now: Tick) -> bool {
        match self.last_accepted {
            Some(last) => now.elapsed_since(last) > self.guard,
            None => true,
        }
    }

    /// Accept an edge at `now` if the gate is open, restarting the guard
    pub fn try_accept(&mut self, now: Tick) -> bool {
        if !self.is_open(now) {
            return false;
        }
        self.last_accepted = Some(now);
        true
    }
}

impl Default for DebounceGate {
    fn default() -> Self {
        Self::new(DEFAULT_GUARD_TICKS)
    }
}
