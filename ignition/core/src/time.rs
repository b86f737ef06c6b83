//! Millisecond tick source

use core::cell::Cell;
use core::fmt;

use critical_section::Mutex;

/// Microseconds per second
const USEC_PER_SEC: u64 = 1_000_000;

/// Value of the monotonic tick counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tick(u32);

impl Tick {
    /// Zero tick
    pub const ZERO: Self = Self(0);

    /// Create a tick value
    pub const fn new(ticks: u32) -> Self {
        Self(ticks)
    }

    /// Get the raw tick value
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// This tick shifted forward by `ticks`, wrapping
    pub const fn offset(self, ticks: u32) -> Tick {
        Tick(self.0.wrapping_add(ticks))
    }

    /// Ticks elapsed since `previous`, wrapping
    pub const fn elapsed_since(self, previous: Tick) -> u32 {
        self.0.wrapping_sub(previous.0)
    }

    /// Strictly later than `other`, treating the counter as circular
    pub const fn is_after(self, other: Tick) -> bool {
        let delta = self.0.wrapping_sub(other.0);
        delta != 0 && delta <= i32::MAX as u32
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick:{}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Tick {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "tick:{}", self.0);
    }
}

/// Monotonic counter advanced by a fixed-period interrupt
///
/// Safe to share between the tick interrupt, the input interrupts and the
/// main loop; every access goes through a critical section.
pub struct TickSource {
    ticks: Mutex<Cell<u32>>,
}

impl TickSource {
    /// Counter starting at zero
    pub const fn new() -> Self {
        Self {
            ticks: Mutex::new(Cell::new(0)),
        }
    }

    /// Advance by one tick; call from the periodic interrupt
    pub fn on_tick(&self) {
        critical_section::with(|cs| {
            let ticks = self.ticks.borrow(cs);
            ticks.set(ticks.get().wrapping_add(1));
        });
    }

    /// Current tick
    pub fn now(&self) -> Tick {
        critical_section::with(|cs| Tick(self.ticks.borrow(cs).get()))
    }
}

impl Default for TickSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Reload value for a tick interrupt every `period_us` at `core_clock_hz`
///
/// Periods below one microsecond are raised to one.
pub const fn reload_for_period(core_clock_hz: u32, period_us: u32) -> u32 {
    let period = if period_us < 1 { 1 } else { period_us };
    (period as u64 * core_clock_hz as u64 / USEC_PER_SEC) as u32
}

/// Reload value for a tick interrupt every `period_ms`
pub const fn reload_for_millis(core_clock_hz: u32, period_ms: u32) -> u32 {
    let period = if period_ms < 1 { 1 } else { period_ms };
    reload_for_period(core_clock_hz, period.saturating_mul(1000))
}
