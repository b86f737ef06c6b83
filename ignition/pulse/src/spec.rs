//! Unit conversions between physical pulse parameters and timer ticks.

use ignition_core::{Hertz, IgnitionError, IgnitionResult, Micros, MilliHertz};

/// Milli-hertz per hertz
const MILLIHERTZ_PER_HZ: u64 = 1_000;

/// Microseconds per second
const MICROS_PER_SEC: u64 = 1_000_000;

/// Logical pulse configuration of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseSpec {
    /// Pulse repetition rate
    pub frequency: MilliHertz,
    /// Active time per period
    pub pulse_width: Micros,
}

impl PulseSpec {
    pub const fn new(frequency: MilliHertz, pulse_width: Micros) -> Self {
        Self {
            frequency,
            pulse_width,
        }
    }

    /// Raw tick counts at `counter_hz`, rejecting a pulse that would not end
    /// before the period does.
    pub fn ticks(&self, counter_hz: u32) -> IgnitionResult<PulseTicks> {
        let period = period_ticks(counter_hz, self.frequency)?;
        let pulse = pulse_ticks(counter_hz, self.pulse_width)?;
        PulseTicks::new(period, pulse)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PulseSpec {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "PulseSpec({}, {})", self.frequency, self.pulse_width);
    }
}

/// Period and pulse match values, with `pulse < period`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseTicks {
    period: u32,
    pulse: u32,
}

impl PulseTicks {
    /// Pair two match values, failing unless the pulse ends inside the period.
    pub fn new(period: u32, pulse: u32) -> IgnitionResult<Self> {
        if pulse >= period {
            return Err(IgnitionError::InvalidArgument);
        }
        Ok(Self { period, pulse })
    }

    pub const fn period(&self) -> u32 {
        self.period
    }

    pub const fn pulse(&self) -> u32 {
        self.pulse
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PulseTicks {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "PulseTicks({}/{})", self.pulse, self.period);
    }
}

/// Counter clock after the prescaler: `src / (prescaler + 1)`.
pub fn counter_clock(src: Hertz, prescaler: u32) -> IgnitionResult<u32> {
    let clock = src.0 / prescaler.saturating_add(1);
    if clock == 0 {
        return Err(IgnitionError::InvalidArgument);
    }
    Ok(clock)
}

/// Period match value for `freq`: `counter_hz * 1000 / freq - 1`.
pub fn period_ticks(counter_hz: u32, freq: MilliHertz) -> IgnitionResult<u32> {
    if freq.0 == 0 {
        return Err(IgnitionError::InvalidArgument);
    }
    let cycle = u64::from(counter_hz) * MILLIHERTZ_PER_HZ / u64::from(freq.0);
    match cycle.checked_sub(1) {
        Some(period) => u32::try_from(period).map_err(|_| IgnitionError::InvalidArgument),
        None => Err(IgnitionError::InvalidArgument),
    }
}

/// Pulse match value for `width`: `width * counter_hz / 1_000_000`.
pub fn pulse_ticks(counter_hz: u32, width: Micros) -> IgnitionResult<u32> {
    if width.0 == 0 {
        return Err(IgnitionError::InvalidArgument);
    }
    let ticks = u64::from(width.0) * u64::from(counter_hz) / MICROS_PER_SEC;
    u32::try_from(ticks).map_err(|_| IgnitionError::InvalidArgument)
}
