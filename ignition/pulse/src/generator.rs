//! Pulse generator bound to one match-compare timer.

use ignition_core::{Hertz, IgnitionError, IgnitionResult, Micros, MilliHertz, Polarity};
use ignition_hal::{EventId, MatchSlot, MatchTimer, OutputId};

use crate::spec::{counter_clock, period_ticks, pulse_ticks, PulseSpec, PulseTicks};

/// Events consumed by one channel: period rollover and pulse end.
const EVENTS_PER_CHANNEL: usize = 2;

/// One programmed timer output.
///
/// Returned by [`PulseGenerator::setup`] and handed back to every later
/// update. The logical [`PulseSpec`] is refreshed only when an update is
/// committed to hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseChannel {
    output: OutputId,
    src_clock: Hertz,
    prescaler: u32,
    period_event: EventId,
    pulse_event: EventId,
    period_slot: MatchSlot,
    pulse_slot: MatchSlot,
    polarity: Polarity,
    spec: PulseSpec,
}

impl PulseChannel {
    pub const fn output(&self) -> OutputId {
        self.output
    }

    pub const fn src_clock(&self) -> Hertz {
        self.src_clock
    }

    /// Prescaler field read back at setup; the divisor is this plus one.
    pub const fn prescaler(&self) -> u32 {
        self.prescaler
    }

    /// Event resetting the counter and starting the pulse.
    pub const fn period_event(&self) -> EventId {
        self.period_event
    }

    /// Event ending the pulse.
    pub const fn pulse_event(&self) -> EventId {
        self.pulse_event
    }

    pub const fn period_slot(&self) -> MatchSlot {
        self.period_slot
    }

    pub const fn pulse_slot(&self) -> MatchSlot {
        self.pulse_slot
    }

    pub const fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Last committed frequency and width.
    pub const fn spec(&self) -> PulseSpec {
        self.spec
    }

    /// Period and pulse values live in `timer` for this channel.
    pub fn read_back<T: MatchTimer>(&self, timer: &T) -> IgnitionResult<PulseTicks> {
        let period = timer.read_match(self.period_slot)?;
        let pulse = timer.read_match(self.pulse_slot)?;
        PulseTicks::new(period, pulse)
    }

    fn counter_hz(&self) -> IgnitionResult<u32> {
        counter_clock(self.src_clock, self.prescaler)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PulseChannel {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "PulseChannel({}, {}, {})",
            self.output,
            self.period_event,
            self.spec
        );
    }
}

/// Owner of the match-compare timer producing the coil pulse.
pub struct PulseGenerator<T: MatchTimer> {
    timer: T,
}

impl<T: MatchTimer> PulseGenerator<T> {
    pub fn new(timer: T) -> Self {
        Self { timer }
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    /// Give the timer back.
    pub fn release(self) -> T {
        self.timer
    }

    /// Program a new channel on a stopped counter.
    ///
    /// The output goes active when the period event resets the counter and
    /// inactive at the pulse-end event. It is forced inactive before the
    /// actions are armed. Nothing is written when the arguments are invalid
    /// or the timer lacks two free events.
    pub fn setup(
        &mut self,
        output: OutputId,
        src_clock: Hertz,
        spec: PulseSpec,
        polarity: Polarity,
    ) -> IgnitionResult<PulseChannel> {
        if self.timer.is_running() {
            log::warn!("pulse setup refused: counter is running");
            return Err(IgnitionError::Hal(ignition_hal::HalError::Busy));
        }

        let in_use = self.timer.events_in_use();
        if in_use + EVENTS_PER_CHANNEL > self.timer.event_capacity() {
            log::error!(
                "pulse setup: {} of {} timer events in use",
                in_use,
                self.timer.event_capacity()
            );
            return Err(IgnitionError::ResourceExhausted);
        }

        let prescaler = self.timer.prescaler();
        let ticks = spec.ticks(counter_clock(src_clock, prescaler)?)?;

        self.timer.set_unified()?;
        let period_event = self.timer.schedule_match_event(ticks.period())?;
        let pulse_event = self.timer.schedule_match_event(ticks.pulse())?;
        self.timer.set_limit_event(period_event)?;

        self.timer.force_output(output, polarity.inactive_level());
        self.timer
            .set_output_action(output, period_event, polarity.active_level())?;
        self.timer
            .set_output_action(output, pulse_event, polarity.inactive_level())?;

        let channel = PulseChannel {
            output,
            src_clock,
            prescaler,
            period_event,
            pulse_event,
            period_slot: self.timer.match_slot(period_event)?,
            pulse_slot: self.timer.match_slot(pulse_event)?,
            polarity,
            spec,
        };

        log::debug!(
            "pulse setup: {} mHz / {} us -> period {} ticks, pulse {} ticks",
            spec.frequency.raw(),
            spec.pulse_width.raw(),
            ticks.period(),
            ticks.pulse()
        );
        Ok(channel)
    }

    /// Change the pulse rate of a running channel.
    ///
    /// Rejected with `InvalidArgument` when the new period would not exceed
    /// the programmed pulse; the previous configuration then stays active.
    pub fn update_frequency(
        &mut self,
        channel: &mut PulseChannel,
        freq: MilliHertz,
    ) -> IgnitionResult<()> {
        let period = period_ticks(channel.counter_hz()?, freq)?;
        let pulse = self.timer.read_match(channel.pulse_slot)?;

        if PulseTicks::new(period, pulse).is_err() {
            log::warn!(
                "frequency {} mHz rejected: period {} ticks <= pulse {} ticks",
                freq.raw(),
                period,
                pulse
            );
            return Err(IgnitionError::InvalidArgument);
        }

        self.reprogram(channel, channel.period_slot, period)?;
        channel.spec.frequency = freq;
        log::debug!("frequency -> {} mHz ({} ticks)", freq.raw(), period);
        Ok(())
    }

    /// Change the pulse width of a running channel.
    ///
    /// A pulse ending on or after the rollover never clears the output, so
    /// `pulse >= period` is rejected with `InvalidArgument`.
    pub fn update_pulse_width(
        &mut self,
        channel: &mut PulseChannel,
        width: Micros,
    ) -> IgnitionResult<()> {
        let pulse = pulse_ticks(channel.counter_hz()?, width)?;
        let period = self.timer.read_match(channel.period_slot)?;

        if PulseTicks::new(period, pulse).is_err() {
            log::warn!(
                "pulse width {} us rejected: pulse {} ticks >= period {} ticks",
                width.raw(),
                pulse,
                period
            );
            return Err(IgnitionError::InvalidArgument);
        }

        self.reprogram(channel, channel.pulse_slot, pulse)?;
        channel.spec.pulse_width = width;
        log::debug!("pulse width -> {} us ({} ticks)", width.raw(), pulse);
        Ok(())
    }

    /// Start (`on`) or stop the counter; stopping also forces the output
    /// inactive. Match values are left untouched.
    pub fn enable(&mut self, channel: &PulseChannel, on: bool) {
        if on {
            self.timer.start();
        } else {
            self.timer.stop();
            self.timer
                .force_output(channel.output, channel.polarity.inactive_level());
        }
    }

    /// Match values currently programmed for `channel`.
    pub fn programmed_ticks(&self, channel: &PulseChannel) -> IgnitionResult<PulseTicks> {
        channel.read_back(&self.timer)
    }

    /// Stop, force inactive, write live and reload registers, restart.
    ///
    /// Writing a match register under a running counter can skip the
    /// compare for one cycle and leave the output latched active.
    fn reprogram(
        &mut self,
        channel: &PulseChannel,
        slot: MatchSlot,
        value: u32,
    ) -> IgnitionResult<()> {
        self.timer.stop();
        self.timer
            .force_output(channel.output, channel.polarity.inactive_level());

        let written = self
            .timer
            .write_match(slot, value)
            .and_then(|()| self.timer.write_match_reload(slot, value));

        self.timer.reset_counter();
        self.timer.start();
        written.map_err(IgnitionError::from)
    }
}
