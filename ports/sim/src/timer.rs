//! Simulated State Configurable Timer
//!
//! Counter semantics follow the LPC8xx SCT in unified mode: on each counter
//! clock every event whose match register equals the counter fires, its
//! output actions are applied, and a limit event resets the counter to zero
//! on the following clock while copying the reload registers into the live
//! match registers.

use ignition_hal::{EventId, HalError, HalResult, Level, MatchSlot, MatchTimer, OutputId};

/// Events provided by the simulated peripheral
pub const SIM_EVENT_COUNT: usize = 8;

/// Match registers provided by the simulated peripheral
pub const SIM_MATCH_COUNT: usize = 8;

/// Output lines provided by the simulated peripheral
pub const SIM_OUTPUT_COUNT: usize = 6;

#[derive(Debug, Clone, Copy)]
struct OutputAction {
    output: OutputId,
    event: EventId,
    level: Level,
}

/// Activity of the outputs over one [`SimTimer::advance`] call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Waveform {
    ticks: u64,
    rising: [u64; SIM_OUTPUT_COUNT],
    falling: [u64; SIM_OUTPUT_COUNT],
    high: [u64; SIM_OUTPUT_COUNT],
}

impl Waveform {
    /// Counter clocks simulated
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Low to high transitions seen on `output`
    pub fn rising_edges(&self, output: OutputId) -> u64 {
        self.rising.get(usize::from(output.0)).copied().unwrap_or(0)
    }

    /// High to low transitions seen on `output`
    pub fn falling_edges(&self, output: OutputId) -> u64 {
        self.falling.get(usize::from(output.0)).copied().unwrap_or(0)
    }

    /// Clocks during which `output` was high
    pub fn high_ticks(&self, output: OutputId) -> u64 {
        self.high.get(usize::from(output.0)).copied().unwrap_or(0)
    }

    /// Fold a later run into this one
    pub fn extend(&mut self, later: &Waveform) {
        self.ticks += later.ticks;
        for i in 0..SIM_OUTPUT_COUNT {
            self.rising[i] += later.rising[i];
            self.falling[i] += later.falling[i];
            self.high[i] += later.high[i];
        }
    }
}

/// Software model of a match-compare timer
#[derive(Debug, Clone)]
pub struct SimTimer {
    prescaler: u32,
    event_capacity: usize,
    unified: bool,
    running: bool,
    counter: u32,
    live: [u32; SIM_MATCH_COUNT],
    reload: [u32; SIM_MATCH_COUNT],
    events: Vec<MatchSlot>,
    limit: Option<EventId>,
    actions: Vec<OutputAction>,
    outputs: [Level; SIM_OUTPUT_COUNT],
}

impl Default for SimTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl SimTimer {
    /// Stopped timer, prescaler field 0, every event free
    pub fn new() -> Self {
        Self {
            prescaler: 0,
            event_capacity: SIM_EVENT_COUNT,
            unified: false,
            running: false,
            counter: 0,
            live: [0; SIM_MATCH_COUNT],
            reload: [0; SIM_MATCH_COUNT],
            events: Vec::new(),
            limit: None,
            actions: Vec::new(),
            outputs: [Level::Low; SIM_OUTPUT_COUNT],
        }
    }

    /// Set the prescaler field; the counter clock becomes `src / (p + 1)`
    pub fn with_prescaler(mut self, prescaler: u32) -> Self {
        self.prescaler = prescaler;
        self
    }

    /// Pretend only `capacity` events exist
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity.min(SIM_EVENT_COUNT);
        self
    }

    /// Current counter value
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Current level of an output line
    pub fn output_level(&self, output: OutputId) -> Level {
        self.outputs
            .get(usize::from(output.0))
            .copied()
            .unwrap_or(Level::Low)
    }

    /// Reload register contents
    pub fn read_reload(&self, slot: MatchSlot) -> HalResult<u32> {
        self.reload
            .get(usize::from(slot.0))
            .copied()
            .ok_or(HalError::InvalidParameter)
    }

    pub fn is_unified(&self) -> bool {
        self.unified
    }

    /// Run the counter for `ticks` clocks and report what the outputs did.
    ///
    /// A stopped timer holds every output at its current level.
    pub fn advance(&mut self, ticks: u64) -> Waveform {
        let mut wave = Waveform {
            ticks,
            ..Waveform::default()
        };
        let mut remaining = ticks;

        while remaining > 0 {
            if !self.running {
                self.hold(&mut wave, remaining);
                break;
            }

            if self.fires_now() {
                self.clock(&mut wave);
                remaining -= 1;
                continue;
            }

            let step = self.ticks_to_next_match().min(remaining);
            self.hold(&mut wave, step);
            self.counter = self.counter.wrapping_add(step as u32);
            remaining -= step;
        }

        wave
    }

    fn fires_now(&self) -> bool {
        self.events
            .iter()
            .any(|slot| self.live[usize::from(slot.0)] == self.counter)
    }

    /// Clocks until some match register equals the counter, or until the
    /// counter wraps.
    fn ticks_to_next_match(&self) -> u64 {
        let to_wrap = u64::from(u32::MAX - self.counter) + 1;
        self.events
            .iter()
            .map(|slot| self.live[usize::from(slot.0)])
            .filter(|&value| value > self.counter)
            .map(|value| u64::from(value - self.counter))
            .min()
            .unwrap_or(to_wrap)
    }

    /// One counter clock with at least one event firing.
    fn clock(&mut self, wave: &mut Waveform) {
        let counter = self.counter;
        let fired: Vec<EventId> = self
            .events
            .iter()
            .enumerate()
            .filter(|(_, slot)| self.live[usize::from(slot.0)] == counter)
            .map(|(index, _)| EventId(index as u8))
            .collect();

        for action in self.actions.iter().filter(|a| fired.contains(&a.event)) {
            let index = usize::from(action.output.0);
            let before = self.outputs[index];
            if before != action.level {
                if action.level.is_high() {
                    wave.rising[index] += 1;
                } else {
                    wave.falling[index] += 1;
                }
            }
            self.outputs[index] = action.level;
        }

        self.hold(wave, 1);

        let limited = self.limit.is_some_and(|limit| fired.contains(&limit));
        if limited {
            self.counter = 0;
            self.live = self.reload;
        } else {
            self.counter = self.counter.wrapping_add(1);
        }
    }

    fn hold(&self, wave: &mut Waveform, ticks: u64) {
        for (index, level) in self.outputs.iter().enumerate() {
            if level.is_high() {
                wave.high[index] += ticks;
            }
        }
    }

    fn slot_index(&self, slot: MatchSlot) -> HalResult<usize> {
        let index = usize::from(slot.0);
        if index < SIM_MATCH_COUNT {
            Ok(index)
        } else {
            Err(HalError::InvalidParameter)
        }
    }

    fn check_event(&self, event: EventId) -> HalResult<()> {
        if usize::from(event.0) < self.events.len() {
            Ok(())
        } else {
            Err(HalError::InvalidParameter)
        }
    }
}

impl MatchTimer for SimTimer {
    fn event_capacity(&self) -> usize {
        self.event_capacity
    }

    fn events_in_use(&self) -> usize {
        self.events.len()
    }

    fn prescaler(&self) -> u32 {
        self.prescaler
    }

    fn set_unified(&mut self) -> HalResult<()> {
        if self.running {
            return Err(HalError::Busy);
        }
        self.unified = true;
        Ok(())
    }

    fn schedule_match_event(&mut self, value: u32) -> HalResult<EventId> {
        if self.events.len() >= self.event_capacity || self.events.len() >= SIM_MATCH_COUNT {
            return Err(HalError::NoFreeEvent);
        }
        if !self.unified && value > u32::from(u16::MAX) {
            return Err(HalError::InvalidParameter);
        }

        let slot = MatchSlot(self.events.len() as u8);
        let index = usize::from(slot.0);
        self.live[index] = value;
        self.reload[index] = value;
        self.events.push(slot);
        Ok(EventId(index as u8))
    }

    fn match_slot(&self, event: EventId) -> HalResult<MatchSlot> {
        self.events
            .get(usize::from(event.0))
            .copied()
            .ok_or(HalError::InvalidParameter)
    }

    fn read_match(&self, slot: MatchSlot) -> HalResult<u32> {
        Ok(self.live[self.slot_index(slot)?])
    }

    fn write_match(&mut self, slot: MatchSlot, value: u32) -> HalResult<()> {
        let index = self.slot_index(slot)?;
        self.live[index] = value;
        Ok(())
    }

    fn write_match_reload(&mut self, slot: MatchSlot, value: u32) -> HalResult<()> {
        let index = self.slot_index(slot)?;
        self.reload[index] = value;
        Ok(())
    }

    fn set_limit_event(&mut self, event: EventId) -> HalResult<()> {
        self.check_event(event)?;
        self.limit = Some(event);
        Ok(())
    }

    fn set_output_action(
        &mut self,
        output: OutputId,
        event: EventId,
        level: Level,
    ) -> HalResult<()> {
        self.check_event(event)?;
        if usize::from(output.0) >= SIM_OUTPUT_COUNT {
            return Err(HalError::InvalidParameter);
        }
        self.actions
            .retain(|a| !(a.output == output && a.event == event));
        self.actions.push(OutputAction {
            output,
            event,
            level,
        });
        Ok(())
    }

    fn force_output(&mut self, output: OutputId, level: Level) {
        if let Some(line) = self.outputs.get_mut(usize::from(output.0)) {
            *line = level;
        }
    }

    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn reset_counter(&mut self) {
        self.counter = 0;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
