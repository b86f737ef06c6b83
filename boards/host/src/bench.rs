//! Test bench: the controller wired to simulated controls

use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use ignition_core::{IgnitionConfig, TickSource};
use ignition_dispatch::{Dispatcher, RuntimeState};
use ignition_hal::{
    Edge, GpioPin, HalResult, Level, MatchTimer, OutputId, PinInterruptController,
};
use ignition_pulse::counter_clock;
use ignition_sequencer::{register_inputs, EdgeOutcome, InputPins, Sequencer};
use ignition_sim::{SimLeds, SimPin, SimPins, SimTimer, TextDisplay, Waveform};

use crate::script::Step;

/// Timer output driving the coil
pub const COIL_OUTPUT: OutputId = OutputId(0);

/// Granularity of the main loop while waiting
const LOOP_SLICE: Duration = Duration::from_millis(1);

pub struct Bench<'a> {
    ticks: &'static TickSource,
    pins: SimPins,
    wiring: InputPins,
    phase_a: SimPin,
    switch_high: bool,
    controller: Dispatcher<'a, SimTimer, TextDisplay, SimLeds>,
    counter_hz: u64,
    waveform: Waveform,
}

impl<'a> Bench<'a> {
    pub fn new(
        config: IgnitionConfig,
        sequencer: &'a Sequencer,
        ticks: &'static TickSource,
    ) -> Result<Self> {
        let timer = SimTimer::new();
        let counter_hz = u64::from(counter_clock(config.src_clock, timer.prescaler())?);

        let wiring = InputPins::default();
        let mut pins = SimPins::new();
        register_inputs(&mut pins, &wiring)?;

        let controller = Dispatcher::start(
            config,
            sequencer,
            timer,
            COIL_OUTPUT,
            TextDisplay::new(),
            SimLeds::new(),
        )?;

        Ok(Self {
            ticks,
            pins,
            phase_a: SimPin::new(wiring.phase_a, Level::High),
            wiring,
            switch_high: false,
            controller,
            counter_hz,
            waveform: Waveform::default(),
        })
    }

    /// Perform one operator action, then let the loop drain
    pub fn apply(&mut self, step: Step) -> Result<Option<EdgeOutcome>> {
        let outcome = match step {
            Step::Up => Some(self.detent(Level::Low)?),
            Step::Down => Some(self.detent(Level::High)?),
            Step::Press => Some(self.edge(self.wiring.button, Edge::Rising)?),
            Step::Switch => {
                self.switch_high = !self.switch_high;
                let transition = if self.switch_high {
                    Edge::Rising
                } else {
                    Edge::Falling
                };
                Some(self.edge(self.wiring.switch, transition)?)
            }
            Step::Wait(duration) => {
                self.wait(duration);
                None
            }
        };
        self.controller.run_until_idle();
        Ok(outcome)
    }

    /// Run the main loop in real time for `duration`, advancing the timer
    /// model by the same amount
    pub fn wait(&mut self, duration: Duration) {
        let deadline = Instant::now() + duration;
        let mut last = Instant::now();

        while Instant::now() < deadline {
            std::thread::sleep(LOOP_SLICE);
            self.controller.run_until_idle();

            let now = Instant::now();
            self.advance(now - last);
            last = now;
        }
    }

    fn advance(&mut self, elapsed: Duration) {
        let ticks = elapsed.as_micros() as u64 * self.counter_hz / 1_000_000;
        let wave = self
            .controller
            .generator_mut()
            .timer_mut()
            .advance(ticks);
        self.waveform.extend(&wave);
    }

    /// Encoder detent: phase B falls while phase A sits at `phase_a`
    fn detent(&mut self, phase_a: Level) -> HalResult<EdgeOutcome> {
        self.phase_a.write(phase_a)?;
        let outcome = self.edge(self.wiring.phase_b, Edge::Falling);
        self.phase_a.write(Level::High)?;
        outcome
    }

    /// Raise the interrupt a `transition` on `pin` triggers, as the ISR would
    fn edge(&mut self, pin: u32, transition: Edge) -> HalResult<EdgeOutcome> {
        let Some(slot) = self.pins.trigger(pin, transition) else {
            return Ok(EdgeOutcome::Ignored);
        };
        let outcome = self.controller.sequencer().on_pin_interrupt(
            slot,
            self.ticks.now(),
            self.phase_a.read()?,
        );
        self.pins.clear_pending(slot)?;
        Ok(outcome)
    }

    pub fn state(&self) -> &RuntimeState {
        self.controller.state()
    }

    pub fn display(&self) -> &TextDisplay {
        self.controller.display()
    }

    pub fn leds(&self) -> &SimLeds {
        self.controller.leds()
    }

    pub fn timer_running(&self) -> bool {
        self.controller.generator().timer().is_running()
    }

    /// Waveform summary line
    pub fn pulse_summary(&self) -> Result<String> {
        let wave = &self.waveform;
        if wave.ticks() == 0 {
            return Err(anyhow!("no time simulated; add a wait:<ms> step"));
        }
        let seconds = wave.ticks() as f64 / self.counter_hz as f64;
        let pulses = wave.rising_edges(COIL_OUTPUT);
        let duty = wave.high_ticks(COIL_OUTPUT) as f64 * 100.0 / wave.ticks() as f64;
        Ok(format!(
            "{} pulses in {:.3} s ({:.3} Hz), duty {:.2} %",
            pulses,
            seconds,
            pulses as f64 / seconds,
            duty
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ignition_core::Rpm;
    use ignition_hal::{Led, StatusLeds};

    static BENCH_TICKS: TickSource = TickSource::new();

    fn settle() {
        for _ in 0..16 {
            BENCH_TICKS.on_tick();
        }
    }

    #[test]
    fn script_drives_controller() {
        let config = IgnitionConfig::default();
        let sequencer = Sequencer::from_config(&config);
        let mut bench = Bench::new(config, &sequencer, &BENCH_TICKS).unwrap();

        settle();
        let pressed = bench.apply(Step::Press).unwrap();
        assert!(matches!(pressed, Some(EdgeOutcome::Accepted(_))));
        assert!(bench.state().output_enabled);
        assert!(bench.timer_running());

        // same tick: inside the guard window
        assert_eq!(bench.apply(Step::Up).unwrap(), Some(EdgeOutcome::Debounced));

        settle();
        bench.apply(Step::Up).unwrap();
        settle();
        bench.apply(Step::Down).unwrap();
        settle();
        bench.apply(Step::Up).unwrap();
        assert_eq!(bench.state().commanded, Rpm(6910));
        assert!(bench.leds().is_on(Led::StatusB));

        bench.apply(Step::Wait(Duration::from_millis(30))).unwrap();
        let summary = bench.pulse_summary().unwrap();
        assert!(summary.contains("pulses"));
        assert!(bench.leds().is_on(Led::StatusA));
    }
}
