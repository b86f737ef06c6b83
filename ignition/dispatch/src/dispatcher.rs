//! Cooperative main loop

use ignition_core::{Command, IgnitionConfig, IgnitionError, IgnitionResult};
use ignition_hal::{HalResult, Led, MatchTimer, OutputId, StatusDisplay, StatusLeds};
use ignition_pulse::{PulseChannel, PulseGenerator, PulseSpec};
use ignition_sequencer::Sequencer;

use crate::screen;
use crate::state::RuntimeState;

/// Services commands from the [`Sequencer`] one at a time.
///
/// Owns the pulse generator, the display and the LEDs; only the loop ever
/// touches them, so none of them needs to be reentrant.
pub struct Dispatcher<'a, T, D, L>
where
    T: MatchTimer,
    D: StatusDisplay,
    L: StatusLeds,
{
    config: IgnitionConfig,
    sequencer: &'a Sequencer,
    generator: PulseGenerator<T>,
    channel: PulseChannel,
    display: D,
    leds: L,
    state: RuntimeState,
}

impl<'a, T, D, L> Dispatcher<'a, T, D, L>
where
    T: MatchTimer,
    D: StatusDisplay,
    L: StatusLeds,
{
    /// Bring the controller up with the output disabled.
    ///
    /// Fails when the configuration is invalid, the timer cannot be set up
    /// or the initial screen cannot be drawn; the controller must not run
    /// in that case.
    pub fn start(
        config: IgnitionConfig,
        sequencer: &'a Sequencer,
        timer: T,
        output: OutputId,
        mut display: D,
        mut leds: L,
    ) -> IgnitionResult<Self> {
        config.validate()?;
        let state = RuntimeState::from_config(&config);

        leds.set_all();

        let mut generator = PulseGenerator::new(timer);
        let spec = PulseSpec::new(config.frequency_for(state.commanded), state.pulse_width);
        let channel = generator
            .setup(output, config.src_clock, spec, config.polarity)
            .map_err(|err| {
                log::error!("pulse generator setup failed: {}", err);
                err
            })?;

        screen::draw_all(&mut display, &state)?;
        leds.reset_all();

        log::info!(
            "controller ready: {} rpm, {}, pulse {}",
            state.commanded,
            spec.frequency,
            spec.pulse_width
        );

        Ok(Self {
            config,
            sequencer,
            generator,
            channel,
            display,
            leds,
            state,
        })
    }

    /// Service the top pending command, if any, and return it
    pub fn poll(&mut self) -> Option<Command> {
        let command = self.sequencer.take()?;
        log::debug!("servicing {}", command);

        match command {
            Command::None => {}
            Command::Increase => {
                let step = self.sequencer.step();
                self.state.commanded = self.state.commanded.step_up(step, self.config.rpm_max);
                self.show_commanded();
            }
            Command::Decrease => {
                let step = self.sequencer.step();
                self.state.commanded = self.state.commanded.step_down(step, self.config.rpm_min);
                self.show_commanded();
            }
            Command::ToggleOutput => self.toggle_output(),
            Command::ApplyFrequency => self.apply_frequency(),
            Command::ApplyPulseWidth => self.apply_pulse_width(),
        }

        Some(command)
    }

    /// Loop forever, calling the idle hook whenever nothing is pending
    pub fn run(&mut self) -> ! {
        loop {
            if self.poll().is_none() {
                if let Some(idle) = self.config.idle_callback {
                    idle();
                }
            }
        }
    }

    /// Service commands until the stack is empty; returns how many ran
    pub fn run_until_idle(&mut self) -> usize {
        let mut serviced = 0;
        while self.poll().is_some() {
            serviced += 1;
        }
        serviced
    }

    fn show_commanded(&mut self) {
        let matched = self.state.is_matched();
        self.leds.set(Led::StatusB, !matched);
        let drawn = screen::draw_rpm(&mut self.display, screen::SET_VALUE_PAGE, self.state.commanded)
            .and_then(|()| screen::draw_match(&mut self.display, matched));
        report(drawn);
    }

    fn toggle_output(&mut self) {
        self.leds.reset_all();

        self.state.output_enabled = !self.state.output_enabled;
        self.generator.enable(&self.channel, self.state.output_enabled);
        self.leds.set(Led::StatusA, self.state.output_enabled);
        log::info!(
            "pulse output {}",
            if self.state.output_enabled { "on" } else { "off" }
        );

        report(screen::draw_run_state(
            &mut self.display,
            self.state.output_enabled,
        ));

        // the push logs when the stack is full
        let _ = self.sequencer.push(Command::ApplyFrequency);
    }

    fn apply_frequency(&mut self) {
        let target = self.config.clamp_rpm(self.state.commanded);
        self.state.commanded = target;
        let freq = self.config.frequency_for(target);

        let applied = self.generator.update_frequency(&mut self.channel, freq);
        self.generator.enable(&self.channel, self.state.output_enabled);

        match applied {
            Ok(()) => {
                self.state.applied = target;
                log::info!("applied {} rpm ({})", target, freq);
            }
            Err(err) => {
                log::warn!("{} rpm not applied: {}", target, err);
            }
        }

        let matched = self.state.is_matched();
        self.leds.set(Led::StatusB, !matched);
        let drawn = screen::draw_rpm(&mut self.display, screen::RUN_VALUE_PAGE, self.state.applied)
            .and_then(|()| screen::draw_rpm(&mut self.display, screen::SET_VALUE_PAGE, self.state.commanded))
            .and_then(|()| screen::draw_match(&mut self.display, matched));
        report(drawn);
    }

    fn apply_pulse_width(&mut self) {
        let width = self.state.pulse_width;
        match self.generator.update_pulse_width(&mut self.channel, width) {
            Ok(()) => log::info!("pulse width {} applied", width),
            Err(IgnitionError::InvalidArgument) => {
                log::warn!("pulse width {} does not fit the current period", width)
            }
            Err(err) => log::warn!("pulse width {} not applied: {}", width, err),
        }
        self.generator.enable(&self.channel, self.state.output_enabled);
    }

    pub fn state(&self) -> &RuntimeState {
        &self.state
    }

    pub fn config(&self) -> &IgnitionConfig {
        &self.config
    }

    pub fn sequencer(&self) -> &'a Sequencer {
        self.sequencer
    }

    pub fn channel(&self) -> &PulseChannel {
        &self.channel
    }

    pub fn generator(&self) -> &PulseGenerator<T> {
        &self.generator
    }

    pub fn generator_mut(&mut self) -> &mut PulseGenerator<T> {
        &mut self.generator
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn leds(&self) -> &L {
        &self.leds
    }
}

/// Display failures do not stop the loop.
fn report(result: HalResult<()>) {
    if let Err(err) = result {
        log::warn!("status display: {}", err);
    }
}
