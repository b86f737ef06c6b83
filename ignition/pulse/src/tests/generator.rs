use ignition_core::{Hertz, IgnitionError, Micros, MilliHertz, Polarity, Rpm};
use ignition_hal::{HalError, Level, MatchTimer, OutputId};
use ignition_sim::SimTimer;

use crate::generator::{PulseChannel, PulseGenerator};
use crate::spec::PulseSpec;

const OUT: OutputId = OutputId(0);
const IRC: Hertz = Hertz(12_000_000);

fn default_spec() -> PulseSpec {
    PulseSpec::new(Rpm(6900).to_millihertz(), Micros(2000))
}

fn armed() -> (PulseGenerator<SimTimer>, PulseChannel) {
    let mut generator = PulseGenerator::new(SimTimer::new());
    let channel = generator
        .setup(OUT, IRC, default_spec(), Polarity::ActiveHigh)
        .unwrap();
    (generator, channel)
}

#[test]
fn setup_programs_both_match_values() {
    let (generator, channel) = armed();

    let ticks = generator.programmed_ticks(&channel).unwrap();
    assert_eq!(ticks.period(), 52_173);
    assert_eq!(ticks.pulse(), 24_000);

    let timer = generator.timer();
    assert!(timer.is_unified());
    assert!(!timer.is_running());
    assert_eq!(timer.events_in_use(), 2);
    assert_eq!(timer.output_level(OUT), Level::Low);
    assert_eq!(timer.read_reload(channel.period_slot()), Ok(52_173));
    assert_eq!(channel.spec(), default_spec());
}

#[test]
fn setup_reports_exhausted_events() {
    let mut generator = PulseGenerator::new(SimTimer::new().with_event_capacity(3));
    generator
        .setup(OUT, IRC, default_spec(), Polarity::ActiveHigh)
        .unwrap();

    let second = generator.setup(OutputId(1), IRC, default_spec(), Polarity::ActiveHigh);
    assert_eq!(second, Err(IgnitionError::ResourceExhausted));
    assert_eq!(generator.timer().events_in_use(), 2);
}

#[test]
fn setup_rejects_invalid_spec_without_scheduling() {
    let mut generator = PulseGenerator::new(SimTimer::new());

    let wide = PulseSpec::new(MilliHertz(229_997), Micros(5000));
    assert_eq!(
        generator.setup(OUT, IRC, wide, Polarity::ActiveHigh),
        Err(IgnitionError::InvalidArgument)
    );

    let silent = PulseSpec::new(MilliHertz(0), Micros(2000));
    assert_eq!(
        generator.setup(OUT, IRC, silent, Polarity::ActiveHigh),
        Err(IgnitionError::InvalidArgument)
    );

    assert_eq!(
        generator.setup(OUT, Hertz(0), default_spec(), Polarity::ActiveHigh),
        Err(IgnitionError::InvalidArgument)
    );
    assert_eq!(generator.timer().events_in_use(), 0);
}

#[test]
fn setup_refused_on_running_counter() {
    let mut timer = SimTimer::new();
    timer.start();
    let mut generator = PulseGenerator::new(timer);

    assert_eq!(
        generator.setup(OUT, IRC, default_spec(), Polarity::ActiveHigh),
        Err(IgnitionError::Hal(HalError::Busy))
    );
}

#[test]
fn pulse_width_uses_prescaled_clock() {
    let mut generator = PulseGenerator::new(SimTimer::new().with_prescaler(1));
    let channel = generator
        .setup(OUT, IRC, default_spec(), Polarity::ActiveHigh)
        .unwrap();

    let ticks = generator.programmed_ticks(&channel).unwrap();
    assert_eq!(ticks.pulse(), 12_000);
    assert_eq!(ticks.period(), 26_086);
}

#[test]
fn update_frequency_writes_live_and_reload() {
    let (mut generator, mut channel) = armed();

    generator
        .update_frequency(&mut channel, Rpm(9000).to_millihertz())
        .unwrap();

    let timer = generator.timer();
    assert_eq!(timer.read_match(channel.period_slot()), Ok(39_999));
    assert_eq!(timer.read_reload(channel.period_slot()), Ok(39_999));
    assert_eq!(timer.read_match(channel.pulse_slot()), Ok(24_000));
    assert_eq!(channel.spec().frequency, MilliHertz(299_997));
}

#[test]
fn update_frequency_rejects_period_not_above_pulse() {
    let (mut generator, mut channel) = armed();
    generator.enable(&channel, true);

    // 600 Hz gives a 19 999 tick period, below the 24 000 tick pulse
    let result = generator.update_frequency(&mut channel, MilliHertz(600_000));
    assert_eq!(result, Err(IgnitionError::InvalidArgument));

    let timer = generator.timer();
    assert_eq!(timer.read_match(channel.period_slot()), Ok(52_173));
    assert_eq!(timer.read_reload(channel.period_slot()), Ok(52_173));
    assert!(timer.is_running());
    assert_eq!(channel.spec(), default_spec());
}

#[test]
fn update_pulse_width_rejects_equal_and_longer() {
    let mut generator = PulseGenerator::new(SimTimer::new());
    // 1 MHz counter at 1 kHz: period 999 ticks
    let mut channel = generator
        .setup(
            OUT,
            Hertz(1_000_000),
            PulseSpec::new(MilliHertz(1_000_000), Micros(100)),
            Polarity::ActiveHigh,
        )
        .unwrap();

    assert_eq!(
        generator.update_pulse_width(&mut channel, Micros(999)),
        Err(IgnitionError::InvalidArgument)
    );
    assert_eq!(
        generator.update_pulse_width(&mut channel, Micros(5000)),
        Err(IgnitionError::InvalidArgument)
    );
    assert_eq!(generator.timer().read_match(channel.pulse_slot()), Ok(100));
    assert_eq!(channel.spec().pulse_width, Micros(100));

    generator
        .update_pulse_width(&mut channel, Micros(998))
        .unwrap();
    assert_eq!(generator.timer().read_match(channel.pulse_slot()), Ok(998));
    assert_eq!(generator.timer().read_reload(channel.pulse_slot()), Ok(998));
}

#[test]
fn update_never_leaves_output_latched() {
    let (mut generator, mut channel) = armed();
    generator.enable(&channel, true);

    // run past the first rollover so the pulse is active
    generator.timer_mut().advance(52_174 + 10);
    assert_eq!(generator.timer().output_level(OUT), Level::High);

    generator
        .update_frequency(&mut channel, Rpm(8000).to_millihertz())
        .unwrap();

    let timer = generator.timer();
    assert_eq!(timer.output_level(OUT), Level::Low);
    assert_eq!(timer.counter(), 0);
    assert!(timer.is_running());
}

#[test]
fn running_channel_pulses_once_per_period() {
    let (mut generator, channel) = armed();
    generator.enable(&channel, true);

    let cycle = 52_174;
    generator.timer_mut().advance(cycle);
    let wave = generator.timer_mut().advance(cycle * 5);

    assert_eq!(wave.rising_edges(OUT), 5);
    assert_eq!(wave.falling_edges(OUT), 5);
    assert_eq!(wave.high_ticks(OUT), 5 * (24_000 + 1));
}

#[test]
fn disable_stops_and_forces_inactive() {
    let mut generator = PulseGenerator::new(SimTimer::new());
    let channel = generator
        .setup(OUT, IRC, default_spec(), Polarity::ActiveLow)
        .unwrap();
    assert_eq!(generator.timer().output_level(OUT), Level::High);

    generator.enable(&channel, true);
    generator.timer_mut().advance(52_174 + 10);
    assert_eq!(generator.timer().output_level(OUT), Level::Low);

    generator.enable(&channel, false);
    assert!(!generator.timer().is_running());
    assert_eq!(generator.timer().output_level(OUT), Level::High);

    let ticks = generator.programmed_ticks(&channel).unwrap();
    assert_eq!(ticks.period(), 52_173);
    assert_eq!(ticks.pulse(), 24_000);
}

#[test]
fn read_back_matches_generator_view() {
    let (generator, channel) = armed();
    assert_eq!(
        channel.read_back(generator.timer()),
        generator.programmed_ticks(&channel)
    );
}

#[test]
fn every_speed_in_range_keeps_pulse_inside_period() {
    let (mut updated, mut channel) = armed();

    for rpm in 2500..=9000 {
        let spec = PulseSpec::new(Rpm(rpm).to_millihertz(), Micros(2000));

        let mut fresh = PulseGenerator::new(SimTimer::new());
        let fresh_channel = fresh.setup(OUT, IRC, spec, Polarity::ActiveHigh).unwrap();
        let ticks = fresh.programmed_ticks(&fresh_channel).unwrap();
        assert!(ticks.pulse() < ticks.period(), "setup at {} rpm", rpm);

        updated.update_frequency(&mut channel, spec.frequency).unwrap();
        let ticks = updated.programmed_ticks(&channel).unwrap();
        assert!(ticks.pulse() < ticks.period(), "update to {} rpm", rpm);
        assert_eq!(ticks.pulse(), 24_000);
    }
}
