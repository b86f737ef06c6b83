use ignition_core::{Hertz, IgnitionError, Micros, MilliHertz, Rpm};

use crate::spec::{counter_clock, period_ticks, pulse_ticks, PulseSpec, PulseTicks};

const IRC: u32 = 12_000_000;

#[test]
fn default_speed_period_and_pulse() {
    let freq = Rpm(6900).to_millihertz();
    assert_eq!(freq, MilliHertz(229_997));
    assert_eq!(period_ticks(IRC, freq), Ok(52_173));
    assert_eq!(pulse_ticks(IRC, Micros(2000)), Ok(24_000));
}

#[test]
fn range_ends_convert() {
    assert_eq!(period_ticks(IRC, Rpm(9000).to_millihertz()), Ok(39_999));
    assert_eq!(period_ticks(IRC, Rpm(2500).to_millihertz()), Ok(144_001));
}

#[test]
fn zero_inputs_rejected() {
    assert_eq!(period_ticks(IRC, MilliHertz(0)), Err(IgnitionError::InvalidArgument));
    assert_eq!(pulse_ticks(IRC, Micros(0)), Err(IgnitionError::InvalidArgument));
    assert_eq!(counter_clock(Hertz(0), 0), Err(IgnitionError::InvalidArgument));
}

#[test]
fn period_underflow_and_overflow_rejected() {
    // one counter clock per two cycles
    assert_eq!(period_ticks(1, MilliHertz(2000)), Err(IgnitionError::InvalidArgument));
    // 12e9 ticks does not fit the counter
    assert_eq!(period_ticks(IRC, MilliHertz(1)), Err(IgnitionError::InvalidArgument));
}

#[test]
fn prescaler_divides_source() {
    assert_eq!(counter_clock(Hertz(IRC), 0), Ok(IRC));
    assert_eq!(counter_clock(Hertz(IRC), 1), Ok(6_000_000));
    assert_eq!(counter_clock(Hertz(IRC), u32::MAX), Err(IgnitionError::InvalidArgument));
}

#[test]
fn multiply_before_divide_keeps_small_ratios() {
    // 1 us at 12 MHz is 12 ticks, not 0
    assert_eq!(pulse_ticks(IRC, Micros(1)), Ok(12));
}

#[test]
fn ticks_require_pulse_inside_period() {
    assert!(PulseTicks::new(100, 99).is_ok());
    assert_eq!(PulseTicks::new(100, 100), Err(IgnitionError::InvalidArgument));
    assert_eq!(PulseTicks::new(100, 101), Err(IgnitionError::InvalidArgument));

    let too_wide = PulseSpec::new(MilliHertz(229_997), Micros(5000));
    assert_eq!(too_wide.ticks(IRC), Err(IgnitionError::InvalidArgument));
}
