//! Tests for IgnitionConfig builder and conversions.

use ignition_core::{IgnitionConfig, IgnitionError, Micros, MilliHertz, Polarity, Rpm};

#[test]
fn config_default() {
    let config = IgnitionConfig::default();

    assert_eq!(config.rpm_min, Rpm(2500));
    assert_eq!(config.rpm_max, Rpm(9000));
    assert_eq!(config.default_rpm, Rpm(6900));
    assert_eq!(config.coarse_step, 10);
    assert_eq!(config.fine_step, 1);
    assert_eq!(config.pulse_width, Micros(2000));
    assert_eq!(config.debounce_ticks, 15);
    assert_eq!(config.polarity, Polarity::ActiveHigh);
    assert!(config.idle_callback.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn config_builder() {
    fn idle() {}

    let config = IgnitionConfig::builder()
        .rpm_range(1000, 5000)
        .default_rpm(3000)
        .steps(50, 5)
        .pulse_width_us(1500)
        .debounce_ticks(20)
        .src_clock_hz(30_000_000)
        .polarity(Polarity::ActiveLow)
        .idle_callback(idle)
        .build();

    assert_eq!(config.rpm_min, Rpm(1000));
    assert_eq!(config.rpm_max, Rpm(5000));
    assert_eq!(config.default_rpm, Rpm(3000));
    assert_eq!(config.coarse_step, 50);
    assert_eq!(config.fine_step, 5);
    assert_eq!(config.pulse_width, Micros(1500));
    assert_eq!(config.debounce_ticks, 20);
    assert_eq!(config.src_clock.raw(), 30_000_000);
    assert!(config.idle_callback.is_some());
    assert!(config.validate().is_ok());
}

#[test]
fn validate_rejects_inconsistent_values() {
    let inverted = IgnitionConfig::builder().rpm_range(9000, 2500).build();
    assert_eq!(inverted.validate(), Err(IgnitionError::InvalidArgument));

    let outside = IgnitionConfig::builder().default_rpm(9500).build();
    assert_eq!(outside.validate(), Err(IgnitionError::InvalidArgument));

    let no_step = IgnitionConfig::builder().steps(0, 1).build();
    assert_eq!(no_step.validate(), Err(IgnitionError::InvalidArgument));

    let no_width = IgnitionConfig::builder().pulse_width_us(0).build();
    assert_eq!(no_width.validate(), Err(IgnitionError::InvalidArgument));
}

#[test]
fn frequency_for_default_rpm() {
    let config = IgnitionConfig::default();
    assert_eq!(config.frequency_for(Rpm(6900)), MilliHertz(229_997));
}

#[test]
fn frequency_for_clamps_out_of_range_rpm() {
    let config = IgnitionConfig::default();
    assert_eq!(config.frequency_for(Rpm(12_000)), Rpm(9000).to_millihertz());
    assert_eq!(config.frequency_for(Rpm(100)), Rpm(2500).to_millihertz());
    assert_eq!(Rpm(2500).to_millihertz(), MilliHertz(83_332));
    assert_eq!(Rpm(9000).to_millihertz(), MilliHertz(299_997));
}
