//! Unit arithmetic tests for ignition-core

use ignition_core::{Command, IgnitionError, MilliHertz, Rpm};
use ignition_hal::HalError;

#[test]
fn step_up_snaps_to_upper_bound() {
    let max = Rpm(9000);
    assert_eq!(Rpm(8995).step_up(10, max), Rpm(9000));
    assert_eq!(Rpm(8990).step_up(10, max), Rpm(9000));
    assert_eq!(Rpm(8980).step_up(10, max), Rpm(8990));
    assert_eq!(Rpm(9000).step_up(1, max), Rpm(9000));
}

#[test]
fn step_down_snaps_to_lower_bound() {
    let min = Rpm(2500);
    assert_eq!(Rpm(2505).step_down(10, min), Rpm(2500));
    assert_eq!(Rpm(2510).step_down(10, min), Rpm(2500));
    assert_eq!(Rpm(2520).step_down(10, min), Rpm(2510));
    assert_eq!(Rpm(2501).step_down(1, min), Rpm(2500));
}

#[test]
fn millihertz_conversion_truncates() {
    // 6900 * 33.333 = 229997.7
    assert_eq!(Rpm(6900).to_millihertz().raw(), 229_997);
    // 3 * 33.333 = 99.999
    assert_eq!(Rpm(3).to_millihertz().raw(), 99);
}

#[test]
fn millihertz_conversion_saturates() {
    // 200_000_000 * 33.333 overflows 32 bits
    assert_eq!(Rpm(200_000_000).to_millihertz(), MilliHertz(u32::MAX));
    assert_eq!(Rpm(u32::MAX).to_millihertz(), MilliHertz(u32::MAX));
    // still fits
    assert_eq!(Rpm(128_000_000).to_millihertz().raw(), 4_266_624_000);
}

#[test]
fn clamp_to_range() {
    assert_eq!(Rpm(1).clamp_to(Rpm(2500), Rpm(9000)), Rpm(2500));
    assert_eq!(Rpm(7000).clamp_to(Rpm(2500), Rpm(9000)), Rpm(7000));
    assert_eq!(Rpm(90_000).clamp_to(Rpm(2500), Rpm(9000)), Rpm(9000));
}

#[test]
fn command_default_is_none() {
    assert_eq!(Command::default(), Command::None);
    assert!(Command::None.is_none());
    assert!(!Command::ApplyFrequency.is_none());
}

#[test]
fn hal_errors_map_to_driver_errors() {
    assert_eq!(IgnitionError::from(HalError::NoFreeEvent), IgnitionError::ResourceExhausted);
    assert_eq!(
        IgnitionError::from(HalError::Busy),
        IgnitionError::Hal(HalError::Busy)
    );
}
