//! Tone generation on the mock board's thread timers

use gamepad_rs::backend::MockHardware;
use gamepad_rs::{Gamepad, GamepadError, PinConfig};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn ready_pad() -> (Arc<MockHardware>, Gamepad<MockHardware>) {
    let hw = Arc::new(MockHardware::new());
    let mut pad = Gamepad::new(Arc::clone(&hw), PinConfig::default()).unwrap();
    pad.init().unwrap();
    (hw, pad)
}

#[test]
fn test_tone_flips_dac_then_stops() {
    let (hw, pad) = ready_pad();
    let writes_after_init = hw.dac_writes();

    pad.tone(1000.0, 0.1).unwrap();
    assert!(hw.ticker_active());
    assert_eq!(hw.ticker_period(), Some(Duration::from_secs_f32(0.0005)));

    thread::sleep(Duration::from_millis(50));
    assert!(hw.dac_writes() > writes_after_init);

    thread::sleep(Duration::from_millis(300));
    assert!(!hw.ticker_active());

    let settled = hw.dac_writes();
    thread::sleep(Duration::from_millis(50));
    assert_eq!(hw.dac_writes(), settled);
}

#[test]
fn test_new_tone_replaces_running_one() {
    let (hw, pad) = ready_pad();

    pad.tone(1000.0, 5.0).unwrap();
    pad.tone(4000.0, 0.05).unwrap();
    assert_eq!(hw.ticker_period(), Some(Duration::from_secs_f32(0.5 / 4000.0)));

    thread::sleep(Duration::from_millis(300));
    assert!(!hw.ticker_active());
}

#[test]
fn test_low_frequency_is_ignored() {
    let (hw, pad) = ready_pad();
    let writes = hw.dac_writes();

    pad.tone(999.0, 0.2).unwrap();
    assert!(!hw.ticker_active());
    assert_eq!(hw.dac_writes(), writes);
}

#[test]
fn test_invalid_duration_is_rejected() {
    let (hw, pad) = ready_pad();

    assert!(matches!(pad.tone(2000.0, -1.0), Err(GamepadError::InvalidTone(_))));
    assert!(matches!(pad.tone(2000.0, f32::NAN), Err(GamepadError::InvalidTone(_))));
    assert!(!hw.ticker_active());
}

#[test]
fn test_unrepresentable_duration_is_rejected() {
    let (hw, pad) = ready_pad();

    assert!(matches!(pad.tone(2000.0, 1e20), Err(GamepadError::InvalidTone(_))));
    assert!(!hw.ticker_active());

    // a valid tone still plays afterwards
    pad.tone(2000.0, 0.05).unwrap();
    assert!(hw.ticker_active());
}
