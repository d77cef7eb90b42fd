//! Test to verify the driver logs through the mock board correctly

use gamepad_rs::backend::MockHardware;
use gamepad_rs::{ButtonId, Gamepad, PinConfig};
use std::sync::Arc;

fn init_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

#[test]
fn test_default_config_file_loads() {
    init_logger();

    // Both pots share a channel on the reference board: logs a warning
    let config = PinConfig::load_default().unwrap();
    assert_eq!(config, PinConfig::default());
}

#[test]
fn test_full_session_logs() {
    init_logger();

    let hw = Arc::new(MockHardware::new());
    let config = PinConfig::default();
    let mut pad = Gamepad::new(Arc::clone(&hw), config.clone()).unwrap();

    // These should log at debug/info level (visible with RUST_LOG=debug)
    pad.init().unwrap();
    pad.led(3, 0.5).unwrap();
    hw.press(config.buttons.pin(ButtonId::Start));
    assert!(pad.pressed(ButtonId::Start));

    // Re-init warns and re-captures the centre
    pad.init().unwrap();
    assert!(pad.is_initialised());
}
