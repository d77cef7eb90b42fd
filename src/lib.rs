//! gamepad-rs: driver for a handheld gamepad peripheral board
//!
//! This library drives a gamepad board with six PWM LEDs, five buttons, a
//! two-axis joystick, two potentiometers and a piezo speaker, on top of a
//! small hardware backend trait set.

pub mod backend;
pub mod config;
pub mod gamepad;

// Re-export commonly used items
pub use backend::{HardwareBackend, MockHardware};
pub use config::{ConfigError, PinConfig};
pub use gamepad::{ButtonId, Direction, Gamepad, GamepadError, Polar, Vector2D};
