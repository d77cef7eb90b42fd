//! Gamepad board support
//!
//! This module provides the board driver:
//! - Joystick calibration, circle mapping and polar/direction readout
//! - Interrupt-latched button presses and live held state
//! - LED brightness, potentiometers and piezo tones

pub mod buttons;
pub mod constants;
pub mod controller;
pub mod joystick;
pub mod outputs;
pub mod types;

// Re-export commonly used items
pub use buttons::*;
pub use constants::*;
pub use controller::*;
pub use joystick::*;
pub use outputs::*;
pub use types::*;
