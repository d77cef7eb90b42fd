//! Gamepad board constants
//!
//! This module contains the fixed numeric values the driver relies on:
//! - Joystick noise floor and angle conversion
//! - Direction sector boundaries
//! - Output limits for LEDs and the piezo speaker

// ============================================================================
// Joystick Constants
// ============================================================================

/// Magnitude below which the joystick is reported as centred
pub const JOYSTICK_TOLERANCE: f32 = 0.1;

/// Radians to degrees
pub const RAD2DEG: f32 = 180.0 / std::f32::consts::PI;

/// Angle reported when the joystick is centred (direction undefined)
pub const CENTRED_ANGLE: f32 = -1.0;

/// Width of one compass sector in degrees
pub const SECTOR_WIDTH: f32 = 45.0;

/// Upper bound of the first (North) sector; all other bounds follow in
/// `SECTOR_WIDTH` steps
pub const FIRST_SECTOR_BOUND: f32 = 22.5;

// ============================================================================
// Output Constants
// ============================================================================

/// Number of PWM LEDs on the board
pub const LED_COUNT: usize = 6;

/// Lowest tone the piezo is driven at (Hz). Lower frequencies can damage it.
pub const MIN_TONE_FREQUENCY_HZ: f32 = 1000.0;

/// DAC level for the high half of the square wave
pub const DAC_HIGH: f32 = 1.0;

/// DAC level for the low half of the square wave
pub const DAC_LOW: f32 = 0.0;
