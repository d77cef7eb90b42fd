//! Backend abstraction for the gamepad board peripherals
//!
//! This module provides a unified interface over the pins the driver touches:
//! analog inputs and the DAC, digital inputs with edge interrupts, PWM outputs
//! and the board timers. Real boards implement these traits over their HAL;
//! `MockHardware` implements them in memory for tests.

pub mod mock_hardware;
pub mod timer_thread;

pub use mock_hardware::MockHardware;
pub use timer_thread::{ThreadTicker, ThreadTimeout};

use crate::gamepad::types::PinName;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Handler invoked from an interrupt or timer context.
///
/// Handlers must be short and must never block.
pub type Callback = Arc<dyn Fn() + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Unknown pin: {0}")]
    UnknownPin(String),

    #[error("Backend operation failed: {0}")]
    Operation(String),

    #[error("Timer error: {0}")]
    Timer(String),
}

/// Analog inputs (joystick axes, potentiometers) and the speaker DAC
pub trait AnalogBackend {
    /// Read an analog channel, normalized to 0.0..=1.0
    fn read_analog(&self, channel: &PinName) -> f32;

    /// Write a DAC output level, normalized to 0.0..=1.0
    fn write_dac(&self, channel: &PinName, value: f32);

    /// Read back the last level written to a DAC output
    fn read_dac(&self, channel: &PinName) -> f32;
}

/// Digital inputs with falling-edge interrupts (buttons)
pub trait DigitalBackend {
    /// Enable the internal pull-up on an input pin
    fn set_pull_up(&self, pin: &PinName) -> Result<(), BackendError>;

    /// Current electrical level (true = high)
    fn read_level(&self, pin: &PinName) -> bool;

    /// Attach a handler to the high-to-low transition of a pin,
    /// replacing any handler already attached
    fn attach_falling_edge(&self, pin: &PinName, handler: Callback) -> Result<(), BackendError>;
}

/// PWM outputs (LEDs)
pub trait PwmBackend {
    /// Set the duty cycle of a PWM output (0.0..=1.0)
    fn set_duty(&self, pin: &PinName, duty: f32) -> Result<(), BackendError>;
}

/// Board timers: one periodic ticker and one one-shot timeout
pub trait TimerBackend {
    /// Run `callback` every `period`, replacing the running ticker
    fn attach_ticker(&self, period: Duration, callback: Callback) -> Result<(), BackendError>;

    /// Stop the running ticker, if any
    fn detach_ticker(&self);

    /// Run `callback` once after `delay`, replacing the pending timeout
    fn attach_timeout(&self, delay: Duration, callback: Callback) -> Result<(), BackendError>;
}

/// Everything the gamepad driver needs from a board
pub trait HardwareBackend:
    AnalogBackend + DigitalBackend + PwmBackend + TimerBackend + Send + Sync + 'static
{
}

impl<T> HardwareBackend for T where
    T: AnalogBackend + DigitalBackend + PwmBackend + TimerBackend + Send + Sync + 'static
{
}
