//! Gamepad board driver
//!
//! This module ties the joystick, buttons, LEDs, potentiometers and speaker
//! to one hardware backend and exposes the board-level API.

use crate::backend::{BackendError, HardwareBackend};
use crate::config::{ConfigError, PinConfig};
use crate::gamepad::buttons::ButtonBank;
use crate::gamepad::joystick::Joystick;
use crate::gamepad::outputs::{Leds, Speaker};
use crate::gamepad::types::{ButtonId, Direction, Polar, Vector2D};
use log::{info, warn};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GamepadError {
    #[error("Hardware error: {0}")]
    Backend(#[from] BackendError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid LED number: {0} (expected 1 to 6)")]
    InvalidLed(u8),

    #[error("Invalid tone: {0}")]
    InvalidTone(String),
}

/// Gamepad board
pub struct Gamepad<H: HardwareBackend> {
    hw: Arc<H>,
    config: PinConfig,
    joystick: Joystick,
    buttons: ButtonBank,
    leds: Leds,
    speaker: Speaker,
    initialised: bool,
}

impl<H: HardwareBackend> Gamepad<H> {
    /// Create a driver for a board wired as `config`. Call [`Gamepad::init`]
    /// before reading the joystick or buttons.
    pub fn new(hw: Arc<H>, config: PinConfig) -> Result<Self, GamepadError> {
        config.validate()?;

        Ok(Self {
            joystick: Joystick::new(&config.joystick),
            buttons: ButtonBank::new(&config.buttons),
            leds: Leds::new(&config.leds),
            speaker: Speaker::new(&config.speaker),
            hw,
            config,
            initialised: false,
        })
    }

    /// Create a driver for the reference board wiring
    pub fn with_default_pins(hw: Arc<H>) -> Result<Self, GamepadError> {
        Self::new(hw, PinConfig::default())
    }

    /// Initialise all peripherals and configure interrupts.
    ///
    /// The joystick must be at rest: its current position becomes the centre.
    pub fn init(&mut self) -> Result<(), GamepadError> {
        if self.initialised {
            warn!("Gamepad re-initialised; joystick centre will be re-captured");
        }

        self.leds_off()?;
        self.joystick.init_calibration(self.hw.as_ref());
        self.buttons.attach(self.hw.as_ref())?;
        self.speaker.silence(self.hw.as_ref());

        self.initialised = true;
        info!(
            "✓ Gamepad initialised (centre x0={:.3}, y0={:.3})",
            self.joystick.origin().x0,
            self.joystick.origin().y0
        );
        Ok(())
    }

    pub fn is_initialised(&self) -> bool {
        self.initialised
    }

    pub fn config(&self) -> &PinConfig {
        &self.config
    }

    pub fn hardware(&self) -> &Arc<H> {
        &self.hw
    }

    pub fn joystick(&self) -> &Joystick {
        &self.joystick
    }

    pub fn buttons(&self) -> &ButtonBank {
        &self.buttons
    }

    // ------------------------------------------------------------------
    // LEDs
    // ------------------------------------------------------------------

    /// Turn all LEDs on
    pub fn leds_on(&self) -> Result<(), GamepadError> {
        self.leds(1.0)
    }

    /// Turn all LEDs off
    pub fn leds_off(&self) -> Result<(), GamepadError> {
        self.leds(0.0)
    }

    /// Set all LEDs to a brightness in 0.0..=1.0
    pub fn leds(&self, brightness: f32) -> Result<(), GamepadError> {
        self.leds.set_all(self.hw.as_ref(), brightness)?;
        Ok(())
    }

    /// Set LED `n` (1 to 6) to a brightness in 0.0..=1.0
    pub fn led(&self, n: u8, brightness: f32) -> Result<(), GamepadError> {
        self.leds.set(self.hw.as_ref(), n, brightness)
    }

    // ------------------------------------------------------------------
    // Potentiometers and speaker
    // ------------------------------------------------------------------

    /// Potentiometer 1, 0.0 to 1.0
    pub fn read_pot1(&self) -> f32 {
        self.hw.read_analog(&self.config.pots.pot1)
    }

    /// Potentiometer 2, 0.0 to 1.0
    pub fn read_pot2(&self) -> f32 {
        self.hw.read_analog(&self.config.pots.pot2)
    }

    /// Play a tone on the piezo. Frequencies below 1 kHz are ignored.
    pub fn tone(&self, frequency_hz: f32, duration_s: f32) -> Result<(), GamepadError> {
        self.speaker.tone(&self.hw, frequency_hz, duration_s)
    }

    // ------------------------------------------------------------------
    // Joystick
    // ------------------------------------------------------------------

    /// Raw cartesian coordinate, -1.0 to 1.0 on each axis
    pub fn coord(&self) -> Vector2D {
        self.joystick.coord(self.hw.as_ref())
    }

    /// Cartesian coordinate mapped onto the unit circle
    pub fn mapped_coord(&self) -> Vector2D {
        self.joystick.mapped_coord(self.hw.as_ref())
    }

    /// Magnitude and compass angle
    pub fn polar(&self) -> Polar {
        self.joystick.polar(self.hw.as_ref())
    }

    /// Magnitude of joystick movement, 0.0 to 1.0
    pub fn magnitude(&self) -> f32 {
        self.joystick.magnitude(self.hw.as_ref())
    }

    /// Angle of joystick movement, 0.0 to 360.0 with 0.0 = N; -1.0 when centred
    pub fn angle(&self) -> f32 {
        self.joystick.angle(self.hw.as_ref())
    }

    /// Eight-way direction
    pub fn direction(&self) -> Direction {
        self.joystick.direction(self.hw.as_ref())
    }

    // ------------------------------------------------------------------
    // Buttons
    // ------------------------------------------------------------------

    /// True if the button has been pressed since the last call
    pub fn pressed(&self, button: ButtonId) -> bool {
        self.buttons.pressed(button)
    }

    /// True while the button is held down
    pub fn held(&self, button: ButtonId) -> bool {
        self.buttons.held(button, self.hw.as_ref())
    }

    /// Clear all pending presses. Useful between scenes.
    pub fn reset_buttons(&self) {
        self.buttons.reset_all();
    }
}
