//! Pin configuration loader and validator
//!
//! Loads the board's pin assignment from TOML files in the configs/ directory.
//! Every section falls back to the reference board wiring when omitted.

use crate::gamepad::constants::LED_COUNT;
use crate::gamepad::types::{ButtonId, PinName};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete board pin assignment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PinConfig {
    #[serde(default)]
    pub joystick: JoystickConfig,

    #[serde(default)]
    pub buttons: ButtonConfig,

    #[serde(default)]
    pub leds: LedConfig,

    #[serde(default)]
    pub pots: PotConfig,

    #[serde(default)]
    pub speaker: SpeakerConfig,
}

/// Joystick analog channels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoystickConfig {
    #[serde(default = "default_horizontal")]
    pub horizontal: PinName,

    #[serde(default = "default_vertical")]
    pub vertical: PinName,

    /// Negate the horizontal axis so positive x is a push to the right.
    /// Depends on how the joystick potentiometer is powered.
    #[serde(default = "default_true")]
    pub invert_horizontal: bool,
}

impl Default for JoystickConfig {
    fn default() -> Self {
        Self {
            horizontal: default_horizontal(),
            vertical: default_vertical(),
            invert_horizontal: true,
        }
    }
}

/// Button input pins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonConfig {
    #[serde(default = "default_a")]
    pub a: PinName,
    #[serde(default = "default_b")]
    pub b: PinName,
    #[serde(default = "default_x")]
    pub x: PinName,
    #[serde(default = "default_y")]
    pub y: PinName,
    #[serde(default = "default_start")]
    pub start: PinName,
}

impl ButtonConfig {
    pub fn pin(&self, id: ButtonId) -> &PinName {
        match id {
            ButtonId::A => &self.a,
            ButtonId::B => &self.b,
            ButtonId::X => &self.x,
            ButtonId::Y => &self.y,
            ButtonId::Start => &self.start,
        }
    }
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            a: default_a(),
            b: default_b(),
            x: default_x(),
            y: default_y(),
            start: default_start(),
        }
    }
}

/// LED PWM pins, LED 1 first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedConfig {
    #[serde(default = "default_led_pins")]
    pub pins: Vec<PinName>,
}

impl Default for LedConfig {
    fn default() -> Self {
        Self { pins: default_led_pins() }
    }
}

/// Potentiometer analog channels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotConfig {
    #[serde(default = "default_pot")]
    pub pot1: PinName,
    #[serde(default = "default_pot")]
    pub pot2: PinName,
}

impl Default for PotConfig {
    fn default() -> Self {
        Self { pot1: default_pot(), pot2: default_pot() }
    }
}

/// Piezo speaker DAC output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerConfig {
    #[serde(default = "default_dac")]
    pub dac: PinName,
}

impl Default for SpeakerConfig {
    fn default() -> Self {
        Self { dac: default_dac() }
    }
}

fn default_true() -> bool { true }
fn default_horizontal() -> PinName { PinName::from("PTB11") }
fn default_vertical() -> PinName { PinName::from("PTB10") }
fn default_a() -> PinName { PinName::from("PTC7") }
fn default_b() -> PinName { PinName::from("PTC9") }
fn default_x() -> PinName { PinName::from("PTC5") }
fn default_y() -> PinName { PinName::from("PTC0") }
fn default_start() -> PinName { PinName::from("PTC8") }
fn default_pot() -> PinName { PinName::from("PTB2") }
fn default_dac() -> PinName { PinName::from("DAC0_OUT") }
fn default_led_pins() -> Vec<PinName> {
    ["PTA2", "PTC2", "PTC3", "PTA1", "PTC11", "PTC10"]
        .into_iter()
        .map(PinName::from)
        .collect()
}

impl PinConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        info!("Loading pin configuration from: {}", path_ref.display());

        let content = std::fs::read_to_string(path_ref)?;
        Self::from_toml_str(&content)
    }

    /// Load default configuration from configs/default.toml
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load("configs/default.toml")
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PinConfig = toml::from_str(content)?;

        debug!("  - Joystick: h={}, v={}", config.joystick.horizontal, config.joystick.vertical);
        debug!("  - LEDs: {}", config.leds.pins.len());

        config.validate()?;
        info!("✓ Pin configuration validated");

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.leds.pins.len() != LED_COUNT {
            return Err(ConfigError::Invalid(format!(
                "expected {} LED pins, found {}",
                LED_COUNT,
                self.leds.pins.len()
            )));
        }

        let named = [
            ("joystick.horizontal", &self.joystick.horizontal),
            ("joystick.vertical", &self.joystick.vertical),
            ("pots.pot1", &self.pots.pot1),
            ("pots.pot2", &self.pots.pot2),
            ("speaker.dac", &self.speaker.dac),
        ];
        let buttons = ButtonId::ALL.map(|id| (id, self.buttons.pin(id)));

        for (field, pin) in named {
            ensure_named(pin, field)?;
        }
        for (id, pin) in buttons {
            ensure_named(pin, &format!("buttons.{}", id))?;
        }
        for pin in &self.leds.pins {
            ensure_named(pin, "leds.pins")?;
        }

        if self.joystick.horizontal == self.joystick.vertical {
            return Err(ConfigError::Invalid(format!(
                "joystick axes share channel '{}'",
                self.joystick.horizontal
            )));
        }

        let mut seen = HashSet::new();
        for (id, pin) in buttons {
            if !seen.insert(pin) {
                return Err(ConfigError::Invalid(format!(
                    "button {} reuses pin '{}'",
                    id, pin
                )));
            }
        }

        if self.pots.pot1 == self.pots.pot2 {
            warn!("pot1 and pot2 both read channel '{}'", self.pots.pot1);
        }

        Ok(())
    }
}

fn ensure_named(pin: &PinName, field: &str) -> Result<(), ConfigError> {
    if pin.as_str().trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{} has an empty pin name", field)));
    }
    Ok(())
}
