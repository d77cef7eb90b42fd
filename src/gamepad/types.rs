//! Gamepad type definitions
//!
//! This module defines the basic data types used throughout the gamepad module,
//! including joystick coordinates, polar readings, directions and button ids.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::gamepad::constants::{CENTRED_ANGLE, FIRST_SECTOR_BOUND, SECTOR_WIDTH};

/// Name of a board pin or analog channel (e.g. "PTB11", "DAC0_OUT")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinName(pub String);

impl PinName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PinName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PinName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Joystick centre captured at calibration (normalized 0.0 to 1.0)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationOrigin {
    /// Horizontal axis reading at rest
    pub x0: f32,

    /// Vertical axis reading at rest
    pub y0: f32,
}

/// Cartesian joystick coordinate (nominally -1.0 to 1.0 on both axes)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2D {
    /// Horizontal axis (-1.0 = left, 1.0 = right)
    pub x: f32,

    /// Vertical axis (-1.0 = down, 1.0 = up)
    pub y: f32,
}

impl Vector2D {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Polar joystick reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Polar {
    /// Distance from centre (0.0 when centred)
    pub mag: f32,

    /// Compass heading in degrees, 0.0 = North increasing clockwise.
    /// `-1.0` when the joystick is centred.
    pub angle: f32,
}

impl Polar {
    /// Reading reported while the joystick is inside the noise floor
    pub const CENTRED: Polar = Polar { mag: 0.0, angle: CENTRED_ANGLE };

    /// True when this reading carries the centred sentinel
    pub fn is_centred(&self) -> bool {
        self.angle < 0.0
    }
}

impl Default for Polar {
    fn default() -> Self {
        Self::CENTRED
    }
}

/// Eight-way joystick direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Joystick centred
    #[default]
    Centre,
    /// Pushed North (0)
    N,
    /// Pushed North-East (45)
    NE,
    /// Pushed East (90)
    E,
    /// Pushed South-East (135)
    SE,
    /// Pushed South (180)
    S,
    /// Pushed South-West (225)
    SW,
    /// Pushed West (270)
    W,
    /// Pushed North-West (315)
    NW,
}

impl Direction {
    /// Compass points in clockwise order starting at North
    const CLOCKWISE: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// Bucket a compass angle into a direction.
    ///
    /// Sectors are 45° wide and centred on each compass point, so the bounds
    /// sit at odd multiples of 22.5°. Any negative angle is the centred
    /// sentinel. Angles in [337.5, 360) wrap back to North.
    pub fn from_angle(angle: f32) -> Self {
        if angle < 0.0 {
            return Direction::Centre;
        }

        let mut bound = FIRST_SECTOR_BOUND;
        for direction in Self::CLOCKWISE {
            if angle < bound {
                return direction;
            }
            bound += SECTOR_WIDTH;
        }

        Direction::N
    }
}

/// The five face/system buttons on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonId {
    A,
    B,
    X,
    Y,
    Start,
}

impl ButtonId {
    /// Every button, in table order
    pub const ALL: [ButtonId; 5] = [
        ButtonId::A,
        ButtonId::B,
        ButtonId::X,
        ButtonId::Y,
        ButtonId::Start,
    ];

    /// Position of this button in per-button tables
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ButtonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ButtonId::A => "A",
            ButtonId::B => "B",
            ButtonId::X => "X",
            ButtonId::Y => "Y",
            ButtonId::Start => "Start",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_sector_boundaries() {
        let cases = [
            (22.4, Direction::N),
            (22.5, Direction::NE),
            (67.4, Direction::NE),
            (67.5, Direction::E),
            (112.4, Direction::E),
            (112.5, Direction::SE),
            (157.4, Direction::SE),
            (157.5, Direction::S),
            (202.4, Direction::S),
            (202.5, Direction::SW),
            (247.4, Direction::SW),
            (247.5, Direction::W),
            (292.4, Direction::W),
            (292.5, Direction::NW),
            (337.4, Direction::NW),
            (337.5, Direction::N),
        ];

        for (angle, expected) in cases {
            assert_eq!(Direction::from_angle(angle), expected, "angle {}", angle);
        }
    }

    #[test]
    fn test_direction_centre_and_wrap() {
        assert_eq!(Direction::from_angle(-1.0), Direction::Centre);
        assert_eq!(Direction::from_angle(0.0), Direction::N);
        assert_eq!(Direction::from_angle(350.0), Direction::N);
        assert_eq!(Direction::from_angle(359.99), Direction::N);
    }

    #[test]
    fn test_polar_default_is_centred() {
        let polar = Polar::default();
        assert_eq!(polar.mag, 0.0);
        assert_eq!(polar.angle, -1.0);
        assert!(polar.is_centred());
    }

    #[test]
    fn test_button_indices_match_table_order() {
        for (i, button) in ButtonId::ALL.iter().enumerate() {
            assert_eq!(button.index(), i);
        }
    }
}
