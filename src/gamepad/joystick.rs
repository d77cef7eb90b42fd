//! Joystick geometry
//!
//! Turns the two raw analog axis readings into a calibrated cartesian
//! coordinate, maps it from the square the stick can physically reach onto
//! the unit circle, converts it to a compass-style polar reading and finally
//! buckets that into one of eight directions.
//!
//! The pipeline stages are exposed as free functions so they can be used
//! without hardware; `Joystick` ties them to a pair of analog channels.

use crate::backend::AnalogBackend;
use crate::config::JoystickConfig;
use crate::gamepad::constants::{JOYSTICK_TOLERANCE, RAD2DEG};
use crate::gamepad::types::{CalibrationOrigin, Direction, PinName, Polar, Vector2D};
use log::debug;

/// Centre and scale a pair of raw samples (0.0 to 1.0) against the
/// calibration origin, giving -1.0 to 1.0 on each axis.
///
/// With `invert_horizontal` set, the x axis is negated so that positive x is
/// a push to the right on the reference wiring.
pub fn centre_sample(horizontal: f32, vertical: f32, origin: &CalibrationOrigin, invert_horizontal: bool) -> Vector2D {
    let x = 2.0 * (horizontal - origin.x0);
    let y = 2.0 * (vertical - origin.y0);

    Vector2D {
        x: if invert_horizontal { -x } else { x },
        y,
    }
}

/// Map a coordinate from the square [-1, 1]² onto the unit disk.
///
/// `x' = x·√(1 − y²/2)`, `y' = y·√(1 − x²/2)`, exact for |x|, |y| ≤ √2.
/// Past √2 the square-root argument is floored at 0, so the opposite
/// component collapses to 0 instead of becoming NaN.
pub fn map_to_circle(coord: Vector2D) -> Vector2D {
    let Vector2D { x, y } = coord;

    Vector2D {
        x: x * (1.0 - y * y / 2.0).max(0.0).sqrt(),
        y: y * (1.0 - x * x / 2.0).max(0.0).sqrt(),
    }
}

/// Convert a mapped coordinate to a compass heading.
///
/// The axes are swapped so that 0° is North and angles grow clockwise.
/// Readings with a magnitude under the noise floor come back as
/// [`Polar::CENTRED`].
pub fn to_polar(coord: Vector2D) -> Polar {
    let x = coord.y;
    let y = coord.x;

    let mag = (x * x + y * y).sqrt();
    if mag < JOYSTICK_TOLERANCE {
        return Polar::CENTRED;
    }

    // atan2 gives -180..=180
    let mut angle = RAD2DEG * y.atan2(x);
    if angle < 0.0 {
        angle += 360.0;
    }
    // tiny negative angles round to exactly 360 after the shift
    if angle >= 360.0 {
        angle -= 360.0;
    }

    Polar { mag, angle }
}

/// Two-axis analog joystick
#[derive(Debug, Clone)]
pub struct Joystick {
    horizontal: PinName,
    vertical: PinName,
    invert_horizontal: bool,
    origin: CalibrationOrigin,
    calibrated: bool,
}

impl Joystick {
    /// Create an uncalibrated joystick bound to its channels
    pub fn new(config: &JoystickConfig) -> Self {
        Self {
            horizontal: config.horizontal.clone(),
            vertical: config.vertical.clone(),
            invert_horizontal: config.invert_horizontal,
            origin: CalibrationOrigin::default(),
            calibrated: false,
        }
    }

    /// Capture the rest position. The stick must be untouched when this runs.
    pub fn init_calibration<A: AnalogBackend + ?Sized>(&mut self, hw: &A) {
        self.origin = CalibrationOrigin {
            x0: hw.read_analog(&self.horizontal),
            y0: hw.read_analog(&self.vertical),
        };
        self.calibrated = true;
        debug!("Joystick calibrated: x0={:.3}, y0={:.3}", self.origin.x0, self.origin.y0);
    }

    pub fn origin(&self) -> CalibrationOrigin {
        self.origin
    }

    pub fn is_calibrated(&self) -> bool {
        self.calibrated
    }

    /// Raw cartesian coordinate, -1.0 to 1.0 on each axis
    pub fn coord<A: AnalogBackend + ?Sized>(&self, hw: &A) -> Vector2D {
        let horizontal = hw.read_analog(&self.horizontal);
        let vertical = hw.read_analog(&self.vertical);
        centre_sample(horizontal, vertical, &self.origin, self.invert_horizontal)
    }

    /// Coordinate mapped onto the unit circle
    pub fn mapped_coord<A: AnalogBackend + ?Sized>(&self, hw: &A) -> Vector2D {
        map_to_circle(self.coord(hw))
    }

    /// Magnitude and compass angle
    pub fn polar<A: AnalogBackend + ?Sized>(&self, hw: &A) -> Polar {
        to_polar(self.mapped_coord(hw))
    }

    /// Magnitude of joystick movement (0.0 to 1.0)
    pub fn magnitude<A: AnalogBackend + ?Sized>(&self, hw: &A) -> f32 {
        self.polar(hw).mag
    }

    /// Compass angle (0.0 to 360.0, 0.0 = North), -1.0 when centred
    pub fn angle<A: AnalogBackend + ?Sized>(&self, hw: &A) -> f32 {
        self.polar(hw).angle
    }

    /// Eight-way direction
    pub fn direction<A: AnalogBackend + ?Sized>(&self, hw: &A) -> Direction {
        Direction::from_angle(self.angle(hw))
    }
}
