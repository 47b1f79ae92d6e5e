//! Angles, polar vectors and screen-space points.
//!
//! Screen space has its origin at the top-left corner with Y growing
//! downwards, so every conversion out of polar form negates the sine term.

use std::fmt;

/// Absolute screen-space coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// A vector given as an integer length and an integer angle in degrees.
///
/// Angles are measured counter-clockwise from the positive X axis, the way
/// they read on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolarVector {
    pub length: u32,
    pub angle_degrees: u32,
}

impl PolarVector {
    pub const fn new(length: u32, angle_degrees: u32) -> Self {
        Self {
            length,
            angle_degrees,
        }
    }
}

impl fmt::Display for PolarVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}°", self.length, self.angle_degrees)
    }
}

/// Minimum rotation between two angles in degrees, wrap-around aware.
///
/// For angles in `[0, 360)` the result lies in `[0, 180]`.
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs();
    diff.min(360.0 - diff)
}

/// Resolve a polar vector to absolute screen coordinates around `origin`.
pub fn polar_to_cartesian(origin: Point, vector: PolarVector) -> Point {
    let radians = f64::from(vector.angle_degrees).to_radians();
    let length = f64::from(vector.length);

    let dx = length * radians.cos();
    // Screen Y grows downwards
    let dy = -length * radians.sin();

    Point::new(origin.x + dx, origin.y + dy)
}

/// Recover `(length, angle_degrees)` of a screen point relative to `origin`.
/// The angle is normalised into `[0, 360)`.
pub fn cartesian_to_polar(origin: Point, point: Point) -> (f64, f64) {
    let dx = point.x - origin.x;
    let dy = origin.y - point.y;
    let angle = dy.atan2(dx).to_degrees().rem_euclid(360.0);
    (dx.hypot(dy), angle)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;
    const ORIGIN: Point = Point::new(400.0, 400.0);

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < EPS, "{a} != {b}");
    }

    #[test]
    fn angular_distance_wraps_around() {
        assert_eq!(angular_distance(10.0, 350.0), 20.0);
        assert_eq!(angular_distance(350.0, 10.0), 20.0);
    }

    #[test]
    fn angular_distance_extremes() {
        assert_eq!(angular_distance(0.0, 180.0), 180.0);
        for a in 0..360 {
            assert_eq!(angular_distance(a as f64, a as f64), 0.0);
        }
    }

    #[test]
    fn angular_distance_is_symmetric_and_bounded() {
        for a in (0..360).step_by(7) {
            for b in (0..360).step_by(11) {
                let (a, b) = (a as f64, b as f64);
                let d = angular_distance(a, b);
                assert_eq!(d, angular_distance(b, a));
                assert!((0.0..=180.0).contains(&d));
            }
        }
    }

    #[test]
    fn zero_degrees_points_right() {
        let p = polar_to_cartesian(ORIGIN, PolarVector::new(100, 0));
        assert_close(p.x, 500.0);
        assert_close(p.y, 400.0);
    }

    #[test]
    fn ninety_degrees_points_up_on_screen() {
        let p = polar_to_cartesian(ORIGIN, PolarVector::new(100, 90));
        assert_close(p.x, 400.0);
        assert_close(p.y, 300.0);
    }

    #[test]
    fn cartesian_to_polar_recovers_inputs() {
        for angle in (0..360).step_by(13) {
            for length in [100, 187, 290] {
                let p = polar_to_cartesian(ORIGIN, PolarVector::new(length, angle));
                let (len, deg) = cartesian_to_polar(ORIGIN, p);
                assert!((len - length as f64).abs() < 1e-6);
                assert!(angular_distance(deg, angle as f64) < 1e-6, "{deg} vs {angle}");
                assert!((ORIGIN.distance(p) - length as f64).abs() < 1e-6);
            }
        }
    }
}
