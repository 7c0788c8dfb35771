//! Point in 3D space.

use crate::{MathError, Vector};

/// A position in 3D space.
///
/// Equality is exact floating-point tuple equality, deliberately without an
/// epsilon: the adaptive supersampler memoizes colors by point identity and
/// two points are "the same sample" only when their coordinates match bit for
/// bit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    /// The coordinate-system origin.
    pub const ORIGIN: Point = Point::new(0.0, 0.0, 0.0);

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Translate the point by a vector.
    #[inline]
    pub fn add(&self, rhs: &Vector) -> Point {
        Point::new(self.x + rhs.x(), self.y + rhs.y(), self.z + rhs.z())
    }

    /// The vector from `rhs` to this point.
    ///
    /// Fails with [`MathError::ZeroVector`] when both points coincide.
    pub fn subtract(&self, rhs: &Point) -> Result<Vector, MathError> {
        Vector::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }

    /// Squared distance to another point.
    #[inline]
    pub fn distance_squared(&self, rhs: &Point) -> f64 {
        let dx = self.x - rhs.x;
        let dy = self.y - rhs.y;
        let dz = self.z - rhs.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, rhs: &Point) -> f64 {
        self.distance_squared(rhs).sqrt()
    }
}

impl std::ops::Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        Point::add(&self, &rhs)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_vector() {
        let p = Point::new(1.0, 2.0, 3.0);
        let v = Vector::new(-1.0, -2.0, -3.0).unwrap();
        assert_eq!(p + v, Point::ORIGIN);
    }

    #[test]
    fn test_subtract() {
        let p = Point::new(2.0, 3.0, 4.0);
        let q = Point::new(1.0, 1.0, 1.0);
        let v = p.subtract(&q).unwrap();
        assert_eq!((v.x(), v.y(), v.z()), (1.0, 2.0, 3.0));
    }

    #[test]
    fn test_subtract_same_point_fails() {
        let p = Point::new(1.0, 2.0, 3.0);
        assert_eq!(p.subtract(&p), Err(MathError::ZeroVector));
    }

    #[test]
    fn test_distance() {
        let p = Point::new(1.0, 2.0, 3.0);
        let q = Point::new(1.0, 2.0, 7.0);
        assert_eq!(p.distance_squared(&q), 16.0);
        assert_eq!(p.distance(&q), 4.0);
        assert_eq!(q.distance(&p), 4.0);
    }

    #[test]
    fn test_equality_is_exact() {
        let p = Point::new(0.1 + 0.2, 0.0, 0.0);
        let q = Point::new(0.3, 0.0, 0.0);
        // 0.1 + 0.2 != 0.3 in binary floating point; Point keeps it that way.
        assert_ne!(p, q);
    }
}
