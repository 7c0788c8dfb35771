//! Non-zero 3D vector.

use crate::{is_zero, MathError};

/// A direction/displacement in 3D space with guaranteed non-zero magnitude.
///
/// The zero vector is unrepresentable: every constructor and every operation
/// whose result could collapse to zero (addition of opposites, scaling by
/// zero, cross product of parallel vectors) returns a [`MathError`] instead.
/// Operations that cannot fail (`dot`, `normalize`, negation, rotation) are
/// plain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector {
    x: f64,
    y: f64,
    z: f64,
}

impl Vector {
    /// X axis unit vector.
    pub const X: Vector = Vector { x: 1.0, y: 0.0, z: 0.0 };

    /// Y axis unit vector.
    pub const Y: Vector = Vector { x: 0.0, y: 1.0, z: 0.0 };

    /// Z axis unit vector.
    pub const Z: Vector = Vector { x: 0.0, y: 0.0, z: 1.0 };

    /// Create a new vector, rejecting the zero vector.
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self, MathError> {
        if x == 0.0 && y == 0.0 && z == 0.0 {
            return Err(MathError::ZeroVector);
        }
        Ok(Self { x, y, z })
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Vector addition; fails when the operands cancel out.
    pub fn add(&self, rhs: &Vector) -> Result<Vector, MathError> {
        Vector::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }

    /// Vector subtraction; fails when the operands are equal.
    pub fn subtract(&self, rhs: &Vector) -> Result<Vector, MathError> {
        Vector::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }

    /// Scale by a scalar; fails when the scalar is zero.
    pub fn scale(&self, rhs: f64) -> Result<Vector, MathError> {
        Vector::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }

    /// Dot product.
    #[inline]
    pub fn dot(&self, rhs: &Vector) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Cross product; fails for parallel or anti-parallel operands, whose
    /// cross product would be the zero vector.
    pub fn cross(&self, rhs: &Vector) -> Result<Vector, MathError> {
        Vector::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    /// Squared length.
    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.dot(self)
    }

    /// Length.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Unit-length vector with the same direction.
    ///
    /// Cannot fail: the non-zero invariant guarantees a positive length.
    pub fn normalize(&self) -> Vector {
        let len = self.length();
        Vector {
            x: self.x / len,
            y: self.y / len,
            z: self.z / len,
        }
    }

    /// Rotate about an arbitrary axis by an angle in radians (Rodrigues'
    /// rotation formula). The axis is normalized internally.
    ///
    /// Rotation preserves length, so the result is always a valid vector.
    pub fn rotate_about(&self, axis: &Vector, angle: f64) -> Vector {
        let a = axis.normalize();
        let (sin, cos) = angle.sin_cos();
        let dot = a.dot(self);

        let x = a.x * dot * (1.0 - cos) + self.x * cos + (-a.z * self.y + a.y * self.z) * sin;
        let y = a.y * dot * (1.0 - cos) + self.y * cos + (a.z * self.x - a.x * self.z) * sin;
        let z = a.z * dot * (1.0 - cos) + self.z * cos + (-a.y * self.x + a.x * self.y) * sin;

        Vector { x, y, z }
    }

    /// Whether this vector and `rhs` point in the same or opposite direction.
    pub fn is_parallel_to(&self, rhs: &Vector) -> bool {
        let cx = self.y * rhs.z - self.z * rhs.y;
        let cy = self.z * rhs.x - self.x * rhs.z;
        let cz = self.x * rhs.y - self.y * rhs.x;
        is_zero(cx) && is_zero(cy) && is_zero(cz)
    }
}

impl std::ops::Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl std::fmt::Display for Vector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}, {}, {}>", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vec(x: f64, y: f64, z: f64) -> Vector {
        Vector::new(x, y, z).unwrap()
    }

    #[test]
    fn test_zero_vector_rejected() {
        assert_eq!(Vector::new(0.0, 0.0, 0.0), Err(MathError::ZeroVector));
    }

    #[test]
    fn test_add_opposites_fails() {
        let v = vec(1.0, 2.0, 3.0);
        assert_eq!(v.add(&-v), Err(MathError::ZeroVector));
    }

    #[test]
    fn test_subtract_equal_fails() {
        let v = vec(1.0, 2.0, 3.0);
        assert_eq!(v.subtract(&v), Err(MathError::ZeroVector));
    }

    #[test]
    fn test_scale_by_zero_fails() {
        let v = vec(1.0, 2.0, 3.0);
        assert_eq!(v.scale(0.0), Err(MathError::ZeroVector));
        let doubled = v.scale(2.0).unwrap();
        assert_eq!((doubled.x(), doubled.y(), doubled.z()), (2.0, 4.0, 6.0));
    }

    #[test]
    fn test_dot() {
        let u = vec(1.0, 2.0, 3.0);
        let v = vec(-2.0, -4.0, -6.0);
        assert_eq!(u.dot(&v), -28.0);
        assert_eq!(u.dot(&vec(0.0, 3.0, -2.0)), 0.0);
    }

    #[test]
    fn test_cross() {
        let u = vec(1.0, 2.0, 3.0);
        let v = vec(0.0, 3.0, -2.0);
        let w = u.cross(&v).unwrap();
        // Orthogonal to both operands.
        assert!(w.dot(&u).abs() < 1e-10);
        assert!(w.dot(&v).abs() < 1e-10);
        // |u x v| = |u||v| for orthogonal operands.
        assert!((w.length() - u.length() * v.length()).abs() < 1e-10);
    }

    #[test]
    fn test_cross_parallel_fails() {
        let u = vec(1.0, 2.0, 3.0);
        assert_eq!(u.cross(&vec(2.0, 4.0, 6.0)), Err(MathError::ZeroVector));
        assert_eq!(u.cross(&vec(-1.0, -2.0, -3.0)), Err(MathError::ZeroVector));
    }

    #[test]
    fn test_length() {
        let v = vec(0.0, 3.0, 4.0);
        assert_eq!(v.length_squared(), 25.0);
        assert_eq!(v.length(), 5.0);
    }

    #[test]
    fn test_normalize_is_unit() {
        let v = vec(1.0, 2.0, 3.0);
        let n = v.normalize();
        assert!((n.length() - 1.0).abs() < 1e-12);
        // Same direction as the original.
        assert!(v.is_parallel_to(&n));
        assert!(v.dot(&n) > 0.0);
    }

    #[test]
    fn test_rotate_about_axis() {
        use std::f64::consts::FRAC_PI_2;
        let rotated = Vector::X.rotate_about(&Vector::Z, FRAC_PI_2);
        assert!((rotated.x() - 0.0).abs() < 1e-12);
        assert!((rotated.y() - 1.0).abs() < 1e-12);
        assert!((rotated.z() - 0.0).abs() < 1e-12);
        // Length is preserved.
        let v = vec(1.0, 2.0, 3.0);
        let r = v.rotate_about(&vec(0.5, -1.0, 2.0), 1.234);
        assert!((r.length() - v.length()).abs() < 1e-12);
    }
}
