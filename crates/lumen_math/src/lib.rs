//! Math primitives for the lumen ray tracer.
//!
//! Immutable value types (points, vectors, colors, rays) plus the numeric
//! helpers the geometry and shading code lean on. Vectors guarantee non-zero
//! magnitude at construction, so every operation that could collapse to zero
//! is fallible and returns [`MathError`].

mod color;
mod point;
mod ray;
mod vector;

pub use color::Color;
pub use point::Point;
pub use ray::Ray;
pub use vector::Vector;

use rand::RngCore;
use thiserror::Error;

/// Errors produced by the fallible vector constructors and operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    /// The operation would produce a vector with zero magnitude.
    #[error("vector has zero magnitude")]
    ZeroVector,
}

/// Tolerance for treating a floating-point value as zero.
pub const EPSILON: f64 = 1e-10;

/// Snap a value to exactly zero when it is within [`EPSILON`] of it.
///
/// Intersection and shading code compares sign agreement of dot products;
/// snapping keeps near-degenerate configurations on the "no contribution"
/// side instead of flickering between branches.
#[inline]
pub fn align_zero(value: f64) -> f64 {
    if value.abs() < EPSILON {
        0.0
    } else {
        value
    }
}

/// Check whether a value is zero within [`EPSILON`].
#[inline]
pub fn is_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// Draw a uniform f64 in [0, 1) from an object-safe RNG handle.
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    // 53 random mantissa bits give a uniform double in [0, 1).
    (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_align_zero() {
        assert_eq!(align_zero(1e-12), 0.0);
        assert_eq!(align_zero(-1e-12), 0.0);
        assert_eq!(align_zero(0.5), 0.5);
        assert_eq!(align_zero(-0.5), -0.5);
    }

    #[test]
    fn test_is_zero() {
        assert!(is_zero(0.0));
        assert!(is_zero(1e-11));
        assert!(!is_zero(1e-9));
    }

    #[test]
    fn test_gen_f64_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let x = gen_f64(&mut rng);
            assert!((0.0..1.0).contains(&x));
        }
    }
}
