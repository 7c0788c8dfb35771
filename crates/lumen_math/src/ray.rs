//! Ray: origin plus unit direction.

use rand::RngCore;

use crate::{gen_f64, is_zero, Point, Vector};

/// Offset applied along the surface normal when spawning a secondary ray,
/// so it cannot immediately re-hit the surface it starts on (shadow acne).
const DELTA: f64 = 0.1;

/// A ray with an origin and a unit-length direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Point,
    direction: Vector,
}

impl Ray {
    /// Create a new ray; the direction is normalized.
    pub fn new(origin: Point, direction: Vector) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Create a secondary ray starting on a surface.
    ///
    /// The origin is nudged by [`DELTA`] along `normal`, on the side the
    /// direction leaves through.
    pub fn with_offset(origin: Point, direction: Vector, normal: &Vector) -> Self {
        let delta = if normal.dot(&direction) > 0.0 { DELTA } else { -DELTA };
        // Scaling by +-DELTA cannot produce a zero vector.
        let origin = match normal.scale(delta) {
            Ok(nudge) => origin.add(&nudge),
            Err(_) => origin,
        };
        Self::new(origin, direction)
    }

    /// The ray's origin.
    #[inline]
    pub fn origin(&self) -> &Point {
        &self.origin
    }

    /// The ray's unit direction.
    #[inline]
    pub fn direction(&self) -> &Vector {
        &self.direction
    }

    /// The point at parametric distance `t` along the ray.
    pub fn point_at(&self, t: f64) -> Point {
        if is_zero(t) {
            return self.origin;
        }
        match self.direction.scale(t) {
            Ok(step) => self.origin.add(&step),
            Err(_) => self.origin,
        }
    }

    /// The candidate point closest to the ray's origin, if any.
    pub fn closest_point(&self, points: &[Point]) -> Option<Point> {
        let mut closest = None;
        let mut min_distance = f64::INFINITY;
        for point in points {
            let distance = point.distance(&self.origin);
            if distance < min_distance {
                min_distance = distance;
                closest = Some(*point);
            }
        }
        closest
    }

    /// Expand this ray into a regular-grid aperture beam.
    ///
    /// `floor(sqrt(count))^2` rays start on a square of half-extent `radius`
    /// centered at the ray's origin (spanned by `up`/`right`) and all aim at
    /// the shared focal point `focal_distance` along this ray. The original
    /// ray is always included first; with a zero radius it is the whole beam.
    pub fn grid_beam(
        &self,
        up: &Vector,
        right: &Vector,
        radius: f64,
        count: usize,
        focal_distance: f64,
    ) -> Vec<Ray> {
        let mut rays = vec![*self];
        if is_zero(radius) {
            return rays;
        }

        let focal_point = self.point_at(focal_distance);
        let side = (count as f64).sqrt().floor() as usize;

        for i in 0..side {
            for j in 0..side {
                let x_move = -radius + 2.0 * radius * (i as f64 + 0.5) / side as f64;
                let y_move = -radius + 2.0 * radius * (j as f64 + 0.5) / side as f64;
                if let Some(ray) = self.aperture_ray(up, right, x_move, y_move, &focal_point) {
                    rays.push(ray);
                }
            }
        }
        rays
    }

    /// Expand this ray into a jittered-random aperture beam.
    ///
    /// `count - 1` rays start at random points of a disc of the given radius
    /// centered at the ray's origin and aim at the shared focal point. The
    /// original ray is always included first.
    pub fn jittered_beam(
        &self,
        up: &Vector,
        right: &Vector,
        radius: f64,
        count: usize,
        focal_distance: f64,
        rng: &mut dyn RngCore,
    ) -> Vec<Ray> {
        let mut rays = vec![*self];
        if is_zero(radius) {
            return rays;
        }

        let focal_point = self.point_at(focal_distance);
        for _ in 1..count {
            let cos_theta = gen_f64(rng) * 2.0 - 1.0;
            let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
            let d = radius * (gen_f64(rng) * 2.0 - 1.0);
            let x_move = d * cos_theta;
            let y_move = d * sin_theta;
            if let Some(ray) = self.aperture_ray(up, right, x_move, y_move, &focal_point) {
                rays.push(ray);
            }
        }
        rays
    }

    /// Ray from an aperture sample point toward the focal point, or `None`
    /// when the sample degenerates onto the focal point itself.
    fn aperture_ray(
        &self,
        up: &Vector,
        right: &Vector,
        x_move: f64,
        y_move: f64,
        focal_point: &Point,
    ) -> Option<Ray> {
        let mut p0 = self.origin;
        if !is_zero(x_move) {
            p0 = p0.add(&right.scale(x_move).ok()?);
        }
        if !is_zero(y_move) {
            p0 = p0.add(&up.scale(y_move).ok()?);
        }
        let direction = focal_point.subtract(&p0).ok()?;
        Some(Ray::new(p0, direction))
    }
}

impl std::fmt::Display for Ray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.origin, self.direction)
    }
}
