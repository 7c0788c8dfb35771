//! Sphere.

use lumen_math::{align_zero, Point, Ray, Vector};

use crate::GeometryError;

/// A sphere given by center and radius.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Point,
    radius: f64,
    radius_squared: f64,
}

impl Sphere {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius,
            radius_squared: radius * radius,
        }
    }

    pub fn center(&self) -> &Point {
        &self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Outward normal: the direction from the center to the point.
    pub fn normal(&self, point: &Point) -> Result<Vector, GeometryError> {
        match point.subtract(&self.center) {
            Ok(v) => Ok(v.normalize()),
            Err(_) => Err(GeometryError::UndefinedNormal { point: *point }),
        }
    }

    /// Classic quadratic solve.
    ///
    /// Tangent rays report no intersection (strict discriminant check); a ray
    /// starting exactly at the center resolves to the single exit point at
    /// distance `radius`.
    pub fn intersections(&self, ray: &Ray, max_distance: f64) -> Option<Vec<Point>> {
        let u = match self.center.subtract(ray.origin()) {
            Ok(u) => u,
            // Degenerate: ray starts at the center, exit point is ahead by
            // one radius.
            Err(_) => return Some(vec![ray.point_at(self.radius)]),
        };

        let tm = ray.direction().dot(&u);
        let d_squared = u.length_squared() - tm * tm;
        let th_squared = self.radius_squared - d_squared;
        if align_zero(th_squared) <= 0.0 {
            return None;
        }

        let th = th_squared.sqrt();
        let t2 = align_zero(tm + th);
        if t2 <= 0.0 {
            // Both roots behind the origin.
            return None;
        }

        let t1 = align_zero(tm - th);
        if align_zero(t1 - max_distance) > 0.0 {
            // Both roots beyond the bound.
            return None;
        }

        if align_zero(t2 - max_distance) > 0.0 {
            return if t1 <= 0.0 {
                None
            } else {
                Some(vec![ray.point_at(t1)])
            };
        }

        if t1 <= 0.0 {
            Some(vec![ray.point_at(t2)])
        } else {
            Some(vec![ray.point_at(t1), ray.point_at(t2)])
        }
    }
}
