//! Tube (infinite cylindrical surface).

use lumen_math::{align_zero, is_zero, Point, Ray, Vector};

use crate::GeometryError;

/// An infinite cylindrical surface around an axis ray.
#[derive(Debug, Clone)]
pub struct Tube {
    axis: Ray,
    radius: f64,
}

impl Tube {
    pub fn new(axis: Ray, radius: f64) -> Self {
        Self { axis, radius }
    }

    pub fn axis(&self) -> &Ray {
        &self.axis
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Radial direction from the axis to the point.
    ///
    /// A point coincident with the axis origin defaults to the axis
    /// direction; any other point on the axis has no radial direction and is
    /// an error.
    pub fn normal(&self, point: &Point) -> Result<Vector, GeometryError> {
        let va = self.axis.direction();
        let v = match point.subtract(self.axis.origin()) {
            Ok(v) => v,
            Err(_) => return Ok(*va),
        };
        let t = va.dot(&v);
        match point.subtract(&self.axis.point_at(t)) {
            Ok(radial) => Ok(radial.normalize()),
            Err(_) => Err(GeometryError::UndefinedNormal { point: *point }),
        }
    }

    /// Quadratic solve on the plane perpendicular to the axis.
    ///
    /// Same conventions as the sphere: tangency (zero discriminant) is
    /// non-intersecting, roots must satisfy `0 < t <= max_distance`. Rays
    /// parallel to the axis never intersect the surface.
    pub fn intersections(&self, ray: &Ray, max_distance: f64) -> Option<Vec<Point>> {
        let va = self.axis.direction();
        let pa = self.axis.origin();
        let d = ray.direction();
        let o = ray.origin();

        // Components of the ray direction and of (origin - axis origin),
        // both projected perpendicular to the axis.
        let dd = d.dot(va);
        let ux = d.x() - va.x() * dd;
        let uy = d.y() - va.y() * dd;
        let uz = d.z() - va.z() * dd;

        let dpx = o.x - pa.x;
        let dpy = o.y - pa.y;
        let dpz = o.z - pa.z;
        let dp_axis = dpx * va.x() + dpy * va.y() + dpz * va.z();
        let wx = dpx - va.x() * dp_axis;
        let wy = dpy - va.y() * dp_axis;
        let wz = dpz - va.z() * dp_axis;

        let a = ux * ux + uy * uy + uz * uz;
        if is_zero(a) {
            // Ray parallel to the axis.
            return None;
        }
        let b = 2.0 * (ux * wx + uy * wy + uz * wz);
        let c = wx * wx + wy * wy + wz * wz - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if align_zero(discriminant) <= 0.0 {
            return None;
        }

        let sq = discriminant.sqrt();
        let t1 = align_zero((-b - sq) / (2.0 * a));
        let t2 = align_zero((-b + sq) / (2.0 * a));

        let mut points = Vec::new();
        for t in [t1, t2] {
            if t > 0.0 && align_zero(t - max_distance) <= 0.0 {
                points.push(ray.point_at(t));
            }
        }
        if points.is_empty() {
            None
        } else {
            Some(points)
        }
    }
}
