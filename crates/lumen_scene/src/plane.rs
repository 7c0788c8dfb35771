//! Infinite plane.

use lumen_math::{align_zero, is_zero, MathError, Point, Ray, Vector};

use crate::GeometryError;

/// An infinite plane given by a reference point and a unit normal.
#[derive(Debug, Clone)]
pub struct Plane {
    q0: Point,
    normal: Vector,
}

impl Plane {
    /// Create a plane from a reference point and a normal (normalized here).
    pub fn new(q0: Point, normal: Vector) -> Self {
        Self {
            q0,
            normal: normal.normalize(),
        }
    }

    /// Create a plane through three points.
    ///
    /// Fails when the points are collinear (the two edge vectors are
    /// parallel, so no normal exists).
    pub fn from_points(p1: Point, p2: Point, p3: Point) -> Result<Self, MathError> {
        let normal = p1.subtract(&p2)?.cross(&p1.subtract(&p3)?)?.normalize();
        Ok(Self { q0: p1, normal })
    }

    pub fn q0(&self) -> &Point {
        &self.q0
    }

    /// The plane normal, independent of the queried point.
    pub fn normal(&self, _point: &Point) -> Result<Vector, GeometryError> {
        Ok(self.normal)
    }

    /// Solve `t = ((q0 - origin) . n) / (dir . n)`.
    ///
    /// Near-parallel rays, rays lying in the plane, and a ray origin that
    /// coincides with the reference point all report no intersection.
    pub fn intersections(&self, ray: &Ray, max_distance: f64) -> Option<Vec<Point>> {
        let u = self.q0.subtract(ray.origin()).ok()?;

        let nv = ray.direction().dot(&self.normal);
        if is_zero(nv) {
            return None;
        }

        let t = align_zero(u.dot(&self.normal) / nv);
        if t > 0.0 && align_zero(max_distance - t) >= 0.0 {
            Some(vec![ray.point_at(t)])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vec(x: f64, y: f64, z: f64) -> Vector {
        Vector::new(x, y, z).unwrap()
    }

    // Plane z = 1 with reference point away from the test rays.
    fn plane() -> Plane {
        Plane::new(Point::new(5.0, 5.0, 1.0), Vector::Z)
    }

    #[test]
    fn test_from_points() {
        let p = Plane::from_points(
            Point::new(0.0, 0.0, 1.0),
            Point::new(1.0, 0.0, 1.0),
            Point::new(0.0, 1.0, 1.0),
        )
        .unwrap();
        let n = p.normal(&Point::ORIGIN).unwrap();
        assert!(n.is_parallel_to(&Vector::Z));
        assert!((n.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_collinear_points_fails() {
        let result = Plane::from_points(
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 1.0, 1.0),
            Point::new(2.0, 2.0, 2.0),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_hit() {
        let ray = Ray::new(Point::ORIGIN, Vector::Z);
        assert_eq!(
            plane().intersections(&ray, f64::INFINITY),
            Some(vec![Point::new(0.0, 0.0, 1.0)])
        );
    }

    #[test]
    fn test_parallel_ray_misses() {
        let ray = Ray::new(Point::ORIGIN, Vector::X);
        assert_eq!(plane().intersections(&ray, f64::INFINITY), None);
    }

    #[test]
    fn test_ray_in_plane_misses() {
        let ray = Ray::new(Point::new(0.0, 0.0, 1.0), Vector::X);
        assert_eq!(plane().intersections(&ray, f64::INFINITY), None);
    }

    #[test]
    fn test_plane_behind_origin_misses() {
        let ray = Ray::new(Point::new(0.0, 0.0, 2.0), Vector::Z);
        assert_eq!(plane().intersections(&ray, f64::INFINITY), None);
    }

    #[test]
    fn test_max_distance_cutoff() {
        let ray = Ray::new(Point::ORIGIN, Vector::Z);
        assert_eq!(plane().intersections(&ray, 0.5), None);
        assert!(plane().intersections(&ray, 1.0).is_some());
    }

    #[test]
    fn test_origin_at_reference_point_misses() {
        let p = plane();
        let ray = Ray::new(*p.q0(), vec(0.0, 1.0, -1.0));
        assert_eq!(p.intersections(&ray, f64::INFINITY), None);
    }
}
