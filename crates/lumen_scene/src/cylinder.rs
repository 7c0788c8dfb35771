//! Finite cylinder with flat caps.

use lumen_math::{align_zero, is_zero, Point, Ray, Vector};

use crate::{GeometryError, Tube};

/// A finite cylinder: a [`Tube`] bounded by two flat caps at distance 0 and
/// `height` along the axis.
#[derive(Debug, Clone)]
pub struct Cylinder {
    tube: Tube,
    height: f64,
}

impl Cylinder {
    pub fn new(axis: Ray, radius: f64, height: f64) -> Self {
        Self {
            tube: Tube::new(axis, radius),
            height,
        }
    }

    pub fn axis(&self) -> &Ray {
        self.tube.axis()
    }

    pub fn radius(&self) -> f64 {
        self.tube.radius()
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Normal resolution over three regions: bottom cap, top cap, lateral
    /// surface.
    ///
    /// The exact center of either cap lies on the axis, where no single
    /// outward direction exists; that query is an error rather than an
    /// arbitrary answer.
    pub fn normal(&self, point: &Point) -> Result<Vector, GeometryError> {
        let va = self.axis().direction();

        let v = point
            .subtract(self.axis().origin())
            .map_err(|_| GeometryError::UndefinedNormal { point: *point })?;

        let t = va.dot(&v);
        if is_zero(t) {
            // In the bottom cap plane.
            return if v.length() <= self.radius() {
                Ok(*va)
            } else {
                Err(GeometryError::UndefinedNormal { point: *point })
            };
        }

        let foot = self.axis().point_at(t);
        match point.subtract(&foot) {
            // On the axis itself (top cap center).
            Err(_) => Err(GeometryError::UndefinedNormal { point: *point }),
            Ok(radial) => {
                if is_zero(radial.length() - self.radius()) {
                    // Lateral surface, including the rim seam.
                    Ok(radial.normalize())
                } else {
                    // Top cap interior.
                    Ok(*va)
                }
            }
        }
    }

    /// Lateral hits from the tube solve strictly between the caps, plus cap
    /// disc hits strictly inside the rim. Rim points belong to neither
    /// region, matching the triangle convention of excluding boundaries.
    pub fn intersections(&self, ray: &Ray, max_distance: f64) -> Option<Vec<Point>> {
        let va = self.axis().direction();
        let pa = self.axis().origin();

        let mut points = Vec::new();

        if let Some(lateral) = self.tube.intersections(ray, max_distance) {
            for point in lateral {
                let m = va.x() * (point.x - pa.x)
                    + va.y() * (point.y - pa.y)
                    + va.z() * (point.z - pa.z);
                if align_zero(m) > 0.0 && align_zero(m - self.height) < 0.0 {
                    points.push(point);
                }
            }
        }

        let nv = ray.direction().dot(va);
        if !is_zero(nv) {
            for cap_offset in [0.0, self.height] {
                let center = self.axis().point_at(cap_offset);
                let t = align_zero(
                    ((center.x - ray.origin().x) * va.x()
                        + (center.y - ray.origin().y) * va.y()
                        + (center.z - ray.origin().z) * va.z())
                        / nv,
                );
                if t > 0.0 && align_zero(t - max_distance) <= 0.0 {
                    let point = ray.point_at(t);
                    let r = self.radius();
                    if align_zero(point.distance_squared(&center) - r * r) < 0.0 {
                        points.push(point);
                    }
                }
            }
        }

        if points.is_empty() {
            None
        } else {
            Some(points)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cylinder() -> Cylinder {
        // Axis through (1, 0, 0) along +Z, radius 2, height 5.
        Cylinder::new(Ray::new(Point::new(1.0, 0.0, 0.0), Vector::Z), 2.0, 5.0)
    }

    #[test]
    fn test_normal_on_lateral_surface() {
        let n = cylinder().normal(&Point::new(1.0, 2.0, 2.0)).unwrap();
        assert_eq!(n, Vector::Y);
    }

    #[test]
    fn test_normal_on_top_cap() {
        let n = cylinder().normal(&Point::new(2.0, 0.0, 5.0)).unwrap();
        assert_eq!(n, Vector::Z);
    }

    #[test]
    fn test_normal_on_bottom_cap() {
        let n = cylinder().normal(&Point::new(1.0, 1.0, 0.0)).unwrap();
        assert_eq!(n, Vector::Z);
    }

    #[test]
    fn test_normal_at_cap_centers_fails() {
        assert!(matches!(
            cylinder().normal(&Point::new(1.0, 0.0, 5.0)),
            Err(GeometryError::UndefinedNormal { .. })
        ));
        assert!(matches!(
            cylinder().normal(&Point::new(1.0, 0.0, 0.0)),
            Err(GeometryError::UndefinedNormal { .. })
        ));
    }

    #[test]
    fn test_normal_on_bottom_rim() {
        let n = cylinder().normal(&Point::new(3.0, 0.0, 0.0)).unwrap();
        assert_eq!(n, Vector::Z);
    }

    #[test]
    fn test_normal_on_top_rim_is_lateral() {
        let n = cylinder().normal(&Point::new(3.0, 0.0, 5.0)).unwrap();
        assert_eq!(n, Vector::X);
    }

    #[test]
    fn test_lateral_intersections() {
        let ray = Ray::new(Point::new(-5.0, 0.0, 2.0), Vector::X);
        let hits = cylinder().intersections(&ray, f64::INFINITY).unwrap();
        assert_eq!(
            hits,
            vec![Point::new(-1.0, 0.0, 2.0), Point::new(3.0, 0.0, 2.0)]
        );
    }

    #[test]
    fn test_cap_intersections_along_axis() {
        let ray = Ray::new(Point::new(1.0, 0.0, -2.0), Vector::Z);
        let hits = cylinder().intersections(&ray, f64::INFINITY).unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits.contains(&Point::new(1.0, 0.0, 0.0)));
        assert!(hits.contains(&Point::new(1.0, 0.0, 5.0)));
    }

    #[test]
    fn test_lateral_miss_above_height() {
        let ray = Ray::new(Point::new(-5.0, 0.0, 7.0), Vector::X);
        assert_eq!(cylinder().intersections(&ray, f64::INFINITY), None);
    }

    #[test]
    fn test_max_distance_cutoff() {
        let ray = Ray::new(Point::new(-5.0, 0.0, 2.0), Vector::X);
        assert_eq!(cylinder().intersections(&ray, 2.0), None);
        assert_eq!(cylinder().intersections(&ray, 5.0).unwrap().len(), 1);
    }
}
