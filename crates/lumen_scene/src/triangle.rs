//! Triangle.

use lumen_math::{align_zero, MathError, Point, Ray, Vector};

use crate::{GeometryError, Plane};

/// A triangle given by three vertices, with its supporting plane
/// precomputed.
#[derive(Debug, Clone)]
pub struct Triangle {
    vertices: [Point; 3],
    plane: Plane,
}

impl Triangle {
    /// Create a triangle; fails when the vertices are collinear.
    pub fn new(p1: Point, p2: Point, p3: Point) -> Result<Self, MathError> {
        Ok(Self {
            vertices: [p1, p2, p3],
            plane: Plane::from_points(p1, p2, p3)?,
        })
    }

    pub fn vertices(&self) -> &[Point; 3] {
        &self.vertices
    }

    /// The supporting plane's normal.
    pub fn normal(&self, point: &Point) -> Result<Vector, GeometryError> {
        self.plane.normal(point)
    }

    /// Solve the supporting plane, then run the sign-agreement test: the ray
    /// direction must see the three vertex-edge normals with one consistent
    /// sign. A zero dot product or mixed signs excludes the point, so edges
    /// and vertices are never reported as intersections.
    pub fn intersections(&self, ray: &Ray, max_distance: f64) -> Option<Vec<Point>> {
        let on_plane = self.plane.intersections(ray, max_distance)?;

        let p0 = ray.origin();
        let v = ray.direction();

        let v1 = self.vertices[0].subtract(p0).ok()?;
        let v2 = self.vertices[1].subtract(p0).ok()?;
        let n1 = v1.cross(&v2).ok()?.normalize();
        let s1 = align_zero(v.dot(&n1));
        if s1 == 0.0 {
            return None;
        }

        let v3 = self.vertices[2].subtract(p0).ok()?;
        let n2 = v2.cross(&v3).ok()?.normalize();
        let s2 = v.dot(&n2);
        if s1 * s2 <= 0.0 {
            return None;
        }

        let n3 = v3.cross(&v1).ok()?.normalize();
        let s3 = v.dot(&n3);
        if s1 * s3 <= 0.0 {
            return None;
        }

        Some(on_plane)
    }
}
