//! Geometry wrapper, the shape sum type, and intersection records.

use lumen_math::{Color, Point, Ray, Vector};

use crate::{Cylinder, GeometryError, Material, Plane, Sphere, Triangle, Tube};

/// The closed set of geometric primitives.
///
/// A sum type instead of an open trait hierarchy: exactly five shapes exist
/// and the tracer dispatches over all of them in one place.
#[derive(Debug, Clone)]
pub enum Shape {
    Plane(Plane),
    Sphere(Sphere),
    Triangle(Triangle),
    Tube(Tube),
    Cylinder(Cylinder),
}

impl From<Plane> for Shape {
    fn from(shape: Plane) -> Self {
        Shape::Plane(shape)
    }
}

impl From<Sphere> for Shape {
    fn from(shape: Sphere) -> Self {
        Shape::Sphere(shape)
    }
}

impl From<Triangle> for Shape {
    fn from(shape: Triangle) -> Self {
        Shape::Triangle(shape)
    }
}

impl From<Tube> for Shape {
    fn from(shape: Tube) -> Self {
        Shape::Tube(shape)
    }
}

impl From<Cylinder> for Shape {
    fn from(shape: Cylinder) -> Self {
        Shape::Cylinder(shape)
    }
}

/// A shape together with its shading attributes.
///
/// Default attributes are an inert surface: no self-luminance, an all-zero
/// [`Material`].
#[derive(Debug, Clone)]
pub struct Geometry {
    shape: Shape,
    emission: Color,
    material: Material,
}

impl Geometry {
    /// Wrap a shape with default (inert) shading attributes.
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self {
            shape: shape.into(),
            emission: Color::BLACK,
            material: Material::default(),
        }
    }

    /// Set the self-luminance color.
    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission = emission;
        self
    }

    /// Set the material.
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn emission(&self) -> Color {
        self.emission
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Outward unit normal at a point on the surface.
    ///
    /// Behavior for points not on the surface is undefined; shading only
    /// queries points produced by intersection.
    pub fn normal(&self, point: &Point) -> Result<Vector, GeometryError> {
        match &self.shape {
            Shape::Plane(s) => s.normal(point),
            Shape::Sphere(s) => s.normal(point),
            Shape::Triangle(s) => s.normal(point),
            Shape::Tube(s) => s.normal(point),
            Shape::Cylinder(s) => s.normal(point),
        }
    }
}

/// A surface point paired with the geometry it lies on.
///
/// The geometry side is a shared borrow, never ownership: many `GeoPoint`s
/// may reference the same [`Geometry`]. Equality compares the geometry by
/// identity and the point exactly.
#[derive(Debug, Clone, Copy)]
pub struct GeoPoint<'a> {
    pub geometry: &'a Geometry,
    pub point: Point,
}

impl PartialEq for GeoPoint<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.geometry, other.geometry) && self.point == other.point
    }
}

/// Ray-intersection interface shared by [`Geometry`] and
/// [`Geometries`](crate::Geometries).
pub trait Intersectable {
    /// All intersection points with parametric distance strictly greater
    /// than zero and at most `max_distance`, or `None` when there are none.
    fn intersect<'a>(&'a self, ray: &Ray, max_distance: f64) -> Option<Vec<GeoPoint<'a>>>;

    /// Intersections with no distance bound.
    fn intersect_unbounded<'a>(&'a self, ray: &Ray) -> Option<Vec<GeoPoint<'a>>> {
        self.intersect(ray, f64::INFINITY)
    }
}

impl Intersectable for Geometry {
    fn intersect<'a>(&'a self, ray: &Ray, max_distance: f64) -> Option<Vec<GeoPoint<'a>>> {
        let points = match &self.shape {
            Shape::Plane(s) => s.intersections(ray, max_distance),
            Shape::Sphere(s) => s.intersections(ray, max_distance),
            Shape::Triangle(s) => s.intersections(ray, max_distance),
            Shape::Tube(s) => s.intersections(ray, max_distance),
            Shape::Cylinder(s) => s.intersections(ray, max_distance),
        }?;
        // Shapes report bare points; the wrapper binds each one to itself.
        Some(
            points
                .into_iter()
                .map(|point| GeoPoint { geometry: self, point })
                .collect(),
        )
    }
}

/// Of all candidate intersections, the one closest to the ray's origin.
pub fn closest_intersection<'a>(
    ray: &Ray,
    candidates: Vec<GeoPoint<'a>>,
) -> Option<GeoPoint<'a>> {
    let mut closest: Option<GeoPoint<'a>> = None;
    let mut min_distance = f64::INFINITY;
    for candidate in candidates {
        let distance = candidate.point.distance(ray.origin());
        if distance < min_distance {
            min_distance = distance;
            closest = Some(candidate);
        }
    }
    closest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_defaults() {
        let sphere = Geometry::new(Sphere::new(Point::ORIGIN, 1.0));
        assert_eq!(sphere.emission(), Color::BLACK);
        assert_eq!(*sphere.material(), Material::default());
    }

    #[test]
    fn test_intersections_bind_to_geometry() {
        let sphere = Geometry::new(Sphere::new(Point::new(0.0, 0.0, -5.0), 1.0));
        let ray = Ray::new(Point::ORIGIN, -Vector::Z);
        let hits = sphere.intersect_unbounded(&ray).unwrap();
        assert_eq!(hits.len(), 2);
        for hit in &hits {
            assert!(std::ptr::eq(hit.geometry, &sphere));
        }
    }

    #[test]
    fn test_closest_intersection() {
        let near = Geometry::new(Sphere::new(Point::new(0.0, 0.0, -3.0), 1.0));
        let far = Geometry::new(Sphere::new(Point::new(0.0, 0.0, -10.0), 1.0));
        let ray = Ray::new(Point::ORIGIN, -Vector::Z);

        let mut candidates = far.intersect_unbounded(&ray).unwrap();
        candidates.extend(near.intersect_unbounded(&ray).unwrap());

        let closest = closest_intersection(&ray, candidates).unwrap();
        assert!(std::ptr::eq(closest.geometry, &near));
        assert_eq!(closest.point, Point::new(0.0, 0.0, -2.0));
    }

    #[test]
    fn test_closest_intersection_empty() {
        let ray = Ray::new(Point::ORIGIN, Vector::Z);
        assert_eq!(closest_intersection(&ray, Vec::new()), None);
    }
}
