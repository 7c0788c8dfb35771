//! Scene model for the lumen ray tracer.
//!
//! Geometric primitives (a closed set: plane, sphere, triangle, tube,
//! cylinder), the Phong material, light sources, and the [`Scene`] aggregate
//! the tracer reads from. Everything here is plain data built before a render
//! pass and shared read-only across worker threads.

mod cylinder;
mod geometries;
mod geometry;
mod light;
mod material;
mod plane;
mod scene;
mod sphere;
mod triangle;
mod tube;

pub use cylinder::Cylinder;
pub use geometries::Geometries;
pub use geometry::{closest_intersection, GeoPoint, Geometry, Intersectable, Shape};
pub use light::{AmbientLight, DirectionalLight, LightSource, PointLight, SpotLight};
pub use material::Material;
pub use plane::Plane;
pub use scene::Scene;
pub use sphere::Sphere;
pub use triangle::Triangle;
pub use tube::Tube;

use lumen_math::Point;
use thiserror::Error;

/// Errors raised by geometry queries.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    /// The surface normal is not defined at the queried point, e.g. the
    /// center of a cylinder cap. Callers must only query points actually on
    /// the surface.
    #[error("surface normal is undefined at {point}")]
    UndefinedNormal { point: Point },
}
