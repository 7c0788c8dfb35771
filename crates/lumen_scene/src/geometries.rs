//! Composite of geometries.

use lumen_math::Ray;

use crate::{GeoPoint, Geometry, Intersectable};

/// A flat collection of geometries queried as one unit.
///
/// Intersection is the union of member intersections; `None` only when every
/// member reports `None`.
#[derive(Debug, Clone, Default)]
pub struct Geometries {
    members: Vec<Geometry>,
}

impl Geometries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a geometry, consuming and returning the collection.
    pub fn with(mut self, geometry: Geometry) -> Self {
        self.members.push(geometry);
        self
    }

    pub fn add(&mut self, geometry: Geometry) {
        self.members.push(geometry);
    }

    pub fn members(&self) -> &[Geometry] {
        &self.members
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }
}

impl FromIterator<Geometry> for Geometries {
    fn from_iter<I: IntoIterator<Item = Geometry>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl Intersectable for Geometries {
    fn intersect<'a>(&'a self, ray: &Ray, max_distance: f64) -> Option<Vec<GeoPoint<'a>>> {
        let mut hits: Option<Vec<GeoPoint<'a>>> = None;
        for member in &self.members {
            if let Some(points) = member.intersect(ray, max_distance) {
                hits.get_or_insert_with(Vec::new).extend(points);
            }
        }
        hits
    }
}
