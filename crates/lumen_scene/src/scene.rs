//! Scene aggregate.

use lumen_math::Color;

use crate::{AmbientLight, Geometries, Geometry, LightSource};

/// Everything the tracer reads: background color, ambient light, geometries
/// and light sources.
///
/// Built once with the `with_*` chain, then shared read-only across the
/// render workers. An empty scene is valid and traces to the background
/// everywhere.
#[derive(Debug, Clone)]
pub struct Scene {
    name: String,
    background: Color,
    ambient: AmbientLight,
    geometries: Geometries,
    lights: Vec<LightSource>,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background: Color::BLACK,
            ambient: AmbientLight::NONE,
            geometries: Geometries::new(),
            lights: Vec::new(),
        }
    }

    /// Color for rays that hit nothing.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_ambient(mut self, ambient: AmbientLight) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn with_geometries(mut self, geometries: Geometries) -> Self {
        self.geometries = geometries;
        self
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometries.add(geometry);
        self
    }

    pub fn with_light(mut self, light: impl Into<LightSource>) -> Self {
        self.lights.push(light.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn ambient(&self) -> &AmbientLight {
        &self.ambient
    }

    pub fn geometries(&self) -> &Geometries {
        &self.geometries
    }

    pub fn lights(&self) -> &[LightSource] {
        &self.lights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DirectionalLight, Sphere};
    use lumen_math::{Point, Vector};

    #[test]
    fn test_empty_scene_defaults() {
        let scene = Scene::new("empty");
        assert_eq!(scene.name(), "empty");
        assert_eq!(scene.background(), Color::BLACK);
        assert_eq!(scene.ambient().intensity(), Color::BLACK);
        assert!(scene.geometries().is_empty());
        assert!(scene.lights().is_empty());
    }

    #[test]
    fn test_builder_chain() {
        let scene = Scene::new("test")
            .with_background(Color::new(0.1, 0.1, 0.2))
            .with_ambient(AmbientLight::new(Color::WHITE, 0.15))
            .with_geometry(Geometry::new(Sphere::new(Point::ORIGIN, 1.0)))
            .with_light(DirectionalLight::new(Color::WHITE, -Vector::Z));

        assert_eq!(scene.background(), Color::new(0.1, 0.1, 0.2));
        assert_eq!(scene.geometries().len(), 1);
        assert_eq!(scene.lights().len(), 1);
    }
}
