//! Light sources.

use lumen_math::{Color, Point, Vector};

/// Uniform background illumination, applied once per shaded point.
///
/// Stores the premultiplied `intensity * attenuation` product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    intensity: Color,
}

impl AmbientLight {
    /// No ambient contribution.
    pub const NONE: AmbientLight = AmbientLight {
        intensity: Color::BLACK,
    };

    pub fn new(intensity: Color, attenuation: impl Into<Color>) -> Self {
        Self {
            intensity: intensity * attenuation.into(),
        }
    }

    pub fn intensity(&self) -> Color {
        self.intensity
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::NONE
    }
}

/// A light infinitely far away: constant direction and intensity everywhere.
#[derive(Debug, Clone)]
pub struct DirectionalLight {
    intensity: Color,
    direction: Vector,
}

impl DirectionalLight {
    pub fn new(intensity: Color, direction: Vector) -> Self {
        Self {
            intensity,
            direction: direction.normalize(),
        }
    }
}

/// An omnidirectional light at a position, attenuated by distance.
///
/// Attenuation divides the intensity by `kc + kl*d + kq*d^2`; the defaults
/// (`kc = 1`, `kl = kq = 0`) give no falloff.
#[derive(Debug, Clone)]
pub struct PointLight {
    intensity: Color,
    position: Point,
    kc: f64,
    kl: f64,
    kq: f64,
}

impl PointLight {
    pub fn new(intensity: Color, position: Point) -> Self {
        Self {
            intensity,
            position,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
        }
    }

    /// Constant attenuation factor.
    pub fn with_kc(mut self, kc: f64) -> Self {
        self.kc = kc;
        self
    }

    /// Linear attenuation factor.
    pub fn with_kl(mut self, kl: f64) -> Self {
        self.kl = kl;
        self
    }

    /// Quadratic attenuation factor.
    pub fn with_kq(mut self, kq: f64) -> Self {
        self.kq = kq;
        self
    }

    fn attenuated(&self, point: &Point) -> Color {
        let d = self.position.distance(point);
        self.intensity
            .scale(1.0 / (self.kc + self.kl * d + self.kq * d * d))
    }
}

/// A point light restricted to a cone: intensity scales with the cosine of
/// the angle off the beam axis, sharpened by the narrow-beam exponent.
#[derive(Debug, Clone)]
pub struct SpotLight {
    point: PointLight,
    direction: Vector,
    narrow_beam: f64,
}

impl SpotLight {
    pub fn new(intensity: Color, position: Point, direction: Vector) -> Self {
        Self {
            point: PointLight::new(intensity, position),
            direction: direction.normalize(),
            narrow_beam: 1.0,
        }
    }

    pub fn with_kc(mut self, kc: f64) -> Self {
        self.point = self.point.with_kc(kc);
        self
    }

    pub fn with_kl(mut self, kl: f64) -> Self {
        self.point = self.point.with_kl(kl);
        self
    }

    pub fn with_kq(mut self, kq: f64) -> Self {
        self.point = self.point.with_kq(kq);
        self
    }

    /// Beam-sharpening exponent; 1 is a plain cosine falloff.
    pub fn with_narrow_beam(mut self, narrow_beam: f64) -> Self {
        self.narrow_beam = narrow_beam;
        self
    }
}

/// The closed set of scene lights the tracer iterates over.
#[derive(Debug, Clone)]
pub enum LightSource {
    Directional(DirectionalLight),
    Point(PointLight),
    Spot(SpotLight),
}

impl LightSource {
    /// Intensity arriving at `point`, after distance attenuation and (for
    /// spots) the beam-angle falloff.
    pub fn intensity_at(&self, point: &Point) -> Color {
        match self {
            LightSource::Directional(light) => light.intensity,
            LightSource::Point(light) => light.attenuated(point),
            LightSource::Spot(light) => {
                let beam = match self.direction_at(point) {
                    Some(l) => light.direction.dot(&l).max(0.0),
                    None => 0.0,
                };
                light
                    .point
                    .attenuated(point)
                    .scale(beam.powf(light.narrow_beam))
            }
        }
    }

    /// Unit vector from the light toward `point`.
    ///
    /// `None` when the point coincides with a positional light's location,
    /// where no direction exists.
    pub fn direction_at(&self, point: &Point) -> Option<Vector> {
        match self {
            LightSource::Directional(light) => Some(light.direction),
            LightSource::Point(light) => {
                point.subtract(&light.position).ok().map(|v| v.normalize())
            }
            LightSource::Spot(light) => point
                .subtract(&light.point.position)
                .ok()
                .map(|v| v.normalize()),
        }
    }

    /// Distance from the light to `point`; infinite for directional lights,
    /// so shadow rays test the whole scene.
    pub fn distance(&self, point: &Point) -> f64 {
        match self {
            LightSource::Directional(_) => f64::INFINITY,
            LightSource::Point(light) => light.position.distance(point),
            LightSource::Spot(light) => light.point.position.distance(point),
        }
    }
}

impl From<DirectionalLight> for LightSource {
    fn from(light: DirectionalLight) -> Self {
        LightSource::Directional(light)
    }
}

impl From<PointLight> for LightSource {
    fn from(light: PointLight) -> Self {
        LightSource::Point(light)
    }
}

impl From<SpotLight> for LightSource {
    fn from(light: SpotLight) -> Self {
        LightSource::Spot(light)
    }
}
