//! Phong material.

use lumen_math::Color;

/// Surface shading attributes for the Phong model.
///
/// Coefficients are per-channel [`Color`]s so a surface can, say, reflect red
/// more strongly than blue; a plain `f64` splats to gray via `Into<Color>`.
/// The default material absorbs everything: all coefficients zero, shininess
/// zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Material {
    kd: Color,
    ks: Color,
    kt: Color,
    kr: Color,
    shininess: i32,
}

impl Material {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diffuse coefficient.
    pub fn with_kd(mut self, kd: impl Into<Color>) -> Self {
        self.kd = kd.into();
        self
    }

    /// Specular coefficient.
    pub fn with_ks(mut self, ks: impl Into<Color>) -> Self {
        self.ks = ks.into();
        self
    }

    /// Transparency coefficient (0 opaque, 1 fully transparent).
    pub fn with_kt(mut self, kt: impl Into<Color>) -> Self {
        self.kt = kt.into();
        self
    }

    /// Reflection coefficient (0 matte, 1 perfect mirror).
    pub fn with_kr(mut self, kr: impl Into<Color>) -> Self {
        self.kr = kr.into();
        self
    }

    /// Specular exponent.
    pub fn with_shininess(mut self, shininess: i32) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn kd(&self) -> Color {
        self.kd
    }

    pub fn ks(&self) -> Color {
        self.ks
    }

    pub fn kt(&self) -> Color {
        self.kt
    }

    pub fn kr(&self) -> Color {
        self.kr
    }

    pub fn shininess(&self) -> i32 {
        self.shininess
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_inert() {
        let m = Material::default();
        assert_eq!(m.kd(), Color::BLACK);
        assert_eq!(m.ks(), Color::BLACK);
        assert_eq!(m.kt(), Color::BLACK);
        assert_eq!(m.kr(), Color::BLACK);
        assert_eq!(m.shininess(), 0);
    }

    #[test]
    fn test_scalar_coefficients_splat_to_gray() {
        let m = Material::new().with_kd(0.5).with_ks(0.25);
        assert_eq!(m.kd(), Color::new(0.5, 0.5, 0.5));
        assert_eq!(m.ks(), Color::new(0.25, 0.25, 0.25));
    }

    #[test]
    fn test_builder_chain() {
        let m = Material::new()
            .with_kd(Color::new(0.1, 0.2, 0.3))
            .with_kt(0.6)
            .with_kr(0.3)
            .with_shininess(30);
        assert_eq!(m.kd(), Color::new(0.1, 0.2, 0.3));
        assert_eq!(m.kt(), Color::new(0.6, 0.6, 0.6));
        assert_eq!(m.kr(), Color::new(0.3, 0.3, 0.3));
        assert_eq!(m.shininess(), 30);
    }
}
