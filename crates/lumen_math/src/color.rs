//! RGB color / per-channel coefficient triple.

/// An RGB triple in linear space.
///
/// Doubles as the per-channel attenuation coefficient carried through the
/// recursive shading computation, so componentwise multiplication and the
/// threshold comparisons live here. Channels are unbounded above; conversion
/// to 8-bit clamps.
///
/// Equality is exact: the adaptive supersampler only merges samples whose
/// traced colors match bit for bit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    /// No light.
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    /// Full-strength attenuation (no energy loss).
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    /// Create a new color.
    #[inline]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Uniform scalar scale of all channels.
    #[inline]
    pub fn scale(&self, rhs: f64) -> Color {
        Color::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }

    /// Mean divisor, used to average a beam of samples.
    #[inline]
    pub fn reduce(&self, count: usize) -> Color {
        self.scale(1.0 / count as f64)
    }

    /// True when every channel is strictly above `threshold`.
    #[inline]
    pub fn higher_than(&self, threshold: f64) -> bool {
        self.r > threshold && self.g > threshold && self.b > threshold
    }

    /// True when every channel is strictly below `threshold`.
    #[inline]
    pub fn lower_than(&self, threshold: f64) -> bool {
        self.r < threshold && self.g < threshold && self.b < threshold
    }

    /// Clamp to 8-bit RGB for the image sink.
    pub fn to_rgb8(&self) -> [u8; 3] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }
}

impl From<f64> for Color {
    /// Gray splat: one scalar coefficient applied to all three channels.
    fn from(value: f64) -> Self {
        Color::new(value, value, value)
    }
}

impl std::ops::Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl std::ops::Mul for Color {
    type Output = Color;

    /// Componentwise product (attenuation).
    fn mul(self, rhs: Color) -> Color {
        Color::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}
