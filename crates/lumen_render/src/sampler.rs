//! Pixel sampling configuration and adaptive supersampling.

use std::collections::HashMap;

use lumen_math::{is_zero, Color, Point, Vector};

/// Anti-aliasing strategy for a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Antialiasing {
    /// One sample at the pixel center.
    Off,
    /// The center ray plus a `size` x `size` stratified-jitter grid over the
    /// pixel footprint, averaged.
    Grid { size: u32 },
    /// Corner-driven recursive subdivision, at most `depth` levels deep.
    Adaptive { depth: u32 },
}

/// How aperture sample points are placed for depth of field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AperturePattern {
    /// Regular square grid across the aperture.
    Grid,
    /// Random points across the aperture disc.
    Jittered,
}

/// Depth-of-field configuration.
///
/// `aperture` is expressed in pixel areas: the effective aperture radius is
/// `sqrt(aperture * pixel_width * pixel_height) / 2`, so blur scales with the
/// image resolution rather than with world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthOfField {
    pub focal_distance: f64,
    pub aperture: f64,
    pub rays: usize,
    pub pattern: AperturePattern,
}

/// Bit-exact key for the per-pixel sample memo.
///
/// Adaptive subdivision revisits the same view-plane points from sibling
/// quadrants; keying by the raw coordinate bits makes those lookups exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PointKey([u64; 3]);

impl From<&Point> for PointKey {
    fn from(point: &Point) -> Self {
        Self([point.x.to_bits(), point.y.to_bits(), point.z.to_bits()])
    }
}

struct Memo<'a> {
    cache: HashMap<PointKey, Color>,
    sample: &'a mut dyn FnMut(&Point) -> Color,
}

impl Memo<'_> {
    fn color_at(&mut self, point: &Point) -> Color {
        let key = PointKey::from(point);
        if let Some(color) = self.cache.get(&key) {
            return *color;
        }
        let color = (self.sample)(point);
        self.cache.insert(key, color);
        color
    }
}

/// Move a view-plane point by `dx` along `right` and `dy` along `up`.
pub(crate) fn offset(center: &Point, right: &Vector, up: &Vector, dx: f64, dy: f64) -> Point {
    let mut point = *center;
    if !is_zero(dx) {
        if let Ok(step) = right.scale(dx) {
            point = point.add(&step);
        }
    }
    if !is_zero(dy) {
        if let Ok(step) = up.scale(dy) {
            point = point.add(&step);
        }
    }
    point
}

/// Adaptively supersample one pixel.
///
/// Evaluates the four pixel corners; when they agree exactly the shared color
/// is the answer. Otherwise the pixel is split into quadrants, reusing edge
/// midpoints and the center across siblings through the memo, down to at most
/// `depth` levels; at the floor the mean of the four corners stands in. The
/// memo lives for this one pixel and is discarded afterwards.
pub(crate) fn adaptive_sample(
    center: &Point,
    half_width: f64,
    half_height: f64,
    right: &Vector,
    up: &Vector,
    depth: u32,
    sample: &mut dyn FnMut(&Point) -> Color,
) -> Color {
    let mut memo = Memo {
        cache: HashMap::new(),
        sample,
    };
    let lu = memo.color_at(&offset(center, right, up, -half_width, half_height));
    let ru = memo.color_at(&offset(center, right, up, half_width, half_height));
    let ld = memo.color_at(&offset(center, right, up, -half_width, -half_height));
    let rd = memo.color_at(&offset(center, right, up, half_width, -half_height));
    subdivide(
        &mut memo,
        center,
        half_width,
        half_height,
        right,
        up,
        depth,
        [lu, ru, ld, rd],
    )
}

/// Corners are ordered [left-up, right-up, left-down, right-down].
#[allow(clippy::too_many_arguments)]
fn subdivide(
    memo: &mut Memo<'_>,
    center: &Point,
    rx: f64,
    ry: f64,
    right: &Vector,
    up: &Vector,
    depth: u32,
    [lu, ru, ld, rd]: [Color; 4],
) -> Color {
    if lu == ru && lu == ld && lu == rd {
        return lu;
    }
    if depth == 0 {
        return (lu + ru + ld + rd).reduce(4);
    }

    let left = memo.color_at(&offset(center, right, up, -rx, 0.0));
    let right_c = memo.color_at(&offset(center, right, up, rx, 0.0));
    let top = memo.color_at(&offset(center, right, up, 0.0, ry));
    let bottom = memo.color_at(&offset(center, right, up, 0.0, -ry));
    let middle = memo.color_at(center);

    let hx = rx / 2.0;
    let hy = ry / 2.0;
    let q_lu = subdivide(
        memo,
        &offset(center, right, up, -hx, hy),
        hx,
        hy,
        right,
        up,
        depth - 1,
        [lu, top, left, middle],
    );
    let q_ru = subdivide(
        memo,
        &offset(center, right, up, hx, hy),
        hx,
        hy,
        right,
        up,
        depth - 1,
        [top, ru, middle, right_c],
    );
    let q_ld = subdivide(
        memo,
        &offset(center, right, up, -hx, -hy),
        hx,
        hy,
        right,
        up,
        depth - 1,
        [left, middle, ld, bottom],
    );
    let q_rd = subdivide(
        memo,
        &offset(center, right, up, hx, -hy),
        hx,
        hy,
        right,
        up,
        depth - 1,
        [middle, right_c, bottom, rd],
    );
    (q_lu + q_ru + q_ld + q_rd).reduce(4)
}
