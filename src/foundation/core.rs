use crate::foundation::error::{FramesmithError, FramesmithResult};

pub use kurbo::{Affine, BezPath, Ellipse, Point, Rect, Vec2};

/// Raster surface dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas. Both sides must be in `1..=u16::MAX` (CPU raster limit).
    pub fn new(width: u32, height: u32) -> FramesmithResult<Self> {
        if width == 0 || height == 0 {
            return Err(FramesmithError::validation("canvas width/height must be > 0"));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(FramesmithError::validation("canvas width/height exceed u16"));
        }
        Ok(Self { width, height })
    }

    /// Full-canvas rectangle.
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Canvas center point.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
        }
    }
}

/// Straight-alpha RGBA8 color as authored in catalogs and lighting tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color with a fractional alpha in `[0, 1]` (CSS `rgba()` convention).
    pub fn rgba_f(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self {
            r,
            g,
            b,
            a: unit_to_u8(alpha),
        }
    }

    /// Fully transparent black.
    pub const fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Alpha as a unit float.
    pub fn alpha_f(self) -> f32 {
        f32::from(self.a) / 255.0
    }

    /// Same color with a replaced unit alpha.
    pub fn with_alpha_f(self, alpha: f32) -> Self {
        Self {
            a: unit_to_u8(alpha),
            ..self
        }
    }

    /// Convert to premultiplied storage.
    pub fn premultiply(self) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, self.a)
    }
}

fn unit_to_u8(x: f32) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Pixel bytes in `[r, g, b, a]` order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Axis-aligned layer rectangle in surface pixel space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl LayerRect {
    /// Smallest side length a resolved layer may have.
    pub const MIN_SIDE_PX: f64 = 1.0;

    /// Construct from origin and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Grow outward by `d` on all four sides.
    pub fn expand(self, d: f64) -> Self {
        Self::new(
            self.x - d,
            self.y - d,
            self.width + 2.0 * d,
            self.height + 2.0 * d,
        )
    }

    /// Shrink inward by `d` on all four sides without validating the result.
    pub fn inset_raw(self, d: f64) -> Self {
        self.expand(-d)
    }

    /// Return `true` when either side is non-positive (or NaN).
    pub fn is_degenerate(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Clamp each side to [`Self::MIN_SIDE_PX`], keeping the rectangle centered on the same point.
    pub fn clamp_min_size(self) -> Self {
        let (cx, cy) = self.center();
        let w = if self.width > Self::MIN_SIDE_PX {
            self.width
        } else {
            Self::MIN_SIDE_PX
        };
        let h = if self.height > Self::MIN_SIDE_PX {
            self.height
        } else {
            Self::MIN_SIDE_PX
        };
        Self::new(cx - w / 2.0, cy - h / 2.0, w, h)
    }

    /// Center point as `(x, y)`.
    pub fn center(self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Right edge.
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    /// Return `true` when `inner` lies inside `self` with no shared edge.
    pub fn strictly_contains(self, inner: LayerRect) -> bool {
        inner.x > self.x
            && inner.y > self.y
            && inner.right() < self.right()
            && inner.bottom() < self.bottom()
    }

    /// Overlap of two rectangles, or `None` when they do not share any area.
    pub fn intersect(self, other: LayerRect) -> Option<LayerRect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 > x0 && y1 > y0 {
            Some(Self::new(x0, y0, x1 - x0, y1 - y0))
        } else {
            None
        }
    }

    /// Convert to a `kurbo` rectangle.
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.right(), self.bottom())
    }
}

impl From<Rect> for LayerRect {
    fn from(r: Rect) -> Self {
        Self::new(r.x0, r.y0, r.width(), r.height())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
