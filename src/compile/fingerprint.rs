use xxhash_rust::xxh3::Xxh3;

use crate::compile::plan::{DrawKind, DrawPlan, DrawRole, DropShadow, GradientStop, Paint};
use crate::foundation::core::{LayerRect, Point, Rgba8};
use crate::layout::geometry::LayerKind;

const XXH3_SEED: u64 = 0x5f3a_91c2_d04e_7b18;

/// Stable 128-bit content hash of a [`DrawPlan`].
///
/// Equal plans rasterize to equal pixels, so an unchanged fingerprint lets the compositor skip
/// the backend entirely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlanFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

pub(crate) fn fingerprint_plan(plan: &DrawPlan) -> PlanFingerprint {
    let mut h = StableHasher::new();
    h.write_u32(plan.canvas.width);
    h.write_u32(plan.canvas.height);
    h.write_u32(plan.ops.len() as u32);
    for op in &plan.ops {
        write_role(&mut h, op.role);
        write_kind(&mut h, &op.kind);
    }
    h.finish()
}

/// 64-bit hash of a paint over a rectangle; keys the backend's gradient cache.
pub(crate) fn paint_key(paint: &Paint, rect: LayerRect) -> u64 {
    let mut h = StableHasher::new();
    write_paint(&mut h, paint);
    write_rect(&mut h, rect);
    h.finish().lo
}

/// 64-bit hash of a shadow cast by a rectangle; keys the backend's shadow cache.
pub(crate) fn shadow_key(shadow: &DropShadow, rect: LayerRect) -> u64 {
    let mut h = StableHasher::new();
    write_shadow(&mut h, shadow);
    write_rect(&mut h, rect);
    h.finish().lo
}

/// 64-bit content hash of raw pixels.
pub(crate) fn image_key(width: u32, height: u32, bytes: &[u8]) -> u64 {
    let mut h = StableHasher::new();
    h.write_u32(width);
    h.write_u32(height);
    h.write_bytes(bytes);
    h.finish().lo
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f32(&mut self, v: f32) {
        self.write_u32(v.to_bits());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn finish(self) -> PlanFingerprint {
        let v = self.inner.digest128();
        PlanFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

fn write_role(h: &mut StableHasher, role: DrawRole) {
    let tag = match role {
        DrawRole::Background => 0,
        DrawRole::Ambient => 1,
        DrawRole::Vignette => 2,
        DrawRole::Frame => 3,
        DrawRole::Mat(kind) => {
            h.write_u8(4);
            write_layer_kind(h, kind);
            return;
        }
        DrawRole::Placeholder => 5,
        DrawRole::Caption => 6,
        DrawRole::Artwork => 7,
        DrawRole::GlassReflection => 8,
        DrawRole::Glare => 9,
    };
    h.write_u8(tag);
}

fn write_layer_kind(h: &mut StableHasher, kind: LayerKind) {
    h.write_u8(match kind {
        LayerKind::Frame => 0,
        LayerKind::BottomMat => 1,
        LayerKind::MiddleMat => 2,
        LayerKind::TopMat => 3,
    });
}

fn write_kind(h: &mut StableHasher, kind: &DrawKind) {
    match kind {
        DrawKind::FillRect {
            rect,
            paint,
            shadow,
        } => {
            h.write_u8(0);
            write_rect(h, *rect);
            write_paint(h, paint);
            h.write_bool(shadow.is_some());
            if let Some(s) = shadow {
                write_shadow(h, s);
            }
        }
        DrawKind::FillEllipse { ellipse, color } => {
            h.write_u8(1);
            write_point(h, ellipse.center());
            let r = ellipse.radii();
            h.write_f64(r.x);
            h.write_f64(r.y);
            h.write_f64(ellipse.rotation());
            write_color(h, *color);
        }
        DrawKind::Image { dest, image } => {
            h.write_u8(2);
            write_rect(h, *dest);
            h.write_u64(image.0);
        }
        DrawKind::Text {
            text,
            center,
            size_px,
            color,
        } => {
            h.write_u8(3);
            h.write_u32(text.len() as u32);
            h.write_bytes(text.as_bytes());
            write_point(h, *center);
            h.write_f32(*size_px);
            write_color(h, *color);
        }
    }
}

fn write_paint(h: &mut StableHasher, paint: &Paint) {
    match paint {
        Paint::Solid(c) => {
            h.write_u8(0);
            write_color(h, *c);
        }
        Paint::Linear { start, end, stops } => {
            h.write_u8(1);
            write_point(h, *start);
            write_point(h, *end);
            write_stops(h, stops);
        }
        Paint::Radial {
            center,
            inner_radius,
            outer_radius,
            stops,
        } => {
            h.write_u8(2);
            write_point(h, *center);
            h.write_f64(*inner_radius);
            h.write_f64(*outer_radius);
            write_stops(h, stops);
        }
    }
}

fn write_shadow(h: &mut StableHasher, s: &DropShadow) {
    write_color(h, s.color);
    h.write_f64(s.blur_px);
    h.write_f64(s.offset.x);
    h.write_f64(s.offset.y);
}

fn write_stops(h: &mut StableHasher, stops: &[GradientStop]) {
    h.write_u32(stops.len() as u32);
    for s in stops {
        h.write_f32(s.offset);
        write_color(h, s.color);
    }
}

fn write_rect(h: &mut StableHasher, r: LayerRect) {
    h.write_f64(r.x);
    h.write_f64(r.y);
    h.write_f64(r.width);
    h.write_f64(r.height);
}

fn write_point(h: &mut StableHasher, p: Point) {
    h.write_f64(p.x);
    h.write_f64(p.y);
}

fn write_color(h: &mut StableHasher, c: Rgba8) {
    h.write_bytes(&[c.r, c.g, c.b, c.a]);
}

#[cfg(test)]
#[path = "../../tests/unit/compile/fingerprint.rs"]
mod tests;
