use std::collections::HashMap;
use std::sync::Arc;

use kurbo::Shape;

use crate::compile::fingerprint::{paint_key, shadow_key};
use crate::compile::plan::{DrawKind, DrawPlan, DropShadow, GradientStop, Paint};
use crate::foundation::core::{Affine, BezPath, LayerRect, Point, Rgba8};
use crate::foundation::error::{FramesmithError, FramesmithResult};
use crate::foundation::math::lerp_u8;
use crate::render::backend::{ArtworkRef, DrawBackend, RasterSurface};
use crate::render::blur::{blur_rgba8_premul_q16, gaussian_kernel_q16, radius_for_sigma};
use crate::render::text::{CaptionLayoutEngine, TextBrush};

const PAINT_CACHE_LIMIT: usize = 32;
/// Largest shadow blur sigma in pixels.
const MAX_SHADOW_SIGMA: f32 = 64.0;

/// Options for the CPU backend.
#[derive(Clone, Debug, Default)]
pub struct CpuBackendOpts {
    /// Font used for the placeholder caption. Without one the caption is skipped.
    pub caption_font: Option<Arc<Vec<u8>>>,
}

impl CpuBackendOpts {
    /// Return options with a caption font.
    pub fn with_caption_font(mut self, font: Option<Arc<Vec<u8>>>) -> Self {
        self.caption_font = font;
        self
    }
}

#[derive(Clone)]
struct ImagePaint {
    paint: vello_cpu::Image,
    w: u32,
    h: u32,
}

/// CPU raster backend built on `vello_cpu`.
pub struct CpuBackend {
    opts: CpuBackendOpts,
    ctx: Option<vello_cpu::RenderContext>,
    text: CaptionLayoutEngine,
    caption_font: Option<vello_cpu::peniko::FontData>,
    paint_cache: HashMap<u64, ImagePaint>,
    kernel_cache: HashMap<u32, Arc<Vec<u32>>>,
    artwork: Option<(u64, ImagePaint)>,
}

impl std::fmt::Debug for CpuBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuBackend")
            .field("caption_font", &self.opts.caption_font.is_some())
            .field("cached_paints", &self.paint_cache.len())
            .finish_non_exhaustive()
    }
}

impl CpuBackend {
    /// Backend with the given options.
    pub fn new(opts: CpuBackendOpts) -> Self {
        Self {
            opts,
            ctx: None,
            text: CaptionLayoutEngine::new(),
            caption_font: None,
            paint_cache: HashMap::new(),
            kernel_cache: HashMap::new(),
            artwork: None,
        }
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> FramesmithResult<R>,
    ) -> FramesmithResult<R> {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn remember(&mut self, key: u64, paint: ImagePaint) {
        if self.paint_cache.len() >= PAINT_CACHE_LIMIT {
            self.paint_cache.clear();
        }
        self.paint_cache.insert(key, paint);
    }

    fn gradient_paint(&mut self, paint: &Paint, rect: LayerRect) -> FramesmithResult<ImagePaint> {
        let key = paint_key(paint, rect);
        if let Some(p) = self.paint_cache.get(&key) {
            return Ok(p.clone());
        }
        let w = rect.width.ceil().max(1.0) as u32;
        let h = rect.height.ceil().max(1.0) as u32;
        let mut bytes = vec![0u8; (w as usize) * (h as usize) * 4];
        for y in 0..h {
            for x in 0..w {
                let p = Point::new(
                    rect.x + f64::from(x) + 0.5,
                    rect.y + f64::from(y) + 0.5,
                );
                let idx = ((y as usize) * (w as usize) + (x as usize)) * 4;
                bytes[idx..idx + 4].copy_from_slice(&sample_paint(paint, p));
            }
        }
        let out = ImagePaint {
            paint: rgba_premul_to_image(&bytes, w, h)?,
            w,
            h,
        };
        self.remember(key, out.clone());
        Ok(out)
    }

    fn shadow_paint(&mut self, shadow: &DropShadow, rect: LayerRect) -> FramesmithResult<ImagePaint> {
        let key = shadow_key(shadow, rect);
        if let Some(p) = self.paint_cache.get(&key) {
            return Ok(p.clone());
        }
        let sigma = shadow_sigma(shadow);
        let radius = radius_for_sigma(sigma);
        let kernel = match self.kernel_cache.get(&radius) {
            Some(k) => k.clone(),
            None => {
                let k = Arc::new(gaussian_kernel_q16(radius, sigma)?);
                self.kernel_cache.insert(radius, k.clone());
                k
            }
        };

        let inner_w = rect.width.ceil().max(1.0) as u32;
        let inner_h = rect.height.ceil().max(1.0) as u32;
        let w = inner_w + 2 * radius;
        let h = inner_h + 2 * radius;
        let len = (w as usize) * (h as usize) * 4;
        let px = shadow.color.premultiply().to_array();

        let mut src = vec![0u8; len];
        for y in radius..radius + inner_h {
            let row = (y as usize) * (w as usize);
            for x in radius..radius + inner_w {
                let idx = (row + x as usize) * 4;
                src[idx..idx + 4].copy_from_slice(&px);
            }
        }
        let mut dst = vec![0u8; len];
        let mut tmp = vec![0u8; len];
        blur_rgba8_premul_q16(&src, &mut dst, &mut tmp, w, h, &kernel);

        let out = ImagePaint {
            paint: rgba_premul_to_image(&dst, w, h)?,
            w,
            h,
        };
        self.remember(key, out.clone());
        Ok(out)
    }

    fn artwork_paint(&mut self, artwork: ArtworkRef<'_>) -> FramesmithResult<ImagePaint> {
        if let Some((key, p)) = &self.artwork
            && *key == artwork.key.0
        {
            return Ok(p.clone());
        }
        let img = artwork.image;
        let out = ImagePaint {
            paint: rgba_premul_to_image(&img.rgba8_premul, img.width, img.height)?,
            w: img.width,
            h: img.height,
        };
        self.artwork = Some((artwork.key.0, out.clone()));
        Ok(out)
    }

    fn ensure_caption_font(&mut self) -> Option<vello_cpu::peniko::FontData> {
        if let Some(font) = &self.caption_font {
            return Some(font.clone());
        }
        let bytes = self.opts.caption_font.clone()?;
        if let Err(err) = self.text.register_font(&bytes) {
            tracing::warn!(%err, "caption font unusable; placeholder caption disabled");
            self.opts.caption_font = None;
            return None;
        }
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(bytes.to_vec()),
            0,
        );
        self.caption_font = Some(font.clone());
        Some(font)
    }

    fn draw_image(ctx: &mut vello_cpu::RenderContext, p: ImagePaint, dest: LayerRect) {
        let sx = dest.width / f64::from(p.w);
        let sy = dest.height / f64::from(p.h);
        ctx.set_transform(affine_to_cpu(
            Affine::translate((dest.x, dest.y)) * Affine::scale_non_uniform(sx, sy),
        ));
        ctx.set_paint(p.paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(p.w),
            f64::from(p.h),
        ));
    }

    fn draw_op(
        &mut self,
        kind: &DrawKind,
        artwork: Option<ArtworkRef<'_>>,
        bounds: LayerRect,
        ctx: &mut vello_cpu::RenderContext,
    ) -> FramesmithResult<()> {
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        match kind {
            DrawKind::FillRect {
                rect,
                paint,
                shadow,
            } => {
                if let Some(s) = shadow
                    && s.color.a > 0
                {
                    // Caster pixels further than the blur radius outside the canvas never
                    // reach a visible pixel.
                    let r = f64::from(radius_for_sigma(shadow_sigma(s)));
                    let cast = LayerRect::new(
                        rect.x + s.offset.x,
                        rect.y + s.offset.y,
                        rect.width,
                        rect.height,
                    );
                    if let Some(visible) = cast.intersect(bounds.expand(r)) {
                        let p = self.shadow_paint(s, visible)?;
                        let dest = LayerRect::new(
                            visible.x - r,
                            visible.y - r,
                            f64::from(p.w),
                            f64::from(p.h),
                        );
                        Self::draw_image(ctx, p, dest);
                    }
                }
                match paint {
                    Paint::Solid(c) => {
                        if let Some(visible) = rect.intersect(bounds) {
                            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                            ctx.set_paint(to_cpu_color(*c));
                            ctx.fill_rect(&rect_to_cpu(visible));
                        }
                    }
                    gradient => {
                        let Some(visible) = rect.intersect(bounds) else {
                            return Ok(());
                        };
                        let p = self.gradient_paint(gradient, visible)?;
                        ctx.set_transform(affine_to_cpu(Affine::translate((visible.x, visible.y))));
                        ctx.set_paint(p.paint);
                        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                            0.0,
                            0.0,
                            visible.width,
                            visible.height,
                        ));
                    }
                }
                Ok(())
            }
            DrawKind::FillEllipse { ellipse, color } => {
                ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_paint(to_cpu_color(*color));
                ctx.fill_path(&bezpath_to_cpu(&ellipse.to_path(0.1)));
                Ok(())
            }
            DrawKind::Image { dest, image } => {
                let Some(art) = artwork.filter(|a| a.key == *image) else {
                    return Err(FramesmithError::render(format!(
                        "plan references artwork {image:?} that was not supplied"
                    )));
                };
                let p = self.artwork_paint(art)?;
                Self::draw_image(ctx, p, *dest);
                Ok(())
            }
            DrawKind::Text {
                text,
                center,
                size_px,
                color,
            } => {
                let Some(font) = self.ensure_caption_font() else {
                    tracing::debug!("no caption font configured; skipping caption");
                    return Ok(());
                };
                let layout = self
                    .text
                    .layout_line(text, *size_px, TextBrush::from(*color))?;
                let origin = (
                    center.x - f64::from(layout.width()) / 2.0,
                    center.y - f64::from(layout.height()) / 2.0,
                );
                ctx.set_transform(affine_to_cpu(Affine::translate(origin)));
                for line in layout.lines() {
                    for item in line.items() {
                        let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                            continue;
                        };
                        let brush = run.style().brush;
                        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                            brush.r, brush.g, brush.b, brush.a,
                        ));
                        let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                            id: g.id,
                            x: g.x,
                            y: g.y,
                        });
                        ctx.glyph_run(&font)
                            .font_size(run.run().font_size())
                            .fill_glyphs(glyphs);
                    }
                }
                Ok(())
            }
        }
    }
}

impl DrawBackend for CpuBackend {
    #[tracing::instrument(level = "trace", skip_all, fields(ops = plan.ops.len()))]
    fn render_plan(
        &mut self,
        plan: &DrawPlan,
        artwork: Option<ArtworkRef<'_>>,
        target: &mut RasterSurface,
    ) -> FramesmithResult<()> {
        if target.canvas() != plan.canvas {
            return Err(FramesmithError::render(format!(
                "surface {}x{} does not match plan canvas {}x{}",
                target.width, target.height, plan.canvas.width, plan.canvas.height
            )));
        }
        let w: u16 = plan
            .canvas
            .width
            .try_into()
            .map_err(|_| FramesmithError::render("surface width exceeds u16"))?;
        let h: u16 = plan
            .canvas
            .height
            .try_into()
            .map_err(|_| FramesmithError::render("surface height exceeds u16"))?;

        let bounds = LayerRect::new(0.0, 0.0, f64::from(w), f64::from(h));
        self.with_ctx_mut(w, h, |this, ctx| {
            for op in &plan.ops {
                this.draw_op(&op.kind, artwork, bounds, ctx)?;
            }
            let mut pixmap = vello_cpu::Pixmap::new(w, h);
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            target.data.copy_from_slice(pixmap.data_as_u8_slice());
            Ok(())
        })
    }
}

fn shadow_sigma(shadow: &DropShadow) -> f32 {
    ((shadow.blur_px / 2.0) as f32).min(MAX_SHADOW_SIGMA)
}

fn to_cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn rect_to_cpu(r: LayerRect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x, r.y, r.right(), r.bottom())
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

/// Premultiplied color of `paint` at `p`.
pub(crate) fn sample_paint(paint: &Paint, p: Point) -> [u8; 4] {
    match paint {
        Paint::Solid(c) => c.premultiply().to_array(),
        Paint::Linear { start, end, stops } => {
            let d = *end - *start;
            let len2 = d.hypot2();
            let t = if len2 <= 0.0 {
                0.0
            } else {
                ((p - *start).dot(d) / len2).clamp(0.0, 1.0)
            };
            sample_stops(stops, t as f32)
        }
        Paint::Radial {
            center,
            inner_radius,
            outer_radius,
            stops,
        } => {
            let dist = (p - *center).hypot();
            let span = outer_radius - inner_radius;
            let t = if span <= 0.0 {
                if dist >= *outer_radius { 1.0 } else { 0.0 }
            } else {
                ((dist - inner_radius) / span).clamp(0.0, 1.0)
            };
            sample_stops(stops, t as f32)
        }
    }
}

fn sample_stops(stops: &[GradientStop], t: f32) -> [u8; 4] {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return [0; 4];
    };
    if t <= first.offset {
        return first.color.premultiply().to_array();
    }
    if t >= last.offset {
        return last.color.premultiply().to_array();
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t >= a.offset && t <= b.offset {
            let span = b.offset - a.offset;
            let local = if span <= 0.0 { 0.0 } else { (t - a.offset) / span };
            let ca = a.color.premultiply().to_array();
            let cb = b.color.premultiply().to_array();
            return [
                lerp_u8(ca[0], cb[0], local),
                lerp_u8(ca[1], cb[1], local),
                lerp_u8(ca[2], cb[2], local),
                lerp_u8(ca[3], cb[3], local),
            ];
        }
    }
    last.color.premultiply().to_array()
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> FramesmithResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| FramesmithError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| FramesmithError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(FramesmithError::render("pixmap byte len mismatch"));
    }
    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity((width as usize) * (height as usize));
    for px in bytes.chunks_exact(4) {
        may_have_opacities |= px[3] != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        });
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn rgba_premul_to_image(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> FramesmithResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
