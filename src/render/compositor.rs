use crate::assets::decode::{PreparedImage, decode_image};
use crate::compile::fingerprint::{PlanFingerprint, image_key};
use crate::compile::plan::{ArtworkPaint, CompositeInput, DrawPlan, ImageKey, compile_composite};
use crate::foundation::core::Canvas;
use crate::foundation::error::FramesmithResult;
use crate::render::backend::{ArtworkRef, DrawBackend, RasterSurface};

/// Load state of the artwork image.
///
/// Only `Ready` paints the image; every other state paints the placeholder.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ArtworkSlot {
    /// No artwork was ever supplied.
    #[default]
    Absent,
    /// A load is in flight on the host side.
    Pending,
    /// Decoded and ready to draw.
    Ready {
        /// Content key the plan refers to.
        key: ImageKey,
        /// Decoded pixels.
        image: PreparedImage,
    },
    /// The last load failed to decode.
    Failed,
}

impl ArtworkSlot {
    /// What the artwork box is filled with in this state.
    pub fn paint(&self) -> ArtworkPaint {
        match self {
            Self::Ready { key, .. } => ArtworkPaint::Image(*key),
            Self::Absent | Self::Pending | Self::Failed => ArtworkPaint::Placeholder,
        }
    }

    fn artwork_ref(&self) -> Option<ArtworkRef<'_>> {
        match self {
            Self::Ready { key, image } => Some(ArtworkRef { key: *key, image }),
            _ => None,
        }
    }
}

/// Owns the raster surface and turns draw plans into pixels.
///
/// Rendering is skipped when the plan fingerprint matches the last rasterized plan.
pub struct LayerCompositor {
    backend: Box<dyn DrawBackend>,
    surface: RasterSurface,
    slot: ArtworkSlot,
    last: Option<PlanFingerprint>,
    raster_count: u64,
}

impl std::fmt::Debug for LayerCompositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerCompositor")
            .field("canvas", &self.surface.canvas())
            .field("slot", &self.slot)
            .field("raster_count", &self.raster_count)
            .finish_non_exhaustive()
    }
}

impl LayerCompositor {
    /// Compositor drawing into a fresh transparent surface.
    pub fn new(canvas: Canvas, backend: Box<dyn DrawBackend>) -> Self {
        Self {
            backend,
            surface: RasterSurface::new(canvas),
            slot: ArtworkSlot::Absent,
            last: None,
            raster_count: 0,
        }
    }

    /// Current artwork state.
    pub fn artwork(&self) -> &ArtworkSlot {
        &self.slot
    }

    /// Artwork fill for the next compile.
    pub fn artwork_paint(&self) -> ArtworkPaint {
        self.slot.paint()
    }

    /// Mark a load as started. The placeholder stays until the bytes arrive.
    pub fn set_artwork_pending(&mut self) {
        self.slot = ArtworkSlot::Pending;
    }

    /// Decode loaded bytes into the slot.
    ///
    /// A decode failure is logged and leaves the slot `Failed`; the placeholder keeps rendering.
    /// Returns whether the image is now ready.
    pub fn set_artwork_bytes(&mut self, bytes: &[u8]) -> bool {
        match decode_image(bytes) {
            Ok(image) => {
                self.set_artwork_image(image);
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "artwork failed to load; drawing placeholder");
                self.slot = ArtworkSlot::Failed;
                false
            }
        }
    }

    /// Install an already decoded image.
    pub fn set_artwork_image(&mut self, image: PreparedImage) {
        let key = ImageKey(image_key(image.width, image.height, &image.rgba8_premul));
        tracing::debug!(
            width = image.width,
            height = image.height,
            key = key.0,
            "artwork ready"
        );
        self.slot = ArtworkSlot::Ready { key, image };
    }

    /// Drop any artwork and go back to the placeholder.
    pub fn clear_artwork(&mut self) {
        self.slot = ArtworkSlot::Absent;
    }

    /// Compile `input` with the current artwork state and render it.
    pub fn compose(&mut self, input: &CompositeInput<'_>) -> FramesmithResult<bool> {
        let plan = compile_composite(input);
        self.render(&plan)
    }

    /// Rasterize `plan` into the surface. Returns `false` when the plan was unchanged and the
    /// surface already holds its pixels.
    #[tracing::instrument(level = "debug", skip_all, fields(ops = plan.ops.len()))]
    pub fn render(&mut self, plan: &DrawPlan) -> FramesmithResult<bool> {
        if self.surface.canvas() != plan.canvas {
            self.surface = RasterSurface::new(plan.canvas);
            self.last = None;
        }
        let fingerprint = plan.fingerprint();
        if self.last == Some(fingerprint) {
            tracing::trace!("plan unchanged; skipping raster");
            return Ok(false);
        }
        self.last = None;
        self.backend
            .render_plan(plan, self.slot.artwork_ref(), &mut self.surface)?;
        self.last = Some(fingerprint);
        self.raster_count += 1;
        Ok(true)
    }

    /// Forget the last fingerprint so the next render always rasterizes.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Last rendered pixels.
    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    /// Number of plans actually rasterized.
    pub fn raster_count(&self) -> u64 {
        self.raster_count
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
