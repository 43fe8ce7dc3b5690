use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::Receiver;

use crate::animation::scheduler::{
    AnimationEvent, AnimationKind, AnimationScheduler, DEFAULT_SPEED, FrameRequester, FrameToken,
};
use crate::assets::decode::PreparedImage;
use crate::catalog::Catalog;
use crate::catalog::material::MaterialKind;
use crate::compile::plan::{CompositeInput, DrawPlan, MatColors, ShadowOpts, compile_composite};
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{FramesmithError, FramesmithResult};
use crate::layout::geometry::{FrameLayers, GeometryResolver, RevealMapping};
use crate::lighting::model;
use crate::pricing::calculator::{Money, PriceBreakdown, PriceCalculator, PricingConfig};
use crate::render::backend::{BackendKind, DrawBackend, RasterSurface, create_backend};
use crate::render::compositor::{ArtworkSlot, LayerCompositor};
use crate::render::cpu::CpuBackendOpts;
use crate::scene::model::ArtworkSpec;
use crate::scene::selection::{CommitSelection, SelectionState};

/// Session configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DesignerOpts {
    /// Preview surface size.
    pub canvas: Canvas,
    /// Reveal scale to pixel mapping.
    pub reveal: RevealMapping,
    /// Surcharges and markups.
    pub pricing: PricingConfig,
    /// Frame drop shadow.
    pub shadow: ShadowOpts,
    /// Font file for the placeholder caption.
    pub caption_font: Option<PathBuf>,
    /// Initial animation speed (10..=100).
    pub default_speed: u8,
}

impl Default for DesignerOpts {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            reveal: RevealMapping::default(),
            pricing: PricingConfig::default(),
            shadow: ShadowOpts::default(),
            caption_font: None,
            default_speed: DEFAULT_SPEED,
        }
    }
}

impl DesignerOpts {
    /// Parse options from JSON; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> FramesmithResult<Self> {
        let opts: Self = serde_json::from_str(s)?;
        opts.validate()?;
        Ok(opts)
    }

    /// Load options from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> FramesmithResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            FramesmithError::validation(format!(
                "failed to read designer options '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&s)
    }

    /// Reject options the renderer cannot honor.
    pub fn validate(&self) -> FramesmithResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        if !self.shadow.blur_px.is_finite()
            || !self.shadow.offset_x.is_finite()
            || !self.shadow.offset_y.is_finite()
        {
            return Err(FramesmithError::validation("shadow values must be finite"));
        }
        Ok(())
    }

    fn load_caption_font(&self) -> Option<Arc<Vec<u8>>> {
        let path = self.caption_font.as_ref()?;
        match std::fs::read(path) {
            Ok(bytes) => Some(Arc::new(bytes)),
            Err(e) => {
                let err = FramesmithError::asset_load(format!(
                    "caption font '{}': {e}",
                    path.display()
                ));
                tracing::warn!(%err, "placeholder caption disabled");
                None
            }
        }
    }
}

/// One mounted designer view.
///
/// Owns the selection, the animation loop and the preview surface. Everything is
/// single-threaded: the host calls [`DesignerSession::on_frame`] from its frame callback.
pub struct DesignerSession {
    opts: DesignerOpts,
    artwork: ArtworkSpec,
    catalog: Catalog,
    selection: SelectionState,
    scheduler: AnimationScheduler,
    events: Receiver<AnimationEvent>,
    compositor: LayerCompositor,
    resolver: GeometryResolver,
    calculator: PriceCalculator,
}

impl std::fmt::Debug for DesignerSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesignerSession")
            .field("artwork", &self.artwork)
            .field("selection", &self.selection)
            .field("scheduler", &self.scheduler)
            .field("compositor", &self.compositor)
            .finish_non_exhaustive()
    }
}

impl DesignerSession {
    /// Session rendering on the CPU backend.
    #[tracing::instrument(skip(catalog, opts, requester))]
    pub fn new(
        artwork: ArtworkSpec,
        catalog: Catalog,
        opts: DesignerOpts,
        requester: Box<dyn FrameRequester>,
    ) -> FramesmithResult<Self> {
        opts.validate()?;
        let backend = create_backend(
            BackendKind::Cpu,
            CpuBackendOpts::default().with_caption_font(opts.load_caption_font()),
        );
        Self::with_backend(artwork, catalog, opts, requester, backend)
    }

    /// Session rendering through a caller-supplied backend.
    pub fn with_backend(
        artwork: ArtworkSpec,
        catalog: Catalog,
        opts: DesignerOpts,
        requester: Box<dyn FrameRequester>,
        backend: Box<dyn DrawBackend>,
    ) -> FramesmithResult<Self> {
        opts.validate()?;
        let (scheduler, events) = AnimationScheduler::new(requester, opts.default_speed);
        Ok(Self {
            artwork,
            selection: SelectionState::default(),
            scheduler,
            events,
            compositor: LayerCompositor::new(opts.canvas, backend),
            resolver: GeometryResolver::new(opts.canvas, opts.reveal),
            calculator: PriceCalculator::new(opts.pricing),
            catalog,
            opts,
        })
    }

    /// Session options.
    pub fn opts(&self) -> &DesignerOpts {
        &self.opts
    }

    /// Artwork dimensions.
    pub fn artwork(&self) -> ArtworkSpec {
        self.artwork
    }

    /// Loaded catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Replace the catalog, clamping the selection into the new lists.
    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        self.selection.sanitize(&self.catalog);
    }

    /// Current selection.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Replace the whole selection, e.g. from a saved design. Indices are clamped into the
    /// catalog and the animation field follows the scheduler.
    pub fn set_selection(&mut self, selection: SelectionState) {
        self.selection = selection;
        self.selection.sanitize(&self.catalog);
        self.sync_animation();
    }

    /// Mutable selection. Indices are clamped when read.
    pub fn selection_mut(&mut self) -> &mut SelectionState {
        &mut self.selection
    }

    /// Select a frame moulding.
    pub fn select_frame(&mut self, index: usize) {
        self.selection.frame_index = self.catalog.clamp_index(MaterialKind::Frame, index);
    }

    /// Select the top mat.
    pub fn select_mat(&mut self, index: usize) {
        self.selection.mat_index = self.catalog.clamp_index(MaterialKind::Mat, index);
    }

    /// Select a glazing option, or none.
    pub fn select_glass(&mut self, index: Option<usize>) {
        self.selection.glass_index =
            index.map(|i| self.catalog.clamp_index(MaterialKind::Glass, i));
    }

    /// Artwork load state.
    pub fn artwork_slot(&self) -> &ArtworkSlot {
        self.compositor.artwork()
    }

    /// The host started loading an image.
    pub fn set_artwork_pending(&mut self) {
        self.compositor.set_artwork_pending();
    }

    /// The host finished loading image bytes. Returns whether they decoded.
    pub fn set_artwork_bytes(&mut self, bytes: &[u8]) -> bool {
        self.compositor.set_artwork_bytes(bytes)
    }

    /// Install a decoded image.
    pub fn set_artwork_image(&mut self, image: PreparedImage) {
        self.compositor.set_artwork_image(image);
    }

    /// Go back to the placeholder.
    pub fn clear_artwork(&mut self) {
        self.compositor.clear_artwork();
    }

    /// Start (or switch to) an animation.
    pub fn start_animation(&mut self, kind: AnimationKind) {
        self.scheduler.start(kind);
        self.sync_animation();
    }

    /// Stop any animation.
    pub fn stop_animation(&mut self) {
        self.scheduler.stop();
        self.sync_animation();
    }

    /// Stop `kind` if it runs, otherwise start it.
    pub fn toggle_animation(&mut self, kind: AnimationKind) {
        self.scheduler.toggle(kind);
        self.sync_animation();
    }

    /// Change the animation speed; takes effect on the next callback.
    pub fn set_speed(&mut self, speed: u8) {
        self.scheduler.set_speed(speed);
    }

    /// Scheduler driving this session.
    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    /// Host frame callback. Returns whether the selection advanced; when it did the preview is
    /// redrawn.
    pub fn on_frame(&mut self, token: FrameToken, timestamp_ms: f64) -> FramesmithResult<bool> {
        self.scheduler.on_frame(token, timestamp_ms);
        let advanced = self.apply_events();
        if advanced {
            self.render()?;
        }
        Ok(advanced)
    }

    fn apply_events(&mut self) -> bool {
        let mut advanced = false;
        while let Ok(AnimationEvent::Advance(kind)) = self.events.try_recv() {
            self.selection.advance(kind, &self.catalog);
            tracing::debug!(?kind, "animation advanced");
            advanced = true;
        }
        self.sync_animation();
        advanced
    }

    fn sync_animation(&mut self) {
        self.selection.animation = self.scheduler.running();
    }

    /// Resolved layers for the current selection.
    pub fn layers(&self) -> FrameLayers {
        let frame = self
            .catalog
            .get(MaterialKind::Frame, self.selection.frame_index);
        self.resolver.resolve(
            self.artwork,
            frame.border_px,
            self.selection.reveals(),
            self.selection.mat_flags(),
        )
    }

    /// Compile the current state without rendering it.
    pub fn plan(&self) -> DrawPlan {
        let layers = self.layers();
        let mat_color = |i: Option<usize>, fallback: Rgba8| {
            i.map_or(fallback, |i| self.catalog.get(MaterialKind::Mat, i).color)
        };
        let defaults = MatColors::default();
        let input = CompositeInput {
            canvas: self.opts.canvas,
            layers: &layers,
            lighting: model::resolve(self.selection.lighting),
            room: self.selection.room_style,
            frame_color: self
                .catalog
                .get(MaterialKind::Frame, self.selection.frame_index)
                .color,
            mat_colors: MatColors {
                top: mat_color(Some(self.selection.mat_index), defaults.top),
                middle: mat_color(self.selection.active_middle_mat(&self.catalog), defaults.middle),
                bottom: mat_color(self.selection.active_bottom_mat(&self.catalog), defaults.bottom),
            },
            glass: self.selection.glass_index.is_some(),
            artwork: self.compositor.artwork_paint(),
            high_contrast: self.selection.high_contrast,
            shadow: self.opts.shadow,
        };
        compile_composite(&input)
    }

    /// Redraw the preview. Unchanged state is not re-rasterized.
    pub fn render(&mut self) -> FramesmithResult<&RasterSurface> {
        let plan = self.plan();
        self.compositor.render(&plan)?;
        Ok(self.compositor.surface())
    }

    /// Last rendered preview.
    pub fn surface(&self) -> &RasterSurface {
        self.compositor.surface()
    }

    /// Number of actual rasterizations so far.
    pub fn raster_count(&self) -> u64 {
        self.compositor.raster_count()
    }

    /// Total price of the current selection.
    pub fn price(&self) -> Money {
        self.calculator
            .price(&self.selection, self.artwork, &self.catalog)
    }

    /// Itemized price of the current selection.
    pub fn breakdown(&self) -> PriceBreakdown {
        self.calculator
            .breakdown(&self.selection, self.artwork, &self.catalog)
    }

    /// Chosen frame and mat records for the cart.
    pub fn commit(&self) -> CommitSelection {
        let out = self.selection.commit(&self.catalog);
        tracing::debug!(frame = out.frame_style.id, mat = out.mat_style.id, "selection committed");
        out
    }

    /// Back to defaults: animation stopped, artwork cleared.
    pub fn reset(&mut self) {
        self.scheduler.stop();
        while self.events.try_recv().is_ok() {}
        self.selection = SelectionState::default();
        self.compositor.clear_artwork();
        self.compositor.invalidate();
        self.sync_animation();
    }

    /// Cancel any armed callback and make the scheduler inert. Idempotent.
    pub fn teardown(&mut self) {
        self.scheduler.teardown();
        self.sync_animation();
    }
}

impl Drop for DesignerSession {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/designer.rs"]
mod tests;
