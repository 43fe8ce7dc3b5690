//! Framesmith is a frame composition, lighting preview and pricing engine for custom picture
//! framing.
//!
//! The public API is session-oriented:
//!
//! - Load a [`Catalog`] of frame, mat and glass options (or use the compiled-in defaults)
//! - Create a [`DesignerSession`] for one [`ArtworkSpec`]
//! - Mutate the [`SelectionState`], drive animations from host frame callbacks, render the
//!   preview into a [`RasterSurface`] and read back a [`Money`] price
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;

pub(crate) mod animation;
pub(crate) mod catalog;
pub(crate) mod compile;
pub(crate) mod layout;
pub(crate) mod lighting;
pub(crate) mod pricing;
pub(crate) mod render;
pub(crate) mod scene;
pub(crate) mod session;

pub use crate::foundation::core::{
    Affine, BezPath, Canvas, Ellipse, LayerRect, Point, Rect, Rgba8, Rgba8Premul, Vec2,
};
pub use crate::foundation::error::{FramesmithError, FramesmithResult};

pub use crate::assets::color::{parse_css_color, to_hex};
pub use crate::assets::decode::{MAX_IMAGE_SIDE, PreparedImage, decode_image};

pub use crate::animation::clock::ManualFrameClock;
pub use crate::animation::scheduler::{
    AnimationEvent, AnimationKind, AnimationScheduler, DEFAULT_SPEED, FrameRequester, FrameToken,
    MAX_SPEED, MIN_SPEED, SchedulerState, frame_delay_ms,
};
pub use crate::catalog::material::{
    FrameRecord, GlassRecord, MatRecord, MaterialKind, MaterialOption, Pricing,
};
pub use crate::catalog::{Catalog, CatalogPayload, CatalogSource};
pub use crate::compile::fingerprint::PlanFingerprint;
pub use crate::compile::plan::{
    ArtworkPaint, CompositeInput, DrawKind, DrawOp, DrawPlan, DrawRole, DropShadow, GradientStop,
    ImageKey, MatColors, PLACEHOLDER_CAPTION, PLACEHOLDER_CAPTION_PX, Paint, ShadowOpts,
    compile_composite,
};
pub use crate::layout::geometry::{
    ARTWORK_CANVAS_FRACTION, ARTWORK_PADDING_FRACTION, FrameLayers, GeometryResolver, Layer,
    LayerKind, MAX_BORDER_CANVAS_FRACTION, MatFlags, RevealMapping, Reveals,
};
pub use crate::lighting::model::{
    LightingCondition, LightingProfile, RoomPalette, RoomStyle, resolve as resolve_lighting,
};
pub use crate::pricing::calculator::{
    Money, PriceBreakdown, PriceCalculator, PriceLine, PricingConfig,
};
pub use crate::render::backend::{
    ArtworkRef, BackendKind, DrawBackend, RasterSurface, create_backend,
};
pub use crate::render::compositor::{ArtworkSlot, LayerCompositor};
pub use crate::render::cpu::{CpuBackend, CpuBackendOpts};
pub use crate::scene::model::ArtworkSpec;
pub use crate::scene::selection::{CommitSelection, SelectionState};
pub use crate::session::design::DesignFile;
pub use crate::session::designer::{DesignerOpts, DesignerSession};
