use smallvec::{SmallVec, smallvec};

use crate::compile::fingerprint::{PlanFingerprint, fingerprint_plan};
use crate::foundation::core::{Canvas, Ellipse, LayerRect, Point, Rgba8, Vec2};
use crate::layout::geometry::{FrameLayers, LayerKind};
use crate::lighting::model::{LightingProfile, RoomStyle};

/// Caption drawn on the placeholder when no artwork image is available.
pub const PLACEHOLDER_CAPTION: &str = "Your artwork here";
/// Caption size in pixels.
pub const PLACEHOLDER_CAPTION_PX: f32 = 16.0;

const HIGH_CONTRAST_BACKGROUND: Rgba8 = Rgba8::rgb(0x00, 0x00, 0x00);
const HIGH_CONTRAST_FRAME: Rgba8 = Rgba8::rgb(0xFF, 0xFF, 0xFF);
const HIGH_CONTRAST_MAT: Rgba8 = Rgba8::rgb(0xAA, 0xAA, 0xAA);
const PLACEHOLDER_FILL: Rgba8 = Rgba8::rgb(0xEF, 0xEF, 0xEF);
const PLACEHOLDER_TEXT: Rgba8 = Rgba8::rgb(0x99, 0x99, 0x99);

/// Content hash of a decoded artwork image, used to key plans and caches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageKey(pub u64);

/// One color stop of a gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position in `[0, 1]`.
    pub offset: f32,
    /// Straight-alpha color.
    pub color: Rgba8,
}

/// Fill style for rectangles.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    /// Flat color.
    Solid(Rgba8),
    /// Linear gradient along `start -> end` in surface pixels.
    Linear {
        /// Gradient origin.
        start: Point,
        /// Gradient end.
        end: Point,
        /// Ordered stops.
        stops: SmallVec<[GradientStop; 3]>,
    },
    /// Radial gradient between two concentric circles.
    Radial {
        /// Shared center.
        center: Point,
        /// Radius where the first stop applies.
        inner_radius: f64,
        /// Radius where the last stop applies.
        outer_radius: f64,
        /// Ordered stops.
        stops: SmallVec<[GradientStop; 3]>,
    },
}

/// Blurred, offset copy of a shape drawn beneath it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropShadow {
    /// Shadow color.
    pub color: Rgba8,
    /// Blur extent in pixels; the gaussian sigma is half of it.
    pub blur_px: f64,
    /// Offset from the casting shape.
    pub offset: Vec2,
}

/// Drop-shadow settings shared by every frame render.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShadowOpts {
    /// Blur extent in pixels.
    pub blur_px: f64,
    /// Horizontal offset.
    pub offset_x: f64,
    /// Vertical offset.
    pub offset_y: f64,
}

impl Default for ShadowOpts {
    fn default() -> Self {
        Self {
            blur_px: 20.0,
            offset_x: 5.0,
            offset_y: 5.0,
        }
    }
}

/// What a draw op depicts. Lets callers and tests reason about a plan without pixel math.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawRole {
    /// Room wall or high-contrast backdrop.
    Background,
    /// Ambient lighting overlay.
    Ambient,
    /// Spotlight vignette.
    Vignette,
    /// Outer moulding.
    Frame,
    /// One mat board.
    Mat(LayerKind),
    /// Neutral fill standing in for missing artwork.
    Placeholder,
    /// Placeholder caption.
    Caption,
    /// Decoded artwork image.
    Artwork,
    /// Glass reflection gradient.
    GlassReflection,
    /// Glare ellipse.
    Glare,
}

/// Geometry and paint of one draw.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawKind {
    /// Fill an axis-aligned rectangle, optionally casting a drop shadow first.
    FillRect {
        /// Target rectangle.
        rect: LayerRect,
        /// Fill style.
        paint: Paint,
        /// Shadow drawn beneath the fill.
        shadow: Option<DropShadow>,
    },
    /// Fill a rotated ellipse.
    FillEllipse {
        /// Ellipse in surface pixels.
        ellipse: Ellipse,
        /// Fill color.
        color: Rgba8,
    },
    /// Draw the artwork image stretched into `dest`.
    Image {
        /// Destination rectangle.
        dest: LayerRect,
        /// Image identity.
        image: ImageKey,
    },
    /// Draw a single line of text centered on `center`.
    Text {
        /// Text content.
        text: String,
        /// Visual center of the text block.
        center: Point,
        /// Font size in pixels.
        size_px: f32,
        /// Text color.
        color: Rgba8,
    },
}

/// A draw op tagged with its role.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawOp {
    /// What the op depicts.
    pub role: DrawRole,
    /// How to draw it.
    pub kind: DrawKind,
}

/// Ordered, backend-agnostic draw list for one composite.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawPlan {
    /// Target canvas.
    pub canvas: Canvas,
    /// Ops in painter's order.
    pub ops: Vec<DrawOp>,
}

impl DrawPlan {
    /// Roles in draw order.
    pub fn roles(&self) -> Vec<DrawRole> {
        self.ops.iter().map(|op| op.role).collect()
    }

    /// First op with `role`.
    pub fn find(&self, role: DrawRole) -> Option<&DrawOp> {
        self.ops.iter().find(|op| op.role == role)
    }

    /// Stable content hash of the plan.
    pub fn fingerprint(&self) -> PlanFingerprint {
        fingerprint_plan(self)
    }
}

/// Colors of the three mat slots. Only slots present in the layer list are drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatColors {
    /// Top mat.
    pub top: Rgba8,
    /// Middle mat.
    pub middle: Rgba8,
    /// Bottom mat.
    pub bottom: Rgba8,
}

impl Default for MatColors {
    fn default() -> Self {
        Self {
            top: Rgba8::rgb(0xF5, 0xF5, 0xF5),
            middle: Rgba8::rgb(0xE0, 0xE0, 0xE0),
            bottom: Rgba8::rgb(0xF0, 0xF0, 0xF0),
        }
    }
}

impl MatColors {
    fn for_kind(&self, kind: LayerKind) -> Rgba8 {
        match kind {
            LayerKind::BottomMat => self.bottom,
            LayerKind::MiddleMat => self.middle,
            LayerKind::TopMat | LayerKind::Frame => self.top,
        }
    }
}

/// What fills the artwork box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtworkPaint {
    /// Neutral placeholder and caption.
    Placeholder,
    /// Decoded image.
    Image(ImageKey),
}

/// Everything the compositor needs for one frame.
#[derive(Clone, Debug)]
pub struct CompositeInput<'a> {
    /// Target canvas.
    pub canvas: Canvas,
    /// Resolved geometry.
    pub layers: &'a FrameLayers,
    /// Resolved lighting.
    pub lighting: LightingProfile,
    /// Room behind the frame.
    pub room: RoomStyle,
    /// Moulding color.
    pub frame_color: Rgba8,
    /// Mat colors.
    pub mat_colors: MatColors,
    /// Whether a glass option is selected.
    pub glass: bool,
    /// Artwork image or placeholder.
    pub artwork: ArtworkPaint,
    /// Accessibility rendering.
    pub high_contrast: bool,
    /// Frame drop shadow.
    pub shadow: ShadowOpts,
}

/// Compile one composite into a [`DrawPlan`].
///
/// The op order is fixed: background, ambient, vignette, frame, mats (outermost first), artwork
/// or placeholder, glass reflection, glare. High contrast drops every lighting effect and forces
/// the frame white and the mats gray.
pub fn compile_composite(input: &CompositeInput<'_>) -> DrawPlan {
    let hc = input.high_contrast;
    let canvas_rect = LayerRect::from(input.canvas.bounds());
    let mut ops = Vec::with_capacity(12);
    let mut fill = |role: DrawRole, rect: LayerRect, paint: Paint, shadow: Option<DropShadow>| {
        ops.push(DrawOp {
            role,
            kind: DrawKind::FillRect {
                rect,
                paint,
                shadow,
            },
        });
    };

    let wall = if hc {
        HIGH_CONTRAST_BACKGROUND
    } else {
        input.room.palette().wall
    };
    fill(DrawRole::Background, canvas_rect, Paint::Solid(wall), None);

    if !hc {
        fill(
            DrawRole::Ambient,
            canvas_rect,
            Paint::Solid(input.lighting.ambient),
            None,
        );
        if input.lighting.wants_vignette() {
            fill(
                DrawRole::Vignette,
                canvas_rect,
                spotlight_vignette(input.canvas),
                None,
            );
        }
    }

    let (frame_color, shadow) = if hc {
        (HIGH_CONTRAST_FRAME, None)
    } else {
        let shadow = DropShadow {
            color: input.lighting.shadow,
            blur_px: input.shadow.blur_px.max(0.0),
            offset: Vec2::new(input.shadow.offset_x, input.shadow.offset_y),
        };
        (input.frame_color, Some(shadow))
    };
    fill(
        DrawRole::Frame,
        input.layers.frame(),
        Paint::Solid(frame_color),
        shadow,
    );

    for mat in input.layers.mats() {
        let color = if hc {
            HIGH_CONTRAST_MAT
        } else {
            input.mat_colors.for_kind(mat.kind)
        };
        fill(DrawRole::Mat(mat.kind), mat.rect, Paint::Solid(color), None);
    }

    let art_box = input.layers.artwork_box();
    match input.artwork {
        ArtworkPaint::Image(image) => ops.push(DrawOp {
            role: DrawRole::Artwork,
            kind: DrawKind::Image {
                dest: art_box,
                image,
            },
        }),
        ArtworkPaint::Placeholder => {
            ops.push(DrawOp {
                role: DrawRole::Placeholder,
                kind: DrawKind::FillRect {
                    rect: art_box,
                    paint: Paint::Solid(PLACEHOLDER_FILL),
                    shadow: None,
                },
            });
            let (cx, cy) = art_box.center();
            ops.push(DrawOp {
                role: DrawRole::Caption,
                kind: DrawKind::Text {
                    text: PLACEHOLDER_CAPTION.to_owned(),
                    center: Point::new(cx, cy),
                    size_px: PLACEHOLDER_CAPTION_PX,
                    color: PLACEHOLDER_TEXT,
                },
            });
        }
    }

    if input.glass && !hc {
        let opening = input.layers.opening();
        let a = input.lighting.glass_opacity();
        let white = |alpha: f32| Rgba8::rgb(255, 255, 255).with_alpha_f(alpha);
        ops.push(DrawOp {
            role: DrawRole::GlassReflection,
            kind: DrawKind::FillRect {
                rect: art_box,
                paint: Paint::Linear {
                    start: Point::new(opening.x, opening.y),
                    end: Point::new(opening.right(), opening.bottom()),
                    stops: smallvec![
                        GradientStop {
                            offset: 0.0,
                            color: white(a),
                        },
                        GradientStop {
                            offset: 0.5,
                            color: white(0.0),
                        },
                        GradientStop {
                            offset: 1.0,
                            color: white(a / 2.0),
                        },
                    ],
                },
                shadow: None,
            },
        });

        if input.lighting.condition.casts_glare() {
            let center = Point::new(
                opening.x + opening.width * 0.3,
                opening.y + opening.height * 0.3,
            );
            let radii = Vec2::new(art_box.width * 0.1, art_box.height * 0.05);
            ops.push(DrawOp {
                role: DrawRole::Glare,
                kind: DrawKind::FillEllipse {
                    ellipse: Ellipse::new(center, radii, std::f64::consts::FRAC_PI_4),
                    color: input.lighting.highlight,
                },
            });
        }
    }

    DrawPlan {
        canvas: input.canvas,
        ops,
    }
}

fn spotlight_vignette(canvas: Canvas) -> Paint {
    Paint::Radial {
        center: canvas.center(),
        inner_radius: 10.0,
        outer_radius: f64::from(canvas.width) * 0.7,
        stops: smallvec![
            GradientStop {
                offset: 0.0,
                color: Rgba8::rgba_f(255, 255, 255, 0.7),
            },
            GradientStop {
                offset: 1.0,
                color: Rgba8::rgba_f(0, 0, 0, 0.5),
            },
        ],
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/plan.rs"]
mod tests;
