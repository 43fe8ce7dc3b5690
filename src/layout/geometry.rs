use smallvec::SmallVec;

use crate::foundation::core::{Canvas, LayerRect};
use crate::foundation::error::FramesmithError;
use crate::scene::model::ArtworkSpec;

/// Share of the canvas the artwork box may occupy.
pub const ARTWORK_CANVAS_FRACTION: f64 = 0.8;
/// Padding around the artwork image, as a fraction of the innermost box's shorter side.
pub const ARTWORK_PADDING_FRACTION: f64 = 0.05;
/// Widest frame border, as a fraction of the canvas's longer side.
pub const MAX_BORDER_CANVAS_FRACTION: f64 = 0.5;

/// Maps the integer reveal scale (1..=8) to a pixel inset at the reference canvas.
///
/// `px = clamp(scale * px_per_step, min_px, max_px)`; a scale of 0 maps to `min_px`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RevealMapping {
    /// Pixels added per reveal step.
    pub px_per_step: f64,
    /// Smallest inset; keeps every mat visible.
    pub min_px: f64,
    /// Largest inset.
    pub max_px: f64,
}

impl Default for RevealMapping {
    fn default() -> Self {
        Self {
            px_per_step: 3.0,
            min_px: 3.0,
            max_px: 24.0,
        }
    }
}

impl RevealMapping {
    /// Pixel inset for a reveal scale.
    pub fn to_px(&self, scale: u8) -> f64 {
        let min = if self.min_px.is_finite() && self.min_px > 0.0 {
            self.min_px
        } else {
            1.0
        };
        let max = self.max_px.max(min);
        (f64::from(scale) * self.px_per_step).clamp(min, max)
    }
}

/// Reveal scales for the mats that have one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Reveals {
    /// Reveal of the top mat over the mat (or frame edge) beneath it.
    pub top: u8,
    /// Reveal of the middle mat over the bottom mat.
    pub middle: u8,
}

/// Which optional mats participate in the geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MatFlags {
    /// Middle mat enabled.
    pub use_middle_mat: bool,
    /// Bottom mat enabled.
    pub use_bottom_mat: bool,
}

/// Identity of a resolved layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum LayerKind {
    /// Outer moulding bound.
    Frame,
    /// Bottom mat, fills the frame opening.
    BottomMat,
    /// Middle mat.
    MiddleMat,
    /// Top mat; also the artwork/glass bound.
    TopMat,
}

/// One resolved rectangle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Layer {
    /// Layer identity.
    pub kind: LayerKind,
    /// Absolute rectangle in surface pixels.
    pub rect: LayerRect,
}

/// Ordered layers, outermost first. Always starts with the frame and ends with the top mat.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameLayers {
    layers: SmallVec<[Layer; 4]>,
    opening: LayerRect,
}

impl FrameLayers {
    /// All layers, outermost to innermost.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Number of resolved layers (2..=4).
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Never empty.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Outer frame rectangle.
    pub fn frame(&self) -> LayerRect {
        self.layers[0].rect
    }

    /// Frame opening (inner edge of the moulding).
    pub fn opening(&self) -> LayerRect {
        self.opening
    }

    /// Mat layers only, outermost to innermost.
    pub fn mats(&self) -> &[Layer] {
        &self.layers[1..]
    }

    /// Layer rectangle by kind, if active.
    pub fn get(&self, kind: LayerKind) -> Option<LayerRect> {
        self.layers.iter().find(|l| l.kind == kind).map(|l| l.rect)
    }

    /// Innermost box: the top mat / artwork bound.
    pub fn innermost(&self) -> LayerRect {
        self.layers[self.layers.len() - 1].rect
    }

    /// Artwork image destination: the innermost box inset by 5% of its shorter side.
    pub fn artwork_box(&self) -> LayerRect {
        let inner = self.innermost();
        let pad = inner.width.min(inner.height) * ARTWORK_PADDING_FRACTION;
        checked(inner.inset_raw(pad), "artwork")
    }
}

/// Pure resolver from artwork size, frame border and mat configuration to layer rectangles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometryResolver {
    canvas: Canvas,
    reveal: RevealMapping,
}

impl GeometryResolver {
    /// Resolver for a canvas and reveal mapping.
    pub fn new(canvas: Canvas, reveal: RevealMapping) -> Self {
        Self { canvas, reveal }
    }

    /// Canvas this resolver lays out on.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Reveal mapping in use.
    pub fn reveal_mapping(&self) -> RevealMapping {
        self.reveal
    }

    /// Centered artwork box preserving the aspect ratio inside 80% of the canvas.
    pub fn artwork_bounds(&self, artwork: ArtworkSpec) -> LayerRect {
        let cw = f64::from(self.canvas.width);
        let ch = f64::from(self.canvas.height);
        let max_w = cw * ARTWORK_CANVAS_FRACTION;
        let max_h = ch * ARTWORK_CANVAS_FRACTION;
        let aspect = artwork.height() / artwork.width();

        let mut w = max_w;
        let mut h = w * aspect;
        if h > max_h {
            h = max_h;
            w = h / aspect;
        }
        checked(LayerRect::new((cw - w) / 2.0, (ch - h) / 2.0, w, h), "artwork bounds")
    }

    /// Frame border clamped into `[0, MAX_BORDER_CANVAS_FRACTION * longer canvas side]`.
    pub fn clamp_border(&self, frame_border_px: f64) -> f64 {
        if !frame_border_px.is_finite() {
            return 0.0;
        }
        let max = f64::from(self.canvas.width.max(self.canvas.height)) * MAX_BORDER_CANVAS_FRACTION;
        if frame_border_px > max {
            let err = FramesmithError::geometry(format!(
                "frame border {frame_border_px:.1}px exceeds {max:.1}px"
            ));
            tracing::debug!(%err, "clamping frame border");
            return max;
        }
        frame_border_px.max(0.0)
    }

    /// Resolve every active layer.
    ///
    /// Never fails: degenerate boxes are clamped to a 1px minimum and logged.
    pub fn resolve(
        &self,
        artwork: ArtworkSpec,
        frame_border_px: f64,
        reveals: Reveals,
        flags: MatFlags,
    ) -> FrameLayers {
        let opening = self.artwork_bounds(artwork);
        let border = self.clamp_border(frame_border_px);

        let mut layers = SmallVec::<[Layer; 4]>::new();
        layers.push(Layer {
            kind: LayerKind::Frame,
            rect: checked(opening.expand(border), "frame"),
        });

        // Each mat nests inside the one directly beneath it.
        let mut beneath = opening;
        if flags.use_bottom_mat {
            layers.push(Layer {
                kind: LayerKind::BottomMat,
                rect: opening,
            });
        }
        if flags.use_middle_mat {
            let rect = checked(beneath.inset_raw(self.reveal.to_px(reveals.middle)), "middle mat");
            layers.push(Layer {
                kind: LayerKind::MiddleMat,
                rect,
            });
            beneath = rect;
        }

        let top = if flags.use_bottom_mat || flags.use_middle_mat {
            checked(beneath.inset_raw(self.reveal.to_px(reveals.top)), "top mat")
        } else {
            opening
        };
        layers.push(Layer {
            kind: LayerKind::TopMat,
            rect: top,
        });

        FrameLayers { layers, opening }
    }
}

fn checked(rect: LayerRect, what: &str) -> LayerRect {
    if !rect.is_degenerate() {
        return rect;
    }
    let err = FramesmithError::geometry(format!(
        "{what} collapsed to {:.2}x{:.2}",
        rect.width, rect.height
    ));
    tracing::debug!(%err, "clamping layer to minimum size");
    rect.clamp_min_size()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
