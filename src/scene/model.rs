use crate::foundation::error::{FramesmithError, FramesmithResult};

/// Nominal artwork size in inches. Immutable for the life of a designer session.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawArtworkSpec")]
pub struct ArtworkSpec {
    width: f64,
    height: f64,
}

#[derive(serde::Deserialize)]
struct RawArtworkSpec {
    width: f64,
    height: f64,
}

impl TryFrom<RawArtworkSpec> for ArtworkSpec {
    type Error = FramesmithError;

    fn try_from(raw: RawArtworkSpec) -> FramesmithResult<Self> {
        Self::new(raw.width, raw.height)
    }
}

impl ArtworkSpec {
    /// Validate and build. Both sides must be finite and > 0.
    pub fn new(width: f64, height: f64) -> FramesmithResult<Self> {
        if !(width.is_finite() && width > 0.0) {
            return Err(FramesmithError::validation("artwork width must be finite and > 0"));
        }
        if !(height.is_finite() && height > 0.0) {
            return Err(FramesmithError::validation("artwork height must be finite and > 0"));
        }
        Ok(Self { width, height })
    }

    /// Width in inches.
    pub fn width(self) -> f64 {
        self.width
    }

    /// Height in inches.
    pub fn height(self) -> f64 {
        self.height
    }

    /// Outside perimeter `2 * (width + height)` in inches.
    pub fn perimeter(self) -> f64 {
        2.0 * (self.width + self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
