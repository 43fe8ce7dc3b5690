use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, CatalogPayload};
use crate::foundation::error::{FramesmithError, FramesmithResult};
use crate::scene::model::ArtworkSpec;
use crate::scene::selection::SelectionState;
use crate::session::designer::DesignerOpts;

/// A saved design: everything needed to reproduce one preview offline.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct DesignFile {
    /// Artwork dimensions in inches.
    pub artwork: ArtworkSpec,
    /// Selection to render and price.
    #[serde(default)]
    pub selection: SelectionState,
    /// Fetched catalog records; omitted lists use the defaults.
    #[serde(default)]
    pub catalog: Option<CatalogPayload>,
    /// Artwork image, relative to the design file.
    #[serde(default)]
    pub image: Option<PathBuf>,
    /// Session options.
    #[serde(default)]
    pub opts: DesignerOpts,
}

impl DesignFile {
    /// Parse a design from JSON.
    pub fn from_json_str(s: &str) -> FramesmithResult<Self> {
        let design: Self = serde_json::from_str(s)?;
        design.opts.validate()?;
        Ok(design)
    }

    /// Load a design file.
    pub fn from_path(path: impl AsRef<Path>) -> FramesmithResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            FramesmithError::validation(format!("failed to read design '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&s)
    }

    /// Resolve the catalog, falling back to defaults per list.
    pub fn catalog(&self) -> Catalog {
        match &self.catalog {
            Some(payload) => Catalog::from_payload(payload.clone()),
            None => Catalog::default(),
        }
    }

    /// Image path resolved against `base_dir` when relative.
    pub fn image_path(&self, base_dir: &Path) -> Option<PathBuf> {
        self.image.as_ref().map(|p| {
            if p.is_absolute() {
                p.clone()
            } else {
                base_dir.join(p)
            }
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/design.rs"]
mod tests;
