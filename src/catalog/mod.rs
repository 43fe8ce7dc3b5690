//! Material catalogs: injected option lists with a compiled-in fallback.

pub(crate) mod defaults;
pub(crate) mod material;

use std::collections::HashSet;
use std::path::Path;

use crate::catalog::material::{
    FrameRecord, GlassRecord, MatRecord, MaterialKind, MaterialOption,
};
use crate::foundation::error::{FramesmithError, FramesmithResult};

/// Where a catalog list came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum CatalogSource {
    /// Records supplied by the catalog service.
    Fetched,
    /// Compiled-in default set.
    Defaults,
}

/// Raw catalog payload as returned by the storefront endpoints.
///
/// Every list is optional so a caller can forward whatever subset it managed to fetch.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct CatalogPayload {
    /// `/api/frame-options` records.
    #[serde(default)]
    pub frames: Vec<FrameRecord>,
    /// `/api/mat-options` records.
    #[serde(default)]
    pub mats: Vec<MatRecord>,
    /// `/api/glass-options` records.
    #[serde(default)]
    pub glass: Vec<GlassRecord>,
}

impl CatalogPayload {
    /// Parse a JSON payload.
    pub fn from_json_str(s: &str) -> FramesmithResult<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Resolved frame/mat/glass option lists.
///
/// Invariant: no list is empty. Empty inputs are replaced by the default set.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    frames: Vec<MaterialOption>,
    mats: Vec<MaterialOption>,
    glass: Vec<MaterialOption>,
    sources: [CatalogSource; 3],
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            frames: defaults::default_frames(),
            mats: defaults::default_mats(),
            glass: defaults::default_glass(),
            sources: [CatalogSource::Defaults; 3],
        }
    }
}

impl Catalog {
    /// Build from already-converted option lists, falling back per kind when a list is empty.
    pub fn from_options(
        frames: Vec<MaterialOption>,
        mats: Vec<MaterialOption>,
        glass: Vec<MaterialOption>,
    ) -> Self {
        let (frames, fs) = pick(MaterialKind::Frame, frames, defaults::default_frames);
        let (mats, ms) = pick(MaterialKind::Mat, mats, defaults::default_mats);
        let (glass, gs) = pick(MaterialKind::Glass, glass, defaults::default_glass);
        Self {
            frames,
            mats,
            glass,
            sources: [fs, ms, gs],
        }
    }

    /// Convert a fetched payload. Records with unusable fields are skipped and logged;
    /// duplicate ids keep the first occurrence.
    #[tracing::instrument(skip(payload), fields(
        frames = payload.frames.len(),
        mats = payload.mats.len(),
        glass = payload.glass.len()
    ))]
    pub fn from_payload(payload: CatalogPayload) -> Self {
        let frames = convert(MaterialKind::Frame, payload.frames);
        let mats = convert(MaterialKind::Mat, payload.mats);
        let glass = convert(MaterialKind::Glass, payload.glass);
        Self::from_options(frames, mats, glass)
    }

    /// Load a payload file and resolve it.
    pub fn from_path(path: impl AsRef<Path>) -> FramesmithResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            FramesmithError::validation(format!(
                "failed to read catalog '{}': {e}",
                path.display()
            ))
        })?;
        Ok(Self::from_payload(CatalogPayload::from_json_str(&s)?))
    }

    /// Option list for a kind.
    pub fn options(&self, kind: MaterialKind) -> &[MaterialOption] {
        match kind {
            MaterialKind::Frame => &self.frames,
            MaterialKind::Mat => &self.mats,
            MaterialKind::Glass => &self.glass,
        }
    }

    /// Source of the list for a kind.
    pub fn source(&self, kind: MaterialKind) -> CatalogSource {
        match kind {
            MaterialKind::Frame => self.sources[0],
            MaterialKind::Mat => self.sources[1],
            MaterialKind::Glass => self.sources[2],
        }
    }

    /// Number of options of a kind (always > 0).
    pub fn len(&self, kind: MaterialKind) -> usize {
        self.options(kind).len()
    }

    /// Always `false`; lists are never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Clamp `index` into range for `kind`.
    ///
    /// An out-of-range index means the previous selection is gone from the reloaded catalog;
    /// it resolves to 0.
    pub fn clamp_index(&self, kind: MaterialKind, index: usize) -> usize {
        let len = self.len(kind);
        if index < len {
            return index;
        }
        let err = FramesmithError::configuration(format!(
            "{kind:?} index {index} out of range (len {len})"
        ));
        tracing::warn!(%err, "selection reset to first option");
        0
    }

    /// Option at a clamped index.
    pub fn get(&self, kind: MaterialKind, index: usize) -> &MaterialOption {
        &self.options(kind)[self.clamp_index(kind, index)]
    }
}

fn pick(
    kind: MaterialKind,
    fetched: Vec<MaterialOption>,
    fallback: fn() -> Vec<MaterialOption>,
) -> (Vec<MaterialOption>, CatalogSource) {
    if fetched.is_empty() {
        tracing::debug!(?kind, "using compiled-in default options");
        (fallback(), CatalogSource::Defaults)
    } else {
        (fetched, CatalogSource::Fetched)
    }
}

fn convert<R>(kind: MaterialKind, records: Vec<R>) -> Vec<MaterialOption>
where
    R: TryInto<MaterialOption, Error = FramesmithError>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(records.len());
    for record in records {
        match record.try_into() {
            Ok(opt) => {
                if seen.insert(opt.id) {
                    out.push(opt);
                } else {
                    tracing::debug!(?kind, id = opt.id, "dropping duplicate catalog record");
                }
            }
            Err(err) => tracing::warn!(?kind, %err, "skipping unusable catalog record"),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/catalog.rs"]
mod tests;
