use crate::assets::color;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{FramesmithError, FramesmithResult};

/// Which slot of the assembly a material fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    /// Outer moulding.
    Frame,
    /// Mat board.
    Mat,
    /// Glazing.
    Glass,
}

/// How a material is priced. All amounts are integral cents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "cents")]
pub enum Pricing {
    /// Rate per linear inch of artwork perimeter.
    PerInch(i64),
    /// Fixed price regardless of size.
    Flat(i64),
}

impl Pricing {
    /// Cents carried by the variant.
    pub fn cents(self) -> i64 {
        match self {
            Self::PerInch(c) | Self::Flat(c) => c,
        }
    }
}

/// A read-only catalog record for a frame, mat or glass option.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MaterialOption {
    /// Catalog id.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Fill color used by the compositor.
    #[serde(with = "color::css")]
    pub color: Rgba8,
    /// Price rule.
    pub pricing: Pricing,
    /// Free-form material description ("Solid Wood", "Brushed Aluminum", ...).
    #[serde(default)]
    pub material_label: Option<String>,
    /// Rendered border width at the reference canvas scale (frames only).
    #[serde(default = "default_border_px")]
    pub border_px: f64,
}

pub(crate) fn default_border_px() -> f64 {
    25.0
}

impl MaterialOption {
    /// Frame moulding priced per inch.
    pub fn frame(id: u32, name: &str, color: Rgba8, cents_per_inch: i64, label: &str) -> Self {
        Self {
            id,
            name: name.to_owned(),
            color,
            pricing: Pricing::PerInch(cents_per_inch),
            material_label: Some(label.to_owned()),
            border_px: default_border_px(),
        }
    }

    /// Flat-priced mat or glass option.
    pub fn flat(id: u32, name: &str, color: Rgba8, cents: i64) -> Self {
        Self {
            id,
            name: name.to_owned(),
            color,
            pricing: Pricing::Flat(cents),
            material_label: None,
            border_px: default_border_px(),
        }
    }

    /// Override the rendered border width.
    pub fn with_border_px(mut self, px: f64) -> Self {
        self.border_px = px;
        self
    }
}

/// Frame record as served by the storefront's `/api/frame-options` endpoint.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameRecord {
    /// Catalog id.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// CSS color string.
    pub color: String,
    /// Cents per inch.
    pub price_per_inch: i64,
    /// Material description.
    #[serde(default)]
    pub material: Option<String>,
    /// Optional rendered border width.
    #[serde(default)]
    pub width: Option<f64>,
}

/// Mat record as served by `/api/mat-options`.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct MatRecord {
    /// Catalog id.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// CSS color string.
    pub color: String,
    /// Flat price in cents.
    pub price: i64,
}

/// Glass record as served by `/api/glass-options`.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct GlassRecord {
    /// Catalog id.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Flat price in cents.
    pub price: i64,
}

fn non_negative(cents: i64, what: &str, id: u32) -> FramesmithResult<i64> {
    if cents < 0 {
        return Err(FramesmithError::validation(format!(
            "{what} {id} has a negative price"
        )));
    }
    Ok(cents)
}

impl TryFrom<FrameRecord> for MaterialOption {
    type Error = FramesmithError;

    fn try_from(r: FrameRecord) -> FramesmithResult<Self> {
        let border_px = r
            .width
            .filter(|w| w.is_finite() && *w > 0.0)
            .unwrap_or_else(default_border_px);
        Ok(Self {
            id: r.id,
            color: color::parse_css_color(&r.color)?,
            pricing: Pricing::PerInch(non_negative(r.price_per_inch, "frame", r.id)?),
            material_label: r.material,
            border_px,
            name: r.name,
        })
    }
}

impl TryFrom<MatRecord> for MaterialOption {
    type Error = FramesmithError;

    fn try_from(r: MatRecord) -> FramesmithResult<Self> {
        Ok(Self {
            id: r.id,
            color: color::parse_css_color(&r.color)?,
            pricing: Pricing::Flat(non_negative(r.price, "mat", r.id)?),
            material_label: None,
            border_px: default_border_px(),
            name: r.name,
        })
    }
}

impl TryFrom<GlassRecord> for MaterialOption {
    type Error = FramesmithError;

    fn try_from(r: GlassRecord) -> FramesmithResult<Self> {
        Ok(Self {
            id: r.id,
            color: Rgba8::rgb(255, 255, 255),
            pricing: Pricing::Flat(non_negative(r.price, "glass", r.id)?),
            material_label: None,
            border_px: default_border_px(),
            name: r.name,
        })
    }
}
