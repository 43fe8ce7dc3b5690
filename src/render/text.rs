use crate::foundation::core::Rgba8;
use crate::foundation::error::{FramesmithError, FramesmithResult};

/// Brush color carried through Parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrush {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgba8> for TextBrush {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Parley contexts reused across caption layouts.
pub(crate) struct CaptionLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    family: Option<String>,
}

impl Default for CaptionLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptionLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            family: None,
        }
    }

    /// Register the caption font once; later calls are no-ops.
    pub(crate) fn register_font(&mut self, font_bytes: &[u8]) -> FramesmithResult<()> {
        if self.family.is_some() {
            return Ok(());
        }
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| FramesmithError::asset_load("no font families in caption font"))?;
        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| FramesmithError::asset_load("caption font family has no name"))?
            .to_string();
        self.family = Some(name);
        Ok(())
    }

    /// Shape a single unbroken line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrush,
    ) -> FramesmithResult<parley::Layout<TextBrush>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(FramesmithError::validation(
                "caption size must be finite and > 0",
            ));
        }
        let family = self
            .family
            .clone()
            .ok_or_else(|| FramesmithError::render("caption font not registered"))?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}
