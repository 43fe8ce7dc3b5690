use std::path::Path;

use anyhow::Context;

use crate::assets::decode::{PreparedImage, unpremultiply_rgba8_in_place};
use crate::compile::plan::{DrawPlan, ImageKey};
use crate::foundation::core::Canvas;
use crate::foundation::error::{FramesmithError, FramesmithResult};
use crate::render::cpu::{CpuBackend, CpuBackendOpts};

/// Pixel target owned by the compositor.
///
/// Pixels are **premultiplied** RGBA8, tightly packed, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterSurface {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 bytes.
    pub data: Vec<u8>,
}

impl RasterSurface {
    /// Transparent surface sized to `canvas`.
    pub fn new(canvas: Canvas) -> Self {
        let len = (canvas.width as usize)
            .saturating_mul(canvas.height as usize)
            .saturating_mul(4);
        Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![0; len],
        }
    }

    /// Canvas of this surface.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy suitable for image encoders.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        unpremultiply_rgba8_in_place(&mut out);
        out
    }

    /// Encode as PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> FramesmithResult<()> {
        let path = path.as_ref();
        let img = image::RgbaImage::from_raw(self.width, self.height, self.to_straight_rgba8())
            .ok_or_else(|| FramesmithError::render("surface buffer size mismatch"))?;
        img.save(path)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// Decoded artwork paired with the key the plan refers to it by.
#[derive(Clone, Copy, Debug)]
pub struct ArtworkRef<'a> {
    /// Key carried by `DrawKind::Image` ops.
    pub key: ImageKey,
    /// Decoded pixels.
    pub image: &'a PreparedImage,
}

/// A rasterizer that executes a [`DrawPlan`] into a [`RasterSurface`].
pub trait DrawBackend {
    /// Execute every op of `plan` in order, replacing the surface contents.
    fn render_plan(
        &mut self,
        plan: &DrawPlan,
        artwork: Option<ArtworkRef<'_>>,
        target: &mut RasterSurface,
    ) -> FramesmithResult<()>;
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    /// CPU raster backend powered by `vello_cpu`.
    #[default]
    Cpu,
}

/// Create a rendering backend implementation.
pub fn create_backend(kind: BackendKind, opts: CpuBackendOpts) -> Box<dyn DrawBackend> {
    match kind {
        BackendKind::Cpu => Box::new(CpuBackend::new(opts)),
    }
}
