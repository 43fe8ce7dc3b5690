use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{FramesmithError, FramesmithResult};

/// Decoded artwork pixels, premultiplied RGBA8, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 bytes, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Wrap already-premultiplied bytes, validating the buffer length.
    pub fn from_premul_bytes(width: u32, height: u32, bytes: Vec<u8>) -> FramesmithResult<Self> {
        if width == 0 || height == 0 {
            return Err(FramesmithError::asset_load("image has zero width or height"));
        }
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if bytes.len() != expected {
            return Err(FramesmithError::asset_load("image byte len mismatch"));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(bytes),
        })
    }
}

/// Largest artwork side the raster backend can sample from.
pub const MAX_IMAGE_SIDE: u32 = u16::MAX as u32;

/// Decode encoded image bytes (PNG, JPEG, ...) and convert to premultiplied RGBA8.
///
/// Failures, including images with a side longer than [`MAX_IMAGE_SIDE`], are reported as
/// [`FramesmithError::AssetLoad`] so callers can fall back to the placeholder layer.
pub fn decode_image(bytes: &[u8]) -> FramesmithResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .context("decode artwork from memory")
        .map_err(|e| FramesmithError::asset_load(format!("{e:#}")))?;
    if dyn_img.width() > MAX_IMAGE_SIDE || dyn_img.height() > MAX_IMAGE_SIDE {
        return Err(FramesmithError::asset_load(format!(
            "image {}x{} exceeds {MAX_IMAGE_SIDE}px per side",
            dyn_img.width(),
            dyn_img.height()
        )));
    }
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    PreparedImage::from_premul_bytes(width, height, rgba8_premul)
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

/// Undo premultiplication, e.g. before PNG encoding.
pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u32;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = (((*c as u32) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
