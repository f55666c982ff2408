use std::io::Cursor;

use crate::foundation::error::{SketchError, SketchResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::render::backend::FrameRGBA;

/// Copy `frame` into a straight-alpha RGBA8 image.
pub(crate) fn straight_rgba8(frame: &FrameRGBA) -> SketchResult<image::RgbaImage> {
    let expected = (frame.width as usize) * (frame.height as usize) * 4;
    if frame.data.len() != expected {
        return Err(SketchError::encode(format!(
            "frame data is {} bytes, expected {expected} for {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }
    let mut data = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut data);
    }
    image::RgbaImage::from_raw(frame.width, frame.height, data)
        .ok_or_else(|| SketchError::encode("frame buffer does not match its dimensions"))
}

/// Encode one frame as PNG bytes.
#[tracing::instrument(skip(frame), fields(width = frame.width, height = frame.height))]
pub fn encode_png(frame: &FrameRGBA) -> SketchResult<Vec<u8>> {
    let img = straight_rgba8(frame)?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| SketchError::encode(format!("png encoding failed: {e}")))?;
    tracing::debug!(bytes = buf.len(), "encoded png");
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
