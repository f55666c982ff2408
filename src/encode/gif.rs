use std::time::Duration;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};

use crate::encode::png::straight_rgba8;
use crate::foundation::error::{SketchError, SketchResult};
use crate::render::backend::FrameRGBA;

/// Encode `frames` as a looping GIF, each shown for `frame_duration`.
///
/// The logical screen is the largest frame; smaller frames are anchored top-left on a
/// transparent background.
#[tracing::instrument(skip(frames), fields(frames = frames.len()))]
pub fn encode_gif(frames: &[FrameRGBA], frame_duration: Duration) -> SketchResult<Vec<u8>> {
    if frames.is_empty() {
        return Err(SketchError::encode("gif needs at least one frame"));
    }
    let width = frames.iter().map(|f| f.width).max().unwrap_or(0);
    let height = frames.iter().map(|f| f.height).max().unwrap_or(0);
    let delay = Delay::from_saturating_duration(frame_duration);

    let mut buf = Vec::new();
    {
        let mut encoder = GifEncoder::new_with_speed(&mut buf, 10);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| SketchError::encode(format!("gif setup failed: {e}")))?;
        for frame in frames {
            let img = fit_to(straight_rgba8(frame)?, width, height);
            encoder
                .encode_frame(Frame::from_parts(img, 0, 0, delay))
                .map_err(|e| SketchError::encode(format!("gif frame encoding failed: {e}")))?;
        }
    }
    tracing::debug!(bytes = buf.len(), width, height, "encoded gif");
    Ok(buf)
}

fn fit_to(img: RgbaImage, width: u32, height: u32) -> RgbaImage {
    if img.dimensions() == (width, height) {
        return img;
    }
    let mut out = RgbaImage::new(width, height);
    for (x, y, px) in img.enumerate_pixels() {
        out.put_pixel(x, y, *px);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
