use kurbo::Stroke;

use crate::foundation::core::{Affine, BezPath, Canvas, Rgba};
use crate::foundation::error::SketchResult;

/// A rendered page as RGBA8 pixels.
///
/// Frames produced by [`crate::render::cpu::CpuBackend`] are **premultiplied alpha**; the
/// `premultiplied` flag makes this explicit at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major, top row first.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA8 bytes of the pixel at `(x, y)` (top-left origin).
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Font selection for a text run: an explicit name, or the system default.
#[derive(Clone, Debug, PartialEq)]
pub struct FontRequest {
    /// Family name; `None` selects the system UI font.
    pub name: Option<String>,
    /// Size in points.
    pub size: f64,
}

/// Text to draw inside a `width` x `height` box whose origin is the current top-left corner.
///
/// The replay machine sets up a top-down coordinate space before handing the run over, so
/// backends lay the text out from `(0, 0)` downwards.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun<'a> {
    /// Text content.
    pub text: &'a str,
    /// Box width.
    pub width: f64,
    /// Box height.
    pub height: f64,
    /// Font to resolve.
    pub font: &'a FontRequest,
    /// Text color.
    pub color: Rgba,
}

/// The host graphics API replay drives.
///
/// A backend owns a page surface between [`Backend::begin_page`] and [`Backend::end_page`], a
/// current transform, and a stack of saved backend states.
pub trait Backend {
    /// Acquire a surface for a new page with an identity transform and empty state stack.
    fn begin_page(&mut self, canvas: Canvas) -> SketchResult<()>;

    /// Finalize the open page.
    fn end_page(&mut self) -> SketchResult<()>;

    /// Push the backend state (transform).
    fn save_gstate(&mut self) -> SketchResult<()>;

    /// Pop the backend state pushed by the matching [`Backend::save_gstate`].
    fn restore_gstate(&mut self) -> SketchResult<()>;

    /// Concatenate `affine` onto the current transform.
    fn concat_transform(&mut self, affine: Affine) -> SketchResult<()>;

    /// Fill `path` (non-zero winding) with `color`.
    fn fill_path(&mut self, path: &BezPath, color: Rgba) -> SketchResult<()>;

    /// Stroke `path` with `color` and `stroke`.
    fn stroke_path(&mut self, path: &BezPath, color: Rgba, stroke: &Stroke) -> SketchResult<()>;

    /// Draw a text run constrained to its box.
    fn draw_text(&mut self, run: &TextRun<'_>) -> SketchResult<()>;

    /// Run `f` inside a saved backend state, restoring it afterwards even when `f` fails.
    fn scoped<R>(&mut self, f: impl FnOnce(&mut Self) -> SketchResult<R>) -> SketchResult<R>
    where
        Self: Sized,
    {
        self.save_gstate()?;
        let out = f(self);
        self.restore_gstate()?;
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
