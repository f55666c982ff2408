use std::collections::HashMap;

use kurbo::{Cap, Join, Shape, Stroke};

use crate::foundation::core::{Affine, BezPath, Canvas, Rect, Rgba};
use crate::foundation::error::{SketchError, SketchResult};
use crate::render::backend::{Backend, FrameRGBA, TextRun};
use crate::render::text::{TextBrushRgba8, TextLayoutEngine};

/// Options for the CPU backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuBackendOpts {
    pub(crate) clear_rgba: Option<[u8; 4]>,
}

impl CpuBackendOpts {
    /// Return options that clear every page to `clear` (straight-alpha RGBA8) before drawing.
    pub fn with_clear_rgba(mut self, clear: Option<[u8; 4]>) -> Self {
        self.clear_rgba = clear;
        self
    }
}

struct OpenPage {
    canvas: Canvas,
    ctx: vello_cpu::RenderContext,
}

/// CPU raster backend powered by `vello_cpu`.
///
/// Each finished page is read back into a premultiplied [`FrameRGBA`] and kept in page order.
pub struct CpuBackend {
    opts: CpuBackendOpts,

    page: Option<OpenPage>,
    spare_ctx: Option<vello_cpu::RenderContext>,
    transform: Affine,
    gstack: Vec<Affine>,

    text_engine: TextLayoutEngine,
    font_cache: HashMap<(u64, u32), vello_cpu::peniko::FontData>,

    frames: Vec<FrameRGBA>,
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new(CpuBackendOpts::default())
    }
}

impl std::fmt::Debug for CpuBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuBackend")
            .field("opts", &self.opts)
            .field("page", &self.page.as_ref().map(|p| p.canvas))
            .field("depth", &self.gstack.len())
            .field("frames", &self.frames.len())
            .finish_non_exhaustive()
    }
}

impl CpuBackend {
    /// Create a backend with no page open.
    pub fn new(opts: CpuBackendOpts) -> Self {
        Self {
            opts,
            page: None,
            spare_ctx: None,
            transform: Affine::IDENTITY,
            gstack: Vec::new(),
            text_engine: TextLayoutEngine::new(),
            font_cache: HashMap::new(),
            frames: Vec::new(),
        }
    }

    /// Finished pages in page order.
    pub fn frames(&self) -> &[FrameRGBA] {
        &self.frames
    }

    /// Most recently finished page.
    pub fn last_frame(&self) -> Option<&FrameRGBA> {
        self.frames.last()
    }

    /// Take ownership of the finished pages, leaving none behind.
    pub fn take_frames(&mut self) -> Vec<FrameRGBA> {
        std::mem::take(&mut self.frames)
    }

    /// Return `true` while a page surface is acquired.
    pub fn has_open_page(&self) -> bool {
        self.page.is_some()
    }

    fn acquire_ctx(&mut self, width: u16, height: u16) -> vello_cpu::RenderContext {
        let mut ctx = match self.spare_ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        ctx
    }

    fn page_ctx(&mut self) -> SketchResult<&mut vello_cpu::RenderContext> {
        let transform = affine_to_cpu(self.transform);
        let page = self
            .page
            .as_mut()
            .ok_or_else(|| SketchError::render("no page surface is open"))?;
        page.ctx.set_transform(transform);
        Ok(&mut page.ctx)
    }

    fn font_for(&mut self, blob_id: u64, bytes: &[u8], index: u32) -> vello_cpu::peniko::FontData {
        self.font_cache
            .entry((blob_id, index))
            .or_insert_with(|| {
                vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(bytes.to_vec()),
                    index,
                )
            })
            .clone()
    }
}

impl Backend for CpuBackend {
    fn begin_page(&mut self, canvas: Canvas) -> SketchResult<()> {
        if self.page.is_some() {
            return Err(SketchError::render(
                "begin_page called while a page is still open",
            ));
        }
        let w: u16 = canvas
            .width
            .try_into()
            .map_err(|_| SketchError::render("page width exceeds u16"))?;
        let h: u16 = canvas
            .height
            .try_into()
            .map_err(|_| SketchError::render("page height exceeds u16"))?;

        let mut ctx = self.acquire_ctx(w, h);
        if let Some([r, g, b, a]) = self.opts.clear_rgba {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(w),
                f64::from(h),
            ));
        }
        self.transform = Affine::IDENTITY;
        self.gstack.clear();
        self.page = Some(OpenPage { canvas, ctx });
        Ok(())
    }

    fn end_page(&mut self) -> SketchResult<()> {
        let Some(OpenPage { canvas, mut ctx }) = self.page.take() else {
            return Err(SketchError::render("end_page called with no open page"));
        };
        let mut pixmap = vello_cpu::Pixmap::new(ctx.width(), ctx.height());
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        self.frames.push(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        });
        self.spare_ctx = Some(ctx);
        self.gstack.clear();
        Ok(())
    }

    fn save_gstate(&mut self) -> SketchResult<()> {
        self.gstack.push(self.transform);
        Ok(())
    }

    fn restore_gstate(&mut self) -> SketchResult<()> {
        self.transform = self
            .gstack
            .pop()
            .ok_or_else(|| SketchError::render("backend state stack underflow"))?;
        Ok(())
    }

    fn concat_transform(&mut self, affine: Affine) -> SketchResult<()> {
        self.transform *= affine;
        Ok(())
    }

    fn fill_path(&mut self, path: &BezPath, color: Rgba) -> SketchResult<()> {
        let ctx = self.page_ctx()?;
        ctx.set_fill_rule(vello_cpu::peniko::Fill::NonZero);
        ctx.set_paint(color_to_cpu(color));
        ctx.fill_path(&bezpath_to_cpu(path));
        Ok(())
    }

    fn stroke_path(&mut self, path: &BezPath, color: Rgba, stroke: &Stroke) -> SketchResult<()> {
        let ctx = self.page_ctx()?;
        ctx.set_paint(color_to_cpu(color));
        ctx.set_stroke(stroke_to_cpu(stroke));
        ctx.stroke_path(&bezpath_to_cpu(path));
        Ok(())
    }

    fn draw_text(&mut self, run: &TextRun<'_>) -> SketchResult<()> {
        if self.page.is_none() {
            return Err(SketchError::render("no page surface is open"));
        }
        let layout = self.text_engine.layout_in_box(
            run.text,
            run.font,
            TextBrushRgba8::from(run.color),
            run.width as f32,
        )?;

        let mut glyph_runs = Vec::new();
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let run_font = glyph_run.run().font();
                let font =
                    self.font_for(run_font.data.id(), run_font.data.data(), run_font.index);
                let brush = glyph_run.style().brush;
                let glyphs: Vec<vello_cpu::Glyph> = glyph_run
                    .positioned_glyphs()
                    .map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    })
                    .collect();
                glyph_runs.push((font, glyph_run.run().font_size(), brush, glyphs));
            }
        }

        let clip = bezpath_to_cpu(&Rect::new(0.0, 0.0, run.width, run.height).to_path(0.1));
        let ctx = self.page_ctx()?;
        ctx.push_clip_layer(&clip);
        for (font, size, brush, glyphs) in glyph_runs {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            ctx.glyph_run(&font).font_size(size).fill_glyphs(glyphs.into_iter());
        }
        ctx.pop_layer();
        Ok(())
    }
}

fn color_to_cpu(c: Rgba) -> vello_cpu::peniko::Color {
    let [r, g, b, a] = c.to_rgba8();
    vello_cpu::peniko::Color::from_rgba8(r, g, b, a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn stroke_to_cpu(s: &Stroke) -> vello_cpu::kurbo::Stroke {
    let join = match s.join {
        Join::Bevel => vello_cpu::kurbo::Join::Bevel,
        Join::Miter => vello_cpu::kurbo::Join::Miter,
        Join::Round => vello_cpu::kurbo::Join::Round,
    };
    let cap = |c: Cap| match c {
        Cap::Butt => vello_cpu::kurbo::Cap::Butt,
        Cap::Round => vello_cpu::kurbo::Cap::Round,
        Cap::Square => vello_cpu::kurbo::Cap::Square,
    };
    let mut out = vello_cpu::kurbo::Stroke::new(s.width)
        .with_miter_limit(s.miter_limit)
        .with_join(join)
        .with_start_cap(cap(s.start_cap))
        .with_end_cap(cap(s.end_cap));
    if !s.dash_pattern.is_empty() {
        out = out.with_dashes(s.dash_offset, s.dash_pattern.iter().copied());
    }
    out
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
