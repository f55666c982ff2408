//! Recording facade.
//!
//! [`Drawing`] turns imperative drawing calls into [`Instruction`]s. Nothing is rendered until an
//! output is requested: [`Drawing::image_data`] replays the log into a raster context,
//! [`Drawing::live_view`] binds it to a host backend for on-demand redraws.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::encode::preview::{DisplayMode, Presenter};
use crate::foundation::core::{Affine, Canvas, CanvasSize, LineCap, LineJoin, Point, Rect};
use crate::foundation::error::{SketchError, SketchResult};
use crate::foundation::math::{
    rotate_matrix, scale_matrix, skew_matrix, translate_matrix, warn_if_centered,
};
use crate::path::bezier::BezierPath;
use crate::record::instruction::{ColorArg, Instruction};
use crate::record::log::InstructionLog;
use crate::render::backend::Backend;
use crate::render::context::{AnimationContext, ImageContext};
use crate::render::cpu::CpuBackendOpts;
use crate::render::view::ViewContext;

/// Session options.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawingOpts {
    /// Canvas size before any `size`/`new_page` call.
    pub canvas: Canvas,
    /// Size substituted for [`CanvasSize::Screen`].
    pub screen: Canvas,
    /// Display time of each animation frame.
    pub frame_duration: Duration,
    /// Background every page is cleared to (straight-alpha RGBA8), or transparent.
    pub clear_rgba: Option<[u8; 4]>,
}

impl Default for DrawingOpts {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            screen: Canvas {
                width: 1024,
                height: 768,
            },
            frame_duration: Duration::from_millis(100),
            clear_rgba: None,
        }
    }
}

impl DrawingOpts {
    /// Defaults overridden by `SKETCHLOG_SCREEN_SIZE` (`WxH`) and `SKETCHLOG_FRAME_MS`.
    ///
    /// Unparsable values are ignored.
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Some(screen) = std::env::var("SKETCHLOG_SCREEN_SIZE")
            .ok()
            .and_then(|v| parse_screen_size(&v))
        {
            opts.screen = screen;
        }
        if let Some(ms) = std::env::var("SKETCHLOG_FRAME_MS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|&ms| ms > 0)
        {
            opts.frame_duration = Duration::from_millis(ms);
        }
        opts
    }

    /// Set the initial canvas.
    pub fn with_canvas(mut self, canvas: Canvas) -> Self {
        self.canvas = canvas;
        self
    }

    /// Set the host screen size.
    pub fn with_screen(mut self, screen: Canvas) -> Self {
        self.screen = screen;
        self
    }

    /// Set the animation frame duration.
    pub fn with_frame_duration(mut self, frame_duration: Duration) -> Self {
        self.frame_duration = frame_duration;
        self
    }

    /// Set the page background.
    pub fn with_clear_rgba(mut self, clear: Option<[u8; 4]>) -> Self {
        self.clear_rgba = clear;
        self
    }

    fn cpu_opts(&self) -> CpuBackendOpts {
        CpuBackendOpts::default().with_clear_rgba(self.clear_rgba)
    }
}

fn parse_screen_size(v: &str) -> Option<Canvas> {
    let (w, h) = v.trim().split_once(['x', 'X'])?;
    Canvas::new(w.trim().parse().ok()?, h.trim().parse().ok()?).ok()
}

/// Encoded output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// Single PNG of the last page.
    Png,
    /// Looping GIF, one frame per page.
    Gif,
}

impl ImageFormat {
    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Gif => "gif",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageFormat {
    type Err = SketchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "gif" => Ok(Self::Gif),
            _ => Err(SketchError::usage(format!("format '{s}' is not supported"))),
        }
    }
}

/// A drawing session: current canvas plus the instruction log.
#[derive(Clone, Debug)]
pub struct Drawing {
    opts: DrawingOpts,
    canvas: Canvas,
    leading: Option<Canvas>,
    log: InstructionLog,
}

impl Default for Drawing {
    fn default() -> Self {
        Self::new(DrawingOpts::default())
    }
}

impl Drawing {
    /// Empty session.
    pub fn new(opts: DrawingOpts) -> Self {
        Self {
            canvas: opts.canvas,
            opts,
            leading: None,
            log: InstructionLog::new(),
        }
    }

    /// Session options.
    pub fn opts(&self) -> &DrawingOpts {
        &self.opts
    }

    /// Recorded instructions.
    pub fn log(&self) -> &InstructionLog {
        &self.log
    }

    /// Size of the implicit first page: the canvas in effect when the first record landed.
    pub fn leading_canvas(&self) -> Canvas {
        self.leading.unwrap_or(self.canvas)
    }

    fn record(&mut self, instruction: Instruction) {
        if self.log.is_empty() {
            self.leading = Some(self.canvas);
        }
        self.log.record(instruction);
    }

    // Canvas

    /// Set the canvas size. Fails once anything has been recorded.
    pub fn size(&mut self, size: impl Into<CanvasSize>) -> SketchResult<()> {
        if !self.log.is_empty() {
            return Err(SketchError::usage(
                "can't change the canvas size after drawing has started",
            ));
        }
        self.canvas = size.into().resolve(self.opts.screen)?;
        Ok(())
    }

    /// Current canvas width.
    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    /// Current canvas height.
    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    /// Discard everything recorded so far. The canvas size is kept.
    pub fn new_drawing(&mut self) {
        self.log.reset();
        self.leading = None;
    }

    /// Mark the end of a drawing. Recording can continue afterwards.
    pub fn end_drawing(&mut self) {
        tracing::debug!(records = self.log.len(), pages = self.log.page_count(), "end drawing");
    }

    /// Start a page, reusing the current size when `size` is `None`.
    pub fn new_page(&mut self, size: Option<CanvasSize>) -> SketchResult<()> {
        if let Some(size) = size {
            self.canvas = size.resolve(self.opts.screen)?;
        }
        if self.log.is_empty() {
            self.leading = Some(self.canvas);
        }
        self.log.begin_page(Instruction::NewPage {
            canvas: self.canvas,
        });
        Ok(())
    }

    // Colors

    /// Set the fill color; [`ColorArg::none`] disables filling.
    pub fn fill(&mut self, color: impl Into<ColorArg>) -> SketchResult<()> {
        let color = color.into().normalize()?;
        self.record(Instruction::Fill(color));
        Ok(())
    }

    /// Set the stroke color; [`ColorArg::none`] disables stroking.
    pub fn stroke(&mut self, color: impl Into<ColorArg>) -> SketchResult<()> {
        let color = color.into().normalize()?;
        self.record(Instruction::Stroke(color));
        Ok(())
    }

    // Shapes

    /// Draw `path`, or the most recently drawn path when `None`.
    pub fn draw_path(&mut self, path: impl Into<Option<BezierPath>>) {
        self.record(Instruction::DrawPath(path.into().map(Arc::new)));
    }

    /// Draw a rectangle.
    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let mut path = BezierPath::new();
        path.rect(x, y, w, h);
        self.draw_path(path);
    }

    /// Draw an oval inscribed in the rectangle.
    pub fn oval(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let mut path = BezierPath::new();
        path.oval(x, y, w, h);
        self.draw_path(path);
    }

    /// Draw a polyline through `points`, closed when `close` is set.
    pub fn polygon(&mut self, points: &[Point], close: bool) -> SketchResult<()> {
        let mut path = BezierPath::new();
        path.polygon(points, close)?;
        self.draw_path(path);
        Ok(())
    }

    /// Draw a line segment.
    pub fn line(&mut self, p1: impl Into<Point>, p2: impl Into<Point>) {
        let mut path = BezierPath::new();
        path.line(p1, p2);
        self.draw_path(path);
    }

    // Stroke style

    /// Set the stroke width. Negative or non-finite widths are rejected.
    pub fn stroke_width(&mut self, width: f64) -> SketchResult<()> {
        if !width.is_finite() || width < 0.0 {
            return Err(SketchError::usage(format!(
                "stroke width must be finite and not negative, got {width}"
            )));
        }
        self.record(Instruction::StrokeWidth(width));
        Ok(())
    }

    /// Set the miter limit.
    pub fn miter_limit(&mut self, limit: f64) {
        self.record(Instruction::MiterLimit(limit));
    }

    /// Set the corner style.
    pub fn line_join(&mut self, join: LineJoin) {
        self.record(Instruction::LineJoin(join));
    }

    /// Set the end style.
    pub fn line_cap(&mut self, cap: LineCap) {
        self.record(Instruction::LineCap(cap));
    }

    /// Set a dash pattern, or solid strokes with `None`.
    pub fn line_dash(&mut self, dash: Option<&[f64]>) -> SketchResult<()> {
        if dash.is_some_and(<[f64]>::is_empty) {
            return Err(SketchError::usage("lineDash: must supply a dash list or none"));
        }
        self.record(Instruction::LineDash(dash.map(<[f64]>::to_vec)));
        Ok(())
    }

    // Text

    /// Select a font by name, optionally with a size.
    pub fn font(&mut self, name: &str, size: Option<f64>) {
        self.record(Instruction::Font {
            name: name.to_owned(),
            size,
        });
    }

    /// Set the font size.
    pub fn font_size(&mut self, size: f64) {
        self.record(Instruction::FontSize(size));
    }

    /// Draw `text` inside `rect`. Alignment is not supported and must be `None`.
    pub fn text_box(&mut self, text: &str, rect: Rect, align: Option<&str>) -> SketchResult<()> {
        if let Some(align) = align {
            return Err(SketchError::usage(format!(
                "textBox: alignment '{align}' is not supported"
            )));
        }
        self.record(Instruction::TextBox {
            text: text.to_owned(),
            rect,
        });
        Ok(())
    }

    // State

    /// Push the graphics state.
    pub fn save(&mut self) {
        self.record(Instruction::Save);
    }

    /// Pop the graphics state. Unbalanced restores fail at replay.
    pub fn restore(&mut self) {
        self.record(Instruction::Restore);
    }

    /// Save now and restore when the guard is dropped.
    pub fn saved_state(&mut self) -> SavedState<'_> {
        self.save();
        SavedState { drawing: self }
    }

    /// Run `f` between a save and its restore.
    pub fn with_saved_state<R>(&mut self, f: impl FnOnce(&mut Drawing) -> R) -> R {
        let mut guard = self.saved_state();
        f(&mut *guard)
    }

    // Transforms

    /// Concatenate `matrix` into the current transform.
    pub fn transform(&mut self, matrix: Affine, center: Option<Point>) {
        warn_if_centered("transform", center);
        self.record(Instruction::Transform(matrix));
    }

    /// Move the origin.
    pub fn translate(&mut self, x: f64, y: f64) {
        self.transform(translate_matrix(x, y), None);
    }

    /// Rotate by `degrees`, counter-clockwise.
    pub fn rotate(&mut self, degrees: f64, center: Option<Point>) {
        self.transform(rotate_matrix(degrees.to_radians()), center);
    }

    /// Scale by `x` horizontally and `y` (or `x`) vertically.
    pub fn scale(&mut self, x: f64, y: Option<f64>, center: Option<Point>) {
        self.transform(scale_matrix(x, y.unwrap_or(x)), center);
    }

    /// Shear by two angles in degrees.
    pub fn skew(&mut self, x_degrees: f64, y_degrees: f64, center: Option<Point>) {
        self.transform(
            skew_matrix(x_degrees.to_radians(), y_degrees.to_radians()),
            center,
        );
    }

    // Output

    /// Encode the drawing as `format` (`"png"` or `"gif"`).
    pub fn image_data(&self, format: &str) -> SketchResult<Vec<u8>> {
        self.image_data_as(format.parse()?)
    }

    /// Encode the drawing.
    #[tracing::instrument(skip(self), fields(records = self.log.len()))]
    pub fn image_data_as(&self, format: ImageFormat) -> SketchResult<Vec<u8>> {
        let leading = self.leading_canvas();
        match format {
            ImageFormat::Png => {
                ImageContext::new(self.opts.cpu_opts()).image_data(&self.log, leading)
            }
            ImageFormat::Gif => {
                AnimationContext::new(self.opts.cpu_opts(), self.opts.frame_duration)
                    .image_data(&self.log, leading)
            }
        }
    }

    /// Render a PNG and hand it to `presenter`.
    pub fn display_image(
        &self,
        mode: DisplayMode,
        presenter: &mut impl Presenter,
    ) -> SketchResult<()> {
        let bytes = self.image_data_as(ImageFormat::Png)?;
        presenter.present(&bytes, mode)
    }

    /// Bind a snapshot of the drawing to `backend` for on-demand redraws.
    pub fn live_view<B: Backend>(&self, backend: B) -> ViewContext<B> {
        ViewContext::new(backend, &self.log, self.leading_canvas())
    }
}

/// Guard returned by [`Drawing::saved_state`]; records a restore when dropped.
#[derive(Debug)]
pub struct SavedState<'a> {
    drawing: &'a mut Drawing,
}

impl Deref for SavedState<'_> {
    type Target = Drawing;

    fn deref(&self) -> &Drawing {
        self.drawing
    }
}

impl DerefMut for SavedState<'_> {
    fn deref_mut(&mut self) -> &mut Drawing {
        self.drawing
    }
}

impl Drop for SavedState<'_> {
    fn drop(&mut self) {
        self.drawing.restore();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/drawing.rs"]
mod tests;
