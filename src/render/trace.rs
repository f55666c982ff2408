//! Backend that records calls instead of drawing.

use kurbo::{Affine, BezPath, Rect, Shape, Stroke};

use crate::foundation::core::{Canvas, Rgba};
use crate::foundation::error::{SketchError, SketchResult};
use crate::render::backend::{Backend, TextRun};

/// One recorded backend call.
#[derive(Clone, Debug, PartialEq)]
pub enum TraceEvent {
    /// `begin_page`.
    BeginPage(Canvas),
    /// `end_page`.
    EndPage,
    /// `save_gstate`.
    Save,
    /// `restore_gstate`.
    Restore,
    /// `concat_transform`.
    Transform(Affine),
    /// `fill_path`, with the path's bounding box.
    Fill {
        /// Untransformed path bounds.
        bounds: Rect,
        /// Fill color.
        color: Rgba,
    },
    /// `stroke_path`.
    Stroke {
        /// Untransformed path bounds.
        bounds: Rect,
        /// Stroke color.
        color: Rgba,
        /// Stroke width.
        width: f64,
        /// Dash pattern, empty for solid strokes.
        dashes: Vec<f64>,
    },
    /// `draw_text`.
    Text {
        /// Text content.
        text: String,
        /// Requested font name.
        font: Option<String>,
        /// Requested font size.
        size: f64,
        /// Text color.
        color: Rgba,
    },
}

/// Backend that appends every call to a list and tracks the transform stack.
#[derive(Clone, Debug, Default)]
pub struct TraceBackend {
    events: Vec<TraceEvent>,
    transform: Affine,
    stack: Vec<Affine>,
    page_open: bool,
}

impl TraceBackend {
    /// Empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call in order.
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Drain the recorded calls.
    pub fn take_events(&mut self) -> Vec<TraceEvent> {
        std::mem::take(&mut self.events)
    }

    /// Current total transform.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Current save depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Number of `begin_page` calls seen.
    pub fn page_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, TraceEvent::BeginPage(_)))
            .count()
    }
}

impl Backend for TraceBackend {
    fn begin_page(&mut self, canvas: Canvas) -> SketchResult<()> {
        if self.page_open {
            return Err(SketchError::render("begin_page while a page is open"));
        }
        self.page_open = true;
        self.transform = Affine::IDENTITY;
        self.stack.clear();
        self.events.push(TraceEvent::BeginPage(canvas));
        Ok(())
    }

    fn end_page(&mut self) -> SketchResult<()> {
        if !self.page_open {
            return Err(SketchError::render("end_page without an open page"));
        }
        self.page_open = false;
        self.events.push(TraceEvent::EndPage);
        Ok(())
    }

    fn save_gstate(&mut self) -> SketchResult<()> {
        self.stack.push(self.transform);
        self.events.push(TraceEvent::Save);
        Ok(())
    }

    fn restore_gstate(&mut self) -> SketchResult<()> {
        self.transform = self
            .stack
            .pop()
            .ok_or_else(|| SketchError::render("restore_gstate without save_gstate"))?;
        self.events.push(TraceEvent::Restore);
        Ok(())
    }

    fn concat_transform(&mut self, affine: Affine) -> SketchResult<()> {
        self.transform *= affine;
        self.events.push(TraceEvent::Transform(affine));
        Ok(())
    }

    fn fill_path(&mut self, path: &BezPath, color: Rgba) -> SketchResult<()> {
        self.events.push(TraceEvent::Fill {
            bounds: path.bounding_box(),
            color,
        });
        Ok(())
    }

    fn stroke_path(&mut self, path: &BezPath, color: Rgba, stroke: &Stroke) -> SketchResult<()> {
        self.events.push(TraceEvent::Stroke {
            bounds: path.bounding_box(),
            color,
            width: stroke.width,
            dashes: stroke.dash_pattern.iter().copied().collect(),
        });
        Ok(())
    }

    fn draw_text(&mut self, run: &TextRun<'_>) -> SketchResult<()> {
        self.events.push(TraceEvent::Text {
            text: run.text.to_owned(),
            font: run.font.name.clone(),
            size: run.font.size,
            color: run.color,
        });
        Ok(())
    }
}
