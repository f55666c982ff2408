//! Replay state machine.
//!
//! [`Machine`] owns the [`GraphicsState`] and the state stack for one replay pass and turns each
//! [`Instruction`] into [`Backend`] calls. [`replay`] drives it iteratively over a whole log; the
//! live view drives it recursively (see [`crate::render::view`]).

use std::sync::Arc;

use crate::foundation::core::{Canvas, Rect};
use crate::foundation::error::{SketchError, SketchResult};
use crate::foundation::math::{flip_y, scale_matrix, translate_matrix};
use crate::path::bezier::BezierPath;
use crate::record::instruction::Instruction;
use crate::record::log::InstructionLog;
use crate::render::backend::{Backend, FontRequest, TextRun};
use crate::state::graphics::GraphicsState;

/// Where the machine is in the page lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No page has been opened yet (or the last one was finished).
    Idle,
    /// A page surface is open with `depth` saved states on the stack.
    PageOpen {
        /// Number of open `save` scopes.
        depth: usize,
    },
}

/// Graphics-state machine shared by every replay flavor.
#[derive(Debug)]
pub struct Machine {
    state: GraphicsState,
    stack: Vec<GraphicsState>,
    page: Option<Canvas>,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    /// Idle machine with default state.
    pub fn new() -> Self {
        Self {
            state: GraphicsState::default(),
            stack: Vec::new(),
            page: None,
        }
    }

    /// Current graphics state.
    pub fn state(&self) -> &GraphicsState {
        &self.state
    }

    /// Number of saved states.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        match self.page {
            None => Phase::Idle,
            Some(_) => Phase::PageOpen {
                depth: self.stack.len(),
            },
        }
    }

    /// Size of the open page, if any.
    pub fn page(&self) -> Option<Canvas> {
        self.page
    }

    /// Execute one record, pairing `save`/`restore` with backend state checkpoints.
    pub fn execute<B: Backend>(
        &mut self,
        backend: &mut B,
        instruction: &Instruction,
    ) -> SketchResult<()> {
        match instruction {
            Instruction::Save => {
                self.push_state()?;
                backend.save_gstate()
            }
            Instruction::Restore => {
                self.pop_state()?;
                backend.restore_gstate()
            }
            other => self.apply(backend, other),
        }
    }

    /// Push a copy of the current state without touching the backend.
    pub(crate) fn push_state(&mut self) -> SketchResult<()> {
        self.require_page("save")?;
        self.stack.push(self.state.snapshot());
        Ok(())
    }

    /// Pop the most recent saved state without touching the backend.
    pub(crate) fn pop_state(&mut self) -> SketchResult<()> {
        self.state = self.stack.pop().ok_or_else(|| {
            SketchError::usage("can't restore graphics state: no matching save()")
        })?;
        Ok(())
    }

    /// Execute every record except `save`/`restore`.
    pub(crate) fn apply<B: Backend>(
        &mut self,
        backend: &mut B,
        instruction: &Instruction,
    ) -> SketchResult<()> {
        match instruction {
            Instruction::NewPage { canvas } => self.new_page(backend, *canvas),
            Instruction::Save | Instruction::Restore => Err(SketchError::usage(format!(
                "'{}' must be handled by the scope driver",
                instruction.name()
            ))),
            Instruction::Fill(color) => {
                self.require_page("fill")?;
                self.state.fill_color = *color;
                Ok(())
            }
            Instruction::Stroke(color) => {
                self.require_page("stroke")?;
                self.state.stroke_color = *color;
                Ok(())
            }
            Instruction::DrawPath(path) => self.draw_path(backend, path.as_ref()),
            Instruction::StrokeWidth(v) => {
                self.require_page("strokeWidth")?;
                self.state.stroke_width = *v;
                Ok(())
            }
            Instruction::MiterLimit(v) => {
                self.require_page("miterLimit")?;
                self.state.miter_limit = *v;
                Ok(())
            }
            Instruction::LineJoin(join) => {
                self.require_page("lineJoin")?;
                self.state.line_join = *join;
                Ok(())
            }
            Instruction::LineCap(cap) => {
                self.require_page("lineCap")?;
                self.state.line_cap = *cap;
                Ok(())
            }
            Instruction::LineDash(dash) => {
                self.require_page("lineDash")?;
                self.state.line_dash = dash.clone();
                Ok(())
            }
            Instruction::Font { name, size } => {
                self.require_page("font")?;
                self.state.font_name = Some(name.clone());
                if let Some(size) = size {
                    self.state.font_size = *size;
                }
                Ok(())
            }
            Instruction::FontSize(size) => {
                self.require_page("fontSize")?;
                self.state.font_size = *size;
                Ok(())
            }
            Instruction::TextBox { text, rect } => self.text_box(backend, text, *rect),
            Instruction::Transform(affine) => {
                self.require_page("transform")?;
                backend.concat_transform(*affine)
            }
        }
    }

    /// Finish the open page, if any. Unbalanced saves are unwound with a warning.
    pub fn finish_page<B: Backend>(&mut self, backend: &mut B) -> SketchResult<()> {
        if self.page.is_none() {
            return Ok(());
        }
        if !self.stack.is_empty() {
            tracing::warn!(open = self.stack.len(), "page ended with unbalanced save()");
            while self.stack.pop().is_some() {
                backend.restore_gstate()?;
            }
        }
        self.page = None;
        self.state = GraphicsState::default();
        backend.end_page()
    }

    fn new_page<B: Backend>(&mut self, backend: &mut B, canvas: Canvas) -> SketchResult<()> {
        if !self.stack.is_empty() {
            return Err(SketchError::usage(format!(
                "newPage while {} saved state(s) are still open",
                self.stack.len()
            )));
        }
        self.finish_page(backend)?;
        tracing::debug!(width = canvas.width, height = canvas.height, "begin page");
        backend.begin_page(canvas)?;
        self.state = GraphicsState::default();
        self.page = Some(canvas);
        backend.concat_transform(flip_y(f64::from(canvas.height)))
    }

    fn draw_path<B: Backend>(
        &mut self,
        backend: &mut B,
        path: Option<&Arc<BezierPath>>,
    ) -> SketchResult<()> {
        self.require_page("drawPath")?;
        if let Some(path) = path {
            self.state.path = Some(Arc::clone(path));
        }
        let Some(active) = &self.state.path else {
            return Ok(());
        };
        let geometry = active.as_bez_path();
        if let Some(fill) = self.state.fill_color {
            backend.fill_path(geometry, fill)?;
        }
        if let Some(stroke) = self.state.stroke_color {
            backend.stroke_path(geometry, stroke, &self.state.stroke_style())?;
        }
        Ok(())
    }

    fn text_box<B: Backend>(
        &mut self,
        backend: &mut B,
        text: &str,
        rect: Rect,
    ) -> SketchResult<()> {
        self.require_page("textBox")?;
        let Some(color) = self.state.fill_color else {
            tracing::debug!("textBox skipped: no fill color");
            return Ok(());
        };
        let font = FontRequest {
            name: self.state.font_name.clone(),
            size: self.state.font_size,
        };
        backend.scoped(|b| {
            b.concat_transform(translate_matrix(rect.x0, rect.y0 + rect.height()))?;
            b.concat_transform(scale_matrix(1.0, -1.0))?;
            b.draw_text(&TextRun {
                text,
                width: rect.width(),
                height: rect.height(),
                font: &font,
                color,
            })
        })
    }

    fn require_page(&self, op: &str) -> SketchResult<()> {
        if self.page.is_none() {
            return Err(SketchError::usage(format!("'{op}': no page is open")));
        }
        Ok(())
    }
}

/// Replay a whole log against `backend`, finishing every page.
///
/// When the log does not open with a page boundary, one sized `leading` is synthesized.
#[tracing::instrument(skip(backend, log))]
pub fn replay<B: Backend>(
    backend: &mut B,
    log: &InstructionLog,
    leading: Canvas,
) -> SketchResult<()> {
    let mut machine = Machine::new();
    let starts_with_page = matches!(log.iter().next(), Some(Instruction::NewPage { .. }));
    if !starts_with_page {
        machine.apply(backend, &Instruction::NewPage { canvas: leading })?;
    }
    for instruction in log.iter() {
        machine.execute(backend, instruction)?;
    }
    machine.finish_page(backend)
}

#[cfg(test)]
#[path = "../../tests/unit/render/replay.rs"]
mod tests;
