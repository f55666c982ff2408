use std::sync::Arc;

use smallvec::SmallVec;

use crate::foundation::core::{Affine, Canvas, LineCap, LineJoin, Rect, Rgba};
use crate::foundation::error::{SketchError, SketchResult};
use crate::path::bezier::BezierPath;

/// One recorded drawing operation with its arguments.
///
/// Arguments are normalized before recording, so replay never re-interprets them.
#[derive(Clone, Debug, PartialEq)]
pub enum Instruction {
    /// Page (frame) boundary.
    NewPage {
        /// Size of the page that starts here.
        canvas: Canvas,
    },
    /// Push the graphics state.
    Save,
    /// Pop the graphics state.
    Restore,
    /// Set (`Some`) or clear (`None`) the fill color.
    Fill(Option<Rgba>),
    /// Set (`Some`) or clear (`None`) the stroke color.
    Stroke(Option<Rgba>),
    /// Make the path active (when given) and paint the active path.
    DrawPath(Option<Arc<BezierPath>>),
    /// Stroke width.
    StrokeWidth(f64),
    /// Miter limit.
    MiterLimit(f64),
    /// Corner style.
    LineJoin(LineJoin),
    /// End style.
    LineCap(LineCap),
    /// Dash pattern, `None` for solid.
    LineDash(Option<Vec<f64>>),
    /// Font name, with an optional size.
    Font {
        /// Font name.
        name: String,
        /// Font size, kept unchanged when `None`.
        size: Option<f64>,
    },
    /// Font size.
    FontSize(f64),
    /// Text drawn top-down inside `rect` with the current fill color.
    TextBox {
        /// Text to draw.
        text: String,
        /// Box in drawing coordinates (bottom-left origin).
        rect: Rect,
    },
    /// Concatenate an affine matrix onto the current transform.
    Transform(Affine),
}

impl Instruction {
    /// Operation identifier, as used in the drawing API.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NewPage { .. } => "newPage",
            Self::Save => "save",
            Self::Restore => "restore",
            Self::Fill(_) => "fill",
            Self::Stroke(_) => "stroke",
            Self::DrawPath(_) => "drawPath",
            Self::StrokeWidth(_) => "strokeWidth",
            Self::MiterLimit(_) => "miterLimit",
            Self::LineJoin(_) => "lineJoin",
            Self::LineCap(_) => "lineCap",
            Self::LineDash(_) => "lineDash",
            Self::Font { .. } => "font",
            Self::FontSize(_) => "fontSize",
            Self::TextBox { .. } => "textBox",
            Self::Transform(_) => "transform",
        }
    }

    /// Return `true` for page and state-scope boundaries.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::NewPage { .. } | Self::Save | Self::Restore)
    }
}

/// Color argument for `fill` / `stroke`, accepted in any of the drawing API's arities.
///
/// | channels | meaning |
/// | --- | --- |
/// | `none` | no color |
/// | 1 | gray level, broadcast to r, g and b |
/// | 3 | r, g, b |
/// | 4 | r, g, b, a |
///
/// Alpha defaults to 1 and may be given separately with [`ColorArg::with_alpha`] for the 1- and
/// 3-channel forms. Two channels are rejected rather than guessed at.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorArg {
    channels: SmallVec<[f64; 4]>,
    alpha: Option<f64>,
    none: bool,
}

impl ColorArg {
    /// The "no color" sentinel.
    pub fn none() -> Self {
        Self {
            none: true,
            ..Self::default()
        }
    }

    /// Gray level.
    pub fn gray(v: f64) -> Self {
        Self::channels(&[v])
    }

    /// Opaque rgb.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::channels(&[r, g, b])
    }

    /// Rgba.
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self::channels(&[r, g, b, a])
    }

    /// Positional channel values of any arity; validated by [`ColorArg::normalize`].
    pub fn channels(values: &[f64]) -> Self {
        Self {
            channels: SmallVec::from_slice(values),
            ..Self::default()
        }
    }

    /// Explicit alpha for the 1- and 3-channel forms.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// Resolve to a concrete color, or `None` for "no color".
    pub fn normalize(&self) -> SketchResult<Option<Rgba>> {
        if self.none {
            return Ok(None);
        }
        let alpha = self.alpha.unwrap_or(1.0);
        match self.channels.as_slice() {
            [v] => Ok(Some(Rgba::gray(*v, alpha))),
            [r, g, b] => Ok(Some(Rgba::new(*r, *g, *b, alpha))),
            [r, g, b, a] => {
                if self.alpha.is_some() {
                    return Err(SketchError::usage(
                        "alpha given both as a fourth channel and explicitly",
                    ));
                }
                Ok(Some(Rgba::new(*r, *g, *b, *a)))
            }
            [_, _] => Err(SketchError::usage(
                "a color needs 1, 3 or 4 channel values, got 2; use gray(v).with_alpha(a)",
            )),
            other => Err(SketchError::usage(format!(
                "a color needs 1, 3 or 4 channel values, got {}",
                other.len()
            ))),
        }
    }
}

impl From<f64> for ColorArg {
    fn from(v: f64) -> Self {
        Self::gray(v)
    }
}

impl From<(f64, f64, f64)> for ColorArg {
    fn from((r, g, b): (f64, f64, f64)) -> Self {
        Self::rgb(r, g, b)
    }
}

impl From<(f64, f64, f64, f64)> for ColorArg {
    fn from((r, g, b, a): (f64, f64, f64, f64)) -> Self {
        Self::rgba(r, g, b, a)
    }
}

impl From<&[f64]> for ColorArg {
    fn from(values: &[f64]) -> Self {
        Self::channels(values)
    }
}

impl<const N: usize> From<[f64; N]> for ColorArg {
    fn from(values: [f64; N]) -> Self {
        Self::channels(&values)
    }
}

impl From<Rgba> for ColorArg {
    fn from(c: Rgba) -> Self {
        Self::rgba(c.r, c.g, c.b, c.a)
    }
}

impl From<Option<Rgba>> for ColorArg {
    fn from(v: Option<Rgba>) -> Self {
        v.map_or_else(Self::none, Into::into)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/record/instruction.rs"]
mod tests;
