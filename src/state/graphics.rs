use std::sync::Arc;

use kurbo::{Cap, Join, Stroke};

use crate::foundation::core::{LineCap, LineJoin, Rgba};
use crate::path::bezier::BezierPath;

/// Font size used until a drawing sets one.
pub const DEFAULT_FONT_SIZE: f64 = 10.0;

/// Every setting that `save`/`restore` scope.
///
/// A fresh state is fully specified: opaque black fill, no stroke, 1-unit miter-joined butt-capped
/// solid strokes with a miter limit of 10, no active path and the system font at 10 points.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphicsState {
    /// Fill color, or `None` for no fill.
    pub fill_color: Option<Rgba>,
    /// Stroke color, or `None` for no stroke.
    pub stroke_color: Option<Rgba>,
    /// Stroke width in user units.
    pub stroke_width: f64,
    /// Miter limit for [`LineJoin::Miter`].
    pub miter_limit: f64,
    /// Corner style.
    pub line_join: LineJoin,
    /// End style.
    pub line_cap: LineCap,
    /// Dash pattern, or `None` for solid strokes.
    pub line_dash: Option<Vec<f64>>,
    /// Most recently drawn path.
    pub path: Option<Arc<BezierPath>>,
    /// Font name, or `None` for the system default.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: f64,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            fill_color: Some(Rgba::BLACK),
            stroke_color: None,
            stroke_width: 1.0,
            miter_limit: 10.0,
            line_join: LineJoin::Miter,
            line_cap: LineCap::Butt,
            line_dash: None,
            path: None,
            font_name: None,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl GraphicsState {
    /// Snapshot for the state stack.
    ///
    /// Every field is copied explicitly; the active path is shared immutably, everything else is
    /// owned by the copy.
    pub fn snapshot(&self) -> Self {
        Self {
            fill_color: self.fill_color,
            stroke_color: self.stroke_color,
            stroke_width: self.stroke_width,
            miter_limit: self.miter_limit,
            line_join: self.line_join,
            line_cap: self.line_cap,
            line_dash: self.line_dash.clone(),
            path: self.path.clone(),
            font_name: self.font_name.clone(),
            font_size: self.font_size,
        }
    }

    /// Stroke style built from width, miter limit, join, cap and dash.
    pub fn stroke_style(&self) -> Stroke {
        let join = match self.line_join {
            LineJoin::Miter => Join::Miter,
            LineJoin::Round => Join::Round,
            LineJoin::Bevel => Join::Bevel,
        };
        let cap = match self.line_cap {
            LineCap::Butt => Cap::Butt,
            LineCap::Round => Cap::Round,
            LineCap::Square => Cap::Square,
        };
        let stroke = Stroke::new(self.stroke_width)
            .with_miter_limit(self.miter_limit)
            .with_join(join)
            .with_caps(cap);
        match &self.line_dash {
            Some(dashes) => stroke.with_dashes(0.0, dashes.iter().copied()),
            None => stroke,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/graphics.rs"]
mod tests;
