use std::ops::AddAssign;

use kurbo::{Affine, BezPath, Ellipse, PathEl, Point, Rect, Shape};

use crate::foundation::error::{SketchError, SketchResult};
use crate::foundation::math::{
    rotate_matrix, scale_matrix, skew_matrix, translate_matrix, warn_if_centered,
    warn_not_implemented,
};

/// Tolerance used when flattening curved shapes (ovals, arcs) into cubic segments.
const SHAPE_TOLERANCE: f64 = 0.1;

/// An ordered, mutable geometric path.
///
/// Coordinates use the drawing's bottom-left origin. Once handed to [`crate::Drawing::draw_path`]
/// a path is shared with the recorded instruction and is no longer mutated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BezierPath {
    path: BezPath,
}

impl BezierPath {
    /// An empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing kurbo path.
    pub fn from_bez_path(path: BezPath) -> Self {
        Self { path }
    }

    /// Borrow the underlying kurbo path.
    pub fn as_bez_path(&self) -> &BezPath {
        &self.path
    }

    /// Path segments in insertion order.
    pub fn elements(&self) -> &[PathEl] {
        self.path.elements()
    }

    /// Return `true` when no segment has been added.
    pub fn is_empty(&self) -> bool {
        self.path.elements().is_empty()
    }

    // Pen

    /// Start a new contour at `p`.
    pub fn move_to(&mut self, p: impl Into<Point>) {
        self.path.move_to(p);
    }

    /// Straight segment to `p`.
    pub fn line_to(&mut self, p: impl Into<Point>) {
        self.path.line_to(p);
    }

    /// Cubic segment with control points `c1`, `c2` ending at `p`.
    pub fn curve_to(&mut self, c1: impl Into<Point>, c2: impl Into<Point>, p: impl Into<Point>) {
        self.path.curve_to(c1.into(), c2.into(), p.into());
    }

    /// Quadratic segments are not supported; the call only warns.
    pub fn qcurve_to(&mut self, _points: &[Point]) {
        warn_not_implemented("BezierPath::qcurve_to");
    }

    /// Close the current contour.
    pub fn close_path(&mut self) {
        self.path.close_path();
    }

    /// Open contours stay open; nothing to do.
    pub fn end_path(&mut self) {}

    // Shapes

    /// Append an axis-aligned rectangle.
    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.path
            .extend(Rect::new(x, y, x + w, y + h).path_elements(SHAPE_TOLERANCE));
    }

    /// Append an oval inscribed in the given rectangle.
    pub fn oval(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let ellipse = Ellipse::from_rect(Rect::new(x, y, x + w, y + h));
        self.path.extend(ellipse.path_elements(SHAPE_TOLERANCE));
    }

    /// Append an open two-point segment.
    pub fn line(&mut self, p1: impl Into<Point>, p2: impl Into<Point>) {
        self.move_to(p1);
        self.line_to(p2);
    }

    /// Append a polyline through `points`, closed when `close` is set.
    ///
    /// Fails with a usage error when fewer than two points are given.
    pub fn polygon(&mut self, points: &[Point], close: bool) -> SketchResult<()> {
        if points.len() < 2 {
            return Err(SketchError::usage(format!(
                "polygon() expects at least two points, got {}",
                points.len()
            )));
        }
        self.move_to(points[0]);
        for &p in &points[1..] {
            self.line_to(p);
        }
        if close {
            self.close_path();
        }
        Ok(())
    }

    /// Append a circular arc around `center` from `start_deg` to `end_deg`.
    ///
    /// When the path already has a current point the arc is connected to it with a line. The
    /// sweep is folded into one turn in the requested direction. Non-finite angles or radius
    /// are a usage error.
    pub fn arc(
        &mut self,
        center: impl Into<Point>,
        radius: f64,
        start_deg: f64,
        end_deg: f64,
        clockwise: bool,
    ) -> SketchResult<()> {
        if !(start_deg.is_finite() && end_deg.is_finite() && radius.is_finite()) {
            return Err(SketchError::usage(format!(
                "arc() expects finite values, got radius {radius}, angles {start_deg}..{end_deg}"
            )));
        }
        let center = center.into();
        let start = start_deg.to_radians();
        let sweep = arc_sweep(end_deg.to_radians() - start, clockwise);
        let arc = kurbo::Arc::new(center, (radius, radius), start, sweep, 0.0);
        let mut els = arc.path_elements(SHAPE_TOLERANCE);
        if let Some(PathEl::MoveTo(p)) = els.next() {
            if self.is_empty() {
                self.path.move_to(p);
            } else {
                self.path.line_to(p);
            }
        }
        self.path.extend(els);
        Ok(())
    }

    /// Not supported; the call only warns.
    pub fn arc_to(&mut self, _p1: Point, _p2: Point, _radius: f64) {
        warn_not_implemented("BezierPath::arc_to");
    }

    // Queries

    /// Non-zero winding containment test.
    pub fn point_inside(&self, p: impl Into<Point>) -> bool {
        self.path.contains(p.into())
    }

    /// Axis-aligned bounds, or `None` for an empty path.
    pub fn bounds(&self) -> Option<Rect> {
        if self.is_empty() {
            return None;
        }
        Some(self.path.bounding_box())
    }

    /// Not supported; warns and returns `None`.
    pub fn control_point_bounds(&self) -> Option<Rect> {
        warn_not_implemented("BezierPath::control_point_bounds");
        None
    }

    // Path operations

    /// Independent copy of this path.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Append every segment of `other`.
    pub fn append_path(&mut self, other: &Self) {
        self.path.extend(other.path.elements().iter().copied());
    }

    /// Not supported; the call only warns.
    pub fn reverse(&mut self) {
        warn_not_implemented("BezierPath::reverse");
    }

    /// Not supported; the call only warns.
    pub fn optimize_path(&mut self) {
        warn_not_implemented("BezierPath::optimize_path");
    }

    /// Not supported; warns and returns `None`.
    pub fn union(&self, _other: &Self) -> Option<Self> {
        warn_not_implemented("BezierPath::union");
        None
    }

    /// Not supported; warns and returns `None`.
    pub fn difference(&self, _other: &Self) -> Option<Self> {
        warn_not_implemented("BezierPath::difference");
        None
    }

    /// Not supported; warns and returns `None`.
    pub fn intersection(&self, _other: &Self) -> Option<Self> {
        warn_not_implemented("BezierPath::intersection");
        None
    }

    /// Not supported; warns and returns `None`.
    pub fn xor(&self, _other: &Self) -> Option<Self> {
        warn_not_implemented("BezierPath::xor");
        None
    }

    /// Not supported; the call only warns.
    pub fn remove_overlap(&mut self) {
        warn_not_implemented("BezierPath::remove_overlap");
    }

    /// Not supported; warns and returns `None`.
    pub fn expand_stroke(&self, _width: f64) -> Option<Self> {
        warn_not_implemented("BezierPath::expand_stroke");
        None
    }

    /// Glyph outlines are not supported; the call only warns.
    pub fn text(&mut self, _txt: &str) {
        warn_not_implemented("BezierPath::text");
    }

    /// Glyph outlines are not supported; the call only warns.
    pub fn text_box(&mut self, _txt: &str, _rect: Rect) {
        warn_not_implemented("BezierPath::text_box");
    }

    /// Image tracing is not supported; the call only warns.
    pub fn trace_image(&mut self) {
        warn_not_implemented("BezierPath::trace_image");
    }

    // Transformations

    /// Move every segment by `(x, y)`.
    pub fn translate(&mut self, x: f64, y: f64) {
        self.path.apply_affine(translate_matrix(x, y));
    }

    /// Rotate every segment by `degrees` around the origin.
    pub fn rotate(&mut self, degrees: f64, center: Option<Point>) {
        self.transform(rotate_matrix(degrees.to_radians()), center);
    }

    /// Scale every segment; `y` defaults to `x`.
    pub fn scale(&mut self, x: f64, y: Option<f64>, center: Option<Point>) {
        self.transform(scale_matrix(x, y.unwrap_or(x)), center);
    }

    /// Shear every segment by the given angles in degrees.
    pub fn skew(&mut self, x_degrees: f64, y_degrees: f64, center: Option<Point>) {
        self.transform(
            skew_matrix(x_degrees.to_radians(), y_degrees.to_radians()),
            center,
        );
    }

    /// Apply `affine` to every segment. A non-origin `center` is ignored with a warning.
    pub fn transform(&mut self, affine: Affine, center: Option<Point>) {
        warn_if_centered("BezierPath::transform", center);
        self.path.apply_affine(affine);
    }
}

impl AddAssign<&BezierPath> for BezierPath {
    fn add_assign(&mut self, rhs: &BezierPath) {
        self.append_path(rhs);
    }
}

impl From<BezPath> for BezierPath {
    fn from(path: BezPath) -> Self {
        Self::from_bez_path(path)
    }
}

/// Fold `sweep` (radians) into at most one turn: `0..=TAU` counter-clockwise, `-TAU..=0`
/// clockwise.
fn arc_sweep(sweep: f64, clockwise: bool) -> f64 {
    use std::f64::consts::TAU;
    if clockwise {
        if sweep > 0.0 {
            let folded = sweep.rem_euclid(TAU);
            if folded > 0.0 { folded - TAU } else { 0.0 }
        } else {
            sweep.max(-TAU)
        }
    } else if sweep < 0.0 {
        sweep.rem_euclid(TAU)
    } else {
        sweep.min(TAU)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/bezier.rs"]
mod tests;
