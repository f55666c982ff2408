use std::str::FromStr;

use crate::foundation::error::{SketchError, SketchResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Page dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> SketchResult<Self> {
        if width == 0 || height == 0 {
            return Err(SketchError::usage(format!(
                "canvas size must be positive, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
        }
    }
}

/// Requested page size: explicit pixels, or the host screen size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CanvasSize {
    /// Explicit dimensions.
    Fixed {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
    /// Use whatever the host reports as its screen size.
    Screen,
}

impl CanvasSize {
    /// A square canvas.
    pub fn square(side: u32) -> Self {
        Self::Fixed {
            width: side,
            height: side,
        }
    }

    /// Resolve to concrete pixels, substituting `screen` for [`CanvasSize::Screen`].
    pub fn resolve(self, screen: Canvas) -> SketchResult<Canvas> {
        match self {
            Self::Fixed { width, height } => Canvas::new(width, height),
            Self::Screen => Ok(screen),
        }
    }
}

impl From<u32> for CanvasSize {
    fn from(side: u32) -> Self {
        Self::square(side)
    }
}

impl From<(u32, u32)> for CanvasSize {
    fn from((width, height): (u32, u32)) -> Self {
        Self::Fixed { width, height }
    }
}

impl From<Canvas> for CanvasSize {
    fn from(c: Canvas) -> Self {
        Self::Fixed {
            width: c.width,
            height: c.height,
        }
    }
}

/// Straight-alpha color with channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
    /// Alpha.
    pub a: f64,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Build a color from its four channels.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Gray level broadcast to all three color channels.
    pub const fn gray(v: f64, a: f64) -> Self {
        Self::new(v, v, v, a)
    }

    /// Quantize to straight-alpha RGBA8, clamping out-of-range channels.
    pub fn to_rgba8(self) -> [u8; 4] {
        fn q(c: f64) -> u8 {
            if c.is_nan() {
                return 0;
            }
            (c.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

/// Stroke corner style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    /// Sharp corners, limited by the miter limit.
    #[default]
    Miter,
    /// Rounded corners.
    Round,
    /// Cut-off corners.
    Bevel,
}

impl LineJoin {
    /// Name used in the drawing API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
            Self::Bevel => "bevel",
        }
    }
}

impl FromStr for LineJoin {
    type Err = SketchError;

    fn from_str(s: &str) -> SketchResult<Self> {
        match s {
            "miter" => Ok(Self::Miter),
            "round" => Ok(Self::Round),
            "bevel" => Ok(Self::Bevel),
            other => Err(SketchError::usage(format!(
                "unknown line join '{other}' (expected miter, round or bevel)"
            ))),
        }
    }
}

/// Stroke end style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    /// Flat end at the endpoint.
    #[default]
    Butt,
    /// Semicircular end.
    Round,
    /// Flat end extended by half the stroke width.
    Square,
}

impl LineCap {
    /// Name used in the drawing API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

impl FromStr for LineCap {
    type Err = SketchError;

    fn from_str(s: &str) -> SketchResult<Self> {
        match s {
            "butt" => Ok(Self::Butt),
            "round" => Ok(Self::Round),
            "square" => Ok(Self::Square),
            other => Err(SketchError::usage(format!(
                "unknown line cap '{other}' (expected butt, round or square)"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
