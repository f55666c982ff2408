//! Sketchlog is a deferred 2D drawing library.
//!
//! Drawing calls are recorded into an instruction log instead of being rendered immediately. The
//! log is replayed on request:
//!
//! - [`Drawing::image_data`] renders a PNG of the last page, or a looping GIF with one frame per
//!   page
//! - [`Drawing::display_image`] hands the PNG to a [`Presenter`]
//! - [`Drawing::live_view`] binds the drawing to any [`Backend`] and redraws it on demand
//!
//! Coordinates have their origin at the bottom-left corner of the page with y pointing up.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// PNG and GIF encoding, and preview hand-off.
pub mod encode;
/// Bézier path geometry.
pub mod path;
/// Instruction records and the instruction log.
pub mod record;
/// Replay machine, backends and output contexts.
pub mod render;
/// The recording facade.
pub mod session;
/// Graphics state.
pub mod state;

pub use crate::foundation::core::{
    Affine, BezPath, Canvas, CanvasSize, LineCap, LineJoin, Point, Rect, Rgba, Vec2,
};
pub use crate::foundation::error::{SketchError, SketchResult};

pub use crate::encode::preview::{DisplayMode, Presenter, TempFilePresenter};
pub use crate::path::bezier::BezierPath;
pub use crate::record::instruction::{ColorArg, Instruction};
pub use crate::record::log::{InstructionLog, Page};
pub use crate::render::backend::{Backend, FontRequest, FrameRGBA, TextRun};
pub use crate::render::context::{AnimationContext, ImageContext};
pub use crate::render::cpu::{CpuBackend, CpuBackendOpts};
pub use crate::render::replay::{Machine, Phase, replay};
pub use crate::render::trace::{TraceBackend, TraceEvent};
pub use crate::render::view::ViewContext;
pub use crate::session::drawing::{Drawing, DrawingOpts, ImageFormat, SavedState};
pub use crate::state::graphics::{DEFAULT_FONT_SIZE, GraphicsState};
