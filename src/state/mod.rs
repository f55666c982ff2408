//! Graphics state tracked while replaying a page.

/// The current paint, stroke, font and active-path settings.
pub mod graphics;
