//! Mutable Bézier path geometry.

/// Pen-style path construction, shape helpers and affine transforms.
pub mod bezier;
