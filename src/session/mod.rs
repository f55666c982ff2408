//! Session-level API.

/// The [`Drawing`](drawing::Drawing) facade and its options.
pub mod drawing;
