//! Recorded drawing instructions and the page-partitioned log that holds them.

/// Instruction records and color argument normalization.
pub mod instruction;
/// Ordered pages of instruction records.
pub mod log;
