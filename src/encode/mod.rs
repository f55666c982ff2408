/// Looping GIF assembly.
pub mod gif;
/// Single-frame PNG encoding.
pub mod png;
/// Display modes and presenters.
pub mod preview;
