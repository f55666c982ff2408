/// The backend interface replay draws through.
pub mod backend;
/// PNG and GIF output contexts.
pub mod context;
/// `vello_cpu` raster backend.
pub mod cpu;
/// The replay state machine.
pub mod replay;
pub(crate) mod text;
/// A backend that records calls.
pub mod trace;
/// Live view with recursive replay.
pub mod view;
