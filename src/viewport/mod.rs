//! Raw input ownership: scroll, pointer, resize, geometry and listener accounting.

/// Animation frame scheduling.
pub mod frame;
/// Element geometry sources.
pub mod geometry;
/// Listener accounting.
pub mod listeners;
/// Scroll, pointer and viewport state.
pub mod tracker;
