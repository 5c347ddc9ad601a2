//! Page specs and the per-page runtime that drives every effect from one input stream.

/// Per-frame output.
pub mod output;
/// The per-page runtime.
pub mod runtime;
/// JSON page specs.
pub mod spec;

pub use output::FrameOutput;
pub use runtime::Page;
pub use spec::{Capabilities, PageOptions, PageSpec, ViewSpec};
