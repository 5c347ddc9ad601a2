//! Shared value types, the error type and small numeric helpers.

/// Viewport, colors and geometry re-exports.
pub mod core;
/// Crate error type.
pub mod error;
pub(crate) mod math;
