//! Pointer-following effects: radial glows, hover fades, tilt and magnetic offsets.

/// Tilt and magnetic transforms.
pub mod effects;
/// Hover opacity fades.
pub mod fade;
/// Pointer-following radial glows.
pub mod glow;
