//! Scroll-driven timelines: trigger windows, progress, tweens, pins and scrub smoothing.

/// Easing curves.
pub mod ease;
/// Tweens and property values.
pub mod keyframes;
/// Pinning and pin spacers.
pub mod pin;
/// Scroll progress.
pub mod progress;
/// Measured, sampled timelines.
pub mod scroll;
/// Scrub smoothing.
pub mod scrub;
/// Trigger positions and scroll windows.
pub mod trigger;
