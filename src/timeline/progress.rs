use crate::foundation::math::inverse_lerp;
use crate::timeline::trigger::ScrollRange;

/// Progress of `scroll_y` through `range`, in `[0, 1]`.
///
/// Exactly `0` at or before `range.start`, exactly `1` at or after `range.end`, linear and
/// non-decreasing in between. Depends on nothing but its arguments, so scrolling back to an
/// offset always reproduces the same value.
///
/// An empty window is a step: `1` from its start onwards.
pub fn progress(scroll_y: f64, range: ScrollRange) -> f64 {
    if range.is_empty() {
        return if scroll_y >= range.start { 1.0 } else { 0.0 };
    }
    if scroll_y <= range.start {
        return 0.0;
    }
    if scroll_y >= range.end {
        return 1.0;
    }
    inverse_lerp(range.start, range.end, scroll_y)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/progress.rs"]
mod tests;
