/// Clamp into `[0, 1]`; NaN maps to `0`.
pub(crate) fn clamp01(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

/// Interpolate so that `t = 0` yields exactly `a` and `t = 1` exactly `b`.
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Normalized position of `x` in `[a, b]`, clamped.
///
/// A zero-length span behaves as a step at `a`.
pub(crate) fn inverse_lerp(a: f64, b: f64, x: f64) -> f64 {
    let span = b - a;
    if span <= 0.0 || !span.is_finite() {
        return if x >= a { 1.0 } else { 0.0 };
    }
    clamp01((x - a) / span)
}

/// Round half toward positive infinity, as the DOM's `Math.round` does.
pub(crate) fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
