use crate::foundation::math::{clamp01, lerp};
use crate::timeline::ease::Ease;
use std::time::Duration;

/// CSS `transition-timing-function: ease`.
const CSS_EASE: Ease = Ease::CubicBezier(0.25, 0.1, 0.25, 1.0);

/// Opacity transition between hidden (`0`) and shown (`1`), like a CSS opacity transition.
///
/// Changing direction mid-way starts the new transition from the current value, so the
/// value never jumps.
#[derive(Clone, Debug)]
pub struct HoverFade {
    duration: Duration,
    from: f64,
    to: f64,
    started: Duration,
}

impl HoverFade {
    /// Hidden fade taking `duration` per transition.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            from: 0.0,
            to: 0.0,
            started: Duration::ZERO,
        }
    }

    /// Transition duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Whether the fade is heading to shown.
    pub fn is_shown(&self) -> bool {
        self.to == 1.0
    }

    /// Head toward shown (`true`) or hidden (`false`) from `now`.
    pub fn set(&mut self, shown: bool, now: Duration) {
        let to = if shown { 1.0 } else { 0.0 };
        if to == self.to {
            return;
        }
        self.from = self.value(now);
        self.to = to;
        self.started = now;
    }

    /// Opacity at `now`.
    pub fn value(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_sub(self.started).as_secs_f64();
        let t = clamp01(elapsed / self.duration.as_secs_f64());
        lerp(self.from, self.to, CSS_EASE.apply(t))
    }

    /// Whether the value is still changing at `now`.
    pub fn is_animating(&self, now: Duration) -> bool {
        self.value(now) != self.to
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pointer/fade.rs"]
mod tests;
