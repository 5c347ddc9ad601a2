use crate::foundation::error::{ScrollworkError, ScrollworkResult};
use std::time::Duration;

/// How displayed progress follows scroll-derived progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "ScrubRepr", into = "ScrubRepr")]
pub enum Scrub {
    /// Displayed progress equals scroll progress (`scrub: true`).
    #[default]
    Immediate,
    /// Displayed progress catches up over this many seconds (`scrub: 1`).
    Smooth(f64),
}

/// Remaining gap is reduced to `e^-4` (about 2%) after one smoothing period.
const CATCH_UP_RATE: f64 = 4.0;

/// Gap under which the displayed value snaps onto the target.
const SNAP_EPSILON: f64 = 1e-4;

impl Scrub {
    /// Check that a smoothing period is finite and positive.
    pub fn validate(self) -> ScrollworkResult<()> {
        match self {
            Self::Immediate => Ok(()),
            Self::Smooth(secs) if secs.is_finite() && secs > 0.0 => Ok(()),
            Self::Smooth(secs) => Err(ScrollworkError::timeline(format!(
                "scrub smoothing must be finite and > 0 seconds, got {secs}"
            ))),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum ScrubRepr {
    Flag(bool),
    Seconds(f64),
}

impl TryFrom<ScrubRepr> for Scrub {
    type Error = ScrollworkError;

    fn try_from(value: ScrubRepr) -> Result<Self, Self::Error> {
        match value {
            ScrubRepr::Flag(true) => Ok(Self::Immediate),
            ScrubRepr::Flag(false) => Err(ScrollworkError::timeline(
                "scroll timelines are always scrubbed; use `true` or a smoothing period",
            )),
            ScrubRepr::Seconds(secs) => {
                let scrub = Self::Smooth(secs);
                scrub.validate()?;
                Ok(scrub)
            }
        }
    }
}

impl From<Scrub> for ScrubRepr {
    fn from(value: Scrub) -> Self {
        match value {
            Scrub::Immediate => Self::Flag(true),
            Scrub::Smooth(secs) => Self::Seconds(secs),
        }
    }
}

/// Displayed progress of one scrubbed timeline.
///
/// Only the displayed value carries state. The target is recomputed from the scroll offset
/// every frame, so reversing the scroll reverses the animation.
#[derive(Clone, Debug, Default)]
pub struct ScrubState {
    displayed: Option<f64>,
    last: Option<Duration>,
}

impl ScrubState {
    /// Fresh state; the first sample shows its target directly.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last displayed progress.
    pub fn displayed(&self) -> Option<f64> {
        self.displayed
    }

    /// Move the displayed value toward `target` for a frame at `now`.
    pub fn advance(&mut self, scrub: Scrub, target: f64, now: Duration) -> f64 {
        let next = match (scrub, self.displayed, self.last) {
            (Scrub::Smooth(period), Some(shown), Some(last)) => {
                let dt = now.saturating_sub(last).as_secs_f64();
                let keep = (-CATCH_UP_RATE * dt / period).exp();
                let v = target + (shown - target) * keep;
                if (v - target).abs() < SNAP_EPSILON { target } else { v }
            }
            _ => target,
        };
        self.displayed = Some(next);
        self.last = Some(now);
        next
    }

    /// Whether the displayed value has reached `target`.
    pub fn is_settled(&self, target: f64) -> bool {
        self.displayed == Some(target)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/scrub.rs"]
mod tests;
