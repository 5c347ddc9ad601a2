//! Route-change transition: staggered horizontal slats sweeping across, then content fade-in.
//!
//! The transition is a time-driven [`TweenTimeline`] measured in seconds, sampled from the
//! time elapsed since navigation.

use crate::foundation::error::ScrollworkResult;
use crate::timeline::ease::Ease;
use crate::timeline::keyframes::{Length, Property, PropertyValues, Tween, TweenTimeline};
use kurbo::Size;
use std::time::Duration;

const SLAT_EASE: Ease = Ease::CubicBezier(0.76, 0.0, 0.24, 1.0);
const CONTENT_EASE: Ease = Ease::CubicBezier(0.22, 1.0, 0.36, 1.0);

/// Timing of the route transition.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TransitionSpec {
    /// Number of slats.
    pub slats: usize,
    /// Duration of one slat's sweep, seconds.
    pub slat_duration: f64,
    /// Delay between consecutive slats, seconds.
    pub stagger: f64,
    /// Keyframe times as fractions of the sweep (`0, 0.4, 0.6, 1`).
    pub times: [f64; 4],
    /// Content fade delay, seconds.
    pub content_delay: f64,
    /// Content fade duration, seconds.
    pub content_duration: f64,
    /// Content rise distance, px.
    pub content_rise: f64,
}

impl Default for TransitionSpec {
    fn default() -> Self {
        Self {
            slats: 5,
            slat_duration: 1.2,
            stagger: 0.05,
            times: [0.0, 0.4, 0.6, 1.0],
            content_delay: 0.6,
            content_duration: 0.6,
            content_rise: 10.0,
        }
    }
}

impl TransitionSpec {
    /// Element key of slat `i`.
    pub fn slat_key(i: usize) -> String {
        format!("slat-{i}")
    }

    /// Element key of the page content.
    pub const CONTENT: &'static str = "content";

    /// Build the keyframe timeline.
    ///
    /// Each slat runs `scaleX`/`opacity` through `0, 1, 1, 0` at `times`, one eased segment
    /// per keyframe pair.
    pub fn timeline(&self) -> ScrollworkResult<TweenTimeline> {
        let keys = [0.0, 1.0, 1.0, 0.0];
        let mut tweens = Vec::with_capacity(self.slats * 6 + 2);
        for i in 0..self.slats {
            let delay = i as f64 * self.stagger;
            let target = Self::slat_key(i);
            for seg in 0..3 {
                let at = delay + self.times[seg] * self.slat_duration;
                let len = (self.times[seg + 1] - self.times[seg]) * self.slat_duration;
                for property in [Property::ScaleX, Property::Opacity] {
                    tweens.push(
                        Tween::new(
                            target.clone(),
                            property,
                            Length::Px(keys[seg]),
                            Length::Px(keys[seg + 1]),
                        )
                        .at(at, len)
                        .eased(SLAT_EASE),
                    );
                }
            }
        }
        tweens.push(
            Tween::new(Self::CONTENT, Property::Opacity, Length::Px(0.0), Length::Px(1.0))
                .at(self.content_delay, self.content_duration)
                .eased(CONTENT_EASE),
        );
        tweens.push(
            Tween::new(
                Self::CONTENT,
                Property::Y,
                Length::Px(self.content_rise),
                Length::Px(0.0),
            )
            .at(self.content_delay, self.content_duration)
            .eased(CONTENT_EASE),
        );
        TweenTimeline::new(tweens)
    }
}

/// Horizontal transform origin of a slat; slats alternate sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlatOrigin {
    /// Grows from the left edge.
    Left,
    /// Grows from the right edge.
    Right,
}

/// Transition output for a frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TransitionFrame {
    /// Seconds since the transition started.
    pub elapsed: f64,
    /// Slat origins, top to bottom.
    pub origins: Vec<SlatOrigin>,
    /// Slat and content property values.
    pub values: PropertyValues,
    /// Whether the transition has finished.
    pub done: bool,
}

/// Runtime state of the route transition.
#[derive(Clone, Debug)]
pub struct PageTransition {
    spec: TransitionSpec,
    timeline: TweenTimeline,
    started: Option<Duration>,
    done: bool,
}

impl PageTransition {
    /// Prepare a transition; it starts on the first sampled frame.
    pub fn new(spec: TransitionSpec) -> ScrollworkResult<Self> {
        Ok(Self {
            timeline: spec.timeline()?,
            spec,
            started: None,
            done: false,
        })
    }

    /// Total running time.
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.timeline.total_duration())
    }

    /// Whether the transition has finished.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Skip to the end state, e.g. without animation frames.
    pub fn finish(&mut self) {
        self.done = true;
    }

    /// Sample at `now`, starting the clock on the first call. `None` once finished.
    pub fn sample(&mut self, now: Duration) -> Option<TransitionFrame> {
        if self.done {
            return None;
        }
        let started = *self.started.get_or_insert(now);
        let elapsed = now.saturating_sub(started).as_secs_f64();
        let total = self.timeline.total_duration();
        let progress = if total > 0.0 { elapsed / total } else { 1.0 };
        let values = self.timeline.apply(progress, Default::default(), &|_: &str| None::<Size>);
        let done = progress >= 1.0;
        if done {
            tracing::debug!(elapsed, "page transition finished");
            self.done = true;
        }
        Some(TransitionFrame {
            elapsed,
            origins: (0..self.spec.slats)
                .map(|i| if i % 2 == 0 { SlatOrigin::Left } else { SlatOrigin::Right })
                .collect(),
            values,
            done,
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/transition/transition.rs"]
mod tests;
