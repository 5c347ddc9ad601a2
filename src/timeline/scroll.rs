use crate::foundation::core::Viewport;
use crate::foundation::error::{ScrollworkError, ScrollworkResult};
use crate::timeline::keyframes::{PropertyValues, TweenTimeline};
use crate::timeline::pin::{PinSpec, ResolvedPin};
use crate::timeline::progress::progress;
use crate::timeline::scrub::{Scrub, ScrubState};
use crate::timeline::trigger::{Edge, ScrollRange, TriggerEnd, TriggerPos};
use crate::viewport::geometry::Geometry;
use kurbo::Size;
use std::collections::BTreeMap;
use std::time::Duration;

fn default_start() -> TriggerPos {
    TriggerPos::new(Edge::Top, Edge::Bottom)
}

fn default_end() -> TriggerEnd {
    TriggerEnd::At(TriggerPos::new(Edge::Bottom, Edge::Top))
}

/// Declaration of one scroll-driven timeline.
///
/// Defaults cover the whole time the trigger is on screen: from its top meeting the viewport
/// bottom to its bottom meeting the viewport top.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineSpec {
    /// Unique id within the page.
    pub id: String,
    /// DOM id of the trigger element.
    pub trigger: String,
    /// Where progress is 0.
    #[serde(default = "default_start")]
    pub start: TriggerPos,
    /// Where progress is 1.
    #[serde(default = "default_end")]
    pub end: TriggerEnd,
    /// Progress smoothing.
    #[serde(default)]
    pub scrub: Scrub,
    /// Optional pin of the trigger element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<PinSpec>,
    /// Tweens driven by this timeline's progress.
    #[serde(default)]
    pub tweens: TweenTimeline,
}

impl TimelineSpec {
    /// Timeline over the default window with no tweens.
    pub fn new(id: impl Into<String>, trigger: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            trigger: trigger.into(),
            start: default_start(),
            end: default_end(),
            scrub: Scrub::Immediate,
            pin: None,
            tweens: TweenTimeline::default(),
        }
    }

    /// Builder: set the window.
    pub fn window(mut self, start: TriggerPos, end: TriggerEnd) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Builder: set scrub behavior.
    pub fn scrubbed(mut self, scrub: Scrub) -> Self {
        self.scrub = scrub;
        self
    }

    /// Builder: pin the trigger.
    pub fn pinned(mut self, pin: PinSpec) -> Self {
        self.pin = Some(pin);
        self
    }

    /// Builder: set tweens.
    pub fn with_tweens(mut self, tweens: TweenTimeline) -> Self {
        self.tweens = tweens;
        self
    }

    /// Check ids, scrub, pin and tweens.
    pub fn validate(&self) -> ScrollworkResult<()> {
        if self.id.trim().is_empty() {
            return Err(ScrollworkError::timeline("timeline id must be non-empty"));
        }
        if self.trigger.trim().is_empty() {
            return Err(ScrollworkError::timeline(format!(
                "timeline '{}' trigger must be non-empty",
                self.id
            )));
        }
        self.scrub
            .validate()
            .map_err(|e| ScrollworkError::timeline(format!("timeline '{}': {e}", self.id)))?;
        if let Some(pin) = &self.pin {
            pin.validate()
                .map_err(|e| ScrollworkError::timeline(format!("timeline '{}': {e}", self.id)))?;
        }
        self.tweens
            .validate()
            .map_err(|e| ScrollworkError::timeline(format!("timeline '{}': {e}", self.id)))
    }
}

/// One sampled timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TimelineSample {
    /// Timeline id.
    pub id: String,
    /// Progress derived from the scroll offset.
    pub progress: f64,
    /// Progress the tweens were rendered at (differs from `progress` while smoothing).
    pub displayed: f64,
    /// Whether the trigger is currently held by its pin.
    pub pinned: bool,
    /// Pin offset to apply to the trigger element, px.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin_offset: Option<f64>,
    /// Driven property values.
    pub values: PropertyValues,
}

impl TimelineSample {
    /// Whether the displayed value still has to catch up.
    pub fn is_settling(&self) -> bool {
        self.displayed != self.progress
    }
}

#[derive(Clone, Debug)]
struct Measured {
    range: ScrollRange,
    sizes: BTreeMap<String, Size>,
}

/// Runtime instance of a [`TimelineSpec`] for a mounted view.
///
/// The timeline is detached until its trigger is measured. Measurements are dropped with
/// [`ScrollTimeline::invalidate`] whenever layout changes and redone before the next sample.
#[derive(Clone, Debug)]
pub struct ScrollTimeline {
    spec: TimelineSpec,
    measured: Option<Measured>,
    pin: Option<ResolvedPin>,
    scrub: ScrubState,
}

impl ScrollTimeline {
    /// Instantiate a validated spec.
    pub fn new(spec: TimelineSpec) -> ScrollworkResult<Self> {
        spec.validate()?;
        Ok(Self {
            spec,
            measured: None,
            pin: None,
            scrub: ScrubState::new(),
        })
    }

    /// Declaration.
    pub fn spec(&self) -> &TimelineSpec {
        &self.spec
    }

    /// Timeline id.
    pub fn id(&self) -> &str {
        &self.spec.id
    }

    /// Whether the trigger has been measured for the current layout.
    pub fn is_attached(&self) -> bool {
        self.measured.is_some()
    }

    /// Current scroll window, once measured.
    pub fn range(&self) -> Option<ScrollRange> {
        self.measured.as_ref().map(|m| m.range)
    }

    /// Drop measurements; the next [`ScrollTimeline::measure`] re-reads geometry.
    pub fn invalidate(&mut self) {
        self.measured = None;
    }

    /// Hand over this timeline's pin as placed for the current layout.
    pub fn set_pin(&mut self, pin: Option<ResolvedPin>) {
        self.pin = pin;
    }

    /// Read trigger and target geometry if not measured yet.
    ///
    /// Returns `false` while the trigger is not rendered; the timeline stays detached and
    /// sampling is a no-op until a later call succeeds.
    pub fn measure(&mut self, geometry: &dyn Geometry, viewport: Viewport) -> bool {
        if self.measured.is_some() {
            return true;
        }
        let Some(trigger) = geometry.element_box(&self.spec.trigger) else {
            tracing::trace!(
                id = %self.spec.id,
                trigger = %self.spec.trigger,
                "trigger not rendered"
            );
            return false;
        };
        let range = ScrollRange::resolve(
            self.spec.start,
            self.spec.end,
            trigger.document_rect(0.0),
            viewport,
        );
        let mut sizes = BTreeMap::new();
        for tween in self.spec.tweens.tweens() {
            if sizes.contains_key(&tween.target) {
                continue;
            }
            if let Some(element) = geometry.element_box(&tween.target) {
                sizes.insert(tween.target.clone(), element.rect.size());
            }
        }
        tracing::debug!(
            id = %self.spec.id,
            start = range.start,
            end = range.end,
            "timeline attached"
        );
        self.measured = Some(Measured { range, sizes });
        true
    }

    /// Sample at `scroll_y` for a frame at `now`. `None` while detached.
    pub fn sample(
        &mut self,
        scroll_y: f64,
        viewport: Viewport,
        now: Duration,
    ) -> Option<TimelineSample> {
        let target = progress(scroll_y, self.measured.as_ref()?.range);
        let displayed = self.scrub.advance(self.spec.scrub, target, now);
        Some(self.render(scroll_y, viewport, target, displayed))
    }

    /// Sample in its settled end state, for environments without animation frames.
    pub fn sample_settled(&self, viewport: Viewport) -> Option<TimelineSample> {
        self.measured.as_ref()?;
        Some(self.render(0.0, viewport, 1.0, 1.0))
    }

    fn render(
        &self,
        scroll_y: f64,
        viewport: Viewport,
        target: f64,
        displayed: f64,
    ) -> TimelineSample {
        let sizes = self.measured.as_ref().map(|m| &m.sizes);
        let size_of = |target: &str| sizes.and_then(|s| s.get(target)).copied();
        let values = self.spec.tweens.apply(displayed, viewport, &size_of);
        tracing::trace!(id = %self.spec.id, target, displayed, "timeline sampled");
        TimelineSample {
            id: self.spec.id.clone(),
            progress: target,
            displayed,
            pinned: self.pin.as_ref().is_some_and(|p| p.is_pinned(scroll_y)),
            pin_offset: self.pin.as_ref().map(|p| p.offset(scroll_y)),
            values,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/scroll.rs"]
mod tests;
