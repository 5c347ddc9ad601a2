use crate::foundation::core::Viewport;
use crate::foundation::error::{ScrollworkError, ScrollworkResult};
use crate::foundation::math::{inverse_lerp, lerp};
use crate::timeline::ease::Ease;
use kurbo::Size;
use std::fmt;
use std::str::FromStr;

/// Animatable visual property.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    /// Opacity in `[0, 1]`.
    Opacity,
    /// Horizontal translation, px.
    X,
    /// Vertical translation, px.
    Y,
    /// Horizontal translation, percent of own width.
    XPercent,
    /// Vertical translation, percent of own height.
    YPercent,
    /// Uniform scale.
    Scale,
    /// Horizontal scale.
    ScaleX,
    /// Rotation, degrees.
    Rotate,
    /// Gaussian blur radius, px.
    Blur,
}

impl Property {
    /// Value of the property on an untouched element.
    pub fn neutral(self) -> f64 {
        match self {
            Self::Opacity | Self::Scale | Self::ScaleX => 1.0,
            _ => 0.0,
        }
    }

    /// Value clamped into the property's legal range.
    pub fn clamp_value(self, v: f64) -> f64 {
        match self {
            Self::Opacity => v.clamp(0.0, 1.0),
            Self::Blur => v.max(0.0),
            _ => v,
        }
    }
}

/// A tween endpoint, resolved against current geometry at sample time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "LengthRepr", into = "LengthRepr")]
pub enum Length {
    /// Plain number (px for lengths, unitless otherwise).
    Px(f64),
    /// Percent of viewport width.
    Vw(f64),
    /// Percent of viewport height.
    Vh(f64),
    /// Percent of the target element's size along the property's axis.
    Percent(f64),
}

impl Length {
    /// Resolve to a plain number. `target` is the animated element's size, when known.
    pub fn resolve(self, property: Property, viewport: Viewport, target: Option<Size>) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Vw(v) => viewport.width * v / 100.0,
            Self::Vh(v) => viewport.height * v / 100.0,
            Self::Percent(v) => match property {
                Property::X => target.map_or(0.0, |s| s.width) * v / 100.0,
                Property::Y => target.map_or(0.0, |s| s.height) * v / 100.0,
                // Already percentages of the element's own size.
                Property::XPercent | Property::YPercent => v,
                _ => v / 100.0,
            },
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}"),
            Self::Vw(v) => write!(f, "{v}vw"),
            Self::Vh(v) => write!(f, "{v}vh"),
            Self::Percent(v) => write!(f, "{v}%"),
        }
    }
}

impl FromStr for Length {
    type Err = ScrollworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (num, ctor): (&str, fn(f64) -> Length) = if let Some(n) = s.strip_suffix("vw") {
            (n, Length::Vw)
        } else if let Some(n) = s.strip_suffix("vh") {
            (n, Length::Vh)
        } else if let Some(n) = s.strip_suffix('%') {
            (n, Length::Percent)
        } else if let Some(n) = s.strip_suffix("px") {
            (n, Length::Px)
        } else {
            (s, Length::Px)
        };
        let v = num
            .trim()
            .parse::<f64>()
            .map_err(|e| ScrollworkError::parse(format!("length '{s}': {e}")))?;
        if !v.is_finite() {
            return Err(ScrollworkError::parse(format!("length '{s}' is not finite")));
        }
        Ok(ctor(v))
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum LengthRepr {
    Num(f64),
    Text(String),
}

impl TryFrom<LengthRepr> for Length {
    type Error = ScrollworkError;

    fn try_from(value: LengthRepr) -> Result<Self, Self::Error> {
        match value {
            LengthRepr::Num(v) => Ok(Self::Px(v)),
            LengthRepr::Text(s) => s.parse(),
        }
    }
}

impl From<Length> for LengthRepr {
    fn from(value: Length) -> Self {
        match value {
            Length::Px(v) => Self::Num(v),
            other => Self::Text(other.to_string()),
        }
    }
}

fn default_duration() -> f64 {
    1.0
}

/// One property animation placed on a timeline.
///
/// `position` and `duration` are in timeline units; the whole timeline spans
/// `[0, max(position + duration)]` and is mapped onto progress `[0, 1]`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tween {
    /// Element key (DOM id) the tween animates.
    pub target: String,
    /// Animated property.
    pub property: Property,
    /// Value at the tween's start.
    pub from: Length,
    /// Value at the tween's end.
    pub to: Length,
    /// Start, in timeline units.
    #[serde(default)]
    pub position: f64,
    /// Length, in timeline units.
    #[serde(default = "default_duration")]
    pub duration: f64,
    /// Easing applied inside the tween.
    #[serde(default)]
    pub ease: Ease,
    /// Write nothing until the timeline reaches `position`. Otherwise `from` holds before
    /// the start.
    #[serde(default)]
    pub lazy: bool,
}

impl Tween {
    /// Linear tween over `[0, 1]`.
    pub fn new(target: impl Into<String>, property: Property, from: Length, to: Length) -> Self {
        Self {
            target: target.into(),
            property,
            from,
            to,
            position: 0.0,
            duration: 1.0,
            ease: Ease::Linear,
            lazy: false,
        }
    }

    /// Builder: place at `position` for `duration`.
    pub fn at(mut self, position: f64, duration: f64) -> Self {
        self.position = position;
        self.duration = duration;
        self
    }

    /// Builder: set easing.
    pub fn eased(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Builder: leave the property untouched before `position`.
    pub fn lazy(mut self) -> Self {
        self.lazy = true;
        self
    }

    fn end(&self) -> f64 {
        self.position + self.duration
    }

    /// Local eased progress at timeline time `time`, exactly 0 before and 1 after.
    fn local(&self, time: f64) -> f64 {
        let end = self.end();
        let t = if time >= end {
            1.0
        } else if time <= self.position {
            0.0
        } else {
            inverse_lerp(self.position, end, time)
        };
        self.ease.apply(t)
    }
}

/// Sampled value of one property on one element.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PropertyValue {
    /// Element key.
    pub target: String,
    /// Property.
    pub property: Property,
    /// Resolved value.
    pub value: f64,
}

/// Property values produced by one timeline sample, ordered by (target, property).
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct PropertyValues(Vec<PropertyValue>);

impl PropertyValues {
    /// Value for `target`/`property`, if the timeline drives it.
    pub fn get(&self, target: &str, property: Property) -> Option<f64> {
        self.0
            .iter()
            .find(|v| v.target == target && v.property == property)
            .map(|v| v.value)
    }

    /// All values.
    pub fn iter(&self) -> impl Iterator<Item = &PropertyValue> {
        self.0.iter()
    }

    /// Number of driven (target, property) pairs.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is driven.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Inline CSS for one element: `opacity`, `transform` and `filter` declarations.
    pub fn css(&self, target: &str) -> String {
        let get = |p: Property| self.get(target, p);
        let mut decls = Vec::new();
        if let Some(o) = get(Property::Opacity) {
            decls.push(format!("opacity: {o}"));
        }

        let mut transform = Vec::new();
        if get(Property::XPercent).is_some() || get(Property::YPercent).is_some() {
            transform.push(format!(
                "translate({}%, {}%)",
                get(Property::XPercent).unwrap_or(0.0),
                get(Property::YPercent).unwrap_or(0.0)
            ));
        }
        if get(Property::X).is_some() || get(Property::Y).is_some() {
            transform.push(format!(
                "translate({}px, {}px)",
                get(Property::X).unwrap_or(0.0),
                get(Property::Y).unwrap_or(0.0)
            ));
        }
        if let Some(r) = get(Property::Rotate) {
            transform.push(format!("rotate({r}deg)"));
        }
        if let Some(s) = get(Property::Scale) {
            transform.push(format!("scale({s})"));
        }
        if let Some(s) = get(Property::ScaleX) {
            transform.push(format!("scaleX({s})"));
        }
        if !transform.is_empty() {
            decls.push(format!("transform: {}", transform.join(" ")));
        }
        if let Some(b) = get(Property::Blur) {
            decls.push(format!("filter: blur({b}px)"));
        }
        decls.join("; ")
    }

    pub(crate) fn push(&mut self, target: &str, property: Property, value: f64) {
        self.0.push(PropertyValue {
            target: target.to_owned(),
            property,
            value,
        });
    }

    pub(crate) fn extend(&mut self, other: PropertyValues) {
        self.0.extend(other.0);
    }
}

/// Ordered set of tweens driven by one progress value.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct TweenTimeline {
    tweens: Vec<Tween>,
}

impl TweenTimeline {
    /// Build and validate.
    pub fn new(tweens: Vec<Tween>) -> ScrollworkResult<Self> {
        let tl = Self { tweens };
        tl.validate()?;
        Ok(tl)
    }

    /// Check that every tween has a finite, non-negative position and duration.
    pub fn validate(&self) -> ScrollworkResult<()> {
        for (i, tw) in self.tweens.iter().enumerate() {
            if !(tw.position.is_finite() && tw.position >= 0.0) {
                return Err(ScrollworkError::timeline(format!(
                    "tween {i} ({}.{:?}) position must be finite and >= 0",
                    tw.target, tw.property
                )));
            }
            if !(tw.duration.is_finite() && tw.duration >= 0.0) {
                return Err(ScrollworkError::timeline(format!(
                    "tween {i} ({}.{:?}) duration must be finite and >= 0",
                    tw.target, tw.property
                )));
            }
        }
        Ok(())
    }

    /// Tweens in declaration order.
    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    /// Timeline length in timeline units.
    pub fn total_duration(&self) -> f64 {
        self.tweens.iter().map(Tween::end).fold(0.0, f64::max)
    }

    /// Interpolate every driven property at `progress`.
    ///
    /// For each (target, property) pair, the tween that started most recently at the sampled
    /// time wins; before the first tween starts, that tween's `from` value holds unless the
    /// tween is lazy, in which case the pair is left out.
    pub fn apply(
        &self,
        progress: f64,
        viewport: Viewport,
        size_of: &dyn Fn(&str) -> Option<Size>,
    ) -> PropertyValues {
        let total = self.total_duration();
        let progress = progress.clamp(0.0, 1.0);
        let time = if progress >= 1.0 { total } else { progress * total };

        let mut order: Vec<&Tween> = self.tweens.iter().collect();
        order.sort_by(|a, b| {
            (a.target.as_str(), a.property)
                .cmp(&(b.target.as_str(), b.property))
                .then(a.position.total_cmp(&b.position))
        });

        let mut out = PropertyValues::default();
        for group in order.chunk_by(|a, b| a.target == b.target && a.property == b.property) {
            let started = group.iter().rev().find(|tw| tw.position <= time);
            let Some(current) = started.or_else(|| group.first().filter(|tw| !tw.lazy)) else {
                continue;
            };
            let t = if total <= 0.0 {
                current.ease.apply(progress)
            } else {
                current.local(time)
            };
            let size = size_of(current.target.as_str());
            let from = current.from.resolve(current.property, viewport, size);
            let to = current.to.resolve(current.property, viewport, size);
            out.push(
                &current.target,
                current.property,
                current.property.clamp_value(lerp(from, to, t)),
            );
        }
        out
    }
}

/// Collects without validating; [`TweenTimeline::validate`] runs when the owning timeline
/// is instantiated.
impl FromIterator<Tween> for TweenTimeline {
    fn from_iter<I: IntoIterator<Item = Tween>>(iter: I) -> Self {
        Self {
            tweens: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/keyframes.rs"]
mod tests;
