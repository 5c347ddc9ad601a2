use crate::foundation::core::{AccentColor, Point, Rect, Rgba};
use crate::foundation::error::{ScrollworkError, ScrollworkResult};
use crate::foundation::math::round_half_up;
use crate::pointer::fade::HoverFade;
use crate::viewport::geometry::Geometry;
use crate::viewport::tracker::PointerState;
use kurbo::Size;
use smallvec::SmallVec;
use std::time::Duration;

/// Off-screen local position used before any pointer event.
pub const SENTINEL: Point = Point::new(-1000.0, -1000.0);

/// Colors of a glow.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlowPaint {
    /// The active section's accent.
    Accent,
    /// Fixed color stops.
    Colors(Vec<Rgba>),
}

/// What happens to the gradient position when the pointer leaves the container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveBehavior {
    /// Keep the last position; the hover fade (if any) hides the glow.
    #[default]
    Keep,
    /// Jump back to the sentinel.
    Reset,
}

fn default_sentinel() -> Point {
    SENTINEL
}

fn default_transparent_at() -> f64 {
    80.0
}

/// Declaration of a pointer-following radial glow painted on one element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GlowSpec {
    /// Unique id within the page.
    pub id: String,
    /// DOM id of the element the gradient is painted on.
    pub anchor: String,
    /// DOM id of the hover region; the element itself when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    /// Circle radius in px; the gradient's farthest corner when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// Gradient colors.
    pub paint: GlowPaint,
    /// Percentage of the radius at which the gradient turns transparent.
    #[serde(default = "default_transparent_at")]
    pub transparent_at: f64,
    /// Local position before the first pointer event.
    #[serde(default = "default_sentinel")]
    pub sentinel: Point,
    /// Round local coordinates to whole pixels.
    #[serde(default)]
    pub round: bool,
    /// Opacity transition on container hover, ms; always shown when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover_fade_ms: Option<u64>,
    /// Behavior when the pointer leaves the container.
    #[serde(default)]
    pub on_leave: LeaveBehavior,
}

impl GlowSpec {
    /// Glow with the default sentinel, 80% stop, no fade and no rounding.
    pub fn new(id: impl Into<String>, anchor: impl Into<String>, paint: GlowPaint) -> Self {
        Self {
            id: id.into(),
            anchor: anchor.into(),
            container: None,
            radius: None,
            paint,
            transparent_at: default_transparent_at(),
            sentinel: SENTINEL,
            round: false,
            hover_fade_ms: None,
            on_leave: LeaveBehavior::Keep,
        }
    }

    /// Navigation block: 120px, accent colored, rounded, fades in 500ms on nav hover.
    pub fn nav_block(
        id: impl Into<String>,
        anchor: impl Into<String>,
        nav: impl Into<String>,
    ) -> Self {
        Self {
            container: Some(nav.into()),
            radius: Some(120.0),
            round: true,
            hover_fade_ms: Some(500),
            ..Self::new(id, anchor, GlowPaint::Accent)
        }
    }

    /// Process card border: 600px, transparent from 40%, always shown.
    pub fn process_card(
        id: impl Into<String>,
        anchor: impl Into<String>,
        section: impl Into<String>,
    ) -> Self {
        Self {
            container: Some(section.into()),
            radius: Some(600.0),
            transparent_at: 40.0,
            ..Self::new(id, anchor, GlowPaint::Colors(vec![Rgba::new(96, 165, 250, 0.8)]))
        }
    }

    /// Project card reveal mask: 250px, shown while the card is hovered.
    pub fn reveal_mask(id: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            radius: Some(250.0),
            transparent_at: 100.0,
            hover_fade_ms: Some(0),
            ..Self::new(id, anchor, GlowPaint::Colors(vec![Rgba::new(255, 255, 255, 1.0)]))
        }
    }

    /// Testimonial card spotlight: farthest-corner circle, transparent from 25%, reset on leave.
    pub fn testimonial(id: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            transparent_at: 25.0,
            sentinel: Point::new(-200.0, -200.0),
            on_leave: LeaveBehavior::Reset,
            ..Self::new(id, anchor, GlowPaint::Colors(vec![Rgba::new(56, 189, 248, 0.15)]))
        }
    }

    /// Hover region anchor.
    pub fn container(&self) -> &str {
        self.container.as_deref().unwrap_or(&self.anchor)
    }

    /// Check radius, stop and colors.
    pub fn validate(&self) -> ScrollworkResult<()> {
        if self.id.trim().is_empty() || self.anchor.trim().is_empty() {
            return Err(ScrollworkError::validation("glow id and anchor must be non-empty"));
        }
        if let Some(r) = self.radius {
            if !(r.is_finite() && r > 0.0) {
                return Err(ScrollworkError::validation(format!(
                    "glow '{}' radius must be finite and > 0, got {r}",
                    self.id
                )));
            }
        }
        if !(0.0..=100.0).contains(&self.transparent_at) {
            return Err(ScrollworkError::validation(format!(
                "glow '{}' transparent stop must be within 0..=100%, got {}",
                self.id, self.transparent_at
            )));
        }
        if matches!(&self.paint, GlowPaint::Colors(c) if c.is_empty()) {
            return Err(ScrollworkError::validation(format!(
                "glow '{}' needs at least one color",
                self.id
            )));
        }
        Ok(())
    }
}

/// `radial-gradient(<radius> circle at x y, <stops>, transparent <p>%)`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RadialGradient {
    /// Circle radius; farthest corner when `None`.
    pub radius: Option<f64>,
    /// Center in element-local px.
    pub center: Point,
    /// Color stops before the transparent stop.
    pub stops: SmallVec<[Rgba; 2]>,
    /// Transparent stop, percent of the radius.
    pub transparent_at: f64,
}

impl RadialGradient {
    /// Radius the gradient resolves to on an element of `size`.
    pub fn resolved_radius(&self, size: Size) -> f64 {
        self.radius.unwrap_or_else(|| {
            let dx = self.center.x.abs().max((size.width - self.center.x).abs());
            let dy = self.center.y.abs().max((size.height - self.center.y).abs());
            dx.hypot(dy)
        })
    }

    /// Whether any colored part of the gradient falls on an element of `size`.
    pub fn reaches(&self, size: Size) -> bool {
        if self.stops.iter().all(|c| c.is_transparent()) {
            return false;
        }
        let visible = self.resolved_radius(size) * self.transparent_at / 100.0;
        let nearest = Point::new(
            self.center.x.clamp(0.0, size.width),
            self.center.y.clamp(0.0, size.height),
        );
        nearest.distance(self.center) < visible
    }

    /// CSS `background` value.
    pub fn to_css(&self) -> String {
        let shape = match self.radius {
            Some(r) => format!("{r}px circle"),
            None => "circle".to_owned(),
        };
        let stops: Vec<String> = self.stops.iter().map(ToString::to_string).collect();
        format!(
            "radial-gradient({shape} at {}px {}px, {}, transparent {}%)",
            self.center.x,
            self.center.y,
            stops.join(", "),
            self.transparent_at
        )
    }
}

/// One glow's output for a frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GlowFrame {
    /// Glow id.
    pub id: String,
    /// Gradient to paint.
    pub gradient: RadialGradient,
    /// Layer opacity.
    pub opacity: f64,
    /// Whether the pointer is over the container.
    pub hovered: bool,
    /// Element size used to judge visibility.
    pub size: Size,
}

impl GlowFrame {
    /// Whether nothing of the glow is visible.
    pub fn is_transparent(&self) -> bool {
        self.opacity <= 0.0 || !self.gradient.reaches(self.size)
    }

    /// CSS declarations for the glow layer.
    pub fn css(&self) -> String {
        format!("opacity: {}; background: {}", self.opacity, self.gradient.to_css())
    }
}

#[derive(Clone, Copy, Debug)]
struct Measured {
    element: Rect,
    container: Rect,
}

/// Runtime state of one glow.
///
/// Pointer events only mark the glow dirty. Bounding boxes are read in the next frame's read
/// phase ([`GlowTracker::measure`]) and local coordinates computed once per frame
/// ([`GlowTracker::compute`]).
///
/// Until the pointer has been over the container the layer renders at opacity 0, whatever the
/// gradient's reach. A [`LeaveBehavior::Reset`] glow returns to that state on leave.
#[derive(Clone, Debug)]
pub struct GlowTracker {
    spec: GlowSpec,
    local: Point,
    hovered: bool,
    dirty: bool,
    measured: Option<Measured>,
    size: Size,
    sized: bool,
    engaged: bool,
    fade: Option<HoverFade>,
}

impl GlowTracker {
    /// Tracker at the sentinel.
    pub fn new(spec: GlowSpec) -> ScrollworkResult<Self> {
        spec.validate()?;
        let fade = spec
            .hover_fade_ms
            .map(|ms| HoverFade::new(Duration::from_millis(ms)));
        Ok(Self {
            local: spec.sentinel,
            spec,
            hovered: false,
            dirty: false,
            measured: None,
            size: Size::ZERO,
            sized: false,
            engaged: false,
            fade,
        })
    }

    /// Declaration.
    pub fn spec(&self) -> &GlowSpec {
        &self.spec
    }

    /// Current element-local pointer position.
    pub fn local(&self) -> Point {
        self.local
    }

    /// Whether a recompute is queued for the next frame.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Queue a recompute; called for every pointer change.
    pub fn pointer_changed(&mut self) {
        self.dirty = true;
    }

    /// Element size from the last read; zero before the first one.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Drop the cached element size; the next read phase measures again.
    pub fn layout_changed(&mut self) {
        self.sized = false;
    }

    /// Read phase: fetch viewport-space boxes if a recompute is queued or the element size is
    /// not known yet.
    ///
    /// Returns `false` when the element is not laid out yet; the glow then stays where it was
    /// and retries next frame.
    pub fn measure(&mut self, geometry: &dyn Geometry, scroll_y: f64) -> bool {
        if !self.dirty && self.sized {
            return true;
        }
        let Some(element) = geometry.element_box(&self.spec.anchor) else {
            self.measured = None;
            return false;
        };
        let element = element.viewport_rect(scroll_y);
        let container = geometry
            .element_box(self.spec.container())
            .map_or(element, |c| c.viewport_rect(scroll_y));
        self.size = element.size();
        self.sized = true;
        self.measured = Some(Measured { element, container });
        true
    }

    /// Compute phase: translate the pointer into local coordinates and update hover state.
    pub fn compute(&mut self, pointer: PointerState, now: Duration) {
        if !self.dirty {
            return;
        }
        let Some(m) = self.measured.take() else {
            return;
        };
        self.dirty = false;

        let inside = pointer.inside && pointer.position.is_some_and(|p| m.container.contains(p));
        match pointer.position {
            Some(p) if inside => {
                self.engaged = true;
                let local = p - m.element.origin().to_vec2();
                self.local = if self.spec.round {
                    Point::new(round_half_up(local.x), round_half_up(local.y))
                } else {
                    local
                };
            }
            _ if self.spec.on_leave == LeaveBehavior::Reset => {
                self.local = self.spec.sentinel;
                self.engaged = false;
            }
            _ => {}
        }
        if inside != self.hovered {
            tracing::trace!(id = %self.spec.id, inside, "glow hover changed");
        }
        self.hovered = inside;
        if let Some(fade) = &mut self.fade {
            fade.set(inside, now);
        }
    }

    /// Layer opacity at `now`; 0 while the glow sits at its sentinel.
    pub fn opacity(&self, now: Duration) -> f64 {
        if !self.engaged {
            return 0.0;
        }
        self.fade.as_ref().map_or(1.0, |f| f.value(now))
    }

    /// Whether another frame is needed (pending recompute or running fade).
    pub fn needs_frame(&self, now: Duration) -> bool {
        self.dirty || self.fade.as_ref().is_some_and(|f| f.is_animating(now))
    }

    /// Output for a frame. `accent` colors [`GlowPaint::Accent`] glows.
    pub fn frame(&self, accent: AccentColor, now: Duration) -> GlowFrame {
        let stops: SmallVec<[Rgba; 2]> = match &self.spec.paint {
            GlowPaint::Accent => SmallVec::from_buf([accent.from, accent.to]),
            GlowPaint::Colors(colors) => colors.iter().copied().collect(),
        };
        GlowFrame {
            id: self.spec.id.clone(),
            gradient: RadialGradient {
                radius: self.spec.radius,
                center: self.local,
                stops,
                transparent_at: self.spec.transparent_at,
            },
            opacity: self.opacity(now),
            hovered: self.hovered,
            size: self.size,
        }
    }

    /// Output for environments without animation frames: nothing shown.
    pub fn frame_disabled(&self, accent: AccentColor) -> GlowFrame {
        GlowFrame {
            opacity: 0.0,
            hovered: false,
            ..self.frame(accent, Duration::ZERO)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pointer/glow.rs"]
mod tests;
