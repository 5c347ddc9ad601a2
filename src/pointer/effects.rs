use crate::foundation::core::{Point, Rect, Vec2, Viewport};
use crate::foundation::error::{ScrollworkError, ScrollworkResult};
use crate::viewport::geometry::Geometry;
use crate::viewport::tracker::PointerState;

/// Card rotation following the pointer, in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Tilt {
    /// Rotation about the horizontal axis.
    pub x_deg: f64,
    /// Rotation about the vertical axis.
    pub y_deg: f64,
}

impl Tilt {
    /// `perspective(1000px) rotateX(..) rotateY(..)`.
    pub fn css(&self) -> String {
        format!(
            "perspective(1000px) rotateX({}deg) rotateY({}deg)",
            self.x_deg, self.y_deg
        )
    }
}

/// Tilt of a card at `element` (viewport space) for a pointer at `pointer`.
///
/// The distance from the card center is taken relative to half the viewport, so a pointer
/// at the viewport edge tilts by about `max_deg`.
pub fn tilt(pointer: Point, element: Rect, viewport: Viewport, max_deg: f64) -> Tilt {
    let d = pointer - element.center();
    Tilt {
        x_deg: -(d.y / (viewport.height / 2.0)) * max_deg,
        y_deg: (d.x / (viewport.width / 2.0)) * max_deg,
    }
}

/// Offset pulling an element toward the pointer: `strength` × distance from its center.
pub fn magnetic(pointer: Point, element: Rect, strength: f64) -> Vec2 {
    (pointer - element.center()) * strength
}

/// Pointer-driven transform on one element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectSpec {
    /// Perspective tilt while the pointer is over `container`; the last tilt is kept on leave.
    Tilt {
        /// Unique id within the page.
        id: String,
        /// DOM id of the tilted card.
        anchor: String,
        /// DOM id of the region that feeds pointer moves.
        container: String,
        /// Rotation at a half-viewport distance, degrees.
        #[serde(default = "default_max_deg")]
        max_deg: f64,
    },
    /// Button pulled toward the pointer while hovered, released on leave.
    Magnetic {
        /// Unique id within the page.
        id: String,
        /// DOM id of the button.
        anchor: String,
        /// Fraction of the center distance applied as offset.
        #[serde(default = "default_strength")]
        strength: f64,
    },
}

fn default_max_deg() -> f64 {
    3.0
}

fn default_strength() -> f64 {
    0.35
}

impl EffectSpec {
    /// Effect id.
    pub fn id(&self) -> &str {
        match self {
            Self::Tilt { id, .. } | Self::Magnetic { id, .. } => id,
        }
    }

    /// DOM id of the transformed element.
    pub fn anchor(&self) -> &str {
        match self {
            Self::Tilt { anchor, .. } | Self::Magnetic { anchor, .. } => anchor,
        }
    }

    fn container(&self) -> &str {
        match self {
            Self::Tilt { container, .. } => container,
            Self::Magnetic { anchor, .. } => anchor,
        }
    }

    /// Check that the factor is finite.
    pub fn validate(&self) -> ScrollworkResult<()> {
        let factor = match self {
            Self::Tilt { max_deg, .. } => *max_deg,
            Self::Magnetic { strength, .. } => *strength,
        };
        if !factor.is_finite() {
            return Err(ScrollworkError::validation(format!(
                "effect '{}' factor must be finite",
                self.id()
            )));
        }
        Ok(())
    }
}

/// Transform produced by an effect for a frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectValue {
    /// Card rotation.
    Tilt(Tilt),
    /// Button offset, px.
    Magnetic {
        /// Horizontal offset.
        x: f64,
        /// Vertical offset.
        y: f64,
    },
}

impl EffectValue {
    /// CSS `transform` value.
    pub fn css(&self) -> String {
        match self {
            Self::Tilt(t) => t.css(),
            Self::Magnetic { x, y } => format!("translate({x}px, {y}px)"),
        }
    }
}

/// One effect's output for a frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EffectFrame {
    /// Effect id.
    pub id: String,
    /// Current transform.
    pub value: EffectValue,
}

/// Runtime state of one pointer effect, measured and computed like a glow.
#[derive(Clone, Debug)]
pub struct PointerEffect {
    spec: EffectSpec,
    value: EffectValue,
    dirty: bool,
    measured: Option<(Rect, Rect)>,
}

impl PointerEffect {
    /// Effect at rest.
    pub fn new(spec: EffectSpec) -> ScrollworkResult<Self> {
        spec.validate()?;
        let value = match &spec {
            EffectSpec::Tilt { .. } => EffectValue::Tilt(Tilt::default()),
            EffectSpec::Magnetic { .. } => EffectValue::Magnetic { x: 0.0, y: 0.0 },
        };
        Ok(Self {
            spec,
            value,
            dirty: false,
            measured: None,
        })
    }

    /// Declaration.
    pub fn spec(&self) -> &EffectSpec {
        &self.spec
    }

    /// Current transform.
    pub fn value(&self) -> EffectValue {
        self.value
    }

    /// Whether a recompute is queued.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Queue a recompute.
    pub fn pointer_changed(&mut self) {
        self.dirty = true;
    }

    /// Read phase. `false` while the element is not laid out.
    pub fn measure(&mut self, geometry: &dyn Geometry, scroll_y: f64) -> bool {
        if !self.dirty {
            return true;
        }
        let Some(element) = geometry.element_box(self.spec.anchor()) else {
            self.measured = None;
            return false;
        };
        let element = element.viewport_rect(scroll_y);
        let container = geometry
            .element_box(self.spec.container())
            .map_or(element, |c| c.viewport_rect(scroll_y));
        self.measured = Some((element, container));
        true
    }

    /// Compute phase.
    pub fn compute(&mut self, pointer: PointerState, viewport: Viewport) {
        if !self.dirty {
            return;
        }
        let Some((element, container)) = self.measured.take() else {
            return;
        };
        self.dirty = false;
        let hovered = pointer
            .position
            .filter(|p| pointer.inside && container.contains(*p));
        self.value = match (&self.spec, hovered) {
            (EffectSpec::Tilt { max_deg, .. }, Some(p)) => {
                EffectValue::Tilt(tilt(p, element, viewport, *max_deg))
            }
            (EffectSpec::Tilt { .. }, None) => self.value,
            (EffectSpec::Magnetic { strength, .. }, Some(p)) => {
                let v = magnetic(p, element, *strength);
                EffectValue::Magnetic { x: v.x, y: v.y }
            }
            (EffectSpec::Magnetic { .. }, None) => EffectValue::Magnetic { x: 0.0, y: 0.0 },
        };
    }

    /// Output for a frame.
    pub fn frame(&self) -> EffectFrame {
        EffectFrame {
            id: self.spec.id().to_owned(),
            value: self.value,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pointer/effects.rs"]
mod tests;
