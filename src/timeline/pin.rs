use crate::foundation::core::{Rect, Viewport};
use crate::foundation::error::{ScrollworkError, ScrollworkResult};
use crate::timeline::trigger::{Edge, TriggerPos};
use crate::viewport::geometry::{ElementBox, Geometry, Positioning};

fn default_pin_start() -> TriggerPos {
    TriggerPos::new(Edge::Top, Edge::Top)
}

fn default_spacing() -> bool {
    true
}

/// Hold the trigger element in place for a scroll distance.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PinSpec {
    /// When pinning begins; the element's top meeting the viewport top by default.
    #[serde(default = "default_pin_start")]
    pub start: TriggerPos,
    /// Scroll distance the element stays pinned, px.
    pub distance: f64,
    /// Whether following content is pushed down by `distance` while the pin is in place.
    #[serde(default = "default_spacing")]
    pub spacing: bool,
}

impl PinSpec {
    /// Pin from "top top" for `distance` px, with spacing.
    pub fn new(distance: f64) -> Self {
        Self {
            start: default_pin_start(),
            distance,
            spacing: true,
        }
    }

    /// Check the distance is finite and non-negative.
    pub fn validate(&self) -> ScrollworkResult<()> {
        if !(self.distance.is_finite() && self.distance >= 0.0) {
            return Err(ScrollworkError::timeline(format!(
                "pin distance must be finite and >= 0, got {}",
                self.distance
            )));
        }
        Ok(())
    }

    /// Resolve against the element's unpinned document rect.
    pub fn resolve(&self, anchor: &str, element_doc: Rect, viewport: Viewport) -> ResolvedPin {
        ResolvedPin {
            anchor: anchor.to_owned(),
            start: self.start.scroll_offset(element_doc, viewport),
            distance: self.distance,
            spacing: self.spacing,
            after_y: element_doc.y1,
        }
    }
}

/// A pin placed on the page for the current layout.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedPin {
    /// DOM id of the pinned element.
    pub anchor: String,
    /// Scroll offset at which pinning begins.
    pub start: f64,
    /// Pinned scroll distance.
    pub distance: f64,
    /// Whether a spacer pushes later content down.
    pub spacing: bool,
    /// Document y of the pinned element's bottom edge, before spacing.
    pub after_y: f64,
}

impl ResolvedPin {
    /// Scroll offset at which pinning ends.
    pub fn end(&self) -> f64 {
        self.start + self.distance
    }

    /// Whether the element is held at `scroll_y`.
    pub fn is_pinned(&self, scroll_y: f64) -> bool {
        self.distance > 0.0 && self.start <= scroll_y && scroll_y <= self.end()
    }

    /// How far the element has been carried down the document to stay in place:
    /// `0` before the pin, `scroll_y - start` during it, `distance` after it.
    pub fn offset(&self, scroll_y: f64) -> f64 {
        (scroll_y - self.start).clamp(0.0, self.distance)
    }

    /// Extra document offset the spacer adds to a flow box starting at `y0`.
    pub fn shift_for(&self, y0: f64) -> f64 {
        if self.spacing && y0 >= self.after_y {
            self.distance
        } else {
            0.0
        }
    }
}

/// Geometry with pin spacers inserted.
///
/// Flow boxes below a spaced pin move down by the pin distance, and the pinned element's own
/// box grows to cover its spacer, the way a pin-spacer wrapper occupies the document.
/// `pins` must be in document order, as [`resolve_pins`] returns them.
pub struct SpacedGeometry<'a, G: ?Sized> {
    inner: &'a G,
    pins: &'a [ResolvedPin],
}

impl<'a, G: Geometry + ?Sized> SpacedGeometry<'a, G> {
    /// Wrap `inner`, applying `pins`.
    pub fn new(inner: &'a G, pins: &'a [ResolvedPin]) -> Self {
        Self { inner, pins }
    }
}

impl<G: Geometry + ?Sized> Geometry for SpacedGeometry<'_, G> {
    fn element_box(&self, anchor: &str) -> Option<ElementBox> {
        let mut element = self.inner.element_box(anchor)?;
        if element.positioning == Positioning::Fixed {
            return Some(element);
        }
        let raw = element.rect;
        let mut y0 = raw.y0;
        let mut grow = 0.0;
        // Each pin's `after_y` already includes the spacers above it.
        for pin in self.pins.iter().filter(|p| p.spacing) {
            if pin.anchor == anchor {
                grow += pin.distance;
            } else {
                y0 += pin.shift_for(y0);
            }
        }
        let shift = y0 - raw.y0;
        element.rect = Rect::new(raw.x0, y0, raw.x1, raw.y1 + shift + grow);
        Some(element)
    }
}

/// Resolve pins top to bottom, each against the spacers of the pins above it.
///
/// Pins whose anchor is not rendered are left out and picked up on the next layout pass.
pub fn resolve_pins<'s>(
    specs: impl IntoIterator<Item = (&'s str, &'s PinSpec)>,
    geometry: &dyn Geometry,
    viewport: Viewport,
) -> Vec<ResolvedPin> {
    let mut found: Vec<(&str, &PinSpec, f64)> = specs
        .into_iter()
        .filter_map(|(anchor, spec)| {
            let element = geometry.element_box(anchor)?;
            Some((anchor, spec, element.document_rect(0.0).y0))
        })
        .collect();
    found.sort_by(|a, b| a.2.total_cmp(&b.2));

    let mut pins: Vec<ResolvedPin> = Vec::with_capacity(found.len());
    for (anchor, spec, _) in found {
        let spaced = SpacedGeometry::new(geometry, &pins);
        let Some(element) = spaced.element_box(anchor) else {
            continue;
        };
        let pin = spec.resolve(anchor, element.document_rect(0.0), viewport);
        tracing::trace!(anchor, start = pin.start, distance = pin.distance, "pin resolved");
        pins.push(pin);
    }
    pins
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/pin.rs"]
mod tests;
