use crate::foundation::core::{Rect, Viewport};
use crate::foundation::error::{ScrollworkError, ScrollworkResult};
use crate::section::registry::{SectionId, SectionRegistry};
use crate::section::route::Route;
use crate::viewport::geometry::Geometry;
use std::collections::BTreeSet;

/// Horizontal slice of the viewport, as fractions of its height, used to decide which
/// section is being read.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ActivationBand {
    /// Band top, `0.0` = viewport top.
    pub top: f64,
    /// Band bottom, `1.0` = viewport bottom.
    pub bottom: f64,
}

impl ActivationBand {
    /// Validated band with `0 <= top < bottom <= 1`.
    pub fn new(top: f64, bottom: f64) -> ScrollworkResult<Self> {
        let band = Self { top, bottom };
        band.validate()?;
        Ok(band)
    }

    /// Band equivalent to an observer root margin of `-top% 0 -bottom% 0`.
    pub fn from_root_margin(top_percent: f64, bottom_percent: f64) -> ScrollworkResult<Self> {
        Self::new(top_percent / 100.0, 1.0 - bottom_percent / 100.0)
    }

    /// Check the band invariants.
    pub fn validate(&self) -> ScrollworkResult<()> {
        let ok = (0.0..=1.0).contains(&self.top)
            && (0.0..=1.0).contains(&self.bottom)
            && self.top < self.bottom;
        if !ok {
            return Err(ScrollworkError::validation(format!(
                "activation band must satisfy 0 <= top < bottom <= 1, got [{}, {}]",
                self.top, self.bottom
            )));
        }
        Ok(())
    }

    /// Pixel span of the band for a viewport.
    pub fn span_px(&self, viewport: Viewport) -> (f64, f64) {
        (viewport.y_at(self.top), viewport.y_at(self.bottom))
    }

    /// Whether a viewport-space rect overlaps the band with non-zero height.
    pub fn intersects(&self, rect: Rect, viewport: Viewport) -> bool {
        let (top, bottom) = self.span_px(viewport);
        rect.height() > 0.0 && rect.y0 < bottom && rect.y1 > top
    }
}

impl Default for ActivationBand {
    fn default() -> Self {
        Self {
            top: 0.2,
            bottom: 0.7,
        }
    }
}

/// How the resolver picks the active section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveMode {
    /// Follow the scroll position through the activation band.
    Scroll,
    /// Fixed for the page's lifetime (route mapping, or degraded environment).
    Static,
}

/// A change of active section.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Transition {
    /// Previously active section.
    pub from: SectionId,
    /// Newly active section.
    pub to: SectionId,
}

/// State machine whose states are registered section ids.
///
/// The single transition is "a section enters the activation band". When several sections
/// enter during one observation, the last one observed (in registration order) wins. When no
/// section intersects the band, the current state is kept.
#[derive(Clone, Debug)]
pub struct ActiveSectionResolver {
    band: ActivationBand,
    mode: ResolveMode,
    active: SectionId,
    settled: bool,
    intersecting: BTreeSet<SectionId>,
}

impl ActiveSectionResolver {
    /// Scroll-tracking resolver. `fallback` is reported until a section registers.
    pub fn scroll(band: ActivationBand, fallback: SectionId) -> Self {
        Self {
            band,
            mode: ResolveMode::Scroll,
            active: fallback,
            settled: false,
            intersecting: BTreeSet::new(),
        }
    }

    /// Static resolver pinned to `active`.
    pub fn fixed(active: SectionId) -> Self {
        Self {
            band: ActivationBand::default(),
            mode: ResolveMode::Static,
            active,
            settled: true,
            intersecting: BTreeSet::new(),
        }
    }

    /// Resolver for a route: scroll tracking on the home page, the static route mapping
    /// elsewhere. Unmapped routes keep `fallback`.
    pub fn for_route(route: &Route, band: ActivationBand, fallback: SectionId) -> Self {
        if route.is_scroll_tracked() {
            Self::scroll(band, fallback)
        } else {
            Self::fixed(route.static_section().unwrap_or(fallback))
        }
    }

    /// Current mode.
    pub fn mode(&self) -> ResolveMode {
        self.mode
    }

    /// Activation band in use.
    pub fn band(&self) -> ActivationBand {
        self.band
    }

    /// The active section id.
    pub fn active(&self) -> &SectionId {
        &self.active
    }

    /// Sections currently inside the band, as of the last observation.
    pub fn intersecting(&self) -> impl Iterator<Item = &SectionId> {
        self.intersecting.iter()
    }

    /// Switch to static mode, keeping the current id (used when observers are unavailable).
    ///
    /// A resolver frozen before any section registered still adopts the first one through
    /// [`ActiveSectionResolver::settle`].
    pub fn freeze(&mut self) {
        self.mode = ResolveMode::Static;
        self.intersecting.clear();
    }

    /// Adopt the first registered section if none has been adopted yet, or if the active
    /// section has been deregistered. Fixed route mappings are never replaced.
    pub fn settle(&mut self, registry: &SectionRegistry) -> Option<Transition> {
        let previous = self.active.clone();
        self.settle_inner(registry);
        self.transition_from(previous)
    }

    fn settle_inner(&mut self, registry: &SectionRegistry) {
        if self.settled && (self.mode == ResolveMode::Static || registry.contains(&self.active)) {
            return;
        }
        if let Some(first) = registry.first() {
            self.active = first.id.clone();
            self.settled = true;
        }
    }

    fn transition_from(&self, previous: SectionId) -> Option<Transition> {
        if self.active == previous {
            return None;
        }
        tracing::debug!(from = %previous, to = %self.active, "active section changed");
        Some(Transition {
            from: previous,
            to: self.active.clone(),
        })
    }

    /// Re-evaluate against current geometry and scroll position.
    ///
    /// Sections whose anchor is not rendered are skipped and picked up by a later call.
    pub fn observe(
        &mut self,
        registry: &SectionRegistry,
        geometry: &dyn Geometry,
        scroll_y: f64,
        viewport: Viewport,
    ) -> Option<Transition> {
        if self.mode == ResolveMode::Static {
            return None;
        }

        let previous = self.active.clone();
        self.settle_inner(registry);
        self.intersecting.retain(|id| registry.contains(id));

        let mut entered = None;
        for section in registry.iter() {
            let Some(element) = geometry.element_box(section.anchor()) else {
                tracing::trace!(id = %section.id, "section anchor not rendered");
                self.intersecting.remove(&section.id);
                continue;
            };
            let rect = element.viewport_rect(scroll_y);
            if self.band.intersects(rect, viewport) {
                if self.intersecting.insert(section.id.clone()) {
                    entered = Some(&section.id);
                }
            } else {
                self.intersecting.remove(&section.id);
            }
        }

        if let Some(id) = entered {
            self.active = id.clone();
        }
        tracing::trace!(scroll_y, active = %self.active, "sections observed");
        self.transition_from(previous)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/section/resolver.rs"]
mod tests;
