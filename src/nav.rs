//! Navigation bar presentation derived from the active section and scroll offset.

use crate::foundation::core::{AccentColor, Rgba};
use crate::section::registry::{SectionId, SectionRegistry};
use crate::section::route::Route;
use std::collections::BTreeMap;

/// Accent used when nothing else matches (hero red).
pub const FALLBACK_ACCENT: AccentColor = AccentColor::new(
    Rgba::new(239, 68, 68, 0.8),
    Rgba::new(153, 27, 27, 0.8),
);

/// One navigation link.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NavLink {
    /// Visible label.
    pub name: String,
    /// Target route.
    pub href: Route,
}

impl NavLink {
    /// Link to `href`.
    pub fn new(name: impl Into<String>, href: Route) -> Self {
        Self {
            name: name.into(),
            href,
        }
    }
}

fn default_fallback() -> SectionId {
    SectionId::new("hero")
}

fn default_threshold() -> f64 {
    20.0
}

fn default_links() -> Vec<NavLink> {
    vec![
        NavLink::new("Work", Route::Work),
        NavLink::new("About", Route::About),
        NavLink::new("Services", Route::Services),
        NavLink::new("Contact", Route::Contact),
    ]
}

/// Static navigation configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NavSpec {
    /// Glow accent per section id. Sections not listed use their registered accent.
    #[serde(default)]
    pub accents: BTreeMap<SectionId, AccentColor>,
    /// Section whose accent applies when the active one has none; also the initial id.
    #[serde(default = "default_fallback")]
    pub fallback: SectionId,
    /// Scroll offset above which the bar switches to its compact style, px.
    #[serde(default = "default_threshold")]
    pub scrolled_threshold: f64,
    /// Links, in display order.
    #[serde(default = "default_links")]
    pub links: Vec<NavLink>,
}

impl Default for NavSpec {
    fn default() -> Self {
        Self {
            accents: BTreeMap::new(),
            fallback: default_fallback(),
            scrolled_threshold: default_threshold(),
            links: default_links(),
        }
    }
}

impl NavSpec {
    /// Accent for `active`: the configured one, else the registered section's, else the
    /// fallback section's, else [`FALLBACK_ACCENT`].
    pub fn accent_for(&self, active: &SectionId, registry: &SectionRegistry) -> AccentColor {
        self.accents
            .get(active)
            .copied()
            .or_else(|| registry.get(active).map(|s| s.accent))
            .or_else(|| self.accents.get(&self.fallback).copied())
            .or_else(|| registry.get(&self.fallback).map(|s| s.accent))
            .unwrap_or(FALLBACK_ACCENT)
    }
}

/// What the navigation bar shows for a frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct NavPresentation {
    /// Highlighted section.
    pub active: SectionId,
    /// Glow colors.
    pub accent: AccentColor,
    /// Compact style once the page has scrolled past the threshold.
    pub is_scrolled: bool,
    /// Links, with the one matching the current route marked.
    pub links: Vec<NavLinkState>,
}

/// A link with its current-route flag.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct NavLinkState {
    /// Label.
    pub name: String,
    /// Target path.
    pub href: String,
    /// Whether the link targets the current route.
    pub current: bool,
}

impl NavPresentation {
    /// Derive the presentation.
    pub fn compute(
        spec: &NavSpec,
        active: &SectionId,
        registry: &SectionRegistry,
        route: &Route,
        scroll_y: f64,
    ) -> Self {
        Self {
            active: active.clone(),
            accent: spec.accent_for(active, registry),
            is_scrolled: scroll_y > spec.scrolled_threshold,
            links: spec
                .links
                .iter()
                .map(|l| NavLinkState {
                    name: l.name.clone(),
                    href: l.href.path().to_owned(),
                    current: &l.href == route,
                })
                .collect(),
        }
    }

    /// CSS color list for the active accent.
    pub fn glow_colors(&self) -> String {
        self.accent.css_stops()
    }
}

#[cfg(test)]
#[path = "../tests/unit/nav/nav.rs"]
mod tests;
