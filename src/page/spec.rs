use crate::foundation::core::Viewport;
use crate::foundation::error::{ScrollworkError, ScrollworkResult};
use crate::nav::NavSpec;
use crate::pointer::effects::EffectSpec;
use crate::pointer::glow::GlowSpec;
use crate::section::registry::Section;
use crate::section::resolver::ActivationBand;
use crate::section::route::Route;
use crate::timeline::scroll::TimelineSpec;
use crate::transition::TransitionSpec;
use crate::viewport::geometry::StaticLayout;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

fn yes() -> bool {
    true
}

/// Browser features the runtime depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Capabilities {
    /// Intersection observers are available; without them the active section is frozen.
    #[serde(default = "yes")]
    pub intersection_observer: bool,
    /// Animation frames are available; without them timelines render their end state and
    /// glows are disabled.
    #[serde(default = "yes")]
    pub animation_frames: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            intersection_observer: true,
            animation_frames: true,
        }
    }
}

/// Page-wide runtime options.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageOptions {
    /// Band a section must enter to become active.
    #[serde(default)]
    pub band: ActivationBand,
    /// Available browser features.
    #[serde(default)]
    pub capabilities: Capabilities,
    /// Route transition; none when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<TransitionSpec>,
}

/// One mountable view (a page section component) and everything it registers.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewSpec {
    /// View name, unique within the page.
    pub name: String,
    /// Sections the view registers for activation tracking.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Section>,
    /// Scroll timelines.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub timelines: Vec<TimelineSpec>,
    /// Pointer glows.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub glows: Vec<GlowSpec>,
    /// Tilt and magnetic effects.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<EffectSpec>,
}

impl ViewSpec {
    /// Empty view.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Declarative description of one page: its route, views, navigation and (for offline use)
/// its rendered layout.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageSpec {
    /// Route the page is served at.
    pub route: Route,
    /// Initial viewport.
    #[serde(default)]
    pub viewport: Viewport,
    /// Runtime options.
    #[serde(default)]
    pub options: PageOptions,
    /// Navigation bar configuration.
    #[serde(default)]
    pub nav: NavSpec,
    /// Views in document order.
    #[serde(default)]
    pub views: Vec<ViewSpec>,
    /// Element geometry, keyed by DOM id.
    #[serde(default)]
    pub layout: StaticLayout,
}

impl PageSpec {
    /// Empty page at `route`.
    pub fn new(route: Route) -> Self {
        Self {
            route,
            viewport: Viewport::default(),
            options: PageOptions::default(),
            nav: NavSpec::default(),
            views: Vec::new(),
            layout: StaticLayout::new(),
        }
    }

    /// Parse a page spec from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrollworkResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ScrollworkError::serde(format!("parse page spec JSON: {e}")))
    }

    /// Parse a page spec from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScrollworkResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrollworkError::validation(format!("open page spec JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> ScrollworkResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ScrollworkError::serde(format!("serialize page spec: {e}")))
    }

    /// Check static invariants: valid viewport and band, unique view names, unique section,
    /// timeline, glow and effect ids across the page, and well-formed declarations.
    pub fn validate(&self) -> ScrollworkResult<()> {
        if !self.viewport.is_valid() {
            return Err(ScrollworkError::validation(format!(
                "viewport must be finite and > 0, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        self.options.band.validate()?;
        if !(self.nav.scrolled_threshold.is_finite() && self.nav.scrolled_threshold >= 0.0) {
            return Err(ScrollworkError::validation(
                "nav scrolled threshold must be finite and >= 0",
            ));
        }
        if let Some(t) = &self.options.transition {
            t.timeline()?;
        }

        let mut views = BTreeSet::new();
        let mut sections = BTreeSet::new();
        let mut anchors = BTreeSet::new();
        let mut ids = BTreeSet::new();
        for view in &self.views {
            if view.name.trim().is_empty() {
                return Err(ScrollworkError::validation("view name must be non-empty"));
            }
            if !views.insert(view.name.as_str()) {
                return Err(ScrollworkError::validation(format!(
                    "duplicate view '{}'",
                    view.name
                )));
            }
            for s in &view.sections {
                if !sections.insert(s.id.as_str()) {
                    return Err(ScrollworkError::validation(format!(
                        "duplicate section id '{}' in view '{}'",
                        s.id, view.name
                    )));
                }
                if !anchors.insert(s.anchor()) {
                    return Err(ScrollworkError::validation(format!(
                        "duplicate section anchor '{}' in view '{}'",
                        s.anchor(),
                        view.name
                    )));
                }
            }
            for t in &view.timelines {
                t.validate()?;
                if !ids.insert(("timeline", t.id.as_str())) {
                    return Err(ScrollworkError::validation(format!(
                        "duplicate timeline id '{}'",
                        t.id
                    )));
                }
            }
            for g in &view.glows {
                g.validate()?;
                if !ids.insert(("glow", g.id.as_str())) {
                    return Err(ScrollworkError::validation(format!(
                        "duplicate glow id '{}'",
                        g.id
                    )));
                }
            }
            for e in &view.effects {
                e.validate()?;
                if !ids.insert(("effect", e.id())) {
                    return Err(ScrollworkError::validation(format!(
                        "duplicate effect id '{}'",
                        e.id()
                    )));
                }
            }
        }
        Ok(())
    }

    /// View by name.
    pub fn view(&self, name: &str) -> Option<&ViewSpec> {
        self.views.iter().find(|v| v.name == name)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/spec.rs"]
mod tests;
