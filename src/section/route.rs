use crate::section::registry::SectionId;
use std::fmt;

/// Page routes served by the site router.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Route {
    /// `/`, the scrollable single-page view.
    Home,
    /// `/about`
    About,
    /// `/services`
    Services,
    /// `/work` (and project detail pages below it)
    Work,
    /// `/testimonials`
    Testimonials,
    /// `/contact`
    Contact,
    /// Anything else; keeps whatever section was active.
    Other(String),
}

/// Route prefix → section shown highlighted when the page is not scroll-tracked.
const STATIC_SECTIONS: [(&str, &str); 5] = [
    ("/work", "featured-work"),
    ("/about", "introduction"),
    ("/services", "services"),
    ("/contact", "contact"),
    ("/testimonials", "testimonials"),
];

impl Route {
    /// Every known route, in navigation order.
    pub const KNOWN: [Route; 6] = [
        Route::Home,
        Route::About,
        Route::Services,
        Route::Work,
        Route::Testimonials,
        Route::Contact,
    ];

    /// Parse a pathname. Query strings, fragments and trailing slashes are ignored; a known
    /// route also matches its sub-paths (`/work/2` is [`Route::Work`]).
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Self::Home;
        }
        for route in Self::KNOWN.iter().skip(1) {
            let prefix = route.path();
            let matches = trimmed == prefix
                || trimmed
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'));
            if matches {
                return route.clone();
            }
        }
        Self::Other(trimmed.to_owned())
    }

    /// Canonical pathname.
    pub fn path(&self) -> &str {
        match self {
            Self::Home => "/",
            Self::About => "/about",
            Self::Services => "/services",
            Self::Work => "/work",
            Self::Testimonials => "/testimonials",
            Self::Contact => "/contact",
            Self::Other(p) => p,
        }
    }

    /// Whether the active section follows the scroll position on this route.
    pub fn is_scroll_tracked(&self) -> bool {
        matches!(self, Self::Home)
    }

    /// Section highlighted on a non-scroll-tracked route, if the route maps to one.
    pub fn static_section(&self) -> Option<SectionId> {
        if self.is_scroll_tracked() {
            return None;
        }
        let path = self.path();
        STATIC_SECTIONS
            .iter()
            .find(|(prefix, _)| {
                path == *prefix
                    || path
                        .strip_prefix(prefix)
                        .is_some_and(|rest| rest.starts_with('/'))
            })
            .map(|(_, id)| SectionId::from(*id))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl From<String> for Route {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Route> for String {
    fn from(value: Route) -> Self {
        value.path().to_owned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/section/route.rs"]
mod tests;
