//! The studio site: tracked sections, their accents and the views each route mounts.

/// Reference page geometry.
pub mod layout;
/// View declarations.
pub mod views;

use crate::foundation::core::{AccentColor, Rgba, Viewport};
use crate::nav::{FALLBACK_ACCENT, NavSpec};
use crate::page::spec::{PageOptions, PageSpec, ViewSpec};
use crate::section::registry::SectionId;
use crate::section::route::Route;
use crate::transition::TransitionSpec;

const GREEN: AccentColor = AccentColor::new(
    Rgba::new(34, 197, 94, 0.8),
    Rgba::new(21, 128, 61, 0.8),
);
const BLUE: AccentColor = AccentColor::new(
    Rgba::new(59, 130, 246, 0.8),
    Rgba::new(29, 78, 216, 0.8),
);
const ORANGE: AccentColor = AccentColor::new(
    Rgba::new(249, 115, 22, 0.8),
    Rgba::new(194, 65, 12, 0.8),
);

/// Landing section.
pub const HERO: (&str, AccentColor) = ("hero", FALLBACK_ACCENT);
/// Project showcase.
pub const FEATURED_WORK: (&str, AccentColor) = ("featured-work", GREEN);
/// Studio philosophy; rendered by the element with DOM id `philosophy`.
pub const INTRODUCTION: (&str, AccentColor) = ("introduction", BLUE);
/// Service list.
pub const SERVICES: (&str, AccentColor) = ("services", ORANGE);
/// Client quotes.
pub const TESTIMONIALS: (&str, AccentColor) = ("testimonials", FALLBACK_ACCENT);
/// Contact form.
pub const CONTACT: (&str, AccentColor) = ("contact", BLUE);

/// Tracked sections in document order.
pub const SECTIONS: [(&str, AccentColor); 6] =
    [HERO, FEATURED_WORK, INTRODUCTION, SERVICES, TESTIMONIALS, CONTACT];

/// Navigation with the accent of every tracked section.
pub fn nav_spec() -> NavSpec {
    NavSpec {
        accents: SECTIONS
            .iter()
            .map(|(id, accent)| (SectionId::new(*id), *accent))
            .collect(),
        ..NavSpec::default()
    }
}

/// Views mounted at `route`, in document order. Every page has the navigation bar.
pub fn views_for(route: &Route) -> Vec<ViewSpec> {
    let mut out = vec![views::nav()];
    match route {
        Route::Home => out.extend([
            views::hero(),
            views::featured_work(),
            views::philosophy(),
            views::process(),
            views::services(),
            views::testimonials(),
            views::contact(),
            views::footer(),
        ]),
        Route::About => out.push(views::philosophy()),
        Route::Services => out.push(views::services()),
        Route::Work => out.push(views::featured_work()),
        Route::Testimonials => out.push(views::testimonials()),
        Route::Contact => out.extend([views::contact(), views::footer()]),
        Route::Other(_) => {}
    }
    out
}

/// Complete page spec for `route`, with its reference layout at `viewport`.
pub fn page_spec(route: &Route, viewport: Viewport) -> PageSpec {
    let views = views_for(route);
    PageSpec {
        route: route.clone(),
        viewport,
        options: PageOptions {
            transition: Some(TransitionSpec::default()),
            ..PageOptions::default()
        },
        nav: nav_spec(),
        layout: layout::layout(&views, viewport),
        views,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/site/site.rs"]
mod tests;
