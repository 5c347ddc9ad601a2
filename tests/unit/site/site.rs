use super::*;
use crate::page::runtime::Page;
use crate::section::registry::SectionRegistry;
use crate::timeline::keyframes::Property;
use crate::viewport::geometry::Geometry;
use crate::viewport::tracker::InputEvent;
use std::time::Duration;

const ROUTES: [&str; 7] = [
    "/",
    "/about",
    "/services",
    "/work",
    "/testimonials",
    "/contact",
    "/blog",
];

fn vp() -> Viewport {
    Viewport::new(1440.0, 900.0).unwrap()
}

fn no_sizes(_: &str) -> Option<kurbo::Size> {
    None
}

#[test]
fn every_route_builds_a_valid_page() {
    for path in ROUTES {
        let spec = page_spec(&Route::parse(path), vp());
        spec.validate().unwrap();
        let page = Page::from_spec(&spec).unwrap();
        assert_eq!(page.mounted_views().count(), spec.views.len(), "{path}");
        assert_eq!(page.mounted_views().next(), Some("nav"));
    }
}

#[test]
fn home_registers_sections_in_document_order() {
    let page = Page::from_spec(&page_spec(&Route::Home, vp())).unwrap();
    let ids: Vec<_> = page.registry().iter().map(|s| s.id.as_str()).collect();
    let expected: Vec<_> = SECTIONS.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, expected);
}

#[test]
fn every_referenced_element_is_laid_out() {
    let spec = page_spec(&Route::Home, vp());
    for view in &spec.views {
        let mut anchors: Vec<&str> = view.sections.iter().map(|s| s.anchor()).collect();
        anchors.extend(view.timelines.iter().map(|t| t.trigger.as_str()));
        anchors.extend(
            view.timelines
                .iter()
                .flat_map(|t| t.tweens.tweens())
                .map(|tw| tw.target.as_str()),
        );
        anchors.extend(view.glows.iter().flat_map(|g| [g.anchor.as_str(), g.container()]));
        anchors.extend(view.effects.iter().map(|e| e.anchor()));
        for anchor in anchors {
            assert!(
                spec.layout.element_box(anchor).is_some(),
                "'{anchor}' of view '{}' has no box",
                view.name
            );
        }
    }
}

#[test]
fn nav_knows_every_section_accent() {
    let nav = nav_spec();
    let empty = SectionRegistry::new();
    for (id, accent) in SECTIONS {
        assert_eq!(nav.accent_for(&SectionId::new(id), &empty), accent);
    }
    assert_eq!(nav.accent_for(&SectionId::new("footer"), &empty), HERO.1);
}

#[test]
fn philosophy_section_is_the_introduction() {
    let view = views::philosophy();
    assert_eq!(view.sections[0].id.as_str(), INTRODUCTION.0);
    assert_eq!(view.sections[0].anchor(), "philosophy");
    let main = view.timelines.iter().find(|t| t.id == "philosophy-main").unwrap();
    assert_eq!(main.pin.as_ref().map(|p| p.distance), Some(1000.0));
    assert_eq!(main.tweens.total_duration(), 3.0);

    // Boxes keep their own-size offsets while they cross.
    for p in [0.0, 0.5, 1.0] {
        let values = main.tweens.apply(p, vp(), &no_sizes);
        assert_eq!(values.get("philosophy-box-1", Property::XPercent), Some(-50.0));
        assert_eq!(values.get("philosophy-box-1", Property::YPercent), Some(20.0));
        assert_eq!(values.get("philosophy-box-2", Property::XPercent), Some(50.0));
        assert_eq!(values.get("philosophy-box-2", Property::YPercent), Some(-80.0));
    }
    let css = main.tweens.apply(0.0, vp(), &no_sizes).css("philosophy-box-1");
    assert!(css.contains("translate(-50%, 20%)"), "{css}");
}

#[test]
fn inner_pages_hold_their_route_section() {
    for (path, section) in [
        ("/about", "introduction"),
        ("/services", "services"),
        ("/work/brand-refresh", "featured-work"),
        ("/contact", "contact"),
    ] {
        let page = Page::from_spec(&page_spec(&Route::parse(path), vp())).unwrap();
        assert_eq!(page.active_section().as_str(), section, "{path}");
    }
}

#[test]
fn scrolling_home_walks_through_sections() {
    let spec = page_spec(&Route::Home, vp());
    let mut page = Page::from_spec(&spec).unwrap();
    let out = page.frame(&spec.layout, Duration::ZERO).unwrap();
    assert_eq!(out.active_section.as_str(), "hero");

    page.handle(InputEvent::Scroll { y: 900.0 });
    let out = page.frame(&spec.layout, Duration::from_millis(16)).unwrap();
    assert_eq!(out.active_section.as_str(), "featured-work");
    assert_eq!(out.nav.accent, FEATURED_WORK.1);

    // Philosophy starts at 2500 and is pinned from there.
    page.handle(InputEvent::Scroll { y: 2600.0 });
    let out = page.frame(&spec.layout, Duration::from_millis(32)).unwrap();
    assert_eq!(out.active_section.as_str(), "introduction");
    let main = out.timeline("philosophy-main").unwrap();
    assert!(main.pinned);
    assert_eq!(main.pin_offset, Some(100.0));
}

#[test]
fn layout_stacks_regions_below_the_fixed_nav() {
    let views = views_for(&Route::Contact);
    let layout = layout::layout(&views, vp());
    let nav = layout.element_box("nav").unwrap();
    assert_eq!(nav.positioning, crate::viewport::geometry::Positioning::Fixed);
    let contact = layout.element_box("contact").unwrap().rect;
    let footer = layout.element_box("footer").unwrap().rect;
    assert_eq!((contact.y0, contact.y1), (0.0, 450.0));
    assert_eq!((footer.y0, footer.y1), (450.0, 900.0));
    let block = layout.element_box("footer-block").unwrap().rect;
    assert_eq!((block.y0, block.y1), (490.0, 860.0));
}
