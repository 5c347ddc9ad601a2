use super::*;
use crate::foundation::core::{AccentColor, Rgba};
use crate::section::registry::SectionId;

const ACCENT: AccentColor = AccentColor::new(
    Rgba::new(34, 197, 94, 0.8),
    Rgba::new(21, 128, 61, 0.8),
);

const HOME: &str = r#"{
    "route": "/",
    "viewport": { "width": 1280, "height": 800 },
    "options": { "band": { "top": 0.25, "bottom": 0.75 } },
    "views": [
        {
            "name": "hero",
            "sections": [
                { "id": "hero", "label": "Hero",
                  "accent": { "from": "rgba(239, 68, 68, 0.8)", "to": "rgba(153, 27, 27, 0.8)" } }
            ]
        },
        {
            "name": "work",
            "sections": [
                { "id": "featured-work", "label": "Work",
                  "accent": { "from": "rgba(34, 197, 94, 0.8)", "to": "rgba(21, 128, 61, 0.8)" } }
            ],
            "timelines": [
                { "id": "work-title", "trigger": "featured-work",
                  "start": "top 80%", "end": "top 50%", "scrub": 1,
                  "tweens": [
                      { "target": "work-title", "property": "opacity", "from": 0, "to": 1 }
                  ] }
            ],
            "glows": [
                { "id": "card-1", "anchor": "card-1", "radius": 600,
                  "paint": { "colors": ["rgba(96, 165, 250, 0.8)"] }, "transparent_at": 40 }
            ],
            "effects": [
                { "kind": "magnetic", "id": "cta", "anchor": "cta" }
            ]
        }
    ],
    "layout": {
        "hero": { "rect": { "x0": 0, "y0": 0, "x1": 1280, "y1": 800 } },
        "featured-work": { "rect": { "x0": 0, "y0": 800, "x1": 1280, "y1": 1600 } },
        "nav": { "rect": { "x0": 0, "y0": 0, "x1": 1280, "y1": 64 }, "positioning": "fixed" }
    }
}"#;

fn view_with_section(name: &str, id: &str) -> ViewSpec {
    ViewSpec {
        sections: vec![Section::new(id, id, ACCENT)],
        ..ViewSpec::new(name)
    }
}

#[test]
fn parses_and_validates_a_home_page() {
    let spec = PageSpec::from_reader(HOME.as_bytes()).unwrap();
    spec.validate().unwrap();
    assert_eq!(spec.route, Route::Home);
    assert_eq!(spec.viewport, Viewport::new(1280.0, 800.0).unwrap());
    assert_eq!(spec.options.band, ActivationBand::new(0.25, 0.75).unwrap());
    assert!(spec.options.capabilities.animation_frames);
    assert!(spec.options.capabilities.intersection_observer);
    assert_eq!(spec.nav.fallback, SectionId::new("hero"));
    assert_eq!(spec.layout.len(), 3);

    let work = spec.view("work").unwrap();
    assert_eq!(work.timelines[0].tweens.tweens().len(), 1);
    assert_eq!(work.effects[0].id(), "cta");
    assert!(spec.view("contact").is_none());
}

#[test]
fn defaults_fill_an_empty_page() {
    let spec = PageSpec::from_reader(r#"{"route": "/services"}"#.as_bytes()).unwrap();
    assert_eq!(spec, PageSpec::new(Route::Services));
    spec.validate().unwrap();
}

#[test]
fn json_output_parses_back() {
    let spec = PageSpec::from_reader(HOME.as_bytes()).unwrap();
    let again = PageSpec::from_reader(spec.to_json().unwrap().as_bytes()).unwrap();
    assert_eq!(spec, again);
}

#[test]
fn rejects_malformed_json() {
    let err = PageSpec::from_reader("{".as_bytes()).unwrap_err();
    assert!(matches!(err, ScrollworkError::Serde(_)));
    let json = r#"{"route": "/", "views": [{"name": "a", "timelines": [
        {"id": "t", "trigger": "x", "start": "top sideways"}
    ]}]}"#;
    let err = PageSpec::from_reader(json.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("sideways"));
}

#[test]
fn missing_file_names_the_path() {
    let err = PageSpec::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.json"));
}

#[test]
fn rejects_bad_viewport_and_band() {
    let mut spec = PageSpec::new(Route::Home);
    spec.viewport.height = 0.0;
    assert!(spec.validate().is_err());

    let mut spec = PageSpec::new(Route::Home);
    spec.options.band = ActivationBand {
        top: 0.8,
        bottom: 0.2,
    };
    assert!(spec.validate().is_err());

    let mut spec = PageSpec::new(Route::Home);
    spec.nav.scrolled_threshold = f64::NAN;
    assert!(spec.validate().is_err());
}

#[test]
fn rejects_duplicate_views_and_sections() {
    let mut spec = PageSpec::new(Route::Home);
    spec.views = vec![ViewSpec::new("a"), ViewSpec::new("a")];
    assert!(spec.validate().unwrap_err().to_string().contains("duplicate view"));

    spec.views = vec![view_with_section("a", "hero"), view_with_section("b", "hero")];
    assert!(spec.validate().unwrap_err().to_string().contains("duplicate section id"));

    let mut other = view_with_section("b", "intro");
    other.sections[0].anchor = Some("hero".to_owned());
    spec.views = vec![view_with_section("a", "hero"), other];
    assert!(spec.validate().unwrap_err().to_string().contains("duplicate section anchor"));
}

#[test]
fn ids_are_unique_per_kind() {
    let mut view = ViewSpec::new("a");
    view.timelines.push(TimelineSpec::new("card", "card"));
    view.glows.push(GlowSpec::reveal_mask("card", "card"));
    let mut spec = PageSpec::new(Route::Home);
    spec.views.push(view.clone());
    // A timeline and a glow may share an id.
    spec.validate().unwrap();

    let mut second = ViewSpec::new("b");
    second.timelines.push(TimelineSpec::new("card", "other"));
    spec.views.push(second);
    assert!(spec.validate().unwrap_err().to_string().contains("duplicate timeline id"));
}

#[test]
fn rejects_empty_view_name() {
    let mut spec = PageSpec::new(Route::Home);
    spec.views.push(ViewSpec::new("  "));
    assert!(spec.validate().is_err());
}
