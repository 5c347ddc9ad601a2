use super::*;

#[test]
fn parses_known_routes_and_sub_paths() {
    assert_eq!(Route::parse("/"), Route::Home);
    assert_eq!(Route::parse(""), Route::Home);
    assert_eq!(Route::parse("/services/"), Route::Services);
    assert_eq!(Route::parse("/work/2"), Route::Work);
    assert_eq!(Route::parse("/contact?ref=nav#form"), Route::Contact);
    assert_eq!(Route::parse("/workshop"), Route::Other("/workshop".into()));
}

#[test]
fn static_mapping_matches_route_prefixes() {
    assert_eq!(Route::Services.static_section().unwrap(), "services");
    assert_eq!(Route::Work.static_section().unwrap(), "featured-work");
    assert_eq!(Route::About.static_section().unwrap(), "introduction");
    assert_eq!(Route::Contact.static_section().unwrap(), "contact");
    assert_eq!(Route::Testimonials.static_section().unwrap(), "testimonials");
    assert_eq!(Route::Home.static_section(), None);
    assert_eq!(Route::parse("/book").static_section(), None);
}

#[test]
fn only_home_is_scroll_tracked() {
    for route in Route::KNOWN {
        assert_eq!(route.is_scroll_tracked(), route == Route::Home);
    }
}

#[test]
fn serializes_as_path() {
    let json = serde_json::to_string(&Route::Testimonials).unwrap();
    assert_eq!(json, "\"/testimonials\"");
    let back: Route = serde_json::from_str("\"/about\"").unwrap();
    assert_eq!(back, Route::About);
}
