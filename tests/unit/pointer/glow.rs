use super::*;
use crate::viewport::geometry::StaticLayout;

const RED: AccentColor = AccentColor::new(
    Rgba::new(239, 68, 68, 0.8),
    Rgba::new(153, 27, 27, 0.8),
);

fn nav_layout() -> StaticLayout {
    StaticLayout::new()
        .with_fixed("nav", Rect::new(400.0, 32.0, 1040.0, 88.0))
        .with_fixed("nav-links", Rect::new(600.0, 32.0, 900.0, 88.0))
}

fn pointer_at(x: f64, y: f64) -> PointerState {
    PointerState {
        position: Some(Point::new(x, y)),
        inside: true,
    }
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn sentinel_before_any_pointer_event_is_transparent() {
    let mut glow = GlowTracker::new(GlowSpec::nav_block("links", "nav-links", "nav")).unwrap();
    assert_eq!(glow.local(), SENTINEL);
    // Layout known, still no pointer.
    glow.pointer_changed();
    glow.measure(&nav_layout(), 0.0);
    glow.compute(PointerState::default(), ms(0));
    let frame = glow.frame(RED, ms(0));
    assert_eq!(frame.gradient.center, Point::new(-1000.0, -1000.0));
    assert!(frame.is_transparent());

    // Always-shown glows are invisible at the sentinel too.
    let mut card = GlowTracker::new(GlowSpec::process_card("p1", "card-1", "process")).unwrap();
    let layout = StaticLayout::new()
        .with_flow("process", Rect::new(0.0, 0.0, 1440.0, 1200.0))
        .with_flow("card-1", Rect::new(100.0, 200.0, 500.0, 700.0));
    card.pointer_changed();
    card.measure(&layout, 0.0);
    card.compute(PointerState::default(), ms(0));
    let frame = card.frame(RED, ms(0));
    assert_eq!(frame.size, Size::new(400.0, 500.0));
    assert_eq!(frame.opacity, 0.0);
    assert!(frame.is_transparent());

    // Once hovered the card stays lit where the pointer left it.
    card.pointer_changed();
    card.measure(&layout, 0.0);
    card.compute(pointer_at(300.0, 400.0), ms(16));
    card.pointer_changed();
    card.measure(&layout, 0.0);
    card.compute(pointer_at(1500.0, 400.0), ms(32));
    let frame = card.frame(RED, ms(32));
    assert_eq!(frame.opacity, 1.0);
    assert_eq!(frame.gradient.center, Point::new(200.0, 200.0));
    assert!(!frame.is_transparent());
}

#[test]
fn first_read_measures_the_element_without_a_pointer() {
    let layout = StaticLayout::new()
        .with_flow("testimonial-1", Rect::new(160.0, 400.0, 860.0, 1120.0));
    let mut glow = GlowTracker::new(GlowSpec::testimonial("t1", "testimonial-1")).unwrap();
    assert!(!glow.is_dirty());
    assert!(glow.measure(&layout, 0.0));
    assert_eq!(glow.size(), Size::new(700.0, 720.0));
    glow.compute(PointerState::default(), ms(0));

    // The farthest-corner gradient reaches a large card from its sentinel; the layer is hidden.
    let frame = glow.frame(RED, ms(0));
    assert!(frame.gradient.reaches(frame.size));
    assert_eq!(frame.opacity, 0.0);
    assert!(frame.is_transparent());
    assert!(!glow.needs_frame(ms(0)));
}

#[test]
fn layout_change_remeasures_the_element() {
    let mut glow = GlowTracker::new(GlowSpec::reveal_mask("m", "card")).unwrap();
    let small = StaticLayout::new().with_flow("card", Rect::new(0.0, 0.0, 200.0, 100.0));
    let large = StaticLayout::new().with_flow("card", Rect::new(0.0, 0.0, 600.0, 300.0));
    glow.measure(&small, 0.0);
    glow.measure(&large, 0.0);
    assert_eq!(glow.size(), Size::new(200.0, 100.0));
    glow.layout_changed();
    glow.measure(&large, 0.0);
    assert_eq!(glow.size(), Size::new(600.0, 300.0));
}

#[test]
fn local_coordinates_are_rounded_relative_to_element() {
    let mut glow = GlowTracker::new(GlowSpec::nav_block("links", "nav-links", "nav")).unwrap();
    glow.pointer_changed();
    assert!(glow.measure(&nav_layout(), 500.0));
    glow.compute(pointer_at(650.5, 40.4), ms(0));
    assert_eq!(glow.local(), Point::new(51.0, 8.0));
    assert!(!glow.is_dirty());
}

#[test]
fn pointer_in_container_but_outside_element_still_tracks() {
    let mut glow = GlowTracker::new(GlowSpec::nav_block("links", "nav-links", "nav")).unwrap();
    glow.pointer_changed();
    glow.measure(&nav_layout(), 0.0);
    glow.compute(pointer_at(450.0, 60.0), ms(0));
    assert_eq!(glow.local(), Point::new(-150.0, 28.0));
    assert!(glow.frame(RED, ms(0)).hovered);
}

#[test]
fn fades_in_on_hover_and_out_on_leave() {
    let mut glow = GlowTracker::new(GlowSpec::nav_block("links", "nav-links", "nav")).unwrap();
    glow.pointer_changed();
    glow.measure(&nav_layout(), 0.0);
    glow.compute(pointer_at(700.0, 50.0), ms(0));
    assert!(glow.needs_frame(ms(100)));
    assert_eq!(glow.opacity(ms(500)), 1.0);

    // Leave the nav: position is kept and opacity fades instead of snapping.
    glow.pointer_changed();
    glow.measure(&nav_layout(), 0.0);
    glow.compute(pointer_at(700.0, 400.0), ms(1000));
    assert_eq!(glow.local(), Point::new(100.0, 18.0));
    assert_eq!(glow.opacity(ms(1000)), 1.0);
    let mid = glow.opacity(ms(1250));
    assert!(mid > 0.0 && mid < 1.0);
    assert_eq!(glow.opacity(ms(1500)), 0.0);
    assert!(!glow.needs_frame(ms(1500)));
}

#[test]
fn leaving_the_window_counts_as_leaving() {
    let mut glow = GlowTracker::new(GlowSpec::testimonial("t1", "testimonial-1")).unwrap();
    let layout =
        StaticLayout::new().with_flow("testimonial-1", Rect::new(0.0, 1000.0, 400.0, 1300.0));
    glow.pointer_changed();
    glow.measure(&layout, 900.0);
    glow.compute(pointer_at(50.0, 150.0), ms(0));
    assert_eq!(glow.local(), Point::new(50.0, 50.0));
    assert!(!glow.frame(RED, ms(0)).is_transparent());

    glow.pointer_changed();
    glow.measure(&layout, 900.0);
    glow.compute(
        PointerState {
            position: Some(Point::new(50.0, 150.0)),
            inside: false,
        },
        ms(16),
    );
    // Testimonial cards reset to their own sentinel.
    assert_eq!(glow.local(), Point::new(-200.0, -200.0));
    let frame = glow.frame(RED, ms(16));
    assert_eq!(frame.opacity, 0.0);
    assert!(frame.is_transparent());
}

#[test]
fn missing_element_stays_dirty_and_recovers() {
    let mut glow = GlowTracker::new(GlowSpec::nav_block("links", "nav-links", "nav")).unwrap();
    glow.pointer_changed();
    assert!(!glow.measure(&StaticLayout::new(), 0.0));
    glow.compute(pointer_at(700.0, 50.0), ms(0));
    assert_eq!(glow.local(), SENTINEL);
    assert!(glow.is_dirty());

    assert!(glow.measure(&nav_layout(), 0.0));
    glow.compute(pointer_at(700.0, 50.0), ms(16));
    assert_eq!(glow.local(), Point::new(100.0, 18.0));
}

#[test]
fn accent_paint_uses_active_colors() {
    let glow = GlowTracker::new(GlowSpec::nav_block("links", "nav-links", "nav")).unwrap();
    let css = glow.frame(RED, ms(0)).gradient.to_css();
    assert_eq!(
        css,
        "radial-gradient(120px circle at -1000px -1000px, rgba(239, 68, 68, 0.8), rgba(153, 27, 27, 0.8), transparent 80%)"
    );
}

#[test]
fn farthest_corner_radius() {
    let g = RadialGradient {
        radius: None,
        center: Point::new(0.0, 0.0),
        stops: SmallVec::from_buf([Rgba::new(255, 255, 255, 1.0), Rgba::new(0, 0, 0, 1.0)]),
        transparent_at: 25.0,
    };
    assert_eq!(g.resolved_radius(Size::new(300.0, 400.0)), 500.0);
    assert!(g.to_css().starts_with("radial-gradient(circle at 0px 0px"));
}

#[test]
fn disabled_frame_is_invisible() {
    let glow = GlowTracker::new(GlowSpec::process_card("p1", "card-1", "process")).unwrap();
    assert!(glow.frame_disabled(RED).is_transparent());
}

#[test]
fn validate_rejects_bad_specs() {
    let mut spec = GlowSpec::nav_block("links", "nav-links", "nav");
    spec.radius = Some(0.0);
    assert!(GlowTracker::new(spec).is_err());

    let mut spec = GlowSpec::testimonial("t", "card");
    spec.transparent_at = 120.0;
    assert!(spec.validate().is_err());

    let spec = GlowSpec::new("x", "card", GlowPaint::Colors(vec![]));
    assert!(spec.validate().is_err());
}

#[test]
fn spec_deserializes_with_defaults() {
    let json = r#"{"id": "g", "anchor": "card", "radius": 600, "paint": {"colors": ["rgba(96, 165, 250, 0.8)"]}}"#;
    let spec: GlowSpec = serde_json::from_str(json).unwrap();
    assert_eq!(spec.sentinel, SENTINEL);
    assert_eq!(spec.transparent_at, 80.0);
    assert_eq!(spec.on_leave, LeaveBehavior::Keep);
    let accent: GlowPaint = serde_json::from_str("\"accent\"").unwrap();
    assert_eq!(accent, GlowPaint::Accent);
}
