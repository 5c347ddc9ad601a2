use super::*;
use crate::viewport::geometry::StaticLayout;

fn vp() -> Viewport {
    Viewport::new(1000.0, 800.0).unwrap()
}

fn at(x: f64, y: f64) -> PointerState {
    PointerState {
        position: Some(Point::new(x, y)),
        inside: true,
    }
}

#[test]
fn tilt_is_relative_to_half_viewport() {
    let card = Rect::new(400.0, 300.0, 600.0, 500.0);
    let t = tilt(Point::new(1000.0, 500.0), card, vp(), 3.0);
    assert_eq!(t.y_deg, 3.0);
    assert_eq!(t.x_deg, -0.75);
    assert_eq!(tilt(card.center(), card, vp(), 3.0), Tilt { x_deg: -0.0, y_deg: 0.0 });
}

#[test]
fn magnetic_pulls_toward_pointer() {
    let button = Rect::new(100.0, 100.0, 300.0, 160.0);
    let v = magnetic(Point::new(300.0, 130.0), button, 0.35);
    assert!((v.x - 35.0).abs() < 1e-9);
    assert_eq!(v.y, 0.0);
}

#[test]
fn magnetic_releases_on_leave() {
    let layout = StaticLayout::new().with_flow("cta", Rect::new(100.0, 1100.0, 300.0, 1160.0));
    let mut fx = PointerEffect::new(EffectSpec::Magnetic {
        id: "cta".into(),
        anchor: "cta".into(),
        strength: 0.25,
    })
    .unwrap();

    fx.pointer_changed();
    assert!(fx.measure(&layout, 1000.0));
    fx.compute(at(200.0, 150.0), vp());
    assert_eq!(fx.value(), EffectValue::Magnetic { x: 0.0, y: 5.0 });

    fx.pointer_changed();
    fx.measure(&layout, 1000.0);
    fx.compute(at(900.0, 700.0), vp());
    assert_eq!(fx.value(), EffectValue::Magnetic { x: 0.0, y: 0.0 });
}

#[test]
fn tilt_keeps_last_rotation_outside_container() {
    let layout = StaticLayout::new()
        .with_flow("process", Rect::new(0.0, 0.0, 1000.0, 800.0))
        .with_flow("card", Rect::new(400.0, 300.0, 600.0, 500.0));
    let mut fx = PointerEffect::new(EffectSpec::Tilt {
        id: "card".into(),
        anchor: "card".into(),
        container: "process".into(),
        max_deg: 3.0,
    })
    .unwrap();

    fx.pointer_changed();
    fx.measure(&layout, 0.0);
    fx.compute(at(750.0, 400.0), vp());
    let tilted = fx.value();
    assert_eq!(tilted, EffectValue::Tilt(Tilt { x_deg: -0.0, y_deg: 1.5 }));

    fx.pointer_changed();
    fx.measure(&layout, 0.0);
    fx.compute(
        PointerState {
            position: Some(Point::new(750.0, 400.0)),
            inside: false,
        },
        vp(),
    );
    assert_eq!(fx.value(), tilted);
    assert!(fx.frame().value.css().starts_with("perspective(1000px) rotateX("));
}

#[test]
fn effects_deserialize_with_defaults() {
    let spec: EffectSpec =
        serde_json::from_str(r#"{"kind": "magnetic", "id": "b", "anchor": "book-call"}"#).unwrap();
    assert_eq!(
        spec,
        EffectSpec::Magnetic {
            id: "b".into(),
            anchor: "book-call".into(),
            strength: 0.35
        }
    );
    let spec: EffectSpec = serde_json::from_str(
        r#"{"kind": "tilt", "id": "c", "anchor": "card", "container": "process"}"#,
    )
    .unwrap();
    assert!(matches!(spec, EffectSpec::Tilt { max_deg, .. } if max_deg == 3.0));
}
