use super::*;

fn vp() -> Viewport {
    Viewport::new(1000.0, 800.0).unwrap()
}

fn no_sizes(_: &str) -> Option<Size> {
    None
}

/// Two boxes crossing over 0..3 and a text fade over 1..2.
fn crossing() -> TweenTimeline {
    TweenTimeline::new(vec![
        Tween::new("box1", Property::X, Length::Vw(-50.0), Length::Vw(100.0)).at(0.0, 3.0),
        Tween::new("box2", Property::X, Length::Vw(50.0), Length::Vw(-100.0)).at(0.0, 3.0),
        Tween::new("text", Property::Opacity, Length::Px(1.0), Length::Px(0.0)).at(1.0, 1.0),
    ])
    .unwrap()
}

#[test]
fn length_parses_units() {
    assert_eq!("-50vw".parse::<Length>().unwrap(), Length::Vw(-50.0));
    assert_eq!("20vh".parse::<Length>().unwrap(), Length::Vh(20.0));
    assert_eq!("10%".parse::<Length>().unwrap(), Length::Percent(10.0));
    assert_eq!("12px".parse::<Length>().unwrap(), Length::Px(12.0));
    assert_eq!("3".parse::<Length>().unwrap(), Length::Px(3.0));
    assert!("wide".parse::<Length>().is_err());
}

#[test]
fn length_resolves_against_viewport_and_target() {
    let size = Some(Size::new(400.0, 200.0));
    assert_eq!(Length::Vw(50.0).resolve(Property::X, vp(), None), 500.0);
    assert_eq!(Length::Vh(25.0).resolve(Property::Y, vp(), None), 200.0);
    assert_eq!(Length::Percent(50.0).resolve(Property::X, vp(), size), 200.0);
    assert_eq!(Length::Percent(50.0).resolve(Property::Y, vp(), size), 100.0);
    assert_eq!(Length::Percent(50.0).resolve(Property::Opacity, vp(), size), 0.5);
}

#[test]
fn percent_translation_keeps_its_percentage() {
    let size = Some(Size::new(400.0, 200.0));
    assert_eq!(Length::Percent(-50.0).resolve(Property::XPercent, vp(), size), -50.0);
    assert_eq!(Length::Percent(-50.0).resolve(Property::YPercent, vp(), None), -50.0);

    let tl = TweenTimeline::new(vec![Tween::new(
        "box",
        Property::XPercent,
        "-50%".parse().unwrap(),
        Length::Px(0.0),
    )])
    .unwrap();
    let start = tl.apply(0.0, vp(), &no_sizes);
    assert_eq!(start.get("box", Property::XPercent), Some(-50.0));
    assert!(start.css("box").contains("translate(-50%, 0%)"));
}

#[test]
fn endpoints_are_exact() {
    let tl = crossing();
    let start = tl.apply(0.0, vp(), &no_sizes);
    assert_eq!(start.get("box1", Property::X), Some(-500.0));
    assert_eq!(start.get("box2", Property::X), Some(500.0));
    assert_eq!(start.get("text", Property::Opacity), Some(1.0));

    let end = tl.apply(1.0, vp(), &no_sizes);
    assert_eq!(end.get("box1", Property::X), Some(1000.0));
    assert_eq!(end.get("box2", Property::X), Some(-1000.0));
    assert_eq!(end.get("text", Property::Opacity), Some(0.0));
}

#[test]
fn offsets_inside_progress_are_independent() {
    let tl = crossing();
    assert_eq!(tl.total_duration(), 3.0);

    // At one third the boxes have moved but the text fade has not started yet.
    let third = tl.apply(1.0 / 3.0 - 1e-9, vp(), &no_sizes);
    assert_eq!(third.get("text", Property::Opacity), Some(1.0));
    let x = third.get("box1", Property::X).unwrap();
    assert!(x > -500.0 && x < 1000.0);

    // Halfway through the fade.
    let half = tl.apply(0.5, vp(), &no_sizes);
    assert!((half.get("text", Property::Opacity).unwrap() - 0.5).abs() < 1e-9);
    // Past the fade window the text stays hidden.
    let late = tl.apply(0.9, vp(), &no_sizes);
    assert_eq!(late.get("text", Property::Opacity), Some(0.0));
}

#[test]
fn eased_tween_still_hits_endpoints() {
    let tl = TweenTimeline::new(vec![
        Tween::new("title", Property::Y, Length::Px(100.0), Length::Px(0.0))
            .eased(Ease::OutCubic),
    ])
    .unwrap();
    assert_eq!(tl.apply(0.0, vp(), &no_sizes).get("title", Property::Y), Some(100.0));
    assert_eq!(tl.apply(1.0, vp(), &no_sizes).get("title", Property::Y), Some(0.0));
    let mid = tl.apply(0.5, vp(), &no_sizes).get("title", Property::Y).unwrap();
    // Ease-out moves faster early on.
    assert!(mid < 50.0);
}

#[test]
fn sequential_tweens_on_one_property_hand_over() {
    let tl = TweenTimeline::new(vec![
        Tween::new("text", Property::Blur, Length::Px(20.0), Length::Px(0.0)).at(0.0, 1.0),
        Tween::new("text", Property::Blur, Length::Px(0.0), Length::Px(20.0)).at(2.0, 1.0),
    ])
    .unwrap();
    let v = |p: f64| tl.apply(p, vp(), &no_sizes).get("text", Property::Blur).unwrap();
    assert_eq!(v(0.0), 20.0);
    assert_eq!(v(1.0 / 3.0 + 0.01), 0.0);
    assert_eq!(v(0.5), 0.0);
    assert_eq!(v(1.0), 20.0);
}

#[test]
fn rejects_negative_durations() {
    let bad = TweenTimeline::new(vec![
        Tween::new("a", Property::Opacity, Length::Px(0.0), Length::Px(1.0)).at(0.0, -1.0),
    ]);
    assert!(bad.is_err());
}

#[test]
fn opacity_is_clamped() {
    let tl = TweenTimeline::new(vec![Tween::new(
        "a",
        Property::Opacity,
        Length::Px(-1.0),
        Length::Px(2.0),
    )])
    .unwrap();
    assert_eq!(tl.apply(0.0, vp(), &no_sizes).get("a", Property::Opacity), Some(0.0));
    assert_eq!(tl.apply(1.0, vp(), &no_sizes).get("a", Property::Opacity), Some(1.0));
}

#[test]
fn css_renders_transform_and_filter() {
    let mut values = PropertyValues::default();
    values.push("box", Property::Opacity, 0.5);
    values.push("box", Property::X, 10.0);
    values.push("box", Property::Scale, 0.9);
    values.push("box", Property::Blur, 4.0);
    assert_eq!(
        values.css("box"),
        "opacity: 0.5; transform: translate(10px, 0px) scale(0.9); filter: blur(4px)"
    );
    assert_eq!(values.css("other"), "");
}

#[test]
fn tweens_deserialize_with_defaults() {
    let json = r#"[{"target":"title","property":"y","from":100,"to":0}]"#;
    let tl: TweenTimeline = serde_json::from_str(json).unwrap();
    let tw = &tl.tweens()[0];
    assert_eq!(tw.duration, 1.0);
    assert_eq!(tw.position, 0.0);
    assert_eq!(tw.ease, Ease::Linear);
    assert_eq!(tw.from, Length::Px(100.0));
}

#[test]
fn lazy_tween_is_silent_before_its_start() {
    let tl = TweenTimeline::new(vec![
        Tween::new("box1", Property::X, Length::Px(0.0), Length::Px(300.0)).at(0.0, 3.0),
        Tween::new("text", Property::Opacity, Length::Px(1.0), Length::Px(0.0))
            .at(1.0, 1.0)
            .lazy(),
    ])
    .unwrap();
    let early = tl.apply(0.25, vp(), &no_sizes);
    assert_eq!(early.get("box1", Property::X), Some(75.0));
    assert_eq!(early.get("text", Property::Opacity), None);

    let mid = tl.apply(0.5, vp(), &no_sizes);
    assert_eq!(mid.get("text", Property::Opacity), Some(0.5));
}
