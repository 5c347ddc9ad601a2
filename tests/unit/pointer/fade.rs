use super::*;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn starts_hidden() {
    let fade = HoverFade::new(ms(500));
    assert_eq!(fade.value(ms(0)), 0.0);
    assert!(!fade.is_animating(ms(0)));
}

#[test]
fn fades_in_then_out_over_its_duration() {
    let mut fade = HoverFade::new(ms(500));
    fade.set(true, ms(1000));
    let mid = fade.value(ms(1250));
    assert!(mid > 0.0 && mid < 1.0);
    assert!(fade.is_animating(ms(1250)));
    assert_eq!(fade.value(ms(1500)), 1.0);

    fade.set(false, ms(2000));
    assert_eq!(fade.value(ms(2000)), 1.0, "leaving does not snap");
    let mid = fade.value(ms(2250));
    assert!(mid > 0.0 && mid < 1.0);
    assert_eq!(fade.value(ms(2500)), 0.0);
    assert!(!fade.is_animating(ms(2600)));
}

#[test]
fn reversal_starts_from_current_value() {
    let mut fade = HoverFade::new(ms(500));
    fade.set(true, ms(0));
    let at_switch = fade.value(ms(200));
    fade.set(false, ms(200));
    assert_eq!(fade.value(ms(200)), at_switch);
    assert!(fade.value(ms(300)) < at_switch);
}

#[test]
fn repeated_set_keeps_running_transition() {
    let mut fade = HoverFade::new(ms(500));
    fade.set(true, ms(0));
    fade.set(true, ms(400));
    assert_eq!(fade.value(ms(500)), 1.0);
}

#[test]
fn zero_duration_snaps() {
    let mut fade = HoverFade::new(Duration::ZERO);
    fade.set(true, ms(10));
    assert_eq!(fade.value(ms(10)), 1.0);
    assert!(fade.is_shown());
}
