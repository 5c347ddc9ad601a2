use super::*;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn immediate_follows_target() {
    let mut s = ScrubState::new();
    assert_eq!(s.advance(Scrub::Immediate, 0.3, ms(0)), 0.3);
    assert_eq!(s.advance(Scrub::Immediate, 0.9, ms(16)), 0.9);
    assert_eq!(s.advance(Scrub::Immediate, 0.1, ms(32)), 0.1);
    assert!(s.is_settled(0.1));
}

#[test]
fn first_smoothed_sample_snaps() {
    let mut s = ScrubState::new();
    assert_eq!(s.advance(Scrub::Smooth(1.0), 0.6, ms(0)), 0.6);
}

#[test]
fn smoothed_value_lags_then_converges() {
    let mut s = ScrubState::new();
    s.advance(Scrub::Smooth(1.0), 0.0, ms(0));

    let early = s.advance(Scrub::Smooth(1.0), 1.0, ms(100));
    assert!(early > 0.0 && early < 1.0, "{early}");
    assert!(!s.is_settled(1.0));

    let mut t = 100;
    let mut last = early;
    while t < 3000 {
        t += 16;
        let v = s.advance(Scrub::Smooth(1.0), 1.0, ms(t));
        assert!(v >= last && v <= 1.0);
        last = v;
    }
    assert!(s.is_settled(1.0));
    assert_eq!(last, 1.0);
}

#[test]
fn smoothing_reverses_with_the_target() {
    let mut s = ScrubState::new();
    s.advance(Scrub::Smooth(0.5), 0.8, ms(0));
    let v = s.advance(Scrub::Smooth(0.5), 0.2, ms(50));
    assert!(v < 0.8 && v > 0.2);
    let mut t = 50;
    while t < 5000 {
        t += 16;
        s.advance(Scrub::Smooth(0.5), 0.2, ms(t));
    }
    assert_eq!(s.displayed(), Some(0.2));
}

#[test]
fn serde_accepts_flag_or_seconds() {
    assert_eq!(serde_json::from_str::<Scrub>("true").unwrap(), Scrub::Immediate);
    assert_eq!(serde_json::from_str::<Scrub>("1").unwrap(), Scrub::Smooth(1.0));
    assert_eq!(serde_json::from_str::<Scrub>("0.5").unwrap(), Scrub::Smooth(0.5));
    assert!(serde_json::from_str::<Scrub>("false").is_err());
    assert!(serde_json::from_str::<Scrub>("0").is_err());
    assert_eq!(serde_json::to_string(&Scrub::Immediate).unwrap(), "true");
}
