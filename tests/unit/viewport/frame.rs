use super::*;

#[test]
fn requests_coalesce_until_taken() {
    let mut reg = ListenerRegistry::new();
    let mut frames = FrameScheduler::new(true);

    assert!(frames.request(&mut reg));
    assert!(!frames.request(&mut reg));
    assert!(!frames.request(&mut reg));
    assert_eq!(reg.count_of(ListenerKind::AnimationFrame), 1);

    assert!(frames.take(&mut reg));
    assert!(!frames.take(&mut reg));
    assert_eq!(frames.frames_run(), 1);
    assert_eq!(reg.count(), 0);
}

#[test]
fn unsupported_environment_never_queues() {
    let mut reg = ListenerRegistry::new();
    let mut frames = FrameScheduler::new(false);
    assert!(!frames.request(&mut reg));
    assert!(!frames.is_pending());
    assert_eq!(reg.count(), 0);
}

#[test]
fn cancel_releases_the_callback() {
    let mut reg = ListenerRegistry::new();
    let mut frames = FrameScheduler::new(true);
    frames.request(&mut reg);
    frames.cancel(&mut reg);
    assert_eq!(reg.count(), 0);
    assert!(!frames.take(&mut reg));
}
