use crate::FrameThrottle;

#[test]
fn throttle_coalesces_to_last_offset() {
    let mut throttle = FrameThrottle::new();
    throttle.push(10.0);
    throttle.push(20.0);
    throttle.push(30.0);
    assert_eq!(throttle.take(), Some(30.0));
    assert!(throttle.is_idle());
}

#[test]
fn throttle_yields_nothing_when_no_events_fired() {
    let mut throttle = FrameThrottle::new();
    assert_eq!(throttle.take(), None);
    throttle.push(5.0);
    assert_eq!(throttle.take(), Some(5.0));
    // The next frame is quiet again.
    assert_eq!(throttle.take(), None);
}

#[test]
fn throttle_keeps_final_offset_across_quiet_frames() {
    // The last scroll event before a pause must not be lost, no matter how
    // late the next frame runs.
    let mut throttle = FrameThrottle::new();
    throttle.push(123.0);
    assert!(!throttle.is_idle());
    assert_eq!(throttle.take(), Some(123.0));
}

#[test]
fn throttle_clear_drops_pending_offset() {
    let mut throttle = FrameThrottle::new();
    throttle.push(77.0);
    throttle.clear();
    assert_eq!(throttle.take(), None);
}
