use super::*;

#[test]
fn resolve_clamps_to_scene() {
    let w = Window::resolve(-10, 900, 450).unwrap();
    assert_eq!(w, Window { start: 0, end: 450 });
    assert!(Window::resolve(40, 20, 450).is_none());
    assert!(Window::resolve(500, 600, 450).is_some_and(|w| w.len() == 0));
}

#[test]
fn contains_is_inclusive() {
    let w = Window::resolve(30, 420, 450).unwrap();
    assert!(!w.contains(29));
    assert!(w.contains(30));
    assert!(w.contains(420));
    assert!(!w.contains(421));
}

#[test]
fn edges_shrink_for_short_windows() {
    assert_eq!(Window::resolve(0, 100, 450).unwrap().edge_frames(), 20);
    assert_eq!(Window::resolve(0, 10, 450).unwrap().edge_frames(), 5);
    assert_eq!(Window::resolve(5, 5, 450).unwrap().edge_frames(), 0);
}

#[test]
fn fade_ramps_both_ends() {
    let w = Window::resolve(30, 420, 450).unwrap();
    assert_eq!(w.fade(30), 0.0);
    assert_eq!(w.fade(45), 0.75);
    assert_eq!(w.fade(200), 1.0);
    assert_eq!(w.fade(410), 0.5);
    assert_eq!(w.fade(420), 0.0);
}

#[test]
fn fraction_of_zero_length_window_is_one() {
    let w = Window::resolve(7, 7, 10).unwrap();
    assert_eq!(w.fraction(7), 1.0);
}
