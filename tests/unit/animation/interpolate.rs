use super::*;

#[test]
fn clamps_outside_range_by_default() {
    let o = InterpolateOpts::default();
    assert_eq!(interpolate(-5.0, &[0.0, 30.0], &[0.0, 1.0], o), 0.0);
    assert_eq!(interpolate(100.0, &[0.0, 30.0], &[0.0, 1.0], o), 1.0);
    for f in [-1000.0, -1.0, 0.0] {
        assert_eq!(interpolate(f, &[0.0, 30.0], &[2.0, 5.0], o), 2.0);
    }
    for f in [30.0, 31.0, 1e9] {
        assert_eq!(interpolate(f, &[0.0, 30.0], &[2.0, 5.0], o), 5.0);
    }
}

#[test]
fn maps_linearly_inside_range() {
    let v = interpolate(15.0, &[0.0, 30.0], &[0.0, 1.0], InterpolateOpts::default());
    assert!((v - 0.5).abs() < 1e-12);
    let v = interpolate(15.0, &[0.0, 30.0], &[10.0, -10.0], InterpolateOpts::default());
    assert!(v.abs() < 1e-12);
}

#[test]
fn extend_continues_boundary_segment() {
    let o = InterpolateOpts::extended();
    assert!((interpolate(-15.0, &[0.0, 30.0], &[0.0, 1.0], o) + 0.5).abs() < 1e-12);
    assert!((interpolate(60.0, &[0.0, 30.0], &[0.0, 1.0], o) - 2.0).abs() < 1e-12);
}

#[test]
fn left_and_right_policies_are_independent() {
    let o = InterpolateOpts {
        ease: Ease::Linear,
        left: Extrapolate::Clamp,
        right: Extrapolate::Identity,
    };
    assert_eq!(interpolate(-10.0, &[0.0, 10.0], &[0.0, 1.0], o), 0.0);
    assert_eq!(interpolate(42.0, &[0.0, 10.0], &[0.0, 1.0], o), 42.0);
}

#[test]
fn multi_segment_ranges_pick_containing_segment() {
    let o = InterpolateOpts::default();
    let input = [0.0, 10.0, 20.0];
    let output = [0.0, 1.0, 0.0];
    assert!((interpolate(5.0, &input, &output, o) - 0.5).abs() < 1e-12);
    assert_eq!(interpolate(10.0, &input, &output, o), 1.0);
    assert!((interpolate(15.0, &input, &output, o) - 0.5).abs() < 1e-12);
    assert_eq!(interpolate(25.0, &input, &output, o), 0.0);
}

#[test]
fn easing_shapes_interior_fraction() {
    let eased = interpolate(
        5.0,
        &[0.0, 10.0],
        &[0.0, 1.0],
        InterpolateOpts::default().with_ease(Ease::InQuad),
    );
    assert!((eased - 0.25).abs() < 1e-12);
}

#[test]
fn malformed_ranges_return_nearest_bound() {
    let o = InterpolateOpts::default();
    // Zero-width.
    assert_eq!(interpolate(4.0, &[5.0, 5.0], &[1.0, 2.0], o), 1.0);
    assert_eq!(interpolate(5.0, &[5.0, 5.0], &[1.0, 2.0], o), 2.0);
    // Inverted.
    assert_eq!(interpolate(10.0, &[30.0, 0.0], &[1.0, 2.0], o), 1.0);
    assert_eq!(interpolate(40.0, &[30.0, 0.0], &[1.0, 2.0], o), 2.0);
    // Mismatched lengths and empties.
    assert_eq!(interpolate(1.0, &[0.0, 1.0, 2.0], &[3.0, 4.0], o), 4.0);
    assert_eq!(interpolate(1.0, &[], &[3.0, 4.0], o), 3.0);
    assert_eq!(interpolate(1.0, &[0.0, 1.0], &[], o), 0.0);
    // Non-finite ranges.
    assert_eq!(interpolate(1.0, &[0.0, f64::NAN], &[3.0, 4.0], o), 4.0);
}

#[test]
fn never_returns_non_finite() {
    let o = InterpolateOpts::extended();
    for input in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1e308, 1e308] {
        let v = interpolate(input, &[0.0, 1e-300], &[0.0, 1e300], o);
        assert!(v.is_finite(), "input {input} -> {v}");
    }
}

#[test]
fn clamped_helper_matches_full_form() {
    let a = interpolate_clamped(7.0, (0.0, 20.0), (1.0, 3.0), Ease::OutCubic);
    let b = interpolate(
        7.0,
        &[0.0, 20.0],
        &[1.0, 3.0],
        InterpolateOpts::clamped().with_ease(Ease::OutCubic),
    );
    assert_eq!(a, b);
}
