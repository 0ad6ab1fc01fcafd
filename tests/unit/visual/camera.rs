use super::*;

#[test]
fn zoom_is_monotonic_and_lands_on_end() {
    let cam = CameraSpec {
        end_zoom: 1.15,
        ..CameraSpec::default()
    };
    let c = Canvas::default();
    let mid = cam.state_at(150.0, 300, c).zoom;
    assert!(mid > 1.0 && mid < 1.15);
    assert!((cam.state_at(300.0, 300, c).zoom - 1.15).abs() < 1e-12);
    let mut prev = 0.0;
    for f in 0..=300 {
        let z = cam.state_at(f64::from(f), 300, c).zoom;
        assert!(z >= prev);
        prev = z;
    }
}

#[test]
fn pan_is_percent_of_canvas() {
    let cam = CameraSpec {
        end_x: -3.0,
        end_y: 10.0,
        ..CameraSpec::default()
    };
    let s = cam.state_at(450.0, 450, Canvas::default());
    assert!((s.offset.x + 57.6).abs() < 1e-9);
    assert!((s.offset.y - 108.0).abs() < 1e-9);
}

#[test]
fn zoom_keeps_center_fixed() {
    let c = Canvas::default();
    let state = CameraState {
        zoom: 1.5,
        offset: Vec2::ZERO,
    };
    let center = c.center();
    assert!((state.to_affine(c) * center - center).hypot() < 1e-9);
}

#[test]
fn zero_length_scene_uses_end_values() {
    let cam = CameraSpec {
        end_zoom: 2.0,
        ..CameraSpec::default()
    };
    assert_eq!(cam.state_at(0.0, 0, Canvas::default()).zoom, 2.0);
}

#[test]
fn descriptor_defaults() {
    let cam: CameraSpec = serde_json::from_str(r#"{"endZoom":1.15,"endX":-3}"#).unwrap();
    assert_eq!(cam.start_zoom, 1.0);
    assert_eq!(cam.end_x, -3.0);
    assert_eq!(cam.easing, Ease::Linear);
}
