use super::*;
use crate::foundation::core::{Fps, FrameIndex};

fn ctx(local: u64) -> FrameCtx {
    FrameCtx {
        frame: FrameIndex(100 + local),
        local_frame: local,
        duration_frames: 300,
        fps: Fps::new(30, 1).unwrap(),
        canvas: Canvas {
            width: 1000,
            height: 500,
        },
    }
}

fn layer(shape: &Shape, local: u64) -> Option<LayerState> {
    ShapeSource { index: 2, shape }.compute_layer(&ctx(local))
}

#[test]
fn percent_rect_maps_to_pixels() {
    let r = PercentRect {
        x: 10.0,
        y: 20.0,
        width: 50.0,
        height: 40.0,
    }
    .to_rect(Canvas {
        width: 1000,
        height: 500,
    });
    assert_eq!(r, Rect::new(100.0, 100.0, 600.0, 300.0));
}

#[test]
fn hidden_outside_window() {
    let s = Shape::new(ShapeKind::Rectangle, 10, 50, ShapeAnimation::None);
    assert!(layer(&s, 9).is_none());
    assert_eq!(layer(&s, 10).unwrap().id, "shape:2");
    assert!(layer(&s, 51).is_none());
}

#[test]
fn fade_scales_base_opacity() {
    let mut s = Shape::new(ShapeKind::Rectangle, 0, 200, ShapeAnimation::Fade);
    s.opacity = 0.5;
    assert_eq!(layer(&s, 0).unwrap().opacity, 0.0);
    assert_eq!(layer(&s, 10).unwrap().opacity, 0.25);
    assert_eq!(layer(&s, 100).unwrap().opacity, 0.5);
}

#[test]
fn wipe_reveal_grows_monotonically() {
    let mut s = Shape::new(ShapeKind::Gradient, 0, 200, ShapeAnimation::Wipe);
    s.direction = WipeDir::TopToBottom;
    let fractions: Vec<f64> = (0..=25)
        .map(|f| layer(&s, f).unwrap().reveal.unwrap().fraction)
        .collect();
    assert_eq!(fractions[0], 0.0);
    assert_eq!(fractions[25], 1.0);
    assert!(fractions.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn expand_springs_about_center() {
    let mut s = Shape::new(ShapeKind::Circle, 0, 200, ShapeAnimation::Expand);
    s.position = Some(PercentRect {
        x: 40.0,
        y: 40.0,
        width: 20.0,
        height: 20.0,
    });
    let start = layer(&s, 0).unwrap();
    assert_eq!(start.scale(), 0.0);
    let center = Point::new(500.0, 250.0);
    assert!((start.transform * center - center).hypot() < 1e-9);
    assert!((layer(&s, 150).unwrap().scale() - 1.0).abs() < 1e-3);
}

#[test]
fn pulse_stays_near_unit_scale() {
    let s = Shape::new(ShapeKind::Rectangle, 0, 300, ShapeAnimation::Pulse);
    for f in 0..300 {
        let k = layer(&s, f).unwrap().scale();
        assert!((0.94 - 1e-9..=1.06 + 1e-9).contains(&k));
    }
}

#[test]
fn slide_starts_off_canvas() {
    let s = Shape::new(ShapeKind::Rectangle, 0, 200, ShapeAnimation::Slide);
    assert_eq!(layer(&s, 0).unwrap().translation(), Vec2::new(-1000.0, 0.0));
    assert_eq!(layer(&s, 30).unwrap().translation(), Vec2::ZERO);
}

#[test]
fn gradient_geometry_parses_end_color() {
    let mut s = Shape::new(ShapeKind::Gradient, 0, 10, ShapeAnimation::None);
    s.gradient_to = Some("#000".into());
    s.angle_deg = 90.0;
    let LayerContent::Shape(shape) = layer(&s, 0).unwrap().content else {
        panic!("expected shape");
    };
    assert_eq!(
        shape.geometry,
        ShapeGeometry::Gradient {
            rect: Rect::new(0.0, 0.0, 1000.0, 500.0),
            to: Rgba8::BLACK,
            angle_deg: 90.0,
        }
    );
}

#[test]
fn deserializes_type_and_defaults() {
    let s: Shape = serde_json::from_str(
        r#"{"type":"line","startFrame":0,"endFrame":30,"animation":"wipe","direction":"rtl"}"#,
    )
    .unwrap();
    assert_eq!(s.kind, ShapeKind::Line);
    assert_eq!(s.direction, WipeDir::RightToLeft);
    assert_eq!(s.opacity, 1.0);
}
