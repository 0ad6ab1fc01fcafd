use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
}

#[test]
fn frame_range_overlap_is_half_open() {
    let a = FrameRange::new(FrameIndex(0), FrameIndex(10)).unwrap();
    let b = FrameRange::new(FrameIndex(10), FrameIndex(20)).unwrap();
    let c = FrameRange::new(FrameIndex(9), FrameIndex(12)).unwrap();
    assert!(!a.overlaps(b));
    assert!(a.overlaps(c));
    assert!(b.overlaps(c));
}

#[test]
fn fps_frames_secs_roundtrip_floor() {
    let fps = Fps::new(30000, 1001).unwrap();
    let secs = fps.frames_to_secs(123);
    assert_eq!(fps.secs_to_frames_floor(secs), 123);
}

#[test]
fn fps_deserializes_from_integer_or_ratio() {
    let a: Fps = serde_json::from_str("30").unwrap();
    assert_eq!(a, Fps::new(30, 1).unwrap());
    let b: Fps = serde_json::from_str(r#"{"num":30000,"den":1001}"#).unwrap();
    assert_eq!(b.num, 30000);
    assert!(serde_json::from_str::<Fps>("0").is_err());
}

#[test]
fn color_parsing_accepts_common_forms() {
    assert_eq!(Rgba8::parse("#fff"), Some(Rgba8::WHITE));
    assert_eq!(Rgba8::parse("#ff0000"), Some(Rgba8::rgb(255, 0, 0)));
    assert_eq!(
        Rgba8::parse("#00000080"),
        Some(Rgba8 {
            r: 0,
            g: 0,
            b: 0,
            a: 128
        })
    );
    assert_eq!(
        Rgba8::parse("rgba(10, 20, 30, 0.5)"),
        Some(Rgba8 {
            r: 10,
            g: 20,
            b: 30,
            a: 128
        })
    );
    assert_eq!(Rgba8::parse("white"), Some(Rgba8::WHITE));
    assert_eq!(Rgba8::parse("#ggg"), None);
    assert_eq!(Rgba8::parse_or("nope", Rgba8::BLACK), Rgba8::BLACK);
}

#[test]
fn transform_to_affine_identity_and_scale_about_anchor() {
    let t = Transform2D::default();
    assert_eq!(t.to_affine(), Affine::IDENTITY);

    let t = Transform2D::scale_about(2.0, Point::new(10.0, 10.0), Vec2::ZERO);
    let p = t.to_affine() * Point::new(10.0, 10.0);
    assert!((p.x - 10.0).abs() < 1e-9 && (p.y - 10.0).abs() < 1e-9);
    let q = t.to_affine() * Point::new(11.0, 10.0);
    assert!((q.x - 12.0).abs() < 1e-9);
}
