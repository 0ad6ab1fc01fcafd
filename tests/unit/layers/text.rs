use super::*;
use crate::foundation::core::{Fps, FrameIndex};

fn ctx(local: u64) -> FrameCtx {
    FrameCtx {
        frame: FrameIndex(local),
        local_frame: local,
        duration_frames: 450,
        fps: Fps::new(30, 1).unwrap(),
        canvas: Canvas::default(),
    }
}

fn layer(overlay: &TextOverlay, local: u64) -> Option<LayerState> {
    TextOverlayLayer { index: 0, overlay }.compute_layer(&ctx(local))
}

#[test]
fn fade_in_overlay_visibility() {
    let o = TextOverlay::new("Plants make food", 30, 420, TextAnimation::FadeIn);
    assert!(layer(&o, 29).is_none());
    assert_eq!(layer(&o, 30).unwrap().opacity, 0.0);
    assert_eq!(layer(&o, 45).unwrap().opacity, 0.75);
    assert_eq!(layer(&o, 100).unwrap().opacity, 1.0);
    assert!(layer(&o, 421).is_none());
}

#[test]
fn typewriter_reveals_prefix() {
    let o = TextOverlay::new("abcdefghij", 0, 100, TextAnimation::Typewriter);
    let text_at = |f| match layer(&o, f).unwrap().content {
        LayerContent::Text(t) => t.text,
        other => panic!("unexpected content {other:?}"),
    };
    assert_eq!(text_at(0), "");
    assert_eq!(text_at(50), "abcde");
    assert_eq!(text_at(100), "abcdefghij");
    assert_eq!(layer(&o, 50).unwrap().opacity, 1.0);
}

#[test]
fn typewriter_counts_chars_not_bytes() {
    let o = TextOverlay::new("CO₂ ↑", 0, 10, TextAnimation::Typewriter);
    let m = o.motion(&ctx(10)).unwrap();
    assert_eq!(m.visible_chars, 5);
    let m = o.motion(&ctx(6)).unwrap();
    assert_eq!(m.visible_chars, 3);
}

#[test]
fn slide_up_settles_at_anchor() {
    let o = TextOverlay::new("x", 0, 200, TextAnimation::SlideUp);
    let start = o.motion(&ctx(0)).unwrap();
    let settled = o.motion(&ctx(60)).unwrap();
    assert_eq!(start.offset, Vec2::new(0.0, 60.0));
    assert_eq!(settled.offset, Vec2::ZERO);
}

#[test]
fn scale_in_grows_toward_one() {
    let o = TextOverlay::new("x", 0, 300, TextAnimation::ScaleIn);
    let first = o.motion(&ctx(0)).unwrap().scale;
    let later = o.motion(&ctx(120)).unwrap().scale;
    assert!((first - 0.6).abs() < 1e-9);
    assert!((later - 1.0).abs() < 0.01);
}

#[test]
fn blur_in_clears() {
    let o = TextOverlay::new("x", 0, 300, TextAnimation::BlurIn);
    assert!((o.motion(&ctx(0)).unwrap().blur_px - 16.0).abs() < 1e-9);
    assert!(o.motion(&ctx(150)).unwrap().blur_px < 0.2);
}

#[test]
fn inverted_window_never_draws() {
    let o = TextOverlay::new("x", 50, 10, TextAnimation::None);
    assert!((0..450).all(|f| layer(&o, f).is_none()));
}

#[test]
fn anchors_respect_safe_margin() {
    let c = Canvas::default();
    assert_eq!(Anchor::Center.origin(c), Point::new(960.0, 540.0));
    let tl = Anchor::TopLeft.origin(c);
    assert!((tl.x - 115.2).abs() < 1e-9 && (tl.y - 64.8).abs() < 1e-9);
    assert_eq!(Anchor::BottomRight.align(), TextAlign::Right);
}

#[test]
fn deserializes_with_defaults_and_aliases() {
    let o: TextOverlay = serde_json::from_str(
        r#"{"text":"Hi","position":"bottom-center","startFrame":0,"endFrame":10}"#,
    )
    .unwrap();
    assert_eq!(o.position, Anchor::BottomCenter);
    assert_eq!(o.animation, TextAnimation::FadeIn);
    assert_eq!(o.style, TextStyle::default());
}

#[test]
fn bad_color_falls_back_to_white() {
    let mut o = TextOverlay::new("x", 0, 100, TextAnimation::None);
    o.style.color = "not-a-color".into();
    o.style.background = Some("#00000080".into());
    let LayerContent::Text(t) = layer(&o, 50).unwrap().content else {
        panic!("expected text");
    };
    assert_eq!(t.color, Rgba8::WHITE);
    assert_eq!(t.background, Some(Rgba8 { r: 0, g: 0, b: 0, a: 128 }));
}
