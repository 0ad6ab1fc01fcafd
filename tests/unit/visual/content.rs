use super::*;
use crate::assets::source::AssetRef;
use crate::assets::store::{AssetKind, AssetStatus, LoadedAsset};
use crate::composition::model::{ImageSource, SceneDescriptor};
use crate::foundation::core::{Canvas, FrameIndex};
use crate::visual::camera::CameraSpec;

fn fps() -> Fps {
    Fps::new(30, 1).unwrap()
}

fn scene(visual: VisualContent) -> SceneDescriptor {
    SceneDescriptor {
        id: "s".to_string(),
        start_frame: 0,
        duration_frames: 300,
        visual,
        audio: None,
        audio_volume: 1.0,
        animation: Default::default(),
    }
}

fn ctx(local: u64) -> FrameCtx {
    FrameCtx {
        frame: FrameIndex(local),
        local_frame: local,
        duration_frames: 300,
        fps: fps(),
        canvas: Canvas::default(),
    }
}

fn image(src: &str) -> VisualContent {
    VisualContent::Image(ImageSource {
        src: src.to_string(),
    })
}

#[test]
fn video_time_advances_with_rate_and_offset() {
    let v = VideoSource {
        start_from_sec: 2.0,
        playback_rate: 2.0,
        ..VideoSource::default()
    };
    assert_eq!(video_source_time(&v, 0, fps()), 2.0);
    assert!((video_source_time(&v, 30, fps()) - 4.0).abs() < 1e-9);
}

#[test]
fn video_time_loops_or_holds() {
    let mut v = VideoSource {
        start_from_sec: 1.0,
        duration_sec: Some(4.0),
        looped: true,
        ..VideoSource::default()
    };
    assert!((video_source_time(&v, 105, fps()) - 1.5).abs() < 1e-9);
    assert!((video_source_time(&v, 150, fps()) - 3.0).abs() < 1e-9);
    v.looped = false;
    assert_eq!(video_source_time(&v, 300, fps()), 4.0);
}

#[test]
fn video_gain_respects_mute() {
    let mut v = VideoSource {
        volume: 0.4,
        ..VideoSource::default()
    };
    assert_eq!(video_gain(&v), 0.4);
    v.muted = true;
    assert_eq!(video_gain(&v), 0.0);
}

#[test]
fn image_layer_carries_camera_and_fades_in() {
    let mut s = scene(image("leaf.png"));
    s.animation.camera = Some(CameraSpec {
        end_zoom: 1.15,
        ..CameraSpec::default()
    });
    let r = VisualRenderer {
        scene: &s,
        assets: None,
    };
    let mut diags = Vec::new();
    let first = r.render(&ctx(0), &mut diags);
    assert_eq!(first.opacity, 0.0);
    let mid = r.render(&ctx(150), &mut diags);
    assert_eq!(mid.opacity, 1.0);
    assert!(mid.scale() > 1.0 && mid.scale() < 1.15);
    let LayerContent::Image(img) = &mid.content else {
        panic!("expected image");
    };
    assert_eq!(img.src, "leaf.png");
    assert_eq!(img.dimensions, None);
    assert!(diags.is_empty());
}

#[test]
fn prepared_image_reports_dimensions() {
    let s = scene(image("leaf.png"));
    let mut store = AssetStore::new();
    store.insert(
        &AssetRef::parse("leaf.png").unwrap(),
        AssetStatus::Ready(LoadedAsset {
            kind: AssetKind::Image,
            byte_len: 10,
            dimensions: Some((640, 480)),
        }),
    );
    let r = VisualRenderer {
        scene: &s,
        assets: Some(&store),
    };
    let layer = r.render(&ctx(100), &mut Vec::new());
    let LayerContent::Image(img) = &layer.content else {
        panic!("expected image");
    };
    assert_eq!(img.dimensions, Some((640, 480)));
}

#[test]
fn missing_asset_renders_empty_with_diagnostic() {
    let s = scene(image("gone.png"));
    let mut store = AssetStore::new();
    store.insert(
        &AssetRef::parse("gone.png").unwrap(),
        AssetStatus::Missing {
            reason: "404".to_string(),
        },
    );
    let r = VisualRenderer {
        scene: &s,
        assets: Some(&store),
    };
    let mut diags = Vec::new();
    let layer = r.render(&ctx(100), &mut diags);
    assert!(layer.is_empty());
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind, DiagnosticKind::MissingAsset);
    assert!(diags[0].message.contains("404"));
    assert!(r.compute_layer(&ctx(100)).is_none());
}

#[test]
fn video_layer_ignores_camera_transform() {
    let mut s = scene(VisualContent::Video(VideoSource {
        src: "clip.mp4".to_string(),
        ..VideoSource::default()
    }));
    s.animation.camera = Some(CameraSpec {
        end_zoom: 2.0,
        ..CameraSpec::default()
    });
    let r = VisualRenderer {
        scene: &s,
        assets: None,
    };
    let layer = r.render(&ctx(150), &mut Vec::new());
    assert_eq!(layer.scale(), 1.0);
    let LayerContent::Video(v) = &layer.content else {
        panic!("expected video");
    };
    assert!((v.source_time_s - 5.0).abs() < 1e-9);
}

#[test]
fn no_visual_is_reported() {
    let s = scene(VisualContent::None);
    let r = VisualRenderer {
        scene: &s,
        assets: None,
    };
    let mut diags = Vec::new();
    assert!(r.render(&ctx(10), &mut diags).is_empty());
    assert_eq!(diags.len(), 1);
}
