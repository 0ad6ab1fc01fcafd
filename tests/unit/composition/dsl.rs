use super::*;
use crate::effects::transitions::TransitionKind;
use crate::layers::text::TextAnimation;

fn fps() -> Fps {
    Fps::new(30, 1).unwrap()
}

#[test]
fn chains_scenes_back_to_back() {
    let comp = CompositionBuilder::new(fps(), 300)
        .background_audio("music/bed.mp3", 0.2)
        .then_scene(SceneBuilder::new("intro", 100).image("images/intro.png"))
        .unwrap()
        .then_scene(
            SceneBuilder::new("clip", 200)
                .video(video("clips/a.mp4"))
                .narration("vo/clip.mp3", 0.8),
        )
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(comp.scenes[1].start_frame, 100);
    assert_eq!(comp.scenes[1].audio_volume, 0.8);
    assert_eq!(comp.background_volume, 0.2);
    assert_eq!(
        comp.asset_refs(),
        ["images/intro.png", "clips/a.mp4", "vo/clip.mp3", "music/bed.mp3"]
    );
}

#[test]
fn duplicate_ids_are_rejected() {
    let res = CompositionBuilder::new(fps(), 100)
        .scene(SceneBuilder::new("a", 50).build())
        .unwrap()
        .scene(SceneBuilder::new("a", 50).start_frame(50).build());
    assert!(res.is_err());
}

#[test]
fn build_validates() {
    let res = CompositionBuilder::new(fps(), 50)
        .scene(SceneBuilder::new("long", 100).build())
        .unwrap()
        .build();
    let err = res.unwrap_err().to_string();
    assert!(err.contains("past composition end"));
}

#[test]
fn scene_builder_fills_animation() {
    let scene = SceneBuilder::new("s", 90)
        .image("a.png")
        .camera(CameraSpec {
            end_zoom: 1.2,
            ..CameraSpec::default()
        })
        .text(TextOverlay::new("Hello", 0, 60, TextAnimation::SlideUp))
        .exit(TransitionSpec {
            kind: TransitionKind::Zoom,
            ..TransitionSpec::default()
        })
        .build();
    assert_eq!(scene.animation.text_overlays.len(), 1);
    assert_eq!(scene.animation.camera.unwrap().end_zoom, 1.2);
    assert!(scene.animation.transitions.enter.is_none());
    assert_eq!(
        scene.animation.transitions.exit.unwrap().kind,
        TransitionKind::Zoom
    );
}
