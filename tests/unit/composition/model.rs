use super::*;
use crate::diagram::DiagramConfig;

const MINIMAL: &str = r#"{
  "fps": 30,
  "durationFrames": 90,
  "scenes": [
    { "id": "a", "startFrame": 0, "durationFrames": 90, "visual": { "type": "image", "src": "a.png" } }
  ]
}"#;

#[test]
fn parses_with_defaults() {
    let comp = Composition::from_json_str(MINIMAL).unwrap();
    assert_eq!(comp.fps, Fps::new(30, 1).unwrap());
    assert_eq!(comp.canvas, Canvas::default());
    assert_eq!(comp.background_volume, 0.25);
    let scene = &comp.scenes[0];
    assert_eq!(scene.audio_volume, 1.0);
    assert!(scene.audio.is_none());
    assert_eq!(scene.animation, AnimationSpec::default());
    assert_eq!(scene.visual.src(), Some("a.png"));
    assert!(comp.validate().is_ok());
}

#[test]
fn parses_video_and_diagram_visuals() {
    let json = r#"{
      "fps": { "num": 30000, "den": 1001 },
      "durationFrames": 200,
      "scenes": [
        { "id": "v", "startFrame": 0, "durationFrames": 100,
          "visual": { "type": "video", "src": "https://cdn.example.com/v.mp4",
                      "startFromSec": 2.5, "loop": true, "durationSec": 8, "muted": true } },
        { "id": "d", "startFrame": 100, "durationFrames": 100,
          "visual": { "type": "diagram", "diagram": { "type": "process-flow", "steps": ["a", "b"] } } }
      ]
    }"#;
    let comp = Composition::from_json_str(json).unwrap();
    let VisualContent::Video(v) = &comp.scenes[0].visual else {
        panic!("expected video");
    };
    assert!(v.looped && v.muted);
    assert_eq!(v.start_from_sec, 2.5);
    assert_eq!(v.playback_rate, 1.0);
    assert_eq!(v.duration_sec, Some(8.0));
    let VisualContent::Diagram { diagram } = &comp.scenes[1].visual else {
        panic!("expected diagram");
    };
    assert!(matches!(diagram, DiagramConfig::ProcessFlow(_)));
    assert_eq!(comp.scenes[1].visual.type_name(), "diagram");
}

#[test]
fn missing_visual_is_none() {
    let json = r#"{ "fps": 24, "durationFrames": 10, "scenes": [
      { "id": "x", "startFrame": 0, "durationFrames": 10 } ] }"#;
    let comp = Composition::from_json_str(json).unwrap();
    assert_eq!(comp.scenes[0].visual, VisualContent::None);
    assert_eq!(comp.scenes[0].visual.src(), None);
}

#[test]
fn rejects_malformed_json() {
    let err = Composition::from_json_str(r#"{ "fps": 0, "durationFrames": 10 }"#).unwrap_err();
    assert!(matches!(err, ReelError::Serde(_)));
    assert!(Composition::from_json_str("not json").is_err());
}

#[test]
fn issues_collect_every_problem() {
    let json = r#"{
      "fps": 30,
      "durationFrames": 100,
      "canvas": { "width": 0, "height": 720 },
      "backgroundVolume": -1,
      "scenes": [
        { "id": "a", "startFrame": 0, "durationFrames": 60, "audioVolume": -0.5 },
        { "id": "a", "startFrame": 50, "durationFrames": 80 },
        { "id": "", "startFrame": 0, "durationFrames": 0 }
      ]
    }"#;
    let comp = Composition::from_json_str(json).unwrap();
    let issues = comp.issues();
    let has = |needle: &str| issues.iter().any(|i| i.contains(needle));
    assert!(has("canvas"));
    assert!(has("backgroundVolume"));
    assert!(has("audioVolume"));
    assert!(has("duplicate scene id 'a'"));
    assert!(has("empty id"));
    assert!(has("durationFrames 0"));
    assert!(has("past composition end"));
    assert!(has("overlap"));
    assert!(matches!(comp.validate(), Err(ReelError::Validation(_))));
}

#[test]
fn asset_refs_are_distinct_in_first_use_order() {
    let json = r#"{
      "fps": 30,
      "durationFrames": 100,
      "backgroundAudio": "bed.mp3",
      "scenes": [
        { "id": "a", "startFrame": 0, "durationFrames": 50,
          "visual": { "type": "image", "src": "a.png" }, "audio": "vo.mp3" },
        { "id": "b", "startFrame": 50, "durationFrames": 50,
          "visual": { "type": "image", "src": "a.png" }, "audio": "bed.mp3" }
      ]
    }"#;
    let comp = Composition::from_json_str(json).unwrap();
    assert_eq!(comp.asset_refs(), ["a.png", "vo.mp3", "bed.mp3"]);
}

#[test]
fn json_round_trips() {
    let comp = Composition::from_json_str(MINIMAL).unwrap();
    let again = Composition::from_json_str(&comp.to_json_pretty().unwrap()).unwrap();
    assert_eq!(comp, again);
}

#[test]
fn reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("comp.json");
    std::fs::write(&path, MINIMAL).unwrap();
    assert_eq!(Composition::from_path(&path).unwrap().scenes.len(), 1);

    let err = Composition::from_path(dir.path().join("absent.json")).unwrap_err();
    assert!(err.to_string().contains("absent.json"));
}
