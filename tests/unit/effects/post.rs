use super::*;
use crate::foundation::core::{Canvas, Fps};

fn ctx(frame: u64, local: u64) -> FrameCtx {
    FrameCtx {
        frame: FrameIndex(frame),
        local_frame: local,
        duration_frames: 300,
        fps: Fps::new(30, 1).unwrap(),
        canvas: Canvas::default(),
    }
}

#[test]
fn empty_spec_draws_nothing() {
    assert!(EffectsSpec::default().compute_layer(&ctx(0, 0)).is_none());
}

#[test]
fn overrides_win_over_preset() {
    let grade = ColorGradeSpec {
        preset: GradePreset::Warm,
        saturation: Some(2.0),
        sepia: Some(5.0),
        ..ColorGradeSpec::default()
    };
    let f = grade.resolve();
    assert_eq!(f.saturation, 2.0);
    assert_eq!(f.sepia, 1.0);
    assert_eq!(f.brightness, GradePreset::Warm.filter().brightness);
}

#[test]
fn neutral_preset_is_identity() {
    assert_eq!(GradePreset::None.filter(), ColorFilter::NEUTRAL);
}

#[test]
fn letterbox_eases_in() {
    let spec = EffectsSpec {
        letterbox: Some(LetterboxSpec { size: 10.0 }),
        ..EffectsSpec::default()
    };
    assert_eq!(spec.resolve(&ctx(0, 0)).letterbox_px, Some(0.0));
    assert_eq!(spec.resolve(&ctx(40, 40)).letterbox_px, Some(108.0));
    let mid = spec.resolve(&ctx(10, 10)).letterbox_px.unwrap();
    assert!(mid > 54.0 && mid < 108.0);
}

#[test]
fn grain_seed_varies_per_frame_and_repeats() {
    assert_ne!(grain_seed(FrameIndex(1)), grain_seed(FrameIndex(2)));
    assert_eq!(grain_seed(FrameIndex(7)), grain_seed(FrameIndex(7)));
}

#[test]
fn parses_effects_block() {
    let spec: EffectsSpec = serde_json::from_str(
        r#"{"vignette":{},"colorGrade":{"preset":"dramatic"},"grain":{"intensity":3}}"#,
    )
    .unwrap();
    let layer = spec.resolve(&ctx(5, 5));
    assert_eq!(layer.vignette, Some(0.4));
    assert_eq!(layer.filter, Some(GradePreset::Dramatic.filter()));
    assert_eq!(layer.grain.map(|g| g.intensity), Some(1.0));
    assert_eq!(layer.letterbox_px, None);
}
