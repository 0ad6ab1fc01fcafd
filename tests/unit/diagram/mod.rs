use super::*;
use crate::foundation::core::{Fps, FrameIndex};
use serde_json::json;

fn ctx(local: u64) -> FrameCtx {
    FrameCtx {
        frame: FrameIndex(local),
        local_frame: local,
        duration_frames: 300,
        fps: Fps::new(30, 1).unwrap(),
        canvas: Canvas::default(),
    }
}

#[test]
fn classifies_known_types_and_aliases() {
    let cfg = DiagramConfig::from_value(json!({"type": "process_flow", "steps": ["a", "b"]}));
    assert!(matches!(cfg, DiagramConfig::ProcessFlow(_)));
    assert_eq!(cfg.type_name(), "process-flow");
    assert!(cfg.problem().is_none());
}

#[test]
fn unknown_type_renders_placeholder_with_type_string() {
    let cfg = DiagramConfig::from_value(json!({"type": "venn-diagram", "sets": 3}));
    let layer = cfg.render(&ctx(0));
    assert_eq!(layer.diagram_type, "venn-diagram");
    let [Primitive::Placeholder { message, .. }] = layer.primitives.as_slice() else {
        panic!("expected one placeholder, got {:?}", layer.primitives);
    };
    assert!(message.contains("venn-diagram"));
    assert_eq!(cfg.problem().map(|p| p.0), Some(DiagnosticKind::UnsupportedDiagram));
}

#[test]
fn bad_payload_is_malformed_not_an_error() {
    let cfg: DiagramConfig = serde_json::from_value(json!({"type": "timeline", "events": "soon"}))
        .expect("diagram configs always deserialize");
    let DiagramConfig::Malformed { diagram_type, .. } = &cfg else {
        panic!("expected malformed, got {cfg:?}");
    };
    assert_eq!(diagram_type, "timeline");
    let layer = cfg.render(&ctx(5));
    assert!(matches!(
        &layer.primitives[0],
        Primitive::Placeholder { message, .. } if message.contains("timeline")
    ));
    assert_eq!(cfg.problem().map(|p| p.0), Some(DiagnosticKind::MalformedDiagram));
}

#[test]
fn semantic_checks_make_payload_malformed() {
    let cfg = DiagramConfig::from_value(json!({"type": "chemical-reaction"}));
    assert!(matches!(cfg, DiagramConfig::Malformed { .. }));
}

#[test]
fn missing_type_is_unsupported() {
    let cfg = DiagramConfig::from_value(json!({"steps": ["a"]}));
    assert!(matches!(
        cfg,
        DiagramConfig::Unsupported { ref diagram_type, .. } if diagram_type.is_empty()
    ));
}

#[test]
fn serializes_with_canonical_type() {
    let cfg = DiagramConfig::from_value(json!({"type": "Timeline", "events": [{"label": "x"}]}));
    let v = serde_json::to_value(&cfg).unwrap();
    assert_eq!(v["type"], "timeline");
    assert_eq!(DiagramConfig::from_value(v), cfg);

    let raw = json!({"type": "mystery", "k": 1});
    let unsupported = DiagramConfig::from_value(raw.clone());
    assert_eq!(serde_json::to_value(&unsupported).unwrap(), raw);
}

#[test]
fn oversized_counts_are_reported() {
    let cfg = DiagramConfig::from_value(json!({"type": "chemical-reaction",
        "reactants": [{"type": "H2O", "count": 2}, {"type": "CO2", "count": 20}]}));
    assert!(matches!(cfg, DiagramConfig::ChemicalReaction(_)));
    let (kind, message) = cfg.problem().unwrap();
    assert_eq!(kind, DiagnosticKind::MalformedDiagram);
    assert!(message.contains("CO2"));
    assert!(message.contains("20"));

    let fine = DiagramConfig::from_value(json!({"type": "chemical-reaction",
        "reactants": [{"type": "CO2", "count": 12}]}));
    assert!(fine.problem().is_none());
}

#[test]
fn rendering_is_deterministic() {
    let cfg = DiagramConfig::from_value(json!({"type": "process-flow",
        "steps": ["Light", {"label": "Water", "description": "split"}, "Sugar"]}));
    for f in [0, 7, 33, 120] {
        assert_eq!(cfg.render(&ctx(f)), cfg.render(&ctx(f)));
    }
}
