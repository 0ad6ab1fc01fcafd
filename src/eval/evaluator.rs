use crate::{
    assets::store::AssetStore,
    audio::envelope::{AudioFrame, mix_frame},
    composition::model::Composition,
    eval::diagnostic::{Diagnostic, DiagnosticKind},
    foundation::core::FrameIndex,
    layers::{FrameCtx, LayerSource, LayerState, shape::ShapeSource, text::TextOverlayLayer},
    schedule::scheduler::{active_scene, scenes_at},
    visual::content::VisualRenderer,
};

/// Active scene summary for an evaluated frame.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneFrame {
    /// Scene identity.
    pub id: String,
    /// Position in the composition's scene list.
    pub index: usize,
    /// Frame relative to the scene start.
    pub local_frame: u64,
    /// Scene length in frames.
    pub duration_frames: u64,
}

/// Everything a rasterizer and mixer need for one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameState {
    /// Global frame.
    pub frame: FrameIndex,
    /// Active scene, `None` for blank frames.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<SceneFrame>,
    /// Layers back to front: visual, shapes, text overlays, effects.
    pub layers: Vec<LayerState>,
    /// Audible tracks.
    pub audio: AudioFrame,
    /// Problems met while evaluating; never fatal.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl FrameState {
    fn blank(frame: FrameIndex, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            frame,
            scene: None,
            layers: Vec::new(),
            audio: AudioFrame::default(),
            diagnostics,
        }
    }

    /// Layer with the given id.
    pub fn layer(&self, id: &str) -> Option<&LayerState> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// `true` when nothing is drawn.
    pub fn is_blank(&self) -> bool {
        self.layers.is_empty()
    }

    /// `true` when a diagnostic of `kind` was recorded.
    pub fn has_diagnostic(&self, kind: DiagnosticKind) -> bool {
        self.diagnostics.iter().any(|d| d.kind == kind)
    }
}

/// Pure frame evaluator: `(Composition, frame) -> FrameState`.
pub struct Evaluator;

impl Evaluator {
    /// Evaluate `frame` without checking assets.
    #[tracing::instrument(skip(comp))]
    pub fn eval_frame(comp: &Composition, frame: FrameIndex) -> FrameState {
        evaluate(comp, frame, None)
    }

    /// Evaluate `frame`, rendering assets missing from `assets` blank or silent.
    #[tracing::instrument(skip(comp, assets))]
    pub fn eval_frame_with_assets(
        comp: &Composition,
        frame: FrameIndex,
        assets: &AssetStore,
    ) -> FrameState {
        evaluate(comp, frame, Some(assets))
    }
}

fn evaluate(comp: &Composition, frame: FrameIndex, assets: Option<&AssetStore>) -> FrameState {
    let mut diagnostics = Vec::new();

    if frame.0 >= comp.duration_frames {
        diagnostics.push(Diagnostic::global(
            DiagnosticKind::SchedulerGap,
            format!(
                "frame {} is past composition end {}",
                frame.0, comp.duration_frames
            ),
        ));
        return FrameState::blank(frame, diagnostics);
    }

    let covering = scenes_at(&comp.scenes, frame);
    if covering.len() > 1 {
        let ids: Vec<&str> = covering.iter().map(|&i| comp.scenes[i].id.as_str()).collect();
        diagnostics.push(Diagnostic::global(
            DiagnosticKind::SceneOverlap,
            format!("scenes {} cover frame {}; using '{}'", ids.join(", "), frame.0, ids[0]),
        ));
    }

    let Some(active) = active_scene(&comp.scenes, frame) else {
        diagnostics.push(Diagnostic::global(
            DiagnosticKind::SchedulerGap,
            format!("no scene covers frame {}", frame.0),
        ));
        return FrameState::blank(frame, diagnostics);
    };

    let scene = active.scene;
    let ctx = FrameCtx {
        frame,
        local_frame: active.local_frame,
        duration_frames: scene.duration_frames,
        fps: comp.fps,
        canvas: comp.canvas,
    };

    let mut layers = Vec::new();
    let visual = VisualRenderer { scene, assets }.render(&ctx, &mut diagnostics);
    if !visual.is_empty() {
        layers.push(visual);
    }
    let anim = &scene.animation;
    layers.extend(
        anim.shapes
            .iter()
            .enumerate()
            .filter_map(|(index, shape)| ShapeSource { index, shape }.compute_layer(&ctx)),
    );
    layers.extend(
        anim.text_overlays
            .iter()
            .enumerate()
            .filter_map(|(index, overlay)| TextOverlayLayer { index, overlay }.compute_layer(&ctx)),
    );
    layers.extend(anim.effects.compute_layer(&ctx));

    let audio = mix_frame(comp, frame, Some(&active), assets, &mut diagnostics);
    if !diagnostics.is_empty() {
        tracing::debug!(count = diagnostics.len(), scene = %scene.id, "frame diagnostics");
    }

    FrameState {
        frame,
        scene: Some(SceneFrame {
            id: scene.id.clone(),
            index: active.index,
            local_frame: active.local_frame,
            duration_frames: scene.duration_frames,
        }),
        layers,
        audio,
        diagnostics,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
