use crate::{
    assets::store::{AssetStore, Resolved, resolve},
    composition::model::{SceneDescriptor, VideoSource, VisualContent},
    effects::transitions::{TransitionState, scene_transition},
    eval::diagnostic::{Diagnostic, DiagnosticKind},
    foundation::core::Fps,
    layers::{FrameCtx, LayerContent, LayerSource, LayerState},
    visual::camera::CameraState,
};

/// Resolved still-image draw call.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLayer {
    /// Asset reference.
    pub src: String,
    /// Camera applied to the image (already folded into the layer transform).
    pub camera: CameraState,
    /// Pixel size, when the asset store probed it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<(u32, u32)>,
}

/// Resolved video draw call.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoLayer {
    /// Asset reference.
    pub src: String,
    /// Source time to display, in seconds.
    pub source_time_s: f64,
}

/// Source time shown at scene-local frame `local`.
///
/// Starts at `startFromSec` and advances at `playbackRate`. Looping wraps within
/// `[startFromSec, durationSec)`; without looping the time holds at `durationSec`.
pub fn video_source_time(video: &VideoSource, local: u64, fps: Fps) -> f64 {
    let start = if video.start_from_sec.is_finite() {
        video.start_from_sec.max(0.0)
    } else {
        0.0
    };
    let rate = if video.playback_rate.is_finite() && video.playback_rate > 0.0 {
        video.playback_rate
    } else {
        1.0
    };
    let advanced = fps.frames_to_secs(local) * rate;
    let t = match video.duration_sec.filter(|d| d.is_finite() && *d > start) {
        Some(end) if video.looped => start + advanced.rem_euclid(end - start),
        Some(end) => (start + advanced).min(end),
        None => start + advanced,
    };
    t.max(0.0)
}

/// Clip audio gain; `0` when muted.
pub fn video_gain(video: &VideoSource) -> f64 {
    if video.muted || !video.volume.is_finite() {
        0.0
    } else {
        video.volume.max(0.0)
    }
}

/// Renders a scene's primary visual and records what went wrong.
pub struct VisualRenderer<'a> {
    /// Owning scene.
    pub scene: &'a SceneDescriptor,
    /// Loaded assets, when prepared.
    pub assets: Option<&'a AssetStore>,
}

impl VisualRenderer<'_> {
    /// Base visual layer with camera and transitions applied.
    pub fn render(&self, ctx: &FrameCtx, diagnostics: &mut Vec<Diagnostic>) -> LayerState {
        let scene = self.scene;
        let transition = scene_transition(
            &scene.animation.transitions,
            ctx.local_frame,
            ctx.duration_frames,
            ctx.canvas,
        );
        let center = ctx.canvas.center();

        match &scene.visual {
            VisualContent::None => {
                diagnostics.push(Diagnostic::scene(
                    DiagnosticKind::MissingAsset,
                    &scene.id,
                    "scene has no visual",
                ));
                empty()
            }
            VisualContent::Image(image) => {
                let Some(dimensions) = self.check(&image.src, diagnostics) else {
                    return empty();
                };
                let camera = scene
                    .animation
                    .camera
                    .map(|c| c.state_at(ctx.local_f64(), ctx.duration_frames, ctx.canvas))
                    .unwrap_or(CameraState::NEUTRAL);
                let mut layer = LayerState::new(
                    "visual",
                    LayerContent::Image(ImageLayer {
                        src: image.src.clone(),
                        camera,
                        dimensions,
                    }),
                );
                layer.transform = camera.to_affine(ctx.canvas);
                layer.with_transition(transition, center)
            }
            VisualContent::Video(video) => {
                if self.check(&video.src, diagnostics).is_none() {
                    return empty();
                }
                let layer = LayerState::new(
                    "visual",
                    LayerContent::Video(VideoLayer {
                        src: video.src.clone(),
                        source_time_s: video_source_time(video, ctx.local_frame, ctx.fps),
                    }),
                );
                layer.with_transition(opacity_and_blur(transition), center)
            }
            VisualContent::Diagram { diagram } => {
                if let Some((kind, message)) = diagram.problem() {
                    diagnostics.push(Diagnostic::scene(kind, &scene.id, message));
                }
                let layer = LayerState::new("visual", LayerContent::Diagram(diagram.render(ctx)));
                layer.with_transition(opacity_and_blur(transition), center)
            }
        }
    }

    /// `Some(dimensions)` when `src` is usable, otherwise records a missing asset.
    fn check(&self, src: &str, diagnostics: &mut Vec<Diagnostic>) -> Option<Option<(u32, u32)>> {
        match resolve(src, self.assets) {
            Ok(Resolved::Unchecked) => Some(None),
            Ok(Resolved::Ready(loaded)) => Some(loaded.dimensions),
            Err(reason) => {
                diagnostics.push(Diagnostic::scene(
                    DiagnosticKind::MissingAsset,
                    &self.scene.id,
                    format!("{} visual: {reason}", self.scene.visual.type_name()),
                ));
                None
            }
        }
    }
}

impl LayerSource for VisualRenderer<'_> {
    fn compute_layer(&self, ctx: &FrameCtx) -> Option<LayerState> {
        let layer = self.render(ctx, &mut Vec::new());
        (!layer.is_empty()).then_some(layer)
    }
}

fn empty() -> LayerState {
    LayerState::new("visual", LayerContent::Empty)
}

fn opacity_and_blur(t: TransitionState) -> TransitionState {
    TransitionState {
        opacity: t.opacity,
        blur_px: t.blur_px,
        ..TransitionState::IDENTITY
    }
}

#[cfg(test)]
#[path = "../../tests/unit/visual/content.rs"]
mod tests;
