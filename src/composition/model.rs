use std::path::Path;

use anyhow::Context;

use crate::{
    diagram::DiagramConfig,
    effects::post::EffectsSpec,
    effects::transitions::TransitionsSpec,
    foundation::core::{Canvas, Fps, FrameIndex, FrameRange},
    foundation::error::{ReelError, ReelResult},
    layers::{shape::Shape, text::TextOverlay},
    visual::camera::CameraSpec,
};

/// Immutable render-job input: scenes placed on a global frame axis plus background audio.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Composition {
    /// Frame rate.
    pub fps: Fps,
    /// Output canvas.
    #[serde(default)]
    pub canvas: Canvas,
    /// Total frame count of the render job.
    pub duration_frames: u64,
    /// Scenes in list order; the first match wins when intervals overlap.
    #[serde(default)]
    pub scenes: Vec<SceneDescriptor>,
    /// Background music reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_audio: Option<String>,
    /// Base background music gain.
    #[serde(default = "default_background_volume")]
    pub background_volume: f64,
}

fn default_background_volume() -> f64 {
    0.25
}

fn default_gain() -> f64 {
    1.0
}

/// One scene of the timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDescriptor {
    /// Scene identity.
    pub id: String,
    /// First global frame of the scene.
    pub start_frame: u64,
    /// Scene length in frames.
    pub duration_frames: u64,
    /// Primary visual.
    #[serde(default)]
    pub visual: VisualContent,
    /// Narration track reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    /// Narration gain.
    #[serde(default = "default_gain")]
    pub audio_volume: f64,
    /// Camera, overlays, shapes, effects, transitions.
    #[serde(default)]
    pub animation: AnimationSpec,
}

/// Everything animated on top of a scene's visual. All parts are optional.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationSpec {
    /// Ken Burns camera for image visuals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraSpec>,
    /// Text overlays, drawn in list order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub text_overlays: Vec<TextOverlay>,
    /// Decorative shapes, drawn below overlays.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shapes: Vec<Shape>,
    /// Scene-wide post effects.
    #[serde(default, skip_serializing_if = "EffectsSpec::is_empty")]
    pub effects: EffectsSpec,
    /// Entry and exit transitions.
    #[serde(default)]
    pub transitions: TransitionsSpec,
}

/// Scene visual, selected by `type`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum VisualContent {
    /// No visual; renders blank.
    #[default]
    None,
    /// Still image with the scene camera.
    Image(ImageSource),
    /// Pre-rendered clip.
    Video(VideoSource),
    /// Procedural diagram.
    Diagram {
        /// Diagram payload.
        diagram: DiagramConfig,
    },
}

/// Still image reference.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageSource {
    /// URL or bundled asset path.
    #[serde(default)]
    pub src: String,
}

/// Video clip reference and playback parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSource {
    /// URL or bundled asset path.
    #[serde(default)]
    pub src: String,
    /// Source offset of the first scene frame, in seconds.
    #[serde(default)]
    pub start_from_sec: f64,
    /// Source seconds advanced per scene second.
    #[serde(default = "default_gain")]
    pub playback_rate: f64,
    /// Wrap back to `start_from_sec` at the end of the clip.
    #[serde(default, rename = "loop")]
    pub looped: bool,
    /// Known clip length in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_sec: Option<f64>,
    /// Clip audio gain.
    #[serde(default = "default_gain")]
    pub volume: f64,
    /// Silence the clip audio.
    #[serde(default)]
    pub muted: bool,
}

impl Default for VideoSource {
    fn default() -> Self {
        Self {
            src: String::new(),
            start_from_sec: 0.0,
            playback_rate: 1.0,
            looped: false,
            duration_sec: None,
            volume: 1.0,
            muted: false,
        }
    }
}

impl VisualContent {
    /// Asset reference of image and video visuals.
    pub fn src(&self) -> Option<&str> {
        match self {
            Self::Image(i) => Some(&i.src),
            Self::Video(v) => Some(&v.src),
            Self::None | Self::Diagram { .. } => None,
        }
    }

    /// Discriminator name as written in descriptors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Image(_) => "image",
            Self::Video(_) => "video",
            Self::Diagram { .. } => "diagram",
        }
    }
}

impl SceneDescriptor {
    /// Global frames covered by the scene, `[start, start + duration)`.
    pub fn range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(self.start_frame),
            end: FrameIndex(self.start_frame.saturating_add(self.duration_frames)),
        }
    }
}

impl Composition {
    /// Parse a timeline descriptor from JSON.
    pub fn from_json_str(json: &str) -> ReelResult<Self> {
        serde_json::from_str(json).map_err(|e| ReelError::serde(e.to_string()))
    }

    /// Read and parse a timeline descriptor file.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read composition '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> ReelResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ReelError::serde(e.to_string()))
    }

    /// Every distinct asset reference in the composition, in first-use order.
    pub fn asset_refs(&self) -> Vec<&str> {
        let mut out = Vec::<&str>::new();
        for scene in &self.scenes {
            for s in [scene.visual.src(), scene.audio.as_deref()].into_iter().flatten() {
                if !s.trim().is_empty() && !out.contains(&s) {
                    out.push(s);
                }
            }
        }
        if let Some(bg) = self.background_audio.as_deref()
            && !bg.trim().is_empty()
            && !out.contains(&bg)
        {
            out.push(bg);
        }
        out
    }

    /// Every problem with the descriptor. Evaluation tolerates all of them.
    pub fn issues(&self) -> Vec<String> {
        let mut out = Vec::new();
        if self.canvas.width == 0 || self.canvas.height == 0 {
            out.push("canvas width/height must be > 0".to_string());
        }
        if self.duration_frames == 0 {
            out.push("durationFrames must be > 0".to_string());
        }
        if !self.background_volume.is_finite() || self.background_volume < 0.0 {
            out.push("backgroundVolume must be finite and >= 0".to_string());
        }

        for (i, scene) in self.scenes.iter().enumerate() {
            let label = if scene.id.trim().is_empty() {
                out.push(format!("scene #{i} has an empty id"));
                format!("#{i}")
            } else {
                format!("'{}'", scene.id)
            };
            if scene.duration_frames == 0 {
                out.push(format!("scene {label} has durationFrames 0"));
            }
            if scene.range().end.0 > self.duration_frames {
                out.push(format!(
                    "scene {label} ends at frame {} past composition end {}",
                    scene.range().end.0,
                    self.duration_frames
                ));
            }
            if !scene.audio_volume.is_finite() || scene.audio_volume < 0.0 {
                out.push(format!("scene {label} audioVolume must be finite and >= 0"));
            }
            if self.scenes[..i].iter().any(|s| s.id == scene.id) && !scene.id.trim().is_empty() {
                out.push(format!("duplicate scene id {label}"));
            }
        }

        for (a, b) in crate::schedule::scheduler::overlapping_pairs(&self.scenes) {
            out.push(format!(
                "scenes '{}' and '{}' overlap; '{}' wins on shared frames",
                self.scenes[a].id, self.scenes[b].id, self.scenes[a].id
            ));
        }
        out
    }

    /// Fail with every descriptor problem joined into one validation error.
    pub fn validate(&self) -> ReelResult<()> {
        let issues = self.issues();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ReelError::validation(issues.join("; ")))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
