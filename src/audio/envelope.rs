use crate::{
    animation::interpolate::{InterpolateOpts, interpolate},
    assets::store::{AssetStore, resolve},
    composition::model::{Composition, VisualContent},
    eval::diagnostic::{Diagnostic, DiagnosticKind},
    foundation::core::{Fps, FrameIndex},
    schedule::scheduler::ActiveScene,
    visual::content::{video_gain, video_source_time},
};

/// Length of the background music fade-out at the end of the composition.
pub const BACKGROUND_FADE_SECS: f64 = 2.0;

/// What an audio track is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackRole {
    /// Composition-wide music.
    Background,
    /// Scene voice-over.
    Narration,
    /// Audio of a scene's video clip.
    Video,
}

/// One audible track at a frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioTrackState {
    /// `"background"`, `"narration:<scene>"` or `"video:<scene>"`.
    pub id: String,
    /// Track purpose.
    pub role: TrackRole,
    /// Asset reference.
    pub src: String,
    /// Linear gain.
    pub gain: f64,
    /// Position in the source, in seconds.
    pub source_time_s: f64,
}

/// Every audible track at a frame. Empty means silence.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct AudioFrame {
    /// Active tracks.
    pub tracks: Vec<AudioTrackState>,
}

impl AudioFrame {
    /// Gain of the first track with `role`, `0` when absent.
    pub fn gain(&self, role: TrackRole) -> f64 {
        self.tracks
            .iter()
            .find(|t| t.role == role)
            .map_or(0.0, |t| t.gain)
    }

    /// `true` when no track is audible.
    pub fn is_silent(&self) -> bool {
        self.tracks.iter().all(|t| t.gain <= 0.0)
    }
}

/// Background music gain: `base` until the last two seconds, then linearly to `0` at
/// `total_frames`.
pub fn background_gain(frame: FrameIndex, total_frames: u64, fps: Fps, base: f64) -> f64 {
    let base = if base.is_finite() { base.max(0.0) } else { 0.0 };
    let total = total_frames as f64;
    let fade = BACKGROUND_FADE_SECS * fps.as_f64();
    interpolate(
        frame.0 as f64,
        &[total - fade, total],
        &[base, 0.0],
        InterpolateOpts::clamped(),
    )
}

fn gain(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

/// Audio tracks for `frame`; silent when no scene is active.
pub fn mix_frame(
    comp: &Composition,
    frame: FrameIndex,
    active: Option<&ActiveScene<'_>>,
    assets: Option<&AssetStore>,
    diagnostics: &mut Vec<Diagnostic>,
) -> AudioFrame {
    let Some(active) = active else {
        return AudioFrame::default();
    };
    let scene = active.scene;
    let mut tracks = Vec::new();

    if let Some(bg) = comp.background_audio.as_deref().filter(|s| !s.trim().is_empty()) {
        match resolve(bg, assets) {
            Ok(_) => tracks.push(AudioTrackState {
                id: "background".to_string(),
                role: TrackRole::Background,
                src: bg.to_string(),
                gain: background_gain(
                    frame,
                    comp.duration_frames,
                    comp.fps,
                    comp.background_volume,
                ),
                source_time_s: comp.fps.frames_to_secs(frame.0),
            }),
            Err(reason) => diagnostics.push(Diagnostic::global(
                DiagnosticKind::MissingAsset,
                format!("background audio: {reason}"),
            )),
        }
    }

    if let Some(src) = scene.audio.as_deref().filter(|s| !s.trim().is_empty()) {
        match resolve(src, assets) {
            Ok(_) => tracks.push(AudioTrackState {
                id: format!("narration:{}", scene.id),
                role: TrackRole::Narration,
                src: src.to_string(),
                gain: gain(scene.audio_volume),
                source_time_s: comp.fps.frames_to_secs(active.local_frame),
            }),
            Err(reason) => diagnostics.push(Diagnostic::scene(
                DiagnosticKind::MissingAsset,
                &scene.id,
                format!("narration: {reason}"),
            )),
        }
    }

    // Missing clips are reported by the visual layer.
    if let VisualContent::Video(video) = &scene.visual
        && resolve(&video.src, assets).is_ok()
        && video_gain(video) > 0.0
    {
        tracks.push(AudioTrackState {
            id: format!("video:{}", scene.id),
            role: TrackRole::Video,
            src: video.src.clone(),
            gain: video_gain(video),
            source_time_s: video_source_time(video, active.local_frame, comp.fps),
        });
    }

    AudioFrame { tracks }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/envelope.rs"]
mod tests;
