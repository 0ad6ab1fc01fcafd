use crate::{
    animation::ease::Ease,
    animation::interpolate::interpolate_clamped,
    foundation::core::{Affine, Canvas, Point, Transform2D, Vec2},
};

/// Default entry/exit transition length in frames.
pub const DEFAULT_TRANSITION_FRAMES: u64 = 20;

const ZOOM_FROM_SCALE: f64 = 1.2;
const BLUR_RADIUS_PX: f64 = 24.0;

/// Direction of travel for slides and wipes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WipeDir {
    /// Content moves / is revealed from left to right.
    #[default]
    #[serde(alias = "ltr", alias = "right")]
    LeftToRight,
    /// Content moves / is revealed from right to left.
    #[serde(alias = "rtl", alias = "left")]
    RightToLeft,
    /// Content moves / is revealed from top to bottom.
    #[serde(alias = "ttb", alias = "down")]
    TopToBottom,
    /// Content moves / is revealed from bottom to top.
    #[serde(alias = "btt", alias = "up")]
    BottomToTop,
}

impl WipeDir {
    /// Unit vector of travel.
    pub fn unit(self) -> Vec2 {
        match self {
            Self::LeftToRight => Vec2::new(1.0, 0.0),
            Self::RightToLeft => Vec2::new(-1.0, 0.0),
            Self::TopToBottom => Vec2::new(0.0, 1.0),
            Self::BottomToTop => Vec2::new(0.0, -1.0),
        }
    }

    fn travel_px(self, canvas: Canvas) -> f64 {
        match self {
            Self::LeftToRight | Self::RightToLeft => canvas.w(),
            Self::TopToBottom | Self::BottomToTop => canvas.h(),
        }
    }
}

/// Partial reveal of a layer along a direction (wipe clipping).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reveal {
    /// Direction the visible region grows toward.
    pub dir: WipeDir,
    /// Visible fraction in `[0, 1]`.
    pub fraction: f64,
}

/// The reveal exposing less of the layer, if any.
pub fn narrower_reveal(a: Option<Reveal>, b: Option<Reveal>) -> Option<Reveal> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if a.fraction <= b.fraction { a } else { b }),
        (a, b) => a.or(b),
    }
}

/// Closed set of scene entry/exit transitions.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TransitionKind {
    /// Hard cut.
    None,
    /// Opacity ramp.
    #[default]
    Fade,
    /// Scale from/to a slight zoom while fading.
    Zoom,
    /// Full-canvas slide in the given direction of travel.
    Slide {
        /// Direction of travel.
        #[serde(default)]
        direction: WipeDir,
    },
    /// Blur ramp while fading.
    Blur,
    /// Directional reveal.
    Wipe {
        /// Direction the reveal grows toward.
        #[serde(default)]
        direction: WipeDir,
    },
}

/// One edge transition: kind plus timing.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionSpec {
    /// Transition variant.
    #[serde(flatten)]
    pub kind: TransitionKind,
    /// Length in frames; clamped to half the scene at evaluation.
    #[serde(default = "default_transition_frames")]
    pub duration_frames: u64,
    /// Curve applied to transition progress.
    #[serde(default)]
    pub ease: Ease,
}

fn default_transition_frames() -> u64 {
    DEFAULT_TRANSITION_FRAMES
}

impl Default for TransitionSpec {
    fn default() -> Self {
        Self {
            kind: TransitionKind::Fade,
            duration_frames: DEFAULT_TRANSITION_FRAMES,
            ease: Ease::Linear,
        }
    }
}

/// Entry and exit transitions for a scene. Missing edges default to a fade.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionsSpec {
    /// Entry transition.
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub enter: Option<TransitionSpec>,
    /// Exit transition.
    #[serde(rename = "out", default, skip_serializing_if = "Option::is_none")]
    pub exit: Option<TransitionSpec>,
}

/// Which scene boundary a transition sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionEdge {
    /// Scene start.
    In,
    /// Scene end.
    Out,
}

/// Visual modulation produced by transitions at one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionState {
    /// Opacity multiplier.
    pub opacity: f64,
    /// Uniform scale about the canvas center.
    pub scale: f64,
    /// Translation in pixels.
    pub translate: Vec2,
    /// Gaussian blur radius in pixels.
    pub blur_px: f64,
    /// Directional reveal, when wiping.
    pub reveal: Option<Reveal>,
}

impl Default for TransitionState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TransitionState {
    /// No modulation.
    pub const IDENTITY: Self = Self {
        opacity: 1.0,
        scale: 1.0,
        translate: Vec2::ZERO,
        blur_px: 0.0,
        reveal: None,
    };

    /// Compose two states: opacities and scales multiply, offsets and blur add,
    /// and the narrower reveal wins.
    pub fn then(self, other: Self) -> Self {
        let reveal = narrower_reveal(self.reveal, other.reveal);
        Self {
            opacity: self.opacity * other.opacity,
            scale: self.scale * other.scale,
            translate: self.translate + other.translate,
            blur_px: self.blur_px + other.blur_px,
            reveal,
        }
    }

    /// Affine applying scale about `anchor` and then the translation.
    pub fn to_affine(self, anchor: Point) -> Affine {
        Transform2D::scale_about(self.scale, anchor, self.translate).to_affine()
    }
}

/// Modulation for `kind` at visibility `v` (`0` hidden, `1` fully shown).
pub fn transition_state(
    kind: TransitionKind,
    v: f64,
    edge: TransitionEdge,
    canvas: Canvas,
) -> TransitionState {
    let v = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
    let hidden = 1.0 - v;
    match kind {
        TransitionKind::None => TransitionState::IDENTITY,
        TransitionKind::Fade => TransitionState {
            opacity: v,
            ..TransitionState::IDENTITY
        },
        TransitionKind::Zoom => TransitionState {
            opacity: v,
            scale: 1.0 + (ZOOM_FROM_SCALE - 1.0) * hidden,
            ..TransitionState::IDENTITY
        },
        TransitionKind::Slide { direction } => {
            // Entering content arrives from behind its direction of travel; exiting
            // content leaves ahead of it.
            let sign = match edge {
                TransitionEdge::In => -1.0,
                TransitionEdge::Out => 1.0,
            };
            TransitionState {
                translate: direction.unit() * (sign * hidden * direction.travel_px(canvas)),
                ..TransitionState::IDENTITY
            }
        }
        TransitionKind::Blur => TransitionState {
            opacity: v,
            blur_px: BLUR_RADIUS_PX * hidden,
            ..TransitionState::IDENTITY
        },
        TransitionKind::Wipe { direction } => TransitionState {
            reveal: Some(Reveal {
                dir: direction,
                fraction: v,
            }),
            ..TransitionState::IDENTITY
        },
    }
}

/// Progress through an edge window for a scene-local frame, or `None` outside it.
///
/// The in-window runs over the first `dur` frames and the out-window over the last
/// `dur` frames; progress reaches `1.0` on the last frame of each window.
pub fn edge_progress(
    spec: &TransitionSpec,
    local_frame: u64,
    scene_frames: u64,
    edge: TransitionEdge,
) -> Option<f64> {
    let dur = spec.duration_frames.min(scene_frames / 2);
    if dur == 0 || scene_frames == 0 {
        return None;
    }

    let window_start = match edge {
        TransitionEdge::In => 0,
        TransitionEdge::Out => scene_frames - dur,
    };
    if !(window_start <= local_frame && local_frame < window_start + dur) {
        return None;
    }

    let denom = dur.saturating_sub(1);
    if denom == 0 {
        return Some(1.0);
    }
    let offset = (local_frame - window_start) as f64;
    Some(interpolate_clamped(
        offset,
        (0.0, denom as f64),
        (0.0, 1.0),
        spec.ease,
    ))
}

/// Combined entry/exit modulation for a scene at `local_frame`.
pub fn scene_transition(
    spec: &TransitionsSpec,
    local_frame: u64,
    scene_frames: u64,
    canvas: Canvas,
) -> TransitionState {
    let enter = spec.enter.unwrap_or_default();
    let exit = spec.exit.unwrap_or_default();

    let mut state = TransitionState::IDENTITY;
    if let Some(p) = edge_progress(&enter, local_frame, scene_frames, TransitionEdge::In) {
        state = state.then(transition_state(enter.kind, p, TransitionEdge::In, canvas));
    }
    if let Some(p) = edge_progress(&exit, local_frame, scene_frames, TransitionEdge::Out) {
        state = state.then(transition_state(
            exit.kind,
            1.0 - p,
            TransitionEdge::Out,
            canvas,
        ));
    }
    state
}

#[cfg(test)]
#[path = "../../tests/unit/effects/transitions.rs"]
mod tests;
