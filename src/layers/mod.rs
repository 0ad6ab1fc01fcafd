//! Per-frame layer model shared by every visual element kind.
//!
//! Each element kind (visual content, diagram, shape, text overlay, post effects)
//! implements [`LayerSource`]: a pure function from a [`FrameCtx`] to an optional
//! [`LayerState`]. `None` means "no draw call this frame".

pub(crate) mod shape;
pub(crate) mod text;
pub(crate) mod window;

use crate::{
    diagram::DiagramLayer,
    effects::post::EffectsLayer,
    effects::transitions::{Reveal, TransitionState, narrower_reveal},
    foundation::core::{Affine, Canvas, Fps, FrameIndex, Point, Vec2},
    layers::{shape::ShapeLayer, text::TextLayer},
    visual::content::{ImageLayer, VideoLayer},
};

/// Explicit timing context threaded into every layer computation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameCtx {
    /// Global composition frame.
    pub frame: FrameIndex,
    /// Frame relative to the owning scene's start.
    pub local_frame: u64,
    /// Owning scene length in frames.
    pub duration_frames: u64,
    /// Composition frame rate.
    pub fps: Fps,
    /// Output canvas.
    pub canvas: Canvas,
}

impl FrameCtx {
    /// Scene-local frame as `f64`.
    pub fn local_f64(&self) -> f64 {
        self.local_frame as f64
    }

    /// Frame rate as `f64`.
    pub fn fps_f64(&self) -> f64 {
        self.fps.as_f64()
    }

    /// Scene-local time in seconds.
    pub fn local_secs(&self) -> f64 {
        self.fps.frames_to_secs(self.local_frame)
    }
}

/// Something that can be drawn as a layer for a given frame.
pub trait LayerSource {
    /// Layer state at `ctx`, or `None` when nothing should be drawn.
    fn compute_layer(&self, ctx: &FrameCtx) -> Option<LayerState>;
}

/// One entry of the back-to-front layer stack handed to a rasterizer.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerState {
    /// Stable identifier within the scene (`"visual"`, `"text:0"`, ...).
    pub id: String,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Canvas-space transform applied to the content.
    pub transform: Affine,
    /// Gaussian blur radius in pixels.
    pub blur_px: f64,
    /// Directional clipping, when wiping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reveal: Option<Reveal>,
    /// What to draw.
    pub content: LayerContent,
}

/// Drawable payload of a layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LayerContent {
    /// Nothing to draw (missing asset or unset visual).
    Empty,
    /// Still image.
    Image(ImageLayer),
    /// Video clip frame.
    Video(VideoLayer),
    /// Procedural diagram.
    Diagram(DiagramLayer),
    /// Text overlay.
    Text(TextLayer),
    /// Decorative shape.
    Shape(ShapeLayer),
    /// Scene-wide post effects.
    Effects(EffectsLayer),
}

impl LayerState {
    /// Fully opaque, untransformed layer.
    pub fn new(id: impl Into<String>, content: LayerContent) -> Self {
        Self {
            id: id.into(),
            opacity: 1.0,
            transform: Affine::IDENTITY,
            blur_px: 0.0,
            reveal: None,
            content,
        }
    }

    /// Apply a transition on top of the current state: opacity multiplies, blur adds,
    /// and the transition transform is applied after the existing one.
    pub fn with_transition(mut self, t: TransitionState, anchor: Point) -> Self {
        self.opacity = (self.opacity * t.opacity).clamp(0.0, 1.0);
        self.blur_px += t.blur_px;
        self.transform = t.to_affine(anchor) * self.transform;
        self.reveal = narrower_reveal(self.reveal, t.reveal);
        self
    }

    /// Uniform scale encoded in the transform.
    pub fn scale(&self) -> f64 {
        let [a, b, ..] = self.transform.as_coeffs();
        (a * a + b * b).sqrt()
    }

    /// Translation encoded in the transform.
    pub fn translation(&self) -> Vec2 {
        self.transform.translation()
    }

    /// `true` for layers that draw nothing.
    pub fn is_empty(&self) -> bool {
        matches!(self.content, LayerContent::Empty)
    }
}
