use crate::{
    animation::ease::Ease,
    animation::spring::{SpringConfig, spring},
    foundation::core::{Affine, Canvas, Point, Rgba8, Transform2D, Vec2},
    layers::{FrameCtx, LayerContent, LayerSource, LayerState, window::Window},
};

const SAFE_MARGIN_PCT: f64 = 6.0;
const SLIDE_DISTANCE_PX: f64 = 60.0;
const SCALE_FROM: f64 = 0.6;
const BLUR_FROM_PX: f64 = 16.0;
const TEXT_SPRING: SpringConfig = SpringConfig::new(12.0, 120.0, 1.0);

/// Nine-way anchor for overlay placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Anchor {
    /// Top-left corner.
    #[serde(alias = "top-left")]
    TopLeft,
    /// Top edge, centered.
    #[serde(alias = "top-center", alias = "top")]
    TopCenter,
    /// Top-right corner.
    #[serde(alias = "top-right")]
    TopRight,
    /// Left edge, centered vertically.
    #[serde(alias = "center-left", alias = "left")]
    CenterLeft,
    /// Canvas center.
    #[default]
    Center,
    /// Right edge, centered vertically.
    #[serde(alias = "center-right", alias = "right")]
    CenterRight,
    /// Bottom-left corner.
    #[serde(alias = "bottom-left")]
    BottomLeft,
    /// Bottom edge, centered.
    #[serde(alias = "bottom-center", alias = "bottom")]
    BottomCenter,
    /// Bottom-right corner.
    #[serde(alias = "bottom-right")]
    BottomRight,
}

/// Horizontal text alignment implied by an anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAlign {
    /// Left-aligned.
    Left,
    /// Centered.
    Center,
    /// Right-aligned.
    Right,
}

impl Anchor {
    /// Normalized `(x, y)` position in `[0, 1]` inside the safe area.
    fn normalized(self) -> (f64, f64) {
        let lo = SAFE_MARGIN_PCT / 100.0;
        let hi = 1.0 - lo;
        match self {
            Self::TopLeft => (lo, lo),
            Self::TopCenter => (0.5, lo),
            Self::TopRight => (hi, lo),
            Self::CenterLeft => (lo, 0.5),
            Self::Center => (0.5, 0.5),
            Self::CenterRight => (hi, 0.5),
            Self::BottomLeft => (lo, hi),
            Self::BottomCenter => (0.5, hi),
            Self::BottomRight => (hi, hi),
        }
    }

    /// Anchor point on `canvas`, in pixels.
    pub fn origin(self, canvas: Canvas) -> Point {
        let (x, y) = self.normalized();
        Point::new(canvas.w() * x, canvas.h() * y)
    }

    /// Alignment for text placed at this anchor.
    pub fn align(self) -> TextAlign {
        match self {
            Self::TopLeft | Self::CenterLeft | Self::BottomLeft => TextAlign::Left,
            Self::TopCenter | Self::Center | Self::BottomCenter => TextAlign::Center,
            Self::TopRight | Self::CenterRight | Self::BottomRight => TextAlign::Right,
        }
    }
}

/// Closed set of overlay animations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAnimation {
    /// Static for the whole window.
    None,
    /// Fade in, then fade out before the window closes.
    #[default]
    #[serde(alias = "fade")]
    FadeIn,
    /// Rise into place from below.
    SlideUp,
    /// Drop into place from above.
    SlideDown,
    /// Move into place from the right.
    SlideLeft,
    /// Move into place from the left.
    SlideRight,
    /// Reveal characters proportionally to elapsed window time.
    Typewriter,
    /// Spring up from a smaller scale.
    #[serde(alias = "scale")]
    ScaleIn,
    /// Spring out of a blur.
    #[serde(alias = "blur")]
    BlurIn,
}

/// Optional typography.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// Font size in pixels.
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// CSS-like color string.
    #[serde(default = "default_color")]
    pub color: String,
    /// Numeric font weight.
    #[serde(default = "default_font_weight")]
    pub font_weight: u16,
    /// Optional backdrop pill color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

fn default_font_size() -> f64 {
    64.0
}

fn default_color() -> String {
    "#ffffff".to_string()
}

fn default_font_weight() -> u16 {
    700
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
            color: default_color(),
            font_weight: default_font_weight(),
            background: None,
        }
    }
}

/// Text drawn on top of a scene during a scene-local window.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOverlay {
    /// Full text.
    pub text: String,
    /// Placement anchor.
    #[serde(default)]
    pub position: Anchor,
    /// First visible scene-local frame.
    pub start_frame: i64,
    /// Last visible scene-local frame.
    pub end_frame: i64,
    /// Animation variant.
    #[serde(default)]
    pub animation: TextAnimation,
    /// Typography.
    #[serde(default)]
    pub style: TextStyle,
}

/// Resolved text draw call.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLayer {
    /// Text to draw this frame (may be a prefix while typing).
    pub text: String,
    /// Character count of the full overlay text.
    pub full_chars: usize,
    /// Anchor point in canvas pixels, before the layer transform.
    pub origin: Point,
    /// Alignment around the origin.
    pub align: TextAlign,
    /// Font size in pixels.
    pub font_size: f64,
    /// Font weight.
    pub font_weight: u16,
    /// Fill color.
    pub color: Rgba8,
    /// Backdrop color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Rgba8>,
}

/// Animated channels of an overlay at one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMotion {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Offset from the anchor, in pixels.
    pub offset: Vec2,
    /// Uniform scale about the anchor.
    pub scale: f64,
    /// Blur radius in pixels.
    pub blur_px: f64,
    /// Visible character count.
    pub visible_chars: usize,
}

impl TextOverlay {
    /// Overlay with default placement and style.
    pub fn new(
        text: impl Into<String>,
        start_frame: i64,
        end_frame: i64,
        animation: TextAnimation,
    ) -> Self {
        Self {
            text: text.into(),
            position: Anchor::default(),
            start_frame,
            end_frame,
            animation,
            style: TextStyle::default(),
        }
    }

    /// Clamped visibility window for a scene of `duration_frames`.
    pub fn window(&self, duration_frames: u64) -> Option<Window> {
        Window::resolve(self.start_frame, self.end_frame, duration_frames)
    }

    /// Animated channels at `ctx`, or `None` outside the visibility window.
    pub fn motion(&self, ctx: &FrameCtx) -> Option<TextMotion> {
        let window = self.window(ctx.duration_frames)?;
        let local = ctx.local_frame;
        if !window.contains(local) {
            return None;
        }

        let full_chars = self.text.chars().count();
        let fade = window.fade(local);
        let sprung = || spring(window.elapsed(local) as f64, ctx.fps_f64(), TEXT_SPRING);
        let slide = |dir: Vec2| {
            let p = window.enter(local, Ease::OutCubic);
            dir * (SLIDE_DISTANCE_PX * (1.0 - p))
        };

        let mut motion = TextMotion {
            opacity: fade,
            offset: Vec2::ZERO,
            scale: 1.0,
            blur_px: 0.0,
            visible_chars: full_chars,
        };
        match self.animation {
            TextAnimation::None => motion.opacity = 1.0,
            TextAnimation::FadeIn => {}
            TextAnimation::SlideUp => motion.offset = slide(Vec2::new(0.0, 1.0)),
            TextAnimation::SlideDown => motion.offset = slide(Vec2::new(0.0, -1.0)),
            TextAnimation::SlideLeft => motion.offset = slide(Vec2::new(1.0, 0.0)),
            TextAnimation::SlideRight => motion.offset = slide(Vec2::new(-1.0, 0.0)),
            TextAnimation::Typewriter => {
                motion.opacity = 1.0;
                let shown = (full_chars as f64 * window.fraction(local)).floor() as usize;
                motion.visible_chars = shown.min(full_chars);
            }
            TextAnimation::ScaleIn => {
                motion.scale = SCALE_FROM + (1.0 - SCALE_FROM) * sprung();
            }
            TextAnimation::BlurIn => {
                motion.blur_px = (BLUR_FROM_PX * (1.0 - sprung())).max(0.0);
            }
        }
        motion.opacity = motion.opacity.clamp(0.0, 1.0);
        Some(motion)
    }
}

/// A text overlay bound to its index within the scene.
pub struct TextOverlayLayer<'a> {
    /// Position in the scene's overlay list.
    pub index: usize,
    /// Overlay descriptor.
    pub overlay: &'a TextOverlay,
}

impl LayerSource for TextOverlayLayer<'_> {
    fn compute_layer(&self, ctx: &FrameCtx) -> Option<LayerState> {
        let overlay = self.overlay;
        let motion = overlay.motion(ctx)?;
        let origin = overlay.position.origin(ctx.canvas);
        let text: String = overlay.text.chars().take(motion.visible_chars).collect();

        let content = TextLayer {
            text,
            full_chars: overlay.text.chars().count(),
            origin,
            align: overlay.position.align(),
            font_size: if overlay.style.font_size.is_finite() && overlay.style.font_size > 0.0 {
                overlay.style.font_size
            } else {
                default_font_size()
            },
            font_weight: overlay.style.font_weight,
            color: Rgba8::parse_or(&overlay.style.color, Rgba8::WHITE),
            background: overlay
                .style
                .background
                .as_deref()
                .and_then(Rgba8::parse),
        };

        let mut layer =
            LayerState::new(format!("text:{}", self.index), LayerContent::Text(content));
        layer.opacity = motion.opacity;
        layer.blur_px = motion.blur_px;
        layer.transform = if motion.scale == 1.0 && motion.offset == Vec2::ZERO {
            Affine::IDENTITY
        } else {
            Transform2D::scale_about(motion.scale, origin, motion.offset).to_affine()
        };
        Some(layer)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/text.rs"]
mod tests;
