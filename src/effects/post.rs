use crate::{
    animation::ease::Ease,
    animation::interpolate::interpolate_clamped,
    foundation::core::FrameIndex,
    foundation::math::{Fnv1a64, clamp01},
    layers::{FrameCtx, LayerContent, LayerSource, LayerState},
};

/// Frames over which letterbox bars ease in from the scene start.
pub const LETTERBOX_IN_FRAMES: u64 = 20;

/// Scene-wide post effects.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectsSpec {
    /// Darkened edges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vignette: Option<VignetteSpec>,
    /// Color filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_grade: Option<ColorGradeSpec>,
    /// Film grain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grain: Option<GrainSpec>,
    /// Cinematic bars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letterbox: Option<LetterboxSpec>,
}

/// Vignette strength.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VignetteSpec {
    /// Strength in `[0, 1]`.
    #[serde(default = "default_vignette")]
    pub intensity: f64,
}

fn default_vignette() -> f64 {
    0.4
}

/// Named color grade looks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GradePreset {
    /// Neutral.
    #[default]
    None,
    /// Slightly warm and saturated.
    Warm,
    /// Desaturated blue lean.
    Cool,
    /// Faded sepia.
    Vintage,
    /// High contrast, low saturation.
    Dramatic,
}

/// Color grade: preset plus optional explicit overrides.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorGradeSpec {
    /// Base look.
    #[serde(default)]
    pub preset: GradePreset,
    /// Brightness multiplier override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f64>,
    /// Contrast multiplier override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contrast: Option<f64>,
    /// Saturation multiplier override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturation: Option<f64>,
    /// Sepia amount override in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sepia: Option<f64>,
    /// Hue rotation override in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hue_rotate_deg: Option<f64>,
}

/// Grain strength.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GrainSpec {
    /// Strength in `[0, 1]`.
    #[serde(default = "default_grain")]
    pub intensity: f64,
}

fn default_grain() -> f64 {
    0.08
}

/// Letterbox bar size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterboxSpec {
    /// Height of each bar as a percentage of the canvas height.
    #[serde(default = "default_letterbox")]
    pub size: f64,
}

fn default_letterbox() -> f64 {
    10.0
}

/// Resolved CSS-style color filter.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorFilter {
    /// Brightness multiplier.
    pub brightness: f64,
    /// Contrast multiplier.
    pub contrast: f64,
    /// Saturation multiplier.
    pub saturation: f64,
    /// Sepia amount.
    pub sepia: f64,
    /// Hue rotation in degrees.
    pub hue_rotate_deg: f64,
}

impl ColorFilter {
    /// Filter that leaves colors unchanged.
    pub const NEUTRAL: Self = Self {
        brightness: 1.0,
        contrast: 1.0,
        saturation: 1.0,
        sepia: 0.0,
        hue_rotate_deg: 0.0,
    };
}

impl GradePreset {
    /// Filter values for the preset.
    pub fn filter(self) -> ColorFilter {
        let n = ColorFilter::NEUTRAL;
        match self {
            Self::None => n,
            Self::Warm => ColorFilter {
                brightness: 1.05,
                saturation: 1.15,
                sepia: 0.15,
                ..n
            },
            Self::Cool => ColorFilter {
                saturation: 0.9,
                hue_rotate_deg: 10.0,
                ..n
            },
            Self::Vintage => ColorFilter {
                contrast: 0.9,
                saturation: 0.8,
                sepia: 0.35,
                ..n
            },
            Self::Dramatic => ColorFilter {
                brightness: 0.95,
                contrast: 1.3,
                saturation: 0.85,
                ..n
            },
        }
    }
}

impl ColorGradeSpec {
    /// Preset filter with explicit overrides applied; non-finite overrides are ignored.
    pub fn resolve(&self) -> ColorFilter {
        let base = self.preset.filter();
        let pick = |o: Option<f64>, d: f64| o.filter(|v| v.is_finite()).unwrap_or(d);
        ColorFilter {
            brightness: pick(self.brightness, base.brightness).max(0.0),
            contrast: pick(self.contrast, base.contrast).max(0.0),
            saturation: pick(self.saturation, base.saturation).max(0.0),
            sepia: clamp01(pick(self.sepia, base.sepia)),
            hue_rotate_deg: pick(self.hue_rotate_deg, base.hue_rotate_deg),
        }
    }
}

/// Per-frame grain parameters; the seed changes every global frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrainState {
    /// Strength in `[0, 1]`.
    pub intensity: f64,
    /// Noise seed for this frame.
    pub seed: u64,
}

/// Resolved post effects for one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectsLayer {
    /// Vignette strength.
    pub vignette: Option<f64>,
    /// Color filter.
    pub filter: Option<ColorFilter>,
    /// Grain parameters.
    pub grain: Option<GrainState>,
    /// Height of each letterbox bar in pixels.
    pub letterbox_px: Option<f64>,
}

/// Deterministic grain seed for a global frame.
pub fn grain_seed(frame: FrameIndex) -> u64 {
    let mut h = Fnv1a64::new_default();
    h.write_bytes(b"grain");
    h.write_u64(frame.0);
    h.finish()
}

impl EffectsSpec {
    /// `true` when no effect is configured.
    pub fn is_empty(&self) -> bool {
        self.vignette.is_none()
            && self.color_grade.is_none()
            && self.grain.is_none()
            && self.letterbox.is_none()
    }

    /// Resolve every configured effect for `ctx`.
    pub fn resolve(&self, ctx: &FrameCtx) -> EffectsLayer {
        let letterbox_px = self.letterbox.map(|l| {
            let full = ctx.canvas.pct_y(l.size.clamp(0.0, 50.0));
            let ramp = interpolate_clamped(
                ctx.local_f64(),
                (0.0, LETTERBOX_IN_FRAMES as f64),
                (0.0, 1.0),
                Ease::OutCubic,
            );
            if full.is_finite() { full * ramp } else { 0.0 }
        });
        EffectsLayer {
            vignette: self.vignette.map(|v| clamp01(v.intensity)),
            filter: self.color_grade.map(|g| g.resolve()),
            grain: self.grain.map(|g| GrainState {
                intensity: clamp01(g.intensity),
                seed: grain_seed(ctx.frame),
            }),
            letterbox_px,
        }
    }
}

impl LayerSource for EffectsSpec {
    fn compute_layer(&self, ctx: &FrameCtx) -> Option<LayerState> {
        if self.is_empty() {
            return None;
        }
        Some(LayerState::new(
            "effects",
            LayerContent::Effects(self.resolve(ctx)),
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/post.rs"]
mod tests;
