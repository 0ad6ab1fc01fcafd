/// Easing functions used to map normalized animation progress.
///
/// Descriptors name curves in camelCase (`"easeInOut"`); kebab-case (`"ease-in-out"`)
/// and `"identity"` are accepted as aliases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Ease {
    /// Identity mapping.
    #[default]
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in (`"easeIn"`).
    InCubic,
    /// Cubic ease-out (`"easeOut"`).
    OutCubic,
    /// Cubic ease-in/out (`"easeInOut"`).
    InOutCubic,
    /// Sinusoidal ease-in/out.
    InOutSine,
}

impl Ease {
    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InOutSine => -((std::f64::consts::PI * t).cos() - 1.0) / 2.0,
        }
    }

    /// Canonical descriptor name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::InQuad => "inQuad",
            Self::OutQuad => "outQuad",
            Self::InOutQuad => "inOutQuad",
            Self::InCubic => "easeIn",
            Self::OutCubic => "easeOut",
            Self::InOutCubic => "easeInOut",
            Self::InOutSine => "inOutSine",
        }
    }

    /// Look up a curve by descriptor name, ignoring case, `-` and `_`.
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Some(match key.as_str() {
            "linear" | "identity" | "none" => Self::Linear,
            "inquad" | "easeinquad" => Self::InQuad,
            "outquad" | "easeoutquad" => Self::OutQuad,
            "inoutquad" | "easeinoutquad" => Self::InOutQuad,
            "easein" | "in" | "incubic" | "easeincubic" => Self::InCubic,
            "easeout" | "out" | "outcubic" | "easeoutcubic" => Self::OutCubic,
            "easeinout" | "inout" | "inoutcubic" | "easeinoutcubic" => Self::InOutCubic,
            "inoutsine" | "easeinoutsine" | "sine" => Self::InOutSine,
            _ => return None,
        })
    }
}

impl serde::Serialize for Ease {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> serde::Deserialize<'de> for Ease {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ease::from_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown easing '{name}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
