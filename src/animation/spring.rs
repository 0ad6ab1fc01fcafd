use crate::foundation::math::lerp;

/// Damped harmonic oscillator parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpringConfig {
    /// Damping coefficient (`>= 0`).
    #[serde(default = "default_damping")]
    pub damping: f64,
    /// Spring stiffness (`> 0`).
    #[serde(default = "default_stiffness")]
    pub stiffness: f64,
    /// Oscillator mass (`> 0`).
    #[serde(default = "default_mass")]
    pub mass: f64,
    /// Never report a value above the target.
    #[serde(default)]
    pub overshoot_clamping: bool,
}

fn default_damping() -> f64 {
    10.0
}

fn default_stiffness() -> f64 {
    100.0
}

fn default_mass() -> f64 {
    1.0
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            stiffness: default_stiffness(),
            mass: default_mass(),
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    /// Config with the given physical parameters and no overshoot clamping.
    pub const fn new(damping: f64, stiffness: f64, mass: f64) -> Self {
        Self {
            damping,
            stiffness,
            mass,
            overshoot_clamping: false,
        }
    }

    /// Replace out-of-domain parameters with their defaults.
    pub fn sanitized(self) -> Self {
        Self {
            damping: if self.damping.is_finite() && self.damping >= 0.0 {
                self.damping
            } else {
                default_damping()
            },
            stiffness: if self.stiffness.is_finite() && self.stiffness > 0.0 {
                self.stiffness
            } else {
                default_stiffness()
            },
            mass: if self.mass.is_finite() && self.mass > 0.0 {
                self.mass
            } else {
                default_mass()
            },
            overshoot_clamping: self.overshoot_clamping,
        }
    }
}

const CRITICAL_EPS: f64 = 1e-9;

/// Position of a damped spring released from rest at `0` toward `1`, evaluated
/// `frame / fps` seconds after release.
///
/// Closed form, so any frame can be sampled independently. Frames at or before
/// release yield `0`; a non-positive or non-finite `fps` yields the settled value.
pub fn spring(frame: f64, fps: f64, config: SpringConfig) -> f64 {
    if frame.is_nan() || frame <= 0.0 {
        return 0.0;
    }
    if !fps.is_finite() || fps <= 0.0 || frame.is_infinite() {
        return 1.0;
    }

    let cfg = config.sanitized();
    let t = frame / fps;
    let omega0 = (cfg.stiffness / cfg.mass).sqrt();
    let zeta = cfg.damping / (2.0 * (cfg.stiffness * cfg.mass).sqrt());

    let x = if zeta < 1.0 - CRITICAL_EPS {
        let omega_d = omega0 * (1.0 - zeta * zeta).sqrt();
        let envelope = (-zeta * omega0 * t).exp();
        1.0 - envelope * ((omega_d * t).cos() + (zeta * omega0 / omega_d) * (omega_d * t).sin())
    } else if zeta <= 1.0 + CRITICAL_EPS {
        1.0 - (-omega0 * t).exp() * (1.0 + omega0 * t)
    } else {
        let s = (zeta * zeta - 1.0).sqrt();
        let r1 = -omega0 * (zeta - s);
        let r2 = -omega0 * (zeta + s);
        1.0 - (r2 * (r1 * t).exp() - r1 * (r2 * t).exp()) / (r2 - r1)
    };

    let x = if x.is_finite() { x } else { 1.0 };
    if cfg.overshoot_clamping { x.min(1.0) } else { x }
}

/// [`spring`] remapped onto `[from, to]`.
pub fn spring_between(frame: f64, fps: f64, config: SpringConfig, from: f64, to: f64) -> f64 {
    lerp(from, to, spring(frame, fps, config))
}

/// [`spring`] released `delay` frames late.
pub fn spring_delayed(frame: f64, delay: f64, fps: f64, config: SpringConfig) -> f64 {
    spring(frame - delay, fps, config)
}

/// First frame after which the spring stays within `threshold` of its target.
///
/// Springs that never settle (no damping) report the search horizon of ten minutes.
pub fn measure_spring(fps: f64, config: SpringConfig, threshold: f64) -> u64 {
    let fps = if fps.is_finite() && fps > 0.0 { fps } else { 30.0 };
    let threshold = if threshold.is_finite() && threshold > 0.0 {
        threshold
    } else {
        0.005
    };
    let horizon = (fps * 600.0).ceil() as u64;

    let mut settled_from = 0u64;
    for f in 0..=horizon {
        if (1.0 - spring(f as f64, fps, config)).abs() >= threshold {
            settled_from = f + 1;
        }
    }
    settled_from.min(horizon)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
