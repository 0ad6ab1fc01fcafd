use crate::animation::ease::Ease;
use crate::foundation::math::{finite_or, lerp};

/// What happens when the input falls outside the input range on one side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Extrapolate {
    /// Hold the nearest output bound.
    #[default]
    Clamp,
    /// Continue the boundary segment linearly.
    Extend,
    /// Return the input unchanged.
    Identity,
}

/// Options for [`interpolate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InterpolateOpts {
    /// Curve applied to each segment's local fraction.
    pub ease: Ease,
    /// Policy below the first input point.
    pub left: Extrapolate,
    /// Policy above the last input point.
    pub right: Extrapolate,
}

impl InterpolateOpts {
    /// Clamp on both sides, linear curve.
    pub fn clamped() -> Self {
        Self::default()
    }

    /// Extend on both sides, linear curve.
    pub fn extended() -> Self {
        Self {
            ease: Ease::Linear,
            left: Extrapolate::Extend,
            right: Extrapolate::Extend,
        }
    }

    /// Same options with a different curve.
    pub fn with_ease(self, ease: Ease) -> Self {
        Self { ease, ..self }
    }
}

/// Map `input` from `input_range` onto `output_range`.
///
/// Ranges may hold more than two points, in which case the input is mapped on the
/// segment that contains it. The function is total: ranges that are empty, of
/// mismatched length, not strictly increasing, or non-finite degenerate to the
/// nearest output bound (the first output when `input` lies below the first input
/// point, the last output otherwise), and non-finite results collapse to `0.0`.
///
/// Easing only shapes fractions inside a segment; extrapolated values follow the
/// boundary segment linearly.
pub fn interpolate(
    input: f64,
    input_range: &[f64],
    output_range: &[f64],
    opts: InterpolateOpts,
) -> f64 {
    let (Some(&out_first), Some(&out_last)) = (output_range.first(), output_range.last()) else {
        return 0.0;
    };
    if !is_well_formed(input_range, output_range) {
        let below = match input_range.first() {
            Some(&first) => input.is_nan() || input < first,
            None => true,
        };
        return finite_or(if below { out_first } else { out_last }, 0.0);
    }
    if input.is_nan() {
        return finite_or(out_first, 0.0);
    }

    let last = input_range.len() - 1;
    let seg = if input < input_range[0] {
        0
    } else if input >= input_range[last] {
        last - 1
    } else {
        // First segment whose right edge lies past the input.
        input_range
            .windows(2)
            .position(|w| input < w[1])
            .unwrap_or(last - 1)
    };

    let (in_a, in_b) = (input_range[seg], input_range[seg + 1]);
    let (out_a, out_b) = (output_range[seg], output_range[seg + 1]);
    let t = (input - in_a) / (in_b - in_a);

    let mapped = if t < 0.0 {
        match opts.left {
            Extrapolate::Clamp => out_a,
            Extrapolate::Extend => lerp(out_a, out_b, t),
            Extrapolate::Identity => input,
        }
    } else if t > 1.0 {
        match opts.right {
            Extrapolate::Clamp => out_b,
            Extrapolate::Extend => lerp(out_a, out_b, t),
            Extrapolate::Identity => input,
        }
    } else {
        lerp(out_a, out_b, opts.ease.apply(t))
    };
    finite_or(mapped, 0.0)
}

/// [`interpolate`] over a single `[a, b] -> [x, y]` segment with clamping.
pub fn interpolate_clamped(input: f64, (a, b): (f64, f64), (x, y): (f64, f64), ease: Ease) -> f64 {
    interpolate(input, &[a, b], &[x, y], InterpolateOpts::clamped().with_ease(ease))
}

fn is_well_formed(input_range: &[f64], output_range: &[f64]) -> bool {
    input_range.len() >= 2
        && input_range.len() == output_range.len()
        && input_range.iter().all(|v| v.is_finite())
        && input_range.windows(2).all(|w| w[0] < w[1])
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolate.rs"]
mod tests;
