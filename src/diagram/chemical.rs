use crate::{
    animation::ease::Ease,
    diagram::{
        DiagramRenderer, FADE_IN_FRAMES, Primitive, ReactionSide, fade_in, pop, progress,
        text_label, title_label,
    },
    foundation::core::{Point, Rgba8},
    foundation::math::Fnv1a64,
    layers::FrameCtx,
};

/// Frames between consecutive molecules.
pub const MOLECULE_STAGGER: u64 = 8;
/// Frames the reaction arrow takes to fill.
pub const ARROW_FRAMES: u64 = 30;
/// Copies drawn per species at most.
pub const MAX_COUNT: u32 = 12;

const ARROW_COLOR: Rgba8 = Rgba8::rgb(0xe5, 0xe7, 0xeb);

/// Species with multiplicity, e.g. `{"type": "CO2", "count": 6}`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Species {
    /// Chemical formula.
    #[serde(rename = "type", alias = "formula")]
    pub formula: String,
    /// Number of molecules.
    #[serde(default = "one")]
    pub count: u32,
}

fn one() -> u32 {
    1
}

/// Reactants turning into products across an arrow.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChemicalReaction {
    /// Left-hand side.
    #[serde(default)]
    pub reactants: Vec<Species>,
    /// Right-hand side.
    #[serde(default)]
    pub products: Vec<Species>,
    /// Label over the arrow (e.g. `"sunlight"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Display color of a formula; unknown formulas get a stable palette color.
pub fn formula_color(formula: &str) -> Rgba8 {
    match formula.trim() {
        "CO2" => Rgba8::rgb(0x6b, 0x72, 0x80),
        "O2" => Rgba8::rgb(0xef, 0x44, 0x44),
        "H2O" => Rgba8::rgb(0x3b, 0x82, 0xf6),
        "C6H12O6" => Rgba8::rgb(0xf5, 0x9e, 0x0b),
        "H2" => Rgba8::rgb(0xe5, 0xe7, 0xeb),
        "N2" => Rgba8::rgb(0x8b, 0x5c, 0xf6),
        "CH4" => Rgba8::rgb(0x10, 0xb9, 0x81),
        "NaCl" => Rgba8::rgb(0xec, 0x48, 0x99),
        "NH3" => Rgba8::rgb(0x06, 0xb6, 0xd4),
        "ATP" => Rgba8::rgb(0xea, 0xb3, 0x08),
        other => {
            let mut h = Fnv1a64::new_default();
            h.write_bytes(other.as_bytes());
            crate::diagram::accent((h.finish() % 6) as usize)
        }
    }
}

struct Timing {
    arrow_start: f64,
    arrow_end: f64,
}

impl ChemicalReaction {
    fn flatten(list: &[Species]) -> Vec<(usize, &str)> {
        list.iter()
            .enumerate()
            .flat_map(|(group, s)| {
                std::iter::repeat_n((group, s.formula.as_str()), s.count.min(MAX_COUNT) as usize)
            })
            .collect()
    }

    fn timing(&self) -> Timing {
        let reactants = Self::flatten(&self.reactants).len() as u64;
        // The arrow starts once the last reactant has faded in.
        let arrow_start = match reactants {
            0 => 0,
            n => (n - 1) * MOLECULE_STAGGER + FADE_IN_FRAMES,
        } as f64;
        Timing {
            arrow_start,
            arrow_end: arrow_start + ARROW_FRAMES as f64,
        }
    }

    /// First species whose count is cut down to [`MAX_COUNT`].
    pub fn capped(&self) -> Option<&Species> {
        self.reactants
            .iter()
            .chain(&self.products)
            .find(|s| s.count > MAX_COUNT)
    }

    /// Arrow fill fraction at scene-local `local`; monotonic from `0` to `1`.
    pub fn arrow_progress(&self, local: f64) -> f64 {
        let t = self.timing();
        progress(local, t.arrow_start, ARROW_FRAMES, Ease::InOutCubic)
    }
}

impl DiagramRenderer for ChemicalReaction {
    const TYPE: &'static str = "chemical-reaction";

    fn check(&self) -> Result<(), String> {
        if self.reactants.is_empty() && self.products.is_empty() {
            return Err("reaction needs reactants or products".to_string());
        }
        if let Some(s) = self
            .reactants
            .iter()
            .chain(&self.products)
            .find(|s| s.formula.trim().is_empty())
        {
            return Err(format!("species with empty formula (count {})", s.count));
        }
        Ok(())
    }

    fn primitives(&self, ctx: &FrameCtx) -> Vec<Primitive> {
        let (w, h) = (ctx.canvas.w(), ctx.canvas.h());
        let local = ctx.local_f64();
        let cy = h * 0.5;
        let timing = self.timing();
        let mut out = Vec::new();
        out.extend(title_label(self.title.as_deref(), ctx));

        let mut place = |list: &[Species], side: ReactionSide, x0: f64, x1: f64, first: f64| {
            let molecules = Self::flatten(list);
            let n = molecules.len().max(1) as f64;
            let spacing = (x1 - x0) / n;
            let radius = (spacing * 0.4).min(h * 0.09);
            for (i, &(group, formula)) in molecules.iter().enumerate() {
                let delay = first + (i as u64 * MOLECULE_STAGGER) as f64;
                let cx = x0 + spacing * (i as f64 + 0.5);
                if i > 0 && molecules[i - 1].0 != group {
                    out.push(text_label(
                        "+",
                        Point::new(cx - spacing * 0.5, cy),
                        h * 0.05,
                        fade_in(local, delay, FADE_IN_FRAMES),
                    ));
                }
                out.push(Primitive::Molecule {
                    formula: formula.to_string(),
                    side,
                    center: Point::new(cx, cy),
                    radius,
                    fill: formula_color(formula),
                    scale: pop(ctx, delay),
                    opacity: fade_in(local, delay, FADE_IN_FRAMES),
                });
            }
        };
        place(&self.reactants, ReactionSide::Reactant, w * 0.06, w * 0.40, 0.0);
        place(
            &self.products,
            ReactionSide::Product,
            w * 0.60,
            w * 0.94,
            timing.arrow_end,
        );

        let fill = self.arrow_progress(local);
        out.push(Primitive::Arrow {
            from: Point::new(w * 0.43, cy),
            to: Point::new(w * 0.57, cy),
            progress: fill,
            color: ARROW_COLOR,
            width: h * 0.008,
        });
        if let Some(condition) = self.condition.as_deref().filter(|c| !c.trim().is_empty()) {
            out.push(text_label(
                condition,
                Point::new(w * 0.5, cy - h * 0.08),
                h * 0.035,
                fade_in(local, timing.arrow_start, ARROW_FRAMES / 2),
            ));
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagram/chemical.rs"]
mod tests;
