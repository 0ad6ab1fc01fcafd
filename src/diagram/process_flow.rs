use crate::{
    animation::ease::Ease,
    diagram::{DiagramRenderer, Primitive, accent, fade_in, pop, progress, title_label},
    foundation::core::{Point, Rect, Rgba8, Vec2},
    layers::FrameCtx,
};

/// Frames between consecutive steps.
pub const STEP_STAGGER: u64 = 15;
/// Frames a step card takes to settle.
pub const CARD_IN_FRAMES: u64 = 15;
/// Frames a connector takes to fill.
pub const CONNECTOR_FRAMES: u64 = 12;

const RISE_PX: f64 = 40.0;
const CONNECTOR_COLOR: Rgba8 = Rgba8::rgb(0xd1, 0xd5, 0xdb);

/// Layout axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlowDirection {
    /// Left to right.
    #[default]
    Horizontal,
    /// Top to bottom.
    Vertical,
}

/// One step: a bare label or `{label, description}`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum FlowStep {
    /// Label only.
    Label(String),
    /// Label with secondary text.
    Detailed {
        /// Title.
        label: String,
        /// Secondary text.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

impl FlowStep {
    /// Step title.
    pub fn label(&self) -> &str {
        match self {
            Self::Label(l) | Self::Detailed { label: l, .. } => l,
        }
    }

    fn description(&self) -> Option<&str> {
        match self {
            Self::Label(_) => None,
            Self::Detailed { description, .. } => description.as_deref(),
        }
    }
}

/// Ordered steps joined by connectors.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProcessFlow {
    /// Steps in order.
    pub steps: Vec<FlowStep>,
    /// Layout axis.
    #[serde(default)]
    pub direction: FlowDirection,
    /// Heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ProcessFlow {
    fn card_rects(&self, w: f64, h: f64) -> Vec<Rect> {
        let n = self.steps.len().max(1) as f64;
        match self.direction {
            FlowDirection::Horizontal => {
                let gap = w * 0.04;
                let card_w = ((w * 0.84 - gap * (n - 1.0)) / n).min(w * 0.28);
                let card_h = h * 0.22;
                let total = card_w * n + gap * (n - 1.0);
                let x0 = (w - total) * 0.5;
                let y0 = (h - card_h) * 0.5;
                (0..self.steps.len())
                    .map(|i| {
                        let x = x0 + i as f64 * (card_w + gap);
                        Rect::new(x, y0, x + card_w, y0 + card_h)
                    })
                    .collect()
            }
            FlowDirection::Vertical => {
                let gap = h * 0.04;
                let top = h * 0.16;
                let card_h = ((h * 0.78 - gap * (n - 1.0)) / n).min(h * 0.18);
                let card_w = w * 0.4;
                let x0 = (w - card_w) * 0.5;
                (0..self.steps.len())
                    .map(|i| {
                        let y = top + i as f64 * (card_h + gap);
                        Rect::new(x0, y, x0 + card_w, y + card_h)
                    })
                    .collect()
            }
        }
    }
}

impl DiagramRenderer for ProcessFlow {
    const TYPE: &'static str = "process-flow";

    fn check(&self) -> Result<(), String> {
        if self.steps.is_empty() {
            return Err("process flow needs at least one step".to_string());
        }
        Ok(())
    }

    fn primitives(&self, ctx: &FrameCtx) -> Vec<Primitive> {
        let (w, h) = (ctx.canvas.w(), ctx.canvas.h());
        let local = ctx.local_f64();
        let rects = self.card_rects(w, h);
        let delay = |i: usize| (i as u64 * STEP_STAGGER) as f64;
        let mut out = Vec::new();
        out.extend(title_label(self.title.as_deref(), ctx));

        for (i, pair) in rects.windows(2).enumerate() {
            let (a, b) = (pair[0], pair[1]);
            let (from, to) = match self.direction {
                FlowDirection::Horizontal => (
                    Point::new(a.x1, a.center().y),
                    Point::new(b.x0, b.center().y),
                ),
                FlowDirection::Vertical => (
                    Point::new(a.center().x, a.y1),
                    Point::new(b.center().x, b.y0),
                ),
            };
            out.push(Primitive::Arrow {
                from,
                to,
                progress: progress(
                    local,
                    delay(i + 1) + CARD_IN_FRAMES as f64,
                    CONNECTOR_FRAMES,
                    Ease::OutCubic,
                ),
                color: CONNECTOR_COLOR,
                width: h * 0.006,
            });
        }

        for (i, (step, rect)) in self.steps.iter().zip(&rects).enumerate() {
            let rise = progress(local, delay(i), CARD_IN_FRAMES, Ease::OutCubic);
            out.push(Primitive::Card {
                rect: *rect,
                title: step.label().to_string(),
                subtitle: step.description().map(str::to_string),
                fill: accent(i),
                offset: Vec2::new(0.0, RISE_PX * (1.0 - rise)),
                scale: pop(ctx, delay(i)),
                opacity: fade_in(local, delay(i), CARD_IN_FRAMES),
            });
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagram/process_flow.rs"]
mod tests;
