use crate::{
    animation::ease::Ease,
    diagram::{
        DiagramRenderer, FADE_IN_FRAMES, Primitive, accent, fade_in, pop, progress, text_label,
        title_label,
    },
    foundation::core::{Point, Rgba8},
    layers::FrameCtx,
};

/// Frames the axis takes to draw.
pub const AXIS_FRAMES: u64 = 30;
/// Frames between consecutive markers.
pub const MARKER_STAGGER: u64 = 12;

const AXIS_COLOR: Rgba8 = Rgba8::rgb(0xd1, 0xd5, 0xdb);

/// Event on the axis.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineEvent {
    /// What happened.
    pub label: String,
    /// When, as display text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Events spread along a horizontal axis.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineDiagram {
    /// Events in display order.
    pub events: Vec<TimelineEvent>,
    /// Heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl TimelineDiagram {
    /// Scene-local frame at which marker `index` is released.
    pub fn marker_delay(index: usize) -> u64 {
        AXIS_FRAMES + index as u64 * MARKER_STAGGER
    }
}

impl DiagramRenderer for TimelineDiagram {
    const TYPE: &'static str = "timeline";

    fn check(&self) -> Result<(), String> {
        if self.events.is_empty() {
            return Err("timeline needs at least one event".to_string());
        }
        Ok(())
    }

    fn primitives(&self, ctx: &FrameCtx) -> Vec<Primitive> {
        let (w, h) = (ctx.canvas.w(), ctx.canvas.h());
        let local = ctx.local_f64();
        let cy = h * 0.55;
        let (x0, x1) = (w * 0.08, w * 0.92);
        let mut out = Vec::new();
        out.extend(title_label(self.title.as_deref(), ctx));

        out.push(Primitive::Line {
            from: Point::new(x0, cy),
            to: Point::new(x1, cy),
            progress: progress(local, 0.0, AXIS_FRAMES, Ease::OutCubic),
            color: AXIS_COLOR,
            width: h * 0.006,
        });

        let n = self.events.len() as f64;
        for (i, event) in self.events.iter().enumerate() {
            let delay = Self::marker_delay(i) as f64;
            let x = x0 + (x1 - x0) * (i as f64 + 0.5) / n;
            let opacity = fade_in(local, delay, FADE_IN_FRAMES);
            // Labels alternate above and below the axis.
            let dir = if i % 2 == 0 { -1.0 } else { 1.0 };
            out.push(Primitive::Marker {
                center: Point::new(x, cy),
                radius: h * 0.018,
                fill: accent(i),
                scale: pop(ctx, delay),
                opacity,
            });
            out.push(text_label(
                &event.label,
                Point::new(x, cy + dir * h * 0.1),
                h * 0.032,
                opacity,
            ));
            if let Some(date) = event.date.as_deref() {
                out.push(text_label(
                    date,
                    Point::new(x, cy - dir * h * 0.06),
                    h * 0.026,
                    opacity,
                ));
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagram/timeline.rs"]
mod tests;
