use crate::{
    animation::ease::Ease,
    diagram::{
        DiagramRenderer, FADE_IN_FRAMES, Primitive, accent, fade_in, pop, progress, text_label,
        title_label,
    },
    foundation::core::{Point, Rect, Rgba8, Vec2},
    layers::FrameCtx,
};

/// Frames the columns take to slide in.
pub const COLUMN_IN_FRAMES: u64 = 20;
/// Frames between consecutive items of a column.
pub const ITEM_STAGGER: u64 = 8;

const BADGE_DELAY: f64 = 10.0;
const BADGE_FILL: Rgba8 = Rgba8::rgb(0x11, 0x18, 0x27);

/// One side of a comparison.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Column {
    /// Heading.
    pub title: String,
    /// Bullet items.
    #[serde(default)]
    pub items: Vec<String>,
    /// Header color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Two columns side by side with a "VS" badge.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Comparison {
    /// Left column.
    pub left: Column,
    /// Right column.
    pub right: Column,
    /// Heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl DiagramRenderer for Comparison {
    const TYPE: &'static str = "comparison";

    fn primitives(&self, ctx: &FrameCtx) -> Vec<Primitive> {
        let (w, h) = (ctx.canvas.w(), ctx.canvas.h());
        let local = ctx.local_f64();
        let slide = progress(local, 0.0, COLUMN_IN_FRAMES, Ease::OutCubic);
        let mut out = Vec::new();
        out.extend(title_label(self.title.as_deref(), ctx));

        let (top, bottom) = (h * 0.16, h * 0.86);
        for (index, column, x0, x1, sign) in [
            (0, &self.left, w * 0.06, w * 0.44, -1.0),
            (1, &self.right, w * 0.56, w * 0.94, 1.0),
        ] {
            let header = Rect::new(x0, top, x1, top + h * 0.12);
            let offset = Vec2::new(sign * (1.0 - slide) * w * 0.5, 0.0);
            out.push(Primitive::Card {
                rect: header,
                title: column.title.clone(),
                subtitle: None,
                fill: column
                    .color
                    .as_deref()
                    .and_then(Rgba8::parse)
                    .unwrap_or(accent(index)),
                offset,
                scale: 1.0,
                opacity: slide,
            });

            let n = column.items.len().max(1) as f64;
            let line_h = (h * 0.09).min((bottom - header.y1) / n);
            for (k, item) in column.items.iter().enumerate() {
                let delay = (COLUMN_IN_FRAMES + k as u64 * ITEM_STAGGER) as f64;
                let y = header.y1 + line_h * (k as f64 + 0.5);
                out.push(text_label(
                    item,
                    Point::new((x0 + x1) * 0.5, y),
                    (line_h * 0.45).min(h * 0.04),
                    fade_in(local, delay, FADE_IN_FRAMES),
                ));
            }
        }

        let center = Point::new(w * 0.5, h * 0.5);
        out.push(Primitive::Marker {
            center,
            radius: w.min(h) * 0.06,
            fill: BADGE_FILL,
            scale: pop(ctx, BADGE_DELAY),
            opacity: fade_in(local, BADGE_DELAY, FADE_IN_FRAMES),
        });
        out.push(text_label(
            "VS",
            center,
            h * 0.045,
            fade_in(local, BADGE_DELAY, FADE_IN_FRAMES),
        ));
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagram/comparison.rs"]
mod tests;
