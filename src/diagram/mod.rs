//! Parametric diagrams drawn from typed payloads.
//!
//! A [`DiagramConfig`] is parsed from a descriptor object keyed by `"type"`. Unknown
//! types and known types with unusable payloads are kept (with the raw JSON) and render
//! as a visible placeholder naming the type, so authoring mistakes show up in preview.

pub(crate) mod chemical;
pub(crate) mod comparison;
pub(crate) mod process_flow;
pub(crate) mod timeline;

use serde_json::Value;

use crate::{
    animation::ease::Ease,
    animation::interpolate::interpolate_clamped,
    animation::spring::{SpringConfig, spring_delayed},
    diagram::{
        chemical::{ChemicalReaction, MAX_COUNT},
        comparison::Comparison,
        process_flow::ProcessFlow,
        timeline::TimelineDiagram,
    },
    eval::diagnostic::DiagnosticKind,
    foundation::core::{Canvas, Point, Rect, Rgba8, Vec2},
    layers::FrameCtx,
};

/// Spring used for element pop-ins.
pub const POP_SPRING: SpringConfig = SpringConfig::new(12.0, 110.0, 1.0);
/// Frames an element takes to fade in.
pub const FADE_IN_FRAMES: u64 = 10;

const TEXT: Rgba8 = Rgba8::WHITE;
const PALETTE: [Rgba8; 6] = [
    Rgba8::rgb(0x3b, 0x82, 0xf6),
    Rgba8::rgb(0x10, 0xb9, 0x81),
    Rgba8::rgb(0xf5, 0x9e, 0x0b),
    Rgba8::rgb(0xef, 0x44, 0x44),
    Rgba8::rgb(0x8b, 0x5c, 0xf6),
    Rgba8::rgb(0x06, 0xb6, 0xd4),
];

/// Diagram payload, discriminated by `type`.
#[derive(Clone, Debug, PartialEq)]
pub enum DiagramConfig {
    /// `chemical-reaction`.
    ChemicalReaction(ChemicalReaction),
    /// `process-flow`.
    ProcessFlow(ProcessFlow),
    /// `comparison`.
    Comparison(Comparison),
    /// `timeline`.
    Timeline(TimelineDiagram),
    /// Type the library does not draw.
    Unsupported {
        /// `type` as written (empty when absent).
        diagram_type: String,
        /// Original payload.
        raw: Value,
    },
    /// Known type whose payload could not be used.
    Malformed {
        /// `type` as written.
        diagram_type: String,
        /// Why the payload was rejected.
        reason: String,
        /// Original payload.
        raw: Value,
    },
}

/// Primitives of a diagram at one frame, in draw order.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramLayer {
    /// Canonical (or as-written, for placeholders) diagram type.
    pub diagram_type: String,
    /// Back-to-front primitives.
    pub primitives: Vec<Primitive>,
}

/// Which side of a reaction a molecule belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ReactionSide {
    /// Left of the arrow.
    Reactant,
    /// Right of the arrow.
    Product,
}

/// Geometric building block of a diagram, in canvas pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Primitive {
    /// Labeled ball for a chemical species.
    #[serde(rename_all = "camelCase")]
    Molecule {
        /// Formula drawn inside.
        formula: String,
        /// Reaction side.
        side: ReactionSide,
        /// Center.
        center: Point,
        /// Radius at full scale.
        radius: f64,
        /// Fill.
        fill: Rgba8,
        /// Entrance scale.
        scale: f64,
        /// Opacity.
        opacity: f64,
    },
    /// Rounded box with a title.
    #[serde(rename_all = "camelCase")]
    Card {
        /// Bounds at rest.
        rect: Rect,
        /// Title text.
        title: String,
        /// Secondary text.
        #[serde(skip_serializing_if = "Option::is_none")]
        subtitle: Option<String>,
        /// Fill.
        fill: Rgba8,
        /// Entrance offset from the rest position.
        offset: Vec2,
        /// Entrance scale about the card center.
        scale: f64,
        /// Opacity.
        opacity: f64,
    },
    /// Arrow drawn from `from` toward `to` up to `progress`.
    #[serde(rename_all = "camelCase")]
    Arrow {
        /// Tail.
        from: Point,
        /// Head.
        to: Point,
        /// Drawn fraction in `[0, 1]`.
        progress: f64,
        /// Stroke color.
        color: Rgba8,
        /// Stroke width.
        width: f64,
    },
    /// Plain segment drawn up to `progress`.
    #[serde(rename_all = "camelCase")]
    Line {
        /// Start.
        from: Point,
        /// End.
        to: Point,
        /// Drawn fraction in `[0, 1]`.
        progress: f64,
        /// Stroke color.
        color: Rgba8,
        /// Stroke width.
        width: f64,
    },
    /// Dot on an axis.
    #[serde(rename_all = "camelCase")]
    Marker {
        /// Center.
        center: Point,
        /// Radius at full scale.
        radius: f64,
        /// Fill.
        fill: Rgba8,
        /// Entrance scale.
        scale: f64,
        /// Opacity.
        opacity: f64,
    },
    /// Centered text.
    #[serde(rename_all = "camelCase")]
    Label {
        /// Text.
        text: String,
        /// Center of the text box.
        position: Point,
        /// Font size in pixels.
        font_size: f64,
        /// Color.
        color: Rgba8,
        /// Opacity.
        opacity: f64,
    },
    /// Diagnostic box shown instead of an unusable diagram.
    #[serde(rename_all = "camelCase")]
    Placeholder {
        /// Message naming the diagram type.
        message: String,
        /// Bounds.
        rect: Rect,
    },
}

/// Typed diagram payload that can draw itself.
pub trait DiagramRenderer {
    /// Canonical `type` string.
    const TYPE: &'static str;

    /// Semantic checks beyond what deserialization enforces.
    fn check(&self) -> Result<(), String> {
        Ok(())
    }

    /// Primitives at `ctx`, back to front.
    fn primitives(&self, ctx: &FrameCtx) -> Vec<Primitive>;
}

impl DiagramConfig {
    /// Classify a raw descriptor object.
    pub fn from_value(raw: Value) -> Self {
        let Some(diagram_type) = raw.get("type").and_then(Value::as_str).map(str::to_string)
        else {
            return Self::Unsupported {
                diagram_type: String::new(),
                raw,
            };
        };
        let key: String = diagram_type
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "chemicalreaction" | "reaction" => typed(diagram_type, raw, Self::ChemicalReaction),
            "processflow" | "process" | "flow" => typed(diagram_type, raw, Self::ProcessFlow),
            "comparison" | "compare" | "versus" => typed(diagram_type, raw, Self::Comparison),
            "timeline" => typed(diagram_type, raw, Self::Timeline),
            _ => Self::Unsupported { diagram_type, raw },
        }
    }

    /// `type` string: canonical for drawable diagrams, as written otherwise.
    pub fn type_name(&self) -> &str {
        match self {
            Self::ChemicalReaction(_) => ChemicalReaction::TYPE,
            Self::ProcessFlow(_) => ProcessFlow::TYPE,
            Self::Comparison(_) => Comparison::TYPE,
            Self::Timeline(_) => TimelineDiagram::TYPE,
            Self::Unsupported { diagram_type, .. } | Self::Malformed { diagram_type, .. } => {
                diagram_type
            }
        }
    }

    /// Diagnostic for placeholder diagrams and for payloads drawn only in part.
    pub fn problem(&self) -> Option<(DiagnosticKind, String)> {
        match self {
            Self::ChemicalReaction(d) => d.capped().map(|s| {
                (
                    DiagnosticKind::MalformedDiagram,
                    format!(
                        "\"{}\" count {} exceeds {MAX_COUNT}; drawing {MAX_COUNT}",
                        s.formula, s.count
                    ),
                )
            }),
            Self::Unsupported { diagram_type, .. } => Some((
                DiagnosticKind::UnsupportedDiagram,
                format!("unsupported diagram type \"{diagram_type}\""),
            )),
            Self::Malformed {
                diagram_type,
                reason,
                ..
            } => Some((
                DiagnosticKind::MalformedDiagram,
                format!("invalid \"{diagram_type}\" diagram: {reason}"),
            )),
            _ => None,
        }
    }

    /// Draw the diagram at `ctx`.
    pub fn render(&self, ctx: &FrameCtx) -> DiagramLayer {
        let primitives = match self {
            Self::ChemicalReaction(d) => d.primitives(ctx),
            Self::ProcessFlow(d) => d.primitives(ctx),
            Self::Comparison(d) => d.primitives(ctx),
            Self::Timeline(d) => d.primitives(ctx),
            Self::Unsupported { diagram_type, .. } => vec![placeholder(
                format!("Unsupported diagram type \"{diagram_type}\""),
                ctx.canvas,
            )],
            Self::Malformed {
                diagram_type,
                reason,
                ..
            } => vec![placeholder(
                format!("Invalid \"{diagram_type}\" diagram: {reason}"),
                ctx.canvas,
            )],
        };
        DiagramLayer {
            diagram_type: self.type_name().to_string(),
            primitives,
        }
    }
}

fn typed<T>(diagram_type: String, raw: Value, wrap: fn(T) -> DiagramConfig) -> DiagramConfig
where
    T: DiagramRenderer + serde::de::DeserializeOwned,
{
    let parsed = serde_json::from_value::<T>(raw.clone())
        .map_err(|e| e.to_string())
        .and_then(|p| p.check().map(|()| p));
    match parsed {
        Ok(p) => wrap(p),
        Err(reason) => DiagramConfig::Malformed {
            diagram_type,
            reason,
            raw,
        },
    }
}

fn with_type<T: serde::Serialize>(diagram_type: &str, payload: &T) -> serde_json::Result<Value> {
    let mut value = serde_json::to_value(payload)?;
    if let Value::Object(map) = &mut value {
        map.insert("type".to_string(), Value::String(diagram_type.to_string()));
    }
    Ok(value)
}

impl serde::Serialize for DiagramConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let value = match self {
            Self::ChemicalReaction(p) => with_type(ChemicalReaction::TYPE, p),
            Self::ProcessFlow(p) => with_type(ProcessFlow::TYPE, p),
            Self::Comparison(p) => with_type(Comparison::TYPE, p),
            Self::Timeline(p) => with_type(TimelineDiagram::TYPE, p),
            Self::Unsupported { raw, .. } | Self::Malformed { raw, .. } => {
                return raw.serialize(serializer);
            }
        }
        .map_err(serde::ser::Error::custom)?;
        value.serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for DiagramConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

fn placeholder(message: String, canvas: Canvas) -> Primitive {
    let inset_x = canvas.pct_x(10.0);
    let inset_y = canvas.pct_y(10.0);
    Primitive::Placeholder {
        message,
        rect: Rect::new(inset_x, inset_y, canvas.w() - inset_x, canvas.h() - inset_y),
    }
}

/// Linear fade from `0` at `delay` to `1` after `frames`.
pub(crate) fn fade_in(local: f64, delay: f64, frames: u64) -> f64 {
    interpolate_clamped(local, (delay, delay + frames as f64), (0.0, 1.0), Ease::Linear)
}

/// Eased progress from `0` at `start` to `1` after `frames`.
pub(crate) fn progress(local: f64, start: f64, frames: u64, ease: Ease) -> f64 {
    interpolate_clamped(local, (start, start + frames as f64), (0.0, 1.0), ease)
}

/// Spring pop-in released at `delay`.
pub(crate) fn pop(ctx: &FrameCtx, delay: f64) -> f64 {
    spring_delayed(ctx.local_f64(), delay, ctx.fps_f64(), POP_SPRING)
}

/// Cycled accent color for element `index`.
pub(crate) fn accent(index: usize) -> Rgba8 {
    PALETTE[index % PALETTE.len()]
}

/// Optional diagram title, fading in at the start.
pub(crate) fn title_label(title: Option<&str>, ctx: &FrameCtx) -> Option<Primitive> {
    let title = title.filter(|t| !t.trim().is_empty())?;
    Some(Primitive::Label {
        text: title.to_string(),
        position: Point::new(ctx.canvas.w() * 0.5, ctx.canvas.pct_y(9.0)),
        font_size: ctx.canvas.h() * 0.055,
        color: TEXT,
        opacity: fade_in(ctx.local_f64(), 0.0, 15),
    })
}

/// Body text label.
pub(crate) fn text_label(text: &str, position: Point, font_size: f64, opacity: f64) -> Primitive {
    Primitive::Label {
        text: text.to_string(),
        position,
        font_size,
        color: TEXT,
        opacity,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagram/mod.rs"]
mod tests;
