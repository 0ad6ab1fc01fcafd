use crate::{
    animation::ease::Ease,
    animation::spring::{SpringConfig, spring},
    effects::transitions::{Reveal, WipeDir},
    foundation::core::{Canvas, Point, Rect, Rgba8, Transform2D, Vec2},
    layers::{FrameCtx, LayerContent, LayerSource, LayerState, window::Window},
};

const PULSE_AMPLITUDE: f64 = 0.06;
const EXPAND_SPRING: SpringConfig = SpringConfig::new(14.0, 140.0, 1.0);

/// Decorative shape kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    /// Filled rectangle.
    #[default]
    Rectangle,
    /// Filled circle inscribed in the shape rect.
    Circle,
    /// Horizontal rule through the middle of the shape rect.
    Line,
    /// Linear gradient filling the shape rect.
    Gradient,
}

/// Shape animation variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeAnimation {
    /// Static.
    None,
    /// Opacity ramp in and out.
    #[default]
    Fade,
    /// Directional reveal.
    Wipe,
    /// Spring up from zero scale about the shape center.
    Expand,
    /// Gentle periodic scale.
    Pulse,
    /// Slide in from off-canvas.
    Slide,
}

/// Shape bounds in percentages of the canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PercentRect {
    /// Left edge, percent of width.
    pub x: f64,
    /// Top edge, percent of height.
    pub y: f64,
    /// Width, percent of canvas width.
    pub width: f64,
    /// Height, percent of canvas height.
    pub height: f64,
}

impl Default for PercentRect {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
        }
    }
}

impl PercentRect {
    /// Pixel rectangle on `canvas`.
    pub fn to_rect(self, canvas: Canvas) -> Rect {
        let pct = |v: f64| if v.is_finite() { v } else { 0.0 };
        let x0 = canvas.pct_x(pct(self.x));
        let y0 = canvas.pct_y(pct(self.y));
        Rect::new(
            x0,
            y0,
            x0 + canvas.pct_x(pct(self.width).max(0.0)),
            y0 + canvas.pct_y(pct(self.height).max(0.0)),
        )
    }
}

/// Decorative shape drawn during a scene-local window.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    /// Shape kind.
    #[serde(rename = "type", default)]
    pub kind: ShapeKind,
    /// Fill color (gradient start color for gradients).
    #[serde(default = "default_shape_color")]
    pub color: String,
    /// Base opacity in `[0, 1]`.
    #[serde(default = "default_shape_opacity")]
    pub opacity: f64,
    /// First visible scene-local frame.
    pub start_frame: i64,
    /// Last visible scene-local frame.
    pub end_frame: i64,
    /// Animation variant.
    #[serde(default)]
    pub animation: ShapeAnimation,
    /// Direction for wipes and slides.
    #[serde(default)]
    pub direction: WipeDir,
    /// Bounds; full canvas when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<PercentRect>,
    /// Gradient end color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_to: Option<String>,
    /// Gradient angle in degrees, CSS convention.
    #[serde(default = "default_angle")]
    pub angle_deg: f64,
    /// Line thickness in pixels.
    #[serde(default = "default_stroke")]
    pub stroke_width: f64,
}

fn default_shape_color() -> String {
    "#ffffff".to_string()
}

fn default_shape_opacity() -> f64 {
    1.0
}

fn default_angle() -> f64 {
    180.0
}

fn default_stroke() -> f64 {
    4.0
}

/// Resolved shape geometry in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ShapeGeometry {
    /// Axis-aligned rectangle.
    Rect {
        /// Bounds.
        rect: Rect,
    },
    /// Circle.
    Circle {
        /// Center.
        center: Point,
        /// Radius.
        radius: f64,
    },
    /// Line segment.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Thickness.
        width: f64,
    },
    /// Linear gradient over a rectangle.
    Gradient {
        /// Bounds.
        rect: Rect,
        /// End color.
        to: Rgba8,
        /// Angle in degrees.
        angle_deg: f64,
    },
}

/// Resolved shape draw call.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeLayer {
    /// Geometry.
    pub geometry: ShapeGeometry,
    /// Fill color.
    pub color: Rgba8,
}

impl Shape {
    /// Full-canvas shape of `kind` with default styling.
    pub fn new(
        kind: ShapeKind,
        start_frame: i64,
        end_frame: i64,
        animation: ShapeAnimation,
    ) -> Self {
        Self {
            kind,
            color: default_shape_color(),
            opacity: default_shape_opacity(),
            start_frame,
            end_frame,
            animation,
            direction: WipeDir::default(),
            position: None,
            gradient_to: None,
            angle_deg: default_angle(),
            stroke_width: default_stroke(),
        }
    }

    fn bounds(&self, canvas: Canvas) -> Rect {
        self.position.unwrap_or_default().to_rect(canvas)
    }

    fn geometry(&self, canvas: Canvas) -> ShapeGeometry {
        let rect = self.bounds(canvas);
        match self.kind {
            ShapeKind::Rectangle => ShapeGeometry::Rect { rect },
            ShapeKind::Circle => ShapeGeometry::Circle {
                center: rect.center(),
                radius: 0.5 * rect.width().min(rect.height()),
            },
            ShapeKind::Line => {
                let y = rect.center().y;
                ShapeGeometry::Line {
                    from: Point::new(rect.x0, y),
                    to: Point::new(rect.x1, y),
                    width: if self.stroke_width.is_finite() {
                        self.stroke_width.max(0.0)
                    } else {
                        default_stroke()
                    },
                }
            }
            ShapeKind::Gradient => ShapeGeometry::Gradient {
                rect,
                to: self
                    .gradient_to
                    .as_deref()
                    .and_then(Rgba8::parse)
                    .unwrap_or(Rgba8::TRANSPARENT),
                angle_deg: if self.angle_deg.is_finite() {
                    self.angle_deg
                } else {
                    default_angle()
                },
            },
        }
    }
}

/// A shape bound to its index within the scene.
pub struct ShapeSource<'a> {
    /// Position in the scene's shape list.
    pub index: usize,
    /// Shape descriptor.
    pub shape: &'a Shape,
}

impl LayerSource for ShapeSource<'_> {
    fn compute_layer(&self, ctx: &FrameCtx) -> Option<LayerState> {
        let shape = self.shape;
        let window = Window::resolve(shape.start_frame, shape.end_frame, ctx.duration_frames)?;
        let local = ctx.local_frame;
        if !window.contains(local) {
            return None;
        }

        let base = if shape.opacity.is_finite() {
            shape.opacity.clamp(0.0, 1.0)
        } else {
            1.0
        };
        let bounds = shape.bounds(ctx.canvas);
        let mut layer = LayerState::new(
            format!("shape:{}", self.index),
            LayerContent::Shape(ShapeLayer {
                geometry: shape.geometry(ctx.canvas),
                color: Rgba8::parse_or(&shape.color, Rgba8::WHITE),
            }),
        );

        let mut opacity = base;
        match shape.animation {
            ShapeAnimation::None => {}
            ShapeAnimation::Fade => opacity *= window.fade(local),
            ShapeAnimation::Wipe => {
                layer.reveal = Some(Reveal {
                    dir: shape.direction,
                    fraction: window.enter(local, Ease::OutCubic),
                });
            }
            ShapeAnimation::Expand => {
                let s = spring(window.elapsed(local) as f64, ctx.fps_f64(), EXPAND_SPRING);
                layer.transform =
                    Transform2D::scale_about(s, bounds.center(), Vec2::ZERO).to_affine();
            }
            ShapeAnimation::Pulse => {
                let t = window.elapsed(local) as f64 / ctx.fps_f64();
                let s = 1.0 + PULSE_AMPLITUDE * (std::f64::consts::TAU * t).sin();
                layer.transform =
                    Transform2D::scale_about(s, bounds.center(), Vec2::ZERO).to_affine();
            }
            ShapeAnimation::Slide => {
                let p = window.enter(local, Ease::OutCubic);
                let unit = shape.direction.unit();
                let travel = if unit.x != 0.0 {
                    ctx.canvas.w()
                } else {
                    ctx.canvas.h()
                };
                let offset = unit * (-(1.0 - p) * travel);
                layer.transform =
                    Transform2D::scale_about(1.0, bounds.center(), offset).to_affine();
                opacity *= window.exit(local, Ease::Linear);
            }
        }
        layer.opacity = opacity.clamp(0.0, 1.0);
        Some(layer)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/shape.rs"]
mod tests;
