use crate::{
    animation::ease::Ease,
    animation::interpolate::interpolate_clamped,
    foundation::core::{Affine, Canvas, Transform2D, Vec2},
};

/// Ken Burns camera: zoom and pan interpolated across the whole scene.
///
/// Offsets are percentages of the canvas; zoom is anchored at the canvas center.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraSpec {
    /// Zoom at the first scene frame.
    #[serde(default = "unit")]
    pub start_zoom: f64,
    /// Zoom at the scene end.
    #[serde(default = "unit")]
    pub end_zoom: f64,
    /// Horizontal offset at the first frame, percent of width.
    #[serde(default)]
    pub start_x: f64,
    /// Horizontal offset at the scene end, percent of width.
    #[serde(default)]
    pub end_x: f64,
    /// Vertical offset at the first frame, percent of height.
    #[serde(default)]
    pub start_y: f64,
    /// Vertical offset at the scene end, percent of height.
    #[serde(default)]
    pub end_y: f64,
    /// Curve over the scene.
    #[serde(default)]
    pub easing: Ease,
}

fn unit() -> f64 {
    1.0
}

impl Default for CameraSpec {
    fn default() -> Self {
        Self {
            start_zoom: 1.0,
            end_zoom: 1.0,
            start_x: 0.0,
            end_x: 0.0,
            start_y: 0.0,
            end_y: 0.0,
            easing: Ease::Linear,
        }
    }
}

/// Camera at one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraState {
    /// Uniform zoom.
    pub zoom: f64,
    /// Pan in pixels.
    pub offset: Vec2,
}

impl CameraState {
    /// No zoom, no pan.
    pub const NEUTRAL: Self = Self {
        zoom: 1.0,
        offset: Vec2::ZERO,
    };

    /// Zoom about the canvas center, then pan.
    pub fn to_affine(self, canvas: Canvas) -> Affine {
        Transform2D::scale_about(self.zoom, canvas.center(), self.offset).to_affine()
    }
}

impl CameraSpec {
    /// Camera at scene-local `frame` of a `duration_frames` scene.
    pub fn state_at(&self, frame: f64, duration_frames: u64, canvas: Canvas) -> CameraState {
        let span = (0.0, duration_frames as f64);
        let at = |from: f64, to: f64| interpolate_clamped(frame, span, (from, to), self.easing);
        let zoom = at(self.start_zoom, self.end_zoom);
        CameraState {
            zoom: if zoom.is_finite() && zoom > 0.0 { zoom } else { 1.0 },
            offset: Vec2::new(
                canvas.pct_x(at(self.start_x, self.end_x)),
                canvas.pct_y(at(self.start_y, self.end_y)),
            ),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/visual/camera.rs"]
mod tests;
