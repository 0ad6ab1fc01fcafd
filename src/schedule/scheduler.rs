use crate::{composition::model::SceneDescriptor, foundation::core::FrameIndex};

/// Scene covering a global frame, with the frame mapped into scene-local time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveScene<'a> {
    /// Position in the composition's scene list.
    pub index: usize,
    /// Scene descriptor.
    pub scene: &'a SceneDescriptor,
    /// `frame - scene.start_frame`.
    pub local_frame: u64,
}

/// First scene, in list order, whose `[start, start + duration)` contains `frame`.
pub fn active_scene(scenes: &[SceneDescriptor], frame: FrameIndex) -> Option<ActiveScene<'_>> {
    scenes
        .iter()
        .enumerate()
        .find(|(_, s)| s.range().contains(frame))
        .map(|(index, scene)| ActiveScene {
            index,
            scene,
            local_frame: frame.0 - scene.start_frame,
        })
}

/// Indices of every scene containing `frame`, in list order.
pub fn scenes_at(scenes: &[SceneDescriptor], frame: FrameIndex) -> Vec<usize> {
    scenes
        .iter()
        .enumerate()
        .filter(|(_, s)| s.range().contains(frame))
        .map(|(i, _)| i)
        .collect()
}

/// Every pair `(a, b)` with `a < b` whose frame intervals intersect.
pub fn overlapping_pairs(scenes: &[SceneDescriptor]) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    for (a, sa) in scenes.iter().enumerate() {
        for (b, sb) in scenes.iter().enumerate().skip(a + 1) {
            if sa.range().overlaps(sb.range()) {
                out.push((a, b));
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/scheduler.rs"]
mod tests;
