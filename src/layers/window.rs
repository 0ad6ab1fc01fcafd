use crate::{animation::ease::Ease, animation::interpolate::interpolate_clamped};

/// Frames spent entering and leaving an overlay or shape window.
pub const EDGE_FRAMES: u64 = 20;

/// Scene-local visibility window `[start, end]`, inclusive at both ends, clamped to
/// `[0, duration]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    /// First visible frame.
    pub start: u64,
    /// Last visible frame.
    pub end: u64,
}

impl Window {
    /// Clamp raw descriptor bounds to the scene; `None` when the window is inverted.
    pub fn resolve(start: i64, end: i64, duration_frames: u64) -> Option<Self> {
        let max = i64::try_from(duration_frames).unwrap_or(i64::MAX);
        let start = start.clamp(0, max) as u64;
        let end = end.clamp(0, max) as u64;
        (start <= end).then_some(Self { start, end })
    }

    /// `true` when `local` is a visible frame. Outside the window nothing is drawn.
    pub fn contains(self, local: u64) -> bool {
        self.start <= local && local <= self.end
    }

    /// Frames between first and last visible frame.
    pub fn len(self) -> u64 {
        self.end - self.start
    }

    /// Entrance/exit length, shrunk so the two never overlap.
    pub fn edge_frames(self) -> u64 {
        EDGE_FRAMES.min(self.len() / 2)
    }

    /// Frames since the window opened.
    pub fn elapsed(self, local: u64) -> u64 {
        local.saturating_sub(self.start)
    }

    /// Elapsed fraction of the whole window in `[0, 1]`.
    pub fn fraction(self, local: u64) -> f64 {
        if self.len() == 0 {
            return 1.0;
        }
        (self.elapsed(local) as f64 / self.len() as f64).clamp(0.0, 1.0)
    }

    /// Entrance progress: `0` at `start`, `1` once the entrance has played.
    pub fn enter(self, local: u64, ease: Ease) -> f64 {
        let n = self.edge_frames();
        if n == 0 {
            return 1.0;
        }
        let s = self.start as f64;
        interpolate_clamped(local as f64, (s, s + n as f64), (0.0, 1.0), ease)
    }

    /// Exit visibility: `1` until the exit starts, `0` at `end`.
    pub fn exit(self, local: u64, ease: Ease) -> f64 {
        let n = self.edge_frames();
        if n == 0 {
            return 1.0;
        }
        let e = self.end as f64;
        interpolate_clamped(local as f64, (e - n as f64, e), (1.0, 0.0), ease)
    }

    /// Product of entrance and exit ramps.
    pub fn fade(self, local: u64) -> f64 {
        self.enter(local, Ease::Linear) * self.exit(local, Ease::Linear)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/window.rs"]
mod tests;
