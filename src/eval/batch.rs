use rayon::prelude::*;

use crate::{
    assets::store::AssetStore,
    composition::model::Composition,
    eval::evaluator::{Evaluator, FrameState},
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{ReelError, ReelResult},
};

/// Batch evaluation settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchOpts {
    /// Evaluate chunks on a rayon pool.
    pub parallel: bool,
    /// Worker count; `None` uses rayon's default.
    pub threads: Option<usize>,
    /// Frames per parallel chunk; `0` is treated as `1`.
    pub chunk_size: usize,
}

impl Default for BatchOpts {
    fn default() -> Self {
        Self {
            parallel: false,
            threads: None,
            chunk_size: 64,
        }
    }
}

/// Evaluate every frame in `range`, in frame order.
///
/// Serial and parallel runs produce identical output.
#[tracing::instrument(skip(comp, opts, assets), fields(frames = range.len_frames()))]
pub fn eval_frames(
    comp: &Composition,
    range: FrameRange,
    opts: &BatchOpts,
    assets: Option<&AssetStore>,
) -> ReelResult<Vec<FrameState>> {
    let eval = |f: u64| match assets {
        Some(store) => Evaluator::eval_frame_with_assets(comp, FrameIndex(f), store),
        None => Evaluator::eval_frame(comp, FrameIndex(f)),
    };

    if !opts.parallel {
        return Ok((range.start.0..range.end.0).map(eval).collect());
    }

    let pool = build_thread_pool(opts.threads)?;
    let chunk = normalized_chunk_size(opts.chunk_size);
    let mut out = Vec::with_capacity(range.len_frames() as usize);
    let mut start = range.start.0;
    while start < range.end.0 {
        let end = start.saturating_add(chunk).min(range.end.0);
        let frames: Vec<u64> = (start..end).collect();
        let states: Vec<FrameState> =
            pool.install(|| frames.par_iter().map(|&f| eval(f)).collect());
        out.extend(states);
        start = end;
    }
    Ok(out)
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ReelError::validation(
            "batch 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::evaluation(format!("build thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/batch.rs"]
mod tests;
