//! Row-parallel output fill
//!
//! Every engine writes its output one row at a time from read-only input,
//! so rows can be filled on the rayon pool without locking.

use rayon::prelude::*;

/// Controls how engines fill output rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Fill rows sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or callers that already run
    /// many filters concurrently.
    Serial,

    /// Fill rows in parallel on the global rayon thread pool.
    #[default]
    ParallelRows,
}

/// Call `f(y, row)` for every `row_len`-sample row of `dst`.
pub(crate) fn for_each_row<F>(strategy: ExecutionStrategy, dst: &mut [f32], row_len: usize, f: F)
where
    F: Fn(usize, &mut [f32]) + Send + Sync,
{
    for_each_row_init(strategy, dst, row_len, || (), |_, y, row| f(y, row));
}

/// Like [`for_each_row`], with per-worker scratch state built by `init`.
pub(crate) fn for_each_row_init<T, I, F>(
    strategy: ExecutionStrategy,
    dst: &mut [f32],
    row_len: usize,
    init: I,
    f: F,
) where
    I: Fn() -> T + Send + Sync,
    F: Fn(&mut T, usize, &mut [f32]) + Send + Sync,
{
    match strategy {
        ExecutionStrategy::Serial => {
            let mut scratch = init();
            dst.chunks_mut(row_len)
                .enumerate()
                .for_each(|(y, row)| f(&mut scratch, y, row));
        }
        ExecutionStrategy::ParallelRows => {
            dst.par_chunks_mut(row_len)
                .enumerate()
                .for_each_init(init, |scratch, (y, row)| f(scratch, y, row));
        }
    }
}
