//! Rank filtering operations
//!
//! Order-statistic filters over a square `window * window` neighborhood:
//! the general rank filter with its median, min and max shorthands, and
//! the mode (most frequent value) filter. Windows read past the image
//! edge through edge replication.

use log::trace;
use pixkit_core::PixelBuffer;

use crate::error::reject_palette;
use crate::parallel::{ExecutionStrategy, for_each_row_init};
use crate::spec::{check_rank, check_window};
use crate::{FilterError, FilterResult};

/// A mode filter keeps the center value unless the winner appears more
/// often than this.
const MODE_MIN_COUNT: usize = 2;

/// Apply a rank filter.
///
/// Each output sample is the `rank`-th smallest of the `window * window`
/// neighborhood values of its channel (rank 0 is the minimum).
///
/// # Errors
///
/// - [`FilterError::InvalidSpec`](crate::FilterError::InvalidSpec) if
///   `window` is not a positive odd number or `rank >= window * window`
/// - [`FilterError::UnsupportedMode`](crate::FilterError::UnsupportedMode)
///   for palette images
pub fn rank_filter(image: &PixelBuffer, window: usize, rank: usize) -> FilterResult<PixelBuffer> {
    rank_filter_with_strategy(image, window, rank, ExecutionStrategy::default())
}

/// Apply a median filter (rank `window * window / 2`).
pub fn median_filter(image: &PixelBuffer, window: usize) -> FilterResult<PixelBuffer> {
    let count = check_window(window)?;
    rank_filter(image, window, count / 2)
}

/// Apply a minimum filter (rank 0).
pub fn min_filter(image: &PixelBuffer, window: usize) -> FilterResult<PixelBuffer> {
    check_window(window)?;
    rank_filter(image, window, 0)
}

/// Apply a maximum filter (rank `window * window - 1`).
pub fn max_filter(image: &PixelBuffer, window: usize) -> FilterResult<PixelBuffer> {
    let count = check_window(window)?;
    rank_filter(image, window, count - 1)
}

/// [`rank_filter`] with an explicit execution strategy.
pub fn rank_filter_with_strategy(
    image: &PixelBuffer,
    window: usize,
    rank: usize,
    strategy: ExecutionStrategy,
) -> FilterResult<PixelBuffer> {
    check_rank(window, rank)?;
    reject_palette(image, "Rank")?;
    if window == 1 {
        return Ok(image.clone());
    }

    let half = window / 2;
    trace!("Rank: window {window}, rank {rank}, padding {half}");
    let pad = padding(half)?;
    let padded = image.extend_by_replication(pad, pad)?;
    let src = padded.samples();
    let pw = padded.width() as usize;
    let ch = image.channels();
    let w = image.width() as usize;

    let mut out = image.create_template(image.mode());
    let row_len = out.row_len();
    for_each_row_init(
        strategy,
        out.samples_mut(),
        row_len,
        || Vec::<f32>::with_capacity(window * window),
        |values, y, row| {
            for x in 0..w {
                for c in 0..ch {
                    gather(src, pw, ch, window, x, y, c, values);
                    let (_, value, _) = values.select_nth_unstable_by(rank, f32::total_cmp);
                    row[x * ch + c] = *value;
                }
            }
        },
    );

    Ok(out)
}

/// Apply a mode filter.
///
/// Each output sample is the most frequent value in its `size * size`
/// neighborhood, the smallest one on ties. If no value occurs more than
/// twice the center value is kept. Palette images are filtered on their
/// indices and keep their palette.
///
/// # Errors
///
/// Returns [`FilterError::InvalidSpec`](crate::FilterError::InvalidSpec)
/// if `size` is not a positive odd number.
pub fn mode_filter(image: &PixelBuffer, size: usize) -> FilterResult<PixelBuffer> {
    mode_filter_with_strategy(image, size, ExecutionStrategy::default())
}

/// [`mode_filter`] with an explicit execution strategy.
pub fn mode_filter_with_strategy(
    image: &PixelBuffer,
    size: usize,
    strategy: ExecutionStrategy,
) -> FilterResult<PixelBuffer> {
    check_window(size)?;
    if size == 1 {
        return Ok(image.clone());
    }

    let half = size / 2;
    trace!("Mode: window {size}, padding {half}");
    let pad = padding(half)?;
    let padded = image.extend_by_replication(pad, pad)?;
    let src = padded.samples();
    let pw = padded.width() as usize;
    let ch = image.channels();
    let w = image.width() as usize;

    let mut out = image.create_template(image.mode());
    let row_len = out.row_len();
    for_each_row_init(
        strategy,
        out.samples_mut(),
        row_len,
        || Vec::<f32>::with_capacity(size * size),
        |values, y, row| {
            for x in 0..w {
                for c in 0..ch {
                    gather(src, pw, ch, size, x, y, c, values);
                    let center = src[((y + half) * pw + x + half) * ch + c];
                    row[x * ch + c] = most_frequent(values).unwrap_or(center);
                }
            }
        },
    );

    Ok(out)
}

fn padding(half: usize) -> FilterResult<u32> {
    u32::try_from(half)
        .map_err(|_| FilterError::InvalidSpec(format!("window padding {half} is too large")))
}

/// Collect channel `c` of the window whose padded top-left is `(x, y)`.
#[allow(clippy::too_many_arguments)]
#[inline]
fn gather(
    src: &[f32],
    padded_width: usize,
    ch: usize,
    window: usize,
    x: usize,
    y: usize,
    c: usize,
    values: &mut Vec<f32>,
) {
    values.clear();
    for wy in 0..window {
        let base = ((y + wy) * padded_width + x) * ch + c;
        values.extend((0..window).map(|wx| src[base + wx * ch]));
    }
}

/// Most frequent value if it occurs more than [`MODE_MIN_COUNT`] times.
///
/// Sorts `values` in place; ties go to the smallest value.
fn most_frequent(values: &mut [f32]) -> Option<f32> {
    values.sort_unstable_by(f32::total_cmp);
    let mut best = None;
    let mut best_count = MODE_MIN_COUNT;
    for run in values.chunk_by(|a, b| a == b) {
        if run.len() > best_count {
            best_count = run.len();
            best = Some(run[0]);
        }
    }
    best
}
