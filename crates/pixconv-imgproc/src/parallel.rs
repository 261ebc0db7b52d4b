use rayon::prelude::*;
use thiserror::Error;

/// Images with at least this many pixels are processed in parallel by
/// [`ExecutionStrategy::Auto`].
pub const PARALLEL_PIXEL_THRESHOLD: usize = 64 * 64;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The row length must be non-zero to split a buffer into rows.
    #[error("row length must be > 0, got {0}")]
    InvalidRowStride(usize),
}

/// Controls how row-wise operations are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Process rows on the global Rayon thread pool when the image has at least
    /// [`PARALLEL_PIXEL_THRESHOLD`] pixels, sequentially otherwise.
    #[default]
    Auto,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Use the global Rayon thread pool, one task per row.
    ParallelRows,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

impl ExecutionStrategy {
    /// Whether an image with `num_pixels` pixels runs on more than the current thread.
    pub fn is_parallel(&self, num_pixels: usize) -> bool {
        match self {
            ExecutionStrategy::Auto => num_pixels >= PARALLEL_PIXEL_THRESHOLD,
            ExecutionStrategy::Serial => false,
            ExecutionStrategy::ParallelRows | ExecutionStrategy::Fixed(_) => true,
        }
    }

    /// Check the strategy parameters without running anything.
    pub fn validate(&self) -> Result<(), ParallelError> {
        match self {
            ExecutionStrategy::Fixed(0) => Err(ParallelError::InvalidThreadCount(0)),
            _ => Ok(()),
        }
    }
}

/// Split `dst` into rows of `row_len` elements and call `f(row_index, row)` on each.
///
/// Every row is a disjoint mutable slice, so workers never share output memory.
/// The row index passed to `f` is the same whatever the strategy.
///
/// # Arguments
///
/// * `strategy` - The execution strategy.
/// * `num_pixels` - Pixel count of the image, used by [`ExecutionStrategy::Auto`].
/// * `dst` - The destination buffer, a whole number of rows long.
/// * `row_len` - Number of elements per row (width * channels).
/// * `f` - The per-row operation.
pub fn for_each_row<T, F>(
    strategy: ExecutionStrategy,
    num_pixels: usize,
    dst: &mut [T],
    row_len: usize,
    f: F,
) -> Result<(), ParallelError>
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    if row_len == 0 {
        return Err(ParallelError::InvalidRowStride(row_len));
    }
    strategy.validate()?;

    log::trace!(
        "{} rows, parallel: {}",
        dst.len() / row_len,
        strategy.is_parallel(num_pixels)
    );

    match strategy {
        ExecutionStrategy::Fixed(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| par_rows(dst, row_len, &f));
        }
        s if s.is_parallel(num_pixels) => par_rows(dst, row_len, &f),
        _ => {
            dst.chunks_exact_mut(row_len)
                .enumerate()
                .for_each(|(y, row)| f(y, row));
        }
    }
    Ok(())
}

fn par_rows<T, F>(dst: &mut [T], row_len: usize, f: &F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    dst.par_chunks_exact_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}
