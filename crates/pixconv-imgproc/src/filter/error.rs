use pixconv_image::ImageError;

use crate::parallel::ParallelError;

/// Errors related to filter operations.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FilterError {
    /// The kernel weights do not form an odd-sided square.
    #[error("Invalid kernel with {len} weights: {reason}")]
    InvalidKernel {
        /// Number of weights supplied.
        len: usize,
        /// Which requirement was violated.
        reason: &'static str,
    },

    /// The kernel preset name is not known.
    #[error("Unknown kernel preset: {0}")]
    UnknownPreset(String),

    /// The input image is not valid.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// The execution strategy could not run.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
