//! Filter operations
//!
//! This module provides spatial convolution of interleaved images with square
//! kernels. Kernel cells that fall outside the image are dropped: the border
//! is neither padded, replicated nor wrapped, and the remaining weights are not
//! renormalized.

/// Convolution engine
mod convolution;
pub use convolution::*;

/// Filter errors
mod error;
pub use error::FilterError;

/// Square kernel type
mod kernel;
pub use kernel::Kernel;

/// Preset kernel tables
pub mod kernels;
pub use kernels::KernelPreset;
