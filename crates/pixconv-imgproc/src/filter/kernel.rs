use super::FilterError;

/// A square convolution kernel with an odd side length.
///
/// Weights are stored row-major, `(0, 0)` is the top-left cell and the center
/// cell `(side / 2, side / 2)` is aligned with the output pixel.
///
/// # Examples
///
/// ```
/// use pixconv_imgproc::filter::Kernel;
///
/// let kernel = Kernel::new(vec![
///     0.0, -1.0, 0.0,
///     -1.0, 5.0, -1.0,
///     0.0, -1.0, 0.0,
/// ])
/// .unwrap();
///
/// assert_eq!(kernel.side(), 3);
/// assert_eq!(kernel.radius(), 1);
/// assert_eq!(kernel.weight(1, 1), Some(5.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    side: usize,
    weights: Vec<f32>,
}

/// A kernel cell resolved to its offset from the output pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Tap {
    pub dx: isize,
    pub dy: isize,
    pub weight: f32,
}

impl Kernel {
    /// Create a kernel from row-major weights, inferring the side length.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if there are no weights, the count is
    /// not a perfect square or the side is even.
    pub fn new(weights: Vec<f32>) -> Result<Self, FilterError> {
        let len = weights.len();
        let side = (len as f64).sqrt().round() as usize;
        if side * side != len {
            return Err(FilterError::InvalidKernel {
                len,
                reason: "weight count is not a perfect square",
            });
        }
        Self::from_side(side, weights)
    }

    /// Create a kernel with an explicit side length.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if there are no weights, `side * side`
    /// differs from the weight count or the side is even.
    pub fn from_side(side: usize, weights: Vec<f32>) -> Result<Self, FilterError> {
        let len = weights.len();
        if len == 0 {
            return Err(FilterError::InvalidKernel {
                len,
                reason: "kernel is empty",
            });
        }
        if side.checked_mul(side) != Some(len) {
            return Err(FilterError::InvalidKernel {
                len,
                reason: "weight count does not match side * side",
            });
        }
        if side % 2 == 0 {
            return Err(FilterError::InvalidKernel {
                len,
                reason: "kernel side must be odd",
            });
        }
        Ok(Self { side, weights })
    }

    /// Create a kernel that passes the center pixel through unchanged.
    pub fn identity(side: usize) -> Result<Self, FilterError> {
        let mut weights = vec![0.0; side.saturating_mul(side)];
        let center = weights.len() / 2;
        if let Some(center) = weights.get_mut(center) {
            *center = 1.0;
        }
        Self::from_side(side, weights)
    }

    /// Build a kernel from a compile-time table that is known to be valid.
    pub(crate) fn from_table(side: usize, weights: &[f32]) -> Self {
        debug_assert_eq!(side * side, weights.len());
        debug_assert_eq!(side % 2, 1);
        Self {
            side,
            weights: weights.to_vec(),
        }
    }

    /// Side length of the kernel.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Distance from the center cell to the border, `side / 2`.
    pub fn radius(&self) -> usize {
        self.side / 2
    }

    /// Row-major kernel weights.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Weight at `(row, col)`, if it is inside the kernel.
    pub fn weight(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.side || col >= self.side {
            return None;
        }
        self.weights.get(row * self.side + col).copied()
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f32 {
        self.weights.iter().sum()
    }

    /// Resolve every cell to its offset, keeping row-major order.
    pub(crate) fn taps(&self) -> Vec<Tap> {
        let radius = self.radius() as isize;
        self.weights
            .iter()
            .enumerate()
            .map(|(i, &weight)| Tap {
                dx: (i % self.side) as isize - radius,
                dy: (i / self.side) as isize - radius,
                weight,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_new_infers_side() -> Result<(), FilterError> {
        assert_eq!(Kernel::new(vec![1.0])?.side(), 1);
        assert_eq!(Kernel::new(vec![0.0; 9])?.side(), 3);
        assert_eq!(Kernel::new(vec![0.0; 81])?.side(), 9);
        Ok(())
    }

    #[test]
    fn test_kernel_rejects_non_square() {
        assert_eq!(
            Kernel::new(vec![0.0; 8]),
            Err(FilterError::InvalidKernel {
                len: 8,
                reason: "weight count is not a perfect square",
            })
        );
    }

    #[test]
    fn test_kernel_rejects_even_side() {
        assert!(matches!(
            Kernel::new(vec![0.25; 4]),
            Err(FilterError::InvalidKernel { len: 4, .. })
        ));
        assert!(matches!(
            Kernel::from_side(4, vec![0.0; 16]),
            Err(FilterError::InvalidKernel { len: 16, .. })
        ));
    }

    #[test]
    fn test_kernel_rejects_empty() {
        assert!(matches!(
            Kernel::new(vec![]),
            Err(FilterError::InvalidKernel { len: 0, .. })
        ));
        assert!(Kernel::identity(0).is_err());
    }

    #[test]
    fn test_kernel_from_side_mismatch() {
        assert_eq!(
            Kernel::from_side(3, vec![0.0; 8]),
            Err(FilterError::InvalidKernel {
                len: 8,
                reason: "weight count does not match side * side",
            })
        );
    }

    #[test]
    fn test_kernel_identity() -> Result<(), FilterError> {
        let kernel = Kernel::identity(5)?;
        assert_eq!(kernel.weight(2, 2), Some(1.0));
        assert_eq!(kernel.sum(), 1.0);
        assert_eq!(kernel.weight(5, 0), None);
        Ok(())
    }

    #[test]
    fn test_kernel_taps_row_major() -> Result<(), FilterError> {
        let kernel = Kernel::new((1..=9).map(|v| v as f32).collect())?;
        let taps = kernel.taps();

        assert_eq!(taps.len(), 9);
        assert_eq!(
            taps[0],
            Tap {
                dx: -1,
                dy: -1,
                weight: 1.0
            }
        );
        assert_eq!(
            taps[4],
            Tap {
                dx: 0,
                dy: 0,
                weight: 5.0
            }
        );
        assert_eq!(
            taps[5],
            Tap {
                dx: 1,
                dy: 0,
                weight: 6.0
            }
        );
        assert_eq!(
            taps[8],
            Tap {
                dx: 1,
                dy: 1,
                weight: 9.0
            }
        );
        Ok(())
    }
}
