use pixconv_image::{Image, ImageDtype, ImageError, ImageSize};

use super::{kernel::Tap, FilterError, Kernel, KernelPreset};
use crate::parallel::{self, ExecutionStrategy};

/// Convolve an image with a square kernel.
///
/// Every output channel is the weighted sum of the same channel over the kernel
/// neighborhood. Kernel cells falling outside the image are skipped, so border
/// pixels are computed from a smaller footprint without renormalization. The
/// result is converted back with [`ImageDtype::from_f32`], which rounds half
/// away from zero and saturates for `u8` images.
///
/// Uses [`ExecutionStrategy::default`].
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `kernel` - The convolution kernel.
///
/// # Returns
///
/// A new image with the same size and number of channels as `src`.
///
/// # Example
///
/// ```
/// use pixconv_image::Image;
/// use pixconv_imgproc::filter::{convolve, Kernel};
///
/// let image = Image::new([3, 1].into(), vec![10u8, 20, 30]).unwrap();
/// let kernel = Kernel::new(vec![
///     0.0, 0.0, 0.0,
///     1.0, 0.0, 0.0,
///     0.0, 0.0, 0.0,
/// ])
/// .unwrap();
///
/// let shifted = convolve(&image, &kernel).unwrap();
/// assert_eq!(shifted.as_slice(), &[0, 10, 20]);
/// ```
pub fn convolve<T: ImageDtype>(
    src: &Image<T>,
    kernel: &Kernel,
) -> Result<Image<T>, FilterError> {
    convolve_with(src, kernel, ExecutionStrategy::default())
}

/// Convolve an image with a square kernel using the given execution strategy.
///
/// The output is identical for every strategy: each output row is computed
/// independently and the kernel cells of one pixel are always summed in
/// row-major order.
///
/// # Errors
///
/// Returns [`FilterError::Parallel`] if the strategy cannot run; nothing is
/// computed in that case.
pub fn convolve_with<T: ImageDtype>(
    src: &Image<T>,
    kernel: &Kernel,
    strategy: ExecutionStrategy,
) -> Result<Image<T>, FilterError> {
    let (width, height, channels) = (src.width(), src.height(), src.num_channels());

    log::debug!(
        "convolving {width}x{height}x{channels} image with {side}x{side} kernel ({strategy:?})",
        side = kernel.side()
    );

    let taps = kernel.taps();
    let src_data = src.as_slice();
    let mut dst = vec![T::default(); src_data.len()];

    parallel::for_each_row(
        strategy,
        width * height,
        &mut dst,
        width * channels,
        |y, dst_row| convolve_row(src_data, dst_row, y, src.size(), channels, &taps),
    )?;

    Ok(Image::from_channels(src.size(), channels, dst)?)
}

/// Convolve an image with one of the preset kernels.
///
/// # Example
///
/// ```
/// use pixconv_image::Image;
/// use pixconv_imgproc::filter::{convolve_preset, KernelPreset};
///
/// let image = Image::new([2, 2].into(), vec![1u8, 2, 3, 4, 5, 6, 7, 8]).unwrap();
/// let same = convolve_preset(&image, KernelPreset::Identity).unwrap();
/// assert_eq!(same, image);
/// ```
pub fn convolve_preset<T: ImageDtype>(
    src: &Image<T>,
    preset: KernelPreset,
) -> Result<Image<T>, FilterError> {
    convolve(src, &preset.kernel())
}

/// Apply a preset kernel to a raw interleaved 8-bit buffer.
///
/// The number of channels is derived as `pixels.len() / (width * height)`.
///
/// # Arguments
///
/// * `width` - The width of the image in pixels, must be positive.
/// * `height` - The height of the image in pixels, must be positive.
/// * `pixels` - Row-major pixel data with interleaved channels.
/// * `preset` - The kernel to apply.
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageDimensions`] (wrapped in
/// [`FilterError::Image`]) if a dimension is not positive or the buffer cannot
/// be split into `width * height` pixels. Negative dimensions are reported as
/// zero.
pub fn apply_kernel(
    width: i32,
    height: i32,
    pixels: &[u8],
    preset: KernelPreset,
) -> Result<Vec<u8>, FilterError> {
    let size = ImageSize {
        width: usize::try_from(width).unwrap_or(0),
        height: usize::try_from(height).unwrap_or(0),
    };
    if size.width == 0 || size.height == 0 {
        return Err(ImageError::InvalidImageDimensions {
            len: pixels.len(),
            width: size.width,
            height: size.height,
        }
        .into());
    }

    let src = Image::new(size, pixels.to_vec())?;
    Ok(convolve_preset(&src, preset)?.into_vec())
}

fn convolve_row<T: ImageDtype>(
    src: &[T],
    dst_row: &mut [T],
    y: usize,
    size: ImageSize,
    channels: usize,
    taps: &[Tap],
) {
    let (width, height) = (size.width as isize, size.height as isize);
    let y = y as isize;

    for (x, dst_pixel) in dst_row.chunks_exact_mut(channels).enumerate() {
        let x = x as isize;
        for (ch, dst_val) in dst_pixel.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for tap in taps {
                let (sx, sy) = (x + tap.dx, y + tap.dy);
                // out-of-bounds cells are dropped, not padded
                if sx < 0 || sx >= width || sy < 0 || sy >= height {
                    continue;
                }
                let idx = (sy as usize * size.width + sx as usize) * channels + ch;
                let val: f32 = src[idx].into();
                acc += val * tap.weight;
            }
            *dst_val = T::from_f32(acc);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parallel::ParallelError;

    #[test]
    fn test_identity_keeps_image() -> Result<(), FilterError> {
        let image = Image::new(
            ImageSize {
                width: 4,
                height: 3,
            },
            (0..4 * 3 * 4).map(|v| (v * 5) as u8).collect(),
        )?;

        for side in [1, 3, 5] {
            let out = convolve(&image, &Kernel::identity(side)?)?;
            assert_eq!(out, image);
        }
        Ok(())
    }

    #[test]
    fn test_corner_uses_in_bounds_cells_only() -> Result<(), FilterError> {
        let image = Image::new([3, 3].into(), vec![1u8; 9])?;
        let kernel = Kernel::new((1..=9).map(|v| v as f32).collect())?;

        let out = convolve(&image, &kernel)?;

        // top-left: cells (1,1), (1,2), (2,1), (2,2)
        assert_eq!(out.get(0, 0, 0), Some(&(5 + 6 + 8 + 9)));
        // bottom-right: cells (0,0), (0,1), (1,0), (1,1)
        assert_eq!(out.get(2, 2, 0), Some(&(1 + 2 + 4 + 5)));
        // top edge: rows 1 and 2 of the kernel
        assert_eq!(out.get(1, 0, 0), Some(&(4 + 5 + 6 + 7 + 8 + 9)));
        // interior sees the whole kernel
        assert_eq!(out.get(1, 1, 0), Some(&45));
        Ok(())
    }

    #[test]
    fn test_no_wraparound() -> Result<(), FilterError> {
        let image = Image::new([3, 1].into(), vec![10u8, 0, 0])?;
        #[rustfmt::skip]
        let right_neighbor = Kernel::new(vec![
            0.0, 0.0, 0.0,
            0.0, 0.0, 1.0,
            0.0, 0.0, 0.0,
        ])?;

        let out = convolve(&image, &right_neighbor)?;
        assert_eq!(out.as_slice(), &[0, 0, 0]);
        Ok(())
    }

    #[test]
    fn test_f32_image_is_not_clamped() -> Result<(), FilterError> {
        let image = Image::new([2, 1].into(), vec![1.0f32, 3.0])?;
        let kernel = Kernel::new(vec![-2.0])?;
        let out = convolve(&image, &kernel)?;
        assert_eq!(out.as_slice(), &[-2.0, -6.0]);
        Ok(())
    }

    #[test]
    fn test_invalid_strategy_fails_before_compute() -> Result<(), FilterError> {
        let image = Image::new([2, 2].into(), vec![0u8; 4])?;
        let res = convolve_with(&image, &Kernel::identity(3)?, ExecutionStrategy::Fixed(0));
        assert_eq!(
            res,
            Err(FilterError::Parallel(ParallelError::InvalidThreadCount(0)))
        );
        Ok(())
    }

    #[test]
    fn test_apply_kernel_rejects_bad_dimensions() {
        let pixels = vec![0u8; 12];
        assert_eq!(
            apply_kernel(0, 4, &pixels, KernelPreset::Identity),
            Err(FilterError::Image(ImageError::InvalidImageDimensions {
                len: 12,
                width: 0,
                height: 4,
            }))
        );
        assert!(matches!(
            apply_kernel(-2, 2, &pixels, KernelPreset::Sharpen),
            Err(FilterError::Image(ImageError::InvalidImageDimensions { width: 0, .. }))
        ));
        assert_eq!(
            apply_kernel(5, 1, &pixels, KernelPreset::BoxBlur),
            Err(FilterError::Image(ImageError::InvalidImageDimensions {
                len: 12,
                width: 5,
                height: 1,
            }))
        );
    }

    #[test]
    fn test_apply_kernel_preserves_length() -> Result<(), FilterError> {
        let pixels: Vec<u8> = (0..6 * 2 * 3).map(|v| v as u8).collect();
        for preset in KernelPreset::ALL {
            let out = apply_kernel(6, 2, &pixels, preset)?;
            assert_eq!(out.len(), pixels.len(), "{preset}");
        }
        Ok(())
    }
}
