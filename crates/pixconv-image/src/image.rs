use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use pixconv_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by this size, `None` on overflow.
    pub fn num_pixels(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Trait for image data types.
///
/// Send and Sync is required to share the pixel buffer across worker threads.
pub trait ImageDtype: Copy + Default + Into<f32> + Send + Sync {
    /// Convert a f32 value to the image data type.
    fn from_f32(x: f32) -> Self;
}

impl ImageDtype for f32 {
    fn from_f32(x: f32) -> Self {
        x
    }
}

impl ImageDtype for u8 {
    /// Rounds half away from zero, then saturates to `[0, 255]`.
    fn from_f32(x: f32) -> Self {
        x.round().clamp(0.0, 255.0) as u8
    }
}

/// Represents an image with interleaved pixel data.
///
/// The data is laid out row-major as (H, W, C), with the channels of a pixel
/// stored next to each other. The channel count is a property of the buffer:
/// it is derived from the data length when the image is created.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T> {
    size: ImageSize,
    channels: usize,
    data: Vec<T>,
}

impl<T> Image<T> {
    /// Create a new image from pixel data, deriving the number of channels.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The interleaved pixel data of the image.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidImageDimensions`] if the size is empty or the
    /// data length is not a whole multiple of `width * height`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixconv_image::{Image, ImageSize};
    ///
    /// let image = Image::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     vec![0u8; 10 * 20 * 3],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        let invalid = || ImageError::InvalidImageDimensions {
            len: data.len(),
            width: size.width,
            height: size.height,
        };

        let num_pixels = size.num_pixels().ok_or_else(invalid)?;
        if num_pixels == 0 || data.is_empty() || data.len() % num_pixels != 0 {
            return Err(invalid());
        }

        Ok(Self {
            size,
            channels: data.len() / num_pixels,
            data,
        })
    }

    /// Create a new image from pixel data with an explicit number of channels.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidImageDimensions`] if any dimension is zero and
    /// [`ImageError::InvalidChannelShape`] if the data length does not match
    /// `width * height * channels`.
    pub fn from_channels(
        size: ImageSize,
        channels: usize,
        data: Vec<T>,
    ) -> Result<Self, ImageError> {
        let expected = size
            .num_pixels()
            .and_then(|n| n.checked_mul(channels))
            .filter(|&n| n > 0)
            .ok_or(ImageError::InvalidImageDimensions {
                len: data.len(),
                width: size.width,
                height: size.height,
            })?;

        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self {
            size,
            channels,
            data,
        })
    }

    /// Create a new image with the given size and a constant pixel value.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixconv_image::{Image, ImageSize};
    ///
    /// let image = Image::from_size_val([4, 2].into(), 4, 255u8).unwrap();
    ///
    /// assert_eq!(image.num_channels(), 4);
    /// assert!(image.as_slice().iter().all(|&v| v == 255));
    /// ```
    pub fn from_size_val(size: ImageSize, channels: usize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let len = size
            .num_pixels()
            .and_then(|n| n.checked_mul(channels))
            .unwrap_or(0);
        Self::from_channels(size, channels, vec![val; len])
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        self.channels
    }

    /// Get the interleaved pixel data.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consume the image and return the interleaved pixel data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Get the channel value at the given pixel, if it is in bounds.
    ///
    /// # Arguments
    ///
    /// * `x` - The column of the pixel.
    /// * `y` - The row of the pixel.
    /// * `ch` - The channel index.
    pub fn get(&self, x: usize, y: usize, ch: usize) -> Option<&T> {
        self.pixel(x, y).and_then(|pixel| pixel.get(ch))
    }

    /// Get all channels of the pixel at the given coordinates, if it is in bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[T]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let start = (y * self.width() + x) * self.channels;
        self.data.get(start..start + self.channels)
    }
}

#[cfg(test)]
mod tests {
    use super::{Image, ImageDtype, ImageSize};
    use crate::error::ImageError;

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
        assert_eq!(image_size.num_pixels(), Some(200));
    }

    #[test]
    fn image_derives_channels() -> Result<(), ImageError> {
        let rgb = Image::new([2, 3].into(), vec![0u8; 2 * 3 * 3])?;
        assert_eq!(rgb.num_channels(), 3);

        let rgba = Image::new([2, 3].into(), vec![0u8; 2 * 3 * 4])?;
        assert_eq!(rgba.num_channels(), 4);

        let gray = Image::new([1, 1].into(), vec![7u8])?;
        assert_eq!(gray.num_channels(), 1);
        assert_eq!(gray.get(0, 0, 0), Some(&7));

        Ok(())
    }

    #[test]
    fn image_rejects_uneven_buffer() {
        let res = Image::new([2, 2].into(), vec![0u8; 7]);
        assert_eq!(
            res,
            Err(ImageError::InvalidImageDimensions {
                len: 7,
                width: 2,
                height: 2,
            })
        );
    }

    #[test]
    fn image_rejects_empty() {
        assert!(matches!(
            Image::new([0, 4].into(), vec![0u8; 4]),
            Err(ImageError::InvalidImageDimensions { .. })
        ));
        assert!(matches!(
            Image::<u8>::new([4, 4].into(), vec![]),
            Err(ImageError::InvalidImageDimensions { .. })
        ));
        assert!(matches!(
            Image::<u8>::from_size_val([4, 4].into(), 0, 0),
            Err(ImageError::InvalidImageDimensions { .. })
        ));
    }

    #[test]
    fn image_from_channels_shape_mismatch() {
        let res = Image::from_channels([2, 2].into(), 3, vec![0u8; 8]);
        assert_eq!(res, Err(ImageError::InvalidChannelShape(8, 12)));
    }

    #[test]
    fn image_pixel_access() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let image = Image::new(
            [2, 2].into(),
            vec![
                1u8, 2, 3,    4, 5, 6,
                7, 8, 9,    10, 11, 12,
            ],
        )?;

        assert_eq!(image.pixel(1, 0), Some(&[4u8, 5, 6][..]));
        assert_eq!(image.pixel(0, 1), Some(&[7u8, 8, 9][..]));
        assert_eq!(image.get(1, 1, 2), Some(&12));
        assert_eq!(image.get(1, 1, 3), None);
        assert_eq!(image.pixel(2, 0), None);
        assert_eq!(image.pixel(0, 2), None);

        Ok(())
    }

    #[test]
    fn u8_from_f32_rounds_half_away_from_zero() {
        assert_eq!(u8::from_f32(2.5), 3);
        assert_eq!(u8::from_f32(0.5), 1);
        assert_eq!(u8::from_f32(2.49), 2);
        assert_eq!(u8::from_f32(-0.4), 0);
        assert_eq!(u8::from_f32(-3.0), 0);
        assert_eq!(u8::from_f32(254.5), 255);
        assert_eq!(u8::from_f32(1000.0), 255);
    }
}
