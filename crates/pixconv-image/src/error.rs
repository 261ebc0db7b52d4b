/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ImageError {
    /// Error when the buffer cannot be split into `width * height` pixels.
    #[error(
        "Data length ({len}) cannot be split into {width}x{height} pixels with a whole number of channels"
    )]
    InvalidImageDimensions {
        /// Length of the pixel buffer.
        len: usize,
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },

    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),
}
