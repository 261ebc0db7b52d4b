use std::{fmt, str::FromStr};

use super::{FilterError, Kernel};

/// 3x3 kernel that leaves the image unchanged.
#[rustfmt::skip]
pub const IDENTITY_3X3: [f32; 9] = [
    0.0, 0.0, 0.0,
    0.0, 1.0, 0.0,
    0.0, 0.0, 0.0,
];

/// 3x3 Laplacian-like edge detection kernel.
#[rustfmt::skip]
pub const EDGE_DETECT_3X3: [f32; 9] = [
    0.0, -1.0, 0.0,
    -1.0, 4.0, -1.0,
    0.0, -1.0, 0.0,
];

/// 3x3 sharpen kernel, the identity plus the edge detection kernel.
#[rustfmt::skip]
pub const SHARPEN_3X3: [f32; 9] = [
    0.0, -1.0, 0.0,
    -1.0, 5.0, -1.0,
    0.0, -1.0, 0.0,
];

/// 5x5 discrete Gaussian approximation, weights sum to 1.
#[rustfmt::skip]
pub const GAUSSIAN_BLUR_5X5: [f32; 25] = [
    1.0 / 273.0, 4.0 / 273.0, 7.0 / 273.0, 4.0 / 273.0, 1.0 / 273.0,
    4.0 / 273.0, 16.0 / 273.0, 26.0 / 273.0, 16.0 / 273.0, 4.0 / 273.0,
    7.0 / 273.0, 26.0 / 273.0, 41.0 / 273.0, 26.0 / 273.0, 7.0 / 273.0,
    4.0 / 273.0, 16.0 / 273.0, 26.0 / 273.0, 16.0 / 273.0, 4.0 / 273.0,
    1.0 / 273.0, 4.0 / 273.0, 7.0 / 273.0, 4.0 / 273.0, 1.0 / 273.0,
];

/// 9x9 uniform box blur.
pub const BOX_BLUR_9X9: [f32; 81] = [1.0 / 81.0; 81];

/// The fixed kernels that can be selected by name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum KernelPreset {
    /// No-op kernel.
    #[default]
    Identity,
    /// Edge detection, see [`EDGE_DETECT_3X3`].
    EdgeDetect,
    /// Sharpen, see [`SHARPEN_3X3`].
    Sharpen,
    /// 5x5 Gaussian blur, see [`GAUSSIAN_BLUR_5X5`].
    GaussianBlur,
    /// 9x9 box blur, see [`BOX_BLUR_9X9`].
    BoxBlur,
}

impl KernelPreset {
    /// Every preset, in declaration order.
    pub const ALL: [KernelPreset; 5] = [
        KernelPreset::Identity,
        KernelPreset::EdgeDetect,
        KernelPreset::Sharpen,
        KernelPreset::GaussianBlur,
        KernelPreset::BoxBlur,
    ];

    /// The row-major weight table of the preset.
    pub fn weights(&self) -> &'static [f32] {
        match self {
            KernelPreset::Identity => &IDENTITY_3X3,
            KernelPreset::EdgeDetect => &EDGE_DETECT_3X3,
            KernelPreset::Sharpen => &SHARPEN_3X3,
            KernelPreset::GaussianBlur => &GAUSSIAN_BLUR_5X5,
            KernelPreset::BoxBlur => &BOX_BLUR_9X9,
        }
    }

    /// Side length of the preset kernel.
    pub fn side(&self) -> usize {
        match self {
            KernelPreset::Identity | KernelPreset::EdgeDetect | KernelPreset::Sharpen => 3,
            KernelPreset::GaussianBlur => 5,
            KernelPreset::BoxBlur => 9,
        }
    }

    /// Build the [`Kernel`] for this preset.
    ///
    /// # Returns
    ///
    /// A kernel holding a copy of the preset table.
    pub fn kernel(&self) -> Kernel {
        Kernel::from_table(self.side(), self.weights())
    }

    /// The snake_case name of the preset.
    pub fn name(&self) -> &'static str {
        match self {
            KernelPreset::Identity => "identity",
            KernelPreset::EdgeDetect => "edge_detect",
            KernelPreset::Sharpen => "sharpen",
            KernelPreset::GaussianBlur => "gaussian_blur",
            KernelPreset::BoxBlur => "box_blur",
        }
    }
}

impl fmt::Display for KernelPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KernelPreset {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "identity" | "nothing" => Ok(KernelPreset::Identity),
            "edge_detect" => Ok(KernelPreset::EdgeDetect),
            "sharpen" => Ok(KernelPreset::Sharpen),
            "gaussian_blur" => Ok(KernelPreset::GaussianBlur),
            "box_blur" => Ok(KernelPreset::BoxBlur),
            _ => Err(FilterError::UnknownPreset(s.to_string())),
        }
    }
}
