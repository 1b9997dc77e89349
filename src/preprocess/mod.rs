//! Image preprocessing.
//!
//! Turns encoded image bytes into the fixed set of pixel stages the detector
//! and labeler work from:
//!
//! 1. decode to an RGB raster
//! 2. grayscale
//! 3. 5x5 Gaussian smoothing
//! 4. Canny edges with the (50, 150) gradient threshold pair
//! 5. 3x3 square dilation so hand-drawn outlines with small gaps stay closed
//!
//! The pipeline is deterministic and has no configuration; a decode failure
//! is the only way it can fail.

use image::{DynamicImage, GrayImage, RgbImage};
use imageproc::distance_transform::Norm;
use imageproc::edges::canny;
use imageproc::filter::separable_filter_equal;
use imageproc::morphology::dilate;
use tracing::{debug, info};

use crate::error::SketchError;

/// Normalised 5-tap binomial kernel; applied along both axes it is the
/// standard 5x5 Gaussian.
pub const GAUSSIAN_KERNEL_5: [f32; 5] = [0.0625, 0.25, 0.375, 0.25, 0.0625];

/// Gradient magnitude below which a pixel is never an edge.
pub const CANNY_LOW_THRESHOLD: f32 = 50.0;

/// Gradient magnitude above which a pixel is always an edge.
pub const CANNY_HIGH_THRESHOLD: f32 = 150.0;

/// Chebyshev radius of the dilation element (1 => 3x3 square).
pub const DILATION_RADIUS: u8 = 1;

/// Every stage of a preprocessed image.
///
/// Produced once per request and read by the detector and labeler; never
/// modified after construction.
#[derive(Clone, Debug)]
pub struct PixelImage {
    pub original: RgbImage,
    pub gray: GrayImage,
    pub blurred: GrayImage,
    pub edges: GrayImage,
    pub dilated: GrayImage,
}

impl PixelImage {
    /// Runs the grayscale/blur/edge/dilate stages on an already decoded image.
    pub fn from_dynamic(image: &DynamicImage) -> Self {
        let original = image.to_rgb8();
        let gray = image.to_luma8();
        let blurred = separable_filter_equal(&gray, &GAUSSIAN_KERNEL_5);
        let edges = canny(&blurred, CANNY_LOW_THRESHOLD, CANNY_HIGH_THRESHOLD);
        let dilated = dilate(&edges, Norm::LInf, DILATION_RADIUS);

        Self {
            original,
            gray,
            blurred,
            edges,
            dilated,
        }
    }

    /// Width of the image in pixels.
    pub fn width(&self) -> u32 {
        self.gray.width()
    }

    /// Height of the image in pixels.
    pub fn height(&self) -> u32 {
        self.gray.height()
    }
}

/// Decodes raw image bytes (PNG or JPEG) and runs every preprocessing stage.
///
/// # Errors
/// Returns [`SketchError::Decode`] if the bytes are not a decodable image.
pub fn process_image(bytes: &[u8]) -> Result<PixelImage, SketchError> {
    debug!(bytes = bytes.len(), "decoding image");
    let decoded = image::load_from_memory(bytes)?;
    let processed = PixelImage::from_dynamic(&decoded);

    let edge_pixels = processed.edges.pixels().filter(|p| p.0[0] > 0).count();
    info!(
        width = processed.width(),
        height = processed.height(),
        edge_pixels,
        "image processed"
    );
    Ok(processed)
}
