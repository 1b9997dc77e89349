//! Preparation of a component's pixel region for OCR.
//!
//! Sketch photos have uneven lighting and stroke pressure, so the crop is
//! binarized against its local mean rather than one global level:
//!
//! 1. crop the grayscale image to the box plus a margin
//! 2. median filter (smooths paper texture, keeps stroke edges)
//! 3. adaptive mean threshold, strokes become foreground
//! 4. morphological closing to reconnect broken strokes
//! 5. invert back to dark text on white, which the OCR engine expects

use image::{imageops, GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::filter::median_filter;
use imageproc::morphology::close;

use super::LabelerConfig;
use crate::ir::BBox;

/// Crops and cleans the region under `bbox`.
///
/// Returns `None` if the clipped region is empty.
pub fn prepare_region(gray: &GrayImage, bbox: &BBox, config: &LabelerConfig) -> Option<GrayImage> {
    let region = bbox.expand_clamped(config.margin, gray.width(), gray.height());
    if !region.is_valid() {
        return None;
    }

    let crop = imageops::crop_imm(
        gray,
        region.x as u32,
        region.y as u32,
        region.width as u32,
        region.height as u32,
    )
    .to_image();

    let smoothed = median_filter(&crop, config.median_radius, config.median_radius);
    let strokes = adaptive_threshold_inv(
        &smoothed,
        config.threshold_block_radius,
        config.threshold_offset,
    );
    let closed = close(&strokes, Norm::LInf, config.closing_radius);

    let mut text = closed;
    imageops::invert(&mut text);
    Some(text)
}

/// Marks pixels darker than their local mean minus `offset` as foreground (255).
///
/// The mean is taken over a `(2r + 1)` square window clipped to the image,
/// computed from an integral image.
pub fn adaptive_threshold_inv(image: &GrayImage, block_radius: u32, offset: f64) -> GrayImage {
    let (w, h) = (image.width() as usize, image.height() as usize);
    let iw = w + 1;
    let mut integral = vec![0u64; iw * (h + 1)];

    for y in 0..h {
        let mut row_sum = 0u64;
        for x in 0..w {
            row_sum += image.get_pixel(x as u32, y as u32).0[0] as u64;
            integral[(y + 1) * iw + (x + 1)] = row_sum + integral[y * iw + (x + 1)];
        }
    }

    let r = block_radius as usize;
    let mut out = GrayImage::new(w as u32, h as u32);
    for y in 0..h {
        let y0 = y.saturating_sub(r);
        let y1 = (y + r + 1).min(h);
        for x in 0..w {
            let x0 = x.saturating_sub(r);
            let x1 = (x + r + 1).min(w);

            let sum = integral[y1 * iw + x1] + integral[y0 * iw + x0]
                - integral[y0 * iw + x1]
                - integral[y1 * iw + x0];
            let mean = sum as f64 / ((y1 - y0) * (x1 - x0)) as f64;

            let value = image.get_pixel(x as u32, y as u32).0[0] as f64;
            if value <= mean - offset {
                out.put_pixel(x as u32, y as u32, Luma([255]));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_image_has_no_foreground() {
        let image = GrayImage::from_pixel(20, 20, Luma([180]));
        let out = adaptive_threshold_inv(&image, 5, 2.0);
        assert!(out.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn test_dark_stroke_is_foreground_under_uneven_light() {
        // Left half lit at 220, right half at 120; a dark stroke on each side.
        let mut image =
            GrayImage::from_fn(40, 20, |x, _| if x < 20 { Luma([220]) } else { Luma([120]) });
        for y in 5..15 {
            image.put_pixel(8, y, Luma([150]));
            image.put_pixel(30, y, Luma([40]));
        }
        let out = adaptive_threshold_inv(&image, 3, 2.0);

        assert_eq!(out.get_pixel(8, 10).0[0], 255);
        assert_eq!(out.get_pixel(30, 10).0[0], 255);
        assert_eq!(out.get_pixel(2, 10).0[0], 0);
    }

    #[test]
    fn test_prepare_region_is_dark_on_light() {
        let mut gray = GrayImage::from_pixel(100, 60, Luma([230]));
        for x in 30..70 {
            for y in 28..32 {
                gray.put_pixel(x, y, Luma([20]));
            }
        }
        let config = LabelerConfig::default();
        let region = prepare_region(&gray, &BBox::new(20, 20, 60, 20), &config).unwrap();

        // margin 5 on each side
        assert_eq!(region.dimensions(), (70, 30));
        // Stroke (rows 13..17 of the crop) is dark, paper is light.
        assert_eq!(region.get_pixel(25, 14).0[0], 0);
        assert_eq!(region.get_pixel(2, 2).0[0], 255);
    }

    #[test]
    fn test_prepare_region_outside_image() {
        let gray = GrayImage::from_pixel(10, 10, Luma([255]));
        let config = LabelerConfig::default();
        assert!(prepare_region(&gray, &BBox::new(50, 50, 10, 10), &config).is_none());
    }
}
