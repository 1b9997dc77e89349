#![allow(dead_code)]

use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

pub const PAPER: Rgb<u8> = Rgb([250, 250, 250]);
pub const INK: Rgb<u8> = Rgb([20, 20, 20]);

/// Draws a rectangle outline `thickness` pixels wide, growing inward.
pub fn draw_rect(image: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, thickness: u32) {
    for py in y..y + h {
        for px in x..x + w {
            let on_border = px < x + thickness
                || px >= x + w - thickness
                || py < y + thickness
                || py >= y + h - thickness;
            if on_border {
                image.put_pixel(px, py, INK);
            }
        }
    }
}

/// A white sheet with the given outlines drawn 3 pixels thick.
pub fn sketch(width: u32, height: u32, rects: &[(u32, u32, u32, u32)]) -> RgbImage {
    let mut image = RgbImage::from_pixel(width, height, PAPER);
    for &(x, y, w, h) in rects {
        draw_rect(&mut image, x, y, w, h, 3);
    }
    image
}

pub fn png_bytes(image: &RgbImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(image.clone())
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode png");
    bytes
}

/// Login-form style sketch: an input field above a button.
pub fn form_sketch() -> RgbImage {
    sketch(400, 260, &[(40, 40, 240, 40), (40, 140, 100, 50)])
}

pub fn write_png(path: &Path, image: &RgbImage) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, png_bytes(image)).expect("write png file");
}
