//! # Image preprocessing for OCR
//!
//! Turns a photo into a pure black/white page: composite alpha over white, convert to luminance,
//! pick a global threshold with Otsu's method and binarize. Dark text on a light background is
//! assumed, so nothing is inverted.
//!
//! Every function here is pure: same bytes in, same pixels out.

use std::io::Cursor;

use image::{ImageFormat, Luma};
use thiserror::Error;

pub use image::{DynamicImage, GrayImage};

/// Pixel value for background after binarization.
pub const WHITE: u8 = 255;
/// Pixel value for ink after binarization.
pub const BLACK: u8 = 0;

#[derive(Error, Debug)]
pub enum PreprocessError {
    #[error("cannot decode image: {0}")]
    Decode(String),

    #[error("cannot encode image: {0}")]
    Encode(String),
}

/// Decodes raster bytes (JPEG, PNG, WebP, BMP, GIF).
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, PreprocessError> {
    image::load_from_memory(bytes).map_err(|e| PreprocessError::Decode(e.to_string()))
}

/// Decodes `bytes` and returns the binarized page.
pub fn preprocess(bytes: &[u8]) -> Result<GrayImage, PreprocessError> {
    Ok(preprocess_image(&decode(bytes)?))
}

/// Grayscale + Otsu binarization of an already decoded image.
pub fn preprocess_image(image: &DynamicImage) -> GrayImage {
    let gray = to_grayscale(image);
    let threshold = otsu_threshold(&gray);
    binarize(&gray, threshold)
}

/// Rec. 601 luminance; transparent pixels are composited over white first so that screenshots
/// with an alpha channel keep a light background.
pub fn to_grayscale(image: &DynamicImage) -> GrayImage {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();

    GrayImage::from_fn(width, height, |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = f32::from(a) / 255.0;
        let over_white = |c: u8| f32::from(c) * alpha + 255.0 * (1.0 - alpha);
        let value = 0.299 * over_white(r) + 0.587 * over_white(g) + 0.114 * over_white(b);
        Luma([value.round().clamp(0.0, 255.0) as u8])
    })
}

/// Otsu's method: the threshold `t` that maximizes between-class variance (equivalently,
/// minimizes intra-class variance) when splitting the histogram into `<= t` and `> t`.
///
/// Ties keep the lowest `t`. Single-valued images return 0.
pub fn otsu_threshold(image: &GrayImage) -> u8 {
    let mut histogram = [0u64; 256];
    for pixel in image.pixels() {
        histogram[pixel[0] as usize] += 1;
    }

    let total: u64 = histogram.iter().sum();
    if total == 0 {
        return 0;
    }
    let weighted_total: f64 = histogram
        .iter()
        .enumerate()
        .map(|(value, &count)| value as f64 * count as f64)
        .sum();

    let mut best_threshold = 0u8;
    let mut best_variance = 0.0f64;
    let mut background_weight = 0u64;
    let mut background_sum = 0.0f64;

    for (t, &count) in histogram.iter().enumerate() {
        background_weight += count;
        background_sum += t as f64 * count as f64;
        if background_weight == 0 {
            continue;
        }
        let foreground_weight = total - background_weight;
        if foreground_weight == 0 {
            break;
        }

        let background_mean = background_sum / background_weight as f64;
        let foreground_mean = (weighted_total - background_sum) / foreground_weight as f64;
        let diff = background_mean - foreground_mean;
        let variance = background_weight as f64 * foreground_weight as f64 * diff * diff;

        if variance > best_variance {
            best_variance = variance;
            best_threshold = t as u8;
        }
    }

    best_threshold
}

/// Maps pixels `<= threshold` to [`BLACK`] and the rest to [`WHITE`].
pub fn binarize(image: &GrayImage, threshold: u8) -> GrayImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        pixel[0] = if pixel[0] > threshold { WHITE } else { BLACK };
    }
    out
}

/// Serializes an image as PNG, the format handed to OCR backends.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, PreprocessError> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| PreprocessError::Encode(e.to_string()))?;
    Ok(buf.into_inner())
}
