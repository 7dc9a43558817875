//! Label crop preprocessing for OCR
//!
//! Axis labels are small and often low contrast. These optional filters run
//! on the grayscale crop of each label box before it is handed to the text
//! recognizer.

use image::imageops::FilterType;
use image::GrayImage;
use tracing::debug;

use crate::config::OcrPreprocessing;

/// Crops smaller than this (either side) are upscaled before recognition
pub const MIN_OCR_DIMENSION: u32 = 80;

/// Apply preprocessing filters to a grayscale label crop
pub fn preprocess_region(region: &GrayImage, settings: &OcrPreprocessing) -> GrayImage {
    if !settings.enabled || region.width() == 0 || region.height() == 0 {
        return region.clone();
    }

    let scale = effective_scale(region.width(), region.height(), settings);
    debug!(
        "Preprocessing {}x{} label crop: scale={}, contrast={}, sharpen={}, invert={}",
        region.width(),
        region.height(),
        scale,
        settings.contrast,
        settings.sharpen,
        settings.invert
    );

    // Upscale first so the remaining filters work at full resolution
    let mut result = if scale > 1 {
        image::imageops::resize(
            region,
            region.width() * scale,
            region.height() * scale,
            FilterType::Triangle,
        )
    } else {
        region.clone()
    };

    if (settings.contrast - 1.0).abs() > 0.01 {
        apply_contrast(&mut result, settings.contrast);
    }

    if settings.sharpen > 0.01 {
        result = apply_sharpen(&result, settings.sharpen);
    }

    // Invert last (light text on dark chart backgrounds)
    if settings.invert {
        image::imageops::invert(&mut result);
    }

    result
}

/// User scale merged with automatic upscaling of small crops (2x - 4x)
pub fn effective_scale(width: u32, height: u32, settings: &OcrPreprocessing) -> u32 {
    let user_scale = settings.scale.max(1);
    if !settings.auto_upscale || (width >= MIN_OCR_DIMENSION && height >= MIN_OCR_DIMENSION) {
        return user_scale;
    }

    let side_scale = |side: u32| MIN_OCR_DIMENSION.div_ceil(side.max(1));
    let auto_scale = side_scale(width).max(side_scale(height)).clamp(2, 4);
    user_scale.max(auto_scale)
}

/// Stretch contrast around mid-grey; factor > 1.0 increases contrast
fn apply_contrast(image: &mut GrayImage, factor: f32) {
    for px in image.pixels_mut() {
        let val = px.0[0] as f32;
        px.0[0] = ((val - 128.0) * factor + 128.0).clamp(0.0, 255.0) as u8;
    }
}

/// 3x3 sharpen kernel: center 1 + 4*strength, direct neighbours -strength
fn apply_sharpen(image: &GrayImage, strength: f32) -> GrayImage {
    let (w, h) = image.dimensions();
    let mut result = image.clone();
    if w < 3 || h < 3 {
        return result;
    }

    let center_weight = 1.0 + 4.0 * strength;
    let at = |x: u32, y: u32| image.get_pixel(x, y).0[0] as f32;

    // Edge pixels are left as-is
    for y in 1..(h - 1) {
        for x in 1..(w - 1) {
            let neighbours = at(x, y - 1) + at(x, y + 1) + at(x - 1, y) + at(x + 1, y);
            let sharpened = at(x, y) * center_weight - neighbours * strength;
            result.get_pixel_mut(x, y).0[0] = sharpened.clamp(0.0, 255.0) as u8;
        }
    }

    result
}
