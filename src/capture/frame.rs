//! Frame data structures for captured chart images

use image::{DynamicImage, GrayImage, RgbaImage};
use std::time::Instant;

use crate::vision::geometry::BoundingBox;

/// A still frame the detections were produced from
#[derive(Debug, Clone)]
pub struct Frame {
    /// RGBA pixel data
    pub image: RgbaImage,
    /// Timestamp when frame was captured
    pub timestamp: Instant,
}

impl Frame {
    /// Create a new frame from RGBA pixels
    pub fn new(image: RgbaImage) -> Self {
        Self {
            image,
            timestamp: Instant::now(),
        }
    }

    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self::new(image.to_rgba8())
    }

    /// Get frame dimensions as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Grayscale crop of a detection box, clamped to the frame
    ///
    /// Boxes lying entirely outside the frame give an empty image.
    pub fn crop_gray(&self, bounds: &BoundingBox) -> GrayImage {
        let (width, height) = self.dimensions();
        let clamp = |v: i32, max: u32| v.clamp(0, max as i32) as u32;

        let x0 = clamp(bounds.left(), width);
        let y0 = clamp(bounds.top(), height);
        let x1 = clamp(bounds.right(), width);
        let y1 = clamp(bounds.bottom(), height);

        if x1 <= x0 || y1 <= y0 {
            return GrayImage::new(0, 0);
        }

        let region = image::imageops::crop_imm(&self.image, x0, y0, x1 - x0, y1 - y0).to_image();
        DynamicImage::ImageRgba8(region).to_luma8()
    }
}
