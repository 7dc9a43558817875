//! Vision Layer
//!
//! Detection data model and the seam to an external text recognizer.
//! Detection itself and OCR run outside this crate; label boxes are cropped
//! from the frame, optionally preprocessed, and handed to a
//! [`TextRecognizer`].

pub mod detection;
pub mod geometry;
pub mod ocr_preprocess;
pub mod transcript;

use anyhow::Result;
use image::GrayImage;
use std::time::Instant;
use tracing::{debug, warn};

use crate::capture::Frame;
use crate::config::OcrPreprocessing;

pub use detection::{ClassRef, Detection, DetectionClass, DetectionSet, RawDetection, XLabel, YLabel};
pub use geometry::BoundingBox;
pub use ocr_preprocess::preprocess_region;
pub use transcript::TranscriptRecognizer;

/// A cropped label region ready for text recognition
#[derive(Debug, Clone, Copy)]
pub struct LabelRegion<'a> {
    /// Box the crop was taken from, in frame coordinates
    pub bounds: BoundingBox,
    /// Kind of label being read
    pub class: DetectionClass,
    /// Grayscale (and possibly preprocessed) pixels
    pub image: &'a GrayImage,
}

/// External text recognition engine
///
/// Called once per label detection. Implementations may block; the
/// extraction pipeline imposes no timeout or retry policy.
pub trait TextRecognizer: Send + Sync {
    fn recognize(&self, region: &LabelRegion<'_>) -> Result<String>;
}

impl<F> TextRecognizer for F
where
    F: Fn(&LabelRegion<'_>) -> Result<String> + Send + Sync,
{
    fn recognize(&self, region: &LabelRegion<'_>) -> Result<String> {
        self(region)
    }
}

/// Crop, preprocess and recognize one label box
///
/// Recognition failures are logged and read as empty text, so a single bad
/// crop never aborts a whole extraction.
pub fn recognize_label(
    frame: &Frame,
    bounds: &BoundingBox,
    class: DetectionClass,
    recognizer: &dyn TextRecognizer,
    preprocessing: &OcrPreprocessing,
) -> String {
    let start = Instant::now();
    let crop = frame.crop_gray(bounds);
    let processed = preprocess_region(&crop, preprocessing);

    let region = LabelRegion {
        bounds: *bounds,
        class,
        image: &processed,
    };

    match recognizer.recognize(&region) {
        Ok(text) => {
            debug!("Recognized {:?} at {:?} in {:?}: {:?}", class, bounds, start.elapsed(), text);
            text
        }
        Err(e) => {
            warn!("Text recognition failed for {:?} at {:?}: {:#}", class, bounds, e);
            String::new()
        }
    }
}
