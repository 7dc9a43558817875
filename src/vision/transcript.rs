//! Recognizer backed by text supplied with the detections
//!
//! Some detector front-ends run OCR themselves and ship the text next to
//! each box. This recognizer replays that text for the matching box.

use anyhow::Result;
use std::collections::HashMap;
use tracing::debug;

use super::{BoundingBox, LabelRegion, RawDetection, TextRecognizer};

/// Text recognizer answering from pre-recognized label text
#[derive(Debug, Clone, Default)]
pub struct TranscriptRecognizer {
    texts: HashMap<BoundingBox, String>,
}

impl TranscriptRecognizer {
    /// Collect the text carried by each detection
    pub fn from_detections(detections: &[RawDetection]) -> Self {
        let texts = detections
            .iter()
            .filter_map(|d| d.text.as_ref().map(|text| (d.bounds, text.clone())))
            .collect();
        Self { texts }
    }
}

impl TextRecognizer for TranscriptRecognizer {
    fn recognize(&self, region: &LabelRegion<'_>) -> Result<String> {
        match self.texts.get(&region.bounds) {
            Some(text) => Ok(text.clone()),
            None => {
                debug!("No transcript for {:?} at {:?}", region.class, region.bounds);
                Ok(String::new())
            }
        }
    }
}
