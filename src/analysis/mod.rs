//! Chart analysis
//!
//! Turns recognized detections into an ordered series of (label, value)
//! pairs and renders them as sentences.

pub mod alignment;
pub mod calibration;
pub mod describe;
pub mod labels;
pub mod outliers;
pub mod pipeline;

pub use alignment::{AlignedEntry, Aligner, UNKNOWN_LABEL};
pub use calibration::{Calibration, CalibrationLabel, CalibrationPair};
pub use describe::describe;
pub use labels::{parse_text_label, parse_y_label, try_parse_y_label, AxisValue, YLabelValue};
pub use outliers::filter_outliers;
pub use pipeline::{extract, extract_data, recognize_detections, ExtractionResult};
