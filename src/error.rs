//! Error types for chart extraction

use thiserror::Error;

/// Failure parsing a y-axis label into a calibration value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LabelError {
    /// The cleaned text is not `<prefix><number><suffix>`
    #[error("label text {text:?} is not a numeric axis value")]
    InvalidLabelText { text: String },
}

/// Failure resolving a detector class
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectionError {
    #[error("unknown detection class name {0:?}")]
    UnknownClassName(String),
    #[error("detection class index {index} is outside the class table (len {len})")]
    ClassIndexOutOfRange { index: usize, len: usize },
}

/// Fatal failure of a whole chart extraction
///
/// Everything else (outliers, unreadable labels, unmatched bars) is absorbed
/// inside the pipeline. Callers should treat these as "no result for this
/// frame" rather than a crash.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractionError {
    /// Fewer than two readable y-axis labels
    #[error("need at least 2 valid y-axis labels for calibration, found {found}")]
    InsufficientCalibration { found: usize },
    /// Both calibration labels carry the same value
    #[error("calibration labels share the same value {value}")]
    DegenerateCalibration { value: f64 },
    /// Both calibration labels sit on the same pixel row
    #[error("calibration labels share the same pixel row {row}")]
    DegeneratePixelSpan { row: i32 },
}
