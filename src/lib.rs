//! chart-reader - Bar chart data extraction for spoken descriptions
//!
//! Takes object-detection boxes (bars, x-axis labels, y-axis labels) and the
//! text read from the label boxes, and produces an ordered series of
//! (category, value) pairs with the shared unit prefix/suffix, ready to be
//! rendered as sentences.

pub mod analysis;
pub mod app;
pub mod capture;
pub mod config;
pub mod error;
pub mod shared;
pub mod storage;
pub mod vision;

pub use analysis::{describe, extract_data, ExtractionResult};
pub use app::ChartReaderApp;
pub use capture::Frame;
pub use config::AppConfig;
pub use error::{DetectionError, ExtractionError, LabelError};
pub use vision::{BoundingBox, RawDetection, TextRecognizer};
