//! Chart extraction pipeline
//!
//! detections + frame -> label parsing -> outlier rejection -> axis
//! calibration -> bar/label alignment -> [`ExtractionResult`]

use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::analysis::alignment::{AlignedEntry, Aligner};
use crate::analysis::calibration::{Calibration, CalibrationLabel};
use crate::analysis::describe::describe;
use crate::analysis::labels::{parse_text_label, parse_y_label};
use crate::analysis::outliers::filter_outliers_with_fence;
use crate::capture::Frame;
use crate::config::{AppConfig, ExtractionSettings};
use crate::error::ExtractionError;
use crate::vision::{recognize_label, BoundingBox, Detection, DetectionClass, RawDetection, TextRecognizer, XLabel, YLabel};

/// Structured data read off one bar chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionResult {
    /// Categories left to right with their values
    pub entries: Vec<AlignedEntry>,
    /// Unit prefix shared by all values (e.g. "$")
    pub prefix: String,
    /// Unit suffix shared by all values (e.g. "%")
    pub suffix: String,
    /// Value of the lowest calibration label
    pub axis_bottom: f64,
    /// Value of the highest calibration label
    pub axis_top: f64,
}

impl ExtractionResult {
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.value).collect()
    }

    /// One sentence per entry
    pub fn describe(&self) -> String {
        describe(&self.labels(), &self.values(), &self.prefix, &self.suffix)
    }
}

/// Run text recognition on every label box and build typed detections
///
/// Boxes with an unknown class are skipped.
pub fn recognize_detections(
    raw: &[RawDetection],
    frame: &Frame,
    recognizer: &dyn TextRecognizer,
    config: &AppConfig,
) -> Vec<Detection> {
    let mut detections = Vec::with_capacity(raw.len());

    for det in raw {
        let class = match det.class.resolve(&config.detection.class_names) {
            Ok(class) => class,
            Err(e) => {
                warn!("Skipping detection at {:?}: {}", det.bounds, e);
                continue;
            }
        };

        let detection = match class {
            DetectionClass::Bar => Detection::Bar(det.bounds),
            DetectionClass::XLabel => {
                let raw_text = recognize_label(frame, &det.bounds, class, recognizer, &config.preprocessing);
                Detection::XLabel(XLabel {
                    bounds: det.bounds,
                    text: parse_text_label(&raw_text),
                })
            }
            DetectionClass::YLabel => {
                let raw_text = recognize_label(frame, &det.bounds, class, recognizer, &config.preprocessing);
                let value = parse_y_label(&raw_text);
                if !value.is_valid() {
                    debug!("Y label at {:?} is not numeric: {:?}", det.bounds, raw_text);
                }
                Detection::YLabel(YLabel {
                    bounds: det.bounds,
                    text: parse_text_label(&raw_text),
                    value,
                })
            }
        };
        detections.push(detection);
    }

    detections
}

/// Extract chart data from already recognized detections
pub fn extract(detections: Vec<Detection>, settings: &ExtractionSettings) -> Result<ExtractionResult, ExtractionError> {
    let mut bars: Vec<BoundingBox> = Vec::new();
    let mut x_labels: Vec<XLabel> = Vec::new();
    let mut y_labels: Vec<CalibrationLabel> = Vec::new();
    let mut invalid_y = 0;

    for detection in detections {
        match detection {
            Detection::Bar(bounds) => bars.push(bounds),
            Detection::XLabel(label) => x_labels.push(label),
            Detection::YLabel(label) => match CalibrationLabel::from_y_label(&label) {
                Some(cal) => y_labels.push(cal),
                None => invalid_y += 1,
            },
        }
    }

    let bar_count = bars.len();
    let mut bars = filter_outliers_with_fence(
        bars,
        |b| b.bottom() as f64,
        settings.iqr_fence,
        settings.bar_baseline_offset,
    );
    bars.sort_by_key(|b| b.center_x());

    let label_count = x_labels.len();
    let mut x_labels = filter_outliers_with_fence(
        x_labels,
        |l| l.bounds.center_y() as f64,
        settings.iqr_fence,
        settings.label_band_offset,
    );
    x_labels.sort_by_key(|l| l.bounds.center_x());

    debug!(
        "Kept {}/{} bars, {}/{} x labels, {} valid y labels ({} unreadable)",
        bars.len(),
        bar_count,
        x_labels.len(),
        label_count,
        y_labels.len(),
        invalid_y
    );

    let calibration = Calibration::from_labels(y_labels)?;
    let entries = Aligner::new(&calibration)
        .with_unknown_label(&settings.unknown_label)
        .align(&bars, &x_labels);

    Ok(ExtractionResult {
        entries,
        prefix: calibration.prefix(),
        suffix: calibration.suffix(),
        axis_bottom: calibration.bottom_value(),
        axis_top: calibration.top_value(),
    })
}

/// Extract chart data from raw detector output and the frame it came from
pub fn extract_data(
    raw: &[RawDetection],
    frame: &Frame,
    recognizer: &dyn TextRecognizer,
    config: &AppConfig,
) -> Result<ExtractionResult, ExtractionError> {
    let start = Instant::now();
    let detections = recognize_detections(raw, frame, recognizer, config);
    let result = extract(detections, &config.extraction)?;

    info!(
        "Extracted {} entries in {:?} (axis {}..{})",
        result.entries.len(),
        start.elapsed(),
        result.axis_bottom,
        result.axis_top
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::alignment::UNKNOWN_LABEL;
    use crate::vision::TranscriptRecognizer;
    use image::RgbaImage;

    fn bar(cx: i32, height: i32) -> RawDetection {
        RawDetection::new(DetectionClass::Bar, BoundingBox::new(cx - 10, 400 - height, cx + 10, 400))
    }

    fn x_label(cx: i32, text: &str) -> RawDetection {
        RawDetection::new(DetectionClass::XLabel, BoundingBox::new(cx - 15, 410, cx + 15, 430)).with_text(text)
    }

    fn y_label(row: i32, text: &str) -> RawDetection {
        RawDetection::new(DetectionClass::YLabel, BoundingBox::new(10, row - 6, 40, row + 6)).with_text(text)
    }

    fn run(raw: &[RawDetection]) -> Result<ExtractionResult, ExtractionError> {
        let frame = Frame::new(RgbaImage::new(640, 480));
        let recognizer = TranscriptRecognizer::from_detections(raw);
        extract_data(raw, &frame, &recognizer, &AppConfig::default())
    }

    #[test]
    fn test_full_chart() {
        let raw = vec![
            y_label(400, "$0"),
            y_label(250, "$50"),
            y_label(100, "$1OO"),
            bar(300, 30),
            bar(100, 150),
            bar(200, 300),
            x_label(200, "Feb."),
            x_label(100, "Jan,"),
            x_label(300, "Mar"),
        ];

        let result = run(&raw).unwrap();
        assert_eq!(result.labels(), vec!["Jan", "Feb", "Mar"]);
        assert_eq!(result.prefix, "$");
        assert_eq!(result.suffix, "");
        assert_eq!(result.axis_bottom, 0.0);
        assert_eq!(result.axis_top, 100.0);
        assert_eq!(
            result.describe(),
            "The value of Jan is $50.00.\nThe value of Feb is $100.00.\nThe value of Mar is $10.00.\n"
        );
    }

    #[test]
    fn test_single_valid_y_label_fails() {
        let raw = vec![y_label(400, "0"), y_label(100, "abc"), bar(100, 150), x_label(100, "A")];
        assert_eq!(run(&raw), Err(ExtractionError::InsufficientCalibration { found: 1 }));
    }

    #[test]
    fn test_outlier_bar_is_dropped() {
        let mut raw = vec![y_label(400, "0"), y_label(100, "100%")];
        raw.extend([bar(100, 150), bar(200, 60), bar(300, 90), bar(400, 120)]);
        // Legend swatch detected as a bar far above the baseline
        raw.push(RawDetection::new(DetectionClass::Bar, BoundingBox::new(500, 20, 520, 40)));

        let result = run(&raw).unwrap();
        assert_eq!(result.entries.len(), 4);
        assert!(result.labels().iter().all(|l| *l == UNKNOWN_LABEL));
        assert_eq!(result.suffix, "%");
    }

    #[test]
    fn test_missing_text_yields_empty_label() {
        let raw = vec![
            y_label(400, "0"),
            y_label(100, "30"),
            bar(100, 150),
            RawDetection::new(DetectionClass::XLabel, BoundingBox::new(85, 410, 115, 430)),
        ];
        let result = run(&raw).unwrap();
        assert_eq!(result.labels(), vec![""]);
        assert!((result.values()[0] - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_class_skipped() {
        let mut raw = vec![y_label(400, "0"), y_label(100, "10"), bar(100, 300)];
        raw.push(RawDetection {
            class: crate::vision::ClassRef::Index(7),
            bounds: BoundingBox::new(0, 0, 5, 5),
            text: None,
            confidence: None,
        });
        let result = run(&raw).unwrap();
        assert_eq!(result.entries.len(), 1);
        assert!((result.entries[0].value - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_extract_without_bars_or_labels() {
        let detections = vec![
            Detection::YLabel(YLabel {
                bounds: BoundingBox::new(0, 390, 10, 410),
                text: "0".to_string(),
                value: parse_y_label("0"),
            }),
            Detection::YLabel(YLabel {
                bounds: BoundingBox::new(0, 90, 10, 110),
                text: "5".to_string(),
                value: parse_y_label("5"),
            }),
        ];
        let result = extract(detections, &ExtractionSettings::default()).unwrap();
        assert!(result.entries.is_empty());
        assert_eq!(result.describe(), "");
    }
}
