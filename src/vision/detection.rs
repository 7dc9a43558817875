//! Chart element detections
//!
//! The object detector reports boxes tagged with a class index. This module
//! resolves those indices into chart element kinds and holds the per-kind
//! data the extraction pipeline works on.

use serde::{Deserialize, Serialize};

use crate::analysis::labels::{AxisValue, YLabelValue};
use crate::error::DetectionError;
use crate::vision::geometry::BoundingBox;

/// Kind of chart element a box was detected as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionClass {
    /// A single bar of the series
    Bar,
    /// Category label under the x axis
    #[serde(rename = "x", alias = "x_label")]
    XLabel,
    /// Numeric tick label beside the y axis
    #[serde(rename = "y", alias = "y_label")]
    YLabel,
}

impl DetectionClass {
    /// Resolve a class name ("bar", "x", "y" and long aliases)
    pub fn from_name(name: &str) -> Result<Self, DetectionError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "bar" => Ok(DetectionClass::Bar),
            "x" | "x_label" => Ok(DetectionClass::XLabel),
            "y" | "y_label" => Ok(DetectionClass::YLabel),
            _ => Err(DetectionError::UnknownClassName(name.to_string())),
        }
    }

    /// Resolve a detector class index through the model's class name table
    pub fn from_index(index: usize, class_names: &[String]) -> Result<Self, DetectionError> {
        let name = class_names.get(index).ok_or(DetectionError::ClassIndexOutOfRange {
            index,
            len: class_names.len(),
        })?;
        Self::from_name(name)
    }
}

/// Class as written in a detections file: a name or a model class index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassRef {
    Index(usize),
    Name(String),
}

impl ClassRef {
    pub fn resolve(&self, class_names: &[String]) -> Result<DetectionClass, DetectionError> {
        match self {
            ClassRef::Index(index) => DetectionClass::from_index(*index, class_names),
            ClassRef::Name(name) => DetectionClass::from_name(name),
        }
    }
}

/// One detector box before recognition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDetection {
    pub class: ClassRef,
    #[serde(rename = "box")]
    pub bounds: BoundingBox,
    /// Text already recognized for this box, if the producer ran OCR
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Detector confidence (0.0 - 1.0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl RawDetection {
    pub fn new(class: DetectionClass, bounds: BoundingBox) -> Self {
        let name = match class {
            DetectionClass::Bar => "bar",
            DetectionClass::XLabel => "x",
            DetectionClass::YLabel => "y",
        };
        Self {
            class: ClassRef::Name(name.to_string()),
            bounds,
            text: None,
            confidence: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Detections file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionSet {
    pub detections: Vec<RawDetection>,
}

/// Category label detection with cleaned text
#[derive(Debug, Clone, PartialEq)]
pub struct XLabel {
    pub bounds: BoundingBox,
    pub text: String,
}

/// Y-axis tick label with its parsed value
#[derive(Debug, Clone, PartialEq)]
pub struct YLabel {
    pub bounds: BoundingBox,
    pub text: String,
    pub value: YLabelValue,
}

impl YLabel {
    /// Calibration datum, if the label text was numeric
    pub fn axis_value(&self) -> Option<&AxisValue> {
        self.value.as_valid()
    }
}

/// A recognized chart element
#[derive(Debug, Clone, PartialEq)]
pub enum Detection {
    Bar(BoundingBox),
    XLabel(XLabel),
    YLabel(YLabel),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_names() -> Vec<String> {
        vec!["bar".to_string(), "x".to_string(), "y".to_string()]
    }

    #[test]
    fn test_class_from_index() {
        let names = default_names();
        assert_eq!(DetectionClass::from_index(0, &names), Ok(DetectionClass::Bar));
        assert_eq!(DetectionClass::from_index(1, &names), Ok(DetectionClass::XLabel));
        assert_eq!(DetectionClass::from_index(2, &names), Ok(DetectionClass::YLabel));
        assert_eq!(
            DetectionClass::from_index(3, &names),
            Err(DetectionError::ClassIndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_class_from_name_aliases() {
        assert_eq!(DetectionClass::from_name("X_Label"), Ok(DetectionClass::XLabel));
        assert_eq!(DetectionClass::from_name(" y "), Ok(DetectionClass::YLabel));
        assert!(DetectionClass::from_name("legend").is_err());
    }

    #[test]
    fn test_parse_detection_set_json() {
        let json = r#"{
            "detections": [
                {"class": "bar", "box": [10, 100, 30, 400]},
                {"class": 1, "box": [8, 410, 32, 430], "text": "Q1", "confidence": 0.91},
                {"class": "y_label", "box": [0, 390, 8, 410], "text": "0"}
            ]
        }"#;

        let set: DetectionSet = serde_json::from_str(json).unwrap();
        let names = default_names();
        let classes: Vec<DetectionClass> = set
            .detections
            .iter()
            .map(|d| d.class.resolve(&names).unwrap())
            .collect();

        assert_eq!(
            classes,
            vec![DetectionClass::Bar, DetectionClass::XLabel, DetectionClass::YLabel]
        );
        assert_eq!(set.detections[1].text.as_deref(), Some("Q1"));
        assert_eq!(set.detections[0].bounds.height(), 300);
    }

    #[test]
    fn test_y_label_axis_value() {
        let bounds = BoundingBox::new(0, 0, 10, 10);
        let unreadable = YLabel {
            bounds,
            text: "abc".to_string(),
            value: YLabelValue::Invalid,
        };
        assert!(unreadable.axis_value().is_none());

        let readable = YLabel {
            bounds,
            text: "40%".to_string(),
            value: crate::analysis::labels::parse_y_label("40%"),
        };
        assert_eq!(readable.axis_value().map(|a| a.value), Some(40.0));
    }
}
