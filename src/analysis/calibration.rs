//! Y-axis calibration: pixel rows to data values
//!
//! Two tick labels with known values pin a linear mapping between pixel
//! height and data value. Only the visually highest and lowest readable
//! labels are used; anything in between is ignored.

use tracing::debug;

use crate::analysis::labels::AxisValue;
use crate::error::ExtractionError;
use crate::vision::detection::YLabel;
use crate::vision::geometry::BoundingBox;

/// A readable y-axis label reduced to what calibration needs
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationLabel {
    pub bounds: BoundingBox,
    pub axis: AxisValue,
}

impl CalibrationLabel {
    /// Keep the label only if its text parsed as a number
    pub fn from_y_label(label: &YLabel) -> Option<Self> {
        label.axis_value().map(|axis| Self {
            bounds: label.bounds,
            axis: axis.clone(),
        })
    }

    pub fn value(&self) -> f64 {
        self.axis.value
    }

    pub fn row(&self) -> i32 {
        self.bounds.center_y()
    }
}

/// The two extreme y-axis labels
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationPair {
    /// Visually lowest label (largest center row)
    pub bottom: CalibrationLabel,
    /// Visually highest label (smallest center row)
    pub top: CalibrationLabel,
}

impl CalibrationPair {
    /// Pick the extreme labels out of all readable y-axis labels
    pub fn select(mut labels: Vec<CalibrationLabel>) -> Result<Self, ExtractionError> {
        if labels.len() < 2 {
            return Err(ExtractionError::InsufficientCalibration { found: labels.len() });
        }

        labels.sort_by_key(|label| label.row());
        let bottom = labels.pop().ok_or(ExtractionError::InsufficientCalibration { found: 0 })?;
        let top = labels.swap_remove(0);

        debug!(
            "Calibration labels: bottom {} at row {}, top {} at row {}",
            bottom.value(),
            bottom.row(),
            top.value(),
            top.row()
        );

        Ok(Self { bottom, top })
    }
}

/// Linear pixel-to-value mapping derived from a calibration pair
#[derive(Debug, Clone, PartialEq)]
pub struct Calibration {
    pair: CalibrationPair,
    ratio: f64,
}

impl Calibration {
    /// Derive the value-per-pixel slope
    ///
    /// Fails when the two labels share a value or a pixel row, since either
    /// makes the slope meaningless.
    pub fn new(pair: CalibrationPair) -> Result<Self, ExtractionError> {
        let (bottom, top) = (&pair.bottom, &pair.top);

        if bottom.value() == top.value() {
            return Err(ExtractionError::DegenerateCalibration { value: bottom.value() });
        }
        let span = bottom.row() - top.row();
        if span == 0 {
            return Err(ExtractionError::DegeneratePixelSpan { row: bottom.row() });
        }

        let ratio = (top.value() - bottom.value()) / span as f64;
        Ok(Self { pair, ratio })
    }

    /// Select the extreme labels and derive the mapping in one step
    pub fn from_labels(labels: Vec<CalibrationLabel>) -> Result<Self, ExtractionError> {
        Self::new(CalibrationPair::select(labels)?)
    }

    pub fn pair(&self) -> &CalibrationPair {
        &self.pair
    }

    /// Value per pixel
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn bottom_value(&self) -> f64 {
        self.pair.bottom.value()
    }

    pub fn top_value(&self) -> f64 {
        self.pair.top.value()
    }

    /// Data value of a bar
    ///
    /// The bar height is corrected by the offset between the baseline (the
    /// bottom label's center row) and the bar's own bottom edge.
    pub fn value_of(&self, bar: &BoundingBox) -> f64 {
        let baseline_offset = self.pair.bottom.row() - bar.bottom();
        self.ratio * (bar.height() - baseline_offset) as f64 + self.bottom_value()
    }

    /// Shared value prefix (lexicographically greatest of the two labels)
    pub fn prefix(&self) -> String {
        self.pair.bottom.axis.prefix.clone().max(self.pair.top.axis.prefix.clone())
    }

    /// Shared value suffix (lexicographically greatest of the two labels)
    pub fn suffix(&self) -> String {
        self.pair.bottom.axis.suffix.clone().max(self.pair.top.axis.suffix.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(value: f64, row: i32, prefix: &str, suffix: &str) -> CalibrationLabel {
        CalibrationLabel {
            bounds: BoundingBox::new(0, row - 5, 20, row + 5),
            axis: AxisValue {
                value,
                prefix: prefix.to_string(),
                suffix: suffix.to_string(),
            },
        }
    }

    fn zero_to_hundred() -> Calibration {
        Calibration::from_labels(vec![label(0.0, 400, "", ""), label(100.0, 100, "", "")]).unwrap()
    }

    #[test]
    fn test_bar_value_halfway() {
        let cal = zero_to_hundred();
        let bar = BoundingBox::new(50, 250, 70, 400);
        assert!((cal.value_of(&bar) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_ratio_is_positive_for_normal_chart() {
        let cal = zero_to_hundred();
        assert!((cal.ratio() - 100.0 / 300.0).abs() < 1e-12);
    }

    #[test]
    fn test_bar_at_baseline_offset_equals_bottom_value() {
        let cal = Calibration::from_labels(vec![label(10.0, 400, "", ""), label(60.0, 100, "", "")])
            .unwrap();
        // height == bottom row - bar bottom
        let bar = BoundingBox::new(0, 360, 10, 380);
        assert_eq!(cal.value_of(&bar), 10.0);
    }

    #[test]
    fn test_extremes_selected_and_middle_ignored() {
        let labels = vec![
            label(50.0, 250, "", ""),
            label(100.0, 100, "", ""),
            label(0.0, 400, "", ""),
            label(75.0, 175, "", ""),
        ];
        let pair = CalibrationPair::select(labels).unwrap();
        assert_eq!(pair.bottom.value(), 0.0);
        assert_eq!(pair.top.value(), 100.0);
    }

    #[test]
    fn test_insufficient_labels() {
        let err = Calibration::from_labels(vec![label(0.0, 400, "", "")]).unwrap_err();
        assert_eq!(err, ExtractionError::InsufficientCalibration { found: 1 });

        let err = Calibration::from_labels(vec![]).unwrap_err();
        assert_eq!(err, ExtractionError::InsufficientCalibration { found: 0 });
    }

    #[test]
    fn test_equal_values_are_degenerate() {
        let err = Calibration::from_labels(vec![label(5.0, 400, "", ""), label(5.0, 100, "", "")])
            .unwrap_err();
        assert_eq!(err, ExtractionError::DegenerateCalibration { value: 5.0 });
    }

    #[test]
    fn test_same_row_is_degenerate() {
        let err = Calibration::from_labels(vec![label(0.0, 300, "", ""), label(10.0, 300, "", "")])
            .unwrap_err();
        assert_eq!(err, ExtractionError::DegeneratePixelSpan { row: 300 });
    }

    #[test]
    fn test_prefix_suffix_lexicographic_max() {
        let cal = Calibration::from_labels(vec![label(0.0, 400, "", "%"), label(100.0, 100, "$", "")])
            .unwrap();
        assert_eq!(cal.prefix(), "$");
        assert_eq!(cal.suffix(), "%");

        let cal = Calibration::from_labels(vec![label(0.0, 400, "$", ""), label(100.0, 100, "€", "")])
            .unwrap();
        assert_eq!(cal.prefix(), "€");
    }
}
