//! Bar to category-label alignment
//!
//! Bars and x-axis labels are detected independently, so either side may
//! be missing members or carry false positives. A two-pointer merge over
//! both lists (each sorted left to right) pairs them up by horizontal
//! overlap and fills the gaps with placeholders.
//!
//! The merge is greedy and never backtracks. One spurious detection early
//! in the row can shift every later pair; that is a known limitation of
//! the approach, not something the merge tries to repair.

use serde::Serialize;

use crate::analysis::calibration::Calibration;
use crate::vision::detection::XLabel;
use crate::vision::geometry::BoundingBox;

/// Label used when a bar has no matching x-axis label
pub const UNKNOWN_LABEL: &str = "[Unknown]";

/// One (category, value) pair of the extracted series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedEntry {
    pub label: String,
    pub value: f64,
}

/// Whether a bar and a label belong to the same category slot
///
/// True when either one's horizontal center lies strictly inside the
/// other's horizontal span.
pub fn overlaps_horizontally(bar: &BoundingBox, label: &BoundingBox) -> bool {
    bar.spans_x(label.center_x()) || label.spans_x(bar.center_x())
}

/// Bar/label aligner
#[derive(Debug, Clone)]
pub struct Aligner<'a> {
    calibration: &'a Calibration,
    unknown_label: &'a str,
}

impl<'a> Aligner<'a> {
    pub fn new(calibration: &'a Calibration) -> Self {
        Self {
            calibration,
            unknown_label: UNKNOWN_LABEL,
        }
    }

    /// Override the placeholder label for unmatched bars
    pub fn with_unknown_label(mut self, unknown_label: &'a str) -> Self {
        self.unknown_label = unknown_label;
        self
    }

    /// Merge bars and labels, both sorted by horizontal center
    ///
    /// Always yields `max(bars.len(), labels.len())` entries. Once that many
    /// entries exist, any detections not yet consumed are dropped.
    pub fn align(&self, bars: &[BoundingBox], labels: &[XLabel]) -> Vec<AlignedEntry> {
        let target = bars.len().max(labels.len());
        let mut entries = Vec::with_capacity(target);
        let (mut i, mut j) = (0, 0);

        while entries.len() < target {
            let entry = match (bars.get(i), labels.get(j)) {
                (None, Some(label)) => {
                    j += 1;
                    self.missing_bar(label)
                }
                (Some(bar), None) => {
                    i += 1;
                    self.missing_label(bar)
                }
                (Some(bar), Some(label)) if overlaps_horizontally(bar, &label.bounds) => {
                    i += 1;
                    j += 1;
                    AlignedEntry {
                        label: label.text.clone(),
                        value: self.calibration.value_of(bar),
                    }
                }
                (Some(bar), Some(label)) => {
                    // Whichever is further left stands alone; a tie consumes the bar
                    if label.bounds.center_x() < bar.center_x() {
                        j += 1;
                        self.missing_bar(label)
                    } else {
                        i += 1;
                        self.missing_label(bar)
                    }
                }
                // Unreachable: entries < target implies one side remains
                (None, None) => break,
            };
            entries.push(entry);
        }

        entries
    }

    fn missing_bar(&self, label: &XLabel) -> AlignedEntry {
        AlignedEntry {
            label: label.text.clone(),
            value: self.calibration.bottom_value(),
        }
    }

    fn missing_label(&self, bar: &BoundingBox) -> AlignedEntry {
        AlignedEntry {
            label: self.unknown_label.to_string(),
            value: self.calibration.value_of(bar),
        }
    }
}
