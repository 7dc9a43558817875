//! Bounding box geometry for detector output
//!
//! Boxes use image coordinates: x grows to the right, y grows downward.

use serde::{Deserialize, Serialize};

/// Axis-aligned pixel rectangle describing a detected object
///
/// Serialized as `[left, top, right, bottom]`, the same layout detectors
/// report as `xyxy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct BoundingBox {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

impl BoundingBox {
    /// Create a box from its edges. Swapped edges are reordered so that
    /// `left <= right` and `top <= bottom` always hold.
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left: left.min(right),
            top: top.min(bottom),
            right: left.max(right),
            bottom: top.max(bottom),
        }
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    pub fn top(&self) -> i32 {
        self.top
    }

    pub fn right(&self) -> i32 {
        self.right
    }

    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    /// Center point, rounded toward negative infinity
    pub fn center(&self) -> (i32, i32) {
        (
            (self.left + self.right).div_euclid(2),
            (self.top + self.bottom).div_euclid(2),
        )
    }

    pub fn center_x(&self) -> i32 {
        self.center().0
    }

    pub fn center_y(&self) -> i32 {
        self.center().1
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Vertical extent as a positive pixel span
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn area(&self) -> i64 {
        self.width() as i64 * self.height() as i64
    }

    /// Whether `x` lies strictly between the left and right edges
    pub fn spans_x(&self, x: i32) -> bool {
        x > self.left && x < self.right
    }
}

impl From<[i32; 4]> for BoundingBox {
    fn from(xyxy: [i32; 4]) -> Self {
        Self::new(xyxy[0], xyxy[1], xyxy[2], xyxy[3])
    }
}

impl From<BoundingBox> for [i32; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.left, b.top, b.right, b.bottom]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_measurements() {
        let b = BoundingBox::new(10, 20, 30, 80);
        assert_eq!(b.center(), (20, 50));
        assert_eq!(b.width(), 20);
        assert_eq!(b.height(), 60);
        assert_eq!(b.area(), 1200);
    }

    #[test]
    fn test_height_is_positive_magnitude() {
        let b = BoundingBox::new(0, 250, 40, 400);
        assert_eq!(b.height(), 150);
        assert!(b.height() >= 0);
    }

    #[test]
    fn test_swapped_edges_are_normalized() {
        let b = BoundingBox::new(30, 80, 10, 20);
        assert_eq!(b, BoundingBox::new(10, 20, 30, 80));
    }

    #[test]
    fn test_center_floors_odd_spans() {
        let b = BoundingBox::new(0, 0, 5, 3);
        assert_eq!(b.center(), (2, 1));
    }

    #[test]
    fn test_spans_x_is_strict() {
        let b = BoundingBox::new(10, 0, 20, 10);
        assert!(b.spans_x(15));
        assert!(!b.spans_x(10));
        assert!(!b.spans_x(20));
    }

    #[test]
    fn test_serde_as_xyxy_array() {
        let b: BoundingBox = serde_json::from_str("[5, 6, 7, 8]").unwrap();
        assert_eq!(b.left(), 5);
        assert_eq!(b.bottom(), 8);
        assert_eq!(serde_json::to_string(&b).unwrap(), "[5,6,7,8]");
    }
}
