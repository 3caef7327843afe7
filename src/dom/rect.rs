use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, top, right, bottom }
    }

    /// Build from an `x, y, width, height` box, the shape browsers report
    /// for `getBoundingClientRect()`.
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Normalize a drag gesture into a rectangle. The pointer may travel in
    /// any direction from where the drag started.
    pub fn from_corners(start: (f64, f64), end: (f64, f64)) -> Self {
        let left = start.0.min(end.0);
        let top = start.1.min(end.1);
        let width = (end.0 - start.0).abs();
        let height = (end.1 - start.1).abs();
        Self::from_xywh(left, top, width, height)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Inclusive overlap test: touching edges count as intersecting.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.right >= other.left
            && self.left <= other.right
            && self.bottom >= other.top
            && self.top <= other.bottom
    }
}
