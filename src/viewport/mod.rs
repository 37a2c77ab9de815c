//! Pan/zoom state over the diagram plane.

mod controller;
mod mapping;

pub use controller::{DragState, ViewportController, WheelDirection, ZoomBounds};
pub use mapping::{PlaneTransform, ScreenMapping, ScreenToPlane};

use crate::geometry::{Rect, ViewBoxError};

/// The visible window into the plane plus the rectangle captured at load time.
#[derive(Clone, Debug, PartialEq)]
pub struct CoordinateSpace {
    original: Rect,
    current: Rect,
}

impl CoordinateSpace {
    pub fn new(original: Rect) -> Self {
        Self {
            original,
            current: original,
        }
    }

    /// Builds the space from a raw `viewBox` attribute. A malformed value is fatal.
    pub fn from_view_box(raw: &str) -> Result<Self, ViewBoxError> {
        raw.parse().map(Self::new)
    }

    pub fn original(&self) -> Rect {
        self.original
    }

    pub fn current(&self) -> Rect {
        self.current
    }

    /// `original.width / current.width`
    pub fn zoom_factor(&self) -> f64 {
        self.original.width / self.current.width
    }

    pub fn is_modified(&self) -> bool {
        self.current != self.original
    }

    pub fn reset(&mut self) {
        self.current = self.original;
    }

    fn set_current(&mut self, current: Rect) {
        self.current = current;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_original() {
        let space = CoordinateSpace::from_view_box("0 0 100 50").unwrap();
        assert_eq!(space.current(), space.original());
        assert_eq!(space.zoom_factor(), 1.0);
        assert!(!space.is_modified());
    }

    #[test]
    fn malformed_view_box_is_an_error() {
        assert!(CoordinateSpace::from_view_box("0 0 100").is_err());
        assert!(CoordinateSpace::from_view_box("a b c d").is_err());
    }

    #[test]
    fn reset_restores_original() {
        let mut space = CoordinateSpace::new(Rect::new(0.0, 0.0, 100.0, 50.0));
        space.set_current(Rect::new(13.0, -4.0, 50.0, 25.0));
        assert!(space.is_modified());
        assert_eq!(space.zoom_factor(), 2.0);

        space.reset();
        assert_eq!(space.current(), space.original());
        space.reset();
        assert_eq!(space.current(), space.original());
    }
}
