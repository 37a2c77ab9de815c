use tracing::{debug, trace};

use crate::geometry::{Point, Rect, Vector};

use super::CoordinateSpace;
use super::mapping::ScreenToPlane;

const ZOOM_OUT_RATIO: f64 = 1.1;
const ZOOM_IN_RATIO: f64 = 0.9;

/// Gate between pointer presses and pan gestures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelDirection {
    In,
    Out,
    None,
}

impl WheelDirection {
    /// Browser convention: a positive `deltaY` scrolls down, which zooms out.
    pub fn from_wheel_delta(delta_y: f64) -> Self {
        if delta_y > 0.0 {
            Self::Out
        } else if delta_y < 0.0 {
            Self::In
        } else {
            Self::None
        }
    }

    /// Multiplier applied to the visible width and height.
    pub fn ratio(self) -> f64 {
        match self {
            Self::In => ZOOM_IN_RATIO,
            Self::Out => ZOOM_OUT_RATIO,
            Self::None => 1.0,
        }
    }
}

/// Inclusive range for `original.width / current.width`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomBounds {
    pub min: f64,
    pub max: f64,
}

impl ZoomBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, zoom: f64) -> bool {
        zoom >= self.min && zoom <= self.max
    }
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self::new(0.5, 8.0)
    }
}

/// Applies pointer and wheel gestures to a [`CoordinateSpace`].
#[derive(Clone, Debug)]
pub struct ViewportController {
    space: CoordinateSpace,
    bounds: ZoomBounds,
    drag: DragState,
}

impl ViewportController {
    pub fn new(space: CoordinateSpace, bounds: ZoomBounds) -> Self {
        Self {
            space,
            bounds,
            drag: DragState::Idle,
        }
    }

    pub fn space(&self) -> &CoordinateSpace {
        &self.space
    }

    pub fn view(&self) -> Rect {
        self.space.current()
    }

    pub fn bounds(&self) -> ZoomBounds {
        self.bounds
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn press(&mut self) {
        self.drag = DragState::Dragging;
    }

    pub fn release(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Moves the view so the plane point under `pointer` follows the pointer by
    /// `delta` screen units. Ignored outside an active drag.
    pub fn pan(&mut self, pointer: Point, delta: Vector, mapping: &impl ScreenToPlane) -> bool {
        if self.drag != DragState::Dragging {
            trace!("pan ignored outside of a drag gesture");
            return false;
        }

        let view = self.space.current();
        let start = mapping.screen_to_plane(&view, pointer);
        let moved_to = mapping.screen_to_plane(&view, pointer + delta);
        self.space.set_current(view.translated(start - moved_to));
        true
    }

    /// Scales the view around `pivot`, keeping the plane point under it fixed.
    ///
    /// Returns `false` without touching the view when the resulting zoom factor
    /// would leave the configured bounds.
    pub fn zoom(
        &mut self,
        direction: WheelDirection,
        pivot: Point,
        mapping: &impl ScreenToPlane,
    ) -> bool {
        if direction == WheelDirection::None {
            return false;
        }

        let view = self.space.current();
        let resized = view.resized(direction.ratio());
        let zoom = self.space.original().width / resized.width;
        if !self.bounds.contains(zoom) {
            debug!(zoom, ?direction, "zoom rejected outside of bounds");
            return false;
        }

        let before = mapping.screen_to_plane(&view, pivot);
        let after = mapping.screen_to_plane(&resized, pivot);
        self.space.set_current(resized.translated(before - after));
        true
    }

    pub fn reset(&mut self) {
        self.space.reset();
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::viewport::ScreenMapping;

    fn controller(original: Rect) -> ViewportController {
        ViewportController::new(CoordinateSpace::new(original), ZoomBounds::default())
    }

    fn mapping() -> ScreenMapping {
        ScreenMapping::new(Rect::new(0.0, 0.0, 400.0, 200.0))
    }

    #[rstest]
    #[case(3.0, WheelDirection::Out)]
    #[case(-120.0, WheelDirection::In)]
    #[case(0.0, WheelDirection::None)]
    fn wheel_direction_from_delta(#[case] delta: f64, #[case] expected: WheelDirection) {
        assert_eq!(WheelDirection::from_wheel_delta(delta), expected);
    }

    #[test]
    fn pan_requires_press() {
        let mut viewport = controller(Rect::new(0.0, 0.0, 100.0, 50.0));
        let moved = viewport.pan(Point::new(10.0, 10.0), Vector::new(20.0, 0.0), &mapping());

        assert!(!moved);
        assert_eq!(viewport.view(), Rect::new(0.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn pan_moves_opposite_to_pointer_in_plane_units() {
        let mut viewport = controller(Rect::new(0.0, 0.0, 100.0, 50.0));
        viewport.press();
        assert!(viewport.pan(Point::new(10.0, 10.0), Vector::new(40.0, -8.0), &mapping()));

        // 400px across 100 plane units: 4px per unit.
        assert_eq!(viewport.view(), Rect::new(-10.0, 2.0, 100.0, 50.0));
    }

    #[test]
    fn release_stops_panning() {
        let mut viewport = controller(Rect::new(0.0, 0.0, 100.0, 50.0));
        viewport.press();
        viewport.release();

        assert_eq!(viewport.drag_state(), DragState::Idle);
        assert!(!viewport.pan(Point::new(0.0, 0.0), Vector::new(5.0, 5.0), &mapping()));
    }

    #[test]
    fn zoom_keeps_pivot_fixed() {
        let mut viewport = controller(Rect::new(0.0, 0.0, 100.0, 50.0));
        let mapping = mapping();
        let pivot = Point::new(300.0, 50.0);
        let before = mapping.screen_to_plane(&viewport.view(), pivot);

        assert!(viewport.zoom(WheelDirection::In, pivot, &mapping));
        let after = mapping.screen_to_plane(&viewport.view(), pivot);

        assert!((viewport.view().width - 90.0).abs() < 1e-9);
        assert!((viewport.view().height - 45.0).abs() < 1e-9);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn neutral_wheel_is_a_no_op() {
        let mut viewport = controller(Rect::new(0.0, 0.0, 100.0, 50.0));
        assert!(!viewport.zoom(WheelDirection::None, Point::new(1.0, 1.0), &mapping()));
        assert!(!viewport.space().is_modified());
    }

    #[test]
    fn zoom_out_stops_at_min_bound() {
        let mut viewport = controller(Rect::new(0.0, 0.0, 100.0, 50.0));
        let mapping = mapping();
        let mut accepted = 0;
        while viewport.zoom(WheelDirection::Out, Point::new(200.0, 100.0), &mapping) {
            accepted += 1;
            assert!(accepted < 100, "zoom out never hit the bound");
        }

        // 1.1^7 ≈ 1.95 is the last width multiple keeping the factor above 0.5.
        assert_eq!(accepted, 7);
        assert!(viewport.space().zoom_factor() >= 0.5);
        assert!(viewport.view().width <= 200.0);
    }
}
