use crate::geometry::{Point, Rect, Vector};

/// Converts a screen position into plane coordinates for a given visible rectangle.
///
/// The controller samples this again after every resize, so implementations must
/// derive the scale from `view` rather than caching it.
pub trait ScreenToPlane {
    fn screen_to_plane(&self, view: &Rect, screen: Point) -> Point;
}

impl<F> ScreenToPlane for F
where
    F: Fn(&Rect, Point) -> Point,
{
    fn screen_to_plane(&self, view: &Rect, screen: Point) -> Point {
        self(view, screen)
    }
}

/// Fits a visible rectangle into a pixel area, centered and aspect preserving
/// (the SVG `xMidYMid meet` rule).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenMapping {
    pub screen: Rect,
}

impl ScreenMapping {
    pub fn new(screen: Rect) -> Self {
        Self { screen }
    }

    pub fn transform(&self, view: &Rect) -> PlaneTransform {
        let scale = (self.screen.width / view.width).min(self.screen.height / view.height);
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };

        let offset = Vector::new(
            self.screen.x + (self.screen.width - view.width * scale) * 0.5 - view.x * scale,
            self.screen.y + (self.screen.height - view.height * scale) * 0.5 - view.y * scale,
        );

        PlaneTransform { scale, offset }
    }
}

impl ScreenToPlane for ScreenMapping {
    fn screen_to_plane(&self, view: &Rect, screen: Point) -> Point {
        self.transform(view).screen_to_plane(screen)
    }
}

/// `screen = plane * scale + offset`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneTransform {
    scale: f64,
    offset: Vector,
}

impl PlaneTransform {
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn plane_to_screen(&self, plane: Point) -> Point {
        Point::new(
            plane.x * self.scale + self.offset.x,
            plane.y * self.scale + self.offset.y,
        )
    }

    pub fn screen_to_plane(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset.x) / self.scale,
            (screen.y - self.offset.y) / self.scale,
        )
    }
}
