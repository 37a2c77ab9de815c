use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use thiserror::Error;

/// A position in either screen or plane coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A displacement between two points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Self) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewBoxError {
    #[error("viewBox `{raw}` must contain exactly four numbers, found {found}")]
    WrongArity { raw: String, found: usize },
    #[error("viewBox `{raw}` contains non-numeric value `{value}`")]
    NotANumber { raw: String, value: String },
    #[error("viewBox `{raw}` must be finite with a positive width and height")]
    Degenerate { raw: String },
}

/// Axis-aligned rectangle `(x, y, width, height)` in plane coordinates.
///
/// Parses from and formats to the SVG `viewBox` syntax `"x y width height"`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_corners(min: Point, max: Point) -> Self {
        Self::new(
            min.x.min(max.x),
            min.y.min(max.y),
            (max.x - min.x).abs(),
            (max.y - min.y).abs(),
        )
    }

    /// Smallest rectangle covering every point, `None` for an empty input.
    pub fn bounding(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), point| {
            (
                Point::new(min.x.min(point.x), min.y.min(point.y)),
                Point::new(max.x.max(point.x), max.y.max(point.y)),
            )
        });
        Some(Self::from_corners(min, max))
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn max(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn translated(&self, offset: Vector) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// Same origin, both dimensions multiplied by `ratio`.
    pub fn resized(&self, ratio: f64) -> Self {
        Self::new(self.x, self.y, self.width * ratio, self.height * ratio)
    }

    pub fn approx_eq(&self, other: &Rect, relative: f64) -> bool {
        fn close(a: f64, b: f64, relative: f64) -> bool {
            (a - b).abs() <= relative * a.abs().max(b.abs()).max(1.0)
        }

        close(self.x, other.x, relative)
            && close(self.y, other.y, relative)
            && close(self.width, other.width, relative)
            && close(self.height, other.height, relative)
    }
}

impl FromStr for Rect {
    type Err = ViewBoxError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let parts = raw
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>();

        let [x, y, width, height] = parts.as_slice() else {
            return Err(ViewBoxError::WrongArity {
                raw: raw.to_owned(),
                found: parts.len(),
            });
        };

        let number = |value: &str| {
            value
                .parse::<f64>()
                .map_err(|_| ViewBoxError::NotANumber {
                    raw: raw.to_owned(),
                    value: value.to_owned(),
                })
        };

        let rect = Rect::new(number(x)?, number(y)?, number(width)?, number(height)?);
        let finite = [rect.x, rect.y, rect.width, rect.height]
            .iter()
            .all(|value| value.is_finite());
        if !finite || rect.width <= 0.0 || rect.height <= 0.0 {
            return Err(ViewBoxError::Degenerate {
                raw: raw.to_owned(),
            });
        }

        Ok(rect)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.width, self.height)
    }
}
