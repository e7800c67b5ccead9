//! Selection rectangle value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::RectParseError;

use super::point::Point;

/// Minimum width/height in pixels for a selection to count.
/// Anything smaller is normalized to the zero rect ("no selection").
pub const MIN_SELECTION_PX: f64 = 10.0;

/// An axis-aligned rectangle in screen coordinates.
/// Width and height are always non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SelectionRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SelectionRect {
    /// The zero rect, meaning "no selection"
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Create a rect, clamping negative dimensions to zero
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Build the axis-aligned bounding box of two corner points.
    /// The anchor may be any corner; the rect is the same for all four
    /// drag directions.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    /// Whether this rect has zero area
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Whether both dimensions meet the minimum selection threshold
    pub fn meets_minimum(&self) -> bool {
        self.width >= MIN_SELECTION_PX && self.height >= MIN_SELECTION_PX
    }

    /// Normalize: sub-threshold rects collapse to the zero rect
    pub fn normalized(self) -> Self {
        if self.meets_minimum() {
            self
        } else {
            Self::ZERO
        }
    }

    /// Whether the rect contains the given point (edges inclusive)
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }
}

impl fmt::Display for SelectionRect {
    /// Formats as `"X,Y WxH"`, the geometry format used by wayland
    /// region tools.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{} {}x{}",
            self.x.round() as i64,
            self.y.round() as i64,
            self.width.round() as i64,
            self.height.round() as i64
        )
    }
}

impl FromStr for SelectionRect {
    type Err = RectParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || RectParseError {
            input: s.to_string(),
        };

        let (pos, size) = s.trim().split_once(' ').ok_or_else(err)?;
        let (x, y) = pos.split_once(',').ok_or_else(err)?;
        let (w, h) = size.split_once('x').ok_or_else(err)?;

        let parse = |v: &str| v.trim().parse::<f64>().map_err(|_| err());

        Ok(Self::new(parse(x)?, parse(y)?, parse(w)?, parse(h)?))
    }
}
