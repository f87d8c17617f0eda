//! Stroke data model for the shared overlay.

use kurbo::{Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// A single captured pointer sample, in surface-local pixels (relative to
/// the overlay canvas, not the page).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub x: f64,
    pub y: f64,
    /// Stylus/touch pressure, when the input device reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
}

impl StrokePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, pressure: None }
    }

    pub fn with_pressure(x: f64, y: f64, pressure: f64) -> Self {
        Self { x, y, pressure: Some(pressure) }
    }

    /// Convert to a kurbo point for geometry math.
    pub fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::opaque(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::opaque(255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self { r: rgba.r, g: rgba.g, b: rgba.b, a: rgba.a }
    }
}

impl From<Rgba> for Color {
    fn from(color: Rgba) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// One continuous drawn path from gesture start to gesture end.
///
/// Color, width and author are fixed when the gesture begins and never change
/// afterwards; `timestamp` is the gesture start time in epoch milliseconds.
/// While a gesture is in progress the stroke is owned and mutated only by the
/// author's capture component; once committed it is an immutable record that
/// is appended to every peer's committed list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    pub points: Vec<StrokePoint>,
    pub color: Rgba,
    pub width: f64,
    pub timestamp: u64,
    pub author_id: String,
    /// Display label shown next to the stroke. Peers may omit it on the
    /// wire; receivers patch an empty name with a fallback label.
    #[serde(default)]
    pub author_name: String,
}

impl Stroke {
    /// Start a new stroke at `first`, fixing appearance and authorship.
    pub fn new(
        first: StrokePoint,
        color: Rgba,
        width: f64,
        timestamp: u64,
        author_id: impl Into<String>,
        author_name: impl Into<String>,
    ) -> Self {
        Self {
            points: vec![first],
            color,
            width,
            timestamp,
            author_id: author_id.into(),
            author_name: author_name.into(),
        }
    }

    pub fn add_point(&mut self, point: StrokePoint) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_point(&self) -> Option<StrokePoint> {
        self.points.last().copied()
    }

    /// Axis-aligned bounding box of the path (ignores stroke width).
    pub fn bounds(&self) -> Rect {
        if self.points.is_empty() {
            return Rect::ZERO;
        }

        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;

        for point in &self.points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        Rect::new(min_x, min_y, max_x, max_y)
    }
}
