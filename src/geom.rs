//! Geometry primitives shared by the accumulator, gesture recognizer and sync payloads.
//!
//! All values are CSS pixels. `Position` is an offset from the element's
//! original layout position (what `translate()` applies), while `Rect` is an
//! absolute box in the same coordinate space as pointer events.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A pointer location in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Accumulated translation of an element away from its layout position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Position plus size, the value stored remotely for each element.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    #[must_use]
    pub fn new(position: Position, width: f64, height: f64) -> Self {
        Self { x: position.x, y: position.y, width, height }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// An axis-aligned box described by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Build a rect from its four edge coordinates.
    #[must_use]
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, top, width: right - left, height: bottom - top }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Per-edge change between two consecutive resize rectangles.
///
/// `left`/`top` are what the resize handler adds to the accumulated position
/// so the opposite edge stays visually anchored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DeltaRect {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl DeltaRect {
    /// Edge-by-edge difference `next - prev`.
    #[must_use]
    pub fn between(prev: &Rect, next: &Rect) -> Self {
        Self {
            left: next.left - prev.left,
            right: next.right() - prev.right(),
            top: next.top - prev.top,
            bottom: next.bottom() - prev.bottom(),
            width: next.width - prev.width,
            height: next.height - prev.height,
        }
    }
}
