//! Gesture recognizer: raw pointer events in, drag and resize moves out.
//!
//! A pointer-down on an element starts either a resize (when it lands within
//! the edge margin of one or more enabled edges) or a drag. Each subsequent
//! pointer-move produces one event for the handlers:
//!
//! - drag: [`DragMove`] with the pointer delta since the previous move;
//! - resize: [`ResizeMove`] with the new absolute rectangle and the per-edge
//!   change since the previous move.
//!
//! Resize rectangles are recomputed from the gesture's starting rectangle and
//! the total pointer displacement, so clamping at zero size never lets the
//! edge drift away from the pointer.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use serde::Deserialize;

use crate::consts::DEFAULT_EDGE_MARGIN_PX;
use crate::geom::{DeltaRect, Point, Rect};

// =============================================================================
// EVENTS
// =============================================================================

/// A set of element edges.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Edges {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl Edges {
    pub const ALL: Self = Self { left: true, right: true, top: true, bottom: true };
    pub const NONE: Self = Self { left: false, right: false, top: false, bottom: false };

    /// Whether any edge is set.
    #[must_use]
    pub fn any(self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

impl Default for Edges {
    fn default() -> Self {
        Self::ALL
    }
}

/// One pointer-move step of a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragMove {
    /// Horizontal pointer movement since the previous move event.
    pub dx: f64,
    /// Vertical pointer movement since the previous move event.
    pub dy: f64,
}

/// One pointer-move step of a resize gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeMove {
    /// The resized rectangle after this step.
    pub rect: Rect,
    /// Edge movement since the previous step.
    pub delta_rect: DeltaRect,
    /// Edges being dragged.
    pub edges: Edges,
}

/// Output of the recognizer for a single pointer-move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Drag(DragMove),
    Resize(ResizeMove),
}

// =============================================================================
// STATE MACHINE
// =============================================================================

/// Gesture in progress on one element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    /// No pointer is down.
    #[default]
    Idle,
    /// Moving the element.
    Dragging {
        /// Pointer position at the previous event.
        last: Point,
    },
    /// Moving one or two edges of the element.
    Resizing {
        edges: Edges,
        /// Pointer position at pointer-down.
        start: Point,
        /// Element bounds at pointer-down.
        start_rect: Rect,
        /// Rectangle emitted by the previous step.
        rect: Rect,
    },
}

/// Per-element pointer state machine.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    state: Gesture,
    margin: f64,
    enabled: Edges,
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(DEFAULT_EDGE_MARGIN_PX, Edges::ALL)
    }
}

impl GestureTracker {
    #[must_use]
    pub fn new(margin: f64, enabled: Edges) -> Self {
        Self { state: Gesture::Idle, margin, enabled }
    }

    #[must_use]
    pub fn state(&self) -> Gesture {
        self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state != Gesture::Idle
    }

    /// Begin a gesture at `point` on an element currently occupying `bounds`.
    pub fn pointer_down(&mut self, point: Point, bounds: Rect) -> Gesture {
        let edges = edges_at(point, bounds, self.margin, self.enabled);
        self.state = if edges.any() {
            Gesture::Resizing { edges, start: point, start_rect: bounds, rect: bounds }
        } else {
            Gesture::Dragging { last: point }
        };
        self.state
    }

    /// Advance the gesture; `None` when idle.
    pub fn pointer_move(&mut self, point: Point) -> Option<GestureEvent> {
        match &mut self.state {
            Gesture::Idle => None,
            Gesture::Dragging { last } => {
                let step = DragMove { dx: point.x - last.x, dy: point.y - last.y };
                *last = point;
                Some(GestureEvent::Drag(step))
            }
            Gesture::Resizing { edges, start, start_rect, rect } => {
                let next = resize_rect(start_rect, *edges, point.x - start.x, point.y - start.y);
                let delta_rect = DeltaRect::between(rect, &next);
                *rect = next;
                Some(GestureEvent::Resize(ResizeMove { rect: next, delta_rect, edges: *edges }))
            }
        }
    }

    /// End the gesture (pointer released or cancelled).
    pub fn pointer_up(&mut self) {
        self.state = Gesture::Idle;
    }
}

/// Which enabled edges of `rect` lie within `margin` of `point`.
///
/// When both opposite edges are in reach (a very small element), only the
/// nearer one is taken.
#[must_use]
pub fn edges_at(point: Point, rect: Rect, margin: f64, enabled: Edges) -> Edges {
    let within_x = point.x >= rect.left - margin && point.x <= rect.right() + margin;
    let within_y = point.y >= rect.top - margin && point.y <= rect.bottom() + margin;
    if !within_x || !within_y {
        return Edges::NONE;
    }

    let d_left = (point.x - rect.left).abs();
    let d_right = (point.x - rect.right()).abs();
    let d_top = (point.y - rect.top).abs();
    let d_bottom = (point.y - rect.bottom()).abs();

    let mut left = enabled.left && d_left <= margin;
    let mut right = enabled.right && d_right <= margin;
    if left && right {
        left = d_left <= d_right;
        right = !left;
    }
    let mut top = enabled.top && d_top <= margin;
    let mut bottom = enabled.bottom && d_bottom <= margin;
    if top && bottom {
        top = d_top <= d_bottom;
        bottom = !top;
    }
    Edges { left, right, top, bottom }
}

/// Move the given edges of `rect` by `(dx, dy)`, never letting them cross.
#[must_use]
pub fn resize_rect(rect: &Rect, edges: Edges, dx: f64, dy: f64) -> Rect {
    let mut left = rect.left;
    let mut right = rect.right();
    let mut top = rect.top;
    let mut bottom = rect.bottom();

    if edges.left {
        left = (left + dx).min(right);
    }
    if edges.right {
        right = (right + dx).max(left);
    }
    if edges.top {
        top = (top + dy).min(bottom);
    }
    if edges.bottom {
        bottom = (bottom + dy).max(top);
    }
    Rect::from_edges(left, top, right, bottom)
}
