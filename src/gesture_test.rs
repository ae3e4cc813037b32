#![allow(clippy::float_cmp)]

use super::*;

fn bounds() -> Rect {
    Rect::new(100.0, 100.0, 200.0, 100.0)
}

fn expect_drag(event: Option<GestureEvent>) -> DragMove {
    match event {
        Some(GestureEvent::Drag(step)) => step,
        other => panic!("expected drag, got {other:?}"),
    }
}

fn expect_resize(event: Option<GestureEvent>) -> ResizeMove {
    match event {
        Some(GestureEvent::Resize(step)) => step,
        other => panic!("expected resize, got {other:?}"),
    }
}

// =============================================================
// edges_at
// =============================================================

#[test]
fn center_hits_no_edge() {
    assert_eq!(edges_at(Point::new(200.0, 150.0), bounds(), 8.0, Edges::ALL), Edges::NONE);
}

#[test]
fn near_left_edge() {
    let edges = edges_at(Point::new(104.0, 150.0), bounds(), 8.0, Edges::ALL);
    assert_eq!(edges, Edges { left: true, ..Edges::NONE });
}

#[test]
fn bottom_right_corner_hits_two_edges() {
    let edges = edges_at(Point::new(298.0, 199.0), bounds(), 8.0, Edges::ALL);
    assert_eq!(edges, Edges { right: true, bottom: true, ..Edges::NONE });
}

#[test]
fn disabled_edges_are_ignored() {
    let enabled = Edges { left: false, ..Edges::ALL };
    assert_eq!(edges_at(Point::new(102.0, 150.0), bounds(), 8.0, enabled), Edges::NONE);
}

#[test]
fn far_outside_hits_nothing() {
    assert_eq!(edges_at(Point::new(50.0, 150.0), bounds(), 8.0, Edges::ALL), Edges::NONE);
}

#[test]
fn tiny_element_prefers_nearer_edge() {
    let rect = Rect::new(0.0, 0.0, 6.0, 40.0);
    let edges = edges_at(Point::new(5.0, 20.0), rect, 8.0, Edges::ALL);
    assert_eq!(edges, Edges { right: true, ..Edges::NONE });
}

// =============================================================
// resize_rect
// =============================================================

#[test]
fn resize_rect_left_edge_shrinks() {
    let rect = resize_rect(&bounds(), Edges { left: true, ..Edges::NONE }, 20.0, 0.0);
    assert_eq!(rect, Rect::new(120.0, 100.0, 180.0, 100.0));
}

#[test]
fn resize_rect_clamps_to_zero_size() {
    let rect = resize_rect(&bounds(), Edges { top: true, ..Edges::NONE }, 0.0, 500.0);
    assert_eq!(rect.top, 200.0);
    assert_eq!(rect.height, 0.0);
}

// =============================================================
// tracker
// =============================================================

#[test]
fn idle_tracker_ignores_moves() {
    let mut tracker = GestureTracker::default();
    assert!(tracker.pointer_move(Point::new(1.0, 1.0)).is_none());
    assert!(!tracker.is_active());
}

#[test]
fn drag_emits_incremental_deltas() {
    let mut tracker = GestureTracker::default();
    let started = tracker.pointer_down(Point::new(200.0, 150.0), bounds());
    assert!(matches!(started, Gesture::Dragging { .. }));

    assert_eq!(expect_drag(tracker.pointer_move(Point::new(210.0, 155.0))), DragMove { dx: 10.0, dy: 5.0 });
    assert_eq!(expect_drag(tracker.pointer_move(Point::new(207.0, 155.0))), DragMove { dx: -3.0, dy: 0.0 });

    tracker.pointer_up();
    assert!(tracker.pointer_move(Point::new(300.0, 300.0)).is_none());
}

#[test]
fn left_edge_resize_reports_delta_rect() {
    let mut tracker = GestureTracker::default();
    tracker.pointer_down(Point::new(101.0, 150.0), bounds());

    let step = expect_resize(tracker.pointer_move(Point::new(106.0, 150.0)));
    assert_eq!(step.rect, Rect::new(105.0, 100.0, 195.0, 100.0));
    assert_eq!(step.delta_rect.left, 5.0);
    assert_eq!(step.delta_rect.width, -5.0);
    assert_eq!(step.delta_rect.top, 0.0);

    let step = expect_resize(tracker.pointer_move(Point::new(96.0, 150.0)));
    assert_eq!(step.rect, Rect::new(95.0, 100.0, 205.0, 100.0));
    assert_eq!(step.delta_rect.left, -10.0);
}

#[test]
fn bottom_right_resize_has_zero_left_top() {
    let mut tracker = GestureTracker::default();
    tracker.pointer_down(Point::new(299.0, 199.0), bounds());

    let step = expect_resize(tracker.pointer_move(Point::new(319.0, 214.0)));
    assert_eq!(step.rect, Rect::new(100.0, 100.0, 220.0, 115.0));
    assert_eq!(step.delta_rect.left, 0.0);
    assert_eq!(step.delta_rect.top, 0.0);
    assert_eq!(step.edges, Edges { right: true, bottom: true, ..Edges::NONE });
}

#[test]
fn clamped_resize_tracks_pointer_on_return() {
    let mut tracker = GestureTracker::default();
    tracker.pointer_down(Point::new(100.0, 150.0), bounds());

    let step = expect_resize(tracker.pointer_move(Point::new(400.0, 150.0)));
    assert_eq!(step.rect.width, 0.0);
    assert_eq!(step.delta_rect.left, 200.0);

    // Back to where the pointer started: full width restored in one step.
    let step = expect_resize(tracker.pointer_move(Point::new(100.0, 150.0)));
    assert_eq!(step.rect, bounds());
    assert_eq!(step.delta_rect.left, -200.0);
}
