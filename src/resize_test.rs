#![allow(clippy::float_cmp)]

use super::*;
use crate::consts::{ATTR_X, ATTR_Y, STYLE_TRANSFORM};
use crate::element::MemoryElement;
use crate::geom::{DeltaRect, Position, Rect};
use crate::gesture::Edges;
use crate::test_support::{Recorder, init_logging};

fn placed(x: &str, y: &str) -> MemoryElement {
    let el = MemoryElement::new().with_id("btn1").with_size(100.0, 50.0);
    el.set_attribute(ATTR_X, x);
    el.set_attribute(ATTR_Y, y);
    el
}

fn step(width: f64, height: f64, delta_rect: DeltaRect) -> ResizeMove {
    ResizeMove { rect: Rect::new(0.0, 0.0, width, height), delta_rect, edges: Edges::ALL }
}

#[test]
fn bottom_right_resize_keeps_position() {
    init_logging();
    let el = placed("10", "20");
    let sync = Recorder::new();
    let delta = DeltaRect { right: 20.0, bottom: 10.0, width: 20.0, height: 10.0, ..DeltaRect::default() };

    let update = on_resize(&el, &step(120.0, 60.0, delta), &sync).unwrap();

    assert_eq!(accumulator::read(&el), Position::new(10.0, 20.0));
    assert_eq!(el.style(STYLE_WIDTH).as_deref(), Some("120px"));
    assert_eq!(el.style(STYLE_HEIGHT).as_deref(), Some("60px"));
    assert_eq!(update.geometry, Geometry { x: 10.0, y: 20.0, width: 120.0, height: 60.0 });
}

#[test]
fn top_left_resize_shifts_position() {
    let el = placed("10", "20");
    let sync = Recorder::new();
    let delta = DeltaRect { left: 5.0, top: 3.0, width: -5.0, height: -3.0, ..DeltaRect::default() };

    let update = on_resize(&el, &step(95.0, 47.0, delta), &sync).unwrap();

    assert_eq!(update.geometry.position(), Position::new(15.0, 23.0));
    assert_eq!(el.attribute(ATTR_X).as_deref(), Some("15"));
    assert_eq!(el.attribute(ATTR_Y).as_deref(), Some("23"));
    assert_eq!(el.style(STYLE_TRANSFORM).as_deref(), Some("translate(15px, 23px)"));
}

#[test]
fn payload_uses_event_rect_not_style() {
    let el = placed("0", "0");
    // Stale style that must not leak into the payload.
    el.set_style(STYLE_WIDTH, "999px");
    let sync = Recorder::new();

    on_resize(&el, &step(80.0, 30.0, DeltaRect::default()), &sync).unwrap();

    let sent = sync.last().unwrap();
    assert_eq!(sent.id, "btn1");
    assert_eq!(sent.geometry, Geometry { x: 0.0, y: 0.0, width: 80.0, height: 30.0 });
}

#[test]
fn missing_identifier_touches_nothing() {
    let el = MemoryElement::new().with_size(100.0, 50.0);
    let attributes = el.attributes();
    let styles = el.styles();
    let sync = Recorder::new();
    let delta = DeltaRect { left: 5.0, top: 3.0, ..DeltaRect::default() };

    let result = on_resize(&el, &step(95.0, 47.0, delta), &sync);

    assert_eq!(result, Err(TrackError::MissingIdentifier));
    assert_eq!(sync.len(), 0);
    assert_eq!(el.attributes(), attributes);
    assert_eq!(el.styles(), styles);
}
