//! Drag handler: one call per pointer-move of a drag gesture.
//!
//! No gesture-local state is kept here; every call re-reads the accumulated
//! offset from the element, adds the move delta, commits it and ships the
//! element's geometry. Size is read back from the element's style since a
//! drag never changes it.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use crate::accumulator::{self, parse_float};
use crate::consts::{STYLE_HEIGHT, STYLE_WIDTH};
use crate::element::{TrackError, Trackable};
use crate::geom::Geometry;
use crate::gesture::DragMove;
use crate::sync::{Dispatch, PositionUpdate};

/// Apply one drag step to `element` and dispatch its new geometry.
///
/// # Errors
///
/// Returns [`TrackError::MissingIdentifier`] before touching the element or
/// the network when it has no identifier.
pub fn on_move<E, D>(element: &E, step: DragMove, sync: &D) -> Result<PositionUpdate, TrackError>
where
    E: Trackable,
    D: Dispatch + ?Sized,
{
    let id = element.identifier()?;

    let position = accumulator::drag(accumulator::read(element), step.dx, step.dy);
    accumulator::commit(element, position);

    let (width, height) = rendered_size(element);
    let update = PositionUpdate::new(id, Geometry::new(position, width, height));
    sync.dispatch(update.clone());
    Ok(update)
}

/// Width and height from inline style, falling back to the rendered box.
fn rendered_size<E: Trackable>(element: &E) -> (f64, f64) {
    let styled = |prop: &str| element.style(prop).as_deref().and_then(parse_float);
    match (styled(STYLE_WIDTH), styled(STYLE_HEIGHT)) {
        (Some(width), Some(height)) => (width, height),
        (width, height) => {
            let bounds = element.bounds();
            (width.unwrap_or(bounds.width), height.unwrap_or(bounds.height))
        }
    }
}
