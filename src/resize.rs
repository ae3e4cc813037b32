//! Resize handler: one call per pointer-move of a resize gesture.
//!
//! The element takes the event rectangle's size verbatim. Its accumulated
//! offset moves only by the left/top edge deltas, which keeps the opposite
//! edge where it was; right/bottom resizes leave the offset untouched.

#[cfg(test)]
#[path = "resize_test.rs"]
mod resize_test;

use crate::accumulator::{self, px};
use crate::consts::{STYLE_HEIGHT, STYLE_WIDTH};
use crate::element::{TrackError, Trackable};
use crate::geom::Geometry;
use crate::gesture::ResizeMove;
use crate::sync::{Dispatch, PositionUpdate};

/// Apply one resize step to `element` and dispatch its new geometry.
///
/// # Errors
///
/// Returns [`TrackError::MissingIdentifier`] before touching the element or
/// the network when it has no identifier.
pub fn on_resize<E, D>(element: &E, step: &ResizeMove, sync: &D) -> Result<PositionUpdate, TrackError>
where
    E: Trackable,
    D: Dispatch + ?Sized,
{
    let id = element.identifier()?;
    let current = accumulator::read(element);

    element.set_style(STYLE_WIDTH, &px(step.rect.width));
    element.set_style(STYLE_HEIGHT, &px(step.rect.height));

    let position = accumulator::resize(current, &step.delta_rect);
    accumulator::commit(element, position);

    let update = PositionUpdate::new(id, Geometry::new(position, step.rect.width, step.rect.height));
    sync.dispatch(update.clone());
    Ok(update)
}
