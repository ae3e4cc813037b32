//! Registration: binds drag and resize behavior to every matching element.
//!
//! DESIGN
//! ======
//! [`Interactions`] is the platform-free core of the bootstrap. It binds the
//! matching elements (more can be bound as they appear), keeps one
//! [`GestureTracker`] per element and routes pointer
//! events through the gesture recognizer into the drag/resize handlers. The
//! browser layer (`crate::web`) only forwards DOM pointer events here;
//! hosts that already run their own gesture library can skip the recognizer
//! and feed [`DragMove`]/[`ResizeMove`] steps directly.
//!
//! One pointer drives one gesture per container at a time
//! ([`Interactions::press`]). A press while another pointer is still marked
//! active ends the stale gesture first, so a lost release never locks the
//! container. Elements that left their document are unbound on the next
//! [`Interactions::bind`].
//!
//! ERROR HANDLING
//! ==============
//! Handler failures are logged and swallowed at this boundary so a gesture
//! keeps running regardless of what happened to a single event.

#[cfg(test)]
#[path = "interactions_test.rs"]
mod interactions_test;

use tracing::{debug, error, info};

use crate::config::SyncConfig;
use crate::consts::STYLE_TOUCH_ACTION;
use crate::drag;
use crate::element::{Container, TrackError, Trackable};
use crate::geom::Point;
use crate::gesture::{DragMove, Edges, Gesture, GestureEvent, GestureTracker, ResizeMove};
use crate::resize;
use crate::sync::{Dispatch, PositionUpdate};

struct Binding<E> {
    element: E,
    gesture: GestureTracker,
}

/// Drag/resize bindings for one container.
pub struct Interactions<E, D> {
    bindings: Vec<Binding<E>>,
    sync: D,
    edge_margin: f64,
    edges: Edges,
    /// Pointer id and binding index of the gesture in progress.
    active: Option<(i32, usize)>,
}

impl<E: Trackable, D: Dispatch> Interactions<E, D> {
    /// Select `config.selector` under `container` and bind every match.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::Selector`] if the container rejects the selector.
    pub fn register<C>(container: &C, config: &SyncConfig, sync: D) -> Result<Self, TrackError>
    where
        C: Container<Element = E>,
    {
        let elements = container.select_all(&config.selector)?;
        info!(selector = %config.selector, count = elements.len(), "drag and resize registered");

        let mut interactions = Self::empty(config, sync);
        for element in elements {
            interactions.push(element);
        }
        Ok(interactions)
    }

    /// No bindings yet; elements are added with [`Interactions::bind`].
    #[must_use]
    pub fn empty(config: &SyncConfig, sync: D) -> Self {
        Self { bindings: Vec::new(), sync, edge_margin: config.edge_margin, edges: config.edges, active: None }
    }

    /// Bind `element` if it is not bound yet; returns its index either way.
    ///
    /// Bindings whose element is no longer connected are dropped first, so
    /// indices returned earlier may shift.
    pub fn bind(&mut self, element: E) -> usize
    where
        E: PartialEq,
    {
        self.prune();
        match self.index_of(&element) {
            Some(index) => index,
            None => self.push(element),
        }
    }

    #[must_use]
    pub fn index_of(&self, element: &E) -> Option<usize>
    where
        E: PartialEq,
    {
        self.bindings.iter().position(|b| &b.element == element)
    }

    fn push(&mut self, element: E) -> usize {
        element.set_style(STYLE_TOUCH_ACTION, "none");
        self.bindings.push(Binding { element, gesture: GestureTracker::new(self.edge_margin, self.edges) });
        self.bindings.len() - 1
    }

    /// Drop bindings of detached elements, keeping the active gesture's index valid.
    fn prune(&mut self) {
        let before = self.bindings.len();
        let active = self.active.take();
        let mut index = 0;
        let mut kept = 0;
        self.bindings.retain(|binding| {
            let keep = binding.element.is_connected();
            if keep {
                if let Some((pointer, at)) = active {
                    if at == index {
                        self.active = Some((pointer, kept));
                    }
                }
                kept += 1;
            }
            index += 1;
            keep
        });
        if kept < before {
            debug!(dropped = before - kept, remaining = kept, "detached elements unbound");
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    #[must_use]
    pub fn element(&self, index: usize) -> Option<&E> {
        self.bindings.get(index).map(|b| &b.element)
    }

    #[must_use]
    pub fn sync(&self) -> &D {
        &self.sync
    }

    // --- Pointer input ---

    /// Pointer pressed on element `index`; returns the gesture it started.
    pub fn pointer_down(&mut self, index: usize, point: Point) -> Option<Gesture> {
        let binding = self.bindings.get_mut(index)?;
        let gesture = binding.gesture.pointer_down(point, binding.element.bounds());
        debug!(index, ?gesture, "gesture started");
        Some(gesture)
    }

    /// Pointer moved during a gesture on element `index`.
    pub fn pointer_move(&mut self, index: usize, point: Point) -> Option<PositionUpdate> {
        let binding = self.bindings.get_mut(index)?;
        let result = match binding.gesture.pointer_move(point)? {
            GestureEvent::Drag(step) => drag::on_move(&binding.element, step, &self.sync),
            GestureEvent::Resize(step) => resize::on_resize(&binding.element, &step, &self.sync),
        };
        settle(index, result)
    }

    /// Pointer released or cancelled on element `index`.
    pub fn pointer_up(&mut self, index: usize) {
        if let Some(binding) = self.bindings.get_mut(index) {
            binding.gesture.pointer_up();
        }
    }

    // --- Pointer routing ---

    /// `pointer` pressed on `element`: bind it and start a gesture.
    ///
    /// Any gesture still marked active (its release never arrived) is ended first.
    pub fn press(&mut self, pointer: i32, element: E, point: Point) -> Option<Gesture>
    where
        E: PartialEq,
    {
        if let Some((stale, index)) = self.active.take() {
            debug!(pointer = stale, index, "unreleased gesture replaced");
            self.pointer_up(index);
        }
        let index = self.bind(element);
        let gesture = self.pointer_down(index, point)?;
        self.active = Some((pointer, index));
        Some(gesture)
    }

    /// `pointer` moved; ignored unless it owns the active gesture.
    pub fn motion(&mut self, pointer: i32, point: Point) -> Option<PositionUpdate> {
        let index = self.active_index(pointer)?;
        self.pointer_move(index, point)
    }

    /// `pointer` released, cancelled or lost its capture.
    pub fn release(&mut self, pointer: i32) {
        if let Some(index) = self.active_index(pointer) {
            self.pointer_up(index);
            self.active = None;
        }
    }

    /// Pointer id owning the gesture in progress.
    #[must_use]
    pub fn active_pointer(&self) -> Option<i32> {
        self.active.map(|(pointer, _)| pointer)
    }

    fn active_index(&self, pointer: i32) -> Option<usize> {
        match self.active {
            Some((owner, index)) if owner == pointer => Some(index),
            _ => None,
        }
    }

    // --- Pre-recognized steps ---

    /// Apply a drag step produced by an external gesture source.
    pub fn drag_move(&self, index: usize, step: DragMove) -> Option<PositionUpdate> {
        let binding = self.bindings.get(index)?;
        settle(index, drag::on_move(&binding.element, step, &self.sync))
    }

    /// Apply a resize step produced by an external gesture source.
    pub fn resize_move(&self, index: usize, step: &ResizeMove) -> Option<PositionUpdate> {
        let binding = self.bindings.get(index)?;
        settle(index, resize::on_resize(&binding.element, step, &self.sync))
    }
}

fn settle(index: usize, result: Result<PositionUpdate, TrackError>) -> Option<PositionUpdate> {
    match result {
        Ok(update) => Some(update),
        Err(e) => {
            error!(index, error = %e, "interaction event dropped");
            None
        }
    }
}
