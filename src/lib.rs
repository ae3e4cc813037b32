//! Draggable and resizable elements whose geometry is synced to a remote store.
//!
//! Pointer gestures on matching elements move and resize them in place; each
//! step accumulates the element's offset on the element itself (`data-x`,
//! `data-y`), re-renders it with a CSS translation and ships the new geometry
//! to the store without waiting for an answer.
//!
//! The crate compiles natively (in-memory elements, `reqwest` transport) and to
//! WebAssembly with the `web` feature (DOM elements, `gloo-net` transport,
//! `make_draggable`/`register` exports).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`interactions`] | Registration and pointer routing per container |
//! | [`gesture`] | Drag/resize gesture recognizer |
//! | [`drag`] | Drag handler |
//! | [`resize`] | Resize handler |
//! | [`accumulator`] | Offset math and the commit-to-element step |
//! | [`element`] | Element abstraction and the in-memory element |
//! | [`sync`] | Wire types, dispatchers and transports |
//! | [`config`] | Runtime configuration |
//! | [`geom`] | Points, rectangles and geometry payloads |
//! | [`consts`] | DOM contract names and defaults |
//! | `web` | Browser bindings (feature `web`) |

pub mod accumulator;
pub mod config;
pub mod consts;
pub mod drag;
pub mod element;
pub mod geom;
pub mod gesture;
pub mod interactions;
pub mod resize;
pub mod sync;
#[cfg(feature = "web")]
pub mod web;

#[cfg(test)]
mod test_support;

pub use config::{ConfigError, SyncConfig, SyncMode};
pub use element::{Container, MemoryContainer, MemoryElement, TrackError, Trackable};
pub use interactions::Interactions;
pub use sync::{Dispatch, PositionUpdate, SyncError};
