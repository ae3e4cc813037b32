//! Browser bindings: DOM elements, pointer listeners and the wasm exports.
//!
//! DESIGN
//! ======
//! One set of delegated pointer listeners is installed per container. A
//! `pointerdown` on (or inside) an element matching the selector binds that
//! element into the container's [`Interactions`], captures the pointer and
//! starts a gesture; later `pointermove`/`pointerup` events for the same
//! pointer are routed to it, and `lostpointercapture` ends it like a release.
//! Elements added to the container after registration are picked up on their
//! first press. Bound elements get `touch-action: none`.
//!
//! Listener closures live as long as the page (`Closure::forget`).

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{error, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, PointerEvent};

use crate::config::SyncConfig;
use crate::consts::ATTR_REGISTERED;
use crate::element::{Container, TrackError, Trackable};
use crate::geom::{Point, Rect};
use crate::interactions::Interactions;
use crate::sync::fetch::WebSync;

// =============================================================================
// DOM ELEMENTS
// =============================================================================

/// A live DOM element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement(pub HtmlElement);

impl Trackable for DomElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let Err(e) = self.0.set_attribute(name, value) {
            warn!(name, error = ?e, "set attribute failed");
        }
    }

    fn style(&self, property: &str) -> Option<String> {
        match self.0.style().get_property_value(property) {
            Ok(value) if !value.is_empty() => Some(value),
            Ok(_) => None,
            Err(e) => {
                warn!(property, error = ?e, "read style failed");
                None
            }
        }
    }

    fn set_style(&self, property: &str, value: &str) {
        if let Err(e) = self.0.style().set_property(property, value) {
            warn!(property, error = ?e, "set style failed");
        }
    }

    fn bounds(&self) -> Rect {
        let rect = self.0.get_bounding_client_rect();
        Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
    }

    fn is_connected(&self) -> bool {
        self.0.is_connected()
    }
}

/// A DOM subtree elements are selected from.
#[derive(Debug, Clone)]
pub struct DomContainer(pub Element);

impl Container for DomContainer {
    type Element = DomElement;

    fn select_all(&self, selector: &str) -> Result<Vec<DomElement>, TrackError> {
        let list = self
            .0
            .query_selector_all(selector)
            .map_err(|e| TrackError::Selector { selector: selector.to_owned(), reason: format!("{e:?}") })?;
        let mut elements = Vec::new();
        for i in 0..list.length() {
            let Some(node) = list.item(i) else {
                continue;
            };
            if let Ok(element) = node.dyn_into::<HtmlElement>() {
                elements.push(DomElement(element));
            }
        }
        Ok(elements)
    }
}

// =============================================================================
// POINTER ROUTING
// =============================================================================

struct Session {
    selector: String,
    interactions: RefCell<Interactions<DomElement, WebSync>>,
}

impl Session {
    fn pointer_down(&self, event: &PointerEvent) {
        if event.button() != 0 {
            return;
        }
        let Some(element) = trackable_target(event, &self.selector) else {
            return;
        };

        let pointer = event.pointer_id();
        let started = self
            .interactions
            .borrow_mut()
            .press(pointer, DomElement(element.clone()), client_point(event));
        if started.is_none() {
            return;
        }
        if let Err(e) = element.set_pointer_capture(pointer) {
            warn!(error = ?e, "pointer capture failed");
        }
        event.prevent_default();
    }

    fn pointer_move(&self, event: &PointerEvent) {
        // Outcomes (including dropped events) are logged inside.
        if self.interactions.borrow_mut().motion(event.pointer_id(), client_point(event)).is_some() {
            event.prevent_default();
        }
    }

    fn pointer_up(&self, event: &PointerEvent) {
        self.interactions.borrow_mut().release(event.pointer_id());
    }
}

fn client_point(event: &PointerEvent) -> Point {
    Point::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

/// The nearest ancestor-or-self of the event target matching `selector`.
fn trackable_target(event: &PointerEvent, selector: &str) -> Option<HtmlElement> {
    let Ok(target) = event.target()?.dyn_into::<Element>() else {
        return None;
    };
    match target.closest(selector) {
        Ok(Some(found)) => match found.dyn_into::<HtmlElement>() {
            Ok(element) => Some(element),
            Err(_) => None,
        },
        Ok(None) => None,
        Err(e) => {
            warn!(selector, error = ?e, "closest() failed");
            None
        }
    }
}

fn listen(
    target: &Element,
    kind: &str,
    session: &Rc<Session>,
    handler: fn(&Session, &PointerEvent),
) -> Result<(), JsValue> {
    let session = Rc::clone(session);
    let closure = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| handler(&session, &event));
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Bind drag and resize to every element under `container` matching
/// `config.selector`, now and in the future.
///
/// Registering the same container twice is a no-op.
///
/// # Errors
///
/// Returns the DOM error if a listener cannot be installed, or a message if
/// the selector is rejected.
pub fn register_container(container: &Element, config: &SyncConfig) -> Result<(), JsValue> {
    if container.has_attribute(ATTR_REGISTERED) {
        info!(selector = %config.selector, "container already registered");
        return Ok(());
    }

    let interactions = Interactions::register(&DomContainer(container.clone()), config, WebSync::from_config(config))
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let session = Rc::new(Session {
        selector: config.selector.clone(),
        interactions: RefCell::new(interactions),
    });

    listen(container, "pointerdown", &session, Session::pointer_down)?;
    listen(container, "pointermove", &session, Session::pointer_move)?;
    listen(container, "pointerup", &session, Session::pointer_up)?;
    listen(container, "pointercancel", &session, Session::pointer_up)?;
    listen(container, "lostpointercapture", &session, Session::pointer_up)?;
    container.set_attribute(ATTR_REGISTERED, &config.selector)?;
    Ok(())
}

// =============================================================================
// WASM EXPORTS
// =============================================================================

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // A logger is already installed.
    }
}

/// Activate drag and resize on every `.draggable-button` in the document.
///
/// Returns an empty acknowledgment string; failures are logged.
#[wasm_bindgen]
#[must_use]
pub fn make_draggable() -> String {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        error!("no document to register on");
        return String::new();
    };
    if let Err(e) = register_container(&root, &SyncConfig::default()) {
        error!(error = ?e, "make_draggable failed");
    }
    String::new()
}

/// Activate drag and resize under `container` with a JS config object.
///
/// `config` may be `null`/`undefined` or any subset of
/// `{ selector, endpoint, edge_margin, edges, mode, retries, retry_base_ms }`.
///
/// # Errors
///
/// Returns an error string if the config is malformed or registration fails.
#[wasm_bindgen]
pub fn register(container: &Element, config: JsValue) -> Result<(), JsValue> {
    let config = if config.is_undefined() || config.is_null() {
        SyncConfig::default()
    } else {
        let raw: String = js_sys::JSON::stringify(&config)?.into();
        SyncConfig::from_json(&raw).map_err(|e| JsValue::from_str(&e.to_string()))?
    };
    register_container(container, &config)
}
