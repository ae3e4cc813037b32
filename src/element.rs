//! Element abstraction: what the handlers need from a trackable element.
//!
//! DESIGN
//! ======
//! Handlers never touch the DOM directly. They go through [`Trackable`], which
//! exposes attributes, inline style and the rendered bounding box. The browser
//! implementation lives in [`crate::web`]; [`MemoryElement`] is a DOM-shaped
//! in-memory stand-in with the same shared-handle semantics (cloning yields
//! another handle to the same element), used natively and in tests.
//!
//! State ownership follows the DOM: accumulated offsets live on the element
//! as attributes, so there is no registry to keep in step with the page.

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::accumulator::{parse_float, px};
use crate::consts::{ATTR_ID, ATTR_X, ATTR_Y, STYLE_HEIGHT, STYLE_WIDTH};
use crate::geom::Rect;

// =============================================================================
// ERROR
// =============================================================================

/// Errors raised while locating or manipulating a trackable element.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackError {
    /// The element has no (or an empty) `data-id` attribute.
    #[error("element has no data-id identifier")]
    MissingIdentifier,

    /// The container rejected the selector.
    #[error("invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },
}

// =============================================================================
// TRAITS
// =============================================================================

/// An element whose position and size can be tracked and rewritten.
///
/// Setters take `&self` because elements are shared handles, as in the DOM.
pub trait Trackable {
    /// Read an attribute, `None` when absent.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Write an attribute.
    fn set_attribute(&self, name: &str, value: &str);

    /// Read an inline style property, `None` when unset or empty.
    fn style(&self, property: &str) -> Option<String>;

    /// Write an inline style property.
    fn set_style(&self, property: &str, value: &str);

    /// Rendered bounding box in viewport pixels.
    fn bounds(&self) -> Rect;

    /// Whether the element is still part of its document.
    fn is_connected(&self) -> bool {
        true
    }

    /// The element's non-empty identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::MissingIdentifier`] when `data-id` is absent or empty.
    fn identifier(&self) -> Result<String, TrackError> {
        match self.attribute(ATTR_ID) {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(TrackError::MissingIdentifier),
        }
    }
}

/// Something elements can be selected from (a document or a subtree).
pub trait Container {
    type Element: Trackable;

    /// All elements under this container matching `selector`, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::Selector`] if the selector cannot be evaluated.
    fn select_all(&self, selector: &str) -> Result<Vec<Self::Element>, TrackError>;
}

// =============================================================================
// IN-MEMORY ELEMENT
// =============================================================================

#[derive(Debug, Default)]
struct MemoryNode {
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    layout_left: f64,
    layout_top: f64,
    detached: bool,
}

/// In-memory element with DOM-like shared-handle semantics.
///
/// Bounds are derived the way a browser would lay the element out: the
/// layout origin shifted by the accumulated `data-x`/`data-y` offset, sized
/// by the inline `width`/`height` style.
#[derive(Debug, Clone, Default)]
pub struct MemoryElement {
    node: Rc<RefCell<MemoryNode>>,
}

impl MemoryElement {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `data-id`.
    #[must_use]
    pub fn with_id(self, id: &str) -> Self {
        self.set_attribute(ATTR_ID, id);
        self
    }

    /// Add a class name.
    #[must_use]
    pub fn with_class(self, class: &str) -> Self {
        self.node.borrow_mut().classes.push(class.to_owned());
        self
    }

    /// Set the inline `width`/`height` style in pixels.
    #[must_use]
    pub fn with_size(self, width: f64, height: f64) -> Self {
        self.set_style(STYLE_WIDTH, &px(width));
        self.set_style(STYLE_HEIGHT, &px(height));
        self
    }

    /// Place the element's untranslated layout box at `(left, top)`.
    #[must_use]
    pub fn at(self, left: f64, top: f64) -> Self {
        {
            let mut node = self.node.borrow_mut();
            node.layout_left = left;
            node.layout_top = top;
        }
        self
    }

    /// Remove the element from its document, as a re-render would.
    pub fn detach(&self) {
        self.node.borrow_mut().detached = true;
    }

    /// Snapshot of all attributes.
    #[must_use]
    pub fn attributes(&self) -> BTreeMap<String, String> {
        self.node.borrow().attributes.clone()
    }

    /// Snapshot of all inline style properties.
    #[must_use]
    pub fn styles(&self) -> BTreeMap<String, String> {
        self.node.borrow().style.clone()
    }

    /// Whether this element matches a simple selector.
    ///
    /// Supported forms: `*`, `.class`, `[attr]` and `[attr="value"]`.
    /// Anything else matches nothing.
    #[must_use]
    pub fn matches(&self, selector: &str) -> bool {
        let node = self.node.borrow();
        let selector = selector.trim();
        if selector == "*" {
            return true;
        }
        if let Some(class) = selector.strip_prefix('.') {
            return node.classes.iter().any(|c| c == class);
        }
        if let Some(inner) = selector.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            return match inner.split_once('=') {
                Some((name, value)) => {
                    let value = value.trim_matches(|c| c == '"' || c == '\'');
                    node.attributes.get(name).is_some_and(|v| v == value)
                }
                None => node.attributes.contains_key(inner),
            };
        }
        false
    }
}

impl PartialEq for MemoryElement {
    /// Identity, like DOM node equality: two handles to the same element.
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }
}

impl Eq for MemoryElement {}

impl Trackable for MemoryElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.node.borrow().attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.node
            .borrow_mut()
            .attributes
            .insert(name.to_owned(), value.to_owned());
    }

    fn style(&self, property: &str) -> Option<String> {
        self.node
            .borrow()
            .style
            .get(property)
            .filter(|v| !v.is_empty())
            .cloned()
    }

    fn set_style(&self, property: &str, value: &str) {
        self.node
            .borrow_mut()
            .style
            .insert(property.to_owned(), value.to_owned());
    }

    fn bounds(&self) -> Rect {
        let node = self.node.borrow();
        let offset = |attr: &str| node.attributes.get(attr).and_then(|v| parse_float(v)).unwrap_or(0.0);
        let size = |prop: &str| node.style.get(prop).and_then(|v| parse_float(v)).unwrap_or(0.0);
        Rect::new(
            node.layout_left + offset(ATTR_X),
            node.layout_top + offset(ATTR_Y),
            size(STYLE_WIDTH),
            size(STYLE_HEIGHT),
        )
    }

    fn is_connected(&self) -> bool {
        !self.node.borrow().detached
    }
}

/// A flat list of in-memory elements acting as a document.
#[derive(Debug, Clone, Default)]
pub struct MemoryContainer {
    elements: Vec<MemoryElement>,
}

impl MemoryContainer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element; returns the container for chaining.
    #[must_use]
    pub fn with(mut self, element: MemoryElement) -> Self {
        self.elements.push(element);
        self
    }

    pub fn push(&mut self, element: MemoryElement) {
        self.elements.push(element);
    }
}

impl Container for MemoryContainer {
    type Element = MemoryElement;

    fn select_all(&self, selector: &str) -> Result<Vec<MemoryElement>, TrackError> {
        if selector.trim().is_empty() {
            return Err(TrackError::Selector { selector: selector.to_owned(), reason: "empty selector".into() });
        }
        Ok(self
            .elements
            .iter()
            .filter(|el| el.matches(selector))
            .cloned()
            .collect())
    }
}
