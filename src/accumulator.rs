//! Coordinate accumulator: per-element `(x, y)` offsets persisted as attributes.
//!
//! The math is pure ([`drag`], [`resize`]); reading and committing state to an
//! element is kept separate ([`read`], [`commit`]) so the arithmetic can be
//! tested without any element at all.
//!
//! Stored values follow browser number semantics: parsing takes the longest
//! numeric prefix (`"12.5px"` reads as `12.5`) and anything unparsable counts
//! as `0`. Values are never rounded or clamped.

#[cfg(test)]
#[path = "accumulator_test.rs"]
mod accumulator_test;

use crate::consts::{ATTR_X, ATTR_Y, STYLE_TRANSFORM};
use crate::element::Trackable;
use crate::geom::{DeltaRect, Position};

// =============================================================================
// PURE MATH
// =============================================================================

/// Apply an incremental pointer delta.
#[must_use]
pub fn drag(current: Position, dx: f64, dy: f64) -> Position {
    Position::new(current.x + dx, current.y + dy)
}

/// Compensate for edge-anchored resizing.
///
/// Moving the left or top edge shifts the element so the opposite edge stays
/// put; bottom/right edge moves carry zero `left`/`top` deltas.
#[must_use]
pub fn resize(current: Position, delta: &DeltaRect) -> Position {
    Position::new(current.x + delta.left, current.y + delta.top)
}

// =============================================================================
// ELEMENT STATE
// =============================================================================

/// Current accumulated offset of `element`, each axis defaulting to 0.
pub fn read(element: &impl Trackable) -> Position {
    Position::new(coordinate(element.attribute(ATTR_X).as_deref()), coordinate(element.attribute(ATTR_Y).as_deref()))
}

/// Apply `position` as a translate transform and persist it to the attributes.
pub fn commit(element: &impl Trackable, position: Position) {
    element.set_style(STYLE_TRANSFORM, &translate(position));
    element.set_attribute(ATTR_X, &format_number(position.x));
    element.set_attribute(ATTR_Y, &format_number(position.y));
}

/// Parse a stored coordinate, treating missing or non-numeric values as 0.
#[must_use]
pub fn coordinate(raw: Option<&str>) -> f64 {
    raw.and_then(parse_float).unwrap_or(0.0)
}

// =============================================================================
// NUMBER FORMAT
// =============================================================================

/// Parse the longest leading decimal number in `raw`, ignoring leading whitespace.
///
/// Mirrors `parseFloat`: `"10px"` → `10`, `"-.5e1x"` → `-5`,
/// `"-Infinity"` → `-inf`, `"px"` → `None`.
#[must_use]
pub fn parse_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let unsigned = s.strip_prefix(|c| c == '+' || c == '-').unwrap_or(s);
    if unsigned.starts_with("Infinity") {
        return Some(if s.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY });
    }
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    match s[..end].parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => None,
    }
}

/// Format a number the way it is written to attributes (`10`, `10.5`, `-3.25`).
///
/// Negative zero is written as `0`; non-finite values use the browser's
/// spelling (`Infinity`, `-Infinity`, `NaN`) so they read back unchanged.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_owned()
    } else if value.is_nan() {
        "NaN".to_owned()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity".to_owned() } else { "-Infinity".to_owned() }
    } else {
        value.to_string()
    }
}

/// Format a pixel length for a style property.
#[must_use]
pub fn px(value: f64) -> String {
    format!("{}px", format_number(value))
}

/// The translate transform for an accumulated offset.
#[must_use]
pub fn translate(position: Position) -> String {
    format!("translate({}, {})", px(position.x), px(position.y))
}
