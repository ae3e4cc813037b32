//! Shared constants: DOM contract names and default tuning values.

// ── DOM contract ────────────────────────────────────────────────

/// Attribute carrying the element's identifier.
pub const ATTR_ID: &str = "data-id";

/// Attribute carrying the accumulated horizontal offset in pixels.
pub const ATTR_X: &str = "data-x";

/// Attribute carrying the accumulated vertical offset in pixels.
pub const ATTR_Y: &str = "data-y";

/// Marker set on a container once its pointer listeners are installed.
pub const ATTR_REGISTERED: &str = "data-dragsync";

/// Style property holding the translation transform.
pub const STYLE_TRANSFORM: &str = "transform";

/// Style property holding the rendered width.
pub const STYLE_WIDTH: &str = "width";

/// Style property holding the rendered height.
pub const STYLE_HEIGHT: &str = "height";

/// Style property set to `none` on bound elements so touch input drives the
/// gesture instead of scrolling the page.
pub const STYLE_TOUCH_ACTION: &str = "touch-action";

// ── Defaults ────────────────────────────────────────────────────

/// Selector matched by the zero-argument bootstrap.
pub const DEFAULT_SELECTOR: &str = ".draggable-button";

/// Endpoint receiving position updates.
pub const DEFAULT_ENDPOINT: &str = "/update_button_positions";

/// Distance from an edge, in pixels, within which a pointer-down starts a resize.
pub const DEFAULT_EDGE_MARGIN_PX: f64 = 8.0;

/// Delivery attempts per update in coalesced mode.
pub const DEFAULT_RETRIES: usize = 3;

/// Base delay in milliseconds for linear retry back-off in coalesced mode.
pub const DEFAULT_RETRY_BASE_MS: u64 = 50;
