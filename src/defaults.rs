//! Default figure parameters and interaction settings.

use glam::DVec2;

use crate::types::Degrees;

/// Zoom factor the camera starts at
pub const INITIAL_SCALE: f64 = 3.0;
/// Lower clamp for the zoom factor
pub const SCALE_MIN: f64 = 0.1;
/// Scroll delta divisor when converting wheel ticks to scale changes
pub const ZOOM_SENSITIVITY: f64 = 5.0;
/// Accumulated |scroll delta| required before a batched redraw fires
pub const ZOOM_DEBOUNCE: f64 = 5.0;

/// Where figures start drawing from
pub const FIGURE_ORIGIN: DVec2 = DVec2::new(-200.0, 0.0);
/// Heading figures start with
pub const FIGURE_HEADING: Degrees = Degrees(0.0);

/// Branch length below which tree recursion stops
pub const TREE_MIN_BRANCH: f64 = 5.0;

// Default parameters per figure (key bindings '1'..'4')
pub const KOCH_ORDER: i32 = 4;
pub const KOCH_SIZE: f64 = 400.0;
pub const SIERPINSKI_ORDER: i32 = 4;
pub const SIERPINSKI_SIZE: f64 = 400.0;
pub const TREE_BRANCH: f64 = 100.0;
pub const TREE_SHORTEN: f64 = 15.0;
pub const TREE_ANGLE: Degrees = Degrees(30.0);
pub const DRAGON_ORDER: i32 = 10;
pub const DRAGON_SIZE: f64 = 200.0;
