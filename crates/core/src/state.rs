use folio_protocol::{Point, Size};
use serde::{Deserialize, Serialize};

/// What the bridge knows about the browser when the page boots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    pub viewport: Size,
    pub scroll_y: f64,
    /// `(prefers-reduced-motion: reduce)` matched.
    pub reduced_motion: bool,
    /// The browser supports `loading="lazy"` on images.
    pub lazy_loading: bool,
    /// Seed for decorative randomness.
    pub seed: u64,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            viewport: Size::new(1280.0, 800.0),
            scroll_y: 0.0,
            reduced_motion: false,
            lazy_loading: true,
            seed: 0,
        }
    }
}

/// Page-wide state shared read-only with every component.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub scroll_y: f64,
    pub pointer: Point,
    pub viewport: Size,
    pub reduced_motion: bool,
    pub lazy_loading: bool,
}

impl AppState {
    pub fn new(env: &Environment) -> Self {
        Self {
            scroll_y: env.scroll_y,
            pointer: Point::default(),
            viewport: env.viewport,
            reduced_motion: env.reduced_motion,
            lazy_loading: env.lazy_loading,
        }
    }
}
