use serde::{Deserialize, Serialize};

/// Opaque handle to a DOM node.
///
/// The bridge hands out ids for the elements it binds at startup; the core
/// allocates ids for elements it creates itself. A handful of well-known
/// nodes have fixed ids so both sides can name them without a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The document itself (target of page-wide listeners).
    pub const DOCUMENT: NodeId = NodeId(0);
    /// `document.body`.
    pub const BODY: NodeId = NodeId(1);
    /// `document.documentElement`, where root CSS custom properties live.
    pub const ROOT: NodeId = NodeId(2);
    /// `document.head`, where injected stylesheets go.
    pub const HEAD: NodeId = NodeId(3);

    /// First id the bridge may assign to a bound element.
    pub const FIRST_BOUND: u32 = 16;
    /// First id the core may assign to an element it creates.
    pub const FIRST_DYNAMIC: u32 = 0x8000_0000;

    /// Whether this id names an element created by the core.
    pub fn is_dynamic(self) -> bool {
        self.0 >= Self::FIRST_DYNAMIC
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Client-space rectangle, as returned by `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_ids_are_below_bound_range() {
        for id in [NodeId::DOCUMENT, NodeId::BODY, NodeId::ROOT, NodeId::HEAD] {
            assert!(id.0 < NodeId::FIRST_BOUND);
            assert!(!id.is_dynamic());
        }
        assert!(NodeId(NodeId::FIRST_DYNAMIC).is_dynamic());
    }

    #[test]
    fn rect_center() {
        let r = Rect::new(100.0, 50.0, 200.0, 100.0);
        assert_eq!(r.center(), Point::new(200.0, 100.0));
    }

    #[test]
    fn zero_sized_rect_is_empty() {
        assert!(Rect::new(10.0, 10.0, 0.0, 40.0).is_empty());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn node_id_serializes_as_number() {
        let json = serde_json::to_string(&NodeId(42)).unwrap_or_default();
        assert_eq!(json, "42");
    }
}
