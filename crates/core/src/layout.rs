use std::collections::HashMap;

use folio_protocol::{NodeId, Rect};

/// Read-only geometry that only a live layout engine can answer.
pub trait Layout {
    /// Client-space bounding rectangle, if the node is bound and rendered.
    fn rect(&self, node: NodeId) -> Option<Rect>;
    /// Horizontal scroll offset of a scrollable element.
    fn scroll_left(&self, node: NodeId) -> f64;
}

/// Fixed geometry for headless runs.
#[derive(Debug, Clone, Default)]
pub struct StaticLayout {
    rects: HashMap<NodeId, Rect>,
    scroll_left: HashMap<NodeId, f64>,
}

impl StaticLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rect(mut self, node: NodeId, rect: Rect) -> Self {
        self.rects.insert(node, rect);
        self
    }

    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        self.rects.insert(node, rect);
    }

    pub fn set_scroll_left(&mut self, node: NodeId, left: f64) {
        self.scroll_left.insert(node, left);
    }
}

impl Layout for StaticLayout {
    fn rect(&self, node: NodeId) -> Option<Rect> {
        self.rects.get(&node).copied()
    }

    fn scroll_left(&self, node: NodeId) -> f64 {
        self.scroll_left.get(&node).copied().unwrap_or(0.0)
    }
}
