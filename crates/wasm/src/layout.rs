use folio_core::Layout;
use folio_protocol::{NodeId, Rect};

use crate::dom::Registry;

/// Geometry read straight from the live document.
pub struct DomLayout<'a> {
    registry: &'a Registry,
}

impl<'a> DomLayout<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }
}

impl Layout for DomLayout<'_> {
    fn rect(&self, node: NodeId) -> Option<Rect> {
        let r = self.registry.element(node)?.get_bounding_client_rect();
        Some(Rect::new(r.left(), r.top(), r.width(), r.height()))
    }

    fn scroll_left(&self, node: NodeId) -> f64 {
        self.registry
            .element(node)
            .map_or(0.0, |el| f64::from(el.scroll_left()))
    }
}
