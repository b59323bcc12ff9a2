use serde::{Deserialize, Serialize};

use crate::types::{NodeId, Point};

/// Keys the components react to. Everything else is carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Enter,
    Space,
    Tab,
    ArrowLeft,
    ArrowRight,
    Other(String),
}

impl Key {
    /// Map a `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Enter" => Self::Enter,
            " " => Self::Space,
            "Tab" => Self::Tab,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            other => Self::Other(other.to_string()),
        }
    }

    /// Keys that activate a focused button.
    pub fn activates(&self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersectionEntry {
    pub node: NodeId,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

/// Browser signals delivered to the core.
///
/// `node` is always the element the listener was attached to (the
/// event's `currentTarget`), never the innermost target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PageEvent {
    /// Window scrolled; `y` is the new vertical page offset.
    Scroll { y: f64 },
    PointerMove { position: Point },
    PointerDown,
    PointerEnter { node: NodeId },
    PointerLeave { node: NodeId },
    Click { node: NodeId, position: Point },
    /// `node` is `NodeId::DOCUMENT` for the page-wide listener.
    KeyDown { node: NodeId, key: Key },
    Submit { node: NodeId, fields: Vec<FormField> },
    /// One observer callback's worth of entries, in delivery order.
    Intersection { entries: Vec<IntersectionEntry> },
}

/// Event kinds a component can ask the bridge to listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Listen {
    /// Window scroll (passive). Node is ignored.
    Scroll,
    /// Document pointer movement. Node is ignored.
    PointerMove,
    /// Document pointer down. Node is ignored.
    PointerDown,
    PointerEnter,
    PointerLeave,
    Click,
    KeyDown,
    Submit,
}

impl Listen {
    /// DOM event type name passed to `addEventListener`.
    pub fn dom_name(self) -> &'static str {
        match self {
            Self::Scroll => "scroll",
            Self::PointerMove => "mousemove",
            Self::PointerDown => "mousedown",
            Self::PointerEnter => "mouseenter",
            Self::PointerLeave => "mouseleave",
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::Submit => "submit",
        }
    }

    /// Whether the listener belongs on the window/document rather than on a
    /// bound element.
    pub fn is_global(self) -> bool {
        matches!(self, Self::Scroll | Self::PointerMove | Self::PointerDown)
    }
}

/// A request to forward events of `kind` on `node` to the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Subscription {
    pub node: NodeId,
    pub kind: Listen,
}

impl Subscription {
    pub fn new(node: NodeId, kind: Listen) -> Self {
        // Global listeners are keyed on the document so duplicates collapse.
        let node = if kind.is_global() {
            NodeId::DOCUMENT
        } else {
            node
        };
        Self { node, kind }
    }
}
