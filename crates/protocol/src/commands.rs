use serde::{Deserialize, Serialize};

use crate::types::NodeId;

/// A single, stateless DOM mutation.
///
/// The core emits a `Vec<DomCommand>` for every event, timer and frame it
/// processes. The bridge applies them in order; each command carries all
/// the data it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DomCommand {
    AddClass {
        node: NodeId,
        class: String,
    },

    RemoveClass {
        node: NodeId,
        class: String,
    },

    /// Set one inline style property (`element.style.setProperty`).
    SetStyle {
        node: NodeId,
        property: String,
        value: String,
    },

    /// Reset one inline style property to the empty string.
    ClearStyle {
        node: NodeId,
        property: String,
    },

    SetAttribute {
        node: NodeId,
        name: String,
        value: String,
    },

    SetText {
        node: NodeId,
        text: String,
    },

    /// Scroll the window vertically.
    ScrollWindowTo { top: f64, smooth: bool },

    /// Scroll a scrollable element horizontally.
    ScrollElementTo {
        node: NodeId,
        left: f64,
        smooth: bool,
    },

    Focus {
        node: NodeId,
        prevent_scroll: bool,
    },

    /// Create an element under `parent`. `node` is the id the core will use
    /// to refer to it from now on.
    CreateElement {
        node: NodeId,
        parent: NodeId,
        tag: String,
        class: Option<String>,
        css_text: Option<String>,
        text: Option<String>,
    },

    RemoveElement { node: NodeId },

    /// Append a `<style>` element with the given text to `<head>`.
    InjectStylesheet { css: String },

    /// Set a CSS custom property on the root element.
    SetRootProperty { name: String, value: String },

    /// Read layout from the element so a following style change restarts
    /// its CSS animation.
    ForceReflow { node: NodeId },

    ResetForm { node: NodeId },

    /// Start reporting viewport intersection changes for `node` as
    /// `PageEvent::Intersection`, using the given visibility threshold.
    Observe { node: NodeId, threshold: f64 },
}

impl DomCommand {
    pub fn add_class(node: NodeId, class: impl Into<String>) -> Self {
        Self::AddClass {
            node,
            class: class.into(),
        }
    }

    pub fn remove_class(node: NodeId, class: impl Into<String>) -> Self {
        Self::RemoveClass {
            node,
            class: class.into(),
        }
    }

    pub fn set_style(node: NodeId, property: impl Into<String>, value: impl Into<String>) -> Self {
        Self::SetStyle {
            node,
            property: property.into(),
            value: value.into(),
        }
    }

    pub fn clear_style(node: NodeId, property: impl Into<String>) -> Self {
        Self::ClearStyle {
            node,
            property: property.into(),
        }
    }

    pub fn set_attribute(node: NodeId, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::SetAttribute {
            node,
            name: name.into(),
            value: value.into(),
        }
    }

    /// The node this command mutates, if it targets a single one.
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Self::AddClass { node, .. }
            | Self::RemoveClass { node, .. }
            | Self::SetStyle { node, .. }
            | Self::ClearStyle { node, .. }
            | Self::SetAttribute { node, .. }
            | Self::SetText { node, .. }
            | Self::ScrollElementTo { node, .. }
            | Self::Focus { node, .. }
            | Self::CreateElement { node, .. }
            | Self::RemoveElement { node }
            | Self::ForceReflow { node }
            | Self::ResetForm { node }
            | Self::Observe { node, .. } => Some(*node),
            Self::ScrollWindowTo { .. }
            | Self::InjectStylesheet { .. }
            | Self::SetRootProperty { .. } => None,
        }
    }
}
