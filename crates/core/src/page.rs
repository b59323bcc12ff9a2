//! Element references a page offers to the components.
//!
//! The bridge resolves every selector in [`selectors`] once at startup and
//! hands the result over as [`PageBindings`]. Components check the fields
//! they need when they mount; nothing queries the document afterwards.

use folio_protocol::NodeId;
use serde::{Deserialize, Serialize};

/// CSS selectors the bridge resolves into [`PageBindings`].
pub mod selectors {
    pub const TYPING_TEXT: &str = ".typing-text";
    pub const THEME_TOGGLE: &str = ".theme-toggle";
    pub const HERO: &str = "#hero-3d";
    pub const SHAPE_CONTAINER: &str = ".shape-container";
    pub const SHAPES: &str = ".shape";
    pub const PARALLAX: &str = "[data-parallax]";
    pub const TIMELINE: &str = "#timeline-container";
    pub const TIMELINE_PREV: &str = ".timeline-nav-prev";
    pub const TIMELINE_NEXT: &str = ".timeline-nav-next";
    pub const TIMELINE_ITEMS: &str = ".timeline-item";
    pub const FILTER_BUTTONS: &str = ".filter-btn";
    pub const PROJECT_CARDS: &str = ".project-card";
    pub const ANCHORS: &str = "a[href^=\"#\"]";
    pub const NAV: &str = ".main-nav";
    pub const SCROLL_TOP: &str = "#scrollToTop";
    pub const CONTACT_FORM: &str = "#contact-form";
    pub const SPRING_BUTTONS: &str = "button, .cta-button, .nav-link";
    pub const SPRING_CARDS: &str = ".project-card, .skill-item, .timeline-content";
    pub const RIPPLE_HOSTS: &str = ".cta-button, .filter-btn, .contact-link";
    pub const SECTIONS: &str = "section";
    pub const LAZY_IMAGES: &str = "img[loading=\"lazy\"]";
    pub const PARTICLE_CONTAINER: &str = ".particle-container";
}

/// A `[data-parallax]` element with its parsed speed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallaxLayer {
    pub node: NodeId,
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterButton {
    pub node: NodeId,
    /// Value of `data-filter`; `"all"` matches every card. A button
    /// without one selects the cards that have no category.
    pub filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCard {
    pub node: NodeId,
    /// Value of `data-category`, if present.
    #[serde(default)]
    pub category: Option<String>,
}

/// An in-page link and the element its fragment resolved to, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub node: NodeId,
    pub href: String,
    #[serde(default)]
    pub target: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LazyImage {
    pub node: NodeId,
    /// Value of `data-src`, if present.
    #[serde(default)]
    pub data_src: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageBindings {
    pub typing_text: Option<NodeId>,
    pub theme_toggle: Option<NodeId>,
    pub hero: Option<NodeId>,
    pub shape_container: Option<NodeId>,
    pub shapes: Vec<NodeId>,
    pub parallax: Vec<ParallaxLayer>,
    pub timeline: Option<NodeId>,
    pub timeline_prev: Option<NodeId>,
    pub timeline_next: Option<NodeId>,
    pub timeline_items: Vec<NodeId>,
    pub filter_buttons: Vec<FilterButton>,
    pub project_cards: Vec<ProjectCard>,
    pub anchors: Vec<Anchor>,
    pub nav: Option<NodeId>,
    pub scroll_top: Option<NodeId>,
    pub contact_form: Option<NodeId>,
    pub spring_buttons: Vec<NodeId>,
    pub spring_cards: Vec<NodeId>,
    pub ripple_hosts: Vec<NodeId>,
    pub sections: Vec<NodeId>,
    pub lazy_images: Vec<LazyImage>,
    pub particle_container: Option<NodeId>,
}

impl PageBindings {
    /// Parse bindings from JSON (fixtures, server-rendered snapshots).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Parse a `data-parallax` value. Rejects anything that is not a finite
/// number so a bad attribute never produces a `NaN` transform.
pub fn parse_parallax_speed(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_to_absent() {
        let page = PageBindings::from_json(r#"{ "typing_text": 20 }"#).unwrap();
        assert_eq!(page.typing_text, Some(NodeId(20)));
        assert!(page.theme_toggle.is_none());
        assert!(page.project_cards.is_empty());
    }

    #[test]
    fn parallax_speed_parsing() {
        assert_eq!(parse_parallax_speed("0.5"), Some(0.5));
        assert_eq!(parse_parallax_speed(" -0.2 "), Some(-0.2));
        assert_eq!(parse_parallax_speed("fast"), None);
        assert_eq!(parse_parallax_speed("NaN"), None);
        assert_eq!(parse_parallax_speed(""), None);
    }
}
