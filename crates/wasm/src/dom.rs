//! Element registry and command application.

use std::collections::HashMap;

use folio_core::page::{
    Anchor, FilterButton, LazyImage, PageBindings, ParallaxLayer, ProjectCard,
    parse_parallax_speed, selectors,
};
use folio_protocol::{DomCommand, NodeId};
use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, FocusOptions, HtmlElement, HtmlFormElement, ScrollBehavior,
    ScrollToOptions, Window,
};

/// Maps [`NodeId`]s to live elements.
///
/// Bound elements are numbered from [`NodeId::FIRST_BOUND`] in binding
/// order; an element matched by several selectors keeps its first id.
/// Elements the core creates are stored under the id it picked.
pub struct Registry {
    document: Document,
    bound: Vec<Element>,
    dynamic: HashMap<NodeId, Element>,
}

impl Registry {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            bound: Vec::new(),
            dynamic: HashMap::new(),
        }
    }

    pub fn bind(&mut self, element: Element) -> NodeId {
        if let Some(node) = self.lookup(&element) {
            return node;
        }
        self.bound.push(element);
        bound_id(self.bound.len() - 1)
    }

    /// Id of an already bound element.
    pub fn lookup(&self, element: &Element) -> Option<NodeId> {
        self.bound
            .iter()
            .position(|e| e == element)
            .map(bound_id)
    }

    pub fn element(&self, node: NodeId) -> Option<Element> {
        match node {
            NodeId::BODY => self.document.body().map(Element::from),
            NodeId::ROOT => self.document.document_element(),
            NodeId::HEAD => self.document.head().map(Element::from),
            node if node.is_dynamic() => self.dynamic.get(&node).cloned(),
            NodeId(n) if n >= NodeId::FIRST_BOUND => {
                self.bound.get((n - NodeId::FIRST_BOUND) as usize).cloned()
            }
            _ => None,
        }
    }

    fn html(&self, node: NodeId) -> Option<HtmlElement> {
        self.element(node)?.dyn_into::<HtmlElement>().ok()
    }

    /// Apply one command. `Observe` belongs to the driver and is ignored
    /// here. Commands for nodes that no longer exist are dropped.
    pub fn apply(&mut self, window: &Window, command: &DomCommand) -> Result<(), JsValue> {
        match command {
            DomCommand::AddClass { node, class } => {
                if let Some(el) = self.element(*node) {
                    el.class_list().add_1(class)?;
                }
            }
            DomCommand::RemoveClass { node, class } => {
                if let Some(el) = self.element(*node) {
                    el.class_list().remove_1(class)?;
                }
            }
            DomCommand::SetStyle {
                node,
                property,
                value,
            } => {
                if let Some(el) = self.html(*node) {
                    el.style().set_property(property, value)?;
                }
            }
            DomCommand::ClearStyle { node, property } => {
                if let Some(el) = self.html(*node) {
                    el.style().remove_property(property)?;
                }
            }
            DomCommand::SetAttribute { node, name, value } => {
                if let Some(el) = self.element(*node) {
                    el.set_attribute(name, value)?;
                }
            }
            DomCommand::SetText { node, text } => {
                if let Some(el) = self.element(*node) {
                    el.set_text_content(Some(text));
                }
            }
            DomCommand::ScrollWindowTo { top, smooth } => {
                let options = ScrollToOptions::new();
                options.set_top(*top);
                options.set_behavior(behavior(*smooth));
                window.scroll_to_with_scroll_to_options(&options);
            }
            DomCommand::ScrollElementTo { node, left, smooth } => {
                if let Some(el) = self.element(*node) {
                    let options = ScrollToOptions::new();
                    options.set_left(*left);
                    options.set_behavior(behavior(*smooth));
                    el.scroll_to_with_scroll_to_options(&options);
                }
            }
            DomCommand::Focus {
                node,
                prevent_scroll,
            } => {
                if let Some(el) = self.html(*node) {
                    let options = FocusOptions::new();
                    options.set_prevent_scroll(*prevent_scroll);
                    el.focus_with_options(&options)?;
                }
            }
            DomCommand::CreateElement {
                node,
                parent,
                tag,
                class,
                css_text,
                text,
            } => {
                let Some(host) = self.element(*parent) else {
                    debug!("dom: parent {parent} of {node} is gone");
                    return Ok(());
                };
                let el = self.document.create_element(tag)?;
                if let Some(class) = class {
                    el.set_class_name(class);
                }
                if let Some(css) = css_text
                    && let Some(html) = el.dyn_ref::<HtmlElement>()
                {
                    html.style().set_css_text(css);
                }
                if let Some(text) = text {
                    el.set_text_content(Some(text));
                }
                host.append_child(&el)?;
                self.dynamic.insert(*node, el);
            }
            DomCommand::RemoveElement { node } => {
                if let Some(el) = self.dynamic.remove(node) {
                    el.remove();
                }
            }
            DomCommand::InjectStylesheet { css } => {
                let Some(head) = self.element(NodeId::HEAD) else {
                    debug!("dom: document has no <head>");
                    return Ok(());
                };
                let style = self.document.create_element("style")?;
                style.set_text_content(Some(css));
                head.append_child(&style)?;
            }
            DomCommand::SetRootProperty { name, value } => {
                if let Some(root) = self.html(NodeId::ROOT) {
                    root.style().set_property(name, value)?;
                }
            }
            DomCommand::ForceReflow { node } => {
                if let Some(el) = self.html(*node) {
                    // Reading layout flushes pending style changes.
                    let _ = el.offset_width();
                }
            }
            DomCommand::ResetForm { node } => {
                if let Some(form) = self
                    .element(*node)
                    .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
                {
                    form.reset();
                }
            }
            DomCommand::Observe { .. } => {}
        }
        Ok(())
    }
}

fn bound_id(index: usize) -> NodeId {
    NodeId(NodeId::FIRST_BOUND + index as u32)
}

fn behavior(smooth: bool) -> ScrollBehavior {
    if smooth {
        ScrollBehavior::Smooth
    } else {
        ScrollBehavior::Auto
    }
}

/// Resolve every selector the components use, binding matches into
/// `registry`.
pub fn bind_page(document: &Document, registry: &mut Registry) -> Result<PageBindings, JsValue> {
    let mut binder = Binder { document, registry };

    let parallax = binder
        .all(selectors::PARALLAX)?
        .into_iter()
        .filter_map(|el| {
            let speed = parse_parallax_speed(&el.get_attribute("data-parallax")?)?;
            Some((el, speed))
        })
        .map(|(el, speed)| ParallaxLayer {
            node: binder.registry.bind(el),
            speed,
        })
        .collect();

    let filter_buttons = binder
        .all(selectors::FILTER_BUTTONS)?
        .into_iter()
        .map(|el| FilterButton {
            filter: el.get_attribute("data-filter"),
            node: binder.registry.bind(el),
        })
        .collect();

    let project_cards = binder
        .all(selectors::PROJECT_CARDS)?
        .into_iter()
        .map(|el| ProjectCard {
            category: el.get_attribute("data-category"),
            node: binder.registry.bind(el),
        })
        .collect();

    let mut anchors = Vec::new();
    for el in binder.all(selectors::ANCHORS)? {
        let href = el.get_attribute("href").unwrap_or_default();
        let target = if href.len() > 1 {
            // Fragments that are not valid selectors resolve to nothing.
            document.query_selector(&href).ok().flatten()
        } else {
            None
        };
        anchors.push(Anchor {
            node: binder.registry.bind(el),
            href,
            target: target.map(|t| binder.registry.bind(t)),
        });
    }

    let lazy_images = binder
        .all(selectors::LAZY_IMAGES)?
        .into_iter()
        .map(|el| LazyImage {
            data_src: el.get_attribute("data-src"),
            node: binder.registry.bind(el),
        })
        .collect();

    Ok(PageBindings {
        typing_text: binder.one(selectors::TYPING_TEXT)?,
        theme_toggle: binder.one(selectors::THEME_TOGGLE)?,
        hero: binder.one(selectors::HERO)?,
        shape_container: binder.one(selectors::SHAPE_CONTAINER)?,
        shapes: binder.nodes(selectors::SHAPES)?,
        parallax,
        timeline: binder.one(selectors::TIMELINE)?,
        timeline_prev: binder.one(selectors::TIMELINE_PREV)?,
        timeline_next: binder.one(selectors::TIMELINE_NEXT)?,
        timeline_items: binder.nodes(selectors::TIMELINE_ITEMS)?,
        filter_buttons,
        project_cards,
        anchors,
        nav: binder.one(selectors::NAV)?,
        scroll_top: binder.one(selectors::SCROLL_TOP)?,
        contact_form: binder.one(selectors::CONTACT_FORM)?,
        spring_buttons: binder.nodes(selectors::SPRING_BUTTONS)?,
        spring_cards: binder.nodes(selectors::SPRING_CARDS)?,
        ripple_hosts: binder.nodes(selectors::RIPPLE_HOSTS)?,
        sections: binder.nodes(selectors::SECTIONS)?,
        lazy_images,
        particle_container: binder.one(selectors::PARTICLE_CONTAINER)?,
    })
}

struct Binder<'a> {
    document: &'a Document,
    registry: &'a mut Registry,
}

impl Binder<'_> {
    fn one(&mut self, selector: &str) -> Result<Option<NodeId>, JsValue> {
        Ok(self
            .document
            .query_selector(selector)?
            .map(|el| self.registry.bind(el)))
    }

    fn all(&self, selector: &str) -> Result<Vec<Element>, JsValue> {
        let list = self.document.query_selector_all(selector)?;
        Ok((0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|n| n.dyn_into::<Element>().ok())
            .collect())
    }

    fn nodes(&mut self, selector: &str) -> Result<Vec<NodeId>, JsValue> {
        Ok(self
            .all(selector)?
            .into_iter()
            .map(|el| self.registry.bind(el))
            .collect())
    }
}
