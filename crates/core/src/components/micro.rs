use folio_protocol::{DomCommand, Listen, NodeId, PageEvent, Point};

use crate::config::MicroConfig;
use crate::context::{Component, Context};
use crate::css::{EASE, RIPPLE_KEYFRAMES, SPRING, px, transition_all};
use crate::page::PageBindings;
use crate::task::Task;

const BUTTON_LEAVE_SECS: f64 = 0.3;
const CARD_LEAVE_SECS: f64 = 0.4;
const ENTER_SECS: f64 = 0.6;

/// Hover springs on buttons and cards, plus a click ripple.
#[derive(Debug)]
pub struct MicroInteractions {
    buttons: Vec<NodeId>,
    cards: Vec<NodeId>,
    ripple_hosts: Vec<NodeId>,
    config: MicroConfig,
}

impl MicroInteractions {
    pub fn mount(page: &PageBindings, config: &MicroConfig, cx: &mut Context<'_>) -> Self {
        for &node in page.spring_buttons.iter().chain(&page.spring_cards) {
            cx.subscribe(node, Listen::PointerEnter);
            cx.subscribe(node, Listen::PointerLeave);
        }
        for &host in &page.ripple_hosts {
            cx.subscribe(host, Listen::Click);
        }
        cx.emit(DomCommand::InjectStylesheet {
            css: RIPPLE_KEYFRAMES.to_string(),
        });
        Self {
            buttons: page.spring_buttons.clone(),
            cards: page.spring_cards.clone(),
            ripple_hosts: page.ripple_hosts.clone(),
            config: config.clone(),
        }
    }

    /// Transition used when the pointer leaves `node`. Cards settle a bit
    /// slower than buttons; an element matching both counts as a card.
    fn leave_secs(&self, node: NodeId) -> Option<f64> {
        if self.cards.contains(&node) {
            Some(CARD_LEAVE_SECS)
        } else if self.buttons.contains(&node) {
            Some(BUTTON_LEAVE_SECS)
        } else {
            None
        }
    }

    fn ripple(&self, host: NodeId, click: Point, cx: &mut Context<'_>) {
        let Some(rect) = cx.layout.rect(host) else {
            return;
        };
        let size = rect.w.max(rect.h);
        let x = click.x - rect.x - size / 2.0;
        let y = click.y - rect.y - size / 2.0;
        let css = format!(
            "width: {size}; height: {size}; left: {x}; top: {y}; position: absolute; \
             border-radius: 50%; background: rgba(255, 255, 255, 0.6); transform: scale(0); \
             animation: ripple 0.6s ease-out; pointer-events: none;",
            size = px(size),
            x = px(x),
            y = px(y),
        );

        cx.style(host, "position", "relative");
        cx.style(host, "overflow", "hidden");
        let ripple = cx.create_node();
        cx.emit(DomCommand::CreateElement {
            node: ripple,
            parent: host,
            tag: "span".into(),
            class: Some("ripple".into()),
            css_text: Some(css),
            text: None,
        });
        cx.set_timeout(self.config.ripple_ms, Task::RemoveRipple(ripple));
    }
}

impl Component for MicroInteractions {
    fn on_event(&mut self, event: &PageEvent, cx: &mut Context<'_>) {
        match *event {
            PageEvent::PointerEnter { node } if self.leave_secs(node).is_some() => {
                cx.style(node, "transition", transition_all(ENTER_SECS, SPRING));
            }
            PageEvent::PointerLeave { node } => {
                if let Some(secs) = self.leave_secs(node) {
                    cx.style(node, "transition", transition_all(secs, EASE));
                }
            }
            PageEvent::Click { node, position } if self.ripple_hosts.contains(&node) => {
                self.ripple(node, position, cx);
            }
            _ => {}
        }
    }

    fn on_task(&mut self, task: &Task, cx: &mut Context<'_>) {
        if let Task::RemoveRipple(node) = *task {
            cx.emit(DomCommand::RemoveElement { node });
        }
    }
}
