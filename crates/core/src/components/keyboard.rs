use folio_protocol::{DomCommand, Key, Listen, NodeId, PageEvent};

use crate::context::{Component, Context};
use crate::css::FOCUS_RING;

pub const KEYBOARD_CLASS: &str = "keyboard-navigation";

/// Shows focus outlines only while the visitor is navigating with Tab.
#[derive(Debug, Default)]
pub struct KeyboardNavigation {
    active: bool,
}

impl KeyboardNavigation {
    pub fn mount(cx: &mut Context<'_>) -> Self {
        cx.subscribe(NodeId::DOCUMENT, Listen::KeyDown);
        cx.subscribe(NodeId::DOCUMENT, Listen::PointerDown);
        cx.emit(DomCommand::InjectStylesheet {
            css: FOCUS_RING.to_string(),
        });
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Component for KeyboardNavigation {
    fn on_event(&mut self, event: &PageEvent, cx: &mut Context<'_>) {
        match event {
            PageEvent::KeyDown {
                node: NodeId::DOCUMENT,
                key: Key::Tab,
            } if !self.active => {
                self.active = true;
                cx.add_class(NodeId::BODY, KEYBOARD_CLASS);
            }
            PageEvent::PointerDown if self.active => {
                self.active = false;
                cx.remove_class(NodeId::BODY, KEYBOARD_CLASS);
            }
            _ => {}
        }
    }
}
