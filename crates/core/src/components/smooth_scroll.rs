use folio_protocol::{DomCommand, Listen, PageEvent};
use log::debug;

use crate::config::SmoothScrollConfig;
use crate::context::{Component, Context};
use crate::page::{Anchor, PageBindings};

/// In-page links scroll smoothly, leaving room for the fixed navbar.
#[derive(Debug)]
pub struct SmoothScroll {
    anchors: Vec<Anchor>,
    config: SmoothScrollConfig,
}

impl SmoothScroll {
    pub fn mount(page: &PageBindings, config: &SmoothScrollConfig, cx: &mut Context<'_>) -> Option<Self> {
        if page.anchors.is_empty() {
            debug!("smooth-scroll: no in-page links");
            return None;
        }
        for anchor in &page.anchors {
            cx.subscribe(anchor.node, Listen::Click);
        }
        Some(Self {
            anchors: page.anchors.clone(),
            config: config.clone(),
        })
    }

    /// Follow `anchor`. Returns `false` when the link is left to the
    /// browser: a bare `#`, an empty href, or a target that did not
    /// resolve.
    pub fn follow(&self, anchor: &Anchor, cx: &mut Context<'_>) -> bool {
        if anchor.href.is_empty() || anchor.href == "#" {
            return false;
        }
        let Some(target) = anchor.target else {
            return false;
        };
        let Some(rect) = cx.layout.rect(target) else {
            return false;
        };
        cx.prevent_default();
        let top = rect.y + cx.state.scroll_y - self.config.offset_px;
        cx.emit(DomCommand::ScrollWindowTo { top, smooth: true });
        cx.emit(DomCommand::Focus {
            node: target,
            prevent_scroll: true,
        });
        true
    }
}

impl Component for SmoothScroll {
    fn on_event(&mut self, event: &PageEvent, cx: &mut Context<'_>) {
        let PageEvent::Click { node, .. } = *event else {
            return;
        };
        if let Some(anchor) = self.anchors.iter().find(|a| a.node == node) {
            self.follow(anchor, cx);
        }
    }
}
