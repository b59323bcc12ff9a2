use folio_protocol::{Listen, NodeId, PageEvent};
use log::debug;

use crate::config::NavbarConfig;
use crate::context::{Component, Context};
use crate::page::PageBindings;
use crate::task::Task;

/// Condenses the fixed navbar and gives it a shadow once the page has
/// scrolled past a threshold.
#[derive(Debug)]
pub struct Navbar {
    nav: NodeId,
    config: NavbarConfig,
    last_scroll: f64,
    ticking: bool,
}

impl Navbar {
    pub fn mount(page: &PageBindings, config: &NavbarConfig, cx: &mut Context<'_>) -> Option<Self> {
        let Some(nav) = page.nav else {
            debug!("navbar: no .main-nav element");
            return None;
        };
        cx.subscribe(NodeId::DOCUMENT, Listen::Scroll);
        Some(Self {
            nav,
            config: config.clone(),
            last_scroll: 0.0,
            ticking: false,
        })
    }

    pub fn is_condensed(&self) -> bool {
        self.last_scroll > self.config.threshold_px
    }

    fn update(&mut self, cx: &mut Context<'_>) {
        let current = cx.state.scroll_y;
        let threshold = self.config.threshold_px;
        if current > threshold && self.last_scroll <= threshold {
            cx.style(self.nav, "box-shadow", "0 4px 20px rgba(0, 0, 0, 0.1)");
            cx.style(self.nav, "padding", "0.8rem 0");
        } else if current <= threshold && self.last_scroll > threshold {
            cx.style(self.nav, "box-shadow", "none");
            cx.style(self.nav, "padding", "1.2rem 0");
        }
        self.last_scroll = current;
    }
}

impl Component for Navbar {
    fn on_event(&mut self, event: &PageEvent, cx: &mut Context<'_>) {
        if matches!(event, PageEvent::Scroll { .. }) && !self.ticking {
            self.ticking = true;
            cx.request_frame(Task::NavbarFrame);
        }
    }

    fn on_task(&mut self, task: &Task, cx: &mut Context<'_>) {
        if *task == Task::NavbarFrame {
            self.ticking = false;
            self.update(cx);
        }
    }
}
