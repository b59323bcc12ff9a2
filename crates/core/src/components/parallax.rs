use folio_protocol::{Listen, NodeId, PageEvent};
use log::debug;

use crate::config::ParallaxConfig;
use crate::context::{Component, Context};
use crate::css::px;
use crate::page::{PageBindings, ParallaxLayer};
use crate::task::Task;

/// Shifts `[data-parallax]` layers against the scroll direction, at most
/// once per frame.
#[derive(Debug)]
pub struct Parallax {
    layers: Vec<ParallaxLayer>,
    config: ParallaxConfig,
    last_scroll: f64,
    ticking: bool,
}

impl Parallax {
    pub fn mount(page: &PageBindings, config: &ParallaxConfig, cx: &mut Context<'_>) -> Option<Self> {
        if page.parallax.is_empty() {
            debug!("parallax: no [data-parallax] elements");
            return None;
        }
        cx.subscribe(NodeId::DOCUMENT, Listen::Scroll);
        let parallax = Self {
            layers: page.parallax.clone(),
            config: config.clone(),
            last_scroll: 0.0,
            ticking: false,
        };
        parallax.update(cx);
        Some(parallax)
    }

    fn update(&self, cx: &mut Context<'_>) {
        let scrolled = cx.state.scroll_y;
        for layer in &self.layers {
            cx.style(
                layer.node,
                "transform",
                format!("translateY({})", px(-(scrolled * layer.speed))),
            );
        }
    }
}

impl Component for Parallax {
    fn on_event(&mut self, event: &PageEvent, cx: &mut Context<'_>) {
        let PageEvent::Scroll { y } = *event else {
            return;
        };
        if (y - self.last_scroll).abs() < self.config.min_delta_px {
            return;
        }
        self.last_scroll = y;
        if !self.ticking {
            self.ticking = true;
            cx.request_frame(Task::ParallaxFrame);
        }
    }

    fn on_task(&mut self, task: &Task, cx: &mut Context<'_>) {
        if *task == Task::ParallaxFrame {
            self.ticking = false;
            self.update(cx);
        }
    }
}
