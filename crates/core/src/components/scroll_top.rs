use folio_protocol::{DomCommand, Listen, NodeId, PageEvent};
use log::debug;

use crate::config::ScrollTopConfig;
use crate::context::{Component, Context};
use crate::page::PageBindings;
use crate::task::Task;

const VISIBLE_CLASS: &str = "visible";

/// "Back to top" button: shown once the page is scrolled past the
/// threshold, scrolls smoothly to the top when clicked.
#[derive(Debug)]
pub struct ScrollToTop {
    button: NodeId,
    config: ScrollTopConfig,
    visible: bool,
    ticking: bool,
}

impl ScrollToTop {
    pub fn mount(page: &PageBindings, config: &ScrollTopConfig, cx: &mut Context<'_>) -> Option<Self> {
        let Some(button) = page.scroll_top else {
            debug!("scroll-to-top: no #scrollToTop element");
            return None;
        };
        cx.subscribe(NodeId::DOCUMENT, Listen::Scroll);
        cx.subscribe(button, Listen::Click);
        Some(Self {
            button,
            config: config.clone(),
            visible: false,
            ticking: false,
        })
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Visible strictly above the threshold.
    pub fn should_show(&self, scroll_y: f64) -> bool {
        scroll_y > self.config.threshold_px
    }

    fn update(&mut self, cx: &mut Context<'_>) {
        let show = self.should_show(cx.state.scroll_y);
        if show == self.visible {
            return;
        }
        if show {
            cx.add_class(self.button, VISIBLE_CLASS);
        } else {
            cx.remove_class(self.button, VISIBLE_CLASS);
        }
        self.visible = show;
    }
}

impl Component for ScrollToTop {
    fn on_event(&mut self, event: &PageEvent, cx: &mut Context<'_>) {
        match event {
            PageEvent::Scroll { .. } if !self.ticking => {
                self.ticking = true;
                cx.request_frame(Task::ScrollTopFrame);
            }
            PageEvent::Click { node, .. } if *node == self.button => {
                cx.emit(DomCommand::ScrollWindowTo {
                    top: 0.0,
                    smooth: true,
                });
            }
            _ => {}
        }
    }

    fn on_task(&mut self, task: &Task, cx: &mut Context<'_>) {
        if *task == Task::ScrollTopFrame {
            self.ticking = false;
            self.update(cx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::Bench;
    use folio_protocol::Point;

    const BUTTON: NodeId = NodeId(70);

    fn bench() -> (Bench, ScrollToTop) {
        let mut bench = Bench::new();
        let page = PageBindings {
            scroll_top: Some(BUTTON),
            ..Default::default()
        };
        let button = bench
            .with_cx(|cx| ScrollToTop::mount(&page, &ScrollTopConfig::default(), cx))
            .unwrap();
        (bench, button)
    }

    fn scroll_to(bench: &mut Bench, button: &mut ScrollToTop, y: f64) -> Vec<DomCommand> {
        bench.event(button, PageEvent::Scroll { y });
        bench.frame(button);
        bench.commands()
    }

    #[test]
    fn hidden_at_exactly_the_threshold() {
        let (mut bench, mut button) = bench();
        assert!(scroll_to(&mut bench, &mut button, 300.0).is_empty());
        assert!(!button.is_visible());
    }

    #[test]
    fn visible_just_past_the_threshold_and_hidden_again_below() {
        let (mut bench, mut button) = bench();
        assert_eq!(
            scroll_to(&mut bench, &mut button, 301.0),
            vec![DomCommand::add_class(BUTTON, "visible")]
        );
        assert!(button.is_visible());

        assert_eq!(
            scroll_to(&mut bench, &mut button, 300.0),
            vec![DomCommand::remove_class(BUTTON, "visible")]
        );
        assert!(!button.is_visible());
    }

    #[test]
    fn boundary_predicate() {
        let (_bench, button) = bench();
        assert!(!button.should_show(0.0));
        assert!(!button.should_show(300.0));
        assert!(button.should_show(300.5));
        assert!(button.should_show(10_000.0));
    }

    #[test]
    fn click_scrolls_to_top() {
        let (mut bench, mut button) = bench();
        bench.event(
            &mut button,
            PageEvent::Click {
                node: BUTTON,
                position: Point::default(),
            },
        );
        assert_eq!(
            bench.commands(),
            vec![DomCommand::ScrollWindowTo {
                top: 0.0,
                smooth: true
            }]
        );
    }
}
