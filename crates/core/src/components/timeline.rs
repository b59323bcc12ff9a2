use folio_protocol::{DomCommand, Key, Listen, NodeId, PageEvent};
use log::debug;

use crate::config::TimelineConfig;
use crate::context::{Component, Context};
use crate::css::{SPRING, transition_all};
use crate::page::PageBindings;
use crate::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Horizontally scrolling experience timeline with prev/next buttons,
/// arrow-key navigation and staggered reveal of its items.
#[derive(Debug)]
pub struct Timeline {
    container: NodeId,
    prev: Option<NodeId>,
    next: Option<NodeId>,
    items: Vec<NodeId>,
    config: TimelineConfig,
}

impl Timeline {
    pub fn mount(page: &PageBindings, config: &TimelineConfig, cx: &mut Context<'_>) -> Option<Self> {
        let Some(container) = page.timeline else {
            debug!("timeline: no #timeline-container element");
            return None;
        };
        for button in [page.timeline_prev, page.timeline_next].into_iter().flatten() {
            cx.subscribe(button, Listen::Click);
        }
        cx.subscribe(container, Listen::KeyDown);

        for &item in &page.timeline_items {
            cx.style(item, "opacity", "0");
            cx.style(item, "transform", "translateY(30px)");
            cx.style(item, "transition", transition_all(0.6, SPRING));
            cx.emit(DomCommand::Observe {
                node: item,
                threshold: config.reveal_threshold,
            });
        }

        Some(Self {
            container,
            prev: page.timeline_prev,
            next: page.timeline_next,
            items: page.timeline_items.clone(),
            config: config.clone(),
        })
    }

    pub fn scroll(&self, direction: Direction, cx: &mut Context<'_>) {
        let current = cx.layout.scroll_left(self.container);
        let left = match direction {
            Direction::Left => current - self.config.step_px,
            Direction::Right => current + self.config.step_px,
        };
        cx.emit(DomCommand::ScrollElementTo {
            node: self.container,
            left,
            smooth: true,
        });
    }
}

impl Component for Timeline {
    fn on_event(&mut self, event: &PageEvent, cx: &mut Context<'_>) {
        match event {
            PageEvent::Click { node, .. } if Some(*node) == self.prev => {
                self.scroll(Direction::Left, cx);
            }
            PageEvent::Click { node, .. } if Some(*node) == self.next => {
                self.scroll(Direction::Right, cx);
            }
            PageEvent::KeyDown { node, key } if *node == self.container => {
                let direction = match key {
                    Key::ArrowLeft => Direction::Left,
                    Key::ArrowRight => Direction::Right,
                    _ => return,
                };
                cx.prevent_default();
                self.scroll(direction, cx);
            }
            PageEvent::Intersection { entries } => {
                let ours = entries.iter().filter(|e| self.items.contains(&e.node));
                for (index, entry) in ours.enumerate() {
                    if entry.visible {
                        cx.set_timeout(
                            index as f64 * self.config.reveal_stagger_ms,
                            Task::RevealTimelineItem(entry.node),
                        );
                    }
                }
            }
            _ => {}
        }
    }

    fn on_task(&mut self, task: &Task, cx: &mut Context<'_>) {
        if let Task::RevealTimelineItem(node) = *task
            && self.items.contains(&node)
        {
            cx.style(node, "opacity", "1");
            cx.style(node, "transform", "translateY(0)");
        }
    }
}
