use folio_protocol::{DomCommand, Listen, NodeId, PageEvent};
use log::debug;

use crate::config::FilterConfig;
use crate::context::{Component, Context};
use crate::css::{SPRING, transition_all};
use crate::page::{FilterButton, PageBindings};
use crate::task::Task;

pub const ALL: &str = "all";
const HIDDEN_CLASS: &str = "hidden";
const ACTIVE_CLASS: &str = "active";

#[derive(Debug)]
struct Card {
    node: NodeId,
    category: Option<String>,
    shown: bool,
}

impl Card {
    fn matches(&self, filter: Option<&str>) -> bool {
        filter == Some(ALL) || self.category.as_deref() == filter
    }
}

/// Category filter over the project grid.
///
/// Hiding is immediate; matching cards come back one after another. Every
/// selection bumps a generation counter so reveals still queued from an
/// earlier selection are dropped instead of resurrecting filtered cards.
#[derive(Debug)]
pub struct ProjectFilter {
    buttons: Vec<FilterButton>,
    cards: Vec<Card>,
    config: FilterConfig,
    current: Option<String>,
    generation: u32,
}

impl ProjectFilter {
    pub fn mount(page: &PageBindings, config: &FilterConfig, cx: &mut Context<'_>) -> Option<Self> {
        if page.filter_buttons.is_empty() {
            debug!("filter: no .filter-btn elements");
            return None;
        }
        for button in &page.filter_buttons {
            cx.subscribe(button.node, Listen::Click);
            cx.subscribe(button.node, Listen::KeyDown);
        }

        let cards: Vec<Card> = page
            .project_cards
            .iter()
            .map(|c| Card {
                node: c.node,
                category: c.category.clone(),
                shown: true,
            })
            .collect();

        for (index, card) in cards.iter().enumerate() {
            cx.style(card.node, "opacity", "0");
            cx.style(card.node, "transform", "translateY(30px) scale(0.95)");
            cx.set_timeout(
                index as f64 * config.entrance_stagger_ms,
                Task::SettleCard(card.node),
            );
        }

        Some(Self {
            buttons: page.filter_buttons.clone(),
            cards,
            config: config.clone(),
            current: Some(ALL.to_string()),
            generation: 0,
        })
    }

    pub fn current_filter(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Cards currently shown (hidden cards excluded, pending reveals
    /// excluded until they fire).
    pub fn visible_cards(&self) -> Vec<NodeId> {
        self.cards.iter().filter(|c| c.shown).map(|c| c.node).collect()
    }

    pub fn select(&mut self, index: usize, cx: &mut Context<'_>) {
        let Some(chosen) = self.buttons.get(index).map(|b| b.node) else {
            return;
        };
        for button in &self.buttons {
            cx.remove_class(button.node, ACTIVE_CLASS);
            cx.attribute(button.node, "aria-pressed", "false");
        }
        cx.add_class(chosen, ACTIVE_CLASS);
        cx.attribute(chosen, "aria-pressed", "true");

        let filter = self.buttons[index].filter.clone();
        self.apply(filter, cx);
    }

    fn apply(&mut self, filter: Option<String>, cx: &mut Context<'_>) {
        self.generation = self.generation.wrapping_add(1);
        self.current = filter;
        let filter = self.current.as_deref();
        let mut shown = 0;
        for card in &mut self.cards {
            if card.matches(filter) {
                cx.set_timeout(
                    shown as f64 * self.config.show_stagger_ms,
                    Task::ShowCard {
                        node: card.node,
                        generation: self.generation,
                    },
                );
                shown += 1;
            } else {
                cx.add_class(card.node, HIDDEN_CLASS);
                card.shown = false;
            }
        }
    }

    fn show(&mut self, node: NodeId, cx: &mut Context<'_>) {
        let Some(card) = self.cards.iter_mut().find(|c| c.node == node) else {
            return;
        };
        cx.remove_class(node, HIDDEN_CLASS);
        cx.style(node, "animation", "none");
        cx.emit(DomCommand::ForceReflow { node });
        cx.style(node, "animation", format!("slideUp 0.6s {SPRING} forwards"));
        card.shown = true;
    }
}

impl Component for ProjectFilter {
    fn on_event(&mut self, event: &PageEvent, cx: &mut Context<'_>) {
        let (node, activate) = match event {
            PageEvent::Click { node, .. } => (*node, false),
            PageEvent::KeyDown { node, key } if key.activates() => (*node, true),
            _ => return,
        };
        let Some(index) = self.buttons.iter().position(|b| b.node == node) else {
            return;
        };
        if activate {
            cx.prevent_default();
        }
        self.select(index, cx);
    }

    fn on_task(&mut self, task: &Task, cx: &mut Context<'_>) {
        match *task {
            Task::ShowCard { node, generation } if generation == self.generation => {
                self.show(node, cx);
            }
            Task::SettleCard(node) => {
                cx.style(node, "transition", transition_all(0.6, SPRING));
                cx.style(node, "opacity", "1");
                cx.style(node, "transform", "translateY(0) scale(1)");
            }
            _ => {}
        }
    }
}
