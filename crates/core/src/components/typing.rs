use folio_protocol::{DomCommand, NodeId};
use log::debug;

use crate::config::TypingConfig;
use crate::context::{Component, Context};
use crate::page::PageBindings;
use crate::task::Task;

/// Types phrases into an element one character at a time, holds, deletes
/// them again and moves on to the next phrase, forever.
#[derive(Debug)]
pub struct TypingAnimation {
    node: NodeId,
    phrases: Vec<String>,
    config: TypingConfig,
    phrase: usize,
    chars: usize,
    deleting: bool,
}

impl TypingAnimation {
    pub fn mount(page: &PageBindings, config: &TypingConfig, cx: &mut Context<'_>) -> Option<Self> {
        let Some(node) = page.typing_text else {
            debug!("typing: no .typing-text element");
            return None;
        };
        if config.phrases.is_empty() {
            debug!("typing: no phrases configured");
            return None;
        }
        let mut typing = Self {
            node,
            phrases: config.phrases.clone(),
            config: config.clone(),
            phrase: 0,
            chars: 0,
            deleting: false,
        };
        typing.tick(cx);
        Some(typing)
    }

    /// Text currently shown.
    pub fn text(&self) -> &str {
        prefix(&self.phrases[self.phrase], self.chars)
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// Advance one character and return the delay until the next step.
    fn step(&mut self) -> f64 {
        let len = self.phrases[self.phrase].chars().count();
        if self.deleting {
            self.chars = self.chars.saturating_sub(1);
        } else {
            self.chars = (self.chars + 1).min(len);
        }

        if !self.deleting && self.chars >= len {
            self.deleting = true;
            self.config.pause_ms
        } else if self.deleting && self.chars == 0 {
            self.deleting = false;
            self.phrase = (self.phrase + 1) % self.phrases.len();
            self.config.next_phrase_ms
        } else if self.deleting {
            self.config.delete_ms
        } else {
            self.config.type_ms
        }
    }

    fn tick(&mut self, cx: &mut Context<'_>) {
        let delay = self.step();
        cx.emit(DomCommand::SetText {
            node: self.node,
            text: self.text().to_string(),
        });
        cx.set_timeout(delay, Task::TypeNext);
    }
}

impl Component for TypingAnimation {
    fn on_task(&mut self, task: &Task, cx: &mut Context<'_>) {
        if *task == Task::TypeNext {
            self.tick(cx);
        }
    }
}

/// The first `chars` characters of `s`.
fn prefix(s: &str, chars: usize) -> &str {
    match s.char_indices().nth(chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}
