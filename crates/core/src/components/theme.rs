use std::rc::Rc;

use folio_protocol::{DomCommand, Listen, NodeId, PageEvent, Theme};
use log::{debug, warn};

use crate::config::ThemeConfig;
use crate::context::{Component, Context};
use crate::page::PageBindings;
use crate::scheduler::TimerId;
use crate::store::PreferenceStore;
use crate::task::Task;

/// Light/dark switch bound to the `.theme-toggle` button.
///
/// The active theme lives here, not in the DOM: the body class and the
/// persisted flag are both derived from it on every change.
pub struct ThemeManager {
    toggle: NodeId,
    theme: Theme,
    store: Rc<dyn PreferenceStore>,
    config: ThemeConfig,
    settle: Option<TimerId>,
}

impl ThemeManager {
    pub fn mount(
        page: &PageBindings,
        config: &ThemeConfig,
        store: Rc<dyn PreferenceStore>,
        cx: &mut Context<'_>,
    ) -> Option<Self> {
        let Some(toggle) = page.theme_toggle else {
            debug!("theme: no .theme-toggle element");
            return None;
        };
        let saved = Theme::from_flag(store.get(&config.storage_key).as_deref());
        let mut manager = Self {
            toggle,
            theme: Theme::Light,
            store,
            config: config.clone(),
            settle: None,
        };
        if saved.is_dark() {
            manager.apply(Theme::Dark, cx);
        }
        cx.subscribe(toggle, Listen::Click);
        cx.subscribe(toggle, Listen::KeyDown);
        Some(manager)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle(&mut self, cx: &mut Context<'_>) {
        self.apply(self.theme.toggled(), cx);
        self.spring(cx);
    }

    fn apply(&mut self, theme: Theme, cx: &mut Context<'_>) {
        if theme.is_dark() {
            cx.add_class(NodeId::BODY, Theme::DARK_CLASS);
        } else {
            cx.remove_class(NodeId::BODY, Theme::DARK_CLASS);
        }
        cx.attribute(self.toggle, "aria-pressed", theme.is_dark().to_string());
        if let Err(e) = self.store.set(&self.config.storage_key, theme.as_str()) {
            warn!("theme: failed to persist preference: {e}");
        }
        self.theme = theme;
    }

    fn spring(&mut self, cx: &mut Context<'_>) {
        cx.style(self.toggle, "transform", "scale(0.8) rotate(180deg)");
        if let Some(timer) = self.settle.take() {
            cx.cancel_timeout(timer);
        }
        self.settle = Some(cx.set_timeout(self.config.spring_ms, Task::ThemeSpringSettle));
    }
}

impl Component for ThemeManager {
    fn on_event(&mut self, event: &PageEvent, cx: &mut Context<'_>) {
        match event {
            PageEvent::Click { node, .. } if *node == self.toggle => self.toggle(cx),
            PageEvent::KeyDown { node, key } if *node == self.toggle && key.activates() => {
                cx.prevent_default();
                self.toggle(cx);
            }
            _ => {}
        }
    }

    fn on_task(&mut self, task: &Task, cx: &mut Context<'_>) {
        if *task == Task::ThemeSpringSettle {
            self.settle = None;
            cx.emit(DomCommand::clear_style(self.toggle, "transform"));
        }
    }
}

impl std::fmt::Debug for ThemeManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeManager")
            .field("toggle", &self.toggle)
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}
