use std::collections::BTreeSet;

use folio_protocol::{DomCommand, Listen, NodeId, PageEvent, Subscription};

use crate::layout::Layout;
use crate::scheduler::{FrameId, Scheduler, TimerId};
use crate::state::AppState;
use crate::task::Task;

/// Output of one call into the core.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Effects {
    pub commands: Vec<DomCommand>,
    /// The triggering DOM event should have its default action cancelled.
    pub prevent_default: bool,
}

impl Effects {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && !self.prevent_default
    }

    pub fn extend(&mut self, other: Effects) {
        self.commands.extend(other.commands);
        self.prevent_default |= other.prevent_default;
    }
}

/// Hands out ids for elements the core creates.
#[derive(Debug)]
pub struct NodeAllocator {
    next: u32,
}

impl NodeAllocator {
    pub fn new() -> Self {
        Self {
            next: NodeId::FIRST_DYNAMIC,
        }
    }

    pub fn allocate(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}

impl Default for NodeAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable machinery shared by all components.
#[derive(Debug, Default)]
pub struct Runtime {
    pub scheduler: Scheduler<Task>,
    pub nodes: NodeAllocator,
    pub subscriptions: BTreeSet<Subscription>,
}

/// Everything a component may touch while handling one mount, event or task.
pub struct Context<'a> {
    pub state: &'a AppState,
    pub layout: &'a dyn Layout,
    runtime: &'a mut Runtime,
    effects: &'a mut Effects,
}

impl<'a> Context<'a> {
    pub fn new(
        state: &'a AppState,
        layout: &'a dyn Layout,
        runtime: &'a mut Runtime,
        effects: &'a mut Effects,
    ) -> Self {
        Self {
            state,
            layout,
            runtime,
            effects,
        }
    }

    pub fn emit(&mut self, command: DomCommand) {
        self.effects.commands.push(command);
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        self.emit(DomCommand::add_class(node, class));
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        self.emit(DomCommand::remove_class(node, class));
    }

    pub fn style(&mut self, node: NodeId, property: &str, value: impl Into<String>) {
        self.emit(DomCommand::set_style(node, property, value));
    }

    pub fn attribute(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        self.emit(DomCommand::set_attribute(node, name, value));
    }

    pub fn prevent_default(&mut self) {
        self.effects.prevent_default = true;
    }

    pub fn now(&self) -> f64 {
        self.runtime.scheduler.now()
    }

    pub fn set_timeout(&mut self, delay_ms: f64, task: Task) -> TimerId {
        self.runtime.scheduler.set_timeout(delay_ms, task)
    }

    pub fn cancel_timeout(&mut self, timer: TimerId) {
        self.runtime.scheduler.cancel_timeout(timer);
    }

    pub fn request_frame(&mut self, task: Task) -> FrameId {
        self.runtime.scheduler.request_frame(task)
    }

    pub fn cancel_frame(&mut self, frame: FrameId) {
        self.runtime.scheduler.cancel_frame(frame);
    }

    pub fn create_node(&mut self) -> NodeId {
        self.runtime.nodes.allocate()
    }

    pub fn subscribe(&mut self, node: NodeId, kind: Listen) {
        self.runtime
            .subscriptions
            .insert(Subscription::new(node, kind));
    }
}

/// A mounted interaction behavior.
pub trait Component {
    fn on_event(&mut self, _event: &PageEvent, _cx: &mut Context<'_>) {}
    fn on_task(&mut self, _task: &Task, _cx: &mut Context<'_>) {}
}

#[cfg(test)]
pub(crate) mod testing {
    use folio_protocol::{DomCommand, PageEvent};

    use super::*;
    use crate::layout::StaticLayout;
    use crate::state::Environment;

    /// Single-component test bench: owns the state a `Portfolio` would.
    pub struct Bench {
        pub state: AppState,
        pub layout: StaticLayout,
        pub runtime: Runtime,
        effects: Effects,
    }

    impl Bench {
        pub fn new() -> Self {
            Self::with_env(&Environment::default())
        }

        pub fn with_env(env: &Environment) -> Self {
            Self {
                state: AppState::new(env),
                layout: StaticLayout::new(),
                runtime: Runtime::default(),
                effects: Effects::default(),
            }
        }

        pub fn with_cx<R>(&mut self, f: impl FnOnce(&mut Context<'_>) -> R) -> R {
            let mut cx = Context::new(&self.state, &self.layout, &mut self.runtime, &mut self.effects);
            f(&mut cx)
        }

        pub fn event<C: Component>(&mut self, component: &mut C, event: PageEvent) {
            match &event {
                PageEvent::Scroll { y } => self.state.scroll_y = *y,
                PageEvent::PointerMove { position } => self.state.pointer = *position,
                _ => {}
            }
            self.with_cx(|cx| component.on_event(&event, cx));
        }

        /// Fire every timer due within the next `ms` milliseconds.
        pub fn advance<C: Component>(&mut self, component: &mut C, ms: f64) {
            let until = self.runtime.scheduler.now() + ms;
            while let Some(task) = self.runtime.scheduler.pop_due(until) {
                self.with_cx(|cx| component.on_task(&task, cx));
            }
            self.runtime.scheduler.set_now(until);
        }

        pub fn frame<C: Component>(&mut self, component: &mut C) {
            for task in self.runtime.scheduler.take_frame() {
                self.with_cx(|cx| component.on_task(&task, cx));
            }
        }

        pub fn take(&mut self) -> Effects {
            std::mem::take(&mut self.effects)
        }

        pub fn commands(&mut self) -> Vec<DomCommand> {
            self.take().commands
        }
    }
}
