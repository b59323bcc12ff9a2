use folio_protocol::{DomCommand, FormField, Listen, NodeId, PageEvent};
use log::{debug, info};

use crate::config::ContactConfig;
use crate::context::{Component, Context};
use crate::css::TOAST_KEYFRAMES;
use crate::page::PageBindings;
use crate::task::Task;

const TOAST_CSS: &str = "position: fixed; top: 100px; right: 20px; padding: 1rem 2rem; \
background: var(--color-primary); color: white; border-radius: 8px; \
box-shadow: 0 4px 20px rgba(0,0,0,0.2); z-index: 10000; animation: slideIn 0.3s ease-out;";

/// Contact form: submissions are logged and acknowledged with a toast.
/// Nothing leaves the page.
#[derive(Debug)]
pub struct ContactForm {
    form: NodeId,
    config: ContactConfig,
}

impl ContactForm {
    pub fn mount(page: &PageBindings, config: &ContactConfig, cx: &mut Context<'_>) -> Option<Self> {
        let Some(form) = page.contact_form else {
            debug!("contact: no #contact-form element");
            return None;
        };
        cx.emit(DomCommand::InjectStylesheet {
            css: TOAST_KEYFRAMES.to_string(),
        });
        cx.subscribe(form, Listen::Submit);
        Some(Self {
            form,
            config: config.clone(),
        })
    }

    fn submit(&self, fields: &[FormField], cx: &mut Context<'_>) {
        cx.prevent_default();
        let summary: Vec<String> = fields
            .iter()
            .map(|f| format!("{}={:?}", f.name, f.value))
            .collect();
        info!("form submitted: {}", summary.join(", "));
        self.show_toast(cx);
        cx.emit(DomCommand::ResetForm { node: self.form });
    }

    fn show_toast(&self, cx: &mut Context<'_>) {
        let toast = cx.create_node();
        cx.emit(DomCommand::CreateElement {
            node: toast,
            parent: NodeId::BODY,
            tag: "div".into(),
            class: None,
            css_text: Some(TOAST_CSS.into()),
            text: Some(self.config.message.clone()),
        });
        cx.set_timeout(self.config.visible_ms, Task::ToastSlideOut(toast));
    }
}

impl Component for ContactForm {
    fn on_event(&mut self, event: &PageEvent, cx: &mut Context<'_>) {
        if let PageEvent::Submit { node, fields } = event
            && *node == self.form
        {
            self.submit(fields, cx);
        }
    }

    fn on_task(&mut self, task: &Task, cx: &mut Context<'_>) {
        match *task {
            Task::ToastSlideOut(toast) => {
                cx.style(toast, "animation", "slideOut 0.3s ease-out");
                cx.set_timeout(self.config.exit_ms, Task::RemoveToast(toast));
            }
            Task::RemoveToast(toast) => cx.emit(DomCommand::RemoveElement { node: toast }),
            _ => {}
        }
    }
}
