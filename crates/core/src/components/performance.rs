use folio_protocol::DomCommand;

use crate::context::Context;
use crate::page::PageBindings;

/// Value the motion custom properties are collapsed to.
pub const REDUCED_DURATION: &str = "0.01s";

/// One-shot tuning applied at startup: native lazy loading of deferred
/// images and near-zero durations for visitors who prefer reduced motion.
pub fn optimize(page: &PageBindings, cx: &mut Context<'_>) {
    if cx.state.lazy_loading {
        for image in &page.lazy_images {
            if let Some(src) = &image.data_src {
                cx.attribute(image.node, "src", src.as_str());
            }
        }
    }
    if cx.state.reduced_motion {
        for name in ["--spring-duration", "--transition-smooth"] {
            cx.emit(DomCommand::SetRootProperty {
                name: name.into(),
                value: REDUCED_DURATION.into(),
            });
        }
    }
}
