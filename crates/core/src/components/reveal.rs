use folio_protocol::{DomCommand, NodeId, PageEvent};
use log::debug;

use crate::config::RevealConfig;
use crate::context::{Component, Context};
use crate::css::{SPRING, transition_all};
use crate::page::PageBindings;

/// Fades page sections in the first time they scroll into view.
#[derive(Debug)]
pub struct ScrollReveal {
    sections: Vec<NodeId>,
}

impl ScrollReveal {
    pub fn mount(page: &PageBindings, config: &RevealConfig, cx: &mut Context<'_>) -> Option<Self> {
        if page.sections.is_empty() {
            debug!("reveal: no sections");
            return None;
        }
        for &section in &page.sections {
            cx.style(section, "opacity", "0");
            cx.style(section, "transform", "translateY(20px)");
            cx.style(section, "transition", transition_all(0.8, SPRING));
            cx.emit(DomCommand::Observe {
                node: section,
                threshold: config.threshold,
            });
        }
        Some(Self {
            sections: page.sections.clone(),
        })
    }
}

impl Component for ScrollReveal {
    fn on_event(&mut self, event: &PageEvent, cx: &mut Context<'_>) {
        let PageEvent::Intersection { entries } = event else {
            return;
        };
        for entry in entries {
            if entry.visible && self.sections.contains(&entry.node) {
                cx.style(entry.node, "opacity", "1");
                cx.style(entry.node, "transform", "translateY(0)");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::Bench;
    use folio_protocol::IntersectionEntry;

    const ABOUT: NodeId = NodeId(160);
    const WORK: NodeId = NodeId(161);

    #[test]
    fn sections_reveal_on_intersection() {
        let mut bench = Bench::new();
        let page = PageBindings {
            sections: vec![ABOUT, WORK],
            ..Default::default()
        };
        let mut reveal = bench
            .with_cx(|cx| ScrollReveal::mount(&page, &RevealConfig::default(), cx))
            .unwrap();
        let mount = bench.commands();
        assert_eq!(mount.len(), 8);
        assert_eq!(
            mount[2],
            DomCommand::set_style(ABOUT, "transition", "all 0.8s cubic-bezier(0.34, 1.56, 0.64, 1)")
        );

        bench.event(
            &mut reveal,
            PageEvent::Intersection {
                entries: vec![
                    IntersectionEntry {
                        node: ABOUT,
                        visible: false,
                    },
                    IntersectionEntry {
                        node: WORK,
                        visible: true,
                    },
                    IntersectionEntry {
                        node: NodeId(999),
                        visible: true,
                    },
                ],
            },
        );
        assert_eq!(
            bench.commands(),
            vec![
                DomCommand::set_style(WORK, "opacity", "1"),
                DomCommand::set_style(WORK, "transform", "translateY(0)"),
            ]
        );
    }
}
