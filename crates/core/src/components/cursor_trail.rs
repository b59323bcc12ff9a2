use folio_protocol::{DomCommand, Listen, NodeId, Point};
use log::debug;

use crate::config::CursorTrailConfig;
use crate::context::{Component, Context};
use crate::css::px;
use crate::motion::lerp_point;
use crate::task::Task;

const DOT_RADIUS: f64 = 4.0;

#[derive(Debug)]
struct Dot {
    node: NodeId,
    position: Point,
}

/// A chain of dots following the pointer, each chasing the one before it.
#[derive(Debug)]
pub struct CursorTrail {
    dots: Vec<Dot>,
    config: CursorTrailConfig,
    shown: bool,
}

impl CursorTrail {
    pub fn mount(config: &CursorTrailConfig, cx: &mut Context<'_>) -> Option<Self> {
        if !config.enabled {
            debug!("cursor trail: disabled");
            return None;
        }
        let mut dots = Vec::with_capacity(config.dots);
        for i in 0..config.dots {
            let node = cx.create_node();
            let opacity = 10usize.saturating_sub(i) as f64 / 10.0;
            cx.emit(DomCommand::CreateElement {
                node,
                parent: NodeId::BODY,
                tag: "div".into(),
                class: Some("cursor-dot".into()),
                css_text: Some(format!(
                    "position: fixed; width: 8px; height: 8px; border-radius: 50%; \
                     background: var(--color-primary); pointer-events: none; z-index: 9999; \
                     opacity: {opacity}; transition: transform 0.2s ease-out; display: none;"
                )),
                text: None,
            });
            dots.push(Dot {
                node,
                position: Point::default(),
            });
        }
        cx.subscribe(NodeId::DOCUMENT, Listen::PointerMove);

        if cx.state.viewport.width > config.min_viewport_width {
            cx.request_frame(Task::TrailFrame);
        } else {
            debug!("cursor trail: viewport too narrow, not animating");
        }
        Some(Self {
            dots,
            config: config.clone(),
            shown: false,
        })
    }

    pub fn positions(&self) -> Vec<Point> {
        self.dots.iter().map(|d| d.position).collect()
    }

    fn step(&mut self, cx: &mut Context<'_>) {
        let mut leader = cx.state.pointer;
        for dot in &mut self.dots {
            dot.position = lerp_point(dot.position, leader, self.config.follow);
            if !self.shown {
                cx.style(dot.node, "display", "block");
            }
            cx.style(
                dot.node,
                "transform",
                format!(
                    "translate({}, {})",
                    px(dot.position.x - DOT_RADIUS),
                    px(dot.position.y - DOT_RADIUS)
                ),
            );
            leader = dot.position;
        }
        self.shown = true;
    }
}

impl Component for CursorTrail {
    fn on_task(&mut self, task: &Task, cx: &mut Context<'_>) {
        if *task == Task::TrailFrame {
            self.step(cx);
            cx.request_frame(Task::TrailFrame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::Bench;
    use crate::state::Environment;
    use folio_protocol::{PageEvent, Size};

    fn enabled() -> CursorTrailConfig {
        CursorTrailConfig {
            enabled: true,
            ..Default::default()
        }
    }

    #[test]
    fn disabled_by_default() {
        let mut bench = Bench::new();
        let trail = bench.with_cx(|cx| CursorTrail::mount(&CursorTrailConfig::default(), cx));
        assert!(trail.is_none());
        assert!(bench.commands().is_empty());
    }

    #[test]
    fn dots_fade_along_the_chain() {
        let mut bench = Bench::new();
        bench.with_cx(|cx| CursorTrail::mount(&enabled(), cx)).unwrap();
        let cmds = bench.commands();
        assert_eq!(cmds.len(), 8);
        let opacity = |i: usize| match &cmds[i] {
            DomCommand::CreateElement { css_text, .. } => css_text.clone().unwrap(),
            other => panic!("unexpected {other:?}"),
        };
        assert!(opacity(0).contains("opacity: 1;"));
        assert!(opacity(1).contains("opacity: 0.9;"));
        assert!(opacity(0).contains("display: none;"));
    }

    #[test]
    fn each_dot_chases_the_previous_one() {
        let mut bench = Bench::new();
        let mut trail = bench.with_cx(|cx| CursorTrail::mount(&enabled(), cx)).unwrap();
        bench.take();
        bench.event(
            &mut trail,
            PageEvent::PointerMove {
                position: Point::new(100.0, 200.0),
            },
        );
        bench.frame(&mut trail);
        let positions = trail.positions();
        assert_eq!(positions[0], Point::new(30.0, 60.0));
        assert_eq!(positions[1], Point::new(9.0, 18.0));

        let cmds = bench.commands();
        assert_eq!(cmds[0].node(), Some(trail.dots[0].node));
        assert_eq!(cmds[0], DomCommand::set_style(trail.dots[0].node, "display", "block"));
        assert_eq!(
            cmds[1],
            DomCommand::set_style(trail.dots[0].node, "transform", "translate(26px, 56px)")
        );

        // Display is only switched on once; the loop keeps going.
        bench.frame(&mut trail);
        assert_eq!(bench.commands().len(), 8);
    }

    #[test]
    fn narrow_viewports_do_not_animate() {
        let mut bench = Bench::with_env(&Environment {
            viewport: Size::new(768.0, 1024.0),
            ..Default::default()
        });
        bench.with_cx(|cx| CursorTrail::mount(&enabled(), cx)).unwrap();
        assert!(!bench.runtime.scheduler.has_frame_requests());
    }
}
