use folio_protocol::{DomCommand, Listen, NodeId, PageEvent, Point};
use log::debug;

use crate::config::HeroConfig;
use crate::context::{Component, Context};
use crate::css::{deg, px};
use crate::motion::lerp_point;
use crate::page::PageBindings;
use crate::scheduler::{FrameId, TimerId};
use crate::task::Task;

/// Tilts the hero's shape container toward the pointer and drifts each
/// shape by a depth-scaled amount.
///
/// The per-frame loop only runs while the hero is on screen.
#[derive(Debug)]
pub struct Hero3d {
    hero: NodeId,
    container: NodeId,
    shapes: Vec<NodeId>,
    config: HeroConfig,
    /// Pointer position normalized to `-1..=1` around the hero center.
    target: Point,
    current: Point,
    animating: bool,
    frame: Option<FrameId>,
    sample: Option<TimerId>,
}

impl Hero3d {
    pub fn mount(page: &PageBindings, config: &HeroConfig, cx: &mut Context<'_>) -> Option<Self> {
        let (Some(hero), Some(container)) = (page.hero, page.shape_container) else {
            debug!("hero: missing #hero-3d or .shape-container");
            return None;
        };
        cx.subscribe(NodeId::DOCUMENT, Listen::PointerMove);
        cx.emit(DomCommand::Observe {
            node: hero,
            threshold: 0.0,
        });
        Some(Self {
            hero,
            container,
            shapes: page.shapes.clone(),
            config: config.clone(),
            target: Point::default(),
            current: Point::default(),
            animating: false,
            frame: None,
            sample: None,
        })
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn current(&self) -> Point {
        self.current
    }

    fn start(&mut self, cx: &mut Context<'_>) {
        self.animating = true;
        self.render(cx);
    }

    fn stop(&mut self, cx: &mut Context<'_>) {
        self.animating = false;
        if let Some(frame) = self.frame.take() {
            cx.cancel_frame(frame);
        }
    }

    /// Recompute the normalized target from the latest pointer position.
    fn sample_pointer(&mut self, cx: &mut Context<'_>) {
        let Some(rect) = cx.layout.rect(self.hero) else {
            return;
        };
        if rect.is_empty() {
            return;
        }
        let center = rect.center();
        let pointer = cx.state.pointer;
        self.target = Point::new(
            (pointer.x - center.x) / (rect.w / 2.0),
            (pointer.y - center.y) / (rect.h / 2.0),
        );
    }

    fn render(&mut self, cx: &mut Context<'_>) {
        self.current = lerp_point(self.current, self.target, self.config.smoothing);
        let Point { x, y } = self.current;

        cx.style(
            self.container,
            "transform",
            format!(
                "rotateY({}) rotateX({})",
                deg(x * self.config.rotation_deg),
                deg(-y * self.config.rotation_deg)
            ),
        );

        for (i, &shape) in self.shapes.iter().enumerate() {
            let depth = (i + 1) as f64 * self.config.shape_step;
            let shift = self.config.shape_shift_px * depth;
            cx.style(
                shape,
                "transform",
                format!(
                    "translate(-50%, -50%) translateX({}) translateY({}) rotateZ({})",
                    px(x * shift),
                    px(y * shift),
                    deg(x * self.config.shape_spin_deg * depth)
                ),
            );
        }

        self.frame = Some(cx.request_frame(Task::HeroFrame));
    }
}

impl Component for Hero3d {
    fn on_event(&mut self, event: &PageEvent, cx: &mut Context<'_>) {
        match event {
            PageEvent::PointerMove { .. } => {
                if self.sample.is_none() {
                    self.sample = Some(cx.set_timeout(self.config.sample_ms, Task::HeroSample));
                }
            }
            PageEvent::Intersection { entries } => {
                let hero = self.hero;
                for entry in entries.iter().filter(|e| e.node == hero) {
                    if entry.visible && !self.animating {
                        self.start(cx);
                    } else if !entry.visible && self.animating {
                        self.stop(cx);
                    }
                }
            }
            _ => {}
        }
    }

    fn on_task(&mut self, task: &Task, cx: &mut Context<'_>) {
        match task {
            Task::HeroSample => {
                self.sample = None;
                self.sample_pointer(cx);
            }
            Task::HeroFrame => {
                self.frame = None;
                if self.animating {
                    self.render(cx);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::Bench;
    use folio_protocol::{IntersectionEntry, Rect};

    const HERO: NodeId = NodeId(40);
    const CONTAINER: NodeId = NodeId(41);
    const SHAPE_A: NodeId = NodeId(42);
    const SHAPE_B: NodeId = NodeId(43);

    fn page() -> PageBindings {
        PageBindings {
            hero: Some(HERO),
            shape_container: Some(CONTAINER),
            shapes: vec![SHAPE_A, SHAPE_B],
            ..Default::default()
        }
    }

    fn bench() -> (Bench, Hero3d) {
        let mut bench = Bench::new();
        bench.layout.set_rect(HERO, Rect::new(0.0, 0.0, 400.0, 200.0));
        let hero = bench
            .with_cx(|cx| Hero3d::mount(&page(), &HeroConfig::default(), cx))
            .unwrap();
        (bench, hero)
    }

    fn visibility(visible: bool) -> PageEvent {
        PageEvent::Intersection {
            entries: vec![IntersectionEntry {
                node: HERO,
                visible,
            }],
        }
    }

    fn pointer(x: f64, y: f64) -> PageEvent {
        PageEvent::PointerMove {
            position: Point::new(x, y),
        }
    }

    #[test]
    fn requires_hero_and_container() {
        let mut bench = Bench::new();
        let page = PageBindings {
            hero: Some(HERO),
            ..Default::default()
        };
        let hero = bench.with_cx(|cx| Hero3d::mount(&page, &HeroConfig::default(), cx));
        assert!(hero.is_none());
    }

    #[test]
    fn observes_hero_on_mount() {
        let (mut bench, _hero) = bench();
        assert_eq!(
            bench.commands(),
            vec![DomCommand::Observe {
                node: HERO,
                threshold: 0.0
            }]
        );
    }

    #[test]
    fn pointer_is_normalized_around_center() {
        let (mut bench, mut hero) = bench();
        bench.event(&mut hero, pointer(400.0, 0.0));
        // Sampled once the throttle window elapses.
        assert_eq!(hero.target(), Point::default());
        bench.advance(&mut hero, 16.0);
        assert_eq!(hero.target(), Point::new(1.0, -1.0));
    }

    #[test]
    fn pointer_samples_are_throttled() {
        let (mut bench, mut hero) = bench();
        bench.event(&mut hero, pointer(300.0, 100.0));
        bench.event(&mut hero, pointer(100.0, 100.0));
        assert_eq!(bench.runtime.scheduler.pending_timers(), 1);
        bench.advance(&mut hero, 16.0);
        // The sample reads the latest pointer position.
        assert_eq!(hero.target(), Point::new(-0.5, 0.0));
    }

    #[test]
    fn animates_only_while_visible() {
        let (mut bench, mut hero) = bench();
        bench.take();
        bench.frame(&mut hero);
        assert!(bench.commands().is_empty());

        bench.event(&mut hero, visibility(true));
        assert!(hero.is_animating());
        // Container plus two shapes rendered immediately.
        assert_eq!(bench.commands().len(), 3);
        assert!(bench.runtime.scheduler.has_frame_requests());

        bench.frame(&mut hero);
        assert_eq!(bench.commands().len(), 3);

        bench.event(&mut hero, visibility(false));
        assert!(!hero.is_animating());
        assert!(!bench.runtime.scheduler.has_frame_requests());
        bench.frame(&mut hero);
        assert!(bench.commands().is_empty());
    }

    #[test]
    fn eases_toward_target() {
        let (mut bench, mut hero) = bench();
        bench.event(&mut hero, pointer(400.0, 100.0));
        bench.advance(&mut hero, 16.0);
        bench.event(&mut hero, visibility(true));
        assert!((hero.current().x - 0.1).abs() < 1e-9);
        for _ in 0..100 {
            bench.frame(&mut hero);
        }
        assert!((hero.current().x - 1.0).abs() < 1e-3);
        assert!(hero.current().y.abs() < 1e-9);
    }

    #[test]
    fn transforms_scale_with_shape_depth() {
        let (mut bench, mut hero) = bench();
        let config = HeroConfig {
            smoothing: 1.0,
            ..HeroConfig::default()
        };
        hero.config = config;
        bench.event(&mut hero, pointer(400.0, 100.0));
        bench.advance(&mut hero, 16.0);
        bench.take();
        bench.event(&mut hero, visibility(true));
        let cmds = bench.commands();
        assert_eq!(
            cmds[0],
            DomCommand::set_style(CONTAINER, "transform", "rotateY(15deg) rotateX(0deg)")
        );
        assert_eq!(
            cmds[1],
            DomCommand::set_style(
                SHAPE_A,
                "transform",
                format!(
                    "translate(-50%, -50%) translateX({}px) translateY(0px) rotateZ({}deg)",
                    15.0 * 0.3,
                    8.0 * 0.3
                )
            )
        );
    }

    #[test]
    fn zero_sized_hero_keeps_previous_target() {
        let (mut bench, mut hero) = bench();
        bench.layout.set_rect(HERO, Rect::new(0.0, 0.0, 0.0, 0.0));
        bench.event(&mut hero, pointer(50.0, 50.0));
        bench.advance(&mut hero, 16.0);
        assert_eq!(hero.target(), Point::default());
    }
}
