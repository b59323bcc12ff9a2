use folio_protocol::{DomCommand, NodeId};
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::ParticleConfig;
use crate::context::Context;
use crate::css::num;
use crate::page::PageBindings;

/// Randomized look of one particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub size_px: f64,
    pub color: String,
    pub top_pct: f64,
    pub left_pct: f64,
    pub opacity: f64,
    pub duration_s: f64,
    pub delay_s: f64,
}

impl Particle {
    fn sample(rng: &mut SmallRng, palette: &[String]) -> Self {
        let color = palette
            .get(rng.random_range(0..palette.len().max(1)))
            .cloned()
            .unwrap_or_default();
        Self {
            size_px: rng.random::<f64>() * 4.0 + 2.0,
            color,
            top_pct: rng.random::<f64>() * 100.0,
            left_pct: rng.random::<f64>() * 100.0,
            opacity: rng.random::<f64>() * 0.4 + 0.1,
            duration_s: rng.random::<f64>() * 10.0 + 20.0,
            delay_s: rng.random::<f64>() * 5.0,
        }
    }

    pub fn css_text(&self) -> String {
        let size = num(self.size_px);
        format!(
            "position: absolute; width: {size}px; height: {size}px; background: {}; \
             border-radius: 50%; top: {}%; left: {}%; opacity: {}; \
             animation: particleFloat {}s linear infinite; animation-delay: {}s; \
             will-change: transform;",
            self.color,
            num(self.top_pct),
            num(self.left_pct),
            num(self.opacity),
            num(self.duration_s),
            num(self.delay_s),
        )
    }
}

/// Drifting background dots. Generated once; the motion itself is a CSS
/// animation, so there is nothing to drive afterwards.
#[derive(Debug)]
pub struct FloatingParticles {
    particles: Vec<(NodeId, Particle)>,
}

impl FloatingParticles {
    pub fn mount(page: &PageBindings, config: &ParticleConfig, seed: u64, cx: &mut Context<'_>) -> Option<Self> {
        let Some(container) = page.particle_container else {
            debug!("particles: no .particle-container element");
            return None;
        };
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut particles = Vec::with_capacity(config.count);
        for _ in 0..config.count {
            let particle = Particle::sample(&mut rng, &config.palette);
            let node = cx.create_node();
            cx.emit(DomCommand::CreateElement {
                node,
                parent: container,
                tag: "div".into(),
                class: Some("particle".into()),
                css_text: Some(particle.css_text()),
                text: None,
            });
            particles.push((node, particle));
        }
        Some(Self { particles })
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().map(|(_, p)| p)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
