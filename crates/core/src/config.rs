//! Tunables for every component.
//!
//! Defaults reproduce the shipped page. A site can override any subset by
//! embedding a JSON document; missing sections and fields keep their
//! defaults.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Upper bound on elements a config may ask the page to create.
pub const MAX_GENERATED: usize = 200;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub typing: TypingConfig,
    pub theme: ThemeConfig,
    pub hero: HeroConfig,
    pub parallax: ParallaxConfig,
    pub timeline: TimelineConfig,
    pub filter: FilterConfig,
    pub smooth_scroll: SmoothScrollConfig,
    pub navbar: NavbarConfig,
    pub scroll_top: ScrollTopConfig,
    pub contact: ContactConfig,
    pub micro: MicroConfig,
    pub reveal: RevealConfig,
    pub particles: ParticleConfig,
    pub cursor_trail: CursorTrailConfig,
}

impl SiteConfig {
    /// Parse and validate a JSON override document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.typing.phrases.is_empty() {
            return Err(ConfigError::NoPhrases);
        }
        if let Some(i) = self.typing.phrases.iter().position(String::is_empty) {
            return Err(ConfigError::EmptyPhrase(i));
        }
        if self.particles.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        unit_factor("hero.smoothing", self.hero.smoothing)?;
        unit_factor("cursor_trail.follow", self.cursor_trail.follow)?;

        for (name, value) in [
            ("typing.type_ms", self.typing.type_ms),
            ("typing.delete_ms", self.typing.delete_ms),
            ("typing.pause_ms", self.typing.pause_ms),
            ("typing.next_phrase_ms", self.typing.next_phrase_ms),
            ("hero.sample_ms", self.hero.sample_ms),
            ("parallax.min_delta_px", self.parallax.min_delta_px),
            ("timeline.reveal_stagger_ms", self.timeline.reveal_stagger_ms),
            ("filter.show_stagger_ms", self.filter.show_stagger_ms),
            ("filter.entrance_stagger_ms", self.filter.entrance_stagger_ms),
            ("contact.visible_ms", self.contact.visible_ms),
            ("contact.exit_ms", self.contact.exit_ms),
            ("micro.ripple_ms", self.micro.ripple_ms),
        ] {
            if value < 0.0 || value.is_nan() {
                return Err(ConfigError::Negative { name, value });
            }
        }
        let typing = &self.typing;
        if [typing.type_ms, typing.delete_ms, typing.pause_ms, typing.next_phrase_ms]
            .iter()
            .all(|ms| *ms == 0.0)
        {
            return Err(ConfigError::StalledTyping);
        }
        for (name, value) in [
            ("particles.count", self.particles.count),
            ("cursor_trail.dots", self.cursor_trail.dots),
        ] {
            if value > MAX_GENERATED {
                return Err(ConfigError::TooMany {
                    name,
                    value,
                    max: MAX_GENERATED,
                });
            }
        }
        Ok(())
    }
}

fn unit_factor(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::Factor { name, value })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    pub phrases: Vec<String>,
    pub type_ms: f64,
    pub delete_ms: f64,
    /// Hold time once a phrase is fully typed.
    pub pause_ms: f64,
    /// Gap between clearing one phrase and typing the next.
    pub next_phrase_ms: f64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            phrases: [
                "AI & ML Enthusiast",
                "Full Stack Developer",
                "Software Developer",
                "Problem Solver",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            type_ms: 100.0,
            delete_ms: 50.0,
            pause_ms: 2000.0,
            next_phrase_ms: 500.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub storage_key: String,
    pub spring_ms: f64,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".into(),
            spring_ms: 300.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    /// Minimum spacing between pointer samples.
    pub sample_ms: f64,
    pub smoothing: f64,
    pub rotation_deg: f64,
    pub shape_shift_px: f64,
    pub shape_spin_deg: f64,
    /// Per-shape depth multiplier step: shape `i` moves `(i + 1) * step`.
    pub shape_step: f64,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            sample_ms: 16.0,
            smoothing: 0.1,
            rotation_deg: 15.0,
            shape_shift_px: 15.0,
            shape_spin_deg: 8.0,
            shape_step: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub min_delta_px: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self { min_delta_px: 5.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// One item width plus the gap.
    pub step_px: f64,
    pub reveal_stagger_ms: f64,
    pub reveal_threshold: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            step_px: 370.0,
            reveal_stagger_ms: 100.0,
            reveal_threshold: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub show_stagger_ms: f64,
    pub entrance_stagger_ms: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            show_stagger_ms: 80.0,
            entrance_stagger_ms: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothScrollConfig {
    /// Height of the fixed navbar kept clear above the target.
    pub offset_px: f64,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self { offset_px: 80.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavbarConfig {
    pub threshold_px: f64,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            threshold_px: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollTopConfig {
    /// The button shows strictly above this offset.
    pub threshold_px: f64,
}

impl Default for ScrollTopConfig {
    fn default() -> Self {
        Self {
            threshold_px: 300.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub message: String,
    pub visible_ms: f64,
    pub exit_ms: f64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            message: "Thank you! Your message has been sent successfully.".into(),
            visible_ms: 3000.0,
            exit_ms: 300.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MicroConfig {
    pub ripple_ms: f64,
}

impl Default for MicroConfig {
    fn default() -> Self {
        Self { ripple_ms: 600.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub threshold: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self { threshold: 0.1 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    pub palette: Vec<String>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 15,
            palette: ["#06B6D4", "#3B82F6", "#8B5CF6", "#22D3EE", "#60A5FA", "#A78BFA"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorTrailConfig {
    pub enabled: bool,
    pub dots: usize,
    pub follow: f64,
    /// The trail only animates on viewports wider than this.
    pub min_viewport_width: f64,
}

impl Default for CursorTrailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dots: 8,
            follow: 0.3,
            min_viewport_width: 768.0,
        }
    }
}
