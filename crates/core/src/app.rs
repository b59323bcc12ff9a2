use std::rc::Rc;

use folio_protocol::{PageEvent, Subscription};
use log::info;

use crate::components::{
    ContactForm, CursorTrail, FloatingParticles, Hero3d, KeyboardNavigation, MicroInteractions,
    Navbar, Parallax, ProjectFilter, ScrollReveal, ScrollToTop, SmoothScroll, ThemeManager,
    Timeline, TypingAnimation, performance,
};
use crate::config::SiteConfig;
use crate::context::{Component, Context, Effects, Runtime};
use crate::layout::Layout;
use crate::page::PageBindings;
use crate::state::{AppState, Environment};
use crate::store::PreferenceStore;

/// Every mounted component. Absent elements leave their slot empty.
struct Components {
    typing: Option<TypingAnimation>,
    theme: Option<ThemeManager>,
    hero: Option<Hero3d>,
    parallax: Option<Parallax>,
    timeline: Option<Timeline>,
    filter: Option<ProjectFilter>,
    smooth_scroll: Option<SmoothScroll>,
    navbar: Option<Navbar>,
    scroll_top: Option<ScrollToTop>,
    contact: Option<ContactForm>,
    micro: MicroInteractions,
    reveal: Option<ScrollReveal>,
    keyboard: KeyboardNavigation,
    particles: Option<FloatingParticles>,
    cursor_trail: Option<CursorTrail>,
}

fn dyn_mut<'a, C: Component + 'a>(slot: &'a mut Option<C>) -> Option<&'a mut dyn Component> {
    slot.as_mut().map(|c| c as &mut dyn Component)
}

impl Components {
    /// Event-driven components in mount order.
    fn iter_mut(&mut self) -> impl Iterator<Item = &mut dyn Component> {
        let Self {
            typing,
            theme,
            hero,
            parallax,
            timeline,
            filter,
            smooth_scroll,
            navbar,
            scroll_top,
            contact,
            micro,
            reveal,
            keyboard,
            particles: _,
            cursor_trail,
        } = self;
        [
            dyn_mut(typing),
            dyn_mut(theme),
            dyn_mut(hero),
            dyn_mut(parallax),
            dyn_mut(timeline),
            dyn_mut(filter),
            dyn_mut(smooth_scroll),
            dyn_mut(navbar),
            dyn_mut(scroll_top),
            dyn_mut(contact),
            Some(micro as &mut dyn Component),
            dyn_mut(reveal),
            Some(keyboard as &mut dyn Component),
            dyn_mut(cursor_trail),
        ]
        .into_iter()
        .flatten()
    }

    fn mounted(&self) -> usize {
        [
            self.typing.is_some(),
            self.theme.is_some(),
            self.hero.is_some(),
            self.parallax.is_some(),
            self.timeline.is_some(),
            self.filter.is_some(),
            self.smooth_scroll.is_some(),
            self.navbar.is_some(),
            self.scroll_top.is_some(),
            self.contact.is_some(),
            true,
            self.reveal.is_some(),
            true,
            self.particles.is_some(),
            self.cursor_trail.is_some(),
        ]
        .into_iter()
        .filter(|mounted| *mounted)
        .count()
    }
}

/// The whole page's interaction layer.
///
/// The host feeds it DOM events, timer deadlines and animation frames, and
/// applies the [`Effects`] each call returns. Between calls the host must
/// keep listeners registered for [`Portfolio::subscriptions`], arm a timer
/// for [`Portfolio::next_deadline`] and request a frame while
/// [`Portfolio::wants_frame`] holds.
pub struct Portfolio {
    state: AppState,
    runtime: Runtime,
    components: Components,
}

impl Portfolio {
    pub fn mount(
        config: &SiteConfig,
        page: &PageBindings,
        env: &Environment,
        store: Rc<dyn PreferenceStore>,
        layout: &dyn Layout,
    ) -> (Self, Effects) {
        let state = AppState::new(env);
        let mut runtime = Runtime::default();
        let mut effects = Effects::default();
        let components = {
            let cx = &mut Context::new(&state, layout, &mut runtime, &mut effects);
            let typing = TypingAnimation::mount(page, &config.typing, cx);
            let theme = ThemeManager::mount(page, &config.theme, store, cx);
            let hero = Hero3d::mount(page, &config.hero, cx);
            let parallax = Parallax::mount(page, &config.parallax, cx);
            let timeline = Timeline::mount(page, &config.timeline, cx);
            let filter = ProjectFilter::mount(page, &config.filter, cx);
            let smooth_scroll = SmoothScroll::mount(page, &config.smooth_scroll, cx);
            let navbar = Navbar::mount(page, &config.navbar, cx);
            let scroll_top = ScrollToTop::mount(page, &config.scroll_top, cx);
            let contact = ContactForm::mount(page, &config.contact, cx);
            let micro = MicroInteractions::mount(page, &config.micro, cx);
            let reveal = ScrollReveal::mount(page, &config.reveal, cx);
            let keyboard = KeyboardNavigation::mount(cx);
            performance::optimize(page, cx);
            let particles = FloatingParticles::mount(page, &config.particles, env.seed, cx);
            let cursor_trail = CursorTrail::mount(&config.cursor_trail, cx);
            Components {
                typing,
                theme,
                hero,
                parallax,
                timeline,
                filter,
                smooth_scroll,
                navbar,
                scroll_top,
                contact,
                micro,
                reveal,
                keyboard,
                particles,
                cursor_trail,
            }
        };
        info!(
            "portfolio loaded: {} components, {} listeners",
            components.mounted(),
            runtime.subscriptions.len()
        );
        let portfolio = Self {
            state,
            runtime,
            components,
        };
        (portfolio, effects)
    }

    /// Deliver one DOM event to every component.
    pub fn dispatch(&mut self, event: &PageEvent, layout: &dyn Layout) -> Effects {
        match event {
            PageEvent::Scroll { y } => self.state.scroll_y = *y,
            PageEvent::PointerMove { position } => self.state.pointer = *position,
            _ => {}
        }
        let mut effects = Effects::default();
        let mut cx = Context::new(&self.state, layout, &mut self.runtime, &mut effects);
        for component in self.components.iter_mut() {
            component.on_event(event, &mut cx);
        }
        effects
    }

    /// Fire every timer due at or before `now`, in deadline order, and move
    /// the clock to `now`.
    pub fn advance_to(&mut self, now: f64, layout: &dyn Layout) -> Effects {
        let mut effects = Effects::default();
        while let Some(task) = self.runtime.scheduler.pop_due(now) {
            let mut cx = Context::new(&self.state, layout, &mut self.runtime, &mut effects);
            for component in self.components.iter_mut() {
                component.on_task(&task, &mut cx);
            }
        }
        self.runtime.scheduler.set_now(now);
        effects
    }

    /// Run one animation frame at `now`. Timers already due fire first so
    /// the clock never runs backwards.
    pub fn animation_frame(&mut self, now: f64, layout: &dyn Layout) -> Effects {
        let mut effects = self.advance_to(now, layout);
        for task in self.runtime.scheduler.take_frame() {
            let mut cx = Context::new(&self.state, layout, &mut self.runtime, &mut effects);
            for component in self.components.iter_mut() {
                component.on_task(&task, &mut cx);
            }
        }
        effects
    }

    pub fn subscriptions(&self) -> impl Iterator<Item = &Subscription> {
        self.runtime.subscriptions.iter()
    }

    pub fn next_deadline(&self) -> Option<f64> {
        self.runtime.scheduler.next_deadline()
    }

    pub fn wants_frame(&self) -> bool {
        self.runtime.scheduler.has_frame_requests()
    }

    pub fn now(&self) -> f64 {
        self.runtime.scheduler.now()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn typing(&self) -> Option<&TypingAnimation> {
        self.components.typing.as_ref()
    }

    pub fn theme(&self) -> Option<&ThemeManager> {
        self.components.theme.as_ref()
    }

    pub fn hero(&self) -> Option<&Hero3d> {
        self.components.hero.as_ref()
    }

    pub fn timeline(&self) -> Option<&Timeline> {
        self.components.timeline.as_ref()
    }

    pub fn project_filter(&self) -> Option<&ProjectFilter> {
        self.components.filter.as_ref()
    }

    pub fn navbar(&self) -> Option<&Navbar> {
        self.components.navbar.as_ref()
    }

    pub fn scroll_to_top(&self) -> Option<&ScrollToTop> {
        self.components.scroll_top.as_ref()
    }

    pub fn keyboard(&self) -> &KeyboardNavigation {
        &self.components.keyboard
    }

    pub fn particles(&self) -> Option<&FloatingParticles> {
        self.components.particles.as_ref()
    }

    pub fn cursor_trail(&self) -> Option<&CursorTrail> {
        self.components.cursor_trail.as_ref()
    }
}
