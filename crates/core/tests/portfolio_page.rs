//! Integration test: mount a whole `Portfolio` over a recorded page fixture
//! and drive it the way the browser bridge does.

use std::rc::Rc;

use folio_core::{
    ConfigError, Effects, Environment, Layout, MemoryStore, PageBindings, Portfolio,
    PreferenceStore, SiteConfig, StaticLayout,
};
use folio_protocol::{
    DomCommand, FormField, IntersectionEntry, Key, Listen, NodeId, PageEvent, Point, Rect,
    Subscription, Theme,
};

const TYPING: NodeId = NodeId(16);
const THEME_TOGGLE: NodeId = NodeId(17);
const HERO: NodeId = NodeId(18);
const FILTER_ALL: NodeId = NodeId(31);
const FILTER_WEB: NodeId = NodeId(32);
const FILTER_ML: NodeId = NodeId(33);
const CARDS: [NodeId; 4] = [NodeId(34), NodeId(35), NodeId(36), NodeId(37)];
const ABOUT_LINK: NodeId = NodeId(38);
const ABOUT: NodeId = NodeId(39);
const BARE_LINK: NodeId = NodeId(40);
const EMPTY_LINK: NodeId = NodeId(41);
const DANGLING_LINK: NodeId = NodeId(50);
const SCROLL_TOP: NodeId = NodeId(43);
const CONTACT_FORM: NodeId = NodeId(44);

fn page() -> PageBindings {
    PageBindings::from_json(include_str!("fixtures/portfolio-page.json"))
        .expect("fixture should parse")
}

/// A page session: the portfolio plus the browser-side state around it.
struct Site {
    portfolio: Portfolio,
    layout: StaticLayout,
    now: f64,
    mounted: Effects,
}

impl Site {
    fn open(config: &SiteConfig, store: &MemoryStore) -> Self {
        let layout = StaticLayout::new().with_rect(ABOUT, Rect::new(0.0, 250.0, 1280.0, 700.0));
        let store: Rc<dyn PreferenceStore> = Rc::new(store.clone());
        let (portfolio, mounted) =
            Portfolio::mount(config, &page(), &Environment::default(), store, &layout);
        Self {
            portfolio,
            layout,
            now: 0.0,
            mounted,
        }
    }

    fn with_defaults() -> Self {
        Self::open(&SiteConfig::default(), &MemoryStore::new())
    }

    fn event(&mut self, event: PageEvent) -> Effects {
        self.portfolio.dispatch(&event, &self.layout)
    }

    fn click(&mut self, node: NodeId) -> Effects {
        self.event(PageEvent::Click {
            node,
            position: Point::default(),
        })
    }

    fn wait(&mut self, ms: f64) -> Effects {
        self.now += ms;
        self.portfolio.advance_to(self.now, &self.layout)
    }

    fn frame(&mut self) -> Effects {
        self.now += 16.0;
        self.portfolio.animation_frame(self.now, &self.layout)
    }

    fn theme(&self) -> Theme {
        self.portfolio.theme().expect("theme toggle is bound").theme()
    }
}

fn touching(effects: &Effects, node: NodeId) -> Vec<DomCommand> {
    effects
        .commands
        .iter()
        .filter(|c| c.node() == Some(node))
        .cloned()
        .collect()
}

#[test]
fn fixture_mounts_every_bound_component() {
    let site = Site::with_defaults();
    let p = &site.portfolio;
    assert!(p.typing().is_some());
    assert!(p.theme().is_some());
    assert!(p.hero().is_some());
    assert!(p.timeline().is_some());
    assert!(p.project_filter().is_some());
    assert!(p.navbar().is_some());
    assert!(p.scroll_to_top().is_some());
    assert_eq!(p.particles().map(|ps| ps.len()), Some(15));
    assert!(p.cursor_trail().is_none(), "cursor trail ships disabled");

    let subs: Vec<Subscription> = p.subscriptions().copied().collect();
    for expected in [
        Subscription::new(NodeId::DOCUMENT, Listen::Scroll),
        Subscription::new(NodeId::DOCUMENT, Listen::PointerMove),
        Subscription::new(THEME_TOGGLE, Listen::Click),
        Subscription::new(CONTACT_FORM, Listen::Submit),
        Subscription::new(FILTER_WEB, Listen::KeyDown),
    ] {
        assert!(subs.contains(&expected), "missing {expected:?}");
    }
    // Lazy image picked up its deferred source.
    assert!(
        site.mounted
            .commands
            .contains(&DomCommand::set_attribute(NodeId(48), "src", "/img/avatar.webp"))
    );
}

#[test]
fn double_toggle_restores_light_theme() {
    let store = MemoryStore::new();
    let mut site = Site::open(&SiteConfig::default(), &store);
    assert_eq!(site.theme(), Theme::Light);

    let first = site.click(THEME_TOGGLE);
    assert!(first.commands.contains(&DomCommand::add_class(NodeId::BODY, "dark-mode")));
    assert_eq!(store.get("theme").as_deref(), Some("dark"));

    let second = site.click(THEME_TOGGLE);
    assert!(second.commands.contains(&DomCommand::remove_class(NodeId::BODY, "dark-mode")));
    assert_eq!(site.theme(), Theme::Light);
    assert_eq!(store.get("theme").as_deref(), Some("light"));
}

#[test]
fn dark_theme_survives_reload() {
    let store = MemoryStore::new();
    let mut site = Site::open(&SiteConfig::default(), &store);
    site.event(PageEvent::KeyDown {
        node: THEME_TOGGLE,
        key: Key::Space,
    });
    assert_eq!(site.theme(), Theme::Dark);
    drop(site);

    let reloaded = Site::open(&SiteConfig::default(), &store);
    assert_eq!(reloaded.theme(), Theme::Dark);
    assert!(
        reloaded
            .mounted
            .commands
            .contains(&DomCommand::add_class(NodeId::BODY, "dark-mode"))
    );
}

#[test]
fn typing_cycles_back_to_first_phrase() {
    let config = SiteConfig::from_json(r#"{ "typing": { "phrases": ["A", "B"] } }"#)
        .expect("valid override");
    let mut site = Site::open(&config, &MemoryStore::new());

    let mut shown: Vec<String> = Vec::new();
    let mut collect = |effects: &Effects| {
        for cmd in touching(effects, TYPING) {
            if let DomCommand::SetText { text, .. } = cmd {
                shown.push(text);
            }
        }
    };
    let mounted = site.mounted.clone();
    collect(&mounted);
    let later = site.wait(5000.0);
    collect(&later);

    assert_eq!(shown, vec!["A", "", "B", "", "A"]);
    assert_eq!(site.portfolio.typing().map(|t| t.text()), Some("A"));
}

#[test]
fn filter_hides_other_categories_and_all_restores() {
    let mut site = Site::with_defaults();
    site.wait(1000.0);

    let effects = site.click(FILTER_WEB);
    for hidden in [CARDS[1], CARDS[3]] {
        assert!(effects.commands.contains(&DomCommand::add_class(hidden, "hidden")));
    }
    site.wait(1000.0);
    let filter = site.portfolio.project_filter().expect("filter is bound");
    assert_eq!(filter.visible_cards(), vec![CARDS[0], CARDS[2]]);

    site.click(FILTER_ML);
    site.click(FILTER_ALL);
    site.wait(1000.0);
    let filter = site.portfolio.project_filter().expect("filter is bound");
    assert_eq!(filter.visible_cards(), CARDS.to_vec());
    assert_eq!(filter.current_filter(), Some("all"));
}

#[test]
fn in_page_link_scrolls_below_navbar() {
    let mut site = Site::with_defaults();
    site.event(PageEvent::Scroll { y: 1000.0 });
    let effects = site.click(ABOUT_LINK);
    assert!(effects.prevent_default);
    assert_eq!(
        effects.commands,
        vec![
            DomCommand::ScrollWindowTo {
                top: 1170.0,
                smooth: true
            },
            DomCommand::Focus {
                node: ABOUT,
                prevent_scroll: true
            },
        ]
    );
}

#[test]
fn bare_empty_and_dangling_links_do_nothing() {
    let mut site = Site::with_defaults();
    for link in [BARE_LINK, EMPTY_LINK, DANGLING_LINK] {
        let effects = site.click(link);
        assert!(effects.is_empty(), "link {link} produced {effects:?}");
    }
}

#[test]
fn scroll_to_top_boundary_is_exclusive() {
    let mut site = Site::with_defaults();
    let scroll = |site: &mut Site, y: f64| {
        site.event(PageEvent::Scroll { y });
        touching(&site.frame(), SCROLL_TOP)
    };

    assert!(scroll(&mut site, 300.0).is_empty());
    assert!(!site.portfolio.scroll_to_top().is_some_and(|b| b.is_visible()));

    assert_eq!(
        scroll(&mut site, 301.0),
        vec![DomCommand::add_class(SCROLL_TOP, "visible")]
    );
    assert_eq!(
        scroll(&mut site, 300.0),
        vec![DomCommand::remove_class(SCROLL_TOP, "visible")]
    );
}

#[test]
fn hero_animates_only_while_visible() {
    let mut site = Site::with_defaults();
    assert!(!site.portfolio.wants_frame());

    let visibility = |visible| PageEvent::Intersection {
        entries: vec![IntersectionEntry {
            node: HERO,
            visible,
        }],
    };
    site.event(visibility(true));
    assert!(site.portfolio.wants_frame());
    site.frame();
    assert!(site.portfolio.wants_frame());

    site.event(visibility(false));
    assert!(!site.portfolio.wants_frame());
}

#[test]
fn contact_submission_shows_and_removes_toast() {
    let mut site = Site::with_defaults();
    site.wait(1000.0);
    let effects = site.event(PageEvent::Submit {
        node: CONTACT_FORM,
        fields: vec![FormField {
            name: "email".into(),
            value: "ada@example.com".into(),
        }],
    });
    assert!(effects.prevent_default);
    assert!(effects.commands.contains(&DomCommand::ResetForm { node: CONTACT_FORM }));
    let toast = effects
        .commands
        .iter()
        .find_map(|c| match c {
            DomCommand::CreateElement { node, parent, .. } if *parent == NodeId::BODY => Some(*node),
            _ => None,
        })
        .expect("toast element");

    let removed = site.wait(3300.0);
    assert!(removed.commands.contains(&DomCommand::RemoveElement { node: toast }));
}

#[test]
fn tab_shows_focus_ring_until_pointer_down() {
    let mut site = Site::with_defaults();
    let tab = site.event(PageEvent::KeyDown {
        node: NodeId::DOCUMENT,
        key: Key::Tab,
    });
    assert_eq!(
        tab.commands,
        vec![DomCommand::add_class(NodeId::BODY, "keyboard-navigation")]
    );
    assert!(site.portfolio.keyboard().is_active());

    let down = site.event(PageEvent::PointerDown);
    assert_eq!(
        down.commands,
        vec![DomCommand::remove_class(NodeId::BODY, "keyboard-navigation")]
    );
}

#[test]
fn invalid_config_is_rejected() {
    let err = SiteConfig::from_json(r#"{ "particles": { "palette": [] } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyPalette));
}

#[test]
fn layout_trait_is_object_safe_for_hosts() {
    let layout = StaticLayout::new().with_rect(ABOUT, Rect::new(1.0, 2.0, 3.0, 4.0));
    let dyn_layout: &dyn Layout = &layout;
    assert_eq!(dyn_layout.rect(ABOUT), Some(Rect::new(1.0, 2.0, 3.0, 4.0)));
    assert_eq!(dyn_layout.scroll_left(ABOUT), 0.0);
}
