//! Glue between browser callbacks and the `Portfolio` clock.

use std::cell::RefCell;
use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use std::rc::{Rc, Weak};

use folio_core::{Effects, PageBindings, Portfolio};
use folio_protocol::{
    DomCommand, FormField, IntersectionEntry, Key, Listen, NodeId, PageEvent, Point, Subscription,
};
use log::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Event, EventTarget, FormData, HtmlFormElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, MouseEvent, Performance, Window,
};

use crate::dom::Registry;
use crate::layout::DomLayout;

pub type SharedDriver = Rc<RefCell<Driver>>;

/// Owns the portfolio and everything it needs from the browser: bound
/// elements, installed listeners, intersection observers, the pending
/// timeout and the pending animation frame.
pub struct Driver {
    this: Weak<RefCell<Driver>>,
    window: Window,
    portfolio: Portfolio,
    registry: Registry,
    page: PageBindings,
    /// `performance.now()` at mount; the portfolio clock starts at zero.
    origin: f64,
    listening: BTreeSet<Subscription>,
    observers: HashMap<u64, IntersectionObserver>,
    /// Browser handle and deadline of the armed timeout.
    timer: Option<(i32, f64)>,
    frame_requested: bool,
    on_timer: Closure<dyn FnMut()>,
    on_frame: Closure<dyn FnMut(f64)>,
}

impl Driver {
    /// Take over a mounted portfolio and apply its mount effects.
    pub fn start(
        window: Window,
        registry: Registry,
        page: PageBindings,
        portfolio: Portfolio,
        mounted: Effects,
        origin: f64,
    ) -> SharedDriver {
        let driver = Rc::new_cyclic(|this: &Weak<RefCell<Driver>>| {
            let on_timer = {
                let this = this.clone();
                Closure::wrap(Box::new(move || with_driver(&this, Driver::fire_timers))
                    as Box<dyn FnMut()>)
            };
            let on_frame = {
                let this = this.clone();
                Closure::wrap(Box::new(move |timestamp: f64| {
                    with_driver(&this, |driver| driver.frame(timestamp));
                }) as Box<dyn FnMut(f64)>)
            };
            RefCell::new(Driver {
                this: this.clone(),
                window,
                portfolio,
                registry,
                page,
                origin,
                listening: BTreeSet::new(),
                observers: HashMap::new(),
                timer: None,
                frame_requested: false,
                on_timer,
                on_frame,
            })
        });
        driver.borrow_mut().flush(mounted);
        driver
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn page(&self) -> &PageBindings {
        &self.page
    }

    fn clock(&self) -> f64 {
        now(&self.window) - self.origin
    }

    /// Bring the portfolio clock up to date, then deliver `event`.
    fn handle(&mut self, event: &PageEvent, dom_event: Option<&Event>) {
        let now = self.clock();
        let layout = DomLayout::new(&self.registry);
        let mut effects = self.portfolio.advance_to(now, &layout);
        effects.extend(self.portfolio.dispatch(event, &layout));
        if effects.prevent_default
            && let Some(dom_event) = dom_event
        {
            dom_event.prevent_default();
        }
        self.flush(effects);
    }

    fn fire_timers(&mut self) {
        self.timer = None;
        let now = self.clock();
        let effects = self
            .portfolio
            .advance_to(now, &DomLayout::new(&self.registry));
        self.flush(effects);
    }

    fn frame(&mut self, timestamp: f64) {
        self.frame_requested = false;
        let now = timestamp - self.origin;
        let effects = self
            .portfolio
            .animation_frame(now, &DomLayout::new(&self.registry));
        self.flush(effects);
    }

    /// Apply effects, then bring listeners, the timeout and the frame
    /// request in line with what the portfolio now wants.
    fn flush(&mut self, effects: Effects) {
        for command in &effects.commands {
            let applied = match command {
                DomCommand::Observe { node, threshold } => self.observe(*node, *threshold),
                other => self.registry.apply(&self.window, other),
            };
            if let Err(e) = applied {
                warn!("failed to apply {command:?}: {e:?}");
            }
        }
        self.sync_listeners();
        self.arm_timer();
        self.request_frame();
    }

    fn sync_listeners(&mut self) {
        let fresh: Vec<Subscription> = self
            .portfolio
            .subscriptions()
            .copied()
            .filter(|s| !self.listening.contains(s))
            .collect();
        for subscription in fresh {
            match self.listen(subscription) {
                Ok(()) => {
                    self.listening.insert(subscription);
                }
                Err(e) => warn!("cannot listen for {subscription:?}: {e:?}"),
            }
        }
    }

    fn listen(&self, subscription: Subscription) -> Result<(), JsValue> {
        let Subscription { node, kind } = subscription;
        let target: EventTarget = if node == NodeId::DOCUMENT {
            self.window.clone().into()
        } else {
            match self.registry.element(node) {
                Some(el) => el.into(),
                None => {
                    debug!("listen: {node} is not bound");
                    return Ok(());
                }
            }
        };
        let this = self.this.clone();
        let callback = Closure::wrap(Box::new(move |event: Event| {
            with_driver(&this, |driver| {
                if let Some(page_event) = driver.page_event(node, kind, &event) {
                    driver.handle(&page_event, Some(&event));
                }
            });
        }) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind.dom_name(), callback.as_ref().unchecked_ref())?;
        // Listeners live as long as the page.
        callback.forget();
        Ok(())
    }

    fn page_event(&self, node: NodeId, kind: Listen, event: &Event) -> Option<PageEvent> {
        let pointer = || {
            event
                .dyn_ref::<MouseEvent>()
                .map(|m| Point::new(f64::from(m.client_x()), f64::from(m.client_y())))
        };
        Some(match kind {
            Listen::Scroll => PageEvent::Scroll {
                y: self.window.scroll_y().unwrap_or(0.0),
            },
            Listen::PointerMove => PageEvent::PointerMove {
                position: pointer()?,
            },
            Listen::PointerDown => PageEvent::PointerDown,
            Listen::PointerEnter => PageEvent::PointerEnter { node },
            Listen::PointerLeave => PageEvent::PointerLeave { node },
            Listen::Click => PageEvent::Click {
                node,
                position: pointer().unwrap_or_default(),
            },
            Listen::KeyDown => PageEvent::KeyDown {
                node,
                key: Key::from_dom(&event.dyn_ref::<KeyboardEvent>()?.key()),
            },
            Listen::Submit => PageEvent::Submit {
                node,
                fields: self.form_fields(node),
            },
        })
    }

    fn form_fields(&self, node: NodeId) -> Vec<FormField> {
        let Some(form) = self
            .registry
            .element(node)
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
        else {
            return Vec::new();
        };
        let Ok(data) = FormData::new_with_form(&form) else {
            return Vec::new();
        };
        let Ok(Some(entries)) = js_sys::try_iter(&data) else {
            return Vec::new();
        };
        entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let pair = js_sys::Array::from(&entry);
                Some(FormField {
                    name: pair.get(0).as_string()?,
                    // File inputs have no string value.
                    value: pair.get(1).as_string().unwrap_or_default(),
                })
            })
            .collect()
    }

    fn observe(&mut self, node: NodeId, threshold: f64) -> Result<(), JsValue> {
        let Some(element) = self.registry.element(node) else {
            debug!("observe: {node} is not bound");
            return Ok(());
        };
        let observer = match self.observers.entry(threshold.to_bits()) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(v) => v.insert(intersection_observer(&self.this, threshold)?),
        };
        observer.observe(&element);
        Ok(())
    }

    fn on_intersection(&mut self, records: &js_sys::Array) {
        let entries: Vec<IntersectionEntry> = records
            .iter()
            .filter_map(|record| record.dyn_into::<IntersectionObserverEntry>().ok())
            .filter_map(|record| {
                Some(IntersectionEntry {
                    node: self.registry.lookup(&record.target())?,
                    visible: record.is_intersecting(),
                })
            })
            .collect();
        if !entries.is_empty() {
            self.handle(&PageEvent::Intersection { entries }, None);
        }
    }

    fn arm_timer(&mut self) {
        let deadline = self.portfolio.next_deadline();
        if let Some((_, armed)) = self.timer
            && Some(armed) == deadline
        {
            return;
        }
        if let Some((handle, _)) = self.timer.take() {
            self.window.clear_timeout_with_handle(handle);
        }
        let Some(deadline) = deadline else {
            return;
        };
        let delay = (deadline - self.clock()).max(0.0).ceil() as i32;
        match self.window.set_timeout_with_callback_and_timeout_and_arguments_0(
            self.on_timer.as_ref().unchecked_ref(),
            delay,
        ) {
            Ok(handle) => self.timer = Some((handle, deadline)),
            Err(e) => warn!("cannot arm timer: {e:?}"),
        }
    }

    fn request_frame(&mut self) {
        if self.frame_requested || !self.portfolio.wants_frame() {
            return;
        }
        match self
            .window
            .request_animation_frame(self.on_frame.as_ref().unchecked_ref())
        {
            Ok(_) => self.frame_requested = true,
            Err(e) => warn!("cannot request animation frame: {e:?}"),
        }
    }
}

/// Run `f` on the driver unless it is gone or already busy.
fn with_driver(this: &Weak<RefCell<Driver>>, f: impl FnOnce(&mut Driver)) {
    let Some(driver) = this.upgrade() else {
        return;
    };
    match driver.try_borrow_mut() {
        Ok(mut driver) => f(&mut driver),
        Err(_) => warn!("dropping re-entrant browser callback"),
    }
}

fn intersection_observer(
    this: &Weak<RefCell<Driver>>,
    threshold: f64,
) -> Result<IntersectionObserver, JsValue> {
    let this = this.clone();
    let callback = Closure::wrap(Box::new(
        move |records: js_sys::Array, _observer: IntersectionObserver| {
            with_driver(&this, |driver| driver.on_intersection(&records));
        },
    ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();
    Ok(observer)
}

/// Milliseconds on the `performance.now()` timeline.
pub fn now(window: &Window) -> f64 {
    window.performance().as_ref().map_or(0.0, Performance::now)
}
