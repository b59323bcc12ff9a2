//! Browser entry point for the portfolio page.
//!
//! The module boots itself once the document is parsed: it binds the page
//! selectors, mounts [`folio_core::Portfolio`] and hands it to a driver
//! that feeds it DOM events, timers and animation frames.

mod dom;
mod driver;
mod layout;
mod storage;

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::{Environment, Portfolio, SiteConfig};
use folio_protocol::Size;
use log::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use crate::dom::{Registry, bind_page};
use crate::driver::{Driver, SharedDriver};
use crate::layout::DomLayout;
use crate::storage::LocalStorage;

/// Id of the optional `<script type="application/json">` holding overrides.
const CONFIG_ELEMENT: &str = "folio-config";

thread_local! {
    static DRIVER: RefCell<Option<SharedDriver>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // A second init (hot reload) fails harmlessly.
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() == "loading" {
        let target = document.clone();
        let on_ready = Closure::once(move || {
            if let Err(e) = boot(&window, &document) {
                warn!("portfolio failed to start: {e:?}");
            }
        });
        target.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
        )?;
        on_ready.forget();
        Ok(())
    } else {
        boot(&window, &document)
    }
}

fn boot(window: &Window, document: &Document) -> Result<(), JsValue> {
    let config = load_config(
        document
            .get_element_by_id(CONFIG_ELEMENT)
            .and_then(|el| el.text_content()),
    );

    let mut registry = Registry::new(document.clone());
    let page = bind_page(document, &mut registry)?;
    let env = environment(window)?;
    let store = Rc::new(LocalStorage::from_window(window));

    let origin = driver::now(window);
    let (portfolio, mounted) =
        Portfolio::mount(&config, &page, &env, store, &DomLayout::new(&registry));
    let driver = Driver::start(window.clone(), registry, page, portfolio, mounted, origin);
    DRIVER.with(|slot| *slot.borrow_mut() = Some(driver));
    Ok(())
}

fn environment(window: &Window) -> Result<Environment, JsValue> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    let reduced_motion = window
        .match_media("(prefers-reduced-motion: reduce)")?
        .is_some_and(|query| query.matches());
    Ok(Environment {
        viewport: Size::new(width, height),
        scroll_y: window.scroll_y()?,
        reduced_motion,
        lazy_loading: supports_lazy_loading(window),
        seed: (js_sys::Math::random() * u64::MAX as f64) as u64,
    })
}

/// `'loading' in HTMLImageElement.prototype`
fn supports_lazy_loading(window: &Window) -> bool {
    js_sys::Reflect::get(window, &JsValue::from_str("HTMLImageElement"))
        .and_then(|class| js_sys::Reflect::get(&class, &JsValue::from_str("prototype")))
        .and_then(|proto| js_sys::Reflect::has(&proto, &JsValue::from_str("loading")))
        .unwrap_or(false)
}

/// Parse the embedded overrides, keeping the defaults when they are
/// missing or invalid.
pub fn load_config(json: Option<String>) -> SiteConfig {
    let Some(json) = json.filter(|j| !j.trim().is_empty()) else {
        return SiteConfig::default();
    };
    match SiteConfig::from_json(&json) {
        Ok(config) => {
            info!("using embedded site config");
            config
        }
        Err(e) => {
            warn!("ignoring invalid site config: {e}");
            SiteConfig::default()
        }
    }
}

fn with_driver<T>(f: impl FnOnce(&Driver) -> Result<T, JsError>) -> Result<T, JsError> {
    DRIVER.with(|slot| {
        let slot = slot.borrow();
        let driver = slot
            .as_ref()
            .ok_or_else(|| JsError::new("portfolio is not running"))?;
        let driver = driver
            .try_borrow()
            .map_err(|_| JsError::new("portfolio is busy"))?;
        f(&driver)
    })
}

/// The resolved page bindings as JSON, for debugging selector problems.
#[wasm_bindgen]
pub fn page_bindings() -> Result<String, JsError> {
    with_driver(|driver| {
        serde_json::to_string(driver.page()).map_err(|e| JsError::new(&e.to_string()))
    })
}

/// The active theme name, `"light"` or `"dark"`.
#[wasm_bindgen]
pub fn current_theme() -> Result<String, JsError> {
    with_driver(|driver| {
        let theme = driver
            .portfolio()
            .theme()
            .ok_or_else(|| JsError::new("no theme toggle on this page"))?;
        Ok(theme.theme().as_str().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_keeps_defaults() {
        assert_eq!(load_config(None), SiteConfig::default());
        assert_eq!(load_config(Some("  \n".into())), SiteConfig::default());
    }

    #[test]
    fn partial_config_overrides_only_named_fields() {
        let config = load_config(Some(r#"{"typing": {"phrases": ["Rust"]}}"#.into()));
        assert_eq!(config.typing.phrases, vec!["Rust".to_string()]);
        assert_eq!(config.theme, SiteConfig::default().theme);
    }

    #[test]
    fn invalid_config_falls_back_to_defaults() {
        assert_eq!(load_config(Some("{not json".into())), SiteConfig::default());
        assert_eq!(
            load_config(Some(r#"{"typing": {"phrases": []}}"#.into())),
            SiteConfig::default()
        );
    }
}
