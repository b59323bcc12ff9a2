//! Headless interaction layer for the portfolio page.
//!
//! Components never touch the DOM. They receive [`PageEvent`]s and
//! scheduled [`Task`]s and answer with [`DomCommand`]s that a host (the
//! wasm bridge in the browser, a test bench natively) applies.
//!
//! [`PageEvent`]: folio_protocol::PageEvent
//! [`DomCommand`]: folio_protocol::DomCommand

pub mod app;
pub mod components;
pub mod config;
pub mod context;
pub mod css;
pub mod error;
pub mod layout;
pub mod motion;
pub mod page;
pub mod scheduler;
pub mod state;
pub mod store;
pub mod task;

pub use app::Portfolio;
pub use config::SiteConfig;
pub use context::{Component, Context, Effects};
pub use error::{ConfigError, StoreError};
pub use layout::{Layout, StaticLayout};
pub use page::PageBindings;
pub use scheduler::Scheduler;
pub use state::{AppState, Environment};
pub use store::{MemoryStore, PreferenceStore};
pub use task::Task;
