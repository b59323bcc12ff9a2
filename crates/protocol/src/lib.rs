pub mod commands;
pub mod events;
pub mod theme;
pub mod types;

pub use commands::DomCommand;
pub use events::{FormField, IntersectionEntry, Key, Listen, PageEvent, Subscription};
pub use theme::Theme;
pub use types::{NodeId, Point, Rect, Size};
