pub mod contact_form;
pub mod cursor_trail;
pub mod hero;
pub mod keyboard;
pub mod micro;
pub mod navbar;
pub mod parallax;
pub mod particles;
pub mod performance;
pub mod project_filter;
pub mod reveal;
pub mod scroll_top;
pub mod smooth_scroll;
pub mod theme;
pub mod timeline;
pub mod typing;

pub use contact_form::ContactForm;
pub use cursor_trail::CursorTrail;
pub use hero::Hero3d;
pub use keyboard::KeyboardNavigation;
pub use micro::MicroInteractions;
pub use navbar::Navbar;
pub use parallax::Parallax;
pub use particles::{FloatingParticles, Particle};
pub use project_filter::ProjectFilter;
pub use reveal::ScrollReveal;
pub use scroll_top::ScrollToTop;
pub use smooth_scroll::SmoothScroll;
pub use theme::ThemeManager;
pub use timeline::{Direction, Timeline};
pub use typing::TypingAnimation;
