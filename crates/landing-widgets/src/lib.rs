#![forbid(unsafe_code)]

//! Page widgets: the notification presenter plus the cosmetic behaviors
//! (navigation highlighting, mobile menu, fade-in reveal, click ripple).
//!
//! Each widget is plain state driven by explicit calls with the current
//! time; none of them touches the DOM.

pub mod menu;
pub mod nav;
pub mod notification;
pub mod reveal;
pub mod ripple;

pub use menu::MobileMenu;
pub use nav::{ActiveChange, LinkActivation, NavHighlighter};
pub use notification::{
    Notification, NotificationChange, NotificationConfig, NotificationId,
    NotificationPresenter, RemovalReason, severity_color,
};
pub use reveal::{RevealOptions, RevealTracker};
pub use ripple::{Ripple, RippleEffects, RippleGeometry, RippleId};
