#![forbid(unsafe_code)]

//! Deterministic, JSON-friendly event schema for the page.
//!
//! The host translates DOM events into [`PageEvent`] values. Everything the
//! page needs is carried in the event itself (field values, scroll offset,
//! bounding rects), so handlers never query the DOM and a recorded event
//! stream replays identically.

use serde::{Deserialize, Serialize};

use crate::geometry::{ClientRect, VerticalSpan};

/// Measured bounds of one `section[id]` element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionMeasure {
    /// The section's `id` attribute.
    pub id: String,
    /// Vertical extent in document coordinates.
    #[serde(flatten)]
    pub span: VerticalSpan,
}

/// What was clicked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClickTarget {
    /// A navigation link with its `href` (e.g. `#services`).
    NavLink { href: String },
    /// The mobile menu button.
    MenuButton,
    /// The close control of a notification.
    NotificationClose { id: u64 },
    /// A button that carries the ripple effect.
    Button { element: String, rect: ClientRect },
}

/// Canonical page event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageEvent {
    /// DOM content loaded.
    Loaded,
    /// A form control's value changed (fires per keystroke / selection).
    Input { field: String, value: String },
    /// A form control lost focus.
    Blur {
        field: String,
        /// Current value, when the host reports it with the blur.
        #[serde(default)]
        value: Option<String>,
    },
    /// The contact form was submitted.
    Submit,
    /// A pointer click.
    Click {
        target: ClickTarget,
        #[serde(default)]
        client_x: f64,
        #[serde(default)]
        client_y: f64,
    },
    /// Window scrolled.
    Scroll { scroll_y: f64 },
    /// Section geometry was (re)measured after load or resize.
    SectionsMeasured { sections: Vec<SectionMeasure> },
    /// Intersection observer report for an animated element.
    Intersect {
        element: String,
        ratio: f64,
        is_intersecting: bool,
    },
    /// The page is being navigated away from.
    Unload,
}

/// Discriminant of [`PageEvent`], used for handler registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Loaded,
    Input,
    Blur,
    Submit,
    Click,
    Scroll,
    SectionsMeasured,
    Intersect,
    Unload,
}

impl PageEvent {
    /// The event's kind.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Loaded => EventKind::Loaded,
            Self::Input { .. } => EventKind::Input,
            Self::Blur { .. } => EventKind::Blur,
            Self::Submit => EventKind::Submit,
            Self::Click { .. } => EventKind::Click,
            Self::Scroll { .. } => EventKind::Scroll,
            Self::SectionsMeasured { .. } => EventKind::SectionsMeasured,
            Self::Intersect { .. } => EventKind::Intersect,
            Self::Unload => EventKind::Unload,
        }
    }

    /// Parse an event from its JSON encoding.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Encode the event as JSON.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
