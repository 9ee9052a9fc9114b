#![forbid(unsafe_code)]

//! DOM mutations produced by the page.
//!
//! The page never touches the DOM. Every visible effect is a [`DomPatch`]
//! the host applies in order. Targets are CSS selectors built with
//! [`selector`].

use landing_core::notify::Severity;
use landing_widgets::{Notification, NotificationId, Ripple, RippleId};
use serde::{Deserialize, Serialize};

use crate::error::PageError;

/// Class shown on a visible field error element.
pub const SHOW_CLASS: &str = "show";
/// Class on the submit button while a delivery is in flight.
pub const LOADING_CLASS: &str = "loading";
/// Inline style property used for field validity.
pub const BORDER_COLOR: &str = "border-color";

/// Selector builders.
pub mod selector {
    /// Element by id.
    #[must_use]
    pub fn id(id: &str) -> String {
        format!("#{id}")
    }

    /// Element by class.
    #[must_use]
    pub fn class(class: &str) -> String {
        format!(".{class}")
    }

    /// Form control by `name` attribute.
    #[must_use]
    pub fn field(name: &str) -> String {
        format!("[name=\"{name}\"]")
    }

    /// Nav link by `href`.
    #[must_use]
    pub fn nav_link(href: &str) -> String {
        format!(".nav-link[href=\"{href}\"]")
    }
}

/// One DOM mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DomPatch {
    /// `classList.add`.
    AddClass { target: String, class: String },
    /// `classList.remove`.
    RemoveClass { target: String, class: String },
    /// Replace `textContent`.
    SetText { target: String, text: String },
    /// Set one inline style property.
    SetStyle {
        target: String,
        property: String,
        value: String,
    },
    /// Set the `disabled` property.
    SetDisabled { target: String, disabled: bool },
    /// Native `form.reset()`.
    ResetForm { target: String },
    /// Insert a notification element.
    ShowNotification {
        id: NotificationId,
        message: String,
        severity: Severity,
        class_list: String,
        /// Inline `cssText` (position, colors, `slideIn` animation).
        style: String,
    },
    /// Remove a notification element (no-op if already gone).
    RemoveNotification { id: NotificationId },
    /// `scrollIntoView({ behavior: "smooth", block: "start" })`.
    ScrollIntoView { target: String },
    /// Append a ripple `<span>` to a button.
    SpawnRipple {
        id: RippleId,
        target: String,
        size: f64,
        x: f64,
        y: f64,
    },
    /// Remove a ripple.
    RemoveRipple { id: RippleId },
    /// Call `preventDefault()` on the event being handled.
    PreventDefault,
}

impl DomPatch {
    /// Add `class` to `target`.
    pub fn add_class(target: impl Into<String>, class: &str) -> Self {
        Self::AddClass {
            target: target.into(),
            class: class.to_string(),
        }
    }

    /// Remove `class` from `target`.
    pub fn remove_class(target: impl Into<String>, class: &str) -> Self {
        Self::RemoveClass {
            target: target.into(),
            class: class.to_string(),
        }
    }

    /// Add or remove `class` on `target`.
    pub fn toggle_class(target: impl Into<String>, class: &str, on: bool) -> Self {
        if on {
            Self::add_class(target, class)
        } else {
            Self::remove_class(target, class)
        }
    }

    /// Set `target`'s border color.
    pub fn border(target: impl Into<String>, color: &str) -> Self {
        Self::SetStyle {
            target: target.into(),
            property: BORDER_COLOR.to_string(),
            value: color.to_string(),
        }
    }

    /// Insert `notification`.
    #[must_use]
    pub fn show_notification(notification: &Notification) -> Self {
        Self::ShowNotification {
            id: notification.id,
            message: notification.message.clone(),
            severity: notification.severity,
            class_list: notification.class_list(),
            style: notification.css_text(),
        }
    }

    /// Append `ripple` to its button.
    #[must_use]
    pub fn spawn_ripple(ripple: &Ripple) -> Self {
        Self::SpawnRipple {
            id: ripple.id,
            target: selector::class(&ripple.element),
            size: ripple.geometry.size,
            x: ripple.geometry.x,
            y: ripple.geometry.y,
        }
    }
}

/// Encode a batch of patches as a JSON array.
pub fn patches_to_json(patches: &[DomPatch]) -> Result<String, PageError> {
    serde_json::to_string(patches).map_err(PageError::Encode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn selectors() {
        assert_eq!(selector::id("nameError"), "#nameError");
        assert_eq!(selector::class("nav"), ".nav");
        assert_eq!(selector::field("email"), "[name=\"email\"]");
        assert_eq!(selector::nav_link("#home"), ".nav-link[href=\"#home\"]");
    }

    #[test]
    fn json_is_tagged_by_op() {
        let json = patches_to_json(&[
            DomPatch::add_class("#nameError", SHOW_CLASS),
            DomPatch::PreventDefault,
        ])
        .unwrap();
        assert_eq!(
            json,
            concat!(
                r##"[{"op":"add_class","target":"#nameError","class":"show"},"##,
                r##"{"op":"prevent_default"}]"##
            )
        );
    }

    #[test]
    fn notification_patch_carries_style() {
        let n = Notification {
            id: NotificationId::new(3),
            message: "Hi".into(),
            severity: Severity::Success,
            created_at: core::time::Duration::ZERO,
        };
        let patch = DomPatch::show_notification(&n);
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json["id"], 3);
        let style = json["style"].as_str().unwrap();
        assert!(style.contains("top: 20px; right: 20px;"));
        assert!(style.contains("background: #27ae60;"));
        assert!(style.contains("max-width: 400px;"));
        assert!(style.contains("animation: slideIn 300ms ease;"));
        assert_eq!(json["class_list"], "notification success");
        assert_eq!(json["severity"], "success");
    }
}
