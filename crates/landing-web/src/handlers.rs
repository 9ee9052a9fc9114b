#![forbid(unsafe_code)]

//! Explicit event-handler registration.
//!
//! The registry lists every `(target, event kind)` pair the host must attach
//! a listener for, and routes incoming [`PageEvent`]s to a [`Handler`]. An
//! event whose target has no binding is not routed.

use landing_core::event::{ClickTarget, EventKind, PageEvent};
use serde::Serialize;

use crate::layout::PageLayout;
use crate::patch::selector;

/// Target of window-level listeners.
pub const WINDOW: &str = "window";
/// Target of document-level listeners.
pub const DOCUMENT: &str = "document";
/// Target of notification close buttons (delegated).
pub const NOTIFICATION_CLOSE: &str = ".notification-close";

/// One listener the host must attach.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Binding {
    /// CSS selector, or [`WINDOW`] / [`DOCUMENT`].
    pub target: String,
    /// Event kind.
    pub kind: EventKind,
}

/// What an event is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// Page init.
    Init,
    /// Clear a field's error as the user types.
    ClearFieldError,
    /// Validate a field on blur.
    ValidateField,
    /// Run the submission controller.
    SubmitForm,
    /// Smooth-scroll and activate a nav link.
    NavigateTo,
    /// Toggle the mobile menu.
    ToggleMenu,
    /// Dismiss a notification.
    DismissNotification,
    /// Spawn a click ripple.
    Ripple,
    /// Recompute the active nav link.
    HighlightNav,
    /// Store section bounds.
    MeasureSections,
    /// Reveal an element.
    Reveal,
    /// Page teardown.
    Teardown,
}

/// The page's listener table.
#[derive(Debug, Clone, Default)]
pub struct HandlerRegistry {
    bindings: Vec<(Binding, Handler)>,
}

impl HandlerRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindings for every interactive element of `layout`.
    #[must_use]
    pub fn for_layout(layout: &PageLayout) -> Self {
        let mut reg = Self::new();
        reg.register(DOCUMENT, EventKind::Loaded, Handler::Init);
        reg.register(WINDOW, EventKind::Unload, Handler::Teardown);
        reg.register(WINDOW, EventKind::Scroll, Handler::HighlightNav);
        reg.register(WINDOW, EventKind::SectionsMeasured, Handler::MeasureSections);

        for field in &layout.fields {
            let target = selector::field(&field.name);
            reg.register(target.clone(), EventKind::Blur, Handler::ValidateField);
            reg.register(target, EventKind::Input, Handler::ClearFieldError);
        }
        reg.register(selector::id(&layout.form_id), EventKind::Submit, Handler::SubmitForm);

        for href in &layout.nav_links {
            reg.register(selector::nav_link(href), EventKind::Click, Handler::NavigateTo);
        }
        reg.register(selector::class(&layout.menu_button), EventKind::Click, Handler::ToggleMenu);
        reg.register(NOTIFICATION_CLOSE, EventKind::Click, Handler::DismissNotification);
        for button in &layout.ripple_buttons {
            reg.register(selector::class(button), EventKind::Click, Handler::Ripple);
        }
        for element in &layout.reveal_elements {
            reg.register(selector::class(element), EventKind::Intersect, Handler::Reveal);
        }
        reg
    }

    /// Bind `handler` to `(target, kind)`, replacing an existing binding.
    pub fn register(&mut self, target: impl Into<String>, kind: EventKind, handler: Handler) {
        let binding = Binding {
            target: target.into(),
            kind,
        };
        match self.bindings.iter_mut().find(|(b, _)| *b == binding) {
            Some(slot) => slot.1 = handler,
            None => self.bindings.push((binding, handler)),
        }
    }

    /// Whether `(target, kind)` is bound.
    #[must_use]
    pub fn contains(&self, target: &str, kind: EventKind) -> bool {
        self.lookup(target, kind).is_some()
    }

    /// Every binding, in registration order.
    pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter().map(|(b, _)| b)
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Handler for `event`, if its target is bound.
    #[must_use]
    pub fn route(&self, event: &PageEvent, layout: &PageLayout) -> Option<Handler> {
        let target = event_target(event, layout);
        self.lookup(&target, event.kind())
    }

    fn lookup(&self, target: &str, kind: EventKind) -> Option<Handler> {
        self.bindings
            .iter()
            .find(|(b, _)| b.kind == kind && b.target == target)
            .map(|(_, h)| *h)
    }
}

/// Selector of the element an event was dispatched on.
fn event_target(event: &PageEvent, layout: &PageLayout) -> String {
    match event {
        PageEvent::Loaded => DOCUMENT.to_string(),
        PageEvent::Scroll { .. } | PageEvent::SectionsMeasured { .. } | PageEvent::Unload => {
            WINDOW.to_string()
        }
        PageEvent::Input { field, .. } | PageEvent::Blur { field, .. } => selector::field(field),
        PageEvent::Submit => selector::id(&layout.form_id),
        PageEvent::Intersect { element, .. } => selector::class(element),
        PageEvent::Click { target, .. } => match target {
            ClickTarget::NavLink { href } => selector::nav_link(href),
            ClickTarget::MenuButton => selector::class(&layout.menu_button),
            ClickTarget::NotificationClose { .. } => NOTIFICATION_CLOSE.to_string(),
            ClickTarget::Button { element, .. } => selector::class(element),
        },
    }
}
