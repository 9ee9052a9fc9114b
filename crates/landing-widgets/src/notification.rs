#![forbid(unsafe_code)]

//! Transient notification presenter.
//!
//! A notification is a non-blocking message shown in the top-right corner.
//! Only one is on screen at a time: showing a new one removes the previous
//! one first. Each notification removes itself after a timeout unless the
//! user closes it earlier.
//!
//! The presenter records what changed in a queue of
//! [`NotificationChange`]s; the page layer drains it and turns each change
//! into DOM patches.
//!
//! # Invariants
//!
//! 1. At most one notification is current.
//! 2. Ids are strictly increasing and never reused, so a removed
//!    notification cannot come back.
//! 3. Removing an id that is not current is a no-op.

use core::time::Duration;

use landing_core::debug;
use landing_core::notify::{Notifier, NotifyError, Severity};
use serde::{Deserialize, Serialize};

/// Default auto-dismiss timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);
/// Length of the `slideIn` entrance animation, run by the host.
pub const ENTRANCE_DURATION: Duration = Duration::from_millis(300);
/// Distance from the top and right viewport edges, in CSS pixels.
pub const EDGE_OFFSET_PX: u32 = 20;
/// Maximum width, in CSS pixels.
pub const MAX_WIDTH_PX: u32 = 400;

/// Background color for a severity.
#[must_use]
pub const fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "#27ae60",
        Severity::Error => "#e74c3c",
        Severity::Info => "#3498db",
    }
}

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(pub u64);

impl NotificationId {
    /// Create a new notification ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Presenter settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationConfig {
    /// Auto-dismiss timeout. `None` keeps notifications until closed.
    pub timeout: Option<Duration>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

/// A notification on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Identifier, unique for the presenter's lifetime.
    pub id: NotificationId,
    /// Message text.
    pub message: String,
    /// Severity.
    pub severity: Severity,
    /// When it was shown.
    pub created_at: Duration,
}

impl Notification {
    /// CSS classes of the notification element.
    #[must_use]
    pub fn class_list(&self) -> String {
        format!("notification {}", self.severity.class_name())
    }

    /// Background color.
    #[must_use]
    pub fn color(&self) -> &'static str {
        severity_color(self.severity)
    }

    /// Inline `cssText` for the element, including the `slideIn` entrance
    /// of [`ENTRANCE_DURATION`].
    #[must_use]
    pub fn css_text(&self) -> String {
        format!(
            "position: fixed; top: {edge}px; right: {edge}px; background: {bg}; \
             color: white; padding: 15px 20px; border-radius: 8px; \
             box-shadow: 0 4px 20px rgba(0,0,0,0.3); z-index: 10000; \
             max-width: {max}px; animation: slideIn {anim}ms ease;",
            edge = EDGE_OFFSET_PX,
            bg = self.color(),
            max = MAX_WIDTH_PX,
            anim = ENTRANCE_DURATION.as_millis(),
        )
    }
}

/// A change the page must mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationChange {
    /// A notification was inserted.
    Shown(Notification),
    /// A notification was removed.
    Removed(NotificationId),
}

/// Why a notification was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalReason {
    /// Replaced by a newer notification.
    Replaced,
    /// Closed by the user.
    Dismissed,
    /// Timed out.
    Expired,
    /// The presenter was closed.
    Closed,
}

/// Shows at most one notification at a time.
#[derive(Debug, Clone, Default)]
pub struct NotificationPresenter {
    config: NotificationConfig,
    current: Option<Notification>,
    next_id: u64,
    closed: bool,
    changes: Vec<NotificationChange>,
}

impl NotificationPresenter {
    /// A presenter with default timings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A presenter with the given timings.
    #[must_use]
    pub fn with_config(config: NotificationConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Timings in use.
    #[must_use]
    pub fn config(&self) -> NotificationConfig {
        self.config
    }

    /// Show `message`, replacing whatever is on screen.
    pub fn show(
        &mut self,
        message: &str,
        severity: Severity,
        now: Duration,
    ) -> Result<NotificationId, NotifyError> {
        if self.closed {
            return Err(NotifyError::Closed);
        }
        self.remove_current(RemovalReason::Replaced);

        self.next_id += 1;
        let id = NotificationId(self.next_id);
        let notification = Notification {
            id,
            message: message.to_string(),
            severity,
            created_at: now,
        };
        debug!(id = id.0, severity = severity.class_name(), "notification shown");
        self.changes.push(NotificationChange::Shown(notification.clone()));
        self.current = Some(notification);
        Ok(id)
    }

    /// Remove `id` if it is on screen. Returns whether anything was removed.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        if self.current.as_ref().is_some_and(|n| n.id == id) {
            self.remove_current(RemovalReason::Dismissed);
            true
        } else {
            false
        }
    }

    /// Expire the current notification at `now`.
    ///
    /// Returns the id of an expired notification.
    pub fn tick(&mut self, now: Duration) -> Option<NotificationId> {
        if now >= self.deadline()? {
            self.remove_current(RemovalReason::Expired)
        } else {
            None
        }
    }

    /// When the current notification expires, if it does.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        let current = self.current.as_ref()?;
        self.config
            .timeout
            .map(|t| current.created_at.saturating_add(t))
    }

    /// The notification on screen.
    #[must_use]
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Number of notifications on screen (zero or one).
    #[must_use]
    pub fn visible_count(&self) -> usize {
        usize::from(self.current.is_some())
    }

    /// Whether [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Take the changes recorded since the last call.
    pub fn drain_changes(&mut self) -> Vec<NotificationChange> {
        std::mem::take(&mut self.changes)
    }

    /// Remove the current notification and refuse further ones.
    pub fn close(&mut self) {
        self.remove_current(RemovalReason::Closed);
        self.closed = true;
    }

    fn remove_current(&mut self, reason: RemovalReason) -> Option<NotificationId> {
        let removed = self.current.take()?;
        debug!(id = removed.id.0, reason = ?reason, "notification removed");
        self.changes.push(NotificationChange::Removed(removed.id));
        Some(removed.id)
    }
}

impl Notifier for NotificationPresenter {
    fn notify(
        &mut self,
        message: &str,
        severity: Severity,
        now: Duration,
    ) -> Result<(), NotifyError> {
        self.show(message, severity, now).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn show_replaces_previous() {
        let mut p = NotificationPresenter::new();
        let a = p.show("first", Severity::Info, ms(0)).unwrap();
        let b = p.show("second", Severity::Error, ms(10)).unwrap();
        assert!(b > a);
        assert_eq!(p.visible_count(), 1);
        assert_eq!(p.current().unwrap().message, "second");

        let changes = p.drain_changes();
        assert_eq!(changes.len(), 3);
        assert!(matches!(changes[0], NotificationChange::Shown(ref n) if n.id == a));
        assert_eq!(changes[1], NotificationChange::Removed(a));
        assert!(matches!(changes[2], NotificationChange::Shown(ref n) if n.id == b));
        assert!(p.drain_changes().is_empty());
    }

    #[test]
    fn expires_after_timeout() {
        let mut p = NotificationPresenter::new();
        let id = p.show("hi", Severity::Success, ms(100)).unwrap();
        assert_eq!(p.deadline(), Some(ms(5100)));
        assert_eq!(p.tick(ms(5099)), None);
        assert_eq!(p.tick(ms(5100)), Some(id));
        assert!(p.current().is_none());
        assert_eq!(p.tick(ms(9000)), None);
    }

    #[test]
    fn css_text_pins_top_right_and_animates() {
        let mut p = NotificationPresenter::new();
        p.show("hi", Severity::Error, ms(0)).unwrap();
        let css = p.current().unwrap().css_text();
        assert!(css.starts_with("position: fixed; top: 20px; right: 20px;"));
        assert!(css.contains("background: #e74c3c;"));
        assert!(css.contains("max-width: 400px;"));
        assert!(css.ends_with("animation: slideIn 300ms ease;"));
    }

    #[test]
    fn dismiss_is_idempotent() {
        let mut p = NotificationPresenter::new();
        let id = p.show("hi", Severity::Info, ms(0)).unwrap();
        assert!(p.dismiss(id));
        assert!(!p.dismiss(id));
        assert_eq!(p.tick(ms(10_000)), None);
        let removed = p
            .drain_changes()
            .into_iter()
            .filter(|c| matches!(c, NotificationChange::Removed(_)))
            .count();
        assert_eq!(removed, 1);
    }

    #[test]
    fn stale_dismiss_does_not_touch_newer() {
        let mut p = NotificationPresenter::new();
        let old = p.show("old", Severity::Info, ms(0)).unwrap();
        let new = p.show("new", Severity::Info, ms(1)).unwrap();
        assert!(!p.dismiss(old));
        assert_eq!(p.current().unwrap().id, new);
    }

    #[test]
    fn persistent_without_timeout() {
        let mut p = NotificationPresenter::with_config(NotificationConfig { timeout: None });
        p.show("stay", Severity::Info, ms(0)).unwrap();
        assert_eq!(p.deadline(), None);
        assert_eq!(p.tick(ms(1_000_000)), None);
        assert_eq!(p.visible_count(), 1);
    }

    #[test]
    fn closed_presenter_refuses() {
        let mut p = NotificationPresenter::new();
        p.show("hi", Severity::Info, ms(0)).unwrap();
        p.close();
        assert!(p.current().is_none());
        assert_eq!(p.show("again", Severity::Info, ms(1)), Err(NotifyError::Closed));
        assert_eq!(p.notify("x", Severity::Info, ms(1)), Err(NotifyError::Closed));
    }

    #[test]
    fn blank_message_is_shown_as_is() {
        let mut p = NotificationPresenter::new();
        let id = p.show("  ", Severity::Info, ms(0)).unwrap();
        assert_eq!(p.current().unwrap().id, id);
        assert_eq!(p.current().unwrap().message, "  ");
    }

    #[test]
    fn severity_styles() {
        assert_eq!(severity_color(Severity::Success), "#27ae60");
        assert_eq!(severity_color(Severity::Error), "#e74c3c");
        assert_eq!(severity_color(Severity::default()), "#3498db");
        let mut p = NotificationPresenter::new();
        p.show("x", Severity::Error, ms(0)).unwrap();
        assert_eq!(p.current().unwrap().class_list(), "notification error");
    }
}
