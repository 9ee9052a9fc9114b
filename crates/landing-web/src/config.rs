#![forbid(unsafe_code)]

//! Page configuration.
//!
//! Every field has a default matching the shipped page, so an empty JSON
//! object (`{}`) is a complete configuration.

use core::time::Duration;

use landing_forms::RuleSpec;
use serde::{Deserialize, Serialize};

use crate::error::PageError;

/// How form submissions are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    /// Succeed after `submission_delay_ms`.
    #[default]
    Simulated,
    /// The host performs delivery and reports the outcome.
    Host,
}

/// Tunables for a page instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Distance from the viewport top to the nav reference point, in pixels.
    pub scroll_offset: f64,
    /// Notification auto-dismiss timeout. `0` keeps notifications until closed.
    pub notification_timeout_ms: u64,
    /// Delay of the simulated delivery.
    pub submission_delay_ms: u64,
    /// Ripple lifetime.
    pub ripple_lifetime_ms: u64,
    /// Intersection ratio that reveals an element.
    pub reveal_threshold: f64,
    /// Bottom root margin for the reveal observer, in pixels.
    pub reveal_root_margin_bottom: f64,
    /// Refuse to mount fields that have no error element.
    pub strict_error_slots: bool,
    /// Delivery mode.
    pub transport: TransportMode,
    /// Rules replacing or extending the built-in ones, keyed by field name.
    pub rules: Vec<RuleSpec>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            scroll_offset: landing_widgets::nav::DEFAULT_SCROLL_OFFSET,
            notification_timeout_ms: 5000,
            submission_delay_ms: 2000,
            ripple_lifetime_ms: 600,
            reveal_threshold: landing_widgets::reveal::DEFAULT_THRESHOLD,
            reveal_root_margin_bottom: landing_widgets::reveal::DEFAULT_ROOT_MARGIN_BOTTOM,
            strict_error_slots: false,
            transport: TransportMode::Simulated,
            rules: Vec::new(),
        }
    }
}

impl PageConfig {
    /// Parse a configuration from JSON; missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, PageError> {
        serde_json::from_str(json).map_err(PageError::Config)
    }

    /// Set the nav reference offset.
    #[must_use]
    pub fn with_scroll_offset(mut self, offset: f64) -> Self {
        self.scroll_offset = offset;
        self
    }

    /// Set the notification timeout.
    #[must_use]
    pub fn with_notification_timeout(mut self, timeout: Duration) -> Self {
        self.notification_timeout_ms = duration_ms(timeout);
        self
    }

    /// Set the simulated delivery delay.
    #[must_use]
    pub fn with_submission_delay(mut self, delay: Duration) -> Self {
        self.submission_delay_ms = duration_ms(delay);
        self
    }

    /// Set the ripple lifetime.
    #[must_use]
    pub fn with_ripple_lifetime(mut self, lifetime: Duration) -> Self {
        self.ripple_lifetime_ms = duration_ms(lifetime);
        self
    }

    /// Set the reveal threshold.
    #[must_use]
    pub fn with_reveal_threshold(mut self, threshold: f64) -> Self {
        self.reveal_threshold = threshold;
        self
    }

    /// Set the reveal observer's bottom root margin, in pixels.
    #[must_use]
    pub fn with_reveal_root_margin_bottom(mut self, px: f64) -> Self {
        self.reveal_root_margin_bottom = px;
        self
    }

    /// Fail page construction when a field has no error element.
    #[must_use]
    pub fn with_strict_error_slots(mut self, strict: bool) -> Self {
        self.strict_error_slots = strict;
        self
    }

    /// Set the delivery mode.
    #[must_use]
    pub fn with_transport(mut self, transport: TransportMode) -> Self {
        self.transport = transport;
        self
    }

    /// Add a rule override.
    #[must_use]
    pub fn with_rule(mut self, rule: RuleSpec) -> Self {
        self.rules.push(rule);
        self
    }

    /// Notification timeout, `None` when disabled.
    #[must_use]
    pub fn notification_timeout(&self) -> Option<Duration> {
        (self.notification_timeout_ms > 0)
            .then(|| Duration::from_millis(self.notification_timeout_ms))
    }

    /// Simulated delivery delay.
    #[must_use]
    pub fn submission_delay(&self) -> Duration {
        Duration::from_millis(self.submission_delay_ms)
    }

    /// Ripple lifetime.
    #[must_use]
    pub fn ripple_lifetime(&self) -> Duration {
        Duration::from_millis(self.ripple_lifetime_ms)
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_json_is_default() {
        assert_eq!(PageConfig::from_json_str("{}").unwrap(), PageConfig::default());
    }

    #[test]
    fn defaults_match_shipped_page() {
        let config = PageConfig::default();
        assert_eq!(config.scroll_offset, 100.0);
        assert_eq!(config.notification_timeout(), Some(Duration::from_millis(5000)));
        assert_eq!(config.submission_delay(), Duration::from_millis(2000));
        assert_eq!(config.ripple_lifetime(), Duration::from_millis(600));
        assert_eq!(config.reveal_threshold, 0.1);
        assert_eq!(config.reveal_root_margin_bottom, -50.0);
        assert!(!config.strict_error_slots);
        assert_eq!(config.transport, TransportMode::Simulated);
    }

    #[test]
    fn partial_json_overrides() {
        let json = r#"{
            "submission_delay_ms": 10,
            "transport": "host",
            "rules": [{"field": "name", "pattern": "^.+$", "message": "Name?"}]
        }"#;
        let config = PageConfig::from_json_str(json).unwrap();
        assert_eq!(config.submission_delay(), Duration::from_millis(10));
        assert_eq!(config.transport, TransportMode::Host);
        assert_eq!(config.rules.len(), 1);
        assert_eq!(config.notification_timeout_ms, 5000);
    }

    #[test]
    fn zero_timeout_disables_expiry() {
        let config = PageConfig::default().with_notification_timeout(Duration::ZERO);
        assert_eq!(config.notification_timeout(), None);
    }

    #[test]
    fn reveal_builders_set_observer_options() {
        let config = PageConfig::default()
            .with_reveal_threshold(0.25)
            .with_reveal_root_margin_bottom(-120.0);
        assert_eq!(config.reveal_threshold, 0.25);
        assert_eq!(config.reveal_root_margin_bottom, -120.0);
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = PageConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, PageError::Config(_)));
    }
}
