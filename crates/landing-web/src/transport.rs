#![forbid(unsafe_code)]

//! Transport selected by configuration.

use core::time::Duration;

use landing_forms::{
    FormPayload, HostTransport, SimulatedTransport, SubmissionTransport, TransportError,
};

use crate::config::{PageConfig, TransportMode};

/// The page's delivery mechanism.
#[derive(Debug, Clone)]
pub enum WebTransport {
    /// Always succeeds after a delay.
    Simulated(SimulatedTransport),
    /// Delivered by the host.
    Host(HostTransport),
}

impl WebTransport {
    /// Build the transport named by `config`.
    #[must_use]
    pub fn from_config(config: &PageConfig) -> Self {
        match config.transport {
            TransportMode::Simulated => {
                Self::Simulated(SimulatedTransport::new(config.submission_delay()))
            }
            TransportMode::Host => Self::Host(HostTransport::new()),
        }
    }

    /// JSON payload waiting for the host, if delivery is host-driven.
    pub fn take_outbox(&mut self) -> Option<String> {
        match self {
            Self::Simulated(_) => None,
            Self::Host(t) => t.take_outbox(),
        }
    }

    /// Report the host's delivery outcome. Returns `false` when there is no
    /// host delivery in flight.
    pub fn resolve(&mut self, outcome: Result<(), TransportError>) -> bool {
        match self {
            Self::Simulated(_) => false,
            Self::Host(t) => t.resolve(outcome),
        }
    }
}

impl SubmissionTransport for WebTransport {
    fn start(&mut self, payload: &FormPayload, now: Duration) -> Result<(), TransportError> {
        match self {
            Self::Simulated(t) => t.start(payload, now),
            Self::Host(t) => t.start(payload, now),
        }
    }

    fn poll(&mut self, now: Duration) -> Option<Result<(), TransportError>> {
        match self {
            Self::Simulated(t) => t.poll(now),
            Self::Host(t) => t.poll(now),
        }
    }

    fn deadline(&self) -> Option<Duration> {
        match self {
            Self::Simulated(t) => t.deadline(),
            Self::Host(t) => t.deadline(),
        }
    }

    fn abandon(&mut self) {
        match self {
            Self::Simulated(t) => t.abandon(),
            Self::Host(t) => t.abandon(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_ignores_host_outcomes() {
        let mut t = WebTransport::from_config(&PageConfig::default());
        assert!(!t.resolve(Ok(())));
        assert_eq!(t.take_outbox(), None);
    }

    #[test]
    fn host_mode_exposes_outbox() {
        let config = PageConfig::default().with_transport(TransportMode::Host);
        let mut t = WebTransport::from_config(&config);
        let payload: FormPayload = [("email".to_string(), "a@b.com".to_string())]
            .into_iter()
            .collect();
        t.start(&payload, Duration::ZERO).unwrap();
        assert_eq!(t.take_outbox().as_deref(), Some(r#"{"email":"a@b.com"}"#));
        assert!(t.resolve(Ok(())));
        assert_eq!(t.poll(Duration::ZERO), Some(Ok(())));
    }
}
