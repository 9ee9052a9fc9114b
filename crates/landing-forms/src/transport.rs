#![forbid(unsafe_code)]

//! Delivery of form data.
//!
//! Transports are polled, never awaited: the host advances time and the
//! controller asks whether the delivery has resolved. This keeps the page
//! single-threaded and lets tests substitute deterministic outcomes instead
//! of waiting on a real timer.

use core::time::Duration;
use std::collections::VecDeque;

use crate::payload::FormPayload;

/// Delay of the simulated delivery.
pub const DEFAULT_SIMULATED_DELAY: Duration = Duration::from_millis(2000);

/// Why a delivery failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// A delivery is already in flight.
    #[error("a delivery is already in flight")]
    Busy,
    /// The receiving end refused the data.
    #[error("delivery rejected: {0}")]
    Rejected(String),
    /// The payload could not be encoded.
    #[error("payload encoding failed: {0}")]
    Encode(String),
}

/// An asynchronous delivery of form data.
///
/// Contract: resolve with `Ok(())` on success and `Err` on failure, exactly
/// once per `start`.
pub trait SubmissionTransport {
    /// Begin delivering `payload` at `now`.
    fn start(&mut self, payload: &FormPayload, now: Duration) -> Result<(), TransportError>;

    /// Outcome of the current delivery, once it has resolved at `now`.
    fn poll(&mut self, now: Duration) -> Option<Result<(), TransportError>>;

    /// Earliest time the current delivery can resolve, if known.
    fn deadline(&self) -> Option<Duration> {
        None
    }

    /// Forget the current delivery without resolving it.
    fn abandon(&mut self);
}

// ---------------------------------------------------------------------------
// SimulatedTransport
// ---------------------------------------------------------------------------

/// Stand-in for a network call: always succeeds after a fixed delay.
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    delay: Duration,
    due: Option<Duration>,
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new(DEFAULT_SIMULATED_DELAY)
    }
}

impl SimulatedTransport {
    /// A transport resolving `delay` after each start.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            due: None,
        }
    }

    /// Configured delay.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl SubmissionTransport for SimulatedTransport {
    fn start(&mut self, _payload: &FormPayload, now: Duration) -> Result<(), TransportError> {
        if self.due.is_some() {
            return Err(TransportError::Busy);
        }
        self.due = Some(now.saturating_add(self.delay));
        Ok(())
    }

    fn poll(&mut self, now: Duration) -> Option<Result<(), TransportError>> {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                Some(Ok(()))
            }
            _ => None,
        }
    }

    fn deadline(&self) -> Option<Duration> {
        self.due
    }

    fn abandon(&mut self) {
        self.due = None;
    }
}

// ---------------------------------------------------------------------------
// ScriptedTransport
// ---------------------------------------------------------------------------

/// Resolves deliveries with pre-recorded outcomes, in order.
///
/// Once the script is exhausted every delivery succeeds.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    delay: Duration,
    script: VecDeque<Result<(), TransportError>>,
    due: Option<Duration>,
    sent: Vec<FormPayload>,
}

impl ScriptedTransport {
    /// A transport resolving with `script` outcomes after `delay`.
    #[must_use]
    pub fn new(
        delay: Duration,
        script: impl IntoIterator<Item = Result<(), TransportError>>,
    ) -> Self {
        Self {
            delay,
            script: script.into_iter().collect(),
            due: None,
            sent: Vec::new(),
        }
    }

    /// A transport whose next delivery fails with `reason`.
    #[must_use]
    pub fn failing_once(delay: Duration, reason: impl Into<String>) -> Self {
        Self::new(delay, [Err(TransportError::Rejected(reason.into()))])
    }

    /// Payloads handed to this transport, oldest first.
    #[must_use]
    pub fn sent(&self) -> &[FormPayload] {
        &self.sent
    }
}

impl SubmissionTransport for ScriptedTransport {
    fn start(&mut self, payload: &FormPayload, now: Duration) -> Result<(), TransportError> {
        if self.due.is_some() {
            return Err(TransportError::Busy);
        }
        self.due = Some(now.saturating_add(self.delay));
        self.sent.push(payload.clone());
        Ok(())
    }

    fn poll(&mut self, now: Duration) -> Option<Result<(), TransportError>> {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                Some(self.script.pop_front().unwrap_or(Ok(())))
            }
            _ => None,
        }
    }

    fn deadline(&self) -> Option<Duration> {
        self.due
    }

    fn abandon(&mut self) {
        self.due = None;
    }
}

// ---------------------------------------------------------------------------
// HostTransport
// ---------------------------------------------------------------------------

/// Delivery performed by the embedding host (e.g. a `fetch` in JS).
///
/// `start` encodes the payload into an outbox the host drains; the host
/// later reports the outcome through [`HostTransport::resolve`].
#[derive(Debug, Clone, Default)]
pub struct HostTransport {
    in_flight: bool,
    outbox: Option<String>,
    outcome: Option<Result<(), TransportError>>,
}

impl HostTransport {
    /// A transport with nothing in flight.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the JSON payload awaiting delivery, if any.
    pub fn take_outbox(&mut self) -> Option<String> {
        self.outbox.take()
    }

    /// Report the outcome of the current delivery.
    ///
    /// Returns `false` (and drops the outcome) when nothing is in flight.
    pub fn resolve(&mut self, outcome: Result<(), TransportError>) -> bool {
        if !self.in_flight || self.outcome.is_some() {
            return false;
        }
        self.outcome = Some(outcome);
        true
    }

    /// Whether a delivery is in flight.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}

impl SubmissionTransport for HostTransport {
    fn start(&mut self, payload: &FormPayload, _now: Duration) -> Result<(), TransportError> {
        if self.in_flight {
            return Err(TransportError::Busy);
        }
        let json = payload
            .to_json_string()
            .map_err(|e| TransportError::Encode(e.to_string()))?;
        self.outbox = Some(json);
        self.in_flight = true;
        Ok(())
    }

    fn poll(&mut self, _now: Duration) -> Option<Result<(), TransportError>> {
        if !self.in_flight {
            return None;
        }
        let outcome = self.outcome.take()?;
        self.in_flight = false;
        self.outbox = None;
        Some(outcome)
    }

    fn abandon(&mut self) {
        self.in_flight = false;
        self.outbox = None;
        self.outcome = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn payload() -> FormPayload {
        [("name".to_string(), "Jane".to_string())].into_iter().collect()
    }

    #[test]
    fn simulated_resolves_after_delay() {
        let mut t = SimulatedTransport::default();
        t.start(&payload(), Duration::from_millis(100)).unwrap();
        assert_eq!(t.deadline(), Some(Duration::from_millis(2100)));
        assert_eq!(t.poll(Duration::from_millis(2099)), None);
        assert_eq!(t.poll(Duration::from_millis(2100)), Some(Ok(())));
        assert_eq!(t.poll(Duration::from_millis(5000)), None);
        assert_eq!(t.deadline(), None);
    }

    #[test]
    fn simulated_keeps_no_payload_history() {
        let mut t = SimulatedTransport::new(Duration::from_millis(1));
        for i in 0..50 {
            let now = Duration::from_millis(i * 2);
            t.start(&payload(), now).unwrap();
            assert_eq!(t.poll(now + Duration::from_millis(1)), Some(Ok(())));
        }
        // Stateless between deliveries: same shape as a fresh transport.
        assert_eq!(t.deadline(), None);
        assert_eq!(
            format!("{t:?}"),
            format!("{:?}", SimulatedTransport::new(Duration::from_millis(1)))
        );
    }

    #[test]
    fn simulated_rejects_overlapping_start() {
        let mut t = SimulatedTransport::default();
        t.start(&payload(), Duration::ZERO).unwrap();
        assert_eq!(t.start(&payload(), Duration::ZERO), Err(TransportError::Busy));
    }

    #[test]
    fn scripted_replays_outcomes_then_succeeds() {
        let mut t = ScriptedTransport::failing_once(Duration::from_millis(10), "offline");
        t.start(&payload(), Duration::ZERO).unwrap();
        assert_eq!(
            t.poll(Duration::from_millis(10)),
            Some(Err(TransportError::Rejected("offline".into())))
        );
        t.start(&payload(), Duration::from_millis(20)).unwrap();
        assert_eq!(t.poll(Duration::from_millis(30)), Some(Ok(())));
        assert_eq!(t.sent().len(), 2);
    }

    #[test]
    fn host_transport_waits_for_host() {
        let mut t = HostTransport::new();
        assert!(!t.resolve(Ok(())));
        t.start(&payload(), Duration::ZERO).unwrap();
        assert_eq!(t.take_outbox().as_deref(), Some(r#"{"name":"Jane"}"#));
        assert_eq!(t.poll(Duration::from_secs(60)), None);
        assert!(t.resolve(Err(TransportError::Rejected("500".into()))));
        assert!(!t.resolve(Ok(())));
        assert_eq!(
            t.poll(Duration::ZERO),
            Some(Err(TransportError::Rejected("500".into())))
        );
        assert!(!t.is_in_flight());
    }

    #[test]
    fn abandon_drops_pending_delivery() {
        let mut t = SimulatedTransport::default();
        t.start(&payload(), Duration::ZERO).unwrap();
        t.abandon();
        assert_eq!(t.poll(Duration::from_secs(10)), None);
        assert!(t.start(&payload(), Duration::ZERO).is_ok());
    }
}
