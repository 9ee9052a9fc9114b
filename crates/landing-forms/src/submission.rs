#![forbid(unsafe_code)]

//! Submission controller: validate, deliver, notify.
//!
//! ```text
//! Idle -> Validating -> Invalid ------------------------> Idle
//!                    \-> Submitting -> Succeeded | Failed -> Idle
//! ```
//!
//! # Invariants
//!
//! 1. The submit control is non-interactive exactly while a delivery is in
//!    flight (`Submitting`).
//! 2. Leaving `Submitting` always restores the control, even when the
//!    notification step fails; the notification error is reported after.
//! 3. Tokens are strictly monotonic; token 0 is never issued.
//! 4. An invalid form never reaches the transport.

use core::time::Duration;
use std::collections::VecDeque;

use landing_core::notify::{Notifier, NotifyError, Severity};
use landing_core::{debug, info, warn};

use crate::form::Form;
use crate::payload::FormPayload;
use crate::transport::{SubmissionTransport, TransportError};
use crate::validator::FieldValidator;

/// Notification shown when required fields fail validation.
pub const MSG_INVALID: &str = "Please correct the errors above";
/// Notification shown when the delivery succeeds.
pub const MSG_SUCCESS: &str =
    "Thank you! Your message has been sent successfully. We'll contact you soon!";
/// Notification shown when the delivery fails.
pub const MSG_FAILURE: &str = "Sorry, there was an error sending your message. Please try again.";

/// Default number of trace events retained.
pub const DEFAULT_TRACE_CAPACITY: usize = 64;

// ---------------------------------------------------------------------------
// Phase / control state
// ---------------------------------------------------------------------------

/// State of the controller's state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    /// Waiting for a submit.
    #[default]
    Idle,
    /// Checking required fields.
    Validating,
    /// At least one required field failed.
    Invalid,
    /// Delivery in flight.
    Submitting,
    /// Delivery resolved successfully.
    Succeeded,
    /// Delivery rejected.
    Failed,
}

/// Visible state of the submit control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubmitControl {
    loading: bool,
    disabled: bool,
}

impl SubmitControl {
    /// Whether the loading indicator is shown.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the control is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn busy(&mut self) {
        self.loading = true;
        self.disabled = true;
    }

    fn restore(&mut self) {
        self.loading = false;
        self.disabled = false;
    }
}

// ---------------------------------------------------------------------------
// Tokens and attempts
// ---------------------------------------------------------------------------

/// Monotonic identifier of one submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmissionToken(u64);

impl SubmissionToken {
    /// Raw token value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubmissionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Submission({})", self.0)
    }
}

/// Outcome of an attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Delivery in flight.
    Pending,
    /// Rejected before delivery; names the failing fields.
    Invalid(Vec<String>),
    /// Delivered.
    Succeeded,
    /// Delivery failed.
    Failed(TransportError),
}

/// One press of the submit control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionAttempt {
    /// Attempt identifier.
    pub token: SubmissionToken,
    /// When the submit was received.
    pub started_at: Duration,
    /// Data handed to the transport (empty when invalid).
    pub payload: FormPayload,
    /// Current outcome.
    pub outcome: AttemptOutcome,
}

impl SubmissionAttempt {
    /// Whether the attempt's delivery is in flight.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.outcome == AttemptOutcome::Pending
    }
}

// ---------------------------------------------------------------------------
// Trace
// ---------------------------------------------------------------------------

/// Lifecycle event, recorded for debugging and replay comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionEvent {
    /// Validation failed; nothing was sent.
    Rejected {
        token: SubmissionToken,
        fields: Vec<String>,
        at: Duration,
    },
    /// Delivery started.
    Started { token: SubmissionToken, at: Duration },
    /// Delivery succeeded.
    Succeeded { token: SubmissionToken, at: Duration },
    /// Delivery failed.
    Failed {
        token: SubmissionToken,
        reason: String,
        at: Duration,
    },
    /// A submit arrived while a delivery was in flight.
    Ignored { at: Duration },
    /// The in-flight delivery was dropped by teardown.
    Abandoned { token: SubmissionToken, at: Duration },
}

impl SubmissionEvent {
    /// Event type name for logging.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Rejected { .. } => "rejected",
            Self::Started { .. } => "started",
            Self::Succeeded { .. } => "succeeded",
            Self::Failed { .. } => "failed",
            Self::Ignored { .. } => "ignored",
            Self::Abandoned { .. } => "abandoned",
        }
    }
}

/// Bounded log of [`SubmissionEvent`]s, oldest evicted first.
#[derive(Debug, Clone)]
pub struct SubmissionTrace {
    events: VecDeque<SubmissionEvent>,
    capacity: usize,
}

impl Default for SubmissionTrace {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_TRACE_CAPACITY)
    }
}

impl SubmissionTrace {
    /// A trace retaining at most `capacity` events (minimum 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn push(&mut self, event: SubmissionEvent) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &SubmissionEvent> {
        self.events.iter()
    }

    /// Event type names, oldest first.
    #[must_use]
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events.iter().map(SubmissionEvent::event_type).collect()
    }

    /// Number of retained events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the trace is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Result of handling a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A delivery was already in flight; nothing happened.
    Ignored,
    /// Required fields failed; the named fields show errors.
    Invalid(Vec<String>),
    /// Delivery started.
    Started(SubmissionToken),
    /// The transport refused to start; the attempt failed immediately.
    Failed(SubmissionToken, TransportError),
}

/// How an in-flight delivery resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Delivered; the form was reset.
    Succeeded(SubmissionToken),
    /// Delivery failed; the form keeps its values.
    Failed(SubmissionToken, TransportError),
}

/// Drives one form through validation and delivery.
#[derive(Debug)]
pub struct SubmissionController<T> {
    transport: T,
    phase: SubmissionPhase,
    control: SubmitControl,
    next_token: u64,
    attempt: Option<SubmissionAttempt>,
    trace: SubmissionTrace,
}

impl<T: SubmissionTransport> SubmissionController<T> {
    /// A controller delivering through `transport`.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            phase: SubmissionPhase::Idle,
            control: SubmitControl::default(),
            next_token: 1,
            attempt: None,
            trace: SubmissionTrace::default(),
        }
    }

    /// Replace the trace with one of `capacity` events.
    #[must_use]
    pub fn with_trace_capacity(mut self, capacity: usize) -> Self {
        self.trace = SubmissionTrace::with_capacity(capacity);
        self
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// Submit control state.
    #[must_use]
    pub fn control(&self) -> SubmitControl {
        self.control
    }

    /// Whether a delivery is in flight.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.phase == SubmissionPhase::Submitting
    }

    /// The most recent attempt.
    #[must_use]
    pub fn last_attempt(&self) -> Option<&SubmissionAttempt> {
        self.attempt.as_ref()
    }

    /// Lifecycle trace.
    #[must_use]
    pub fn trace(&self) -> &SubmissionTrace {
        &self.trace
    }

    /// The transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable access to the transport (e.g. to hand it a host outcome).
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Earliest time an in-flight delivery can resolve, if known.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        if self.is_in_flight() {
            self.transport.deadline()
        } else {
            None
        }
    }

    /// Handle a submit of `form` at `now`.
    ///
    /// The native submission is assumed cancelled by the caller.
    pub fn submit<N: Notifier + ?Sized>(
        &mut self,
        form: &mut Form,
        validator: &FieldValidator<'_>,
        notifier: &mut N,
        now: Duration,
    ) -> Result<SubmitOutcome, NotifyError> {
        if self.is_in_flight() {
            debug!("submit ignored; delivery in flight");
            self.trace.push(SubmissionEvent::Ignored { at: now });
            return Ok(SubmitOutcome::Ignored);
        }

        let token = self.issue_token();
        self.transition(SubmissionPhase::Validating);
        let invalid = form.validate_for_submit(validator);

        if !invalid.is_empty() {
            self.transition(SubmissionPhase::Invalid);
            info!(token = token.raw(), fields = ?invalid, "submission rejected");
            self.trace.push(SubmissionEvent::Rejected {
                token,
                fields: invalid.clone(),
                at: now,
            });
            self.attempt = Some(SubmissionAttempt {
                token,
                started_at: now,
                payload: FormPayload::default(),
                outcome: AttemptOutcome::Invalid(invalid.clone()),
            });
            self.transition(SubmissionPhase::Idle);
            notifier.notify(MSG_INVALID, Severity::Error, now)?;
            return Ok(SubmitOutcome::Invalid(invalid));
        }

        let payload = form.payload();
        self.transition(SubmissionPhase::Submitting);
        self.control.busy();
        self.attempt = Some(SubmissionAttempt {
            token,
            started_at: now,
            payload: payload.clone(),
            outcome: AttemptOutcome::Pending,
        });

        match self.transport.start(&payload, now) {
            Ok(()) => {
                info!(token = token.raw(), "submission started");
                self.trace.push(SubmissionEvent::Started { token, at: now });
                Ok(SubmitOutcome::Started(token))
            }
            Err(error) => {
                self.finish(Err(error.clone()), form, notifier, now)?;
                Ok(SubmitOutcome::Failed(token, error))
            }
        }
    }

    /// Check the in-flight delivery at `now`, resolving it if it is done.
    pub fn poll<N: Notifier + ?Sized>(
        &mut self,
        form: &mut Form,
        notifier: &mut N,
        now: Duration,
    ) -> Result<Option<Resolution>, NotifyError> {
        if !self.is_in_flight() {
            return Ok(None);
        }
        match self.transport.poll(now) {
            Some(result) => self.finish(result, form, notifier, now).map(Some),
            None => Ok(None),
        }
    }

    /// Drop any in-flight delivery and restore the control (page teardown).
    pub fn teardown(&mut self, now: Duration) {
        if let Some(attempt) = self.attempt.as_mut().filter(|a| a.is_in_flight()) {
            info!(token = attempt.token.raw(), "submission abandoned");
            attempt.outcome = AttemptOutcome::Failed(TransportError::Rejected(
                "page closed".to_string(),
            ));
            let token = attempt.token;
            self.trace.push(SubmissionEvent::Abandoned { token, at: now });
        }
        self.transport.abandon();
        self.control.restore();
        self.transition(SubmissionPhase::Idle);
    }

    fn finish<N: Notifier + ?Sized>(
        &mut self,
        result: Result<(), TransportError>,
        form: &mut Form,
        notifier: &mut N,
        now: Duration,
    ) -> Result<Resolution, NotifyError> {
        let token = self
            .attempt
            .as_ref()
            .map_or(SubmissionToken(0), |a| a.token);

        let (resolution, notified) = match result {
            Ok(()) => {
                self.transition(SubmissionPhase::Succeeded);
                info!(token = token.raw(), "submission succeeded");
                self.trace.push(SubmissionEvent::Succeeded { token, at: now });
                self.set_outcome(AttemptOutcome::Succeeded);
                let notified = notifier.notify(MSG_SUCCESS, Severity::Success, now);
                form.reset();
                (Resolution::Succeeded(token), notified)
            }
            Err(error) => {
                self.transition(SubmissionPhase::Failed);
                warn!(token = token.raw(), %error, "submission failed");
                self.trace.push(SubmissionEvent::Failed {
                    token,
                    reason: error.to_string(),
                    at: now,
                });
                self.set_outcome(AttemptOutcome::Failed(error.clone()));
                let notified = notifier.notify(MSG_FAILURE, Severity::Error, now);
                (Resolution::Failed(token, error), notified)
            }
        };

        self.control.restore();
        self.transition(SubmissionPhase::Idle);
        notified.map(|()| resolution)
    }

    fn issue_token(&mut self) -> SubmissionToken {
        let token = SubmissionToken(self.next_token);
        self.next_token = self.next_token.saturating_add(1);
        token
    }

    fn set_outcome(&mut self, outcome: AttemptOutcome) {
        if let Some(attempt) = self.attempt.as_mut() {
            attempt.outcome = outcome;
        }
    }

    fn transition(&mut self, to: SubmissionPhase) {
        if self.phase != to {
            debug!(from = ?self.phase, to = ?to, "submission phase");
            self.phase = to;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleTable;
    use crate::transport::{ScriptedTransport, SimulatedTransport};
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Recorder {
        shown: Vec<(String, Severity)>,
        fail: bool,
    }

    impl Notifier for Recorder {
        fn notify(
            &mut self,
            message: &str,
            severity: Severity,
            _now: Duration,
        ) -> Result<(), NotifyError> {
            if self.fail {
                return Err(NotifyError::Closed);
            }
            self.shown.push((message.to_string(), severity));
            Ok(())
        }
    }

    fn filled_form() -> Form {
        let mut form = Form::contact().unwrap();
        for (name, value) in [
            ("name", "Jane Doe"),
            ("phone", "555-123-4567"),
            ("email", "a@b.com"),
            ("serviceType", "repair"),
            ("message", "hello"),
        ] {
            form.field_mut(name).unwrap().set_value(value);
        }
        form
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn invalid_form_never_loads_and_notifies_once() {
        let rules = RuleTable::contact().unwrap();
        let validator = FieldValidator::new(&rules);
        let mut form = Form::contact().unwrap();
        let mut notes = Recorder::default();
        let mut ctl = SubmissionController::new(SimulatedTransport::default());

        let outcome = ctl.submit(&mut form, &validator, &mut notes, ms(0)).unwrap();
        assert!(matches!(outcome, SubmitOutcome::Invalid(ref f) if f.len() == 4));
        assert_eq!(ctl.phase(), SubmissionPhase::Idle);
        assert!(!ctl.control().is_loading());
        assert!(!ctl.control().is_disabled());
        assert_eq!(notes.shown, [(MSG_INVALID.to_string(), Severity::Error)]);
        assert!(!ctl.is_in_flight());
        assert_eq!(ctl.deadline(), None);
        assert!(notes.shown[0].0.contains("errors above"));
    }

    #[test]
    fn valid_form_loads_then_succeeds_and_resets() {
        let rules = RuleTable::contact().unwrap();
        let validator = FieldValidator::new(&rules);
        let mut form = filled_form();
        let mut notes = Recorder::default();
        let mut ctl = SubmissionController::new(SimulatedTransport::default());

        let outcome = ctl.submit(&mut form, &validator, &mut notes, ms(0)).unwrap();
        let SubmitOutcome::Started(token) = outcome else {
            panic!("expected start, got {outcome:?}");
        };
        assert_eq!(ctl.phase(), SubmissionPhase::Submitting);
        assert!(ctl.control().is_loading());
        assert!(ctl.control().is_disabled());
        assert_eq!(ctl.deadline(), Some(ms(2000)));
        assert!(notes.shown.is_empty());

        assert_eq!(ctl.poll(&mut form, &mut notes, ms(1999)).unwrap(), None);
        let resolved = ctl.poll(&mut form, &mut notes, ms(2000)).unwrap();
        assert_eq!(resolved, Some(Resolution::Succeeded(token)));
        assert_eq!(ctl.phase(), SubmissionPhase::Idle);
        assert_eq!(ctl.control(), SubmitControl::default());
        assert_eq!(notes.shown, [(MSG_SUCCESS.to_string(), Severity::Success)]);
        assert!(form.fields().all(|f| f.value().is_empty()));
        assert_eq!(ctl.last_attempt().unwrap().outcome, AttemptOutcome::Succeeded);
        assert_eq!(ctl.trace().event_types(), ["started", "succeeded"]);
    }

    #[test]
    fn failure_keeps_values_and_restores_control() {
        let rules = RuleTable::contact().unwrap();
        let validator = FieldValidator::new(&rules);
        let mut form = filled_form();
        let mut notes = Recorder::default();
        let mut ctl = SubmissionController::new(ScriptedTransport::failing_once(ms(50), "503"));

        ctl.submit(&mut form, &validator, &mut notes, ms(0)).unwrap();
        let resolved = ctl.poll(&mut form, &mut notes, ms(50)).unwrap();
        assert!(matches!(
            resolved,
            Some(Resolution::Failed(_, TransportError::Rejected(ref r))) if r == "503"
        ));
        assert_eq!(form.field("name").unwrap().value(), "Jane Doe");
        assert!(!ctl.control().is_disabled());
        assert_eq!(notes.shown, [(MSG_FAILURE.to_string(), Severity::Error)]);
    }

    #[test]
    fn control_restored_even_if_notification_fails() {
        let rules = RuleTable::contact().unwrap();
        let validator = FieldValidator::new(&rules);
        let mut form = filled_form();
        let mut notes = Recorder::default();
        let mut ctl = SubmissionController::new(SimulatedTransport::new(ms(10)));

        ctl.submit(&mut form, &validator, &mut notes, ms(0)).unwrap();
        notes.fail = true;
        let err = ctl.poll(&mut form, &mut notes, ms(10)).unwrap_err();
        assert_eq!(err, NotifyError::Closed);
        assert!(!ctl.control().is_loading());
        assert!(!ctl.control().is_disabled());
        assert_eq!(ctl.phase(), SubmissionPhase::Idle);
        assert_eq!(ctl.last_attempt().unwrap().outcome, AttemptOutcome::Succeeded);
    }

    #[test]
    fn submit_while_in_flight_is_ignored() {
        let rules = RuleTable::contact().unwrap();
        let validator = FieldValidator::new(&rules);
        let mut form = filled_form();
        let mut notes = Recorder::default();
        let mut ctl = SubmissionController::new(SimulatedTransport::default());

        ctl.submit(&mut form, &validator, &mut notes, ms(0)).unwrap();
        let again = ctl.submit(&mut form, &validator, &mut notes, ms(5)).unwrap();
        assert_eq!(again, SubmitOutcome::Ignored);
        assert_eq!(ctl.deadline(), Some(ms(2000)));
        assert_eq!(ctl.trace().event_types(), ["started", "ignored"]);
    }

    #[test]
    fn tokens_are_monotonic_across_attempts() {
        let rules = RuleTable::contact().unwrap();
        let validator = FieldValidator::new(&rules);
        let mut notes = Recorder::default();
        let mut ctl = SubmissionController::new(SimulatedTransport::new(ms(1)));

        let mut empty = Form::contact().unwrap();
        ctl.submit(&mut empty, &validator, &mut notes, ms(0)).unwrap();
        let first = ctl.last_attempt().unwrap().token;

        let mut form = filled_form();
        ctl.submit(&mut form, &validator, &mut notes, ms(1)).unwrap();
        let second = ctl.last_attempt().unwrap().token;
        assert!(second > first);
        assert_eq!(first.raw(), 1);
    }

    #[test]
    fn teardown_abandons_in_flight_delivery() {
        let rules = RuleTable::contact().unwrap();
        let validator = FieldValidator::new(&rules);
        let mut form = filled_form();
        let mut notes = Recorder::default();
        let mut ctl = SubmissionController::new(SimulatedTransport::default());

        ctl.submit(&mut form, &validator, &mut notes, ms(0)).unwrap();
        ctl.teardown(ms(100));
        assert!(!ctl.is_in_flight());
        assert_eq!(ctl.poll(&mut form, &mut notes, ms(5000)).unwrap(), None);
        assert!(notes.shown.is_empty());
        assert_eq!(ctl.trace().event_types(), ["started", "abandoned"]);
    }

    #[test]
    fn failed_start_is_traced_as_failure_only() {
        let rules = RuleTable::contact().unwrap();
        let validator = FieldValidator::new(&rules);
        let mut form = filled_form();
        let mut notes = Recorder::default();
        let mut busy = SimulatedTransport::default();
        busy.start(&FormPayload::default(), ms(0)).unwrap();
        let mut ctl = SubmissionController::new(busy);

        let outcome = ctl.submit(&mut form, &validator, &mut notes, ms(0)).unwrap();
        assert!(matches!(outcome, SubmitOutcome::Failed(_, TransportError::Busy)));
        assert_eq!(ctl.trace().event_types(), ["failed"]);
        assert!(!ctl.control().is_disabled());
        assert_eq!(form.field("name").unwrap().value(), "Jane Doe");
        assert_eq!(notes.shown, [(MSG_FAILURE.to_string(), Severity::Error)]);
    }

    #[test]
    fn trace_is_bounded() {
        let mut trace = SubmissionTrace::with_capacity(2);
        for i in 0..5 {
            trace.push(SubmissionEvent::Ignored { at: ms(i) });
        }
        assert_eq!(trace.len(), 2);
        assert_eq!(
            trace.iter().next(),
            Some(&SubmissionEvent::Ignored { at: ms(3) })
        );
    }
}
