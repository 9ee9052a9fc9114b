#![forbid(unsafe_code)]

//! Step-based page runner.
//!
//! [`PageProgram`] drives a [`PageContext`] without threads or blocking.
//! The host controls the loop:
//!
//! 1. Push events via [`PageProgram::push_event`].
//! 2. Advance time via [`PageProgram::advance_time`].
//! 3. Call [`PageProgram::step`] to process queued events and fire timers.
//! 4. Apply the patches from [`PageProgram::take_outputs`].
//!
//! # Example
//!
//! ```
//! use core::time::Duration;
//! use landing_core::event::PageEvent;
//! use landing_web::{PageConfig, PageProgram};
//!
//! let mut prog = PageProgram::contact(PageConfig::default()).unwrap();
//! prog.push_event(PageEvent::Loaded);
//! prog.push_event(PageEvent::Submit);
//! prog.step().unwrap();
//!
//! // Four required fields are empty: inline errors plus one notification.
//! let outputs = prog.take_outputs();
//! assert!(!outputs.patches.is_empty());
//!
//! prog.advance_time(Duration::from_millis(5000));
//! prog.step().unwrap();
//! assert_eq!(prog.context().notifications().visible_count(), 0);
//! ```

use core::time::Duration;
use std::collections::VecDeque;

use landing_core::clock::{Clock, DeterministicClock};
use landing_core::event::PageEvent;
use landing_core::{debug_span, warn};
use landing_forms::TransportError;

use crate::config::PageConfig;
use crate::context::PageContext;
use crate::error::PageError;
use crate::layout::PageLayout;
use crate::patch::DomPatch;

/// Result of a single [`PageProgram::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the page is still open (false after teardown).
    pub open: bool,
    /// Number of events taken from the queue.
    pub events_processed: u32,
    /// Number of patches emitted during this step.
    pub patches_emitted: usize,
}

/// Captured output, drained by the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageOutputs {
    /// Patches to apply, in order.
    pub patches: Vec<DomPatch>,
    /// Handler errors, rendered for the host's console.
    pub errors: Vec<String>,
}

impl PageOutputs {
    /// Whether nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty() && self.errors.is_empty()
    }
}

/// Host-driven page runner.
#[derive(Debug)]
pub struct PageProgram {
    context: PageContext,
    clock: DeterministicClock,
    queue: VecDeque<PageEvent>,
    outputs: PageOutputs,
}

impl PageProgram {
    /// Create a runner for `layout`.
    pub fn new(config: PageConfig, layout: PageLayout) -> Result<Self, PageError> {
        Ok(Self::with_context(PageContext::new(config, layout)?))
    }

    /// Create a runner for the shipped page.
    pub fn contact(config: PageConfig) -> Result<Self, PageError> {
        Self::new(config, PageLayout::contact())
    }

    /// Wrap an existing context.
    #[must_use]
    pub fn with_context(context: PageContext) -> Self {
        Self {
            context,
            clock: DeterministicClock::new(),
            queue: VecDeque::new(),
            outputs: PageOutputs::default(),
        }
    }

    /// Process every queued event, then fire due timers.
    ///
    /// Every event in the batch is handled even if one fails. Failures are
    /// recorded in [`PageOutputs::errors`] and the first is returned after
    /// the batch; patches emitted up to and after it are kept.
    pub fn step(&mut self) -> Result<StepResult, PageError> {
        let now = self.clock.now_mono();
        let span = debug_span!(
            "page_step",
            now_ms = now.as_millis() as u64,
            queued = self.queue.len()
        );
        let _guard = span.enter();
        let before = self.outputs.patches.len();
        let mut first_error = None;

        let mut events_processed: u32 = 0;
        while let Some(event) = self.queue.pop_front() {
            events_processed += 1;
            let result = self.context.dispatch(event, now, &mut self.outputs.patches);
            if let Err(err) = result {
                self.record(err, &mut first_error);
            }
        }

        if let Err(err) = self.context.fire_timers(now, &mut self.outputs.patches) {
            self.record(err, &mut first_error);
        }

        if let Some(err) = first_error {
            return Err(err);
        }
        Ok(StepResult {
            open: !self.context.is_closed(),
            events_processed,
            patches_emitted: self.outputs.patches.len() - before,
        })
    }

    /// Queue an event for the next [`step`](Self::step).
    pub fn push_event(&mut self, event: PageEvent) {
        self.queue.push_back(event);
    }

    /// Decode and queue a JSON event.
    pub fn push_event_json(&mut self, json: &str) -> Result<(), PageError> {
        let event = PageEvent::from_json_str(json).map_err(PageError::Event)?;
        self.push_event(event);
        Ok(())
    }

    /// Advance the deterministic clock by `dt`.
    pub fn advance_time(&mut self, dt: Duration) {
        self.clock.advance(dt);
    }

    /// Set the deterministic clock to an absolute time (never backwards).
    pub fn set_time(&mut self, now: Duration) {
        self.clock.set(now);
    }

    /// Current page time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.now_mono()
    }

    /// Earliest time a timer is due; the host should step no later.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.context.deadline()
    }

    /// Take the captured outputs, leaving empty defaults.
    pub fn take_outputs(&mut self) -> PageOutputs {
        std::mem::take(&mut self.outputs)
    }

    /// Read the captured outputs without consuming them.
    #[must_use]
    pub fn outputs(&self) -> &PageOutputs {
        &self.outputs
    }

    /// JSON payload of a host-delivered submission, once started.
    pub fn take_submission(&mut self) -> Option<String> {
        self.context.transport_mut().take_outbox()
    }

    /// Report the outcome of a host-delivered submission. It takes effect
    /// on the next [`step`](Self::step).
    pub fn resolve_submission(&mut self, ok: bool, reason: Option<String>) -> bool {
        let outcome = if ok {
            Ok(())
        } else {
            Err(TransportError::Rejected(
                reason.unwrap_or_else(|| "delivery failed".to_string()),
            ))
        };
        self.context.transport_mut().resolve(outcome)
    }

    /// Tear the page down immediately.
    pub fn teardown(&mut self) {
        self.queue.clear();
        let now = self.clock.now_mono();
        self.context.teardown(now);
    }

    /// Access the page context.
    #[must_use]
    pub fn context(&self) -> &PageContext {
        &self.context
    }

    /// Mutably access the page context.
    pub fn context_mut(&mut self) -> &mut PageContext {
        &mut self.context
    }

    /// Whether the page is still open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.context.is_closed()
    }

    fn record(&mut self, err: PageError, first: &mut Option<PageError>) {
        warn!(error = %err, "page handler failed");
        self.outputs.errors.push(err.to_string());
        if first.is_none() {
            *first = Some(err);
        }
    }
}
