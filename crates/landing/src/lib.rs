#![forbid(unsafe_code)]

//! Landing page runtime public facade.
//!
//! Re-exports the types most hosts need from the internal crates and offers
//! a small prelude.
//!
//! ```
//! use landing::prelude::*;
//!
//! let mut page = PageProgram::contact(PageConfig::default())?;
//! page.push_event(PageEvent::Loaded);
//! let step = page.step()?;
//! assert!(step.open);
//! # Ok::<(), landing::PageError>(())
//! ```

// --- Core re-exports -------------------------------------------------------

pub use landing_core::clock::{Clock, DeterministicClock};
pub use landing_core::event::{ClickTarget, EventKind, PageEvent, SectionMeasure};
pub use landing_core::geometry::{ClientRect, VerticalSpan};
pub use landing_core::notify::{Notifier, NotifyError, Severity};

// --- Forms re-exports ------------------------------------------------------

pub use landing_forms::{
    FieldValidator, Form, FormError, FormPayload, RuleSpec, RuleTable, SubmissionController,
    SubmissionPhase, SubmissionTransport, TransportError,
};

// --- Widget re-exports -----------------------------------------------------

pub use landing_widgets::{
    MobileMenu, NavHighlighter, Notification, NotificationPresenter, RevealTracker, RippleEffects,
};

// --- Web re-exports --------------------------------------------------------

pub use landing_web::{
    DomPatch, HandlerRegistry, PageConfig, PageContext, PageError, PageLayout, PageOutputs,
    PageProgram, StepResult, TransportMode,
};

/// Standard result type for page APIs.
pub type Result<T> = std::result::Result<T, PageError>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ClickTarget, DomPatch, PageConfig, PageError, PageEvent, PageLayout, PageProgram,
        Result, Severity, TransportMode,
    };

    pub use crate::{core, forms, web, widgets};
}

pub use landing_core as core;
pub use landing_forms as forms;
pub use landing_web as web;
pub use landing_widgets as widgets;
