#![forbid(unsafe_code)]

//! Host-driven runtime for the landing page.
//!
//! The page owns no DOM handles and no timers. A host (the browser glue, or a
//! test) pushes [`PageEvent`](landing_core::event::PageEvent)s, advances a
//! deterministic clock, and applies the [`DomPatch`]es that come back:
//!
//! - [`PageProgram`]: step runner over the event queue and clock.
//! - [`PageContext`]: page state and event handlers.
//! - [`HandlerRegistry`]: the explicit `(target, kind)` listener table.
//! - [`PageConfig`] / [`PageLayout`]: tunables and element naming.
//!
//! On `wasm32` the crate also exports a `wasm-bindgen` class, `LandingPage`,
//! wrapping [`PageProgram`] with a JSON surface.

pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod layout;
pub mod patch;
pub mod program;
pub mod transport;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use config::{PageConfig, TransportMode};
pub use context::PageContext;
pub use error::PageError;
pub use handlers::{Binding, Handler, HandlerRegistry};
pub use layout::PageLayout;
pub use patch::{DomPatch, patches_to_json, selector};
pub use program::{PageOutputs, PageProgram, StepResult};
pub use transport::WebTransport;

#[cfg(target_arch = "wasm32")]
pub use wasm::LandingPage;

/// Native builds compile the JS class as a thin wrapper so the workspace
/// checks on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct LandingPage {
    program: PageProgram,
}

#[cfg(not(target_arch = "wasm32"))]
impl LandingPage {
    /// Build the page with the default configuration.
    pub fn new() -> Result<Self, PageError> {
        Ok(Self {
            program: PageProgram::contact(PageConfig::default())?,
        })
    }

    /// The wrapped runner.
    pub fn program_mut(&mut self) -> &mut PageProgram {
        &mut self.program
    }
}
