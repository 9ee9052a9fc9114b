#![forbid(unsafe_code)]

use core::time::Duration;

use wasm_bindgen::prelude::*;

use crate::config::PageConfig;
use crate::error::PageError;
use crate::patch::patches_to_json;
use crate::program::PageProgram;

fn to_js(err: PageError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn millis(ms: f64) -> Duration {
    Duration::from_secs_f64(ms.max(0.0) / 1000.0)
}

/// JS-facing landing page.
///
/// The host attaches a listener for every entry of [`bindings`](Self::bindings),
/// forwards events as JSON, steps the page and applies the returned patches.
#[wasm_bindgen]
pub struct LandingPage {
    program: PageProgram,
}

#[wasm_bindgen]
impl LandingPage {
    /// Build the page from an optional JSON configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<LandingPage, JsValue> {
        let config = match config_json {
            Some(json) => PageConfig::from_json_str(&json).map_err(to_js)?,
            None => PageConfig::default(),
        };
        let program = PageProgram::contact(config).map_err(to_js)?;
        Ok(Self { program })
    }

    /// Listeners to attach, as a JSON array of `{target, kind}`.
    pub fn bindings(&self) -> Result<String, JsValue> {
        let bindings: Vec<_> = self.program.context().registry().bindings().collect();
        serde_json::to_string(&bindings).map_err(|e| to_js(PageError::Encode(e)))
    }

    /// Queue one JSON-encoded page event.
    #[wasm_bindgen(js_name = pushEvent)]
    pub fn push_event(&mut self, event_json: &str) -> Result<(), JsValue> {
        self.program.push_event_json(event_json).map_err(to_js)
    }

    /// Advance page time by `dt_ms` milliseconds.
    #[wasm_bindgen(js_name = advanceTime)]
    pub fn advance_time(&mut self, dt_ms: f64) {
        self.program.advance_time(millis(dt_ms));
    }

    /// Set page time to `now_ms` milliseconds since load.
    #[wasm_bindgen(js_name = setTime)]
    pub fn set_time(&mut self, now_ms: f64) {
        self.program.set_time(millis(now_ms));
    }

    /// Process queued events and due timers. Returns whether the page is open.
    pub fn step(&mut self) -> Result<bool, JsValue> {
        self.program.step().map(|r| r.open).map_err(to_js)
    }

    /// Drain pending patches as a JSON array.
    #[wasm_bindgen(js_name = takePatches)]
    pub fn take_patches(&mut self) -> Result<String, JsValue> {
        let outputs = self.program.take_outputs();
        patches_to_json(&outputs.patches).map_err(to_js)
    }

    /// JSON payload to deliver, once a host-driven submission starts.
    #[wasm_bindgen(js_name = takeSubmission)]
    pub fn take_submission(&mut self) -> Option<String> {
        self.program.take_submission()
    }

    /// Report the delivery outcome of the last submission.
    #[wasm_bindgen(js_name = resolveSubmission)]
    pub fn resolve_submission(&mut self, ok: bool, reason: Option<String>) -> bool {
        self.program.resolve_submission(ok, reason)
    }

    /// Milliseconds at which the next timer is due, if any.
    #[wasm_bindgen(js_name = nextDeadline)]
    pub fn next_deadline(&self) -> Option<f64> {
        self.program
            .next_deadline()
            .map(|d| d.as_secs_f64() * 1000.0)
    }

    /// Explicit teardown for JS callers.
    pub fn destroy(&mut self) {
        self.program.teardown();
    }
}
