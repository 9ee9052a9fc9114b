#![forbid(unsafe_code)]

//! Fade-in on scroll.
//!
//! Designated elements start hidden (`fade-in`) and gain `visible` the first
//! time the host reports them intersecting the viewport at or above the
//! threshold. The bottom root margin is applied by the host's observer; it
//! is carried here so the host can be told what to use.

/// Class added to every designated element at init.
pub const FADE_IN_CLASS: &str = "fade-in";
/// Class added once an element has been seen.
pub const VISIBLE_CLASS: &str = "visible";

/// Default intersection ratio that counts as seen.
pub const DEFAULT_THRESHOLD: f64 = 0.1;
/// Default bottom root margin, in CSS pixels.
pub const DEFAULT_ROOT_MARGIN_BOTTOM: f64 = -50.0;

/// Elements animated on the shipped page.
pub const DEFAULT_ELEMENTS: [&str; 3] =
    ["services-content", "review-badges", "contact-form-wrapper"];

/// Observer options the host should use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    /// Minimum intersection ratio.
    pub threshold: f64,
    /// Bottom root margin in pixels.
    pub root_margin_bottom: f64,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            root_margin_bottom: DEFAULT_ROOT_MARGIN_BOTTOM,
        }
    }
}

impl RevealOptions {
    /// CSS `rootMargin` string for an `IntersectionObserver`.
    #[must_use]
    pub fn root_margin(&self) -> String {
        format!("0px 0px {}px 0px", self.root_margin_bottom)
    }
}

#[derive(Debug, Clone)]
struct Tracked {
    id: String,
    revealed: bool,
}

/// Tracks which designated elements have been revealed.
#[derive(Debug, Clone)]
pub struct RevealTracker {
    options: RevealOptions,
    elements: Vec<Tracked>,
}

impl RevealTracker {
    /// Track `elements` with `options`.
    #[must_use]
    pub fn new(
        elements: impl IntoIterator<Item = impl Into<String>>,
        options: RevealOptions,
    ) -> Self {
        Self {
            options,
            elements: elements
                .into_iter()
                .map(|id| Tracked {
                    id: id.into(),
                    revealed: false,
                })
                .collect(),
        }
    }

    /// Observer options.
    #[must_use]
    pub fn options(&self) -> RevealOptions {
        self.options
    }

    /// Element ids, in document order.
    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(|e| e.id.as_str())
    }

    /// Whether `id` has been revealed.
    #[must_use]
    pub fn is_revealed(&self, id: &str) -> bool {
        self.elements.iter().any(|e| e.id == id && e.revealed)
    }

    /// Handle an intersection report. Returns `true` the first time `id`
    /// becomes visible; unknown ids and repeat reports return `false`.
    pub fn observe(&mut self, id: &str, ratio: f64, is_intersecting: bool) -> bool {
        let threshold = self.options.threshold;
        match self.elements.iter_mut().find(|e| e.id == id) {
            Some(element) if !element.revealed && is_intersecting && ratio >= threshold => {
                element.revealed = true;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> RevealTracker {
        RevealTracker::new(DEFAULT_ELEMENTS, RevealOptions::default())
    }

    #[test]
    fn reveals_once_at_threshold() {
        let mut t = tracker();
        assert!(!t.observe("review-badges", 0.05, true));
        assert!(t.observe("review-badges", 0.1, true));
        assert!(t.is_revealed("review-badges"));
        assert!(!t.observe("review-badges", 1.0, true));
    }

    #[test]
    fn never_hidden_again() {
        let mut t = tracker();
        t.observe("services-content", 0.5, true);
        assert!(!t.observe("services-content", 0.0, false));
        assert!(t.is_revealed("services-content"));
    }

    #[test]
    fn requires_intersecting_flag() {
        let mut t = tracker();
        assert!(!t.observe("contact-form-wrapper", 0.5, false));
    }

    #[test]
    fn unknown_element_ignored() {
        let mut t = tracker();
        assert!(!t.observe("footer", 1.0, true));
    }

    #[test]
    fn root_margin_string() {
        assert_eq!(RevealOptions::default().root_margin(), "0px 0px -50px 0px");
    }
}
