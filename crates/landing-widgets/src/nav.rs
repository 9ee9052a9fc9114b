#![forbid(unsafe_code)]

//! Scroll-driven navigation highlighting.
//!
//! The reference point is the scroll offset plus a fixed offset from the top
//! of the viewport. Sections are scanned in document order and every section
//! containing the point re-assigns the active link, so the last match wins.
//! A matching section without a link leaves no link active. When nothing
//! matches, the active link is left as it was.

use landing_core::event::SectionMeasure;

/// Default distance from the viewport top to the reference point.
pub const DEFAULT_SCROLL_OFFSET: f64 = 100.0;

/// Class marking the active link.
pub const ACTIVE_CLASS: &str = "active";

/// Active link before and after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveChange {
    /// Previously active link href.
    pub previous: Option<String>,
    /// Newly active link href.
    pub current: Option<String>,
}

/// Result of a link click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkActivation {
    /// Element id to smooth-scroll to; the host skips it when no such
    /// element exists. `None` for links that are not `#fragment`s.
    pub scroll_to: Option<String>,
    /// Active link change, if the link was not already active.
    pub change: Option<ActiveChange>,
}

/// Tracks which navigation link is active.
#[derive(Debug, Clone)]
pub struct NavHighlighter {
    links: Vec<String>,
    sections: Vec<SectionMeasure>,
    offset: f64,
    active: Option<String>,
}

impl NavHighlighter {
    /// A highlighter over links identified by `href` (`#<section id>`).
    #[must_use]
    pub fn new(links: Vec<String>) -> Self {
        Self {
            links,
            sections: Vec::new(),
            offset: DEFAULT_SCROLL_OFFSET,
            active: None,
        }
    }

    /// Use a different reference offset.
    #[must_use]
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Replace the measured section bounds.
    pub fn set_sections(&mut self, sections: Vec<SectionMeasure>) {
        self.sections = sections;
    }

    /// Link hrefs in document order.
    #[must_use]
    pub fn links(&self) -> &[String] {
        &self.links
    }

    /// Href of the active link.
    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Whether `href` names a known link.
    #[must_use]
    pub fn has_link(&self, href: &str) -> bool {
        self.links.iter().any(|l| l == href)
    }

    /// Recompute the active link for a scroll position.
    ///
    /// Returns the change, or `None` when the active link stays the same.
    pub fn on_scroll(&mut self, scroll_y: f64) -> Option<ActiveChange> {
        let point = scroll_y + self.offset;
        let matched = self
            .sections
            .iter()
            .rev()
            .find(|s| s.span.contains(point))?;
        let href = format!("#{}", matched.id);
        let next = self.has_link(&href).then_some(href);
        self.set_active(next)
    }

    /// Handle a click on the link `href`.
    pub fn activate(&mut self, href: &str) -> LinkActivation {
        let scroll_to = href
            .strip_prefix('#')
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        let next = self.has_link(href).then(|| href.to_string());
        LinkActivation {
            scroll_to,
            change: self.set_active(next),
        }
    }

    fn set_active(&mut self, next: Option<String>) -> Option<ActiveChange> {
        if self.active == next {
            return None;
        }
        let previous = std::mem::replace(&mut self.active, next);
        Some(ActiveChange {
            previous,
            current: self.active.clone(),
        })
    }
}
