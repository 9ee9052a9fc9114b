#![forbid(unsafe_code)]

//! Static description of the page's interactive elements.

use landing_forms::{FieldSpec, contact_fields};
use landing_widgets::reveal::DEFAULT_ELEMENTS;
use landing_widgets::ripple::DEFAULT_RIPPLE_BUTTONS;
use serde::{Deserialize, Serialize};

/// Which elements exist and how they are named.
///
/// Element names are CSS selectors the host resolves; see
/// [`crate::patch::selector`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    /// Id of the contact form.
    pub form_id: String,
    /// Class of the submit button inside the form.
    pub submit_button: String,
    /// Form controls in document order.
    pub fields: Vec<FieldSpec>,
    /// Nav link hrefs (`#<section id>`) in document order.
    pub nav_links: Vec<String>,
    /// Class of the nav element.
    pub nav: String,
    /// Class of the mobile menu button.
    pub menu_button: String,
    /// Classes of elements that fade in on scroll.
    pub reveal_elements: Vec<String>,
    /// Classes of buttons that carry the click ripple.
    pub ripple_buttons: Vec<String>,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::contact()
    }
}

impl PageLayout {
    /// The shipped landing page.
    #[must_use]
    pub fn contact() -> Self {
        Self {
            form_id: "contactForm".to_string(),
            submit_button: "submit-btn".to_string(),
            fields: contact_fields(),
            nav_links: ["#home", "#services", "#reviews", "#contact"]
                .into_iter()
                .map(String::from)
                .collect(),
            nav: "nav".to_string(),
            menu_button: "mobile-menu-btn".to_string(),
            reveal_elements: DEFAULT_ELEMENTS.into_iter().map(String::from).collect(),
            ripple_buttons: DEFAULT_RIPPLE_BUTTONS.into_iter().map(String::from).collect(),
        }
    }

    /// Whether `element` carries the ripple.
    #[must_use]
    pub fn has_ripple(&self, element: &str) -> bool {
        self.ripple_buttons.iter().any(|b| b == element)
    }

    /// Field spec by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_layout_names() {
        let layout = PageLayout::contact();
        assert_eq!(layout.fields.len(), 5);
        assert!(layout.field("serviceType").is_some_and(|f| f.required));
        assert!(layout.has_ripple("cta-btn"));
        assert!(!layout.has_ripple("nav-link"));
    }

    #[test]
    fn layout_round_trips_through_partial_json() {
        let layout: PageLayout = serde_json::from_str(r##"{"nav_links":["#a"]}"##).unwrap();
        assert_eq!(layout.nav_links, ["#a"]);
        assert_eq!(layout.form_id, "contactForm");
    }
}
