#![forbid(unsafe_code)]

//! Mobile menu toggle.

/// Class on the nav element while the menu is open.
pub const NAV_OPEN_CLASS: &str = "mobile-open";
/// Class on the menu button while the menu is open.
pub const BUTTON_ACTIVE_CLASS: &str = "active";

/// Open/closed state of the mobile menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    /// A closed menu.
    #[must_use]
    pub const fn new() -> Self {
        Self { open: false }
    }

    /// Whether the menu is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Flip the menu. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Close the menu (any nav link click). Returns whether it was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips() {
        let mut menu = MobileMenu::new();
        assert!(menu.toggle());
        assert!(menu.is_open());
        assert!(!menu.toggle());
    }

    #[test]
    fn close_reports_prior_state() {
        let mut menu = MobileMenu::new();
        assert!(!menu.close());
        menu.toggle();
        assert!(menu.close());
        assert!(!menu.is_open());
    }
}
