//! Mobile menu open/close state.

/// State of the mobile menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MenuState {
    /// Menu hidden
    #[default]
    Closed,
    /// Menu shown
    Open,
}

impl MenuState {
    /// Value of the activator's `aria-expanded` attribute.
    #[inline]
    pub fn aria_expanded(&self) -> &'static str {
        match self {
            MenuState::Open => "true",
            MenuState::Closed => "false",
        }
    }
}

/// Toggle logic for the mobile menu.
///
/// ## Example
///
/// ```rust
/// use landing_fx::{MenuState, MenuToggle};
///
/// let mut menu = MenuToggle::new();
/// assert_eq!(menu.toggle(), MenuState::Open);
/// assert_eq!(menu.aria_expanded(), "true");
///
/// assert!(menu.handle_key("Escape"));
/// assert_eq!(menu.state(), MenuState::Closed);
/// assert_eq!(menu.aria_expanded(), "false");
/// ```
#[derive(Clone, Debug, Default)]
pub struct MenuToggle {
    state: MenuState,
}

impl MenuToggle {
    /// Key that closes an open menu.
    pub const CANCEL_KEY: &'static str = "Escape";

    /// Create a closed menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state.
    #[inline]
    pub fn state(&self) -> MenuState {
        self.state
    }

    /// Check if the menu is open.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.state == MenuState::Open
    }

    /// Value of the activator's `aria-expanded` attribute.
    #[inline]
    pub fn aria_expanded(&self) -> &'static str {
        self.state.aria_expanded()
    }

    /// Flip the menu and return the new state.
    pub fn toggle(&mut self) -> MenuState {
        self.state = match self.state {
            MenuState::Open => MenuState::Closed,
            MenuState::Closed => MenuState::Open,
        };
        self.state
    }

    /// Close the menu.
    ///
    /// Returns `true` if it was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        self.state = MenuState::Closed;
        was_open
    }

    /// Handle a key press.
    ///
    /// Returns `true` if the key closed the menu.
    pub fn handle_key(&mut self, key: &str) -> bool {
        key == Self::CANCEL_KEY && self.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut menu = MenuToggle::new();
        assert_eq!(menu.state(), MenuState::Closed);
        assert_eq!(menu.aria_expanded(), "false");

        assert_eq!(menu.toggle(), MenuState::Open);
        assert_eq!(menu.aria_expanded(), "true");
        assert_eq!(menu.toggle(), MenuState::Closed);
        assert_eq!(menu.aria_expanded(), "false");
    }

    #[test]
    fn test_escape_closes_open_menu() {
        let mut menu = MenuToggle::new();
        menu.toggle();
        assert!(menu.handle_key("Escape"));
        assert!(!menu.is_open());
    }

    #[test]
    fn test_escape_on_closed_menu_is_ignored() {
        let mut menu = MenuToggle::new();
        assert!(!menu.handle_key("Escape"));
        assert_eq!(menu.state(), MenuState::Closed);
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let mut menu = MenuToggle::new();
        menu.toggle();
        assert!(!menu.handle_key("Enter"));
        assert!(!menu.handle_key("escape"));
        assert!(menu.is_open());
    }

    #[test]
    fn test_close() {
        let mut menu = MenuToggle::new();
        assert!(!menu.close());
        menu.toggle();
        assert!(menu.close());
        assert_eq!(menu.aria_expanded(), "false");
    }
}
