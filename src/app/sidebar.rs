//! Sidebar menu

use crate::nav::{History, Route};

#[derive(Debug, Clone, Copy, Default)]
pub struct Sidebar {
    pub open: bool,
}

impl Sidebar {
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Push `route` and manufacture the popstate that the navigation
    /// controller listens for, then close the menu.
    pub fn navigate(&mut self, history: &mut History, route: Route) {
        history.push_state(route.path());
        history.dispatch_popstate();
        self.close();
    }
}

/// Name shown in the sidebar header
pub fn display_name(username: Option<&str>) -> &str {
    match username {
        Some(name) if !name.is_empty() => name,
        _ => "User",
    }
}

/// Avatar letter: first character uppercased, `U` without a name
pub fn avatar_initial(username: Option<&str>) -> char {
    username
        .and_then(|name| name.chars().next())
        .and_then(|c| c.to_uppercase().next())
        .unwrap_or('U')
}
