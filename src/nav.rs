//! Path-based navigation
//!
//! [`History`] is a minimal session history with back/forward. Only
//! back/forward (and an explicitly dispatched popstate) notify listeners;
//! `push_state` on its own does not. The [`NavigationController`] maps the
//! path seen at the last popstate to one of three views.

use std::fmt;
use tokio::sync::watch;

/// The authenticated views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Dashboard,
    CreateQr,
    ManageQr,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Dashboard, Route::CreateQr, Route::ManageQr];

    /// Exact literal match; anything unknown lands on the dashboard
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        match path {
            "/create-qr" => Route::CreateQr,
            "/manage-qr" => Route::ManageQr,
            _ => Route::Dashboard,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::CreateQr => "/create-qr",
            Route::ManageQr => "/manage-qr",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::CreateQr => "Create QR",
            Route::ManageQr => "Manage QR",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Session history with popstate notification
#[derive(Debug)]
pub struct History {
    entries: Vec<String>,
    index: usize,
    popstate: watch::Sender<String>,
}

impl History {
    pub fn new(initial: impl Into<String>) -> Self {
        let initial = initial.into();
        let (popstate, _) = watch::channel(initial.clone());
        Self {
            entries: vec![initial],
            index: 0,
            popstate,
        }
    }

    /// Current path
    pub fn location(&self) -> &str {
        &self.entries[self.index]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add an entry after the current one, dropping any forward entries.
    /// Listeners are not notified.
    pub fn push_state(&mut self, path: impl Into<String>) {
        self.entries.truncate(self.index + 1);
        self.entries.push(path.into());
        self.index = self.entries.len() - 1;
    }

    /// Step back one entry and emit popstate. Returns false at the start.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.dispatch_popstate();
        true
    }

    /// Step forward one entry and emit popstate. Returns false at the end.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        self.dispatch_popstate();
        true
    }

    /// Notify listeners of the current location
    pub fn dispatch_popstate(&self) {
        tracing::debug!("popstate {}", self.location());
        self.popstate.send_replace(self.location().to_string());
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.popstate.subscribe()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new("/")
    }
}

/// Tracks which view is shown, following popstate events only
#[derive(Debug)]
pub struct NavigationController {
    popstate: watch::Receiver<String>,
    route: Route,
    path: String,
}

impl NavigationController {
    /// Attach to `history`, starting from its current location
    pub fn new(history: &History) -> Self {
        let popstate = history.subscribe();
        let path = history.location().to_string();
        Self {
            popstate,
            route: Route::from_path(&path),
            path,
        }
    }

    /// Apply a pending popstate, if any. Returns true when one was applied.
    pub fn sync(&mut self) -> bool {
        if !self.popstate.has_changed().unwrap_or(false) {
            return false;
        }
        let path = self.popstate.borrow_and_update().clone();
        self.route = Route::from_path(&path);
        self.path = path;
        true
    }

    /// Current route after applying pending popstate events
    pub fn current(&mut self) -> Route {
        self.sync();
        self.route
    }

    /// Path seen at the last applied popstate
    pub fn path(&self) -> &str {
        &self.path
    }
}
