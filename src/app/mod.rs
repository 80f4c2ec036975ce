//! Application shell: session, history and the currently mounted screen
//!
//! The shown screen is the auth form whenever the session holds no token,
//! otherwise whatever the navigation controller maps the last popstate
//! path to. Switching screens mounts a fresh view, discarding the old
//! view's local state.

pub mod auth;
pub mod create_qr;
pub mod dashboard;
pub mod manage_qr;
pub mod sidebar;

pub use auth::{AuthMode, AuthView};
pub use create_qr::CreateQrView;
pub use dashboard::DashboardView;
pub use manage_qr::ManageQrView;
pub use sidebar::Sidebar;

use crate::client::ApiClient;
use crate::config::QrDefaults;
use crate::error::Result;
use crate::nav::{History, NavigationController, Route};
use crate::session::SessionStore;

/// Which screen should be visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Auth,
    Dashboard,
    CreateQr,
    ManageQr,
}

impl From<Route> for View {
    fn from(route: Route) -> Self {
        match route {
            Route::Dashboard => View::Dashboard,
            Route::CreateQr => View::CreateQr,
            Route::ManageQr => View::ManageQr,
        }
    }
}

/// A mounted screen with its local state
#[derive(Debug, Clone)]
pub enum Screen {
    Auth(AuthView),
    Dashboard(DashboardView),
    CreateQr(CreateQrView),
    ManageQr(ManageQrView),
}

impl Screen {
    pub fn view(&self) -> View {
        match self {
            Screen::Auth(_) => View::Auth,
            Screen::Dashboard(_) => View::Dashboard,
            Screen::CreateQr(_) => View::CreateQr,
            Screen::ManageQr(_) => View::ManageQr,
        }
    }
}

pub struct App {
    client: ApiClient,
    session: SessionStore,
    history: History,
    nav: NavigationController,
    qr_defaults: QrDefaults,
    screen: Option<Screen>,
    pub sidebar: Sidebar,
}

impl App {
    pub fn new(client: ApiClient, session: SessionStore, qr_defaults: QrDefaults) -> Self {
        Self::with_history(client, session, qr_defaults, History::default())
    }

    pub fn with_history(
        client: ApiClient,
        session: SessionStore,
        qr_defaults: QrDefaults,
        history: History,
    ) -> Self {
        let nav = NavigationController::new(&history);
        Self {
            client,
            session,
            history,
            nav,
            qr_defaults,
            screen: None,
            sidebar: Sidebar::default(),
        }
    }

    /// Which screen the current state calls for
    pub fn view(&mut self) -> View {
        if self.session.is_authenticated() {
            self.nav.current().into()
        } else {
            View::Auth
        }
    }

    /// Mount the screen for the current view if it is not already shown.
    /// Mounting the management screen fetches its list.
    pub async fn render(&mut self) -> &mut Screen {
        let view = self.view();
        let mounted = self.screen.as_ref().map(Screen::view);

        if mounted != Some(view) {
            tracing::debug!("Mounting {:?}", view);
            let screen = match view {
                View::Auth => Screen::Auth(AuthView::new()),
                View::Dashboard => Screen::Dashboard(DashboardView::new()),
                View::CreateQr => Screen::CreateQr(CreateQrView::new(&self.qr_defaults)),
                View::ManageQr => {
                    let mut manage = ManageQrView::new();
                    manage.load(&self.client, &self.session).await;
                    Screen::ManageQr(manage)
                }
            };
            self.screen = Some(screen);
        }

        self.screen.get_or_insert_with(|| Screen::Auth(AuthView::new()))
    }

    /// The mounted screen alongside the context its handlers need
    pub fn parts(&mut self) -> (Option<&mut Screen>, &ApiClient, &mut SessionStore) {
        (self.screen.as_mut(), &self.client, &mut self.session)
    }

    /// Submit the auth form if it is mounted. Returns true on success.
    pub async fn submit_auth(&mut self) -> bool {
        let ok = match self.screen.as_mut() {
            Some(Screen::Auth(auth)) => auth.submit(&self.client, &mut self.session).await,
            _ => false,
        };
        if ok {
            self.on_login_success();
        }
        ok
    }

    /// Land on the dashboard after authenticating
    pub fn on_login_success(&mut self) {
        self.history.push_state(Route::Dashboard.path());
        self.history.dispatch_popstate();
    }

    /// Forget the token and go back to the root path, unauthenticated
    pub fn logout(&mut self) -> Result<()> {
        let username = self.session.username().map(str::to_string);
        self.session.clear()?;
        self.sidebar.close();
        self.history.push_state(Route::Dashboard.path());
        self.history.dispatch_popstate();
        tracing::info!("Logged out {}", username.unwrap_or_default());
        Ok(())
    }

    /// Navigate through the sidebar
    pub fn navigate(&mut self, route: Route) {
        self.sidebar.navigate(&mut self.history, route);
    }

    pub fn back(&mut self) -> bool {
        self.history.back()
    }

    pub fn forward(&mut self) -> bool {
        self.history.forward()
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }
}
