//! Login / signup form

use crate::client::ApiClient;
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

/// Form state of the auth screen
#[derive(Debug, Clone, Default)]
pub struct AuthView {
    pub mode: AuthMode,
    pub username: String,
    pub email: String,
    pub password: String,
    pub error: Option<String>,
}

impl AuthView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        };
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => "Welcome Back",
            AuthMode::Signup => "Create Account",
        }
    }

    pub fn toggle_label(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => "Need an account? Sign Up",
            AuthMode::Signup => "Already have an account? Login",
        }
    }

    /// Submit the form. On success the token is stored in `session`, the
    /// fields are cleared and true is returned.
    pub async fn submit(&mut self, client: &ApiClient, session: &mut SessionStore) -> bool {
        self.error = None;

        let result = match self.mode {
            AuthMode::Login => client.login(session, &self.username, &self.password).await,
            AuthMode::Signup => {
                client
                    .signup(session, &self.username, &self.email, &self.password)
                    .await
            }
        };

        match result {
            Ok(logged_in) => {
                tracing::info!("Logged in as {}", logged_in.username);
                self.username.clear();
                self.email.clear();
                self.password.clear();
                true
            }
            Err(e) => {
                self.error = Some(e.to_string());
                false
            }
        }
    }
}
