//! Dashboard: the hello / time / echo probes

use crate::client::ApiClient;
use crate::session::SessionStore;

#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    pub hello_response: Option<String>,
    pub time_response: Option<String>,
    pub echo_input: String,
    pub echo_number: i64,
    pub echo_response: Option<String>,
    pub error: Option<String>,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn fetch_hello(&mut self, client: &ApiClient, session: &SessionStore) {
        self.error = None;
        match client.hello(session).await {
            Ok(message) => self.hello_response = Some(message),
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    pub async fn fetch_time(&mut self, client: &ApiClient, session: &SessionStore) {
        self.error = None;
        match client.time(session).await {
            Ok(time) => self.time_response = Some(time),
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Send `echo_input` / `echo_number` and show "message (number)"
    pub async fn post_echo(&mut self, client: &ApiClient, session: &SessionStore) {
        self.error = None;
        match client.echo(session, &self.echo_input, self.echo_number).await {
            Ok(echo) => self.echo_response = Some(echo.to_string()),
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}
