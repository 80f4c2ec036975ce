//! Shared helpers: in-process servers on ephemeral ports

#![allow(dead_code)]

use axum::Router;
use qrdash::api::serve;
use qrdash::config::Config;
use qrdash::{ApiClient, SessionStore};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub struct TestServer {
    /// Base URL including the `/api` prefix
    pub api_base: String,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.api_base).expect("Failed to build client")
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Fixed secret, minimum bcrypt cost and small modules
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.server.jwt_secret = Some("test-secret".to_string());
    config.server.password_cost = 4;
    config.qr.render.module_size = 4;
    config.qr.render.border = 2;
    config
}

async fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");
    (listener, format!("http://{}/api", addr))
}

/// Start a server with `config`. The listener is bound before this returns,
/// so requests can be sent right away.
pub async fn start_server_with(config: Config) -> TestServer {
    let (listener, api_base) = bind().await;
    let handle = tokio::spawn(async move {
        if let Err(e) = serve(listener, config).await {
            eprintln!("test server stopped: {}", e);
        }
    });

    TestServer { api_base, handle }
}

/// Serve an arbitrary router in place of the reference server
pub async fn start_stub(router: Router) -> TestServer {
    let (listener, api_base) = bind().await;
    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            eprintln!("stub server stopped: {}", e);
        }
    });

    TestServer { api_base, handle }
}

pub async fn start_server() -> TestServer {
    start_server_with(test_config()).await
}

/// Sign up `username` and return the session holding its token
pub async fn signed_up(server: &TestServer, username: &str) -> SessionStore {
    let mut session = SessionStore::in_memory();
    server
        .client()
        .signup(&mut session, username, &format!("{}@example.com", username), "password1")
        .await
        .expect("Signup failed");
    session
}
