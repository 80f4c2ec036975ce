//! HTTP API server

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::JwtKeys;
use crate::config::Config;
use crate::error::Result;
use crate::qr::RenderOptions;

use super::routes;
use super::store::Store;

/// Application state shared across handlers
pub struct AppState {
    pub keys: JwtKeys,
    pub render: RenderOptions,
    pub password_cost: u32,
    pub store: RwLock<Store>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let store = match &config.server.data_file {
            Some(path) => Store::open(path)?,
            None => Store::in_memory(),
        };

        Ok(Self {
            keys: JwtKeys::from_config(
                config.server.jwt_secret.as_deref(),
                config.server.token_ttl_minutes,
            ),
            render: config.qr.render,
            password_cost: config.server.password_cost,
            store: RwLock::new(store),
        })
    }
}

/// Run the HTTP API server
pub async fn run_server(config: Config, host: &str, port: u16) -> Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;
    serve(listener, config).await
}

/// Serve on an already bound listener
pub async fn serve(listener: TcpListener, config: Config) -> Result<()> {
    let state = Arc::new(AppState::new(&config)?);
    let app = create_router(state);

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        // Auth
        .route("/api/login", post(routes::login))
        .route("/api/signup", post(routes::signup))
        // Probes
        .route("/api/hello", get(routes::hello))
        .route("/api/time", get(routes::time))
        .route("/api/echo", post(routes::echo))
        // QR codes
        .route("/api/qr", get(routes::list_qr))
        .route("/api/qr/create", post(routes::create_qr))
        .route("/api/qr/save", post(routes::save_qr))
        .route("/api/qr/{id}", delete(routes::delete_qr))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
