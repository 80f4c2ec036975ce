//! Typed HTTP client for the QR service API
//!
//! Every call is an independent request with no retry, deduplication or
//! cancellation. Any non-success status is a failure regardless of the code;
//! the error keeps only a human-readable message.

use reqwest::{RequestBuilder, Response};
use std::time::Duration;

use crate::api::models::{
    EchoRequest, EchoResponse, ErrorDetail, HelloResponse, LoginForm, SignupRequest,
    TimeResponse, TokenResponse,
};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::qr::{QrCodeResponse, QrImage, QrRecord, QrRequest};
use crate::session::{Session, SessionStore};

/// Client for the `/api` surface
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    /// Create a client for `base`, e.g. `http://localhost:8000/api`
    pub fn new(base: impl Into<String>) -> Result<Self> {
        Self::build(base.into(), None)
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::build(
            config.api_base.clone(),
            config.timeout_secs.map(Duration::from_secs),
        )
    }

    fn build(base: String, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Attach the bearer token when the session holds one
    fn authorized(&self, request: RequestBuilder, session: &SessionStore) -> RequestBuilder {
        match session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Log in with form-encoded credentials and store the returned token
    pub async fn login(
        &self,
        session: &mut SessionStore,
        username: &str,
        password: &str,
    ) -> Result<Session> {
        tracing::debug!("POST /login as {}", username);
        let form = LoginForm {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self.http.post(self.url("/login")).form(&form).send().await?;
        let token: TokenResponse = ensure_success_with_detail(response, "Authentication failed")
            .await?
            .json()
            .await?;

        store_token(session, username, token)
    }

    /// Create an account and store the returned token
    pub async fn signup(
        &self,
        session: &mut SessionStore,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Session> {
        tracing::debug!("POST /signup as {}", username);
        let body = SignupRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.http.post(self.url("/signup")).json(&body).send().await?;
        let token: TokenResponse = ensure_success_with_detail(response, "Authentication failed")
            .await?
            .json()
            .await?;

        store_token(session, username, token)
    }

    pub async fn hello(&self, session: &SessionStore) -> Result<String> {
        tracing::debug!("GET /hello");
        let request = self.authorized(self.http.get(self.url("/hello")), session);
        let body: HelloResponse = ensure_success(request.send().await?, "Unable to fetch hello")?
            .json()
            .await?;
        Ok(body.message)
    }

    pub async fn time(&self, session: &SessionStore) -> Result<String> {
        tracing::debug!("GET /time");
        let request = self.authorized(self.http.get(self.url("/time")), session);
        let body: TimeResponse = ensure_success(request.send().await?, "Unable to fetch time")?
            .json()
            .await?;
        Ok(body.time)
    }

    pub async fn echo(&self, session: &SessionStore, text: &str, number: i64) -> Result<EchoResponse> {
        tracing::debug!("POST /echo");
        let body = EchoRequest {
            text: text.to_string(),
            number,
        };
        let request = self.authorized(self.http.post(self.url("/echo")).json(&body), session);
        let echo = ensure_success(request.send().await?, "Unable to post echo")?
            .json()
            .await?;
        Ok(echo)
    }

    /// Render a QR code without saving it
    pub async fn create_qr(&self, session: &SessionStore, qr: &QrRequest) -> Result<QrImage> {
        self.post_qr(session, "/qr/create", qr, "Failed to generate QR code")
            .await
    }

    /// Render and save a QR code for the current user
    pub async fn save_qr(&self, session: &SessionStore, qr: &QrRequest) -> Result<QrImage> {
        self.post_qr(session, "/qr/save", qr, "Failed to save QR code").await
    }

    async fn post_qr(
        &self,
        session: &SessionStore,
        path: &str,
        qr: &QrRequest,
        failure: &str,
    ) -> Result<QrImage> {
        tracing::debug!(
            "POST {} url={} dot={} eye={}",
            path,
            qr.url,
            qr.dot_style,
            qr.eye_style
        );
        let request = self.authorized(self.http.post(self.url(path)).json(qr), session);
        let body: QrCodeResponse = ensure_success(request.send().await?, failure)?
            .json()
            .await?;
        Ok(QrImage::from_payload(&body.qr_code))
    }

    /// All QR codes saved by the current user
    pub async fn list_qr(&self, session: &SessionStore) -> Result<Vec<QrRecord>> {
        tracing::debug!("GET /qr");
        let request = self.authorized(self.http.get(self.url("/qr")), session);
        let records = ensure_success(request.send().await?, "Failed to fetch QR codes")?
            .json()
            .await?;
        Ok(records)
    }

    pub async fn delete_qr(&self, session: &SessionStore, id: i64) -> Result<()> {
        tracing::debug!("DELETE /qr/{}", id);
        let request = self.authorized(self.http.delete(self.url(&format!("/qr/{}", id))), session);
        ensure_success(request.send().await?, "Failed to delete QR code")?;
        Ok(())
    }
}

fn store_token(session: &mut SessionStore, username: &str, token: TokenResponse) -> Result<Session> {
    let new_session = Session {
        token: token.access_token,
        username: username.to_string(),
    };
    session.set(new_session.clone())?;
    Ok(new_session)
}

/// Fail with a fixed message on any non-success status
fn ensure_success(response: Response, failure: &str) -> Result<Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        tracing::debug!("{} -> {}", response.url(), response.status());
        Err(Error::Api(failure.to_string()))
    }
}

/// Fail with the server's `detail` when it sends one, else `fallback`
async fn ensure_success_with_detail(response: Response, fallback: &str) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    tracing::debug!("{} -> {}", response.url(), response.status());
    let message = response
        .json::<ErrorDetail>()
        .await
        .map(|body| body.detail)
        .unwrap_or_else(|_| fallback.to_string());
    Err(Error::Api(message))
}
