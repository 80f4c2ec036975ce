//! API route handlers

use axum::{extract::State, http::StatusCode, Json};

use super::error::ApiError;
use super::extract::{ApiForm, ApiJson, ApiPath};
use super::models::{
    EchoRequest, EchoResponse, ErrorDetail, HealthResponse, HelloResponse, LoginForm,
    SignupRequest, TimeResponse, TokenResponse,
};
use super::server::SharedState;
use crate::auth::{AuthUser, User};
use crate::qr::{self, QrCodeResponse, QrImage, QrRecord, QrRequest};

type ApiResult<T> = Result<T, ApiError>;

// Health check

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

// Auth routes

pub async fn login(
    State(state): State<SharedState>,
    ApiForm(form): ApiForm<LoginForm>,
) -> ApiResult<Json<TokenResponse>> {
    let user = state.store.read().await.find_user(&form.username).cloned();

    let verified = match user {
        Some(user) => {
            let password = form.password;
            tokio::task::spawn_blocking(move || user.verify_password(&password).then_some(user))
                .await
                .map_err(|e| crate::error::Error::Other(e.to_string()))?
        }
        None => None,
    };

    let user = verified.ok_or_else(|| {
        tracing::warn!("Failed login for {}", form.username);
        ApiError::unauthorized("Incorrect username or password")
    })?;

    let token = state.keys.create_token(&user)?;
    tracing::info!("User {} logged in", user.username);
    Ok(Json(TokenResponse::bearer(token)))
}

pub async fn signup(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> ApiResult<(StatusCode, Json<TokenResponse>)> {
    let username = req.username.trim().to_string();
    if username.is_empty() || req.password.is_empty() {
        return Err(ApiError::unprocessable(
            "Username and password are required",
        ));
    }

    // bcrypt runs on the blocking pool, before the store lock is taken
    let email = req.email.trim().to_string();
    let password = req.password;
    let cost = state.password_cost;
    let user = tokio::task::spawn_blocking(move || User::new(username, email, &password, cost))
        .await
        .map_err(|e| crate::error::Error::Other(e.to_string()))??;

    let mut store = state.store.write().await;
    if !store.insert_user(user.clone())? {
        return Err(ApiError::new(
            StatusCode::CONFLICT,
            "Username already registered",
        ));
    }

    let token = state.keys.create_token(&user)?;
    tracing::info!("User {} signed up", user.username);
    Ok((StatusCode::CREATED, Json(TokenResponse::bearer(token))))
}

// Probe routes

pub async fn hello() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: "Hello from qrdash!".to_string(),
    })
}

pub async fn time() -> Json<TimeResponse> {
    Json(TimeResponse {
        time: chrono::Local::now().to_rfc3339(),
    })
}

pub async fn echo(ApiJson(req): ApiJson<EchoRequest>) -> Json<EchoResponse> {
    Json(EchoResponse {
        message: req.text,
        number: req.number,
    })
}

// QR routes

async fn render(state: &SharedState, request: &QrRequest) -> ApiResult<Vec<u8>> {
    let options = state.render;
    let request = request.clone();
    let png = tokio::task::spawn_blocking(move || qr::render_png(&request, &options))
        .await
        .map_err(|e| crate::error::Error::Other(e.to_string()))??;
    Ok(png)
}

pub async fn create_qr(
    State(state): State<SharedState>,
    AuthUser(_claims): AuthUser,
    ApiJson(req): ApiJson<QrRequest>,
) -> ApiResult<Json<QrCodeResponse>> {
    let png = render(&state, &req).await?;
    Ok(Json(QrCodeResponse {
        qr_code: QrImage::from_png(&png).data_uri().to_string(),
    }))
}

pub async fn save_qr(
    State(state): State<SharedState>,
    AuthUser(claims): AuthUser,
    ApiJson(req): ApiJson<QrRequest>,
) -> ApiResult<(StatusCode, Json<QrCodeResponse>)> {
    let png = render(&state, &req).await?;
    let image = QrImage::from_png(&png);

    let record = state
        .store
        .write()
        .await
        .save_qr(&claims.sub, req, image.base64().to_string())?;

    tracing::info!("User {} saved QR code {}", claims.username, record.id);
    Ok((
        StatusCode::CREATED,
        Json(QrCodeResponse {
            qr_code: image.data_uri().to_string(),
        }),
    ))
}

pub async fn list_qr(
    State(state): State<SharedState>,
    AuthUser(claims): AuthUser,
) -> Json<Vec<QrRecord>> {
    Json(state.store.read().await.list_qr(&claims.sub))
}

pub async fn delete_qr(
    State(state): State<SharedState>,
    AuthUser(claims): AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<ErrorDetail>> {
    state.store.write().await.delete_qr(&claims.sub, id)?;
    tracing::info!("User {} deleted QR code {}", claims.username, id);
    Ok(Json(ErrorDetail {
        detail: "QR code deleted".to_string(),
    }))
}
