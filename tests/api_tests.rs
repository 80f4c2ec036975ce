//! HTTP contract tests against the reference server
//!
//! Requests are sent with a raw reqwest client so status codes and bodies
//! are checked exactly as a browser front end would see them.

mod common;

use common::{start_server, TestServer};
use qrdash::api::models::{ErrorDetail, TokenResponse};
use qrdash::qr::{QrCodeResponse, QrRecord, QrRequest, QrStyle};
use serde_json::json;

async fn signup_token(server: &TestServer, username: &str) -> String {
    let response = reqwest::Client::new()
        .post(server.url("/signup"))
        .json(&json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": "password1",
        }))
        .send()
        .await
        .expect("signup request");
    assert_eq!(response.status(), 201);
    let token: TokenResponse = response.json().await.expect("token body");
    token.access_token
}

async fn detail(response: reqwest::Response) -> String {
    response
        .json::<ErrorDetail>()
        .await
        .expect("error body")
        .detail
}

#[tokio::test]
async fn test_health() {
    let server = start_server().await;
    let body: serde_json::Value = reqwest::get(server.url("/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
    println!("✓ Health check ok");
}

#[tokio::test]
async fn test_signup_then_form_login() {
    let server = start_server().await;
    signup_token(&server, "alice").await;

    let response = reqwest::Client::new()
        .post(server.url("/login"))
        .form(&[("username", "alice"), ("password", "password1")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let token: TokenResponse = response.json().await.unwrap();
    assert_eq!(token.token_type, "bearer");
    assert_eq!(token.access_token.split('.').count(), 3);
    println!("✓ Form login returns a bearer token");
}

#[tokio::test]
async fn test_duplicate_signup_conflicts() {
    let server = start_server().await;
    signup_token(&server, "alice").await;

    let response = reqwest::Client::new()
        .post(server.url("/signup"))
        .json(&json!({"username": "alice", "email": "x@example.com", "password": "other"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 409);
    assert_eq!(detail(response).await, "Username already registered");
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let server = start_server().await;
    signup_token(&server, "alice").await;

    for (username, password) in [("alice", "nope"), ("nobody", "password1")] {
        let response = reqwest::Client::new()
            .post(server.url("/login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 401);
        assert_eq!(detail(response).await, "Incorrect username or password");
    }
}

#[tokio::test]
async fn test_qr_routes_require_token() {
    let server = start_server().await;
    let client = reqwest::Client::new();

    let response = client.get(server.url("/qr")).send().await.unwrap();
    assert_eq!(response.status(), 401);
    assert_eq!(detail(response).await, "Not authenticated");

    let response = client
        .post(server.url("/qr/create"))
        .bearer_auth("not-a-jwt")
        .json(&QrRequest::new("https://example.com"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
    assert_eq!(detail(response).await, "Could not validate credentials");
}

#[tokio::test]
async fn test_probes() {
    let server = start_server().await;
    let client = reqwest::Client::new();

    let hello: serde_json::Value = client
        .get(server.url("/hello"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(hello["message"].as_str().is_some_and(|m| !m.is_empty()));

    let time: serde_json::Value = client
        .get(server.url("/time"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let time = time["time"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(time).is_ok());

    let echo: serde_json::Value = client
        .post(server.url("/echo"))
        .json(&json!({"text": "hi", "number": 7}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(echo, json!({"message": "hi", "number": 7}));
}

#[tokio::test]
async fn test_create_returns_png_data_uri() {
    let server = start_server().await;
    let token = signup_token(&server, "alice").await;

    let mut request = QrRequest::new("https://example.com");
    request.dot_style = QrStyle::Circle;
    request.eye_style = QrStyle::Rounded;
    request.fill_color = "#ff0000".to_string();

    let response = reqwest::Client::new()
        .post(server.url("/qr/create"))
        .bearer_auth(&token)
        .json(&request)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: QrCodeResponse = response.json().await.unwrap();
    assert!(body.qr_code.starts_with("data:image/png;base64,"));

    // Create does not persist
    let records: Vec<QrRecord> = reqwest::Client::new()
        .get(server.url("/qr"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_style_fields_are_optional() {
    let server = start_server().await;
    let token = signup_token(&server, "alice").await;

    let response = reqwest::Client::new()
        .post(server.url("/qr/create"))
        .bearer_auth(&token)
        .json(&json!({"url": "https://example.com"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_invalid_requests_are_unprocessable() {
    let server = start_server().await;
    let token = signup_token(&server, "alice").await;
    let client = reqwest::Client::new();

    let bodies = [
        json!({"url": ""}),
        json!({"url": "https://example.com", "fill_color": "red"}),
        json!({"url": "https://example.com", "back_color": "#12345"}),
    ];
    for body in bodies {
        let response = client
            .post(server.url("/qr/save"))
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 422, "body {}", body);
    }

    // Unknown style names are rejected while decoding the body
    let response = client
        .post(server.url("/qr/create"))
        .bearer_auth(&token)
        .json(&json!({"url": "https://example.com", "dot_style": "hexagon"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 422);
    assert!(detail(response).await.contains("hexagon"));
}

#[tokio::test]
async fn test_extractor_rejections_use_detail_body() {
    let server = start_server().await;
    let token = signup_token(&server, "alice").await;
    let client = reqwest::Client::new();

    let response = client
        .post(server.url("/signup"))
        .json(&json!({"username": "bob", "password": "password1"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 422);
    assert!(detail(response).await.contains("email"));

    let response = client
        .delete(server.url("/qr/abc"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    assert!(!detail(response).await.is_empty());

    let response = client
        .post(server.url("/login"))
        .form(&[("username", "alice")])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_client_error());
    assert!(detail(response).await.contains("password"));

    let response = client
        .post(server.url("/echo"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    assert!(!detail(response).await.is_empty());
}

#[tokio::test]
async fn test_token_past_expiry_is_rejected() {
    use qrdash::auth::{JwtKeys, User};

    let server = start_server().await;
    // Expired one minute ago, inside the decoder's default leeway
    let keys = JwtKeys::new(b"test-secret", -1);
    let user = User::new("ghost".to_string(), String::new(), "x", 4).unwrap();
    let token = keys.create_token(&user).unwrap();

    let response = reqwest::Client::new()
        .get(server.url("/qr"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
    assert_eq!(detail(response).await, "Could not validate credentials");
}

#[tokio::test]
async fn test_save_list_delete() {
    let server = start_server().await;
    let token = signup_token(&server, "alice").await;
    let client = reqwest::Client::new();

    for url in ["https://one.example", "https://two.example"] {
        let response = client
            .post(server.url("/qr/save"))
            .bearer_auth(&token)
            .json(&QrRequest::new(url))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);
        let body: QrCodeResponse = response.json().await.unwrap();
        assert!(body.qr_code.starts_with("data:image/png;base64,"));
    }

    let records: Vec<QrRecord> = client
        .get(server.url("/qr"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].url, "https://two.example");
    assert_eq!(records[1].url, "https://one.example");
    // Listed images are bare base64
    assert!(!records[0].qr_image.starts_with("data:"));
    assert!(records[0].image().png_bytes().is_ok());

    let response = client
        .delete(server.url(&format!("/qr/{}", records[1].id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = client
        .delete(server.url(&format!("/qr/{}", records[1].id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    assert_eq!(detail(response).await, "QR code not found");
    println!("✓ Save, list and delete round trip");
}

#[tokio::test]
async fn test_users_only_see_their_own_codes() {
    let server = start_server().await;
    let alice = signup_token(&server, "alice").await;
    let bob = signup_token(&server, "bob").await;
    let client = reqwest::Client::new();

    client
        .post(server.url("/qr/save"))
        .bearer_auth(&alice)
        .json(&QrRequest::new("https://alice.example"))
        .send()
        .await
        .unwrap();

    let bobs: Vec<QrRecord> = client
        .get(server.url("/qr"))
        .bearer_auth(&bob)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(bobs.is_empty());

    let alices: Vec<QrRecord> = client
        .get(server.url("/qr"))
        .bearer_auth(&alice)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let response = client
        .delete(server.url(&format!("/qr/{}", alices[0].id)))
        .bearer_auth(&bob)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}
