//! Shared helpers for driving the portal router in-process.
//!
//! Mirrors the router construction in the portal's `lib.rs` so the tests
//! exercise the same middleware stack production uses.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use tower::ServiceExt;
use url::Url;

use kostpanel_portal::config::PortalConfig;
use kostpanel_portal::state::AppState;

/// Build a test `PortalConfig` pointing at the given (mock) backend.
///
/// The verification delay is shortened so background tasks fire and finish
/// within a test run.
pub fn test_config(backend_url: &str) -> PortalConfig {
    PortalConfig {
        backend_url: Url::parse(backend_url).expect("backend url"),
        host: "127.0.0.1".parse().expect("host"),
        port: 0,
        verify_delay_ms: 10,
        verify_timeout_ms: 200,
        sentry_dsn: None,
    }
}

/// Build the full portal app against a mock backend URL.
pub fn build_test_app(backend_url: &str) -> Router {
    kostpanel_portal::app(AppState::new(test_config(backend_url)))
}

/// Issue a GET with an optional `Cookie` header.
pub async fn get(app: Router, uri: &str, cookies: Option<&str>) -> Response<Body> {
    let mut request = Request::builder().uri(uri).method("GET");
    if let Some(cookies) = cookies {
        request = request.header(COOKIE, cookies);
    }
    app.oneshot(request.body(Body::empty()).expect("request"))
        .await
        .expect("response")
}

/// Issue a POST with a urlencoded form body and an optional `Cookie` header.
pub async fn post_form(
    app: Router,
    uri: &str,
    cookies: Option<&str>,
    form: &str,
) -> Response<Body> {
    let mut request = Request::builder()
        .uri(uri)
        .method("POST")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookies) = cookies {
        request = request.header(COOKIE, cookies);
    }
    app.oneshot(request.body(Body::from(form.to_owned())).expect("request"))
        .await
        .expect("response")
}

/// Collect the response body as a string.
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

/// All `Set-Cookie` header values of a response.
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|value| value.to_str().expect("header value").to_owned())
        .collect()
}

/// Whether any `Set-Cookie` header sets `name` to `value`.
pub fn sets_cookie(response: &Response<Body>, name: &str, value: &str) -> bool {
    set_cookies(response)
        .iter()
        .any(|header| header.starts_with(&format!("{name}={value}")))
}

/// Whether any `Set-Cookie` header removes `name` (empty value, Max-Age=0).
pub fn removes_cookie(response: &Response<Body>, name: &str) -> bool {
    set_cookies(response)
        .iter()
        .any(|header| header.starts_with(&format!("{name}=;")) && header.contains("Max-Age=0"))
}

/// The `Location` header of a redirect response.
pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned()
}

/// A `userData` blob cookie value (URL-encoded JSON), as the portal writes
/// it.
pub fn user_data_cookie(username: &str, role: &str, room_id: Option<&str>) -> String {
    let blob = serde_json::json!({
        "username": username,
        "email": format!("{username}@example.com"),
        "role": role,
        "roomId": room_id,
        "loginTime": "2026-08-01T08:00:00Z",
    });
    urlencoding::encode(&blob.to_string()).into_owned()
}
