//! Cross-cutting middleware: HTTPS enforcement and the error page.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::http::{found, ACCESS_DENIED_PATH};
use crate::app::App;

/// Detail of a failed request, attached to `500` responses for the error
/// pipeline to log and, in Development, display.
#[derive(Debug, Clone)]
pub struct ErrorDetail(pub String);

/// Turns handler failures into the environment-appropriate response.
///
/// Development sees the failure detail; other environments are redirected to
/// the error page.
pub async fn handle_errors(
    State(app): State<Arc<App>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;

    if response.status() != StatusCode::INTERNAL_SERVER_ERROR {
        return response;
    }

    let detail = response
        .extensions()
        .get::<ErrorDetail>()
        .map_or_else(|| "unknown error".to_string(), |d| d.0.clone());
    tracing::error!(%method, path, error = %detail, "Request failed");

    if app.settings.environment.is_development() {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("An unhandled error occurred while processing {method} {path}.\n\n{detail}"),
        )
            .into_response()
    } else {
        found(ACCESS_DENIED_PATH)
    }
}

/// Redirects plain-HTTP reads to HTTPS and refuses plain-HTTP writes.
pub async fn require_https(
    State(app): State<Arc<App>>,
    request: Request,
    next: Next,
) -> Response {
    let https = &app.settings.https;
    if !https.required || is_https(&request) {
        return next.run(request).await;
    }

    if request.method() != Method::GET && request.method() != Method::HEAD {
        return (StatusCode::FORBIDDEN, "HTTPS is required").into_response();
    }

    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| request.uri().host())
        .unwrap_or("localhost");
    let host = strip_port(host);
    let port = https.redirect_port(app.settings.environment);
    let authority = if port == 443 {
        host.to_string()
    } else {
        format!("{host}:{port}")
    };
    let path = request
        .uri()
        .path_and_query()
        .map_or("/", |pq| pq.as_str());

    found(&format!("https://{authority}{path}"))
}

fn is_https(request: &Request) -> bool {
    let scheme = request
        .headers()
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .or_else(|| request.uri().scheme_str())
        .unwrap_or("http");
    scheme.eq_ignore_ascii_case("https")
}

fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        // IPv6 literal: keep the brackets.
        return host.split_once("]:").map_or(host, |(h, _)| &host[..=h.len()]);
    }
    host.split_once(':').map_or(host, |(h, _)| h)
}
