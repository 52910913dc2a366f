//! Cookie sessions and the sign-in gate.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Duration;
use fitnessapp_domain::User;

use super::http::{found, ApiError};
use crate::app::App;

pub const SESSION_COOKIE: &str = "FitnessApp.Session";
pub const LOGIN_PATH: &str = "/Account/Login";

/// The signed-in user, placed in request extensions by [`require_sign_in`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.0.is_admin() {
            Ok(())
        } else {
            tracing::warn!(user_id = self.0.id, "Admin-only action refused");
            Err(ApiError::Forbidden)
        }
    }
}

/// Resolves the session cookie to a user, or redirects to the login page
/// carrying the requested path as `ReturnUrl`.
pub async fn require_sign_in(
    State(app): State<Arc<App>>,
    mut request: Request,
    next: Next,
) -> Response {
    let user = match session_token(request.headers()) {
        Some(token) => app.logic.account.current_user(&token).await,
        None => Ok(None),
    };

    match user {
        Ok(Some(user)) => {
            request.extensions_mut().insert(CurrentUser(user));
            next.run(request).await
        }
        Ok(None) => found(&login_redirect(request.uri())),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub fn login_redirect(uri: &Uri) -> String {
    let target = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string());
    format!("{LOGIN_PATH}?ReturnUrl={}", urlencoding::encode(&target))
}

/// The session token from the `Cookie` headers, if present.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn session_cookie(token: &str, ttl: Duration, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        ttl.num_seconds()
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// `true` for paths on this site, so login cannot redirect elsewhere.
pub fn is_local_url(url: &str) -> bool {
    url.starts_with('/') && !url.starts_with("//") && !url.starts_with("/\\")
}
