//! Sign-in, sign-out and member registration.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use fitnessapp_shared::{LoginRequest, LoginView, RegisterRequest, UserView};
use serde::Deserialize;

use crate::api::auth::{clear_session_cookie, is_local_url, session_cookie, session_token};
use crate::api::ApiError;
use crate::app::App;

pub fn anonymous_routes() -> Router<Arc<App>> {
    Router::new()
        .route("/Account/Login", get(login_form).post(login))
        .route("/Account/Register", post(register))
}

pub fn signed_in_routes() -> Router<Arc<App>> {
    Router::new().route("/Account/Logout", post(logout))
}

#[derive(Debug, Default, Deserialize)]
struct LoginParams {
    #[serde(rename = "ReturnUrl")]
    return_url: Option<String>,
}

async fn login_form(Query(params): Query<LoginParams>) -> Json<LoginView> {
    Json(LoginView {
        return_url: params.return_url,
    })
}

/// Opens a session and redirects to the local return URL, or `/`.
async fn login(
    State(app): State<Arc<App>>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let (session, _user) = app.logic.account.login(&request).await?;

    let cookie = session_cookie(
        &session.token,
        app.logic.account.session_ttl(),
        app.settings.https.required,
    );
    let target = request
        .return_url
        .as_deref()
        .filter(|url| is_local_url(url))
        .unwrap_or("/");

    Ok(([(header::SET_COOKIE, cookie)], Redirect::to(target)).into_response())
}

async fn register(
    State(app): State<Arc<App>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<UserView>, ApiError> {
    Ok(Json(app.logic.account.register(request).await?))
}

async fn logout(State(app): State<Arc<App>>, headers: HeaderMap) -> Result<Response, ApiError> {
    if let Some(token) = session_token(&headers) {
        app.logic.account.logout(&token).await?;
    }
    Ok((
        [(header::SET_COOKIE, clear_session_cookie())],
        Redirect::to("/"),
    )
        .into_response())
}
