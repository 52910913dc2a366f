//! HTTP routes.

use std::sync::Arc;

use axum::{
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use fitnessapp_domain::DomainError;
use tower_http::services::ServeDir;

use super::controllers;
use super::{auth, pipeline};
use crate::app::App;
use crate::infrastructure::ports::RepoError;
use crate::use_cases::LogicError;

/// Where signed-in users without the needed role are sent.
pub const ACCESS_DENIED_PATH: &str = "/Home/Error";

/// Create all HTTP routes.
///
/// Everything requires a signed-in user except the anonymous pages, the
/// health check and static files.
pub fn routes(app: Arc<App>) -> Router {
    let signed_in = Router::new()
        .merge(controllers::fitness_classes::routes())
        .merge(controllers::catalog::routes::<controllers::catalog::FitnessClassTypes>())
        .merge(controllers::catalog::routes::<controllers::catalog::Instructors>())
        .merge(controllers::catalog::routes::<controllers::catalog::Locations>())
        .merge(controllers::announcements::routes())
        .merge(controllers::registration_records::routes())
        .merge(controllers::home::routes())
        .merge(controllers::account::signed_in_routes())
        .route_layer(middleware::from_fn_with_state(
            app.clone(),
            auth::require_sign_in,
        ));

    let anonymous = Router::new()
        .route("/health", get(health))
        .merge(controllers::home::anonymous_routes())
        .merge(controllers::account::anonymous_routes());

    let static_files = ServeDir::new(&app.settings.content.static_dir);

    Router::new()
        .merge(signed_in)
        .merge(anonymous)
        .fallback_service(static_files)
        .layer(middleware::from_fn_with_state(
            app.clone(),
            pipeline::handle_errors,
        ))
        .layer(middleware::from_fn_with_state(
            app.clone(),
            pipeline::require_https,
        ))
        .with_state(app)
}

async fn health() -> &'static str {
    "OK"
}

/// `302 Found` to `location`.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    BadRequest(String),
    Conflict(String),
    Forbidden,
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg).into_response(),
            ApiError::Forbidden => found(ACCESS_DENIED_PATH),
            ApiError::Internal(detail) => {
                let mut response =
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response();
                response
                    .extensions_mut()
                    .insert(pipeline::ErrorDetail(detail));
                response
            }
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<LogicError> for ApiError {
    fn from(e: LogicError) -> Self {
        match e {
            LogicError::NotFound => ApiError::NotFound,
            LogicError::InvalidInput(msg) => ApiError::BadRequest(msg),
            LogicError::Forbidden => ApiError::Forbidden,
            LogicError::Conflict(msg) => ApiError::Conflict(msg),
            LogicError::Domain(DomainError::NotFound { .. }) => ApiError::NotFound,
            LogicError::Domain(e) => ApiError::BadRequest(e.to_string()),
            LogicError::Repo(e) => ApiError::from(e),
        }
    }
}
