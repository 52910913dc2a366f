use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use fitnessapp_shared::{AnnouncementView, MessageView};

use crate::api::ApiError;
use crate::app::App;

pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/Home", get(index))
        .route("/Home/Index", get(index))
}

pub fn anonymous_routes() -> Router<Arc<App>> {
    Router::new()
        .route("/Home/About", get(about))
        .route("/Home/Contact", get(contact))
        .route("/Home/Error", get(error))
}

/// Active announcements, newest first.
async fn index(State(app): State<Arc<App>>) -> Result<Json<Vec<AnnouncementView>>, ApiError> {
    Ok(Json(app.logic.announcements.get_list().await?))
}

async fn about() -> Json<MessageView> {
    Json(MessageView::new(
        "Book a spot in a class, see who is teaching, and keep track of your registrations.",
    ))
}

async fn contact() -> Json<MessageView> {
    Json(MessageView::new("Ask at the front desk or email the studio."))
}

async fn error() -> Json<MessageView> {
    Json(MessageView::new(
        "An error occurred while processing your request.",
    ))
}
