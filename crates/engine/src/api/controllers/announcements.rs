use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Redirect,
    routing::get,
    Extension, Json, Router,
};
use fitnessapp_domain::EntityId;
use fitnessapp_shared::AnnouncementView;

use super::to_index;
use crate::api::{auth::CurrentUser, ApiError};
use crate::app::App;

const CONTROLLER: &str = "Announcements";

pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/Announcements", get(index))
        .route("/Announcements/Index", get(index))
        .route("/Announcements/Details/{id}", get(details))
        .route("/Announcements/Create", get(create_form).post(create))
        .route("/Announcements/Edit/{id}", get(edit_form).post(edit))
        .route("/Announcements/Delete/{id}", get(delete_confirm).post(delete))
}

/// Admins see every announcement; members only the active ones.
async fn index(
    State(app): State<Arc<App>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<AnnouncementView>>, ApiError> {
    let logic = &app.logic.announcements;
    let announcements = if user.is_admin() {
        logic.get_all().await?
    } else {
        logic.get_list().await?
    };
    Ok(Json(announcements))
}

async fn details(
    State(app): State<Arc<App>>,
    Path(id): Path<EntityId>,
) -> Result<Json<AnnouncementView>, ApiError> {
    app.logic
        .announcements
        .get(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn create_form(
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Option<AnnouncementView>>, ApiError> {
    user.require_admin()?;
    Ok(Json(None))
}

async fn create(
    State(app): State<Arc<App>>,
    Extension(user): Extension<CurrentUser>,
    Json(view): Json<AnnouncementView>,
) -> Result<Redirect, ApiError> {
    user.require_admin()?;
    app.logic.announcements.create(view).await?;
    Ok(to_index(CONTROLLER))
}

async fn edit_form(
    State(app): State<Arc<App>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<EntityId>,
) -> Result<Json<AnnouncementView>, ApiError> {
    user.require_admin()?;
    details(State(app), Path(id)).await
}

async fn edit(
    State(app): State<Arc<App>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<EntityId>,
    Json(view): Json<AnnouncementView>,
) -> Result<Redirect, ApiError> {
    user.require_admin()?;
    app.logic.announcements.update(id, view).await?;
    Ok(to_index(CONTROLLER))
}

async fn delete_confirm(
    State(app): State<Arc<App>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<EntityId>,
) -> Result<Json<AnnouncementView>, ApiError> {
    user.require_admin()?;
    details(State(app), Path(id)).await
}

async fn delete(
    State(app): State<Arc<App>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<EntityId>,
) -> Result<Redirect, ApiError> {
    user.require_admin()?;
    app.logic.announcements.delete(id).await?;
    Ok(to_index(CONTROLLER))
}
