//! The class schedule: browsing, admin maintenance and member sign-up.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    routing::get,
    Extension, Json, Router,
};
use fitnessapp_domain::EntityId;
use fitnessapp_shared::{
    FitnessClassEditView, FitnessClassFormView, FitnessClassListView, FitnessClassSignUpView,
};
use serde::Deserialize;

use super::to_index;
use crate::api::{auth::CurrentUser, ApiError};
use crate::app::App;

const CONTROLLER: &str = "FitnessClasses";

pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(index))
        .route("/FitnessClasses", get(index))
        .route("/FitnessClasses/Index", get(index))
        .route("/FitnessClasses/Details/{id}", get(details))
        .route("/FitnessClasses/Create", get(create_form).post(create))
        .route("/FitnessClasses/Edit/{id}", get(edit_form).post(edit))
        .route("/FitnessClasses/Delete/{id}", get(delete_confirm).post(delete))
        .route("/FitnessClasses/SignUp/{id}", get(sign_up_form).post(sign_up))
}

#[derive(Debug, Default, Deserialize)]
struct IndexParams {
    #[serde(default)]
    all: bool,
}

async fn index(
    State(app): State<Arc<App>>,
    Query(params): Query<IndexParams>,
) -> Result<Json<Vec<FitnessClassListView>>, ApiError> {
    let classes = app.logic.fitness_classes.get_list(params.all).await?;
    Ok(Json(classes))
}

async fn details(
    State(app): State<Arc<App>>,
    Path(id): Path<EntityId>,
) -> Result<Json<FitnessClassListView>, ApiError> {
    app.logic
        .fitness_classes
        .get(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn create_form(
    State(app): State<Arc<App>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<FitnessClassFormView>, ApiError> {
    user.require_admin()?;
    Ok(Json(app.logic.fitness_classes.form(None).await?))
}

async fn create(
    State(app): State<Arc<App>>,
    Extension(user): Extension<CurrentUser>,
    Json(view): Json<FitnessClassEditView>,
) -> Result<Redirect, ApiError> {
    user.require_admin()?;
    app.logic.fitness_classes.create(view).await?;
    Ok(to_index(CONTROLLER))
}

async fn edit_form(
    State(app): State<Arc<App>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<EntityId>,
) -> Result<Json<FitnessClassFormView>, ApiError> {
    user.require_admin()?;
    let logic = &app.logic.fitness_classes;
    let class = logic.get_for_edit(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(logic.form(Some(class)).await?))
}

async fn edit(
    State(app): State<Arc<App>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<EntityId>,
    Json(view): Json<FitnessClassEditView>,
) -> Result<Redirect, ApiError> {
    user.require_admin()?;
    app.logic.fitness_classes.update(id, view).await?;
    Ok(to_index(CONTROLLER))
}

async fn delete_confirm(
    State(app): State<Arc<App>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<EntityId>,
) -> Result<Json<FitnessClassListView>, ApiError> {
    user.require_admin()?;
    details(State(app), Path(id)).await
}

async fn delete(
    State(app): State<Arc<App>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<EntityId>,
) -> Result<Redirect, ApiError> {
    user.require_admin()?;
    app.logic.fitness_classes.delete(id).await?;
    Ok(to_index(CONTROLLER))
}

async fn sign_up_form(
    State(app): State<Arc<App>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<EntityId>,
) -> Result<Json<FitnessClassSignUpView>, ApiError> {
    app.logic
        .fitness_classes
        .get_sign_up(id, user.id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn sign_up(
    State(app): State<Arc<App>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<EntityId>,
) -> Result<Redirect, ApiError> {
    app.logic.fitness_classes.sign_up(id, user.id).await?;
    Ok(to_index(CONTROLLER))
}
