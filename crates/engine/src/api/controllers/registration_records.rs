use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Redirect,
    routing::{get, post},
    Extension, Json, Router,
};
use fitnessapp_domain::EntityId;
use fitnessapp_shared::RegistrationRecordView;

use super::to_index;
use crate::api::{auth::CurrentUser, ApiError};
use crate::app::App;

pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/RegistrationRecords", get(index))
        .route("/RegistrationRecords/Index", get(index))
        .route("/RegistrationRecords/Delete/{id}", post(delete))
}

/// The caller's registrations, or every registration for admins.
async fn index(
    State(app): State<Arc<App>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<RegistrationRecordView>>, ApiError> {
    let records = app
        .logic
        .registration_records
        .get_list_visible_to(&user)
        .await?;
    Ok(Json(records))
}

async fn delete(
    State(app): State<Arc<App>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<EntityId>,
) -> Result<Redirect, ApiError> {
    app.logic.registration_records.cancel(id, &user).await?;
    Ok(to_index("RegistrationRecords"))
}
