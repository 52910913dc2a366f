//! Admin-maintained reference data: class types, instructors and locations.
//!
//! The three controllers differ only in path and entity, so their handlers
//! are written once over [`CatalogResource`].

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Redirect,
    routing::get,
    Extension, Json, Router,
};
use fitnessapp_domain::{Entity, EntityId, FitnessClassType, Instructor, Location};
use fitnessapp_shared::{FitnessClassTypeView, InstructorView, LocationView, Validate};
use serde::{de::DeserializeOwned, Serialize};

use super::to_index;
use crate::api::{auth::CurrentUser, ApiError};
use crate::app::App;
use crate::use_cases::CatalogLogic;

pub trait CatalogResource: Send + Sync + 'static {
    type Entity: Entity + From<Self::View>;
    type View: From<Self::Entity> + Validate + Serialize + DeserializeOwned + Send + 'static;

    /// Controller name, which is also the first path segment.
    const PATH: &'static str;

    fn logic(app: &App) -> &CatalogLogic<Self::Entity, Self::View>;
}

pub struct FitnessClassTypes;
pub struct Instructors;
pub struct Locations;

impl CatalogResource for FitnessClassTypes {
    type Entity = FitnessClassType;
    type View = FitnessClassTypeView;
    const PATH: &'static str = "FitnessClassTypes";

    fn logic(app: &App) -> &CatalogLogic<Self::Entity, Self::View> {
        &app.logic.fitness_class_types
    }
}

impl CatalogResource for Instructors {
    type Entity = Instructor;
    type View = InstructorView;
    const PATH: &'static str = "Instructors";

    fn logic(app: &App) -> &CatalogLogic<Self::Entity, Self::View> {
        &app.logic.instructors
    }
}

impl CatalogResource for Locations {
    type Entity = Location;
    type View = LocationView;
    const PATH: &'static str = "Locations";

    fn logic(app: &App) -> &CatalogLogic<Self::Entity, Self::View> {
        &app.logic.locations
    }
}

pub fn routes<R: CatalogResource>() -> Router<Arc<App>> {
    let base = format!("/{}", R::PATH);
    Router::new()
        .route(&base, get(index::<R>))
        .route(&format!("{base}/Index"), get(index::<R>))
        .route(&format!("{base}/Details/{{id}}"), get(details::<R>))
        .route(&format!("{base}/Create"), get(create_form::<R>).post(create::<R>))
        .route(&format!("{base}/Edit/{{id}}"), get(edit_form::<R>).post(edit::<R>))
        .route(
            &format!("{base}/Delete/{{id}}"),
            get(delete_confirm::<R>).post(delete::<R>),
        )
}

async fn index<R: CatalogResource>(
    State(app): State<Arc<App>>,
) -> Result<Json<Vec<R::View>>, ApiError> {
    Ok(Json(R::logic(&app).get_list().await?))
}

async fn details<R: CatalogResource>(
    State(app): State<Arc<App>>,
    Path(id): Path<EntityId>,
) -> Result<Json<R::View>, ApiError> {
    R::logic(&app)
        .get(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// Nothing to prefill: the form is empty.
async fn create_form<R: CatalogResource>(
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Option<R::View>>, ApiError> {
    user.require_admin()?;
    Ok(Json(None))
}

async fn create<R: CatalogResource>(
    State(app): State<Arc<App>>,
    Extension(user): Extension<CurrentUser>,
    Json(view): Json<R::View>,
) -> Result<Redirect, ApiError> {
    user.require_admin()?;
    R::logic(&app).create(view).await?;
    Ok(to_index(R::PATH))
}

async fn edit_form<R: CatalogResource>(
    State(app): State<Arc<App>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<EntityId>,
) -> Result<Json<R::View>, ApiError> {
    user.require_admin()?;
    details::<R>(State(app), Path(id)).await
}

async fn edit<R: CatalogResource>(
    State(app): State<Arc<App>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<EntityId>,
    Json(view): Json<R::View>,
) -> Result<Redirect, ApiError> {
    user.require_admin()?;
    R::logic(&app).update(id, view).await?;
    Ok(to_index(R::PATH))
}

async fn delete_confirm<R: CatalogResource>(
    State(app): State<Arc<App>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<EntityId>,
) -> Result<Json<R::View>, ApiError> {
    user.require_admin()?;
    details::<R>(State(app), Path(id)).await
}

async fn delete<R: CatalogResource>(
    State(app): State<Arc<App>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<EntityId>,
) -> Result<Redirect, ApiError> {
    user.require_admin()?;
    R::logic(&app).delete(id).await?;
    Ok(to_index(R::PATH))
}
