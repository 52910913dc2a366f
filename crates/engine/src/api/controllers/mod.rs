//! One module per controller. Handlers return JSON view models or redirects.

pub mod account;
pub mod announcements;
pub mod catalog;
pub mod fitness_classes;
pub mod home;
pub mod registration_records;

use axum::response::Redirect;

/// `303 See Other` back to a controller's index after a mutation.
pub(crate) fn to_index(controller: &str) -> Redirect {
    Redirect::to(&format!("/{controller}"))
}
