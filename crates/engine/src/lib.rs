//! FitnessApp engine library.
//!
//! ## Structure
//!
//! - `repositories/` - The generic repository and named queries per entity
//! - `use_cases/` - Logic services speaking in view models
//! - `infrastructure/` - Ports, SQLite adapters, configuration, clock, passwords
//! - `api/` - HTTP routes, controllers and middleware
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod repositories;
pub mod use_cases;

#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
