//! SQLite persistence adapters
//!
//! One generic repository serves every entity; each entity only describes
//! its table through [`Table`].

mod connection;
mod entity_repository;
mod registration_repository;
mod schema;
mod session_repository;
mod sql;
mod table;
mod tables;


pub use connection::Database;
pub use entity_repository::SqliteEntityRepo;
pub use registration_repository::SqliteRegistrationRepo;
pub use session_repository::SqliteSessionRepo;
pub use table::Table;
