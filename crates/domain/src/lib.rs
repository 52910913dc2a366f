extern crate self as fitnessapp_domain;

pub mod entities;
pub mod entity;
pub mod error;
pub mod query;

// Re-export all entities (explicit list in entities/mod.rs)
pub use entities::{
    Announcement, AnnouncementColumn, FitnessClass, FitnessClassColumn, FitnessClassInclude,
    FitnessClassType, FitnessClassTypeColumn, Instructor, InstructorColumn, Location,
    LocationColumn, RegistrationRecord, RegistrationRecordColumn, RegistrationRecordInclude, Role,
    User, UserColumn,
};

pub use entity::{Entity, EntityId};
pub use error::DomainError;
pub use query::{Column, Comparison, Direction, Include, NoInclude, Predicate, QuerySpec, Value};
