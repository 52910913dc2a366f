//! Repository modules - Data access wrappers around port traits.
//!
//! [`Repository`] wraps an [`EntityRepo`](crate::infrastructure::ports::EntityRepo)
//! port and gives use cases one uniform way to read and write any entity.
//! Entity-specific modules add named queries on top of it.

mod announcement;
mod fitness_class;
mod query;
mod registration_record;
mod repository;
mod user;

#[cfg(test)]
mod repository_tests;

pub use query::{Batch, Query};
pub use repository::Repository;

use fitnessapp_domain::{
    Announcement, FitnessClass, FitnessClassType, Instructor, Location, RegistrationRecord, User,
};

pub type AnnouncementRepository = Repository<Announcement>;
pub type FitnessClassRepository = Repository<FitnessClass>;
pub type FitnessClassTypeRepository = Repository<FitnessClassType>;
pub type InstructorRepository = Repository<Instructor>;
pub type LocationRepository = Repository<Location>;
pub type RegistrationRecordRepository = Repository<RegistrationRecord>;
pub type UserRepository = Repository<User>;
