//! Domain entities - Core business objects with identity

mod announcement;
mod fitness_class;
mod fitness_class_type;
mod instructor;
mod location;
mod registration_record;
mod user;

pub use announcement::{Announcement, AnnouncementColumn};
pub use fitness_class::{FitnessClass, FitnessClassColumn, FitnessClassInclude};
pub use fitness_class_type::{FitnessClassType, FitnessClassTypeColumn};
pub use instructor::{Instructor, InstructorColumn};
pub use location::{Location, LocationColumn};
pub use registration_record::{
    RegistrationRecord, RegistrationRecordColumn, RegistrationRecordInclude,
};
pub use user::{Role, User, UserColumn};
