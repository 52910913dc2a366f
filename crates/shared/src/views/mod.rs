//! View models and their mapping to domain entities.
//!
//! Each view converts from its entity with `From`. Views that are also bound
//! from forms convert back the same way; navigation fields on the entity side
//! are never populated from a view.

mod account;
mod announcement;
mod catalog;
mod fitness_class;
mod registration;

pub use account::{LoginView, MessageView, UserView};
pub use announcement::AnnouncementView;
pub use catalog::{FitnessClassTypeView, InstructorView, LocationView};
pub use fitness_class::{
    FitnessClassEditView, FitnessClassFormView, FitnessClassListView, FitnessClassSignUpView,
};
pub use registration::RegistrationRecordView;
