//! FitnessApp Shared - View models exchanged with HTTP clients
//!
//! This crate contains:
//! - View models returned by controllers and accepted from forms
//! - Account request types
//! - The mapping between domain entities and their views
//!
//! # Design Principles
//!
//! 1. **No business logic** - Pure data types, validation rules, and mapping
//! 2. **No storage or web dependencies** - Only serde, chrono, and validator

pub mod requests;
pub mod views;

pub use requests::{LoginRequest, RegisterRequest};
pub use views::{
    AnnouncementView, FitnessClassEditView, FitnessClassFormView, FitnessClassListView,
    FitnessClassSignUpView, FitnessClassTypeView, InstructorView, LocationView, LoginView,
    MessageView, RegistrationRecordView, UserView,
};

/// Re-exported so callers can run `validate()` without naming the crate.
pub use validator::{Validate, ValidationErrors};
