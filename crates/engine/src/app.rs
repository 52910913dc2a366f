//! Application state and composition.

use std::sync::Arc;

use fitnessapp_domain::{
    Announcement, FitnessClass, FitnessClassType, Instructor, Location, RegistrationRecord, User,
};

use crate::infrastructure::{
    config::AppSettings,
    persistence::{Database, SqliteEntityRepo, SqliteRegistrationRepo, SqliteSessionRepo, Table},
    ports::{ClockPort, RegistrationRepo, SessionRepo},
};
use crate::repositories::Repository;
use crate::use_cases::{
    AccountLogic, AnnouncementLogic, FitnessClassLogic, FitnessClassTypeLogic, InstructorLogic,
    LocationLogic, LogicError, RegistrationRecordLogic,
};

/// Main application state.
///
/// Holds settings, the database and logic services.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub settings: AppSettings,
    pub database: Database,
    pub logic: Logic,
}

/// One repository per entity, all sharing the same pool.
struct Repositories {
    announcements: Repository<Announcement>,
    fitness_classes: Repository<FitnessClass>,
    fitness_class_types: Repository<FitnessClassType>,
    instructors: Repository<Instructor>,
    locations: Repository<Location>,
    registration_records: Repository<RegistrationRecord>,
    users: Repository<User>,
}

impl Repositories {
    fn new(db: &Database) -> Self {
        Self {
            announcements: repository(db),
            fitness_classes: repository(db),
            fitness_class_types: repository(db),
            instructors: repository(db),
            locations: repository(db),
            registration_records: repository(db),
            users: repository(db),
        }
    }
}

/// Container for all logic services.
pub struct Logic {
    pub account: AccountLogic,
    pub announcements: AnnouncementLogic,
    pub fitness_classes: FitnessClassLogic,
    pub fitness_class_types: FitnessClassTypeLogic,
    pub instructors: InstructorLogic,
    pub locations: LocationLogic,
    pub registration_records: RegistrationRecordLogic,
}

/// SQLite-backed repository for one entity.
pub fn repository<E: Table>(db: &Database) -> Repository<E> {
    Repository::new(Arc::new(SqliteEntityRepo::<E>::new(db.clone())))
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(database: Database, settings: AppSettings, clock: Arc<dyn ClockPort>) -> Self {
        let repositories = Repositories::new(&database);
        let sessions: Arc<dyn SessionRepo> = Arc::new(SqliteSessionRepo::new(database.clone()));
        let seats: Arc<dyn RegistrationRepo> =
            Arc::new(SqliteRegistrationRepo::new(database.clone()));

        let logic = Logic {
            account: AccountLogic::new(
                repositories.users.clone(),
                sessions,
                clock.clone(),
                settings.session_ttl(),
            ),
            announcements: AnnouncementLogic::new(
                repositories.announcements.clone(),
                clock.clone(),
            ),
            fitness_classes: FitnessClassLogic::new(
                repositories.fitness_classes.clone(),
                repositories.fitness_class_types.clone(),
                repositories.instructors.clone(),
                repositories.locations.clone(),
                repositories.registration_records.clone(),
                seats,
                clock,
            ),
            fitness_class_types: FitnessClassTypeLogic::for_class_types(
                repositories.fitness_class_types.clone(),
            ),
            instructors: InstructorLogic::for_instructors(repositories.instructors.clone()),
            locations: LocationLogic::for_locations(repositories.locations.clone()),
            registration_records: RegistrationRecordLogic::new(
                repositories.registration_records.clone(),
            ),
        };

        Self {
            settings,
            database,
            logic,
        }
    }

    /// Seeds the configured admin account. Skipped when no credentials are
    /// configured.
    pub async fn seed_identity(&self) -> Result<(), LogicError> {
        let identity = &self.settings.identity;
        match (&identity.admin_email, &identity.admin_password) {
            (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => {
                self.logic
                    .account
                    .seed_admin(email, password, &identity.admin_display_name)
                    .await?;
            }
            _ => tracing::warn!("No admin credentials configured, skipping identity seeding"),
        }
        Ok(())
    }
}
