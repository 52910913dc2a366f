//! Common test helpers: in-memory stores, fixed instants and seeded catalogs.

use chrono::{DateTime, Duration, TimeZone, Utc};
use fitnessapp_domain::{FitnessClass, FitnessClassType, Instructor, Location};

pub use crate::app::repository;
use crate::infrastructure::persistence::Database;

/// A fresh in-memory database with the schema applied.
pub async fn memory_db() -> Database {
    let db = Database::in_memory().await.expect("in-memory database");
    db.initialize_schema().await.expect("schema");
    db
}

/// A UTC instant on the hour.
pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("valid instant")
}

/// One row of each catalog entity.
pub struct Catalog {
    pub class_type: FitnessClassType,
    pub instructor: Instructor,
    pub location: Location,
}

pub async fn seed_catalog(db: &Database) -> Catalog {
    let class_type = repository::<FitnessClassType>(db)
        .create(FitnessClassType::new("Spin", "Indoor cycling"))
        .await
        .expect("class type");
    let instructor = repository::<Instructor>(db)
        .create(Instructor::new("Kim", "Lee", "kim@example.com").with_bio("Cycling coach"))
        .await
        .expect("instructor");
    let location = repository::<Location>(db)
        .create(Location::new("Studio A", "1 Main St", "A"))
        .await
        .expect("location");

    Catalog {
        class_type,
        instructor,
        location,
    }
}

/// An hour-long class for 10 on 2030-03-01 starting at `hour`.
pub async fn seed_class(db: &Database, catalog: &Catalog, hour: u32) -> FitnessClass {
    let start = at(2030, 3, 1, hour);
    repository::<FitnessClass>(db)
        .create(FitnessClass::new(
            catalog.class_type.id,
            catalog.instructor.id,
            catalog.location.id,
            start,
            start + Duration::hours(1),
            10,
        ))
        .await
        .expect("class")
}
