//! Row mappings for every stored entity.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use fitnessapp_domain::{
    Announcement, Column, Entity, EntityId, FitnessClass, FitnessClassInclude, FitnessClassType,
    Instructor, Location, Predicate, QuerySpec, RegistrationRecord, RegistrationRecordInclude,
    Role, User, Value,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::sql;
use super::table::Table;

/// Loads the rows of `T` with the given identities, keyed by id.
async fn fetch_by_ids<T: Table>(
    pool: &SqlitePool,
    ids: impl IntoIterator<Item = EntityId>,
) -> Result<HashMap<EntityId, T>, sqlx::Error> {
    let ids: BTreeSet<EntityId> = ids.into_iter().collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let spec = QuerySpec::<T>::new().filter(Predicate::is_in(
        <T::Column as Column>::ID,
        ids.into_iter(),
    ));
    let statement = sql::select(&spec);
    let rows = statement.query().fetch_all(pool).await?;

    rows.iter()
        .map(|row| T::from_row(row).map(|entity| (entity.id(), entity)))
        .collect()
}

impl Table for FitnessClassType {
    const TABLE: &'static str = "fitness_class_types";
    const COLUMNS: &'static [&'static str] = &["name", "description"];

    fn values(&self) -> Vec<Value> {
        vec![self.name.clone().into(), self.description.clone().into()]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
        })
    }
}

impl Table for Instructor {
    const TABLE: &'static str = "instructors";
    const COLUMNS: &'static [&'static str] = &["first_name", "last_name", "email", "bio"];

    fn values(&self) -> Vec<Value> {
        vec![
            self.first_name.clone().into(),
            self.last_name.clone().into(),
            self.email.clone().into(),
            self.bio.clone().into(),
        ]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            bio: row.try_get("bio")?,
        })
    }
}

impl Table for Location {
    const TABLE: &'static str = "locations";
    const COLUMNS: &'static [&'static str] = &["name", "address", "room"];

    fn values(&self) -> Vec<Value> {
        vec![
            self.name.clone().into(),
            self.address.clone().into(),
            self.room.clone().into(),
        ]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            address: row.try_get("address")?,
            room: row.try_get("room")?,
        })
    }
}

impl Table for User {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &["email", "display_name", "password_hash", "role"];

    fn values(&self) -> Vec<Value> {
        vec![
            self.email.clone().into(),
            self.display_name.clone().into(),
            self.password_hash.clone().into(),
            self.role.as_str().into(),
        ]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let role: String = row.try_get("role")?;
        Ok(Self {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            display_name: row.try_get("display_name")?,
            password_hash: row.try_get("password_hash")?,
            role: role
                .parse::<Role>()
                .map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        })
    }
}

impl Table for Announcement {
    const TABLE: &'static str = "announcements";
    const COLUMNS: &'static [&'static str] = &["title", "body", "posted_at", "expires_at"];

    fn values(&self) -> Vec<Value> {
        vec![
            self.title.clone().into(),
            self.body.clone().into(),
            self.posted_at.into(),
            self.expires_at.into(),
        ]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            body: row.try_get("body")?,
            posted_at: row.try_get("posted_at")?,
            expires_at: row.try_get("expires_at")?,
        })
    }
}

#[async_trait]
impl Table for FitnessClass {
    const TABLE: &'static str = "fitness_classes";
    const COLUMNS: &'static [&'static str] = &[
        "fitness_class_type_id",
        "instructor_id",
        "location_id",
        "start_time",
        "end_time",
        "capacity",
        "cancelled",
    ];

    fn values(&self) -> Vec<Value> {
        vec![
            self.fitness_class_type_id.into(),
            self.instructor_id.into(),
            self.location_id.into(),
            self.start_time.into(),
            self.end_time.into(),
            self.capacity.into(),
            self.cancelled.into(),
        ]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            fitness_class_type_id: row.try_get("fitness_class_type_id")?,
            instructor_id: row.try_get("instructor_id")?,
            location_id: row.try_get("location_id")?,
            start_time: row.try_get("start_time")?,
            end_time: row.try_get("end_time")?,
            capacity: row.try_get("capacity")?,
            cancelled: row.try_get("cancelled")?,
            fitness_class_type: None,
            instructor: None,
            location: None,
        })
    }

    async fn attach(
        pool: &SqlitePool,
        rows: &mut [Self],
        include: FitnessClassInclude,
    ) -> Result<(), sqlx::Error> {
        match include {
            FitnessClassInclude::FitnessClassType => {
                let related: HashMap<_, FitnessClassType> =
                    fetch_by_ids(pool, rows.iter().map(|r| r.fitness_class_type_id)).await?;
                for row in rows.iter_mut() {
                    row.fitness_class_type = related.get(&row.fitness_class_type_id).cloned();
                }
            }
            FitnessClassInclude::Instructor => {
                let related: HashMap<_, Instructor> =
                    fetch_by_ids(pool, rows.iter().map(|r| r.instructor_id)).await?;
                for row in rows.iter_mut() {
                    row.instructor = related.get(&row.instructor_id).cloned();
                }
            }
            FitnessClassInclude::Location => {
                let related: HashMap<_, Location> =
                    fetch_by_ids(pool, rows.iter().map(|r| r.location_id)).await?;
                for row in rows.iter_mut() {
                    row.location = related.get(&row.location_id).cloned();
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Table for RegistrationRecord {
    const TABLE: &'static str = "registration_records";
    const COLUMNS: &'static [&'static str] = &["fitness_class_id", "user_id", "registered_at"];

    fn values(&self) -> Vec<Value> {
        vec![
            self.fitness_class_id.into(),
            self.user_id.into(),
            self.registered_at.into(),
        ]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            fitness_class_id: row.try_get("fitness_class_id")?,
            user_id: row.try_get("user_id")?,
            registered_at: row.try_get("registered_at")?,
            fitness_class: None,
            user: None,
        })
    }

    async fn attach(
        pool: &SqlitePool,
        rows: &mut [Self],
        include: RegistrationRecordInclude,
    ) -> Result<(), sqlx::Error> {
        match include {
            RegistrationRecordInclude::FitnessClass => {
                let related: HashMap<_, FitnessClass> =
                    fetch_by_ids(pool, rows.iter().map(|r| r.fitness_class_id)).await?;
                for row in rows.iter_mut() {
                    row.fitness_class = related.get(&row.fitness_class_id).cloned();
                }
            }
            RegistrationRecordInclude::User => {
                let related: HashMap<_, User> =
                    fetch_by_ids(pool, rows.iter().map(|r| r.user_id)).await?;
                for row in rows.iter_mut() {
                    row.user = related.get(&row.user_id).cloned();
                }
            }
        }
        Ok(())
    }
}
