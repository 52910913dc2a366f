//! Repository behaviour against an in-memory SQLite store.

use chrono::Duration;
use fitnessapp_domain::{
    Announcement, Direction, Entity, FitnessClass, FitnessClassInclude, Instructor, Location,
    LocationColumn, Predicate, RegistrationRecord, RegistrationRecordInclude, Role, User,
};

use super::Repository;
use crate::infrastructure::persistence::Database;
use crate::infrastructure::ports::RepoError;
use crate::test_fixtures::{at, memory_db, repository, seed_catalog};

fn studio(name: &str) -> Location {
    Location::new(name, "1 Main St", "Ground floor")
}

async fn locations() -> (Database, Repository<Location>) {
    let db = memory_db().await;
    let repo = repository::<Location>(&db);
    (db, repo)
}

#[tokio::test]
async fn insert_assigns_identity_and_round_trips() {
    let (_db, repo) = locations().await;
    let mut location = studio("Studio A");

    repo.insert(&mut location).await.unwrap();

    assert!(location.id > 0);
    let found = repo.find_by_id(location.id, &[]).await.unwrap();
    assert_eq!(found, Some(location));
}

#[tokio::test]
async fn insert_of_persisted_entity_updates_in_place() {
    let (_db, repo) = locations().await;
    let mut location = studio("Studio A");
    repo.insert(&mut location).await.unwrap();
    let id = location.id;

    location.room = "Basement".to_string();
    repo.insert(&mut location).await.unwrap();

    assert_eq!(location.id, id);
    let found = repo.find_by_id(id, &[]).await.unwrap().unwrap();
    assert_eq!(found.room, "Basement");
    assert_eq!(repo.all(&[]).count().await.unwrap(), 1);
}

#[tokio::test]
async fn insert_of_unknown_identity_is_stale() {
    let (_db, repo) = locations().await;
    let mut location = studio("Studio A");
    location.id = 42;

    let err = repo.insert(&mut location).await.unwrap_err();
    assert!(matches!(err, RepoError::Stale { id: 42, .. }));
}

#[tokio::test]
async fn delete_of_missing_id_is_a_noop_that_still_commits() {
    let (db, repo) = locations().await;
    let before = db.commit_count();

    repo.delete(999).await.unwrap();

    assert_eq!(db.commit_count(), before + 1);
}

#[tokio::test]
async fn delete_by_id_removes_the_row() {
    let (db, repo) = locations().await;
    let mut location = studio("Studio A");
    repo.insert(&mut location).await.unwrap();
    let before = db.commit_count();

    repo.delete(location.id).await.unwrap();

    assert_eq!(repo.find_by_id(location.id, &[]).await.unwrap(), None);
    assert_eq!(db.commit_count(), before + 2);
}

#[tokio::test]
async fn delete_entity_removes_the_row() {
    let (_db, repo) = locations().await;
    let mut location = studio("Studio A");
    repo.insert(&mut location).await.unwrap();

    repo.delete_entity(&location).await.unwrap();

    assert_eq!(repo.find_by_id(location.id, &[]).await.unwrap(), None);
    let again = repo.delete_entity(&location).await.unwrap_err();
    assert!(matches!(again, RepoError::Stale { .. }));
}

#[tokio::test]
async fn insert_range_creates_distinct_records_with_one_extra_commit() {
    let (db, repo) = locations().await;
    let mut batch: Vec<Location> = (1..=4).map(|n| studio(&format!("Studio {n}"))).collect();
    let before = db.commit_count();

    repo.insert_range(&mut batch).await.unwrap();

    let mut ids: Vec<i64> = batch.iter().map(|l| l.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 4);
    assert!(ids.iter().all(|id| *id > 0));
    assert_eq!(repo.all(&[]).count().await.unwrap(), 4);
    assert_eq!(db.commit_count(), before + 5);
}

#[tokio::test]
async fn insert_range_failure_keeps_earlier_elements() {
    let (_db, repo) = locations().await;
    let mut batch = vec![
        studio("Studio A"),
        studio("Studio B"),
        studio("Studio A"),
        studio("Studio C"),
    ];

    let err = repo.insert_range(&mut batch).await.unwrap_err();
    assert!(err.is_constraint());

    let names: Vec<String> = repo
        .all(&[])
        .order_by(LocationColumn::Name, Direction::Asc)
        .fetch_all()
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.name)
        .collect();
    assert_eq!(names, vec!["Studio A", "Studio B"]);
    assert!(batch[2].is_transient());
    assert!(batch[3].is_transient());
}

#[tokio::test]
async fn find_returns_exactly_the_matching_subset() {
    let (_db, repo) = locations().await;
    let mut batch = vec![
        studio("Yoga Loft"),
        studio("Studio B"),
        studio("Pool"),
        studio("Studio A"),
    ];
    repo.insert_range(&mut batch).await.unwrap();

    let mut names: Vec<String> = repo
        .find(Predicate::like(LocationColumn::Name, "Studio%"), &[])
        .fetch_all()
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.name)
        .collect();
    names.sort();

    assert_eq!(names, vec!["Studio A", "Studio B"]);
}

#[tokio::test]
async fn queries_compose_ordering_and_window() {
    let (_db, repo) = locations().await;
    let mut batch: Vec<Location> = ["D", "B", "A", "C"].iter().map(|n| studio(n)).collect();
    repo.insert_range(&mut batch).await.unwrap();

    let page: Vec<String> = repo
        .all(&[])
        .order_by(LocationColumn::Name, Direction::Desc)
        .skip(1)
        .take(2)
        .fetch_all()
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.name)
        .collect();

    assert_eq!(page, vec!["C", "B"]);
    assert!(repo
        .find(Predicate::eq(LocationColumn::Name, "A"), &[])
        .exists()
        .await
        .unwrap());
    assert!(!repo
        .find(Predicate::eq(LocationColumn::Name, "Z"), &[])
        .exists()
        .await
        .unwrap());
}

#[tokio::test]
async fn create_ignores_incoming_identity() {
    let (_db, repo) = locations().await;
    let mut location = studio("Studio A");
    location.id = 77;

    let created = repo.create(location).await.unwrap();

    assert_ne!(created.id, 77);
    assert!(created.id > 0);
}

#[tokio::test]
async fn update_requires_a_persisted_identity() {
    let (_db, repo) = locations().await;

    let transient = repo.update(studio("Studio A")).await.unwrap_err();
    assert!(matches!(transient, RepoError::InvalidOperation(_)));

    let mut missing = studio("Studio A");
    missing.id = 5;
    let stale = repo.update(missing).await.unwrap_err();
    assert!(matches!(stale, RepoError::Stale { id: 5, .. }));
}

#[tokio::test]
async fn batch_commits_every_write_together() {
    let (db, repo) = locations().await;
    let existing = repo.create(studio("Old")).await.unwrap();
    let mut renamed = repo.create(studio("Keep")).await.unwrap();
    renamed.name = "Renamed".to_string();
    let before = db.commit_count();

    let written = repo
        .batch()
        .create(studio("New"))
        .update(renamed.clone())
        .delete(existing.id)
        .commit()
        .await
        .unwrap();

    assert_eq!(db.commit_count(), before + 1);
    assert_eq!(written.len(), 2);
    assert!(written[0].id > 0);
    assert_eq!(written[1], renamed);
    assert_eq!(repo.find_by_id(existing.id, &[]).await.unwrap(), None);
}

#[tokio::test]
async fn failed_batch_writes_nothing() {
    let (db, repo) = locations().await;
    let before = db.commit_count();

    let mut vanished = studio("Vanished");
    vanished.id = 404;
    let err = repo
        .batch()
        .create(studio("Studio A"))
        .update(vanished)
        .commit()
        .await
        .unwrap_err();

    assert!(matches!(err, RepoError::Stale { id: 404, .. }));
    assert_eq!(repo.all(&[]).count().await.unwrap(), 0);
    assert_eq!(db.commit_count(), before);
}

#[tokio::test]
async fn batch_delete_of_missing_id_matches_single_delete() {
    let (db, repo) = locations().await;
    repo.delete(404).await.unwrap();
    let before = db.commit_count();

    let written = repo
        .batch()
        .create(studio("Studio A"))
        .delete(404)
        .commit()
        .await
        .unwrap();

    assert_eq!(written.len(), 1);
    assert_eq!(repo.all(&[]).count().await.unwrap(), 1);
    assert_eq!(db.commit_count(), before + 1);
}

#[tokio::test]
async fn dropped_batch_writes_nothing() {
    let (_db, repo) = locations().await;

    let batch = repo.batch().create(studio("Studio A"));
    assert_eq!(batch.len(), 1);
    drop(batch);

    assert!(repo.batch().is_empty());
    assert_eq!(repo.all(&[]).count().await.unwrap(), 0);
}

#[tokio::test]
async fn includes_attach_only_the_named_relations() {
    let db = memory_db().await;
    let catalog = seed_catalog(&db).await;
    let classes = repository::<FitnessClass>(&db);
    let start = at(2030, 3, 1, 9);
    let class = classes
        .create(FitnessClass::new(
            catalog.class_type.id,
            catalog.instructor.id,
            catalog.location.id,
            start,
            start + Duration::hours(1),
            10,
        ))
        .await
        .unwrap();

    let plain = classes.find_by_id(class.id, &[]).await.unwrap().unwrap();
    assert!(plain.instructor.is_none());

    let partial = classes
        .find_by_id(class.id, &[FitnessClassInclude::Instructor])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(partial.instructor, Some(catalog.instructor.clone()));
    assert!(partial.location.is_none());

    let full = classes
        .find_by_id(class.id, &FitnessClassInclude::ALL)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(full.fitness_class_type, Some(catalog.class_type.clone()));
    assert_eq!(full.location, Some(catalog.location.clone()));
}

#[tokio::test]
async fn referenced_catalog_rows_cannot_be_deleted() {
    let db = memory_db().await;
    let catalog = seed_catalog(&db).await;
    let classes = repository::<FitnessClass>(&db);
    let start = at(2030, 3, 1, 9);
    classes
        .create(FitnessClass::new(
            catalog.class_type.id,
            catalog.instructor.id,
            catalog.location.id,
            start,
            start + Duration::hours(1),
            10,
        ))
        .await
        .unwrap();

    let err = repository::<Instructor>(&db)
        .delete(catalog.instructor.id)
        .await
        .unwrap_err();
    assert!(err.is_constraint());
}

#[tokio::test]
async fn registrations_follow_their_class() {
    let db = memory_db().await;
    let catalog = seed_catalog(&db).await;
    let classes = repository::<FitnessClass>(&db);
    let users = repository::<User>(&db);
    let registrations = repository::<RegistrationRecord>(&db);

    let start = at(2030, 3, 1, 9);
    let class = classes
        .create(FitnessClass::new(
            catalog.class_type.id,
            catalog.instructor.id,
            catalog.location.id,
            start,
            start + Duration::hours(1),
            10,
        ))
        .await
        .unwrap();
    let user = users
        .create(User::new("Ana@Example.com ", "Ana", "hash", Role::Member))
        .await
        .unwrap();
    registrations
        .create(RegistrationRecord::new(class.id, user.id, at(2030, 2, 1, 8)))
        .await
        .unwrap();

    assert_eq!(registrations.count_for_class(class.id).await.unwrap(), 1);
    let counts = registrations.counts_by_class(&[class.id, 999]).await.unwrap();
    assert_eq!(counts.get(&class.id), Some(&1));
    assert_eq!(counts.get(&999), None);

    let mine = registrations
        .for_user(user.id, &[RegistrationRecordInclude::FitnessClass])
        .fetch_all()
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].fitness_class.as_ref().map(|c| c.id), Some(class.id));

    let duplicate = registrations
        .create(RegistrationRecord::new(class.id, user.id, at(2030, 2, 2, 8)))
        .await
        .unwrap_err();
    assert!(duplicate.is_constraint());

    classes.delete(class.id).await.unwrap();
    assert_eq!(registrations.all(&[]).count().await.unwrap(), 0);

    let found = users.find_by_email("ana@example.com").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(user.id));
}

#[tokio::test]
async fn upcoming_and_active_filters_use_the_given_instant() {
    let db = memory_db().await;
    let catalog = seed_catalog(&db).await;
    let classes = repository::<FitnessClass>(&db);
    let announcements = repository::<Announcement>(&db);
    let now = at(2030, 3, 1, 12);

    for hour in [8, 14, 10, 16] {
        let start = at(2030, 3, 1, hour);
        classes
            .create(FitnessClass::new(
                catalog.class_type.id,
                catalog.instructor.id,
                catalog.location.id,
                start,
                start + Duration::hours(1),
                10,
            ))
            .await
            .unwrap();
    }

    let upcoming: Vec<_> = classes
        .upcoming(now, &[])
        .fetch_all()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.start_time)
        .collect();
    assert_eq!(upcoming, vec![at(2030, 3, 1, 14), at(2030, 3, 1, 16)]);
    assert_eq!(classes.schedule(&[]).count().await.unwrap(), 4);

    announcements
        .create(
            Announcement::new("Old", "gone", at(2030, 1, 1, 9)).expiring_at(at(2030, 2, 1, 9)),
        )
        .await
        .unwrap();
    announcements
        .create(Announcement::new("Open", "no expiry", at(2030, 2, 1, 9)))
        .await
        .unwrap();
    announcements
        .create(
            Announcement::new("Soon", "expires later", at(2030, 2, 15, 9))
                .expiring_at(at(2030, 4, 1, 9)),
        )
        .await
        .unwrap();

    let titles: Vec<String> = announcements
        .active(now)
        .fetch_all()
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.title)
        .collect();
    assert_eq!(titles, vec!["Soon", "Open"]);
    assert_eq!(announcements.newest_first().count().await.unwrap(), 3);
}
