//! PgPersonRepository against a real PostgreSQL container.
//!
//! Run with `cargo test -p domain_persons -- --ignored` on a host with Docker.

use domain_persons::*;
use test_utils::{TestDataBuilder, TestDatabase};

fn person(builder: &TestDataBuilder, suffix: &str) -> Person {
    PersonBuilder::new()
        .with_name(builder.name("person", suffix))
        .with_age(builder.age())
        .with_address(builder.address(suffix))
        .with_work("Eng")
        .build()
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_then_get_round_trips() {
    let db = TestDatabase::new().await;
    let repo = PgPersonRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("pg_create_get");

    let mut created = person(&builder, "a");
    repo.create(&mut created).await.unwrap();
    assert_eq!(created.id, 1);

    let fetched = repo.get(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_missing_rows_are_not_found() {
    let db = TestDatabase::new().await;
    let repo = PgPersonRepository::new(db.connection());

    assert!(repo.get(999).await.unwrap_err().is_not_found());
    assert!(repo.delete(999).await.unwrap_err().is_not_found());
    assert!(
        repo.update(&PersonBuilder::new().with_id(999).build())
            .await
            .unwrap_err()
            .is_not_found()
    );
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_overwrites_every_column() {
    let db = TestDatabase::new().await;
    let repo = PgPersonRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("pg_update");

    let mut created = person(&builder, "a");
    repo.create(&mut created).await.unwrap();

    let replacement = PersonBuilder::new().with_id(created.id).with_age(31).build();
    repo.update(&replacement).await.unwrap();

    assert_eq!(repo.get(created.id).await.unwrap(), replacement);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_then_get_all() {
    let db = TestDatabase::new().await;
    let repo = PgPersonRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("pg_get_all");

    for suffix in ["a", "b", "c"] {
        repo.create(&mut person(&builder, suffix)).await.unwrap();
    }
    repo.delete(2).await.unwrap();
    assert!(repo.delete(2).await.unwrap_err().is_not_found());

    let ids: Vec<i32> = repo.get_all().await.unwrap().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_service_maps_storage_errors() {
    let db = TestDatabase::new().await;
    let service = PersonService::new(PgPersonRepository::new(db.connection()));

    let mut first = PersonBuilder::new().with_id(5).with_name("Ann").build();
    service.create_person(&mut first).await.unwrap();

    // Same explicit id again violates the primary key.
    let mut duplicate = PersonBuilder::new().with_id(5).with_name("Bo").build();
    let err = service.create_person(&mut duplicate).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Storage);
}
