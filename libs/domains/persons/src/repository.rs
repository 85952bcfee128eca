use async_trait::async_trait;
use sea_orm::DbErr;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{PersonError, PersonResult};
use crate::models::Person;

/// Repository trait for Person persistence
///
/// Every failure carries the name of the method that produced it.
/// Absence of a row is always reported as [`PersonError::NotFound`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Insert `person` and write the assigned id back into it.
    ///
    /// A non-zero `person.id` is used as the row id instead of the sequence.
    async fn create(&self, person: &mut Person) -> PersonResult<()>;

    /// Get a person by ID
    async fn get(&self, id: i32) -> PersonResult<Person>;

    /// Overwrite every field of the row `person.id`, only if that row still exists.
    async fn update(&self, person: &Person) -> PersonResult<()>;

    /// Delete a person by ID; deleting a missing row is [`PersonError::NotFound`].
    async fn delete(&self, id: i32) -> PersonResult<()>;

    /// All persons ordered by id
    async fn get_all(&self) -> PersonResult<Vec<Person>>;
}

/// In-memory implementation, used by tests and local runs without a database
#[derive(Clone, Default)]
pub struct InMemoryPersonRepository {
    persons: Arc<RwLock<BTreeMap<i32, Person>>>,
}

impl InMemoryPersonRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Storage-kind failure, the same kind Postgres constraint violations map to.
fn storage_error(message: impl Into<String>) -> PersonError {
    PersonError::Storage(DbErr::Custom(message.into()))
}

#[async_trait]
impl PersonRepository for InMemoryPersonRepository {
    async fn create(&self, person: &mut Person) -> PersonResult<()> {
        let mut persons = self.persons.write().await;

        if person.is_new() {
            // Mirror a serial column: next id after the largest one in use.
            person.id = match persons.keys().next_back() {
                None => 1,
                Some(last) => last.checked_add(1).ok_or_else(|| {
                    storage_error("person id sequence exhausted")
                        .context("InMemoryPersonRepository::create")
                })?,
            };
        }
        if persons.contains_key(&person.id) {
            return Err(storage_error(format!("duplicate person id {}", person.id))
                .context("InMemoryPersonRepository::create"));
        }
        persons.insert(person.id, person.clone());

        tracing::debug!(person_id = person.id, "Stored person in memory");
        Ok(())
    }

    async fn get(&self, id: i32) -> PersonResult<Person> {
        let persons = self.persons.read().await;
        persons
            .get(&id)
            .cloned()
            .ok_or_else(|| PersonError::NotFound(id).context("InMemoryPersonRepository::get"))
    }

    async fn update(&self, person: &Person) -> PersonResult<()> {
        let mut persons = self.persons.write().await;
        match persons.get_mut(&person.id) {
            Some(stored) => {
                *stored = person.clone();
                Ok(())
            }
            None => Err(PersonError::NotFound(person.id).context("InMemoryPersonRepository::update")),
        }
    }

    async fn delete(&self, id: i32) -> PersonResult<()> {
        let mut persons = self.persons.write().await;
        persons
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| PersonError::NotFound(id).context("InMemoryPersonRepository::delete"))
    }

    async fn get_all(&self) -> PersonResult<Vec<Person>> {
        let persons = self.persons.read().await;
        Ok(persons.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::PersonBuilder;

    fn ann() -> Person {
        PersonBuilder::new()
            .with_name("Ann")
            .with_age(30)
            .with_address("A")
            .with_work("W")
            .build()
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryPersonRepository::new();

        let mut first = ann();
        repo.create(&mut first).await.unwrap();
        let mut second = ann();
        repo.create(&mut second).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_create_keeps_caller_supplied_id() {
        let repo = InMemoryPersonRepository::new();

        let mut person = PersonBuilder::new().with_id(42).with_name("Zed").build();
        repo.create(&mut person).await.unwrap();

        assert_eq!(person.id, 42);
        assert_eq!(repo.get(42).await.unwrap().name, "Zed");
    }

    #[tokio::test]
    async fn test_create_duplicate_id_is_storage_error() {
        let repo = InMemoryPersonRepository::new();

        let mut first = PersonBuilder::new().with_id(5).with_name("Ann").build();
        repo.create(&mut first).await.unwrap();

        let mut duplicate = PersonBuilder::new().with_id(5).with_name("Bo").build();
        let err = repo.create(&mut duplicate).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Storage);
        assert!(err.to_string().contains("InMemoryPersonRepository::create"));
        assert_eq!(repo.get(5).await.unwrap().name, "Ann");
    }

    #[tokio::test]
    async fn test_create_after_max_id_is_storage_error() {
        let repo = InMemoryPersonRepository::new();

        let mut last = PersonBuilder::new().with_id(i32::MAX).build();
        repo.create(&mut last).await.unwrap();

        let err = repo.create(&mut Person::default()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert_eq!(repo.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let repo = InMemoryPersonRepository::new();
        let err = repo.get(999).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("InMemoryPersonRepository::get"));
    }

    #[tokio::test]
    async fn test_update_overwrites_all_fields() {
        let repo = InMemoryPersonRepository::new();
        let mut person = ann();
        repo.create(&mut person).await.unwrap();

        let replacement = PersonBuilder::new().with_id(person.id).with_age(31).build();
        repo.update(&replacement).await.unwrap();

        assert_eq!(repo.get(person.id).await.unwrap(), replacement);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = InMemoryPersonRepository::new();
        let err = repo
            .update(&PersonBuilder::new().with_id(5).build())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let repo = InMemoryPersonRepository::new();
        let mut person = ann();
        repo.create(&mut person).await.unwrap();

        repo.delete(person.id).await.unwrap();
        assert!(repo.delete(person.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_get_all_ordered_by_id() {
        let repo = InMemoryPersonRepository::new();
        let mut late = PersonBuilder::new().with_id(10).build();
        let mut early = PersonBuilder::new().with_id(3).build();
        repo.create(&mut late).await.unwrap();
        repo.create(&mut early).await.unwrap();

        let ids: Vec<i32> = repo.get_all().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 10]);
    }
}
