use std::sync::Arc;
use tracing::instrument;

use crate::error::{PersonResult, ResultExt};
use crate::models::Person;
use crate::repository::PersonRepository;

/// Use cases over the person repository
#[derive(Clone)]
pub struct PersonService<R: PersonRepository> {
    repository: Arc<R>,
}

impl<R: PersonRepository> PersonService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Store a new person; `person.id` holds the assigned id afterwards.
    #[instrument(skip(self, person), fields(person_id = person.id))]
    pub async fn create_person(&self, person: &mut Person) -> PersonResult<()> {
        self.repository
            .create(person)
            .await
            .context("PersonService::create_person")
    }

    #[instrument(skip(self))]
    pub async fn get_person(&self, id: i32) -> PersonResult<Person> {
        self.repository
            .get(id)
            .await
            .context("PersonService::get_person")
    }

    /// Replace every field of an existing person.
    ///
    /// A single conditional write: a missing row surfaces as NotFound from the
    /// repository, with no separate existence lookup.
    #[instrument(skip(self, person), fields(person_id = person.id))]
    pub async fn update_person(&self, person: &Person) -> PersonResult<()> {
        self.repository
            .update(person)
            .await
            .context("PersonService::update_person")
    }

    #[instrument(skip(self))]
    pub async fn delete_person(&self, id: i32) -> PersonResult<()> {
        self.repository
            .delete(id)
            .await
            .context("PersonService::delete_person")
    }

    #[instrument(skip(self))]
    pub async fn get_all_persons(&self) -> PersonResult<Vec<Person>> {
        self.repository
            .get_all()
            .await
            .context("PersonService::get_all_persons")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, PersonError};
    use crate::models::PersonBuilder;
    use crate::repository::MockPersonRepository;
    use mockall::predicate::eq;
    use sea_orm::DbErr;

    fn storage_error() -> PersonError {
        PersonError::from(DbErr::Custom("connection reset".to_string()))
    }

    #[tokio::test]
    async fn test_create_person_returns_assigned_id() {
        let mut repo = MockPersonRepository::new();
        repo.expect_create()
            .withf(|p: &Person| p.name == "Ann" && p.id == 0)
            .times(1)
            .returning(|p: &mut Person| {
                p.id = 1;
                Ok(())
            });

        let service = PersonService::new(repo);
        let mut person = PersonBuilder::new().with_name("Ann").build();
        service.create_person(&mut person).await.unwrap();

        assert_eq!(person.id, 1);
    }

    #[tokio::test]
    async fn test_create_person_wraps_storage_error() {
        let mut repo = MockPersonRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|_| Err(storage_error().context("PgPersonRepository::create")));

        let service = PersonService::new(repo);
        let err = service
            .create_person(&mut Person::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Storage);
        assert!(
            err.to_string()
                .starts_with("PersonService::create_person: PgPersonRepository::create")
        );
    }

    #[tokio::test]
    async fn test_get_person_passes_through() {
        let mut repo = MockPersonRepository::new();
        repo.expect_get()
            .with(eq(5))
            .times(1)
            .returning(|id| Ok(PersonBuilder::new().with_id(id).with_name("Bo").build()));

        let service = PersonService::new(repo);
        let person = service.get_person(5).await.unwrap();
        assert_eq!(person.name, "Bo");
    }

    #[tokio::test]
    async fn test_get_person_not_found() {
        let mut repo = MockPersonRepository::new();
        repo.expect_get()
            .times(1)
            .returning(|id| Err(PersonError::NotFound(id)));

        let service = PersonService::new(repo);
        let err = service.get_person(999).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_person_writes_once_without_lookup() {
        let mut repo = MockPersonRepository::new();
        repo.expect_get().never();
        repo.expect_update()
            .withf(|p: &Person| p.id == 3 && p.age == 31)
            .times(1)
            .returning(|_| Ok(()));

        let service = PersonService::new(repo);
        let person = PersonBuilder::new().with_id(3).with_age(31).build();
        service.update_person(&person).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_person_missing_is_not_found() {
        let mut repo = MockPersonRepository::new();
        repo.expect_update()
            .times(1)
            .returning(|p| Err(PersonError::NotFound(p.id).context("PgPersonRepository::update")));

        let service = PersonService::new(repo);
        let err = service
            .update_person(&PersonBuilder::new().with_id(8).build())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "PersonService::update_person: PgPersonRepository::update: person 8 not found"
        );
    }

    #[tokio::test]
    async fn test_update_person_storage_error_is_not_not_found() {
        let mut repo = MockPersonRepository::new();
        repo.expect_update()
            .times(1)
            .returning(|_| Err(storage_error()));

        let service = PersonService::new(repo);
        let err = service
            .update_person(&PersonBuilder::new().with_id(8).build())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
    }

    #[tokio::test]
    async fn test_delete_person_single_storage_call() {
        let mut repo = MockPersonRepository::new();
        repo.expect_get().never();
        repo.expect_delete().with(eq(4)).times(1).returning(|_| Ok(()));

        let service = PersonService::new(repo);
        service.delete_person(4).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_person_missing_is_not_found() {
        let mut repo = MockPersonRepository::new();
        repo.expect_delete()
            .times(1)
            .returning(|id| Err(PersonError::NotFound(id)));

        let service = PersonService::new(repo);
        assert!(service.delete_person(4).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_get_all_persons_storage_error() {
        let mut repo = MockPersonRepository::new();
        repo.expect_get_all()
            .times(1)
            .returning(|| Err(storage_error()));

        let service = PersonService::new(repo);
        let err = service.get_all_persons().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
    }

    #[tokio::test]
    async fn test_get_all_persons_empty() {
        let mut repo = MockPersonRepository::new();
        repo.expect_get_all().times(1).returning(|| Ok(Vec::new()));

        let service = PersonService::new(repo);
        assert!(service.get_all_persons().await.unwrap().is_empty());
    }
}
