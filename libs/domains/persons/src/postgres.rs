use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder};

use crate::{
    entity,
    error::{PersonError, PersonResult},
    models::Person,
    repository::PersonRepository,
};

/// PostgreSQL-backed repository over the `persons` table
#[derive(Clone)]
pub struct PgPersonRepository {
    db: DatabaseConnection,
}

impl PgPersonRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PersonRepository for PgPersonRepository {
    async fn create(&self, person: &mut Person) -> PersonResult<()> {
        let model = entity::ActiveModel::for_insert(person)
            .insert(&self.db)
            .await
            .map_err(|e| PersonError::from(e).context("PgPersonRepository::create"))?;

        person.id = model.id;
        tracing::info!(person_id = person.id, "Created person");
        Ok(())
    }

    async fn get(&self, id: i32) -> PersonResult<Person> {
        entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PersonError::from(e).context("PgPersonRepository::get"))?
            .map(Person::from)
            .ok_or_else(|| PersonError::NotFound(id).context("PgPersonRepository::get"))
    }

    async fn update(&self, person: &Person) -> PersonResult<()> {
        // UPDATE ... WHERE id = $1 RETURNING *; no returned row means it is gone.
        match entity::ActiveModel::for_update(person).update(&self.db).await {
            Ok(_) => {
                tracing::info!(person_id = person.id, "Updated person");
                Ok(())
            }
            Err(DbErr::RecordNotUpdated) => {
                Err(PersonError::NotFound(person.id).context("PgPersonRepository::update"))
            }
            Err(e) => Err(PersonError::from(e).context("PgPersonRepository::update")),
        }
    }

    async fn delete(&self, id: i32) -> PersonResult<()> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| PersonError::from(e).context("PgPersonRepository::delete"))?;

        if result.rows_affected == 0 {
            return Err(PersonError::NotFound(id).context("PgPersonRepository::delete"));
        }

        tracing::info!(person_id = id, "Deleted person");
        Ok(())
    }

    async fn get_all(&self) -> PersonResult<Vec<Person>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PersonError::from(e).context("PgPersonRepository::get_all"))?;

        Ok(models.into_iter().map(Person::from).collect())
    }
}
