use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::entity::prelude::*;

use crate::models::Person;

/// Sea-ORM entity for the `persons` table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "persons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    pub age: i32,
    #[sea_orm(column_type = "Text")]
    pub address: String,
    #[sea_orm(column_type = "Text")]
    pub work: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Mount point of the HTTP resource, relative to `/api`
    pub const URL: &'static str = "/v1/persons";
    /// OpenAPI tag
    pub const TAG: &'static str = "persons";
}

impl From<Model> for Person {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            age: model.age,
            address: model.address,
            work: model.work,
        }
    }
}

impl ActiveModel {
    /// Insert model. A non-zero id is written as given, zero leaves it to the sequence.
    pub fn for_insert(person: &Person) -> Self {
        Self {
            id: if person.is_new() {
                NotSet
            } else {
                Set(person.id)
            },
            name: Set(person.name.clone()),
            age: Set(person.age),
            address: Set(person.address.clone()),
            work: Set(person.work.clone()),
        }
    }

    /// Update model that overwrites every non-key column of row `person.id`.
    pub fn for_update(person: &Person) -> Self {
        Self {
            id: Unchanged(person.id),
            name: Set(person.name.clone()),
            age: Set(person.age),
            address: Set(person.address.clone()),
            work: Set(person.work.clone()),
        }
    }
}
