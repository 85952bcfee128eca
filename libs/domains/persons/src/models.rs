use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A person record.
///
/// Every field falls back to its zero value when absent from a JSON payload,
/// so an update body replaces the whole record. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Person {
    /// Storage-assigned identifier; 0 means "not yet assigned"
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Ada")]
    pub name: String,
    #[schema(example = 36)]
    pub age: i32,
    #[schema(example = "12 Baker St")]
    pub address: String,
    #[schema(example = "Engineer")]
    pub work: String,
}

impl Person {
    /// True when the record has not been stored yet.
    pub fn is_new(&self) -> bool {
        self.id == 0
    }
}

/// Fluent constructor for [`Person`] values.
#[derive(Debug, Clone, Default)]
pub struct PersonBuilder {
    person: Person,
}

impl PersonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.person.id = id;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.person.name = name.into();
        self
    }

    pub fn with_age(mut self, age: i32) -> Self {
        self.person.age = age;
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.person.address = address.into();
        self
    }

    pub fn with_work(mut self, work: impl Into<String>) -> Self {
        self.person.work = work.into();
        self
    }

    pub fn build(self) -> Person {
        self.person
    }
}
