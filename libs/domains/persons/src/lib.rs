//! Persons Domain
//!
//! CRUD over person records: storage, use cases and the HTTP surface.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP decoding/encoding, status mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Use cases, error context
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Person record
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_persons::{handlers, PersonService, PgPersonRepository};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//!
//! let service = PersonService::new(PgPersonRepository::new(db));
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ErrorKind, HandlerError, PersonError, PersonResult};
pub use handlers::{ApiDoc, PERSONS_PATH};
pub use models::{Person, PersonBuilder};
pub use postgres::PgPersonRepository;
pub use repository::{InMemoryPersonRepository, PersonRepository};
pub use service::PersonService;
