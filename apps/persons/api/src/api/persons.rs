use axum::Router;
use domain_persons::{PersonService, PgPersonRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgPersonRepository::new(state.db.clone());
    let service = PersonService::new(repository);
    handlers::router(service)
}
