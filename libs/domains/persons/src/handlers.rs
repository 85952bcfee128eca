use axum::{
    Router,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::entity;
use crate::error::HandlerError;
use crate::extractors::{JsonBody, PersonId};
use crate::models::Person;
use crate::repository::PersonRepository;
use crate::service::PersonService;

/// Public path of the collection, used for `Location` headers.
pub const PERSONS_PATH: &str = "/api/v1/persons";

/// OpenAPI documentation for Persons API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_persons,
        create_person,
        get_person,
        update_person,
        delete_person,
    ),
    components(schemas(Person)),
    tags(
        (name = entity::Model::TAG, description = "Person records")
    )
)]
pub struct ApiDoc;

/// Create the person router; mount it at [`entity::Model::URL`] under `/api`.
pub fn router<R: PersonRepository + 'static>(service: PersonService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_persons).post(create_person))
        .route(
            "/{personId}",
            get(get_person).patch(update_person).delete(delete_person),
        )
        .with_state(shared_service)
}

/// Serialize `value` before anything is written, so a failure still yields a clean 500.
fn json_response<T: Serialize>(value: &T) -> Result<Response, HandlerError> {
    let body = serde_json::to_vec(value).map_err(HandlerError::Encode)?;

    Ok((
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        )],
        body,
    )
        .into_response())
}

/// List all persons
#[utoipa::path(
    get,
    path = "",
    tag = entity::Model::TAG,
    responses(
        (status = 200, description = "All persons ordered by id", body = Vec<Person>),
        (status = 500, description = "can't get all persons", body = String, content_type = "text/plain")
    )
)]
async fn list_persons<R: PersonRepository>(
    State(service): State<Arc<PersonService<R>>>,
) -> Result<Response, HandlerError> {
    let persons = service.get_all_persons().await.map_err(|e| {
        HandlerError::usecase(
            StatusCode::INTERNAL_SERVER_ERROR,
            "can't get all persons",
            e,
        )
    })?;

    json_response(&persons)
}

/// Create a person
///
/// A non-zero `id` in the body is stored as given.
#[utoipa::path(
    post,
    path = "",
    tag = entity::Model::TAG,
    request_body = Person,
    responses(
        (status = 201, description = "Person created",
            headers(("Location" = String, description = "Path of the new person"))),
        (status = 400, description = "bad data / can't create person", body = String, content_type = "text/plain")
    )
)]
async fn create_person<R: PersonRepository>(
    State(service): State<Arc<PersonService<R>>>,
    JsonBody(mut person): JsonBody<Person>,
) -> Result<Response, HandlerError> {
    service.create_person(&mut person).await.map_err(|e| {
        HandlerError::usecase(StatusCode::BAD_REQUEST, "can't create person", e)
    })?;

    let location = format!("{}/{}", PERSONS_PATH, person.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)]).into_response())
}

/// Get a person by ID
#[utoipa::path(
    get,
    path = "/{personId}",
    tag = entity::Model::TAG,
    params(
        ("personId" = i32, Path, description = "Person ID")
    ),
    responses(
        (status = 200, description = "Person found", body = Person),
        (status = 404, description = "can't get person", body = String, content_type = "text/plain"),
        (status = 500, description = "unknown error", body = String, content_type = "text/plain")
    )
)]
async fn get_person<R: PersonRepository>(
    State(service): State<Arc<PersonService<R>>>,
    PersonId(id): PersonId,
) -> Result<Response, HandlerError> {
    let person = service
        .get_person(id)
        .await
        .map_err(|e| HandlerError::usecase(StatusCode::NOT_FOUND, "can't get person", e))?;

    json_response(&person)
}

/// Replace a person
///
/// Every field is overwritten; fields missing from the body are reset to
/// their zero value. The path id wins over any id in the body.
#[utoipa::path(
    patch,
    path = "/{personId}",
    tag = entity::Model::TAG,
    params(
        ("personId" = i32, Path, description = "Person ID")
    ),
    request_body = Person,
    responses(
        (status = 200, description = "Person updated", body = Person),
        (status = 400, description = "bad data", body = String, content_type = "text/plain"),
        (status = 404, description = "can't update person", body = String, content_type = "text/plain"),
        (status = 500, description = "unknown error", body = String, content_type = "text/plain")
    )
)]
async fn update_person<R: PersonRepository>(
    State(service): State<Arc<PersonService<R>>>,
    PersonId(id): PersonId,
    JsonBody(mut person): JsonBody<Person>,
) -> Result<Response, HandlerError> {
    person.id = id;

    service
        .update_person(&person)
        .await
        .map_err(|e| HandlerError::usecase(StatusCode::NOT_FOUND, "can't update person", e))?;

    json_response(&person)
}

/// Delete a person
#[utoipa::path(
    delete,
    path = "/{personId}",
    tag = entity::Model::TAG,
    params(
        ("personId" = i32, Path, description = "Person ID")
    ),
    responses(
        (status = 204, description = "Person deleted"),
        (status = 404, description = "can't delete person", body = String, content_type = "text/plain"),
        (status = 500, description = "unknown error", body = String, content_type = "text/plain")
    )
)]
async fn delete_person<R: PersonRepository>(
    State(service): State<Arc<PersonService<R>>>,
    PersonId(id): PersonId,
) -> Result<StatusCode, HandlerError> {
    service
        .delete_person(id)
        .await
        .map_err(|e| HandlerError::usecase(StatusCode::NOT_FOUND, "can't delete person", e))?;

    Ok(StatusCode::NO_CONTENT)
}
