use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Persons API",
        version = "0.1.0",
        description = "CRUD API for person records"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = domain_persons::entity::Model::URL, api = domain_persons::ApiDoc)
    )
)]
pub struct ApiDoc;
