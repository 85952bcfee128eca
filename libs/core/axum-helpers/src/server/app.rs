use super::shutdown::{ShutdownCoordinator, coordinated_shutdown};
use axum::{
    Json, Router,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use core_config::server::ServerConfig;
use std::any::Any;
use std::io;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Plain-text response with `text/plain; charset=utf-8`.
fn plain_text(status: StatusCode, message: &str) -> Response {
    let mut response = (status, format!("{}\n", message)).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}

/// Fallback for unmatched routes.
pub async fn not_found() -> Response {
    plain_text(StatusCode::NOT_FOUND, "404 page not found")
}

/// Turn a handler panic into a 500 and log the payload.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };

    tracing::error!(panic = detail, "Handler panicked");
    plain_text(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
}

/// Creates a configured Axum router with common middleware and documentation.
///
/// This function sets up:
/// - OpenAPI JSON at `/api-docs/openapi.json` and Scalar UI at `/scalar`
/// - API routes nested under `/api`
/// - Request tracing and panic recovery
/// - Plain-text 404 fallback
///
/// Panics in handlers become 500 responses; the tracing layer sits outside the
/// panic layer so those requests are still logged. Neither layer touches
/// status codes or bodies produced by the handlers themselves.
///
/// Health endpoints (/health, /ready) belong outside `/api`; pass them to
/// [`create_router_with_root`] so they sit behind the same layers.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use utoipa::OpenApi;
/// use axum_helpers::server::create_router;
///
/// #[derive(OpenApi)]
/// #[openapi(paths(/* your paths */))]
/// struct ApiDoc;
///
/// // Routes with state already applied
/// let api_routes = Router::new()
///     .route("/example", get(handler))
///     .with_state(my_state);
///
/// let router = create_router::<ApiDoc>(api_routes);
/// ```
pub fn create_router<T>(apis: Router) -> Router
where
    T: OpenApi + 'static,
{
    create_router_with_root::<T>(apis, Router::new())
}

/// Like [`create_router`], with `root` routes mounted at the top level
/// (not under `/api`) before the middleware is applied.
///
/// # Example
/// ```ignore
/// let root = health_router(app_info!()).merge(ready_router(state));
/// let router = create_router_with_root::<ApiDoc>(api_routes, root);
/// ```
pub fn create_router_with_root<T>(apis: Router, root: Router) -> Router
where
    T: OpenApi + 'static,
{
    use utoipa_scalar::{Scalar, Servable as ScalarServable};

    Router::new()
        .route("/api-docs/openapi.json", get(|| async { Json(T::openapi()) }))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .nest("/api", apis)
        .merge(root)
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// Production-ready server with coordinated shutdown and cleanup.
///
/// On SIGINT/SIGTERM the listener stops accepting, in-flight requests are
/// allowed to finish, then `cleanup` runs bounded by `shutdown_timeout`.
///
/// # Example
/// ```ignore
/// use std::time::Duration;
/// use axum_helpers::server::create_production_app;
///
/// let cleanup = async move {
///     db.close().await.ok();
/// };
///
/// create_production_app(router, &config, Duration::from_secs(30), cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();
    let shutdown_handle = coordinator.clone();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    // Spawn cleanup task
    let cleanup_handle = tokio::spawn(async move {
        let mut shutdown_rx = shutdown_handle.subscribe();
        if !shutdown_handle.is_shutting_down() {
            let _ = shutdown_rx.recv().await;
        }

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(_) => info!("Cleanup completed successfully"),
            Err(_) => {
                tracing::warn!(
                    "Cleanup exceeded timeout of {:?}, forcing shutdown",
                    shutdown_timeout
                );
            }
        }
    });

    // Start server with graceful shutdown
    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(coordinated_shutdown(coordinator.clone()))
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    // A serve error ends the process too; release the cleanup task either way.
    coordinator.shutdown();
    cleanup_handle.await.ok();

    serve_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[derive(OpenApi)]
    #[openapi(info(title = "Test API", version = "0.0.1"))]
    struct TestDoc;

    fn api() -> Router {
        Router::new()
            .route("/ping", get(|| async { "pong" }))
            .route(
                "/boom",
                get(|| async {
                    if true {
                        panic!("kaboom");
                    }
                    "unreachable"
                }),
            )
    }

    async fn text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_api_routes_nested_under_api() {
        let app = create_router::<TestDoc>(api());
        let response = app
            .oneshot(Request::get("/api/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(text(response).await, "pong");
    }

    #[tokio::test]
    async fn test_unknown_route_is_plain_text_404() {
        let app = create_router::<TestDoc>(api());
        let response = app
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
        assert_eq!(text(response).await, "404 page not found\n");
    }

    #[tokio::test]
    async fn test_panic_becomes_500() {
        let app = create_router::<TestDoc>(api());
        let response = app
            .oneshot(Request::get("/api/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(text(response).await, "internal server error\n");
    }

    #[tokio::test]
    async fn test_root_routes_share_panic_recovery() {
        let root = Router::new()
            .route("/live", get(|| async { "ok" }))
            .route(
                "/flaky",
                get(|| async {
                    if true {
                        panic!("liveness check failed");
                    }
                    "unreachable"
                }),
            );
        let app = create_router_with_root::<TestDoc>(api(), root);

        let response = app
            .clone()
            .oneshot(Request::get("/live").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(text(response).await, "ok");

        let response = app
            .oneshot(Request::get("/flaky").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(text(response).await, "internal server error\n");
    }

    #[tokio::test]
    async fn test_openapi_json_served() {
        let app = create_router::<TestDoc>(api());
        let response = app
            .oneshot(
                Request::get("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let doc: serde_json::Value = serde_json::from_str(&text(response).await).unwrap();
        assert_eq!(doc["info"]["title"], "Test API");
    }
}
