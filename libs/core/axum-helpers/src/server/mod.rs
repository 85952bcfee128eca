//! Server infrastructure module.
//!
//! This module provides:
//! - Application setup with OpenAPI documentation
//! - Health and readiness endpoints
//! - Graceful shutdown coordination
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router_with_root, health_router};
//! use core_config::{server::ServerConfig, app_info};
//!
//! // API routes under /api, health endpoints at the root, one middleware stack
//! let app = create_router_with_root::<ApiDoc>(api_routes, health_router(app_info!()));
//!
//! // Start server with graceful shutdown
//! create_production_app(app, &ServerConfig::default(), Duration::from_secs(30), async {}).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

// Re-export commonly used types and functions
pub use app::{create_production_app, create_router, create_router_with_root};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::ShutdownCoordinator;
