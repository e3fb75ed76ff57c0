//! HTTP inbound adapter exposing REST endpoints.
//!
//! Routes live under `/api/v1`; every resource is served by the generic
//! handlers in [`resources`].

pub mod error;
pub mod health;
pub mod products;
pub mod resources;
pub mod state;
pub mod users;
pub mod validation;

use actix_web::{Scope, web};

use crate::domain::{Products, Users};

pub use error::{ApiResult, ErrorEnvelope, ErrorItem};
pub use resources::{DataEnvelope, HttpResource, RecordBody, ResourceRoutes};

/// Path prefix for the versioned API.
pub const API_PREFIX: &str = "/api/v1";

/// The `/api/v1` scope with product and user routes and envelope-aware
/// extractor configuration.
///
/// Callers register `HttpState<Products>` and `HttpState<Users>` as app data.
pub fn api_scope() -> Scope {
    web::scope(API_PREFIX)
        .app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(ResourceRoutes::<Products>::scope())
        .service(ResourceRoutes::<Users>::scope())
}
