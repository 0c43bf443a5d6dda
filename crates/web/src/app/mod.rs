//! HTTP application wiring (Axum router + middleware).
//!
//! - `routes/`: page shells, session endpoints, health
//! - `dto.rs`: request/response bodies
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use crate::{config::WebConfig, middleware};

pub mod dto;
pub mod errors;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// The edge gate wraps every route, so no page handler runs before the
/// cookie check has allowed the request.
pub fn build_app(config: WebConfig) -> Router {
    routes::router().layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn(middleware::edge_gate))
            .layer(Extension(Arc::new(config))),
    )
}
