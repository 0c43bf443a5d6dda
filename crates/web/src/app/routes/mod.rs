use axum::{
    routing::{get, post},
    Router,
};

pub mod pages;
pub mod session;
pub mod system;

/// Router for every page and endpoint served at the edge.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route(
            "/api/session",
            post(session::create_session).delete(session::clear_session),
        )
        .merge(pages::router())
}
