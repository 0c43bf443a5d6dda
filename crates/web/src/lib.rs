//! Storefront HTTP edge: request gate, page shells and session cookies.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
