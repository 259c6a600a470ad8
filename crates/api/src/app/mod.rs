//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: registry, audit ledger and chat service wiring
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: webhook form payload and TwiML reply mapping

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

pub mod dto;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(services: Arc<AppServices>) -> Router {
    routes::router()
        .layer(Extension(services))
        .layer(ServiceBuilder::new())
}
