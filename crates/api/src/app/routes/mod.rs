use axum::{
    Router,
    routing::{get, post},
};

pub mod system;
pub mod whatsapp;

pub fn router() -> Router {
    Router::new()
        .route("/", get(system::index))
        .route("/health", get(system::health))
        .route("/whatsapp", post(whatsapp::inbound))
}
