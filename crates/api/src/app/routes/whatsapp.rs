use std::sync::Arc;

use axum::{
    Form,
    extract::Extension,
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::app::dto::{self, InboundMessage};
use crate::app::services::AppServices;

/// Webhook: one inbound message → one TwiML reply.
///
/// The chat service blocks on per-sender and registry locks, so it runs on
/// the blocking pool.
pub async fn inbound(
    Extension(services): Extension<Arc<AppServices>>,
    Form(message): Form<InboundMessage>,
) -> axum::response::Response {
    let chat = services.chat();
    let handled = tokio::task::spawn_blocking(move || {
        let sender = message.sender().to_string();
        chat.handle(&sender, &message.body)
    })
    .await;

    match handled {
        Ok(reply) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/xml")],
            dto::twiml(&reply),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "chat handler failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
