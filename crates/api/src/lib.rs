//! HTTP transport: receives chat webhooks and replies with TwiML.

pub mod app;
