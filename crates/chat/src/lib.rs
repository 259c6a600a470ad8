//! Conversational layer.
//!
//! Turns one inbound chat message into one reply: resolves locale keywords,
//! routes to a command or the sender's pending flow, commits through the
//! shared catalog registry, and renders the outcome in the sender's language.
//!
//! Transport is not handled here; see the `api` crate.

pub mod conversation;
pub mod dispatcher;
pub mod flows;
pub mod locale;
pub mod outcome;
pub mod parse;
pub mod renderer;
pub mod service;

pub use conversation::{BufferedEntry, Conversation, Mode, MultiBuffer};
pub use flows::{FlowContext, PendingFlow, Transition};
pub use locale::{CanonicalCommand, Language};
pub use outcome::{ChatError, ItemRow, Outcome, SupplierChoice};
pub use renderer::render;
pub use service::ChatService;
