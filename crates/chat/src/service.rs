//! Chat service: one inbound message in, one reply out.
//!
//! ```text
//! (sender, text)
//!   ↓
//! 1. Lock the sender's conversation (created on first contact)
//!   ↓
//! 2. Drop a stale pending flow (if an idle timeout is configured)
//!   ↓
//! 3. Dispatch → Outcome (commits through the shared registry)
//!   ↓
//! 4. Render in the conversation's language (after any switch)
//! ```

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use shopkeep_core::SenderId;
use shopkeep_infra::{AuditLedger, CatalogRepository, SessionStore};

use crate::conversation::Conversation;
use crate::dispatcher;
use crate::flows::FlowContext;
use crate::locale::Language;
use crate::renderer;

pub struct ChatService {
    repository: Arc<dyn CatalogRepository>,
    ledger: Arc<dyn AuditLedger>,
    sessions: SessionStore<Conversation>,
    default_language: Language,
    flow_idle_timeout: Option<Duration>,
}

impl ChatService {
    pub fn new(repository: Arc<dyn CatalogRepository>, ledger: Arc<dyn AuditLedger>) -> Self {
        Self {
            repository,
            ledger,
            sessions: SessionStore::new(),
            default_language: Language::He,
            flow_idle_timeout: None,
        }
    }

    /// Language for senders seen for the first time.
    pub fn with_default_language(mut self, language: Language) -> Self {
        self.default_language = language;
        self
    }

    /// Abandon pending flows idle for longer than `timeout`. `None` keeps them forever.
    pub fn with_flow_idle_timeout(mut self, timeout: Option<std::time::Duration>) -> Self {
        self.flow_idle_timeout = timeout.and_then(|t| Duration::from_std(t).ok());
        self
    }

    pub fn handle(&self, sender: &str, text: &str) -> String {
        self.handle_at(sender, text, Utc::now())
    }

    /// Handle a message as if it arrived at `now`.
    pub fn handle_at(&self, sender: &str, text: &str, now: DateTime<Utc>) -> String {
        let sender = SenderId::new(sender);
        let span = tracing::info_span!("inbound", sender = %sender.masked());
        let _enter = span.enter();

        let default_language = self.default_language;
        self.sessions.with_session(
            &sender,
            || Conversation::new(sender.clone(), default_language, now),
            |conversation| {
                if let Some(ttl) = self.flow_idle_timeout {
                    if conversation.expire_stale_flow(now, ttl) {
                        tracing::warn!("stale flow dropped");
                    }
                }

                let ctx = FlowContext {
                    repository: &*self.repository,
                    ledger: &*self.ledger,
                    sender: &sender,
                    now,
                };
                let outcome = dispatcher::dispatch(conversation, text, &ctx);
                conversation.touch(now);

                if let Some(error) = outcome.error() {
                    tracing::debug!(?error, "input rejected");
                }
                renderer::render(&outcome, conversation.language)
            },
        )
    }

    /// Copy of a sender's conversation state, if they have written before.
    pub fn conversation(&self, sender: &str) -> Option<Conversation> {
        self.sessions.get(&SenderId::new(sender))
    }
}

impl std::fmt::Debug for ChatService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatService")
            .field("sessions", &self.sessions.len())
            .field("default_language", &self.default_language)
            .field("flow_idle_timeout", &self.flow_idle_timeout)
            .finish()
    }
}
