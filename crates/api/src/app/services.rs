use std::sync::Arc;

use shopkeep_chat::{ChatService, Language};
use shopkeep_infra::{
    AppConfig, AuditLedger, InMemoryAuditLedger, InMemoryCatalogStore, JsonFileCatalogStore,
    JsonLinesAuditLedger, Registry, StoreError,
};

/// Shared application services, one instance per process.
#[derive(Debug, Clone)]
pub struct AppServices {
    chat: Arc<ChatService>,
}

impl AppServices {
    /// Wire the registry from JSON files and the ledger per config.
    pub fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        let store = JsonFileCatalogStore::new(&config.items_path, &config.suppliers_path);
        let registry = Arc::new(Registry::load(store)?);

        let ledger: Arc<dyn AuditLedger> = match &config.audit_log_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "audit ledger: json lines");
                Arc::new(JsonLinesAuditLedger::new(path))
            }
            None => {
                tracing::warn!("AUDIT_LOG_PATH not set; audit records kept in memory only");
                Arc::new(InMemoryAuditLedger::new())
            }
        };

        let language = Language::from_code(&config.default_language).unwrap_or(Language::He);
        let chat = ChatService::new(registry, ledger)
            .with_default_language(language)
            .with_flow_idle_timeout(config.flow_idle_timeout);

        Ok(Self {
            chat: Arc::new(chat),
        })
    }

    /// Everything in memory. Intended for tests/dev.
    pub fn in_memory(default_language: Language) -> Result<Self, StoreError> {
        let registry = Arc::new(Registry::load(InMemoryCatalogStore::new())?);
        let chat = ChatService::new(registry, Arc::new(InMemoryAuditLedger::new()))
            .with_default_language(default_language);
        Ok(Self {
            chat: Arc::new(chat),
        })
    }

    pub fn chat(&self) -> Arc<ChatService> {
        Arc::clone(&self.chat)
    }
}
