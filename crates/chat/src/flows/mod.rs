//! Multi-turn flow engines.
//!
//! Each engine is a pure step function `(state, input, context) -> Transition`.
//! A transition names the conversation's next [`Mode`] and the outcome to
//! render; the dispatcher installs both. Engines read the catalog through a
//! snapshot and mutate it only through [`FlowContext::commit`].

pub mod edit;
pub mod language;
pub mod multi;
pub mod new_item;
pub mod preferences;
pub mod supplier_add;
pub mod supplier_view;

use chrono::{DateTime, Utc};

use shopkeep_core::SenderId;
use shopkeep_infra::{AuditLedger, AuditRecord, AuditStatus, CatalogRepository};
use shopkeep_inventory::{Catalog, CatalogCommand, CatalogEvent};

use crate::conversation::{Mode, MultiBuffer};
use crate::locale::{self, Confirmation, Language};
use crate::outcome::{ChatError, Outcome};

pub use edit::{EditState, EditStep};
pub use language::LanguageState;
pub use new_item::{NewItemState, NewItemStep};
pub use preferences::{PreferencesState, PreferencesStep};
pub use supplier_add::{SupplierAddState, SupplierAddStep};
pub use supplier_view::SupplierViewState;

/// The flow a conversation is currently inside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingFlow {
    NewItem(NewItemState),
    Edit(EditState),
    Language(LanguageState),
    Preferences(PreferencesState),
    SupplierAdd(SupplierAddState),
    SupplierView(SupplierViewState),
}

macro_rules! impl_into_pending {
    ($($state:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$state> for PendingFlow {
                fn from(state: $state) -> Self {
                    PendingFlow::$variant(state)
                }
            }
        )*
    };
}

impl_into_pending! {
    NewItemState => NewItem,
    EditState => Edit,
    LanguageState => Language,
    PreferencesState => Preferences,
    SupplierAddState => SupplierAdd,
    SupplierViewState => SupplierView,
}

/// A flow state that can re-show its current prompt.
pub trait FlowState: Into<PendingFlow> {
    fn prompt(&self) -> Outcome;
}

/// Result of one step: next mode, outcome, and an optional language switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub mode: Mode,
    pub outcome: Outcome,
    pub language: Option<Language>,
}

impl Transition {
    pub fn idle(outcome: Outcome) -> Self {
        Self {
            mode: Mode::Idle,
            outcome,
            language: None,
        }
    }

    pub fn flow(state: impl Into<PendingFlow>, outcome: Outcome) -> Self {
        Self {
            mode: Mode::Flow(state.into()),
            outcome,
            language: None,
        }
    }

    /// Enter (or stay at) `state`, showing its prompt.
    pub fn prompt<S: FlowState>(state: S) -> Self {
        let outcome = state.prompt();
        Self::flow(state, outcome)
    }

    /// Stay at `state`: error line, then the same prompt again.
    pub fn reprompt<S: FlowState>(state: S, error: ChatError) -> Self {
        let outcome = Outcome::rejected_with_prompt(error, state.prompt());
        Self::flow(state, outcome)
    }

    /// A commit from inside a flow failed.
    ///
    /// If the item the flow is about is gone the flow cannot continue;
    /// anything else keeps the flow at its step so the user can retry.
    pub fn commit_failed<S: FlowState>(state: S, error: ChatError) -> Self {
        match error {
            ChatError::UnknownItem(_) => Self::idle(Outcome::rejected(error)),
            other => Self::reprompt(state, other),
        }
    }

    pub fn multi(buffer: MultiBuffer, outcome: Outcome) -> Self {
        Self {
            mode: Mode::Multi(buffer),
            outcome,
            language: None,
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }
}

/// What the current message means to a flow step.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Input<'t> {
    Cancel,
    Back,
    Yes,
    No,
    Text(&'t str),
}

/// Classify input for menu and confirmation steps.
pub(crate) fn classify(text: &str) -> Input<'_> {
    let text = text.trim();
    if locale::is_cancel(text) {
        return Input::Cancel;
    }
    if locale::is_back(text) {
        return Input::Back;
    }
    match locale::confirmation(text) {
        Some(Confirmation::Yes) => Input::Yes,
        Some(Confirmation::No) => Input::No,
        None => Input::Text(text),
    }
}

/// Classify input for free-text steps, where yes/no are ordinary text.
pub(crate) fn classify_text(text: &str) -> Input<'_> {
    match classify(text) {
        Input::Yes | Input::No => Input::Text(text.trim()),
        other => other,
    }
}

/// Collaborators available to flow engines for one message.
pub struct FlowContext<'a> {
    pub repository: &'a dyn CatalogRepository,
    pub ledger: &'a dyn AuditLedger,
    pub sender: &'a SenderId,
    pub now: DateTime<Utc>,
}

impl FlowContext<'_> {
    pub fn snapshot(&self) -> Result<Catalog, ChatError> {
        self.repository.snapshot().map_err(|e| {
            tracing::error!(error = %e, "catalog snapshot failed");
            ChatError::from(&e)
        })
    }

    /// Commit a batch atomically.
    pub fn commit(&self, commands: &[CatalogCommand]) -> Result<Vec<CatalogEvent>, ChatError> {
        self.repository.execute(commands).map_err(|e| {
            tracing::warn!(error = %e, commands = commands.len(), "catalog commit rejected");
            ChatError::from(&e)
        })
    }

    /// Append audit records for an already committed change.
    ///
    /// Failures are logged; the catalog change stands.
    pub fn audit(&self, records: &[AuditRecord]) {
        if records.is_empty() {
            return;
        }
        if let Err(e) = self.ledger.append(records) {
            tracing::error!(error = %e, records = records.len(), "audit append failed");
        }
    }

    /// Audit record for an item as it appears in `catalog`.
    pub fn record_for(
        &self,
        catalog: &Catalog,
        item: &str,
        quantity: u32,
        status: AuditStatus,
    ) -> Option<AuditRecord> {
        let found = catalog.find_item(item)?;
        let supplier = found
            .supplier_id
            .and_then(|id| catalog.supplier(id))
            .map(|s| s.company_name.clone());
        Some(AuditRecord::new(
            self.now,
            found.name.clone(),
            quantity,
            status,
            found.item_type,
            self.sender.clone(),
            supplier,
        ))
    }
}

/// Advance the pending flow by one message.
pub fn advance(flow: PendingFlow, text: &str, ctx: &FlowContext<'_>) -> Transition {
    match flow {
        PendingFlow::NewItem(state) => new_item::advance(state, text, ctx),
        PendingFlow::Edit(state) => edit::advance(state, text, ctx),
        PendingFlow::Language(state) => language::advance(state, text),
        PendingFlow::Preferences(state) => preferences::advance(state, text, ctx),
        PendingFlow::SupplierAdd(state) => supplier_add::advance(state, text, ctx),
        PendingFlow::SupplierView(state) => supplier_view::advance(state, text, ctx),
    }
}

/// Outcome for a committed stock report or create.
pub(crate) fn reported(events: &[CatalogEvent], supplier: Option<String>) -> Option<Outcome> {
    events.iter().find_map(|event| match event {
        CatalogEvent::StockReported {
            name,
            quantity,
            total,
            ..
        } => Some(Outcome::StockReported {
            item: name.clone(),
            quantity: *quantity,
            total: *total,
        }),
        CatalogEvent::ItemCreated { item } => Some(Outcome::ItemCreated {
            item: item.name.clone(),
            item_type: item.item_type,
            quantity: item.quantity,
            supplier: supplier.clone(),
        }),
        _ => None,
    })
}
