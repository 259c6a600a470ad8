//! Structured results of one dispatched message.
//!
//! The dispatcher never produces text; it produces an [`Outcome`] which the
//! renderer turns into a reply in the conversation's language.

use chrono::{DateTime, Utc};

use shopkeep_core::{DomainError, SupplierId};
use shopkeep_infra::RegistryError;
use shopkeep_inventory::{Catalog, ItemType, Supplier};

use crate::conversation::BufferedEntry;
use crate::locale::{CanonicalCommand, Language};

/// Snapshot of a supplier offered in a numbered menu.
///
/// Menus resolve selections against the snapshot taken when the menu was
/// shown, not against the live registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierChoice {
    pub id: SupplierId,
    pub company_name: String,
}

impl SupplierChoice {
    pub fn from_supplier(supplier: &Supplier) -> Self {
        Self {
            id: supplier.id,
            company_name: supplier.company_name.clone(),
        }
    }

    /// Snapshot every supplier in id order.
    pub fn all(catalog: &Catalog) -> Vec<Self> {
        catalog.suppliers().iter().map(Self::from_supplier).collect()
    }

    /// Resolve a 1-based menu index.
    pub fn pick<'c>(choices: &'c [Self], input: &str) -> Option<&'c Self> {
        let index = input.trim().parse::<usize>().ok()?;
        choices.get(index.checked_sub(1)?)
    }
}

/// One line of a `List` / `ListExt` reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub name: String,
    pub quantity: u32,
    pub required: Option<u32>,
    pub item_type: ItemType,
    pub supplier: Option<String>,
    pub last_reported_at: Option<DateTime<Utc>>,
    pub last_reported_by: Option<String>,
}

impl ItemRow {
    pub fn rows(catalog: &Catalog) -> impl Iterator<Item = ItemRow> + '_ {
        catalog.items().iter().map(|item| ItemRow {
            name: item.name.clone(),
            quantity: item.quantity,
            required: item.required_quantity,
            item_type: item.item_type,
            supplier: item
                .supplier_id
                .and_then(|id| catalog.supplier(id))
                .map(|s| s.company_name.clone()),
            last_reported_at: item.last_reported_at,
            last_reported_by: item.last_reported_by.as_ref().map(|s| s.masked()),
        })
    }
}

/// Why an input was rejected. Rendered as a single error line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    UnknownItem(String),
    InvalidQuantity(String),
    DuplicateName(String),
    InvalidSelection,
    /// A reserved token (`!`, or a keyword that needs an argument) sent on its own.
    ReservedToken(String),
    /// A flow-only token (yes/no/back) sent with no flow active.
    NoFlowActive(String),
    EmptyMessage,
    EmptyText,
    InvalidFilter(String),
    UnknownCommand(String),
    NoSuppliers,
    NoOtherSupplier,
    PersistenceFailed,
}

impl From<&RegistryError> for ChatError {
    fn from(err: &RegistryError) -> Self {
        match err {
            RegistryError::Domain(DomainError::UnknownItem(name)) => Self::UnknownItem(name.clone()),
            RegistryError::Domain(DomainError::DuplicateName(name)) => {
                Self::DuplicateName(name.clone())
            }
            RegistryError::Domain(DomainError::InvalidQuantity(_)) => {
                Self::InvalidQuantity(String::new())
            }
            RegistryError::Domain(DomainError::UnknownSupplier(_)) => Self::InvalidSelection,
            RegistryError::Domain(_) => Self::EmptyText,
            RegistryError::Store(_) | RegistryError::Poisoned => Self::PersistenceFailed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    // Low / Need
    StockReported {
        item: String,
        quantity: u32,
        total: u32,
    },
    ItemCreated {
        item: String,
        item_type: ItemType,
        quantity: u32,
        supplier: Option<String>,
    },
    RequiredSet {
        item: String,
        required: u32,
        quantity: u32,
    },

    // New-item flow
    ConfirmNewItem {
        item: String,
        quantity: u32,
    },
    AskItemType {
        item: String,
    },
    AskSupplier {
        item: String,
        choices: Vec<SupplierChoice>,
    },

    // Multi-item mode
    MultiStarted {
        first: Option<BufferedEntry>,
    },
    MultiAdded {
        entry: BufferedEntry,
        pending: usize,
    },
    MultiCommitted {
        entries: Vec<BufferedEntry>,
    },
    MultiEmpty,

    // Edit flow
    EditMenu {
        item: String,
    },
    AskEditSupplier {
        item: String,
        choices: Vec<SupplierChoice>,
    },
    AskEditType {
        item: String,
        current: ItemType,
    },
    AskRawSupplier {
        item: String,
        choices: Vec<SupplierChoice>,
    },
    AskRename {
        item: String,
    },
    ConfirmDelete {
        item: String,
    },
    SupplierChanged {
        item: String,
        supplier: String,
    },
    TypeChanged {
        item: String,
        item_type: ItemType,
        supplier: Option<String>,
    },
    ItemRenamed {
        from: String,
        to: String,
    },
    ItemDeleted {
        item: String,
    },

    // Language / preferences
    LanguageMenu,
    LanguageSet {
        language: Language,
    },
    PreferencesMenu,
    AskPrepSupplier {
        choices: Vec<SupplierChoice>,
    },
    PrepSupplierSet {
        supplier: String,
        repointed: usize,
    },

    // Suppliers
    SupplierList {
        choices: Vec<SupplierChoice>,
    },
    SupplierDetails {
        supplier: Supplier,
    },
    AskCompanyName,
    AskContactName {
        company: String,
    },
    AskContactNumber {
        company: String,
        contact: String,
    },
    SupplierAdded {
        supplier: Supplier,
    },

    // Read-only
    ItemList {
        rows: Vec<ItemRow>,
        extended: bool,
        filter: Option<String>,
    },
    Help,
    HelpTopic {
        command: CanonicalCommand,
    },

    Cancelled,

    /// Input rejected. `prompt` is re-shown after the error when a flow stays
    /// at the same step.
    Rejected {
        error: ChatError,
        prompt: Option<Box<Outcome>>,
    },
}

impl Outcome {
    pub fn rejected(error: ChatError) -> Self {
        Self::Rejected {
            error,
            prompt: None,
        }
    }

    pub fn rejected_with_prompt(error: ChatError, prompt: Outcome) -> Self {
        Self::Rejected {
            error,
            prompt: Some(Box::new(prompt)),
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    pub fn error(&self) -> Option<&ChatError> {
        match self {
            Self::Rejected { error, .. } => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choices() -> Vec<SupplierChoice> {
        vec![
            SupplierChoice {
                id: SupplierId::new(1),
                company_name: "Acme".to_string(),
            },
            SupplierChoice {
                id: SupplierId::new(4),
                company_name: "Beta".to_string(),
            },
        ]
    }

    #[test]
    fn pick_is_one_based() {
        let choices = choices();
        assert_eq!(SupplierChoice::pick(&choices, "2").unwrap().id, SupplierId::new(4));
        assert_eq!(SupplierChoice::pick(&choices, " 1 ").unwrap().company_name, "Acme");
        assert!(SupplierChoice::pick(&choices, "0").is_none());
        assert!(SupplierChoice::pick(&choices, "3").is_none());
        assert!(SupplierChoice::pick(&choices, "Acme").is_none());
        assert!(SupplierChoice::pick(&choices, "-1").is_none());
    }

    #[test]
    fn store_failures_map_to_persistence_failed() {
        let err = RegistryError::Poisoned;
        assert_eq!(ChatError::from(&err), ChatError::PersistenceFailed);

        let err = RegistryError::Domain(DomainError::unknown_item("Milk"));
        assert_eq!(ChatError::from(&err), ChatError::UnknownItem("Milk".to_string()));
    }
}
