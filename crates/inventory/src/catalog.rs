//! The shared item/supplier catalog as a single aggregate.
//!
//! Every registry mutation is a [`CatalogCommand`]; `handle` validates it
//! against current state and returns [`CatalogEvent`]s, `apply` evolves state.
//! Invariants enforced here:
//!
//! - item names are unique under case-insensitive comparison;
//! - quantities never go below zero (they are unsigned and only ever increase
//!   through reports);
//! - an item's supplier reference always points at an existing supplier;
//! - supplier ids are sequential.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopkeep_core::{Aggregate, DomainError, SenderId, SupplierId, display_name, name_key};

use crate::item::{Item, ItemType};
use crate::supplier::Supplier;

/// Token reserved for cancel/end; never a valid item name.
const RESERVED_NAME: &str = "!";

/// Aggregate root: the whole catalog (items + suppliers + prep supplier setting).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<Item>,
    suppliers: Vec<Supplier>,
    prep_supplier_id: Option<SupplierId>,
    version: u64,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rebuild a catalog from persisted records.
    ///
    /// Persisted data is not trusted: items whose key repeats an earlier item
    /// are dropped, supplier references to missing suppliers are cleared, and
    /// a prep supplier id that no longer exists is forgotten.
    pub fn restore(
        items: Vec<Item>,
        suppliers: Vec<Supplier>,
        prep_supplier_id: Option<SupplierId>,
    ) -> Self {
        let mut suppliers_seen: Vec<Supplier> = Vec::with_capacity(suppliers.len());
        for s in suppliers {
            if !suppliers_seen.iter().any(|existing| existing.id == s.id) {
                suppliers_seen.push(s);
            }
        }

        let mut catalog = Self {
            items: Vec::with_capacity(items.len()),
            suppliers: suppliers_seen,
            prep_supplier_id: None,
            version: 0,
        };

        for mut item in items {
            let name = item.name.trim().to_string();
            if name.is_empty() || name == RESERVED_NAME || catalog.find_item(&name).is_some() {
                continue;
            }
            item.name = name;
            if let Some(sid) = item.supplier_id {
                if catalog.supplier(sid).is_none() {
                    item.supplier_id = None;
                }
            }
            catalog.items.push(item);
        }
        catalog.sort_items();

        catalog.prep_supplier_id = prep_supplier_id.filter(|id| catalog.supplier(*id).is_some());
        catalog
    }

    /// Items ordered by name key.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Suppliers in insertion (id) order.
    pub fn suppliers(&self) -> &[Supplier] {
        &self.suppliers
    }

    pub fn find_item(&self, name: &str) -> Option<&Item> {
        let key = name_key(name);
        if key.is_empty() {
            return None;
        }
        self.items.iter().find(|i| i.key() == key)
    }

    pub fn contains_item(&self, name: &str) -> bool {
        self.find_item(name).is_some()
    }

    pub fn supplier(&self, id: SupplierId) -> Option<&Supplier> {
        self.suppliers.iter().find(|s| s.id == id)
    }

    /// The explicitly configured prep supplier id (may be unset).
    pub fn configured_prep_supplier_id(&self) -> Option<SupplierId> {
        self.prep_supplier_id
    }

    /// The supplier new Prep items are assigned to.
    ///
    /// The configured prep supplier if set, else the first supplier whose
    /// company name looks like a prep kitchen, else none.
    pub fn prep_supplier(&self) -> Option<&Supplier> {
        self.prep_supplier_id
            .and_then(|id| self.supplier(id))
            .or_else(|| self.suppliers.iter().find(|s| s.looks_like_prep()))
    }

    pub fn next_supplier_id(&self) -> SupplierId {
        self.suppliers
            .iter()
            .map(|s| s.id)
            .max()
            .map(SupplierId::next)
            .unwrap_or(SupplierId::new(1))
    }

    fn item_mut(&mut self, name: &str) -> Option<&mut Item> {
        let key = name_key(name);
        self.items.iter_mut().find(|i| i.key() == key)
    }

    fn sort_items(&mut self) {
        self.items.sort_by_key(|i| i.key());
    }

    fn require_item(&self, name: &str) -> Result<&Item, DomainError> {
        self.find_item(name)
            .ok_or_else(|| DomainError::unknown_item(name.trim()))
    }

    fn require_supplier(&self, id: SupplierId) -> Result<&Supplier, DomainError> {
        self.supplier(id).ok_or_else(|| DomainError::unknown_supplier(id))
    }
}

/// Command: report low stock for an existing item (adds to its quantity).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStock {
    pub name: String,
    pub quantity: u32,
    pub reported_by: SenderId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: create a new item with an initial reported quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateItem {
    pub name: String,
    pub item_type: ItemType,
    pub supplier_id: Option<SupplierId>,
    pub quantity: u32,
    pub reported_by: SenderId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: set the quantity an item should be stocked at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetRequiredQuantity {
    pub name: String,
    pub required: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSupplier {
    pub name: String,
    pub supplier_id: SupplierId,
}

/// Command: change an item's type, re-pointing its supplier at the same time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeType {
    pub name: String,
    pub item_type: ItemType,
    pub supplier_id: Option<SupplierId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameItem {
    pub name: String,
    pub new_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteItem {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddSupplier {
    pub company_name: String,
    pub contact_name: String,
    pub contact_number: String,
}

/// Command: choose the default prep supplier and re-point every Prep item to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetPrepSupplier {
    pub supplier_id: SupplierId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogCommand {
    ReportStock(ReportStock),
    CreateItem(CreateItem),
    SetRequiredQuantity(SetRequiredQuantity),
    ChangeSupplier(ChangeSupplier),
    ChangeType(ChangeType),
    RenameItem(RenameItem),
    DeleteItem(DeleteItem),
    AddSupplier(AddSupplier),
    SetPrepSupplier(SetPrepSupplier),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogEvent {
    ItemCreated {
        item: Item,
    },
    StockReported {
        name: String,
        quantity: u32,
        /// Quantity after this report.
        total: u32,
        reported_by: SenderId,
        occurred_at: DateTime<Utc>,
    },
    RequiredQuantitySet {
        name: String,
        required: u32,
    },
    ItemSupplierChanged {
        name: String,
        supplier_id: SupplierId,
    },
    ItemTypeChanged {
        name: String,
        item_type: ItemType,
        supplier_id: Option<SupplierId>,
    },
    ItemRenamed {
        from: String,
        to: String,
    },
    ItemDeleted {
        name: String,
    },
    SupplierAdded {
        supplier: Supplier,
    },
    PrepSupplierSet {
        supplier_id: SupplierId,
        repointed: Vec<String>,
    },
}

impl CatalogEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            CatalogEvent::ItemCreated { .. } => "catalog.item.created",
            CatalogEvent::StockReported { .. } => "catalog.item.stock_reported",
            CatalogEvent::RequiredQuantitySet { .. } => "catalog.item.required_set",
            CatalogEvent::ItemSupplierChanged { .. } => "catalog.item.supplier_changed",
            CatalogEvent::ItemTypeChanged { .. } => "catalog.item.type_changed",
            CatalogEvent::ItemRenamed { .. } => "catalog.item.renamed",
            CatalogEvent::ItemDeleted { .. } => "catalog.item.deleted",
            CatalogEvent::SupplierAdded { .. } => "catalog.supplier.added",
            CatalogEvent::PrepSupplierSet { .. } => "catalog.supplier.prep_set",
        }
    }
}

impl Aggregate for Catalog {
    type Command = CatalogCommand;
    type Event = CatalogEvent;
    type Error = DomainError;

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CatalogEvent::ItemCreated { item } => {
                self.items.push(item.clone());
                self.sort_items();
            }
            CatalogEvent::StockReported {
                name,
                quantity,
                reported_by,
                occurred_at,
                ..
            } => {
                if let Some(item) = self.item_mut(name) {
                    item.quantity = item.quantity.saturating_add(*quantity);
                    item.last_reported_at = Some(*occurred_at);
                    item.last_reported_by = Some(reported_by.clone());
                }
            }
            CatalogEvent::RequiredQuantitySet { name, required } => {
                if let Some(item) = self.item_mut(name) {
                    item.required_quantity = Some(*required);
                }
            }
            CatalogEvent::ItemSupplierChanged { name, supplier_id } => {
                if let Some(item) = self.item_mut(name) {
                    item.supplier_id = Some(*supplier_id);
                }
            }
            CatalogEvent::ItemTypeChanged {
                name,
                item_type,
                supplier_id,
            } => {
                if let Some(item) = self.item_mut(name) {
                    item.item_type = *item_type;
                    item.supplier_id = *supplier_id;
                }
            }
            CatalogEvent::ItemRenamed { from, to } => {
                if let Some(item) = self.item_mut(from) {
                    item.name = to.clone();
                }
                self.sort_items();
            }
            CatalogEvent::ItemDeleted { name } => {
                let key = name_key(name);
                self.items.retain(|i| i.key() != key);
            }
            CatalogEvent::SupplierAdded { supplier } => {
                self.suppliers.push(supplier.clone());
            }
            CatalogEvent::PrepSupplierSet {
                supplier_id,
                repointed,
            } => {
                self.prep_supplier_id = Some(*supplier_id);
                for name in repointed {
                    if let Some(item) = self.item_mut(name) {
                        item.supplier_id = Some(*supplier_id);
                    }
                }
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CatalogCommand::ReportStock(cmd) => self.handle_report(cmd),
            CatalogCommand::CreateItem(cmd) => self.handle_create(cmd),
            CatalogCommand::SetRequiredQuantity(cmd) => self.handle_set_required(cmd),
            CatalogCommand::ChangeSupplier(cmd) => self.handle_change_supplier(cmd),
            CatalogCommand::ChangeType(cmd) => self.handle_change_type(cmd),
            CatalogCommand::RenameItem(cmd) => self.handle_rename(cmd),
            CatalogCommand::DeleteItem(cmd) => self.handle_delete(cmd),
            CatalogCommand::AddSupplier(cmd) => self.handle_add_supplier(cmd),
            CatalogCommand::SetPrepSupplier(cmd) => self.handle_set_prep_supplier(cmd),
        }
    }
}

impl Catalog {
    fn handle_report(&self, cmd: &ReportStock) -> Result<Vec<CatalogEvent>, DomainError> {
        ensure_positive(cmd.quantity)?;
        let item = self.require_item(&cmd.name)?;
        let total = item
            .quantity
            .checked_add(cmd.quantity)
            .ok_or_else(|| DomainError::invalid_quantity("quantity overflow"))?;
        Ok(vec![CatalogEvent::StockReported {
            name: item.name.clone(),
            quantity: cmd.quantity,
            total,
            reported_by: cmd.reported_by.clone(),
            occurred_at: cmd.occurred_at,
        }])
    }

    fn handle_create(&self, cmd: &CreateItem) -> Result<Vec<CatalogEvent>, DomainError> {
        let name = display_name(&cmd.name);
        ensure_valid_name(&name)?;
        ensure_positive(cmd.quantity)?;

        // Someone else created it while this request was in flight: report instead.
        if self.contains_item(&name) {
            return self.handle_report(&ReportStock {
                name,
                quantity: cmd.quantity,
                reported_by: cmd.reported_by.clone(),
                occurred_at: cmd.occurred_at,
            });
        }

        if let Some(sid) = cmd.supplier_id {
            self.require_supplier(sid)?;
        }

        Ok(vec![CatalogEvent::ItemCreated {
            item: Item {
                name,
                quantity: cmd.quantity,
                required_quantity: None,
                item_type: cmd.item_type,
                supplier_id: cmd.supplier_id,
                last_reported_at: Some(cmd.occurred_at),
                last_reported_by: Some(cmd.reported_by.clone()),
            },
        }])
    }

    fn handle_set_required(
        &self,
        cmd: &SetRequiredQuantity,
    ) -> Result<Vec<CatalogEvent>, DomainError> {
        let item = self.require_item(&cmd.name)?;
        Ok(vec![CatalogEvent::RequiredQuantitySet {
            name: item.name.clone(),
            required: cmd.required,
        }])
    }

    fn handle_change_supplier(&self, cmd: &ChangeSupplier) -> Result<Vec<CatalogEvent>, DomainError> {
        let item = self.require_item(&cmd.name)?;
        self.require_supplier(cmd.supplier_id)?;
        Ok(vec![CatalogEvent::ItemSupplierChanged {
            name: item.name.clone(),
            supplier_id: cmd.supplier_id,
        }])
    }

    fn handle_change_type(&self, cmd: &ChangeType) -> Result<Vec<CatalogEvent>, DomainError> {
        let item = self.require_item(&cmd.name)?;
        if let Some(sid) = cmd.supplier_id {
            self.require_supplier(sid)?;
        }
        Ok(vec![CatalogEvent::ItemTypeChanged {
            name: item.name.clone(),
            item_type: cmd.item_type,
            supplier_id: cmd.supplier_id,
        }])
    }

    fn handle_rename(&self, cmd: &RenameItem) -> Result<Vec<CatalogEvent>, DomainError> {
        let item = self.require_item(&cmd.name)?;
        let new_name = cmd.new_name.trim().to_string();
        ensure_valid_name(&new_name)?;

        if let Some(other) = self.find_item(&new_name) {
            if other.key() != item.key() {
                return Err(DomainError::duplicate_name(other.name.clone()));
            }
        }

        Ok(vec![CatalogEvent::ItemRenamed {
            from: item.name.clone(),
            to: new_name,
        }])
    }

    fn handle_delete(&self, cmd: &DeleteItem) -> Result<Vec<CatalogEvent>, DomainError> {
        let item = self.require_item(&cmd.name)?;
        Ok(vec![CatalogEvent::ItemDeleted {
            name: item.name.clone(),
        }])
    }

    fn handle_add_supplier(&self, cmd: &AddSupplier) -> Result<Vec<CatalogEvent>, DomainError> {
        let company_name = cmd.company_name.trim();
        let contact_name = cmd.contact_name.trim();
        let contact_number = cmd.contact_number.trim();
        if company_name.is_empty() || contact_name.is_empty() || contact_number.is_empty() {
            return Err(DomainError::validation("supplier fields cannot be empty"));
        }
        Ok(vec![CatalogEvent::SupplierAdded {
            supplier: Supplier {
                id: self.next_supplier_id(),
                company_name: company_name.to_string(),
                contact_name: contact_name.to_string(),
                contact_number: contact_number.to_string(),
            },
        }])
    }

    fn handle_set_prep_supplier(
        &self,
        cmd: &SetPrepSupplier,
    ) -> Result<Vec<CatalogEvent>, DomainError> {
        self.require_supplier(cmd.supplier_id)?;
        let repointed = self
            .items
            .iter()
            .filter(|i| i.item_type == ItemType::Prep)
            .map(|i| i.name.clone())
            .collect();
        Ok(vec![CatalogEvent::PrepSupplierSet {
            supplier_id: cmd.supplier_id,
            repointed,
        }])
    }
}

fn ensure_positive(quantity: u32) -> Result<(), DomainError> {
    if quantity == 0 {
        return Err(DomainError::invalid_quantity("quantity must be at least 1"));
    }
    Ok(())
}

fn ensure_valid_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    if name.trim() == RESERVED_NAME {
        return Err(DomainError::validation("'!' is reserved"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sender() -> SenderId {
        SenderId::new("whatsapp:+15551234567")
    }

    fn create(name: &str, item_type: ItemType, supplier_id: Option<SupplierId>, qty: u32) -> CatalogCommand {
        CatalogCommand::CreateItem(CreateItem {
            name: name.to_string(),
            item_type,
            supplier_id,
            quantity: qty,
            reported_by: sender(),
            occurred_at: Utc::now(),
        })
    }

    fn report(name: &str, qty: u32) -> CatalogCommand {
        CatalogCommand::ReportStock(ReportStock {
            name: name.to_string(),
            quantity: qty,
            reported_by: sender(),
            occurred_at: Utc::now(),
        })
    }

    fn add_supplier(company: &str) -> CatalogCommand {
        CatalogCommand::AddSupplier(AddSupplier {
            company_name: company.to_string(),
            contact_name: "John".to_string(),
            contact_number: "0501234567".to_string(),
        })
    }

    #[test]
    fn create_title_cases_and_records_reporter() {
        let mut catalog = Catalog::empty();
        catalog.execute(&create("egg  salad", ItemType::Prep, None, 2)).unwrap();

        let item = catalog.find_item("EGG SALAD").unwrap();
        assert_eq!(item.name, "Egg Salad");
        assert_eq!(item.quantity, 2);
        assert_eq!(item.required_quantity, None);
        assert_eq!(item.last_reported_by, Some(sender()));
        assert_eq!(catalog.version(), 1);
    }

    #[test]
    fn create_existing_name_reports_instead() {
        let mut catalog = Catalog::empty();
        catalog.execute(&create("Milk", ItemType::Raw, None, 1)).unwrap();
        let events = catalog.execute(&create("milk", ItemType::Prep, None, 3)).unwrap();

        assert!(matches!(events[0], CatalogEvent::StockReported { quantity: 3, total: 4, .. }));
        assert_eq!(catalog.items().len(), 1);
        let milk = catalog.find_item("Milk").unwrap();
        assert_eq!(milk.quantity, 4);
        assert_eq!(milk.item_type, ItemType::Raw);
    }

    #[test]
    fn report_unknown_item_is_rejected() {
        let catalog = Catalog::empty();
        let err = catalog.handle(&report("Milk", 1)).unwrap_err();
        assert_eq!(err, DomainError::UnknownItem("Milk".to_string()));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let mut catalog = Catalog::empty();
        catalog.execute(&create("Milk", ItemType::Raw, None, 1)).unwrap();
        assert!(matches!(
            catalog.handle(&report("Milk", 0)),
            Err(DomainError::InvalidQuantity(_))
        ));
    }

    #[test]
    fn create_with_missing_supplier_is_rejected() {
        let catalog = Catalog::empty();
        let err = catalog
            .handle(&create("Milk", ItemType::Raw, Some(SupplierId::new(9)), 1))
            .unwrap_err();
        assert_eq!(err, DomainError::UnknownSupplier("9".to_string()));
    }

    #[test]
    fn rename_to_other_item_fails_but_case_change_succeeds() {
        let mut catalog = Catalog::empty();
        catalog.execute(&create("Milk", ItemType::Raw, None, 1)).unwrap();
        catalog.execute(&create("Cheese", ItemType::Raw, None, 1)).unwrap();

        let err = catalog
            .handle(&CatalogCommand::RenameItem(RenameItem {
                name: "milk".to_string(),
                new_name: "CHEESE".to_string(),
            }))
            .unwrap_err();
        assert_eq!(err, DomainError::DuplicateName("Cheese".to_string()));

        catalog
            .execute(&CatalogCommand::RenameItem(RenameItem {
                name: "milk".to_string(),
                new_name: "MILK".to_string(),
            }))
            .unwrap();
        assert_eq!(catalog.find_item("milk").unwrap().name, "MILK");
    }

    #[test]
    fn delete_removes_item() {
        let mut catalog = Catalog::empty();
        catalog.execute(&create("Milk", ItemType::Raw, None, 1)).unwrap();
        catalog
            .execute(&CatalogCommand::DeleteItem(DeleteItem {
                name: "MILK".to_string(),
            }))
            .unwrap();
        assert!(catalog.items().is_empty());
    }

    #[test]
    fn supplier_ids_are_sequential() {
        let mut catalog = Catalog::empty();
        catalog.execute(&add_supplier("Acme")).unwrap();
        catalog.execute(&add_supplier("Beta")).unwrap();
        let ids: Vec<u64> = catalog.suppliers().iter().map(|s| s.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn supplier_fields_must_be_non_empty() {
        let catalog = Catalog::empty();
        let cmd = CatalogCommand::AddSupplier(AddSupplier {
            company_name: "Acme".to_string(),
            contact_name: "  ".to_string(),
            contact_number: "1".to_string(),
        });
        assert!(matches!(catalog.handle(&cmd), Err(DomainError::Validation(_))));
    }

    #[test]
    fn prep_supplier_falls_back_to_name_heuristic() {
        let mut catalog = Catalog::empty();
        catalog.execute(&add_supplier("Acme")).unwrap();
        assert!(catalog.prep_supplier().is_none());

        catalog.execute(&add_supplier("Prep Kitchen")).unwrap();
        assert_eq!(catalog.prep_supplier().unwrap().company_name, "Prep Kitchen");

        catalog
            .execute(&CatalogCommand::SetPrepSupplier(SetPrepSupplier {
                supplier_id: SupplierId::new(1),
            }))
            .unwrap();
        assert_eq!(catalog.prep_supplier().unwrap().company_name, "Acme");
    }

    #[test]
    fn set_prep_supplier_repoints_prep_items() {
        let mut catalog = Catalog::empty();
        catalog.execute(&add_supplier("Acme")).unwrap();
        catalog.execute(&add_supplier("Kitchen")).unwrap();
        catalog
            .execute(&create("Salad", ItemType::Prep, Some(SupplierId::new(1)), 1))
            .unwrap();
        catalog
            .execute(&create("Milk", ItemType::Raw, Some(SupplierId::new(1)), 1))
            .unwrap();

        catalog
            .execute(&CatalogCommand::SetPrepSupplier(SetPrepSupplier {
                supplier_id: SupplierId::new(2),
            }))
            .unwrap();

        assert_eq!(catalog.find_item("Salad").unwrap().supplier_id, Some(SupplierId::new(2)));
        assert_eq!(catalog.find_item("Milk").unwrap().supplier_id, Some(SupplierId::new(1)));
    }

    #[test]
    fn restore_drops_duplicates_and_dangling_references() {
        let item = |name: &str, sid: Option<u64>| Item {
            name: name.to_string(),
            quantity: 1,
            required_quantity: None,
            item_type: ItemType::Raw,
            supplier_id: sid.map(SupplierId::new),
            last_reported_at: None,
            last_reported_by: None,
        };
        let catalog = Catalog::restore(
            vec![item("Milk", Some(7)), item("MILK", None), item("Beans", None)],
            vec![],
            Some(SupplierId::new(3)),
        );

        assert_eq!(catalog.items().len(), 2);
        assert_eq!(catalog.items()[0].name, "Beans");
        assert_eq!(catalog.find_item("milk").unwrap().supplier_id, None);
        assert_eq!(catalog.configured_prep_supplier_id(), None);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Create(String, u32),
        Report(String, u32),
        Rename(String, String),
        Delete(String),
    }

    fn name_strategy() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["milk", "Milk", "MILK", "beans", "Beans", "egg salad", "Egg  Salad"])
            .prop_map(str::to_string)
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (name_strategy(), 1u32..5).prop_map(|(n, q)| Op::Create(n, q)),
            (name_strategy(), 1u32..5).prop_map(|(n, q)| Op::Report(n, q)),
            (name_strategy(), name_strategy()).prop_map(|(a, b)| Op::Rename(a, b)),
            name_strategy().prop_map(Op::Delete),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: no command sequence produces two items with case-insensitively equal names.
        #[test]
        fn names_stay_unique(ops in prop::collection::vec(op_strategy(), 1..40)) {
            let mut catalog = Catalog::empty();
            for op in ops {
                let cmd = match op {
                    Op::Create(n, q) => create(&n, ItemType::Raw, None, q),
                    Op::Report(n, q) => report(&n, q),
                    Op::Rename(a, b) => CatalogCommand::RenameItem(RenameItem { name: a, new_name: b }),
                    Op::Delete(n) => CatalogCommand::DeleteItem(DeleteItem { name: n }),
                };
                let _ = catalog.execute(&cmd);
            }

            let mut keys: Vec<String> = catalog.items().iter().map(Item::key).collect();
            let before = keys.len();
            keys.sort();
            keys.dedup();
            prop_assert_eq!(keys.len(), before);
        }

        /// Property: repeated reports accumulate into the item's quantity.
        #[test]
        fn reports_accumulate(quantities in prop::collection::vec(1u32..100, 1..20)) {
            let mut catalog = Catalog::empty();
            catalog.execute(&create("Milk", ItemType::Raw, None, 1)).unwrap();
            for q in &quantities {
                catalog.execute(&report("milk", *q)).unwrap();
            }
            let expected = 1 + quantities.iter().sum::<u32>();
            prop_assert_eq!(catalog.find_item("Milk").unwrap().quantity, expected);
        }
    }
}
