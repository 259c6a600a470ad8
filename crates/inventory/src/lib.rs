//! Inventory domain module.
//!
//! This crate contains the business rules for the shared item/supplier
//! catalog, implemented purely as deterministic domain logic (no IO, no
//! transport, no storage).

pub mod catalog;
pub mod item;
pub mod supplier;

pub use catalog::{
    AddSupplier, Catalog, CatalogCommand, CatalogEvent, ChangeSupplier, ChangeType, CreateItem,
    DeleteItem, RenameItem, ReportStock, SetPrepSupplier, SetRequiredQuantity,
};
pub use item::{Item, ItemType};
pub use supplier::Supplier;
