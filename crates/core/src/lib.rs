//! `shopkeep-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod aggregate;
pub mod error;
pub mod id;
pub mod name;

pub use aggregate::Aggregate;
pub use error::{DomainError, DomainResult};
pub use id::{SenderId, SupplierId};
pub use name::{display_name, name_key};
