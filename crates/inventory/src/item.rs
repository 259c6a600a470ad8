use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopkeep_core::{SenderId, SupplierId, name_key};

/// Where an item comes from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    /// Bought from an external supplier.
    Raw,
    /// Produced in-house under the default prep supplier.
    Prep,
}

impl ItemType {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::Raw => "Raw",
            ItemType::Prep => "Prep",
        }
    }
}

impl core::fmt::Display for ItemType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog entry. The name is the identity (compared case-insensitively).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub quantity: u32,
    #[serde(default)]
    pub required_quantity: Option<u32>,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default)]
    pub supplier_id: Option<SupplierId>,
    #[serde(default, rename = "last_updated")]
    pub last_reported_at: Option<DateTime<Utc>>,
    #[serde(default, rename = "last_updated_by")]
    pub last_reported_by: Option<SenderId>,
}

impl Item {
    pub fn key(&self) -> String {
        name_key(&self.name)
    }

    /// Case-insensitive name comparison.
    pub fn is_named(&self, name: &str) -> bool {
        self.key() == name_key(name)
    }
}
