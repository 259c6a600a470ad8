use serde::{Deserialize, Serialize};

use shopkeep_core::SupplierId;

/// A supplier record. Suppliers are append-only; no flow deletes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub company_name: String,
    pub contact_name: String,
    pub contact_number: String,
}

impl Supplier {
    /// Heuristic used when no prep supplier is configured.
    pub fn looks_like_prep(&self) -> bool {
        let company = self.company_name.to_lowercase();
        company.contains("prep") || self.company_name.contains("הכנות")
    }

    /// `https://wa.me/<digits>` link for the contact number, if it has any digits.
    pub fn chat_link(&self) -> Option<String> {
        let digits: String = self.contact_number.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            None
        } else {
            Some(format!("https://wa.me/{digits}"))
        }
    }
}
