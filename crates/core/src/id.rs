//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a message sender (e.g. `whatsapp:+15551234567`).
///
/// Senders are not authenticated; the identifier is whatever the transport
/// reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SenderId(String);

impl SenderId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short display form: `..` plus the last four digits of the identifier.
    ///
    /// Identifiers with fewer than four digits show the digits they have.
    pub fn masked(&self) -> String {
        let digits: Vec<char> = self.0.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() >= 4 {
            let tail: String = digits[digits.len() - 4..].iter().collect();
            format!("..{tail}")
        } else {
            digits.into_iter().collect()
        }
    }
}

impl core::fmt::Display for SenderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SenderId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Identifier of a supplier. Assigned sequentially, starting at 1.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplierId(u64);

impl SupplierId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// The id following this one in the sequence.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl core::fmt::Display for SupplierId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for SupplierId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| DomainError::invalid_id(format!("SupplierId: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masked_sender_keeps_last_four_digits() {
        assert_eq!(SenderId::new("whatsapp:+15551234567").masked(), "..4567");
        assert_eq!(SenderId::new("abc12").masked(), "12");
        assert_eq!(SenderId::new("web-user").masked(), "");
    }

    #[test]
    fn supplier_id_parses_and_advances() {
        let id: SupplierId = " 41 ".parse().unwrap();
        assert_eq!(id.next(), SupplierId::new(42));
        assert!(matches!("x".parse::<SupplierId>(), Err(DomainError::InvalidId(_))));
    }
}
