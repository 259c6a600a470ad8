//! Per-sender conversation state.
//!
//! A conversation is either idle, inside one pending flow, or in multi-item
//! mode. The three are variants of [`Mode`], so a pending flow and an active
//! multi-item buffer can never coexist.

use chrono::{DateTime, Duration, Utc};

use shopkeep_core::{SenderId, name_key};

use crate::flows::PendingFlow;
use crate::locale::Language;

/// One buffered multi-item entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferedEntry {
    pub item: String,
    pub quantity: u32,
}

/// Entries collected in multi-item mode, keyed case-insensitively by item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiBuffer {
    entries: Vec<BufferedEntry>,
}

impl MultiBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` for `item`, merging with an earlier entry for the same item.
    ///
    /// Returns the merged entry.
    pub fn add(&mut self, item: &str, quantity: u32) -> BufferedEntry {
        let key = name_key(item);
        if let Some(existing) = self.entries.iter_mut().find(|e| name_key(&e.item) == key) {
            existing.quantity = existing.quantity.saturating_add(quantity);
            return existing.clone();
        }
        let entry = BufferedEntry {
            item: item.to_string(),
            quantity,
        };
        self.entries.push(entry.clone());
        entry
    }

    pub fn entries(&self) -> &[BufferedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Idle,
    Flow(PendingFlow),
    Multi(MultiBuffer),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    sender: SenderId,
    pub language: Language,
    mode: Mode,
    last_activity: DateTime<Utc>,
}

impl Conversation {
    pub fn new(sender: SenderId, language: Language, now: DateTime<Utc>) -> Self {
        Self {
            sender,
            language,
            mode: Mode::Idle,
            last_activity: now,
        }
    }

    pub fn sender(&self) -> &SenderId {
        &self.sender
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn pending_flow(&self) -> Option<&PendingFlow> {
        match &self.mode {
            Mode::Flow(flow) => Some(flow),
            _ => None,
        }
    }

    pub fn is_multi_mode(&self) -> bool {
        matches!(self.mode, Mode::Multi(_))
    }

    pub fn multi_buffer(&self) -> Option<&MultiBuffer> {
        match &self.mode {
            Mode::Multi(buffer) => Some(buffer),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.mode, Mode::Idle)
    }

    /// Take the current mode, leaving the conversation idle.
    pub fn take_mode(&mut self) -> Mode {
        std::mem::take(&mut self.mode)
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_activity = now;
    }

    /// Drop a pending flow that has been idle longer than `ttl`.
    ///
    /// Multi-item buffers are kept. Returns whether a flow was dropped.
    pub fn expire_stale_flow(&mut self, now: DateTime<Utc>, ttl: Duration) -> bool {
        if matches!(self.mode, Mode::Flow(_)) && now - self.last_activity > ttl {
            self.mode = Mode::Idle;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::{LanguageState, PendingFlow};

    fn conversation(now: DateTime<Utc>) -> Conversation {
        Conversation::new(SenderId::new("whatsapp:+15550001111"), Language::He, now)
    }

    #[test]
    fn buffer_merges_same_item_case_insensitively() {
        let mut buffer = MultiBuffer::new();
        buffer.add("Beans", 2);
        buffer.add("Almond", 1);
        let merged = buffer.add("BEANS", 3);

        assert_eq!(merged, BufferedEntry { item: "Beans".to_string(), quantity: 5 });
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn take_mode_leaves_idle() {
        let now = Utc::now();
        let mut conv = conversation(now);
        conv.set_mode(Mode::Multi(MultiBuffer::new()));
        assert!(conv.is_multi_mode());
        assert!(conv.pending_flow().is_none());

        let mode = conv.take_mode();
        assert!(matches!(mode, Mode::Multi(_)));
        assert!(conv.is_idle());
    }

    #[test]
    fn stale_flows_expire_but_buffers_survive() {
        let start = Utc::now();
        let later = start + Duration::minutes(31);
        let ttl = Duration::minutes(30);

        let mut conv = conversation(start);
        conv.set_mode(Mode::Flow(PendingFlow::Language(LanguageState { from_preferences: false })));
        assert!(!conv.expire_stale_flow(start + Duration::minutes(5), ttl));
        assert!(conv.expire_stale_flow(later, ttl));
        assert!(conv.is_idle());

        conv.set_mode(Mode::Multi(MultiBuffer::new()));
        assert!(!conv.expire_stale_flow(later + Duration::hours(5), ttl));
        assert!(conv.is_multi_mode());
    }
}
