//! Per-sender memory — message counts and last-seen classification.
//!
//! The store is owned and mutated exclusively by the classifier; the
//! rest of the pipeline only ever sees the snapshot embedded in a
//! `Classification`. Records are created lazily on first contact and
//! never deleted. No durability: this is an in-process store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::triage::types::{Category, Sentiment};

/// Memory record for a single sender.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderMemory {
    /// Number of messages classified for this sender. Strictly
    /// increases by 1 on every classification, never resets.
    pub message_count: u64,
    /// Category of the most recent message.
    pub last_category: Option<Category>,
    /// Sentiment of the most recent message.
    pub last_sentiment: Option<Sentiment>,
}

/// Keyed store mapping sender identifiers to their memory records.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, SenderMemory>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one classified message for `sender`.
    ///
    /// Lazily initializes the record, increments the count and
    /// unconditionally overwrites the last category/sentiment. Returns
    /// a reference to the updated record.
    pub fn record(
        &mut self,
        sender: &str,
        category: Category,
        sentiment: Sentiment,
    ) -> &SenderMemory {
        let entry = self.records.entry(sender.to_string()).or_default();
        entry.message_count += 1;
        entry.last_category = Some(category);
        entry.last_sentiment = Some(sentiment);
        entry
    }

    /// Look up a sender's record, if any message has been seen from them.
    pub fn get(&self, sender: &str) -> Option<&SenderMemory> {
        self.records.get(sender)
    }

    /// Number of distinct senders seen.
    pub fn sender_count(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_initializes_lazily() {
        let mut store = MemoryStore::new();
        assert!(store.get("alice@example.com").is_none());

        let rec = store.record("alice@example.com", Category::Billing, Sentiment::Calm);
        assert_eq!(rec.message_count, 1);
        assert_eq!(rec.last_category, Some(Category::Billing));
        assert_eq!(rec.last_sentiment, Some(Sentiment::Calm));
    }

    #[test]
    fn count_increases_by_one_per_call() {
        let mut store = MemoryStore::new();
        for expected in 1..=5 {
            let rec = store.record("bob", Category::Refund, Sentiment::Neutral);
            assert_eq!(rec.message_count, expected);
        }
    }

    #[test]
    fn last_values_overwritten_unconditionally() {
        let mut store = MemoryStore::new();
        store.record("carol", Category::Billing, Sentiment::Happy);
        let rec = store.record("carol", Category::Complaint, Sentiment::Angry);
        assert_eq!(rec.last_category, Some(Category::Complaint));
        assert_eq!(rec.last_sentiment, Some(Sentiment::Angry));
    }

    #[test]
    fn senders_are_independent() {
        let mut store = MemoryStore::new();
        store.record("a", Category::Billing, Sentiment::Calm);
        store.record("a", Category::Billing, Sentiment::Calm);
        store.record("b", Category::Refund, Sentiment::Happy);

        assert_eq!(store.get("a").unwrap().message_count, 2);
        assert_eq!(store.get("b").unwrap().message_count, 1);
        assert_eq!(store.sender_count(), 2);
    }
}
