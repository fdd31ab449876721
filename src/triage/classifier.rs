//! Keyword classifier — category, sentiment, urgency and escalation.
//!
//! All matching is plain case-insensitive substring containment: a
//! keyword matches even inside a larger word. The rule tables are
//! ordered and evaluated first-match-wins; the order is load-bearing
//! because a message can trigger keywords from several groups.

use tracing::debug;

use crate::triage::memory::MemoryStore;
use crate::triage::types::{
    Category, Classification, NormalizedEmail, Sentiment, Urgency,
};

/// Category rule groups in priority order. A text matching keywords
/// from more than one group gets the earliest group's category.
const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (Category::Billing, &["invoice", "subscription", "charge"]),
    (Category::Refund, &["refund", "return"]),
    (Category::TechnicalIssue, &["not working", "error", "crash"]),
    (
        Category::Complaint,
        &["disappointed", "complaint", "poor service"],
    ),
    (
        Category::GeneralInquiry,
        &["how do i", "can i", "question"],
    ),
];

/// Sentiment rules in declared order. `Neutral` carries no keywords
/// and is the catch-all when nothing earlier or later matches.
const SENTIMENT_RULES: &[(Sentiment, &[&str])] = &[
    (
        Sentiment::Angry,
        &[
            "unacceptable",
            "angry",
            "furious",
            "not acceptable",
            "fix this now",
        ],
    ),
    (
        Sentiment::Frustrated,
        &["frustrating", "frustrated", "this is really", "not working"],
    ),
    (
        Sentiment::Confused,
        &["don't understand", "what does this mean", "confusing"],
    ),
    (Sentiment::Calm, &["hi", "hello", "kind regards", "thanks"]),
    (Sentiment::Neutral, &[]),
    (
        Sentiment::Happy,
        &["thank you so much", "great", "happy", "appreciate"],
    ),
];

const HIGH_URGENCY_PHRASES: &[&str] = &["as soon as possible", "urgent", "fix today"];
const LOW_URGENCY_PHRASES: &[&str] = &["not urgent", "whenever you can"];

/// Phrases that force escalation regardless of detected sentiment.
const ESCALATION_TRIGGERS: &[&str] = &[
    "unacceptable",
    "angry",
    "furious",
    "fix this now",
    "third time",
    "fourth email",
];

/// Detect the topic category of a message body.
///
/// Defaults to `GeneralInquiry` when no keyword group matches.
pub fn detect_category(text: &str) -> Category {
    let text = text.to_lowercase();
    for (category, keywords) in CATEGORY_RULES {
        if keywords.iter().any(|k| text.contains(k)) {
            return *category;
        }
    }
    Category::GeneralInquiry
}

/// Detect the sentiment of a message body, first matching rule wins.
pub fn detect_sentiment(text: &str) -> Sentiment {
    let text = text.to_lowercase();
    for (sentiment, keywords) in SENTIMENT_RULES {
        if keywords.iter().any(|k| text.contains(k)) {
            return *sentiment;
        }
    }
    Sentiment::Neutral
}

/// Detect urgency: high-urgency phrases take precedence over low.
pub fn detect_urgency(text: &str) -> Urgency {
    let text = text.to_lowercase();
    if HIGH_URGENCY_PHRASES.iter().any(|k| text.contains(k)) {
        return Urgency::High;
    }
    if LOW_URGENCY_PHRASES.iter().any(|k| text.contains(k)) {
        return Urgency::Low;
    }
    Urgency::Normal
}

/// True when the message must reach a human: heated sentiment OR any
/// escalation-trigger phrase in the text. Either alone is sufficient.
pub fn check_escalation(text: &str, sentiment: Sentiment) -> bool {
    if sentiment.is_heated() {
        return true;
    }
    let text = text.to_lowercase();
    ESCALATION_TRIGGERS.iter().any(|k| text.contains(k))
}

/// Keyword classifier. Owns the per-sender memory store.
#[derive(Debug, Default)]
pub struct Classifier {
    memory: MemoryStore,
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a normalized email and update the sender's memory.
    ///
    /// Tolerates an empty body (everything defaults: `general_inquiry`,
    /// `neutral`, `normal`, no escalation).
    pub fn classify(&mut self, email: &NormalizedEmail, sender: &str) -> Classification {
        let category = detect_category(&email.body);
        let sentiment = detect_sentiment(&email.body);
        let urgency = detect_urgency(&email.body);
        let needs_escalation = check_escalation(&email.body, sentiment);

        let memory = self.memory.record(sender, category, sentiment).clone();

        debug!(
            sender = %sender,
            category = %category,
            sentiment = %sentiment,
            urgency = %urgency,
            needs_escalation,
            message_count = memory.message_count,
            "Classified message"
        );

        Classification {
            category,
            urgency,
            sentiment,
            thread_status: email.thread_status,
            needs_escalation,
            memory,
        }
    }

    /// Read-only view of the per-sender memory store.
    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }
}
