//! Reply synthesizer — templated responses and holding messages.
//!
//! Invoked only after the decider approved auto-handling. The
//! escalation flag is re-read here as an independent check: when it is
//! set the synthesizer emits a non-committal holding message instead of
//! a templated answer, even though the decider said approve.

use tracing::debug;

use crate::triage::types::{Category, Classification, Reply, Sentiment, Tone};

/// Holding message for heated senders.
const HOLDING_HEATED: &str = "I understand how frustrating this situation must be. \
     I've escalated your case to a specialist who will review it as a priority.";

/// Holding message for everyone else.
const HOLDING_DEFAULT: &str = "Thanks for your patience. \
     I've forwarded your case to our specialist team for further review.";

/// Per-category reply templates, checked in order.
const TEMPLATES: &[(Category, &str)] = &[
    (
        Category::Billing,
        "I’ve checked your billing details and I can help clarify the recent changes.",
    ),
    (
        Category::TechnicalIssue,
        "Thanks for reporting the issue. Let's walk through a few troubleshooting steps.",
    ),
    (
        Category::Refund,
        "I can help you with your refund request and explain the next steps.",
    ),
    (
        Category::Complaint,
        "Thanks for sharing your feedback. I’m here to help resolve this.",
    ),
    (
        Category::GeneralInquiry,
        "Here’s the information you requested.",
    ),
];

/// Fallback when a category has no template.
const GENERIC_TEMPLATE: &str = "Thanks for contacting us.";

/// Template-based reply generator.
#[derive(Debug, Default)]
pub struct ReplySynthesizer;

impl ReplySynthesizer {
    pub fn new() -> Self {
        Self
    }

    /// Synthesize a reply for an approved message.
    pub fn synthesize(&self, classification: &Classification) -> Reply {
        let (reply_text, tone, requires_human_review) = if classification.needs_escalation {
            let text = holding_message(classification.sentiment);
            let tone = if classification.sentiment.is_heated() {
                Tone::Empathetic
            } else {
                Tone::Professional
            };
            (text, tone, true)
        } else {
            let text = template_for(classification.category);
            let tone = match classification.sentiment {
                s if s.is_heated() => Tone::Empathetic,
                Sentiment::Happy => Tone::Friendly,
                _ => Tone::Professional,
            };
            (text, tone, false)
        };

        debug!(
            category = %classification.category,
            tone = %tone,
            requires_human_review,
            "Synthesized reply"
        );

        Reply {
            reply_text: reply_text.to_string(),
            tone,
            requires_human_review,
            summary: format!(
                "Generated reply for category '{}' with tone '{}'.",
                classification.category, tone
            ),
        }
    }
}

/// Non-committal message used while a specialist takes over.
fn holding_message(sentiment: Sentiment) -> &'static str {
    if sentiment.is_heated() {
        HOLDING_HEATED
    } else {
        HOLDING_DEFAULT
    }
}

/// Look up the fixed template for a category.
fn template_for(category: Category) -> &'static str {
    TEMPLATES
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, text)| *text)
        .unwrap_or(GENERIC_TEMPLATE)
}
