//! Escalation decider — auto-handle vs. hand off to a human.
//!
//! An ordered policy chain evaluated until the first branch fires:
//! 1. explicit escalation flag        → escalate, high confidence
//! 2. heated sentiment                → escalate, high confidence
//! 3. high-risk category              → escalate, medium confidence
//! 4. otherwise                       → approve (high if calm, else medium)
//!
//! Urgency is accepted and logged but does not influence the decision.

use tracing::debug;

use crate::triage::types::{Classification, Confidence, DecisionResult, FinalAction, Sentiment};

/// Categories that always route to a human when reached by branch 3.
///
/// Matched by wire name rather than by the `Category` enum:
/// `cancellation`, `legal` and `regulatory` are not producible by the
/// classifier today, and this policy must not change when they are.
const HIGH_RISK_CATEGORIES: &[&str] = &["complaint", "cancellation", "legal", "regulatory"];

/// Rule-based routing policy.
#[derive(Debug, Default)]
pub struct EscalationDecider;

impl EscalationDecider {
    pub fn new() -> Self {
        Self
    }

    /// Decide whether a classified message may be auto-answered.
    pub fn decide(&self, classification: &Classification) -> DecisionResult {
        debug!(
            category = %classification.category,
            sentiment = %classification.sentiment,
            urgency = %classification.urgency,
            needs_escalation = classification.needs_escalation,
            "Deciding routing"
        );

        if classification.needs_escalation {
            return DecisionResult {
                final_action: FinalAction::EscalateToHuman,
                reason: "Escalation flag from escalation/supervisor logic is true.".into(),
                confidence: Confidence::High,
            };
        }

        if classification.sentiment.is_heated() {
            return DecisionResult {
                final_action: FinalAction::EscalateToHuman,
                reason: format!(
                    "Customer sentiment is '{}', which is high-risk.",
                    classification.sentiment
                ),
                confidence: Confidence::High,
            };
        }

        if HIGH_RISK_CATEGORIES.contains(&classification.category.as_str()) {
            return DecisionResult {
                final_action: FinalAction::EscalateToHuman,
                reason: format!(
                    "Email category '{}' is considered high-risk.",
                    classification.category
                ),
                confidence: Confidence::Medium,
            };
        }

        DecisionResult {
            final_action: FinalAction::Approve,
            reason: "Calm or low-risk email with no escalation flag. It is safe to handle \
                     this with the auto reply agent."
                .into(),
            confidence: if classification.sentiment == Sentiment::Calm {
                Confidence::High
            } else {
                Confidence::Medium
            },
        }
    }
}
