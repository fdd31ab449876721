//! Supervisor — validates synthesized replies before release.
//!
//! Four sequential gates, each a short-circuit terminal check: the
//! first failing gate determines the verdict, falling through all of
//! them approves. The escalation-path gate replaces the other three
//! entirely when the classification carries the escalation flag.

use tracing::{debug, warn};

use crate::triage::types::{
    Classification, Reply, Sentiment, Tone, Verdict, VerdictAction,
};

/// Quality score recorded on approval.
const QUALITY_APPROVED: u8 = 5;
/// Quality score recorded on any rejection.
const QUALITY_REJECTED: u8 = 2;

/// A holding message must never read like a full resolution. These are
/// literal substrings of the templated answers.
const RESOLUTION_PHRASES: &[&str] = &["I’ve checked", "I can help you"];

/// Phrases a released reply may never contain, scanned case-insensitively.
const FORBIDDEN_PHRASES: &[&str] = &[
    "guarantee",
    "legal responsibility",
    "we promise",
    "AI",
    "as an AI",
];

/// Accepted segment-count range for a reply. Segments are the pieces
/// produced by splitting on `.`, so a single trailing dot yields two.
const MIN_SEGMENTS: usize = 2;
const MAX_SEGMENTS: usize = 6;

/// Reply validator.
#[derive(Debug, Default)]
pub struct Supervisor;

impl Supervisor {
    pub fn new() -> Self {
        Self
    }

    /// Review a synthesized reply against its classification context.
    pub fn review(&self, classification: &Classification, reply: &Reply) -> Verdict {
        let verdict = self.evaluate(classification, reply);

        match verdict.action {
            VerdictAction::Approve => debug!(
                quality_score = verdict.quality_score,
                "Reply approved"
            ),
            _ => warn!(
                action = verdict.action.as_str(),
                needs_human = verdict.needs_human,
                reason = %verdict.reason,
                "Reply rejected"
            ),
        }
        verdict
    }

    fn evaluate(&self, classification: &Classification, reply: &Reply) -> Verdict {
        // Gate 1: escalation-path validation. When the flag is set the
        // reply must be a holding message; passing this gate approves
        // immediately and gates 2–4 are never reached.
        if classification.needs_escalation {
            if RESOLUTION_PHRASES
                .iter()
                .any(|p| reply.reply_text.contains(p))
            {
                return reject(
                    "Reply gives full solution when escalation was required.",
                    true,
                );
            }
            if classification.sentiment.is_heated() && reply.tone != Tone::Empathetic {
                return reject(
                    "Tone must be empathetic for angry/frustrated customers.",
                    true,
                );
            }
            return approve(&reply.reply_text, classification.sentiment);
        }

        // Gate 2: tone validation.
        if classification.sentiment.is_heated() && reply.tone != Tone::Empathetic {
            return reject("Tone mismatch: angry/frustrated customers need empathy.", true);
        }
        if classification.sentiment == Sentiment::Happy && reply.tone != Tone::Friendly {
            return reject(
                "Tone mismatch: happy customers should receive friendly tone.",
                false,
            );
        }

        // Gate 3: length validation.
        let segments = reply.reply_text.split('.').count();
        if !(MIN_SEGMENTS..=MAX_SEGMENTS).contains(&segments) {
            return reject(
                "Reply length is outside acceptable range (3-5 sentences).",
                false,
            );
        }

        // Gate 4: forbidden-content validation.
        let lowered = reply.reply_text.to_lowercase();
        for phrase in FORBIDDEN_PHRASES {
            if lowered.contains(&phrase.to_lowercase()) {
                return reject(
                    format!("Unsafe or inappropriate phrase detected: '{phrase}'"),
                    true,
                );
            }
        }

        approve(&reply.reply_text, classification.sentiment)
    }
}

/// Release the reply verbatim.
fn approve(reply_text: &str, sentiment: Sentiment) -> Verdict {
    Verdict {
        action: VerdictAction::Approve,
        final_reply: reply_text.to_string(),
        reason: "Reply approved.".into(),
        needs_human: false,
        quality_score: QUALITY_APPROVED,
        last_interaction_sentiment: Some(sentiment),
    }
}

/// Reject with an empty final reply; hard failures go to a human,
/// soft failures request a rewrite.
fn reject(reason: impl Into<String>, needs_human: bool) -> Verdict {
    Verdict {
        action: if needs_human {
            VerdictAction::EscalateToHuman
        } else {
            VerdictAction::Rewrite
        },
        final_reply: String::new(),
        reason: reason.into(),
        needs_human,
        quality_score: QUALITY_REJECTED,
        last_interaction_sentiment: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::memory::SenderMemory;
    use crate::triage::reply::ReplySynthesizer;
    use crate::triage::types::{Category, ThreadStatus, Urgency};

    fn classification(
        category: Category,
        sentiment: Sentiment,
        needs_escalation: bool,
    ) -> Classification {
        Classification {
            category,
            urgency: Urgency::Normal,
            sentiment,
            thread_status: ThreadStatus::Single,
            needs_escalation,
            memory: SenderMemory::default(),
        }
    }

    fn reply(text: &str, tone: Tone) -> Reply {
        Reply {
            reply_text: text.into(),
            tone,
            requires_human_review: false,
            summary: "test".into(),
        }
    }

    #[test]
    fn escalation_rejects_resolution_phrase() {
        let supervisor = Supervisor::new();
        let verdict = supervisor.review(
            &classification(Category::Refund, Sentiment::Calm, true),
            &reply("I can help you with your refund. Done.", Tone::Professional),
        );
        assert_eq!(verdict.action, VerdictAction::EscalateToHuman);
        assert!(verdict.needs_human);
        assert_eq!(verdict.final_reply, "");
        assert_eq!(verdict.quality_score, 2);
    }

    #[test]
    fn escalation_rejects_wrong_tone_for_heated_sender() {
        let supervisor = Supervisor::new();
        let verdict = supervisor.review(
            &classification(Category::Billing, Sentiment::Angry, true),
            &reply("We are looking into it. Please hold on.", Tone::Professional),
        );
        assert_eq!(verdict.action, VerdictAction::EscalateToHuman);
        assert!(verdict.needs_human);
        assert!(verdict.reason.contains("empathetic"));
    }

    #[test]
    fn escalation_approves_holding_message_skipping_later_gates() {
        let supervisor = Supervisor::new();
        let classification = classification(Category::Billing, Sentiment::Angry, true);
        let holding = ReplySynthesizer::new().synthesize(&classification);

        let verdict = supervisor.review(&classification, &holding);
        assert_eq!(verdict.action, VerdictAction::Approve);
        assert_eq!(verdict.final_reply, holding.reply_text);
        assert_eq!(verdict.quality_score, 5);
        assert_eq!(verdict.last_interaction_sentiment, Some(Sentiment::Angry));
    }

    #[test]
    fn escalation_gate_ignores_length_and_denylist() {
        // A one-segment holding text passes: gates 2-4 are unreachable
        // on the escalation path.
        let supervisor = Supervisor::new();
        let verdict = supervisor.review(
            &classification(Category::Billing, Sentiment::Calm, true),
            &reply("A specialist will contact you shortly", Tone::Professional),
        );
        assert_eq!(verdict.action, VerdictAction::Approve);
    }

    #[test]
    fn tone_mismatch_for_heated_sender_needs_human() {
        let supervisor = Supervisor::new();
        let verdict = supervisor.review(
            &classification(Category::Billing, Sentiment::Frustrated, false),
            &reply("Here is your answer. Thank you.", Tone::Professional),
        );
        assert_eq!(verdict.action, VerdictAction::EscalateToHuman);
        assert!(verdict.needs_human);
    }

    #[test]
    fn tone_mismatch_for_happy_sender_requests_rewrite() {
        let supervisor = Supervisor::new();
        let verdict = supervisor.review(
            &classification(Category::GeneralInquiry, Sentiment::Happy, false),
            &reply("Here is your answer. Thank you.", Tone::Professional),
        );
        assert_eq!(verdict.action, VerdictAction::Rewrite);
        assert!(!verdict.needs_human);
    }

    #[test]
    fn too_short_reply_requests_rewrite() {
        let supervisor = Supervisor::new();
        // No dot at all: one segment, below the minimum of two.
        let verdict = supervisor.review(
            &classification(Category::GeneralInquiry, Sentiment::Calm, false),
            &reply("Ok", Tone::Professional),
        );
        assert_eq!(verdict.action, VerdictAction::Rewrite);
        assert!(!verdict.needs_human);
        assert!(verdict.reason.contains("length"));
    }

    #[test]
    fn too_long_reply_requests_rewrite() {
        let supervisor = Supervisor::new();
        // Eight dots produce nine segments, above the maximum of six.
        let text = "One. Two. Three. Four. Five. Six. Seven. Eight.";
        let verdict = supervisor.review(
            &classification(Category::GeneralInquiry, Sentiment::Calm, false),
            &reply(text, Tone::Professional),
        );
        assert_eq!(verdict.action, VerdictAction::Rewrite);
        assert!(!verdict.needs_human);
    }

    #[test]
    fn forbidden_phrase_escalates_and_names_the_phrase() {
        let supervisor = Supervisor::new();
        let verdict = supervisor.review(
            &classification(Category::GeneralInquiry, Sentiment::Calm, false),
            &reply("We guarantee a fix. Hold on.", Tone::Professional),
        );
        assert_eq!(verdict.action, VerdictAction::EscalateToHuman);
        assert!(verdict.needs_human);
        assert!(verdict.reason.contains("'guarantee'"));
    }

    #[test]
    fn forbidden_scan_matches_inside_words() {
        // The denylist is substring-based: "AI" fires inside "explain".
        // The refund template trips this gate by construction.
        let supervisor = Supervisor::new();
        let classification = classification(Category::Refund, Sentiment::Neutral, false);
        let refund_reply = ReplySynthesizer::new().synthesize(&classification);

        let verdict = supervisor.review(&classification, &refund_reply);
        assert_eq!(verdict.action, VerdictAction::EscalateToHuman);
        assert!(verdict.reason.contains("'AI'"));
    }

    #[test]
    fn approval_echoes_reply_verbatim() {
        let supervisor = Supervisor::new();
        let text = "Here is the update you asked for. Nothing else is needed.";
        let verdict = supervisor.review(
            &classification(Category::GeneralInquiry, Sentiment::Calm, false),
            &reply(text, Tone::Professional),
        );
        assert_eq!(verdict.action, VerdictAction::Approve);
        assert_eq!(verdict.final_reply, text);
        assert_eq!(verdict.quality_score, 5);
        assert_eq!(verdict.last_interaction_sentiment, Some(Sentiment::Calm));
    }
}
