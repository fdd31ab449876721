//! Triage pipeline — pure orchestration, no policy of its own.
//!
//! Flow: intake → classifier → decider → (reply → supervisor, only
//! when the decider approved). When the decider escalates, the reply
//! and supervisor stages are skipped entirely and their slots in the
//! combined result stay `None`.

use chrono::Utc;
use tracing::info;

use crate::intake::Intake;
use crate::triage::classifier::Classifier;
use crate::triage::decision::EscalationDecider;
use crate::triage::memory::MemoryStore;
use crate::triage::reply::ReplySynthesizer;
use crate::triage::supervisor::Supervisor;
use crate::triage::types::{FinalAction, TriageResult, DEFAULT_SENDER};

/// Full email triage pipeline.
pub struct TriagePipeline {
    intake: Intake,
    classifier: Classifier,
    decider: EscalationDecider,
    synthesizer: ReplySynthesizer,
    supervisor: Supervisor,
}

impl TriagePipeline {
    pub fn new() -> Self {
        Self {
            intake: Intake::new(),
            classifier: Classifier::new(),
            decider: EscalationDecider::new(),
            synthesizer: ReplySynthesizer::new(),
            supervisor: Supervisor::new(),
        }
    }

    /// Run the full pipeline on a single raw email.
    ///
    /// `sender` falls back to the `"unknown"` sentinel when intake could
    /// not attribute the message.
    pub fn run(&mut self, subject: &str, body: &str, sender: Option<&str>) -> TriageResult {
        let sender = sender.unwrap_or(DEFAULT_SENDER).to_string();

        let email = self.intake.normalize(subject, body);
        let classification = self.classifier.classify(&email, &sender);
        let decision = self.decider.decide(&classification);

        let (reply, supervisor) = match decision.final_action {
            FinalAction::Approve => {
                let reply = self.synthesizer.synthesize(&classification);
                let verdict = self.supervisor.review(&classification, &reply);
                (Some(reply), Some(verdict))
            }
            FinalAction::EscalateToHuman => (None, None),
        };

        info!(
            sender = %sender,
            category = %classification.category,
            sentiment = %classification.sentiment,
            final_action = decision.final_action.as_str(),
            supervisor_action = supervisor.as_ref().map(|v| v.action.as_str()),
            "Triage complete"
        );

        TriageResult {
            sender,
            email,
            classification,
            decision,
            reply,
            supervisor,
            processed_at: Utc::now(),
        }
    }

    /// Read-only view of the per-sender memory accumulated so far.
    pub fn memory(&self) -> &MemoryStore {
        self.classifier.memory()
    }
}

impl Default for TriagePipeline {
    fn default() -> Self {
        Self::new()
    }
}
