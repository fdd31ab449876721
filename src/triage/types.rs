//! Shared types for the triage pipeline.
//!
//! Every record that crosses a stage boundary lives here. Stages never
//! share mutable state through these types — `Classification` is
//! immutable once produced and carries a snapshot of the sender memory
//! taken after the classifier's update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::triage::memory::SenderMemory;

/// Sender identifier used when the intake step could not attribute the email.
pub const DEFAULT_SENDER: &str = "unknown";

// ── Normalized email ────────────────────────────────────────────────

/// Whether a message stands alone or is part of an existing thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadStatus {
    Single,
    Reply,
}

/// A cleaned inbound email, produced by intake and consumed read-only
/// by the classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedEmail {
    /// Subject with whitespace collapsed and trimmed.
    pub subject: String,
    /// Body with whitespace collapsed and trimmed. May be empty.
    pub body: String,
    /// Thread detection from reply markers in the raw body.
    pub thread_status: ThreadStatus,
}

// ── Classification dimensions ───────────────────────────────────────

/// Topic category of a message. The classifier never produces any
/// value outside this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Billing,
    TechnicalIssue,
    Refund,
    Complaint,
    GeneralInquiry,
}

impl Category {
    /// Wire/display name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Billing => "billing",
            Self::TechnicalIssue => "technical_issue",
            Self::Refund => "refund",
            Self::Complaint => "complaint",
            Self::GeneralInquiry => "general_inquiry",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emotional tone of a message. Exactly one value per message;
/// `Neutral` is the catch-all when no keyword matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Angry,
    Frustrated,
    Confused,
    Calm,
    Neutral,
    Happy,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Angry => "angry",
            Self::Frustrated => "frustrated",
            Self::Confused => "confused",
            Self::Calm => "calm",
            Self::Neutral => "neutral",
            Self::Happy => "happy",
        }
    }

    /// Angry and frustrated senders get special handling in every stage.
    pub fn is_heated(&self) -> bool {
        matches!(self, Self::Angry | Self::Frustrated)
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How quickly the sender expects a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Normal,
    High,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the classifier. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub category: Category,
    pub urgency: Urgency,
    pub sentiment: Sentiment,
    pub thread_status: ThreadStatus,
    /// True when the message must reach a human regardless of what
    /// later stages decide.
    pub needs_escalation: bool,
    /// Snapshot of the sender's memory record, taken after this
    /// message was counted.
    pub memory: SenderMemory,
}

// ── Decision ────────────────────────────────────────────────────────

/// Routing decision for a classified message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalAction {
    /// Safe to auto-handle with a templated reply.
    Approve,
    /// Hand off to a human agent; no reply is synthesized.
    EscalateToHuman,
}

impl FinalAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::EscalateToHuman => "escalate_to_human",
        }
    }
}

/// How sure the decision policy is about its routing choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// Output of the escalation decider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionResult {
    pub final_action: FinalAction,
    /// Human-readable justification for the chosen branch.
    pub reason: String,
    pub confidence: Confidence,
}

// ── Reply ───────────────────────────────────────────────────────────

/// Tone of a synthesized reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Empathetic,
    Professional,
    Friendly,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empathetic => "empathetic",
            Self::Professional => "professional",
            Self::Friendly => "friendly",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A synthesized reply awaiting supervisor review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply {
    pub reply_text: String,
    pub tone: Tone,
    /// True when the reply is a holding message rather than an answer.
    pub requires_human_review: bool,
    /// One-line summary for the supervisor naming category and tone.
    pub summary: String,
}

// ── Verdict ─────────────────────────────────────────────────────────

/// Supervisor outcome for a synthesized reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictAction {
    /// Release the reply as-is.
    Approve,
    /// Reply failed a soft gate; regenerate it.
    Rewrite,
    /// Reply failed a hard gate; a human must take over.
    EscalateToHuman,
}

impl VerdictAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Rewrite => "rewrite",
            Self::EscalateToHuman => "escalate_to_human",
        }
    }
}

/// Output of the supervisor's gate evaluation.
///
/// `final_reply` is non-empty exactly when `action` is `Approve`, and
/// then echoes the reviewed reply text verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub action: VerdictAction,
    pub final_reply: String,
    pub reason: String,
    pub needs_human: bool,
    /// 5 on approval, 2 on any rejection.
    pub quality_score: u8,
    /// Sentiment recorded for memory purposes on approval only.
    pub last_interaction_sentiment: Option<Sentiment>,
}

// ── Combined result ─────────────────────────────────────────────────

/// One combined record per processed message, exposing every stage's
/// output. Stages skipped because the decider escalated are `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageResult {
    pub sender: String,
    pub email: NormalizedEmail,
    pub classification: Classification,
    pub decision: DecisionResult,
    pub reply: Option<Reply>,
    pub supervisor: Option<Verdict>,
    /// When pipeline processing completed.
    pub processed_at: DateTime<Utc>,
}
