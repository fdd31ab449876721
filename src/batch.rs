//! Batch runner — loads raw emails from a JSON file, runs each through
//! the pipeline, and writes one flattened record per email.
//!
//! Non-UTF-8 input files are read lossily rather than rejected. A
//! missing `id` gets a generated UUID; a missing `sender` falls back to
//! the `"unknown"` sentinel. `subject` and `body` are required and
//! fail fast with a typed error.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::BatchError;
use crate::triage::pipeline::TriagePipeline;
use crate::triage::types::{
    Category, Confidence, FinalAction, Sentiment, ThreadStatus, TriageResult, Urgency,
    VerdictAction,
};

/// One raw email as it appears in the input file. All fields optional
/// so that a missing required field produces a precise error instead of
/// a serde parse failure.
#[derive(Debug, Deserialize)]
struct RawEmail {
    id: Option<String>,
    subject: Option<String>,
    body: Option<String>,
    sender: Option<String>,
}

/// A validated inbound email ready for the pipeline.
#[derive(Debug, Clone)]
pub struct InboundEmail {
    pub id: String,
    pub subject: String,
    pub body: String,
    pub sender: Option<String>,
}

/// One flattened result row, mirroring the combined pipeline record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRecord {
    pub id: String,
    pub subject: String,
    pub clean_subject: String,
    pub clean_body: String,
    pub category: Category,
    pub urgency: Urgency,
    pub sentiment: Sentiment,
    pub thread_status: ThreadStatus,
    pub needs_escalation: bool,
    pub final_action: FinalAction,
    pub decision_reason: String,
    pub decision_confidence: Confidence,
    /// Reply text when one was synthesized, empty otherwise.
    pub final_reply: String,
    pub supervisor_action: Option<VerdictAction>,
    pub supervisor_reason: Option<String>,
}

/// Load and validate emails from a JSON array file.
pub fn load_emails(path: &Path) -> Result<Vec<InboundEmail>, BatchError> {
    let bytes = fs::read(path)?;
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!(path = %path.display(), "Input is not valid UTF-8, reading lossily");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };

    let raw: Vec<RawEmail> = serde_json::from_str(&text)?;
    if raw.is_empty() {
        return Err(BatchError::Empty(path.display().to_string()));
    }

    raw.into_iter()
        .enumerate()
        .map(|(index, raw)| {
            let subject = raw
                .subject
                .ok_or(BatchError::MissingField { index, field: "subject" })?;
            let body = raw
                .body
                .ok_or(BatchError::MissingField { index, field: "body" })?;
            Ok(InboundEmail {
                id: raw.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                subject,
                body,
                sender: raw.sender,
            })
        })
        .collect()
}

/// Run every email through the pipeline, flattening each result.
///
/// The pipeline is shared across the batch so sender memory accumulates
/// over the whole file.
pub fn run_batch(pipeline: &mut TriagePipeline, emails: &[InboundEmail]) -> Vec<BatchRecord> {
    info!(count = emails.len(), "Processing email batch");

    let records: Vec<BatchRecord> = emails
        .iter()
        .map(|email| {
            let result = pipeline.run(&email.subject, &email.body, email.sender.as_deref());
            flatten(&email.id, &email.subject, &result)
        })
        .collect();

    info!(processed = records.len(), "Batch processing complete");
    records
}

/// Flatten a combined pipeline result into a single record.
pub fn flatten(id: &str, subject: &str, result: &TriageResult) -> BatchRecord {
    BatchRecord {
        id: id.to_string(),
        subject: subject.to_string(),
        clean_subject: result.email.subject.clone(),
        clean_body: result.email.body.clone(),
        category: result.classification.category,
        urgency: result.classification.urgency,
        sentiment: result.classification.sentiment,
        thread_status: result.classification.thread_status,
        needs_escalation: result.classification.needs_escalation,
        final_action: result.decision.final_action,
        decision_reason: result.decision.reason.clone(),
        decision_confidence: result.decision.confidence,
        final_reply: result
            .reply
            .as_ref()
            .map(|r| r.reply_text.clone())
            .unwrap_or_default(),
        supervisor_action: result.supervisor.as_ref().map(|v| v.action),
        supervisor_reason: result.supervisor.as_ref().map(|v| v.reason.clone()),
    }
}

/// Write records as pretty-printed JSON.
pub fn write_results(path: &Path, records: &[BatchRecord]) -> Result<(), BatchError> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)?;
    info!(path = %path.display(), count = records.len(), "Results written");
    Ok(())
}
