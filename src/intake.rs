//! Intake — cleans raw email text and detects reply threads.
//!
//! Pure text preparation, no policy: whitespace runs collapse to a
//! single space, and fixed case-insensitive markers decide whether the
//! message is part of an existing thread.

use regex::Regex;
use tracing::debug;

use crate::triage::types::{NormalizedEmail, ThreadStatus};

/// Substrings that mark a body as part of an existing thread, matched
/// case-insensitively.
const REPLY_MARKERS: &[&str] = &["re:", "fw:", "fwd:", "wrote:", "forwarded message"];

/// Raw email normalizer.
pub struct Intake {
    whitespace: Regex,
}

impl Intake {
    pub fn new() -> Self {
        Self {
            whitespace: Regex::new(r"\s+").unwrap(),
        }
    }

    /// Normalize a raw subject and body into a `NormalizedEmail`.
    ///
    /// Thread detection runs on the raw body, before cleanup.
    pub fn normalize(&self, subject: &str, body: &str) -> NormalizedEmail {
        let thread_status = detect_thread(body);
        let email = NormalizedEmail {
            subject: self.clean_text(subject),
            body: self.clean_text(body),
            thread_status,
        };
        debug!(
            subject = %email.subject,
            body_len = email.body.len(),
            thread_status = ?email.thread_status,
            "Normalized email"
        );
        email
    }

    /// Collapse whitespace runs to single spaces and trim.
    fn clean_text(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        self.whitespace.replace_all(text, " ").trim().to_string()
    }
}

impl Default for Intake {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify a body as a reply or a standalone message.
fn detect_thread(body: &str) -> ThreadStatus {
    let body = body.to_lowercase();
    if REPLY_MARKERS.iter().any(|m| body.contains(m)) {
        ThreadStatus::Reply
    } else {
        ThreadStatus::Single
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_and_trims() {
        let intake = Intake::new();
        let email = intake.normalize(
            "  RE: Issue with my invoice   ",
            "Hi team,\nI received a wrong invoice.\n\tThanks\nJohn",
        );
        assert_eq!(email.subject, "RE: Issue with my invoice");
        assert_eq!(email.body, "Hi team, I received a wrong invoice. Thanks John");
    }

    #[test]
    fn empty_input_stays_empty() {
        let intake = Intake::new();
        let email = intake.normalize("", "");
        assert_eq!(email.subject, "");
        assert_eq!(email.body, "");
        assert_eq!(email.thread_status, ThreadStatus::Single);
    }

    #[test]
    fn detects_reply_markers_case_insensitively() {
        let intake = Intake::new();
        for body in [
            "RE: earlier mail content",
            "On Monday, alice wrote: hello",
            "---------- Forwarded message ----------\noriginal text",
            "fwd: see below",
        ] {
            let email = intake.normalize("s", body);
            assert_eq!(email.thread_status, ThreadStatus::Reply, "{body}");
        }
    }

    #[test]
    fn plain_message_is_single() {
        let intake = Intake::new();
        let email = intake.normalize("Question", "How do I change my plan?");
        assert_eq!(email.thread_status, ThreadStatus::Single);
    }
}
