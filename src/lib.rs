//! Support triage — rule-based email classification, routing and
//! reply validation.

pub mod batch;
pub mod config;
pub mod error;
pub mod intake;
pub mod triage;
