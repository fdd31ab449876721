//! Rule-based triage engine.
//!
//! Every email flows through, in strict sequence:
//! 1. `Classifier::classify()` — keyword rules, updates sender memory
//! 2. `EscalationDecider::decide()` — auto-handle vs. escalate
//! 3. `ReplySynthesizer::synthesize()` — templated reply (approve only)
//! 4. `Supervisor::review()` — gate checks before a reply is released
//!
//! When the decider escalates, stages 3 and 4 never run.

pub mod classifier;
pub mod decision;
pub mod memory;
pub mod pipeline;
pub mod reply;
pub mod supervisor;
pub mod types;
