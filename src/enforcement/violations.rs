//! Table violations and handling strategies.

use crate::core::Phase;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structural problems found in a transition table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableViolation {
    #[error("phase {phase} has transitions but cannot be reached from entry {entry}")]
    Unreachable { phase: Phase, entry: Phase },

    #[error("no terminal phase is reachable from entry {entry}")]
    NoTerminal { entry: Phase },

    #[error("phase {phase} transitions to itself")]
    SelfLoop { phase: Phase },

    #[error("custom check failed: {message}")]
    CustomCheckFailed { message: String },
}

/// What to do with a table that has violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationStrategy {
    /// Refuse the table.
    #[default]
    Abort,

    /// Accept the table but log each violation.
    IgnoreAndLog,
}
