//! Session state snapshot.
//!
//! `GlobexState` is owned by the orchestrating layer. The transition
//! engine reads `current_phase` and writes only `current_phase` and
//! `updated_at` on a fresh copy; every other field belongs to some other
//! subsystem and is carried through untouched.

use super::phase::Phase;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Severity attached to a finding.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

/// A pointer into the workspace, optionally at a specific line.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct FileReference {
    pub path: String,
    #[serde(default)]
    pub line: Option<u32>,
}

impl FileReference {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            line: None,
        }
    }

    pub fn at_line(path: impl Into<String>, line: u32) -> Self {
        Self {
            path: path.into(),
            line: Some(line),
        }
    }
}

/// Something the agent discovered while working through a phase.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Finding {
    pub summary: String,
    pub severity: Severity,
    #[serde(default)]
    pub file: Option<FileReference>,
}

/// One turn of the session conversation.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub role: String,
    pub content: String,
}

/// Persistent snapshot of a workflow session.
///
/// Snapshots are values: advancing the phase produces a new snapshot and
/// leaves the previous one valid, so callers can retry or compare.
/// `updated_at` serializes as an RFC 3339 (ISO-8601) string.
///
/// # Example
///
/// ```rust
/// use globex_phases::core::{GlobexState, Phase};
///
/// let state = GlobexState::new(Phase::Research);
/// assert_eq!(state.current_phase, Phase::Research);
/// assert_eq!(state.created_at, state.updated_at);
/// ```
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct GlobexState {
    pub session_id: Uuid,
    pub current_phase: Phase,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub conversation: Vec<ConversationEntry>,
    #[serde(default)]
    pub findings: Vec<Finding>,
    #[serde(default)]
    pub file_references: Vec<FileReference>,
    /// Read by the presentation layer to draw its paused overlay.
    #[serde(default)]
    pub paused: bool,
}

impl GlobexState {
    /// Start a fresh session in `initial`.
    pub fn new(initial: Phase) -> Self {
        Self::new_at(initial, Utc::now())
    }

    /// Start a fresh session with a fixed creation time.
    pub fn new_at(initial: Phase, now: DateTime<Utc>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            current_phase: initial,
            created_at: now,
            updated_at: now,
            conversation: Vec::new(),
            findings: Vec::new(),
            file_references: Vec::new(),
            paused: false,
        }
    }

    pub fn with_file_reference(mut self, reference: FileReference) -> Self {
        self.file_references.push(reference);
        self
    }

    pub fn with_finding(mut self, finding: Finding) -> Self {
        self.findings.push(finding);
        self
    }

    pub fn with_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.conversation.push(ConversationEntry {
            role: role.into(),
            content: content.into(),
        });
        self
    }

    /// Highest severity among the findings, if any.
    pub fn max_severity(&self) -> Option<Severity> {
        self.findings.iter().map(|f| f.severity).max()
    }
}
