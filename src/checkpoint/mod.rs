//! Checkpoint and resume for phase sessions.
//!
//! A checkpoint captures the session snapshot and its transition history so
//! a long-running workflow can survive a process restart. The transition
//! table is not part of it: the orchestrator supplies the table again on
//! resume.

use crate::core::{GlobexState, PhaseHistory, TransitionTable};
use crate::effects::PhaseSession;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable checkpoint of a phase session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    pub state: GlobexState,

    pub history: PhaseHistory,
}

// Read before the full checkpoint so that a newer layout is reported as a
// version mismatch rather than a decode error.
#[derive(Deserialize)]
struct VersionHeader {
    version: u32,
}

impl Checkpoint {
    pub fn new(state: GlobexState, history: PhaseHistory) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            state,
            history,
        }
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let header: VersionHeader = serde_json::from_str(json)?;
        check_version(header.version)?;
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        // `version` is the first field, so it decodes on its own.
        let version: u32 = bincode::deserialize(bytes)?;
        check_version(version)?;
        Ok(bincode::deserialize(bytes)?)
    }

    /// Check that the history is consistent with the saved state.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if !self.history.is_contiguous() {
            return Err(CheckpointError::ValidationFailed(
                "history has gaps between transitions".to_string(),
            ));
        }
        if let Some(last) = self.history.last() {
            if last.to != self.state.current_phase {
                return Err(CheckpointError::ValidationFailed(format!(
                    "history ends in {} but state is in {}",
                    last.to, self.state.current_phase
                )));
            }
        }
        Ok(())
    }

    /// Check that every recorded transition is an edge of `table`.
    pub fn validate_against(&self, table: &TransitionTable) -> Result<(), CheckpointError> {
        self.history
            .transitions()
            .iter()
            .try_for_each(|t| table.check_transition(t.from, t.to))
            .map_err(CheckpointError::TableMismatch)
    }
}

fn check_version(version: u32) -> Result<(), CheckpointError> {
    if version == CHECKPOINT_VERSION {
        Ok(())
    } else {
        Err(CheckpointError::UnsupportedVersion {
            found: version,
            supported: CHECKPOINT_VERSION,
        })
    }
}

impl PhaseSession {
    /// Capture the session for later resumption.
    pub fn checkpoint(&self) -> Checkpoint {
        let checkpoint = Checkpoint::new(self.state().clone(), self.history().clone());
        debug!(
            session_id = %checkpoint.state.session_id,
            checkpoint_id = %checkpoint.id,
            phase = %checkpoint.state.current_phase,
            "checkpoint created"
        );
        checkpoint
    }

    /// Resume a session from a checkpoint under `table`.
    ///
    /// The history must be contiguous, end at the saved phase and only use
    /// edges that `table` allows.
    pub fn from_checkpoint(
        table: TransitionTable,
        checkpoint: Checkpoint,
    ) -> Result<Self, CheckpointError> {
        check_version(checkpoint.version)?;
        checkpoint.validate()?;
        checkpoint.validate_against(&table)?;
        Ok(Self::resume(table, checkpoint.state, checkpoint.history))
    }
}
