//! Orchestrator-side session that owns the authoritative state.

use crate::core::{
    GlobexState, Phase, PhaseHistory, PhaseSet, PhaseTransition, Rejection, TransitionTable,
};
use crate::effects::transition::transition_effect;
use stillwater::effect::BoxedEffect;
use stillwater::prelude::*;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Errors from applying an externally produced snapshot to a session.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error("snapshot belongs to session {found}, expected {expected}")]
    ForeignState { expected: Uuid, found: Uuid },

    #[error("snapshot was computed at revision {found}, session is at revision {current}")]
    Stale { current: u64, found: u64 },

    #[error("snapshot changes session fields other than the phase")]
    Diverged,
}

/// A snapshot computed by [`PhaseSession::request_effect`], not yet applied.
///
/// Remembers the session revision it was computed from. Once the session
/// has moved on, through a transition or an [`update`](PhaseSession::update),
/// it can no longer be applied.
#[derive(Clone, Debug, PartialEq)]
pub struct StagedTransition {
    revision: u64,
    pub state: GlobexState,
}

impl StagedTransition {
    /// Session revision the snapshot was computed from.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn into_state(self) -> GlobexState {
        self.state
    }
}

/// A running workflow session.
///
/// Holds the current [`GlobexState`], the table that governs it and the
/// history of accepted transitions. Every phase change goes through the
/// transition engine; the session only records and logs the outcome.
///
/// A session is owned through `&mut`. It provides no atomicity when the
/// same state is also held elsewhere: callers that race on one logical
/// session must arbitrate between the resulting snapshots themselves.
///
/// # Example
///
/// ```rust
/// use globex_phases::core::{Phase, TransitionTable};
/// use globex_phases::effects::PhaseSession;
///
/// let mut session = PhaseSession::new(TransitionTable::workflow());
/// assert_eq!(session.current_phase(), Phase::Research);
///
/// session.request(Phase::Interview).unwrap();
/// assert!(session.request(Phase::Ralph).is_err());
/// assert_eq!(session.history().path(), vec![Phase::Research, Phase::Interview]);
/// ```
#[derive(Clone, Debug)]
pub struct PhaseSession {
    table: TransitionTable,
    state: GlobexState,
    history: PhaseHistory,
    revision: u64,
}

impl PhaseSession {
    /// Start a new session at the table's entry phase.
    pub fn new(table: TransitionTable) -> Self {
        let state = GlobexState::new(table.entry());
        debug!(session_id = %state.session_id, phase = %state.current_phase, "session started");
        Self {
            table,
            state,
            history: PhaseHistory::new(),
            revision: 0,
        }
    }

    /// Continue a session from previously saved parts.
    pub fn resume(table: TransitionTable, state: GlobexState, history: PhaseHistory) -> Self {
        debug!(session_id = %state.session_id, phase = %state.current_phase, "session resumed");
        Self {
            table,
            state,
            history,
            revision: 0,
        }
    }

    pub fn state(&self) -> &GlobexState {
        &self.state
    }

    pub fn current_phase(&self) -> Phase {
        self.state.current_phase
    }

    pub fn history(&self) -> &PhaseHistory {
        &self.history
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Number of changes made to the state since this session object was
    /// created or resumed.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Phases the session may move to next.
    pub fn valid_targets(&self) -> PhaseSet {
        self.table.targets(self.state.current_phase)
    }

    /// Whether the current phase has no outgoing transitions.
    pub fn is_terminal(&self) -> bool {
        self.table.is_terminal(self.state.current_phase)
    }

    /// Ask to move to `to`.
    ///
    /// On success the new snapshot becomes authoritative and the move is
    /// recorded. On rejection nothing changes.
    pub fn request(&mut self, to: Phase) -> Result<&GlobexState, Rejection> {
        match self.table.transition_phase(&self.state, to) {
            Ok(next) => Ok(self.commit(next)),
            Err(rejection) => {
                warn!(
                    session_id = %self.state.session_id,
                    from = %rejection.from,
                    to = %rejection.to,
                    valid = %rejection.valid_targets,
                    "phase transition rejected"
                );
                Err(rejection)
            }
        }
    }

    /// Describe a move to `to` as an effect over the current snapshot.
    ///
    /// Run it, then hand the result to [`apply`](Self::apply).
    pub fn request_effect<Env>(&self, to: Phase) -> BoxedEffect<StagedTransition, Rejection, Env>
    where
        Env: Clone + Send + Sync + 'static,
    {
        let revision = self.revision;
        transition_effect(&self.table, self.state.clone(), to)
            .map(move |state| StagedTransition { revision, state })
            .boxed()
    }

    /// Make a snapshot produced by [`request_effect`](Self::request_effect)
    /// authoritative.
    ///
    /// Refused when the session changed after the snapshot was computed,
    /// when the snapshot differs from the current state in anything but
    /// the phase and a later timestamp, or when the move is not an edge
    /// from the current phase.
    pub fn apply(&mut self, staged: StagedTransition) -> Result<&GlobexState, SessionError> {
        let StagedTransition {
            revision,
            state: next,
        } = staged;

        if next.session_id != self.state.session_id {
            return Err(SessionError::ForeignState {
                expected: self.state.session_id,
                found: next.session_id,
            });
        }
        if revision != self.revision {
            warn!(
                session_id = %self.state.session_id,
                current = self.revision,
                found = revision,
                "stale snapshot refused"
            );
            return Err(SessionError::Stale {
                current: self.revision,
                found: revision,
            });
        }
        if let Err(rejection) = self
            .table
            .check_transition(self.state.current_phase, next.current_phase)
        {
            warn!(
                session_id = %self.state.session_id,
                from = %rejection.from,
                to = %rejection.to,
                "snapshot moves along an edge the table does not have"
            );
            return Err(rejection.into());
        }
        if !self.only_phase_differs(&next) {
            warn!(session_id = %self.state.session_id, "diverged snapshot refused");
            return Err(SessionError::Diverged);
        }
        Ok(self.commit(next))
    }

    /// Edit the session fields owned by other subsystems.
    ///
    /// The phase and timestamp are restored afterwards: phase changes go
    /// through [`request`](Self::request). Snapshots staged before the
    /// edit can no longer be applied.
    pub fn update<F>(&mut self, f: F) -> &GlobexState
    where
        F: FnOnce(&mut GlobexState),
    {
        let phase = self.state.current_phase;
        let updated_at = self.state.updated_at;
        f(&mut self.state);
        if self.state.current_phase != phase {
            warn!(
                session_id = %self.state.session_id,
                attempted = %self.state.current_phase,
                "ignored phase change made outside the transition engine"
            );
            self.state.current_phase = phase;
        }
        self.state.updated_at = updated_at;
        self.revision += 1;
        &self.state
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.update(|state| state.paused = paused);
    }

    fn only_phase_differs(&self, next: &GlobexState) -> bool {
        let expected = GlobexState {
            current_phase: next.current_phase,
            updated_at: next.updated_at,
            ..self.state.clone()
        };
        *next == expected && next.updated_at >= self.state.updated_at
    }

    fn commit(&mut self, next: GlobexState) -> &GlobexState {
        let from = self.state.current_phase;
        info!(
            session_id = %next.session_id,
            from = %from,
            to = %next.current_phase,
            "phase transition accepted"
        );
        self.history = self.history.record(PhaseTransition {
            from,
            to: next.current_phase,
            timestamp: next.updated_at,
        });
        self.state = next;
        self.revision += 1;
        &self.state
    }
}
