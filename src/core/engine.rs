//! The transition engine.
//!
//! Both operations are pure apart from reading the wall clock on a
//! successful transition. They never log, never retry and never mutate
//! their inputs. They are safe to call from any number of threads, but
//! they do not arbitrate between callers racing on the same session:
//! whichever resulting snapshot the caller stores wins.

use super::phase::{Phase, PhaseSet};
use super::state::GlobexState;
use super::table::TransitionTable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A requested transition that the table does not allow.
///
/// Carries everything needed to report "you are in X; valid moves are
/// {...}" without consulting the table again.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize, thiserror::Error)]
#[error("invalid phase transition from {from} to {to}; valid targets: {valid_targets}")]
pub struct Rejection {
    pub from: Phase,
    pub to: Phase,
    pub valid_targets: PhaseSet,
}

impl TransitionTable {
    /// Advance `state` to `to`, stamping the result with the current time.
    ///
    /// # Example
    ///
    /// ```rust
    /// use globex_phases::core::{GlobexState, Phase, TransitionTable};
    ///
    /// let table = TransitionTable::workflow();
    /// let state = GlobexState::new(Phase::Research);
    ///
    /// let next = table.transition_phase(&state, Phase::Interview).unwrap();
    /// assert_eq!(next.current_phase, Phase::Interview);
    /// assert_eq!(state.current_phase, Phase::Research); // input untouched
    ///
    /// let rejection = table.transition_phase(&state, Phase::Features).unwrap_err();
    /// assert_eq!(rejection.valid_targets.to_vec(), vec![Phase::Interview]);
    /// ```
    pub fn transition_phase(
        &self,
        state: &GlobexState,
        to: Phase,
    ) -> Result<GlobexState, Rejection> {
        self.check_transition(state.current_phase, to)?;
        Ok(advance(state, to, Utc::now()))
    }

    /// Same as [`transition_phase`](Self::transition_phase) with a caller
    /// supplied clock reading.
    pub fn transition_phase_at(
        &self,
        state: &GlobexState,
        to: Phase,
        now: DateTime<Utc>,
    ) -> Result<GlobexState, Rejection> {
        self.check_transition(state.current_phase, to)?;
        Ok(advance(state, to, now))
    }

    /// Check a single edge, producing the rejection on failure.
    pub fn check_transition(&self, from: Phase, to: Phase) -> Result<(), Rejection> {
        if self.is_valid_transition(from, to) {
            Ok(())
        } else {
            Err(Rejection {
                from,
                to,
                valid_targets: self.targets(from),
            })
        }
    }
}

fn advance(state: &GlobexState, to: Phase, now: DateTime<Utc>) -> GlobexState {
    GlobexState {
        current_phase: to,
        updated_at: now,
        ..state.clone()
    }
}

/// Whether `table` allows moving from `from` to `to`.
pub fn is_valid_transition(table: &TransitionTable, from: Phase, to: Phase) -> bool {
    table.is_valid_transition(from, to)
}

/// Advance `state` to `to` under `table`.
pub fn transition_phase(
    table: &TransitionTable,
    state: &GlobexState,
    to: Phase,
) -> Result<GlobexState, Rejection> {
    table.transition_phase(state, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::{FileReference, Finding, Severity};
    use chrono::Duration;

    const WORKFLOW: TransitionTable = TransitionTable::workflow();

    fn fixed_time() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn legal_move_updates_phase_and_timestamp() {
        let t0 = fixed_time();
        let state = GlobexState::new_at(Phase::Research, t0);
        let t1 = t0 + Duration::seconds(5);

        let next = WORKFLOW
            .transition_phase_at(&state, Phase::Interview, t1)
            .unwrap();

        assert_eq!(next.current_phase, Phase::Interview);
        assert_eq!(next.updated_at, t1);
        assert_eq!(next.created_at, t0);
        assert_eq!(next.session_id, state.session_id);
    }

    #[test]
    fn illegal_move_reports_full_target_set() {
        let state = GlobexState::new(Phase::Interview);
        let rejection = transition_phase(&WORKFLOW, &state, Phase::Features).unwrap_err();

        assert_eq!(
            rejection,
            Rejection {
                from: Phase::Interview,
                to: Phase::Features,
                valid_targets: PhaseSet::of(&[Phase::Plan, Phase::Research]),
            }
        );
    }

    #[test]
    fn rejection_message_lists_valid_targets() {
        let state = GlobexState::new(Phase::Research);
        let rejection = transition_phase(&WORKFLOW, &state, Phase::Plan).unwrap_err();
        assert_eq!(
            rejection.to_string(),
            "invalid phase transition from Research to Plan; valid targets: {Interview}"
        );
    }

    #[test]
    fn input_state_is_not_mutated() {
        let state = GlobexState::new(Phase::Research);
        let before = state.clone();

        let _ = transition_phase(&WORKFLOW, &state, Phase::Interview);
        let _ = transition_phase(&WORKFLOW, &state, Phase::Complete);

        assert_eq!(state, before);
    }

    #[test]
    fn session_fields_are_preserved() {
        let state = GlobexState::new(Phase::Plan)
            .with_file_reference(FileReference::at_line("src/auth.rs", 40))
            .with_finding(Finding {
                summary: "token logged in plaintext".to_string(),
                severity: Severity::Critical,
                file: None,
            })
            .with_message("assistant", "plan drafted");

        let next = transition_phase(&WORKFLOW, &state, Phase::PlanInterview).unwrap();

        assert_eq!(next.file_references, state.file_references);
        assert_eq!(next.findings, state.findings);
        assert_eq!(next.conversation, state.conversation);
        assert_eq!(next.paused, state.paused);
    }

    #[test]
    fn terminal_phase_rejects_every_target() {
        let state = GlobexState::new(Phase::Complete);
        for to in Phase::ALL {
            let rejection = transition_phase(&WORKFLOW, &state, to).unwrap_err();
            assert!(rejection.valid_targets.is_empty());
        }
    }

    #[test]
    fn check_transition_agrees_with_predicate() {
        for from in Phase::ALL {
            for to in Phase::ALL {
                assert_eq!(
                    WORKFLOW.check_transition(from, to).is_ok(),
                    is_valid_transition(&WORKFLOW, from, to)
                );
            }
        }
    }

    #[test]
    fn rejection_serializes_with_target_names() {
        let rejection = Rejection {
            from: Phase::Ralph,
            to: Phase::Research,
            valid_targets: PhaseSet::of(&[Phase::Wiggum]),
        };
        let json = serde_json::to_value(rejection).unwrap();
        assert_eq!(json["from"], "Ralph");
        assert_eq!(json["valid_targets"][0], "Wiggum");
    }
}
