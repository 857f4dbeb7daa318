//! Scenario tests for the transition engine and session layer.

use chrono::{DateTime, Duration, Utc};
use globex_phases::builder::TransitionTableBuilder;
use globex_phases::checkpoint::Checkpoint;
use globex_phases::config::TableConfig;
use globex_phases::core::{
    FileReference, GlobexState, Phase, PhaseSet, Rejection, TransitionTable,
};
use globex_phases::effects::{PhaseSession, SessionError};
use globex_phases::transition_table;
use stillwater::effect::Effect;

fn t0() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-05-04T09:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn research_only_table() -> TransitionTable {
    TransitionTableBuilder::new()
        .allow(Phase::Research, Phase::Interview)
        .build()
}

#[test]
fn legal_move_advances_phase_and_timestamp() {
    let table = research_only_table();
    let state = GlobexState::new_at(Phase::Research, t0());

    let next = table.transition_phase(&state, Phase::Interview).unwrap();

    assert_eq!(next.current_phase, Phase::Interview);
    assert!(next.updated_at >= t0());
}

#[test]
fn illegal_move_is_rejected_with_context() {
    let table = research_only_table();
    let state = GlobexState::new_at(Phase::Research, t0());

    let rejection = table.transition_phase(&state, Phase::Features).unwrap_err();

    assert_eq!(
        rejection,
        Rejection {
            from: Phase::Research,
            to: Phase::Features,
            valid_targets: PhaseSet::of(&[Phase::Interview]),
        }
    );
}

#[test]
fn terminal_phase_rejects_everything() {
    let table = research_only_table();
    let state = GlobexState::new_at(Phase::Interview, t0());

    for to in Phase::ALL {
        let rejection = table.transition_phase(&state, to).unwrap_err();
        assert_eq!(rejection.valid_targets, PhaseSet::empty());
    }
}

#[test]
fn fixed_clock_variant_stamps_given_time() {
    let state = GlobexState::new_at(Phase::Research, t0());
    let later = t0() + Duration::minutes(3);

    let next = TransitionTable::workflow()
        .transition_phase_at(&state, Phase::Interview, later)
        .unwrap();

    assert_eq!(next.updated_at, later);
    assert_eq!(state.updated_at, t0());
}

#[test]
fn original_state_can_be_retried_after_rejection() {
    let table = TransitionTable::workflow();
    let state = GlobexState::new(Phase::Interview);

    assert!(globex_phases::transition_phase(&table, &state, Phase::Ralph).is_err());
    let next = globex_phases::transition_phase(&table, &state, Phase::Plan).unwrap();

    assert_eq!(next.current_phase, Phase::Plan);
    assert_eq!(state.current_phase, Phase::Interview);
}

#[test]
fn macro_declared_table_drives_session() {
    let table = transition_table! {
        entry: Plan;
        Plan => [Ralph],
        Ralph => [Ralph, Complete],
    };
    let mut session = PhaseSession::new(table);

    session.request(Phase::Ralph).unwrap();
    session.request(Phase::Ralph).unwrap();
    session.request(Phase::Complete).unwrap();

    assert!(session.is_terminal());
    assert_eq!(
        session.history().path(),
        vec![Phase::Plan, Phase::Ralph, Phase::Ralph, Phase::Complete]
    );
}

#[test]
fn configured_table_survives_checkpoint_resume() {
    let config = TableConfig::from_toml_str(
        r#"
entry = "Research"

[transitions]
Research = ["Interview"]
Interview = ["Features"]
Features = ["Wiggum"]
"#,
    )
    .unwrap();
    let table = config.into_table().unwrap();

    let mut session = PhaseSession::new(table);
    session.request(Phase::Interview).unwrap();
    let saved = session.checkpoint().to_json().unwrap();

    let restored = Checkpoint::from_json(&saved).unwrap();
    let mut resumed = PhaseSession::from_checkpoint(table, restored).unwrap();

    let rejection = resumed.request(Phase::Plan).unwrap_err();
    assert_eq!(rejection.valid_targets.to_vec(), vec![Phase::Features]);

    resumed.request(Phase::Features).unwrap();
    resumed.request(Phase::Wiggum).unwrap();
    assert!(resumed.is_terminal());
    assert_eq!(resumed.state().session_id, session.state().session_id);
}

#[test]
fn concurrent_callers_get_independent_snapshots() {
    let table = std::sync::Arc::new(TransitionTable::workflow());
    let state = GlobexState::new(Phase::Interview);

    let handles: Vec<_> = [Phase::Plan, Phase::Research, Phase::Features]
        .into_iter()
        .map(|to| {
            let table = std::sync::Arc::clone(&table);
            let state = state.clone();
            std::thread::spawn(move || globex_phases::transition_phase(&table, &state, to))
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(results[0].as_ref().unwrap().current_phase, Phase::Plan);
    assert_eq!(results[1].as_ref().unwrap().current_phase, Phase::Research);
    assert!(results[2].is_err());
    assert_eq!(state.current_phase, Phase::Interview);
}

#[tokio::test]
async fn staged_snapshot_does_not_overwrite_later_edits() {
    let mut session = PhaseSession::new(TransitionTable::workflow());
    let staged = session
        .request_effect::<()>(Phase::Interview)
        .run(&())
        .await
        .unwrap();

    session.update(|state| {
        state
            .file_references
            .push(FileReference::at_line("src/parser.rs", 88));
    });

    assert!(matches!(
        session.apply(staged),
        Err(SessionError::Stale { .. })
    ));
    assert_eq!(session.state().file_references.len(), 1);

    // Re-staging from the edited state carries the edit through.
    let staged = session
        .request_effect::<()>(Phase::Interview)
        .run(&())
        .await
        .unwrap();
    session.apply(staged).unwrap();
    assert_eq!(session.current_phase(), Phase::Interview);
    assert_eq!(session.state().file_references.len(), 1);
}

#[tokio::test]
async fn staged_snapshot_is_refused_after_phase_round_trip() {
    let mut session = PhaseSession::new(TransitionTable::workflow());
    let staged = session
        .request_effect::<()>(Phase::Interview)
        .run(&())
        .await
        .unwrap();

    session.request(Phase::Interview).unwrap();
    session.request(Phase::Research).unwrap();
    let latest = session.state().updated_at;

    assert!(session.apply(staged).is_err());
    assert_eq!(session.state().updated_at, latest);
    assert_eq!(
        session.history().path(),
        vec![Phase::Research, Phase::Interview, Phase::Research]
    );
}
