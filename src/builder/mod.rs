//! Builder API for custom transition tables.
//!
//! The integrating orchestrator owns the edge set. It builds its table
//! here, with the [`transition_table!`](crate::transition_table) macro, or
//! from configuration (see [`crate::config`]). [`TransitionTable::workflow`]
//! is a sample wiring to start from.

pub mod macros;
pub mod table;

pub use table::TransitionTableBuilder;

use crate::core::{Phase, TransitionTable};

/// A strictly linear table: each phase leads only to the next one and the
/// last phase is terminal.
///
/// # Example
///
/// ```
/// use globex_phases::builder::linear_table;
/// use globex_phases::core::Phase;
///
/// let table = linear_table(&[Phase::Research, Phase::Plan, Phase::Ralph]);
/// assert_eq!(table.entry(), Phase::Research);
/// assert!(table.is_valid_transition(Phase::Plan, Phase::Ralph));
/// assert!(table.is_terminal(Phase::Ralph));
/// ```
pub fn linear_table(phases: &[Phase]) -> TransitionTable {
    let builder = phases
        .first()
        .map_or_else(TransitionTableBuilder::new, |first| {
            TransitionTableBuilder::new().entry(*first)
        });
    phases
        .windows(2)
        .fold(builder, |builder, pair| builder.allow(pair[0], pair[1]))
        .build()
}
