//! Structural rules for transition tables using Validation.

use crate::core::{Phase, PhaseSet, TransitionTable};
use crate::enforcement::violations::{TableViolation, ViolationStrategy};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Type alias for table check functions
pub type TableCheck =
    Box<dyn Fn(&TransitionTable) -> Validation<(), NonEmptyVec<TableViolation>> + Send + Sync>;

/// Checks a table must pass before it is put in service.
/// Uses Validation to accumulate ALL violations.
pub struct TableRules {
    pub(crate) require_reachable: bool,
    pub(crate) require_terminal: bool,
    pub(crate) deny_self_loops: bool,
    pub(crate) custom_checks: Vec<TableCheck>,
    pub(crate) on_violation: ViolationStrategy,
}

impl TableRules {
    /// Reachability and terminal checks, aborting on violation.
    pub fn standard() -> Self {
        Self {
            require_reachable: true,
            require_terminal: true,
            deny_self_loops: false,
            custom_checks: Vec::new(),
            on_violation: ViolationStrategy::Abort,
        }
    }

    /// Enforce all rules, accumulating ALL violations.
    pub fn enforce(&self, table: &TransitionTable) -> Validation<(), NonEmptyVec<TableViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<TableViolation>>> = Vec::new();
        let entry = table.entry();
        let live = table.reachable_from(entry).with(entry);

        if self.require_reachable {
            for phase in mentioned_phases(table).iter() {
                let check = if live.contains(phase) {
                    Validation::success(())
                } else {
                    Validation::fail(TableViolation::Unreachable { phase, entry })
                };
                checks.push(check);
            }
        }

        if self.require_terminal {
            let check = if live.iter().any(|phase| table.is_terminal(phase)) {
                Validation::success(())
            } else {
                Validation::fail(TableViolation::NoTerminal { entry })
            };
            checks.push(check);
        }

        if self.deny_self_loops {
            for phase in Phase::ALL {
                if table.is_valid_transition(phase, phase) {
                    checks.push(Validation::fail(TableViolation::SelfLoop { phase }));
                }
            }
        }

        for check_fn in &self.custom_checks {
            checks.push(check_fn(table));
        }

        Validation::all_vec(checks).map(|_| ())
    }

    pub fn violation_strategy(&self) -> ViolationStrategy {
        self.on_violation
    }
}

impl Default for TableRules {
    fn default() -> Self {
        Self::standard()
    }
}

// Phases with an outgoing edge or named as a target.
fn mentioned_phases(table: &TransitionTable) -> PhaseSet {
    table
        .edges()
        .fold(PhaseSet::empty(), |set, (from, to)| set.with(from).with(to))
}
