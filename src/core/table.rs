//! The transition table: the single source of truth for which phase may
//! follow which.

use super::phase::{Phase, PhaseSet};

/// Immutable, total mapping from each phase to the phases directly
/// reachable from it.
///
/// Totality holds by construction: every phase owns a slot, and a slot
/// nobody filled is an empty set (a terminal phase).
///
/// # Example
///
/// ```rust
/// use globex_phases::core::{Phase, TransitionTable};
///
/// let table = TransitionTable::workflow();
/// assert!(table.is_valid_transition(Phase::Interview, Phase::Research));
/// assert!(!table.is_valid_transition(Phase::Research, Phase::Features));
/// assert!(table.is_terminal(Phase::Complete));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TransitionTable {
    entry: Phase,
    targets: [PhaseSet; Phase::COUNT],
}

impl TransitionTable {
    /// A table with no edges: every phase is terminal.
    pub const fn new(entry: Phase) -> Self {
        Self {
            entry,
            targets: [PhaseSet::empty(); Phase::COUNT],
        }
    }

    pub(crate) const fn from_parts(entry: Phase, targets: [PhaseSet; Phase::COUNT]) -> Self {
        Self { entry, targets }
    }

    /// A sample wiring of the agent workflow.
    ///
    /// The real edge set is policy owned by the integrating orchestrator,
    /// which supplies it through [`TableConfig`](crate::config::TableConfig),
    /// the builder or `transition_table!`. This table is what the demo and
    /// the tests run against; nothing in the crate falls back to it.
    ///
    /// ```text
    /// Research ──▶ Interview ──▶ Plan ──▶ PlanInterview ──▶ Features ──▶ Ralph ◀──▶ Wiggum ──▶ Complete
    ///    ▲             │           ▲            │
    ///    └─────────────┘           └────────────┘
    /// ```
    pub const fn workflow() -> Self {
        let mut targets = [PhaseSet::empty(); Phase::COUNT];
        let mut i = 0;
        while i < Phase::COUNT {
            let phase = Phase::ALL[i];
            targets[phase.index()] = workflow_targets(phase);
            i += 1;
        }
        Self {
            entry: Phase::Research,
            targets,
        }
    }

    /// Phase new sessions start in, by convention.
    pub const fn entry(&self) -> Phase {
        self.entry
    }

    /// Exact set of phases directly reachable from `phase`.
    pub const fn targets(&self, phase: Phase) -> PhaseSet {
        self.targets[phase.index()]
    }

    /// Whether `to` is listed as a target of `from`.
    ///
    /// Self-transitions are valid only when the table lists them.
    pub const fn is_valid_transition(&self, from: Phase, to: Phase) -> bool {
        self.targets(from).contains(to)
    }

    /// Whether `phase` has no outgoing edges.
    pub const fn is_terminal(&self, phase: Phase) -> bool {
        self.targets(phase).is_empty()
    }

    /// Every `(from, to)` edge, grouped by source phase in declaration order.
    pub fn edges(&self) -> impl Iterator<Item = (Phase, Phase)> + '_ {
        Phase::ALL
            .into_iter()
            .flat_map(move |from| self.targets(from).iter().map(move |to| (from, to)))
    }

    /// All phases reachable from `start` by one or more edges.
    pub fn reachable_from(&self, start: Phase) -> PhaseSet {
        let mut seen = PhaseSet::empty();
        let mut frontier = vec![start];
        while let Some(phase) = frontier.pop() {
            for next in self.targets(phase).iter() {
                if !seen.contains(next) {
                    seen.insert(next);
                    frontier.push(next);
                }
            }
        }
        seen
    }
}

// Exhaustive: a new phase does not compile until its targets are decided.
const fn workflow_targets(phase: Phase) -> PhaseSet {
    match phase {
        Phase::Research => PhaseSet::of(&[Phase::Interview]),
        Phase::Interview => PhaseSet::of(&[Phase::Plan, Phase::Research]),
        Phase::Plan => PhaseSet::of(&[Phase::PlanInterview]),
        Phase::PlanInterview => PhaseSet::of(&[Phase::Features, Phase::Plan]),
        Phase::Features => PhaseSet::of(&[Phase::Ralph]),
        Phase::Ralph => PhaseSet::of(&[Phase::Wiggum]),
        Phase::Wiggum => PhaseSet::of(&[Phase::Ralph, Phase::Complete]),
        Phase::Complete => PhaseSet::empty(),
    }
}
