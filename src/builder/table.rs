//! Builder for constructing transition tables.

use crate::core::{Phase, PhaseSet, TransitionTable};

/// Fluent builder for custom [`TransitionTable`]s.
///
/// Phases never mentioned end up terminal.
#[derive(Clone, Debug)]
pub struct TransitionTableBuilder {
    entry: Phase,
    targets: [PhaseSet; Phase::COUNT],
}

impl TransitionTableBuilder {
    /// Create a builder with no edges and `Research` as entry.
    pub fn new() -> Self {
        Self {
            entry: Phase::Research,
            targets: [PhaseSet::empty(); Phase::COUNT],
        }
    }

    /// Start from an existing table's edges and entry.
    pub fn from_table(table: &TransitionTable) -> Self {
        let mut builder = Self::new().entry(table.entry());
        for phase in Phase::ALL {
            builder.targets[phase.index()] = table.targets(phase);
        }
        builder
    }

    /// Set the entry phase.
    pub fn entry(mut self, phase: Phase) -> Self {
        self.entry = phase;
        self
    }

    /// Allow moving from `from` to `to`.
    pub fn allow(mut self, from: Phase, to: Phase) -> Self {
        self.targets[from.index()].insert(to);
        self
    }

    /// Allow moving from `from` to each of `targets`.
    pub fn allow_any<I>(mut self, from: Phase, targets: I) -> Self
    where
        I: IntoIterator<Item = Phase>,
    {
        self.targets[from.index()].extend(targets);
        self
    }

    /// Remove a previously allowed move.
    pub fn forbid(mut self, from: Phase, to: Phase) -> Self {
        self.targets[from.index()].remove(to);
        self
    }

    /// Drop every outgoing edge of `phase`.
    pub fn terminal(mut self, phase: Phase) -> Self {
        self.targets[phase.index()] = PhaseSet::empty();
        self
    }

    pub fn build(self) -> TransitionTable {
        TransitionTable::from_parts(self.entry, self.targets)
    }
}

impl Default for TransitionTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}
