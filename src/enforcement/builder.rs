//! Builder API for creating table rules.

use crate::core::TransitionTable;
use crate::enforcement::rules::{TableCheck, TableRules};
use crate::enforcement::violations::{TableViolation, ViolationStrategy};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for creating table rules.
///
/// Starts from [`TableRules::standard`].
pub struct TableRulesBuilder {
    require_reachable: bool,
    require_terminal: bool,
    deny_self_loops: bool,
    custom_checks: Vec<TableCheck>,
    on_violation: ViolationStrategy,
}

impl TableRulesBuilder {
    pub fn new() -> Self {
        Self {
            require_reachable: true,
            require_terminal: true,
            deny_self_loops: false,
            custom_checks: Vec::new(),
            on_violation: ViolationStrategy::Abort,
        }
    }

    /// Toggle the unreachable-phase check
    pub fn require_reachable(mut self, enabled: bool) -> Self {
        self.require_reachable = enabled;
        self
    }

    /// Toggle the reachable-terminal check
    pub fn require_terminal(mut self, enabled: bool) -> Self {
        self.require_terminal = enabled;
        self
    }

    /// Toggle reporting of phases that list themselves as targets
    pub fn deny_self_loops(mut self, enabled: bool) -> Self {
        self.deny_self_loops = enabled;
        self
    }

    /// Add a custom validation check
    pub fn require<F>(mut self, check: F) -> Self
    where
        F: Fn(&TransitionTable) -> Validation<(), NonEmptyVec<TableViolation>>
            + Send
            + Sync
            + 'static,
    {
        self.custom_checks.push(Box::new(check));
        self
    }

    /// Add a simple predicate check with error message
    pub fn require_pred<F>(mut self, predicate: F, error_msg: String) -> Self
    where
        F: Fn(&TransitionTable) -> bool + Send + Sync + 'static,
    {
        let check = move |table: &TransitionTable| {
            if predicate(table) {
                Validation::success(())
            } else {
                Validation::fail(TableViolation::CustomCheckFailed {
                    message: error_msg.clone(),
                })
            }
        };
        self.custom_checks.push(Box::new(check));
        self
    }

    /// Set violation handling strategy
    pub fn on_violation(mut self, strategy: ViolationStrategy) -> Self {
        self.on_violation = strategy;
        self
    }

    pub fn build(self) -> TableRules {
        TableRules {
            require_reachable: self.require_reachable,
            require_terminal: self.require_terminal,
            deny_self_loops: self.deny_self_loops,
            custom_checks: self.custom_checks,
            on_violation: self.on_violation,
        }
    }
}

impl Default for TableRulesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Phase;

    #[test]
    fn custom_validation_check_works() {
        let rules = TableRulesBuilder::new()
            .require(|table: &TransitionTable| {
                if table.is_valid_transition(Phase::Wiggum, Phase::Complete) {
                    Validation::success(())
                } else {
                    Validation::fail(TableViolation::CustomCheckFailed {
                        message: "Wiggum must be able to finish".to_string(),
                    })
                }
            })
            .build();

        assert!(rules.enforce(&TransitionTable::workflow()).is_success());
        assert!(rules
            .enforce(&TransitionTable::new(Phase::Research))
            .is_failure());
    }

    #[test]
    fn disabled_checks_are_skipped() {
        let table = crate::transition_table! {
            Research => [Interview],
            Interview => [Research],
        };

        let strict = TableRulesBuilder::new().build();
        assert!(strict.enforce(&table).is_failure());

        let lenient = TableRulesBuilder::new().require_terminal(false).build();
        assert!(lenient.enforce(&table).is_success());
    }

    #[test]
    fn toggles_can_be_switched_back_off() {
        let table = crate::transition_table! {
            Research => [Research, Interview],
        };

        let rules = TableRulesBuilder::new()
            .deny_self_loops(true)
            .deny_self_loops(false)
            .require_reachable(false)
            .require_reachable(true)
            .build();
        assert!(rules.enforce(&table).is_success());

        let strict = TableRulesBuilder::new().deny_self_loops(true).build();
        assert!(strict.enforce(&table).is_failure());
    }
}
