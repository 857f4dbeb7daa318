//! Validation-based structural checks for transition tables.
//!
//! A table supplied by an integrator may be legal yet useless: phases that
//! can never be entered, or a workflow with no way to finish. These rules
//! use Stillwater's `Validation` to report every problem in one pass
//! rather than stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use globex_phases::core::TransitionTable;
//! use globex_phases::enforcement::{TableRulesBuilder, ViolationStrategy};
//!
//! let rules = TableRulesBuilder::new()
//!     .deny_self_loops(true)
//!     .on_violation(ViolationStrategy::Abort)
//!     .build();
//!
//! assert!(rules.enforce(&TransitionTable::workflow()).is_success());
//! ```

pub mod builder;
pub mod rules;
pub mod violations;

pub use builder::TableRulesBuilder;
pub use rules::{TableCheck, TableRules};
pub use violations::{TableViolation, ViolationStrategy};
