//! Transition table configuration.
//!
//! The integrating orchestrator may supply its own table as JSON or TOML.
//! Phases are written by name; a phase missing from `transitions` is
//! terminal. Every loaded table is checked with [`TableRules`] before use.
//!
//! ```toml
//! entry = "Research"
//! on_violation = "abort"
//!
//! [transitions]
//! Research = ["Interview"]
//! Interview = ["Plan", "Research"]
//! Plan = []
//! ```

use crate::builder::TransitionTableBuilder;
use crate::core::{Phase, TransitionTable};
use crate::enforcement::{TableRulesBuilder, ViolationStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use stillwater::validation::Validation;
use tracing::{info, warn};

pub mod error;

pub use error::ConfigError;

/// Serializable description of a transition table.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    /// Entry phase; `Research` when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<Phase>,

    /// Phase name -> names of the phases directly reachable from it.
    #[serde(default)]
    pub transitions: BTreeMap<String, Vec<Phase>>,

    #[serde(default)]
    pub on_violation: ViolationStrategy,

    #[serde(default)]
    pub deny_self_loops: bool,
}

impl TableConfig {
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Read a configuration file, choosing the format by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            Some("toml") => Self::from_toml_str(&contents),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Describe an existing table.
    pub fn from_table(table: &TransitionTable) -> Self {
        let transitions = Phase::ALL
            .into_iter()
            .filter(|phase| !table.is_terminal(*phase))
            .map(|phase| (phase.name().to_string(), table.targets(phase).to_vec()))
            .collect();
        Self {
            entry: Some(table.entry()),
            transitions,
            on_violation: ViolationStrategy::Abort,
            deny_self_loops: false,
        }
    }

    /// Build the table and check it.
    ///
    /// With [`ViolationStrategy::Abort`] any violation fails the load; with
    /// [`ViolationStrategy::IgnoreAndLog`] each one is logged and the table
    /// is returned anyway.
    pub fn into_table(self) -> Result<TransitionTable, ConfigError> {
        let mut builder = TransitionTableBuilder::new().entry(self.entry.unwrap_or(Phase::Research));
        for (name, targets) in &self.transitions {
            let from: Phase = name.parse()?;
            builder = builder.allow_any(from, targets.iter().copied());
        }
        let table = builder.build();

        let rules = TableRulesBuilder::new()
            .deny_self_loops(self.deny_self_loops)
            .on_violation(self.on_violation)
            .build();

        if let Validation::Failure(violations) = rules.enforce(&table) {
            let violations: Vec<_> = violations.iter().cloned().collect();
            match rules.violation_strategy() {
                ViolationStrategy::Abort => return Err(ConfigError::Violations(violations)),
                ViolationStrategy::IgnoreAndLog => {
                    for violation in &violations {
                        warn!(%violation, "accepting transition table despite violation");
                    }
                }
            }
        }

        info!(
            entry = %table.entry(),
            edges = table.edges().count(),
            "transition table loaded"
        );
        Ok(table)
    }
}

/// Load and check a table from a JSON or TOML file.
pub fn load_table(path: impl AsRef<Path>) -> Result<TransitionTable, ConfigError> {
    TableConfig::load(path)?.into_table()
}
