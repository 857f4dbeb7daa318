//! Configuration error types.

use crate::core::UnknownPhase;
use crate::enforcement::TableViolation;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a transition table configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON table configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML table configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported configuration format for {path}; expected .json or .toml")]
    UnsupportedFormat { path: PathBuf },

    #[error(transparent)]
    UnknownPhase(#[from] UnknownPhase),

    #[error("transition table rejected: {}", render_violations(.0))]
    Violations(Vec<TableViolation>),
}

fn render_violations(violations: &[TableViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
