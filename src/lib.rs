//! Globex phases: the phase transition engine of an agent-assisted workflow.
//!
//! A session moves through research, interview, planning, feature
//! breakdown and execution phases. This crate decides which moves are
//! legal and advances the session snapshot, following a "pure core,
//! imperative shell" layout:
//!
//! - [`core`]: phases, the transition table, the session snapshot and the
//!   two engine operations. Pure; no I/O, no logging.
//! - [`effects`]: transitions as Stillwater effects, and [`PhaseSession`]
//!   which owns the authoritative state and logs outcomes.
//! - [`builder`], [`config`], [`enforcement`]: constructing custom tables,
//!   loading them from JSON or TOML, and checking them.
//! - [`checkpoint`]: saving and resuming sessions.
//!
//! The edge set is supplied by the integrating orchestrator; every engine
//! operation takes the table it should enforce.
//!
//! # Example
//!
//! ```rust
//! use globex_phases::core::{is_valid_transition, transition_phase, GlobexState, Phase};
//! use globex_phases::transition_table;
//!
//! let table = transition_table! {
//!     entry: Research;
//!     Research => [Interview],
//!     Interview => [Plan, Research],
//!     Plan => [],
//! };
//! assert!(is_valid_transition(&table, Phase::Research, Phase::Interview));
//!
//! let state = GlobexState::new(table.entry());
//! let next = transition_phase(&table, &state, Phase::Interview).unwrap();
//! assert_eq!(next.current_phase, Phase::Interview);
//!
//! let rejection = transition_phase(&table, &state, Phase::Plan).unwrap_err();
//! assert_eq!(rejection.from, Phase::Research);
//! assert_eq!(rejection.valid_targets.to_vec(), vec![Phase::Interview]);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod effects;
pub mod enforcement;

// Re-export commonly used types
pub use crate::core::{
    is_valid_transition, transition_phase, GlobexState, Phase, PhaseSet, Rejection,
    TransitionTable,
};
pub use crate::effects::PhaseSession;
