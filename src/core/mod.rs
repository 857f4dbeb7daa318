//! Pure core of the phase workflow.
//!
//! - [`Phase`] and [`PhaseSet`]: the closed set of workflow stages
//! - [`TransitionTable`]: the only place transition policy lives
//! - [`GlobexState`]: the session snapshot the engine advances
//! - engine operations: [`is_valid_transition`] and [`transition_phase`]
//!
//! Nothing here performs I/O or logs.

mod engine;
mod history;
mod phase;
mod state;
mod table;

pub use engine::{is_valid_transition, transition_phase, Rejection};
pub use history::{PhaseHistory, PhaseTransition};
pub use phase::{Phase, PhaseSet, UnknownPhase};
pub use state::{ConversationEntry, FileReference, Finding, GlobexState, Severity};
pub use table::TransitionTable;
