//! Effectful shell around the pure transition engine.
//!
//! - [`transition_effect`]: a transition as a lazy Stillwater effect
//! - [`PhaseSession`]: owns the authoritative state, records history and
//!   logs accepted and rejected transitions
//!
//! Policy never lives here; every decision is delegated to the
//! [`TransitionTable`](crate::core::TransitionTable).

mod session;
mod transition;

pub use session::{PhaseSession, SessionError, StagedTransition};
pub use transition::transition_effect;
