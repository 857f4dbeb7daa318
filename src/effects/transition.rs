//! Transitions as deferred effects.

use crate::core::{GlobexState, Phase, Rejection, TransitionTable};
use stillwater::effect::BoxedEffect;
use stillwater::prelude::*;

/// Describe a transition without performing it.
///
/// Nothing is evaluated until the effect runs; the success timestamp is
/// taken at run time. The outcome is exactly that of
/// [`TransitionTable::transition_phase`].
///
/// # Example
///
/// ```rust
/// use globex_phases::core::{GlobexState, Phase, TransitionTable};
/// use globex_phases::effects::transition_effect;
/// use stillwater::prelude::*;
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// let state = GlobexState::new(Phase::Research);
/// let effect = transition_effect::<()>(&TransitionTable::workflow(), state, Phase::Interview);
///
/// let next = rt.block_on(effect.run(&())).unwrap();
/// assert_eq!(next.current_phase, Phase::Interview);
/// ```
pub fn transition_effect<Env>(
    table: &TransitionTable,
    state: GlobexState,
    to: Phase,
) -> BoxedEffect<GlobexState, Rejection, Env>
where
    Env: Clone + Send + Sync + 'static,
{
    let table = *table;
    from_fn(move |_env: &Env| table.transition_phase(&state, to)).boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stillwater::effect::Effect;

    #[tokio::test]
    async fn effect_applies_legal_transition() {
        let state = GlobexState::new(Phase::Features);
        let effect =
            transition_effect::<()>(&TransitionTable::workflow(), state.clone(), Phase::Ralph);

        let next = effect.run(&()).await.unwrap();
        assert_eq!(next.current_phase, Phase::Ralph);
        assert_eq!(next.session_id, state.session_id);
    }

    #[tokio::test]
    async fn effect_surfaces_rejection() {
        let state = GlobexState::new(Phase::Features);
        let effect = transition_effect::<()>(&TransitionTable::workflow(), state, Phase::Plan);

        let rejection = effect.run(&()).await.unwrap_err();
        assert_eq!(rejection.from, Phase::Features);
        assert_eq!(rejection.to, Phase::Plan);
        assert_eq!(rejection.valid_targets.to_vec(), vec![Phase::Ralph]);
    }

    #[tokio::test]
    async fn effect_reads_clock_when_run() {
        let state = GlobexState::new(Phase::Research);
        let effect =
            transition_effect::<()>(&TransitionTable::workflow(), state.clone(), Phase::Interview);

        std::thread::sleep(std::time::Duration::from_millis(5));
        let next = effect.run(&()).await.unwrap();
        assert!(next.updated_at > state.updated_at);
    }
}
