//! Phase transition history.
//!
//! The engine itself never records history; sessions do, after a
//! transition has been accepted.

use super::phase::Phase;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of one accepted phase change.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PhaseTransition {
    pub from: Phase,
    pub to: Phase,
    pub timestamp: DateTime<Utc>,
}

/// Ordered, immutable history of phase changes.
///
/// `record` returns a new history and leaves the receiver untouched.
///
/// # Example
///
/// ```rust
/// use globex_phases::core::{Phase, PhaseHistory, PhaseTransition};
/// use chrono::Utc;
///
/// let history = PhaseHistory::new().record(PhaseTransition {
///     from: Phase::Research,
///     to: Phase::Interview,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.path(), vec![Phase::Research, Phase::Interview]);
/// ```
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct PhaseHistory {
    transitions: Vec<PhaseTransition>,
}

impl PhaseHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new history with `transition` appended.
    pub fn record(&self, transition: PhaseTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Phases visited in order: the first `from`, then each `to`.
    pub fn path(&self) -> Vec<Phase> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Time between the first and last recorded transitions.
    ///
    /// `None` when empty, or when timestamps run backwards.
    pub fn duration(&self) -> Option<Duration> {
        let first = self.transitions.first()?;
        let last = self.transitions.last()?;
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn transitions(&self) -> &[PhaseTransition] {
        &self.transitions
    }

    pub fn last(&self) -> Option<&PhaseTransition> {
        self.transitions.last()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Whether each transition starts where the previous one ended.
    pub fn is_contiguous(&self) -> bool {
        self.transitions
            .windows(2)
            .all(|pair| pair[0].to == pair[1].from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(from: Phase, to: Phase, timestamp: DateTime<Utc>) -> PhaseTransition {
        PhaseTransition {
            from,
            to,
            timestamp,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = PhaseHistory::new();
        assert!(history.is_empty());
        assert!(history.path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = PhaseHistory::new();
        let next = history.record(step(Phase::Research, Phase::Interview, Utc::now()));

        assert_eq!(history.len(), 0);
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn path_returns_phase_sequence() {
        let now = Utc::now();
        let history = PhaseHistory::new()
            .record(step(Phase::Research, Phase::Interview, now))
            .record(step(Phase::Interview, Phase::Plan, now));

        assert_eq!(
            history.path(),
            vec![Phase::Research, Phase::Interview, Phase::Plan]
        );
        assert_eq!(history.last().map(|t| t.to), Some(Phase::Plan));
    }

    #[test]
    fn duration_spans_first_to_last() {
        let start = Utc::now();
        let history = PhaseHistory::new()
            .record(step(Phase::Research, Phase::Interview, start))
            .record(step(
                Phase::Interview,
                Phase::Plan,
                start + chrono::Duration::seconds(90),
            ));

        assert_eq!(history.duration(), Some(Duration::from_secs(90)));
    }

    #[test]
    fn single_transition_has_zero_duration() {
        let history = PhaseHistory::new().record(step(Phase::Ralph, Phase::Wiggum, Utc::now()));
        assert_eq!(history.duration(), Some(Duration::ZERO));
    }

    #[test]
    fn contiguity_detects_gaps() {
        let now = Utc::now();
        let contiguous = PhaseHistory::new()
            .record(step(Phase::Ralph, Phase::Wiggum, now))
            .record(step(Phase::Wiggum, Phase::Ralph, now));
        assert!(contiguous.is_contiguous());

        let gapped = contiguous.record(step(Phase::Plan, Phase::PlanInterview, now));
        assert!(!gapped.is_contiguous());
    }

    #[test]
    fn history_serializes_correctly() {
        let history = PhaseHistory::new().record(step(Phase::Features, Phase::Ralph, Utc::now()));
        let json = serde_json::to_string(&history).unwrap();
        let back: PhaseHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, history);
    }
}
