//! Workflow phases and sets of phases.
//!
//! Phases are opaque identifiers. They carry no ordering of their own:
//! which phase may follow which is decided by a
//! [`TransitionTable`](super::TransitionTable) and nowhere else.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A named stage of the agent workflow.
///
/// # Example
///
/// ```rust
/// use globex_phases::core::Phase;
///
/// assert_eq!(Phase::PlanInterview.name(), "PlanInterview");
/// assert_eq!("Ralph".parse::<Phase>().unwrap(), Phase::Ralph);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum Phase {
    Research,
    Interview,
    Plan,
    PlanInterview,
    Features,
    /// First execution phase.
    Ralph,
    /// Second execution phase.
    Wiggum,
    /// Wrap-up phase. Whether anything leads here is up to the table.
    Complete,
}

impl Phase {
    /// Number of phases in the enumeration.
    pub const COUNT: usize = 8;

    /// Every phase, in declaration order.
    pub const ALL: [Phase; Phase::COUNT] = [
        Phase::Research,
        Phase::Interview,
        Phase::Plan,
        Phase::PlanInterview,
        Phase::Features,
        Phase::Ralph,
        Phase::Wiggum,
        Phase::Complete,
    ];

    /// Stable display name, identical to the serialized form.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Research => "Research",
            Self::Interview => "Interview",
            Self::Plan => "Plan",
            Self::PlanInterview => "PlanInterview",
            Self::Features => "Features",
            Self::Ralph => "Ralph",
            Self::Wiggum => "Wiggum",
            Self::Complete => "Complete",
        }
    }

    /// Slot of this phase in table-sized arrays.
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Research => 0,
            Self::Interview => 1,
            Self::Plan => 2,
            Self::PlanInterview => 3,
            Self::Features => 4,
            Self::Ralph => 5,
            Self::Wiggum => 6,
            Self::Complete => 7,
        }
    }

    /// Look a phase up by its display name.
    pub fn from_name(name: &str) -> Option<Phase> {
        Phase::ALL.into_iter().find(|phase| phase.name() == name)
    }

    const fn bit(self) -> u16 {
        1 << self.index()
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown phase name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown phase '{0}'")]
pub struct UnknownPhase(pub String);

impl FromStr for Phase {
    type Err = UnknownPhase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::from_name(s).ok_or_else(|| UnknownPhase(s.to_string()))
    }
}

/// Order-irrelevant set of phases.
///
/// Backed by a bitset, so it is `Copy` and equality is set equality.
/// Iteration always yields phases in declaration order.
///
/// # Example
///
/// ```rust
/// use globex_phases::core::{Phase, PhaseSet};
///
/// let set = PhaseSet::of(&[Phase::Research, Phase::Plan]);
/// assert!(set.contains(Phase::Plan));
/// assert_eq!(set, PhaseSet::of(&[Phase::Plan, Phase::Research]));
/// assert_eq!(set.to_string(), "{Research, Plan}");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PhaseSet {
    bits: u16,
}

impl PhaseSet {
    /// The empty set.
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Build a set from a slice of phases. Duplicates collapse.
    pub const fn of(phases: &[Phase]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < phases.len() {
            bits |= phases[i].bit();
            i += 1;
        }
        Self { bits }
    }

    /// Return a copy of this set with `phase` added.
    pub const fn with(self, phase: Phase) -> Self {
        Self {
            bits: self.bits | phase.bit(),
        }
    }

    pub fn insert(&mut self, phase: Phase) {
        self.bits |= phase.bit();
    }

    pub fn remove(&mut self, phase: Phase) {
        self.bits &= !phase.bit();
    }

    pub const fn contains(self, phase: Phase) -> bool {
        self.bits & phase.bit() != 0
    }

    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Phase> {
        Phase::ALL
            .into_iter()
            .filter(move |phase| self.contains(*phase))
    }

    pub fn to_vec(self) -> Vec<Phase> {
        self.iter().collect()
    }
}

impl FromIterator<Phase> for PhaseSet {
    fn from_iter<I: IntoIterator<Item = Phase>>(iter: I) -> Self {
        let mut set = PhaseSet::empty();
        for phase in iter {
            set.insert(phase);
        }
        set
    }
}

impl Extend<Phase> for PhaseSet {
    fn extend<I: IntoIterator<Item = Phase>>(&mut self, iter: I) {
        for phase in iter {
            self.insert(phase);
        }
    }
}

impl fmt::Debug for PhaseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for PhaseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Phase::name).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

impl Serialize for PhaseSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_vec().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PhaseSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let phases = Vec::<Phase>::deserialize(deserializer)?;
        Ok(phases.into_iter().collect())
    }
}
