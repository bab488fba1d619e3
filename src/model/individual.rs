//! The individual abstraction consumed by selectors and couplers.

use super::objectives::Objectives;
use std::fmt;

/// Stable identity of an individual across generations.
///
/// Selectors that cache per-individual state (SPEA2) key on this id, so two
/// individuals must never share one while both are alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndividualId(pub u64);

impl fmt::Display for IndividualId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A candidate solution as seen by the selection engine.
///
/// Only identity and the evaluated objectives matter here; genotype,
/// phenotype and evaluation live with the caller. The objectives must be
/// fully computed and must not change while the individual takes part in a
/// selection or coupling pass.
///
/// # Implementing
///
/// ```
/// use u_moea::model::{Individual, IndividualId, Objectives};
///
/// struct Route {
///     id: u64,
///     stops: Vec<usize>,
///     objectives: Objectives,
/// }
///
/// impl Individual for Route {
///     fn id(&self) -> IndividualId { IndividualId(self.id) }
///     fn objectives(&self) -> &Objectives { &self.objectives }
/// }
/// ```
pub trait Individual {
    /// Identity of this individual.
    fn id(&self) -> IndividualId;

    /// The evaluated objectives.
    fn objectives(&self) -> &Objectives;
}

/// Minimal [`Individual`]: an id plus its objectives.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicIndividual {
    pub id: IndividualId,
    pub objectives: Objectives,
}

impl BasicIndividual {
    /// Creates an individual with the given id.
    pub fn new(id: u64, objectives: Objectives) -> Self {
        Self {
            id: IndividualId(id),
            objectives,
        }
    }
}

impl Individual for BasicIndividual {
    fn id(&self) -> IndividualId {
        self.id
    }

    fn objectives(&self) -> &Objectives {
        &self.objectives
    }
}
