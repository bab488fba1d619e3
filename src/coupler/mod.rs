//! Mating: pairing selected parents into couples.
//!
//! | Coupler | Pairing |
//! |---------|---------|
//! | [`DefaultCoupler`] | list order, `(p[2i], p[2i+1])` |
//! | [`RandomCoupler`] | two distinct individuals, uniform |
//! | [`UniqueCoupler`] | same draw as [`RandomCoupler`] |
//! | [`EpsilonNeighborhoodCoupler`] | within ε-dominance neighborhoods, round-robin |

mod default;
mod neighborhood;
mod random;
mod scheduler;

pub use default::DefaultCoupler;
pub use neighborhood::{CouplingContract, EpsilonNeighborhoodCoupler, NeighborhoodCouplerConfig};
pub use random::{RandomCoupler, UniqueCoupler};
pub use scheduler::{NeighborhoodScheduler, RoundRobinScheduler};

use crate::error::Result;
use crate::model::{Individual, Pair};
use rand::Rng;

/// Pairs parents into couples for variation.
pub trait Coupler {
    /// Returns exactly `size` couples drawn from `parents`.
    ///
    /// `size == 0` yields no couples. Otherwise an empty `parents` is
    /// [`MoeaError::EmptyParents`](crate::MoeaError::EmptyParents).
    fn get_couples<'a, I: Individual, R: Rng + ?Sized>(
        &mut self,
        size: usize,
        parents: &[&'a I],
        rng: &mut R,
    ) -> Result<Vec<Pair<&'a I>>>;
}

/// Number of couples needed for `offspring` children when every couple
/// yields two.
///
/// ```
/// assert_eq!(u_moea::coupler::offspring_couple_count(7), 4);
/// ```
pub fn offspring_couple_count(offspring: usize) -> usize {
    offspring.div_ceil(2)
}

/// Closed set of couplers, chosen at configuration time.
#[derive(Debug, Clone)]
pub enum CouplerKind {
    Default(DefaultCoupler),
    Random(RandomCoupler),
    Unique(UniqueCoupler),
    EpsilonNeighborhood(EpsilonNeighborhoodCoupler),
}

impl Default for CouplerKind {
    fn default() -> Self {
        CouplerKind::Default(DefaultCoupler)
    }
}

impl From<DefaultCoupler> for CouplerKind {
    fn from(c: DefaultCoupler) -> Self {
        CouplerKind::Default(c)
    }
}

impl From<RandomCoupler> for CouplerKind {
    fn from(c: RandomCoupler) -> Self {
        CouplerKind::Random(c)
    }
}

impl From<UniqueCoupler> for CouplerKind {
    fn from(c: UniqueCoupler) -> Self {
        CouplerKind::Unique(c)
    }
}

impl From<EpsilonNeighborhoodCoupler> for CouplerKind {
    fn from(c: EpsilonNeighborhoodCoupler) -> Self {
        CouplerKind::EpsilonNeighborhood(c)
    }
}

impl Coupler for CouplerKind {
    fn get_couples<'a, I: Individual, R: Rng + ?Sized>(
        &mut self,
        size: usize,
        parents: &[&'a I],
        rng: &mut R,
    ) -> Result<Vec<Pair<&'a I>>> {
        match self {
            CouplerKind::Default(c) => c.get_couples(size, parents, rng),
            CouplerKind::Random(c) => c.get_couples(size, parents, rng),
            CouplerKind::Unique(c) => c.get_couples(size, parents, rng),
            CouplerKind::EpsilonNeighborhood(c) => c.get_couples(size, parents, rng),
        }
    }
}
