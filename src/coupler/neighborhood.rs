//! Epsilon-neighborhood mating restriction (AeSeH).

use super::scheduler::{NeighborhoodScheduler, RoundRobinScheduler};
use super::Coupler;
use crate::epsilon::{
    epsilon_partition, AdaptiveEpsilon, AdditiveEpsilonMapping, EpsilonConfig, EpsilonMapping,
};
use crate::error::{MoeaError, Result};
use crate::model::{Individual, IndividualId, Pair};
use crate::random::take_random;
use rand::Rng;
use std::collections::HashSet;

/// How the requested couple count relates to the parent count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CouplingContract {
    /// Any number of couples may be requested.
    #[default]
    General,
    /// Exactly `parents.len() / 2` couples must be requested.
    HalfParents,
}

/// Configuration for [`EpsilonNeighborhoodCoupler`].
///
/// ```
/// use u_moea::coupler::{CouplingContract, NeighborhoodCouplerConfig};
///
/// let config = NeighborhoodCouplerConfig::default()
///     .with_planned_neighborhoods(8)
///     .with_contract(CouplingContract::HalfParents);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NeighborhoodCouplerConfig {
    /// Neighborhood count the epsilon is steered toward.
    pub planned_neighborhoods: usize,

    /// Neighborhood epsilon control loop.
    pub epsilon: EpsilonConfig,

    /// Couple count contract.
    pub contract: CouplingContract,
}

impl Default for NeighborhoodCouplerConfig {
    fn default() -> Self {
        Self {
            planned_neighborhoods: 5,
            epsilon: EpsilonConfig::default(),
            contract: CouplingContract::General,
        }
    }
}

impl NeighborhoodCouplerConfig {
    /// Sets the planned neighborhood count.
    pub fn with_planned_neighborhoods(mut self, n: usize) -> Self {
        self.planned_neighborhoods = n;
        self
    }

    /// Sets the neighborhood epsilon configuration.
    pub fn with_epsilon(mut self, epsilon: EpsilonConfig) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Sets the couple count contract.
    pub fn with_contract(mut self, contract: CouplingContract) -> Self {
        self.contract = contract;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.planned_neighborhoods == 0 {
            return Err(MoeaError::InvalidConfig(
                "planned_neighborhoods must be at least 1".into(),
            ));
        }
        self.epsilon.validate()
    }
}

/// Couples parents from within epsilon-dominance neighborhoods.
///
/// Every call partitions the (deduplicated) parents into neighborhoods using
/// the neighborhood epsilon, then adapts that epsilon: it grows when at
/// least the planned number of neighborhoods came out and shrinks
/// otherwise. Couples are drawn round-robin, one neighborhood per couple.
/// A single-member neighborhood yields a self-pair.
///
/// # Examples
///
/// ```
/// use u_moea::coupler::{Coupler, EpsilonNeighborhoodCoupler, NeighborhoodCouplerConfig};
/// use u_moea::model::{BasicIndividual, Objective, Objectives};
/// use u_moea::random::create_rng;
///
/// let pop: Vec<BasicIndividual> = (0..6)
///     .map(|i| {
///         let mut o = Objectives::new();
///         o.add(Objective::minimize("f1"), i as f64);
///         o.add(Objective::minimize("f2"), (5 - i) as f64);
///         BasicIndividual::new(i, o)
///     })
///     .collect();
/// let parents: Vec<&BasicIndividual> = pop.iter().collect();
///
/// let mut coupler = EpsilonNeighborhoodCoupler::new(&NeighborhoodCouplerConfig::default()).unwrap();
/// let couples = coupler.get_couples(4, &parents, &mut create_rng(1)).unwrap();
/// assert_eq!(couples.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct EpsilonNeighborhoodCoupler<M = AdditiveEpsilonMapping> {
    mapping: M,
    epsilon: AdaptiveEpsilon,
    planned_neighborhoods: usize,
    contract: CouplingContract,
}

impl EpsilonNeighborhoodCoupler<AdditiveEpsilonMapping> {
    /// Creates a coupler with additive mapping.
    pub fn new(config: &NeighborhoodCouplerConfig) -> Result<Self> {
        Self::with_mapping(AdditiveEpsilonMapping, config)
    }
}

impl Default for EpsilonNeighborhoodCoupler<AdditiveEpsilonMapping> {
    fn default() -> Self {
        let config = NeighborhoodCouplerConfig::default();
        Self {
            mapping: AdditiveEpsilonMapping,
            epsilon: AdaptiveEpsilon::default(),
            planned_neighborhoods: config.planned_neighborhoods,
            contract: config.contract,
        }
    }
}

impl<M: EpsilonMapping> EpsilonNeighborhoodCoupler<M> {
    /// Creates a coupler with an explicit mapping.
    pub fn with_mapping(mapping: M, config: &NeighborhoodCouplerConfig) -> Result<Self> {
        config.validate()?;
        Self::with_control_loop(
            mapping,
            AdaptiveEpsilon::from_config(&config.epsilon)?,
            config.planned_neighborhoods,
            config.contract,
        )
    }

    /// Creates a coupler driving an existing epsilon control loop, such as
    /// the neighborhood half of [`EpsilonAdaptation::split`].
    ///
    /// [`EpsilonAdaptation::split`]: crate::epsilon::EpsilonAdaptation::split
    pub fn with_control_loop(
        mapping: M,
        epsilon: AdaptiveEpsilon,
        planned_neighborhoods: usize,
        contract: CouplingContract,
    ) -> Result<Self> {
        if planned_neighborhoods == 0 {
            return Err(MoeaError::InvalidConfig(
                "planned_neighborhoods must be at least 1".into(),
            ));
        }
        Ok(Self {
            mapping,
            epsilon,
            planned_neighborhoods,
            contract,
        })
    }

    /// The neighborhood epsilon control loop.
    pub fn epsilon(&self) -> &AdaptiveEpsilon {
        &self.epsilon
    }

    pub fn planned_neighborhoods(&self) -> usize {
        self.planned_neighborhoods
    }

    pub fn contract(&self) -> CouplingContract {
        self.contract
    }

    /// Partitions `parents` into neighborhoods and adapts the neighborhood
    /// epsilon. Each neighborhood lists its reference first.
    pub fn create_neighborhoods<'a, I: Individual, R: Rng + ?Sized>(
        &mut self,
        parents: &[&'a I],
        rng: &mut R,
    ) -> Vec<Vec<&'a I>> {
        let mut seen: HashSet<IndividualId> = HashSet::with_capacity(parents.len());
        let pool: Vec<&'a I> = parents
            .iter()
            .copied()
            .filter(|p| seen.insert(p.id()))
            .collect();

        let neighborhoods: Vec<Vec<&'a I>> =
            epsilon_partition(&pool, self.epsilon.epsilon(), &self.mapping, rng)
                .iter()
                .map(|cluster| cluster.members())
                .collect();

        log::debug!(
            "created {} neighborhoods (planned {})",
            neighborhoods.len(),
            self.planned_neighborhoods
        );
        self.epsilon
            .adapt(neighborhoods.len() >= self.planned_neighborhoods);
        neighborhoods
    }

    /// Two distinct members of `neighborhood`, or a self-pair if it has one.
    fn pick_couple<'a, I, R: Rng + ?Sized>(neighborhood: &[&'a I], rng: &mut R) -> Pair<&'a I> {
        if neighborhood.len() == 1 {
            return Pair::new(neighborhood[0], neighborhood[0]);
        }
        let mut candidates = neighborhood.to_vec();
        let first = take_random(&mut candidates, rng);
        let second = take_random(&mut candidates, rng);
        Pair::new(first, second)
    }
}

impl<M: EpsilonMapping> Coupler for EpsilonNeighborhoodCoupler<M> {
    fn get_couples<'a, I: Individual, R: Rng + ?Sized>(
        &mut self,
        size: usize,
        parents: &[&'a I],
        rng: &mut R,
    ) -> Result<Vec<Pair<&'a I>>> {
        if self.contract == CouplingContract::HalfParents && size != parents.len() / 2 {
            return Err(MoeaError::SizeMismatch {
                expected: parents.len() / 2,
                actual: size,
            });
        }
        if size == 0 {
            return Ok(Vec::new());
        }
        if parents.is_empty() {
            return Err(MoeaError::EmptyParents);
        }

        let neighborhoods = self.create_neighborhoods(parents, rng);
        let mut scheduler = RoundRobinScheduler::new(neighborhoods.len());

        let mut couples = Vec::with_capacity(size);
        while couples.len() < size {
            let Some(index) = scheduler.next_neighborhood() else {
                break;
            };
            couples.push(Self::pick_couple(&neighborhoods[index], rng));
        }
        Ok(couples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epsilon::{EpsilonAdaptation, SurvivorGeneration};
    use crate::model::{BasicIndividual, Objective, Objectives};
    use crate::random::create_rng;

    fn ind(id: u64, a: f64, b: f64) -> BasicIndividual {
        let mut o = Objectives::new();
        o.add(Objective::minimize("a"), a);
        o.add(Objective::minimize("b"), b);
        BasicIndividual::new(id, o)
    }

    fn front(n: u64) -> Vec<BasicIndividual> {
        (0..n)
            .map(|i| ind(i, i as f64, (n - 1 - i) as f64))
            .collect()
    }

    fn coupler(planned: usize, epsilon: f64) -> EpsilonNeighborhoodCoupler {
        let config = NeighborhoodCouplerConfig::default()
            .with_planned_neighborhoods(planned)
            .with_epsilon(EpsilonConfig::default().with_epsilon(epsilon));
        EpsilonNeighborhoodCoupler::new(&config).unwrap()
    }

    // ---- Config ----

    #[test]
    fn test_zero_planned_rejected() {
        let config = NeighborhoodCouplerConfig::default().with_planned_neighborhoods(0);
        assert!(matches!(
            EpsilonNeighborhoodCoupler::new(&config),
            Err(MoeaError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_control_loop_from_split_adaptation() {
        let adaptation = EpsilonAdaptation::new(
            &EpsilonConfig::default().with_epsilon(0.1),
            &EpsilonConfig::default().with_epsilon(0.3),
        )
        .unwrap();
        let (sampling, neighborhood) = adaptation.split();
        let survivors = SurvivorGeneration::with_mapping(AdditiveEpsilonMapping, sampling);
        let mut c = EpsilonNeighborhoodCoupler::with_control_loop(
            AdditiveEpsilonMapping,
            neighborhood,
            2,
            CouplingContract::General,
        )
        .unwrap();
        assert_eq!(survivors.epsilon().epsilon(), 0.1);
        assert_eq!(c.epsilon().epsilon(), 0.3);

        // only the coupler's loop moves
        let pop = front(10);
        let parents: Vec<&BasicIndividual> = pop.iter().collect();
        c.create_neighborhoods(&parents, &mut create_rng(0));
        assert_ne!(c.epsilon().epsilon(), 0.3);
        assert_eq!(survivors.epsilon().epsilon(), 0.1);
    }

    #[test]
    fn test_control_loop_rejects_zero_planned() {
        assert!(matches!(
            EpsilonNeighborhoodCoupler::with_control_loop(
                AdditiveEpsilonMapping,
                AdaptiveEpsilon::default(),
                0,
                CouplingContract::General,
            ),
            Err(MoeaError::InvalidConfig(_))
        ));
    }

    // ---- Neighborhoods ----

    #[test]
    fn test_neighborhoods_partition_parents() {
        let pop = front(10);
        let parents: Vec<&BasicIndividual> = pop.iter().collect();
        let mut c = coupler(3, 0.2);
        let mut rng = create_rng(6);

        let neighborhoods = c.create_neighborhoods(&parents, &mut rng);
        let mut seen: Vec<u64> = neighborhoods.iter().flatten().map(|i| i.id.0).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..10).collect::<Vec<u64>>());
    }

    #[test]
    fn test_duplicate_parents_counted_once() {
        let pop = front(3);
        let parents: Vec<&BasicIndividual> = vec![&pop[0], &pop[0], &pop[1], &pop[2]];
        let mut c = coupler(2, 0.0);
        let mut rng = create_rng(6);
        let neighborhoods = c.create_neighborhoods(&parents, &mut rng);
        assert_eq!(neighborhoods.iter().map(|n| n.len()).sum::<usize>(), 3);
    }

    #[test]
    fn test_epsilon_grows_with_too_many_neighborhoods() {
        let pop = front(10);
        let parents: Vec<&BasicIndividual> = pop.iter().collect();
        let mut c = coupler(3, 0.0);
        let mut rng = create_rng(6);

        // epsilon 0: ten singleton neighborhoods >= 3 planned
        assert_eq!(c.create_neighborhoods(&parents, &mut rng).len(), 10);
        assert!((c.epsilon().epsilon() - 0.005).abs() < 1e-15);
    }

    #[test]
    fn test_epsilon_shrinks_with_too_few_neighborhoods() {
        let pop = front(10);
        let parents: Vec<&BasicIndividual> = pop.iter().collect();
        let mut c = coupler(3, 5.0);
        let mut rng = create_rng(6);

        assert_eq!(c.create_neighborhoods(&parents, &mut rng).len(), 1);
        assert!((c.epsilon().epsilon() - 4.995).abs() < 1e-12);
    }

    // ---- Couples ----

    #[test]
    fn test_hermit_couples_with_singletons() {
        let pop = front(4);
        let parents: Vec<&BasicIndividual> = pop.iter().collect();
        let mut c = coupler(1, 0.0);
        let mut rng = create_rng(2);

        let couples = c.get_couples(8, &parents, &mut rng).unwrap();
        assert_eq!(couples.len(), 8);
        assert!(couples.iter().all(|p| p.first.id == p.second.id));
    }

    #[test]
    fn test_single_neighborhood_distinct_partners() {
        let pop = front(5);
        let parents: Vec<&BasicIndividual> = pop.iter().collect();
        let mut c = coupler(1, 5.0);
        let mut rng = create_rng(2);

        let couples = c.get_couples(6, &parents, &mut rng).unwrap();
        assert_eq!(couples.len(), 6);
        assert!(couples.iter().all(|p| p.first.id != p.second.id));
    }

    #[test]
    fn test_half_parents_contract() {
        let pop = front(6);
        let parents: Vec<&BasicIndividual> = pop.iter().collect();
        let config = NeighborhoodCouplerConfig::default().with_contract(CouplingContract::HalfParents);
        let mut c = EpsilonNeighborhoodCoupler::new(&config).unwrap();
        let mut rng = create_rng(0);

        assert_eq!(
            c.get_couples(4, &parents, &mut rng).unwrap_err(),
            MoeaError::SizeMismatch {
                expected: 3,
                actual: 4
            }
        );
        assert_eq!(c.get_couples(3, &parents, &mut rng).unwrap().len(), 3);
    }

    #[test]
    fn test_empty_parents() {
        let parents: Vec<&BasicIndividual> = Vec::new();
        let mut c = coupler(2, 0.0);
        let mut rng = create_rng(0);
        assert_eq!(
            c.get_couples(2, &parents, &mut rng).unwrap_err(),
            MoeaError::EmptyParents
        );
    }
}
