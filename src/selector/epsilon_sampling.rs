//! AeSeH survivor selection as a [`Selector`].

use super::Selector;
use crate::epsilon::{AdditiveEpsilonMapping, EpsilonConfig, EpsilonMapping, SurvivorGeneration};
use crate::error::{MoeaError, Result};
use crate::model::{Individual, IndividualId};
use rand::Rng;
use std::collections::HashSet;

/// Epsilon-sampling selector.
///
/// Every individual is an eligible parent (mating restriction is left to the
/// neighborhood coupler). Lames are the complement of the
/// `population - lambda` survivors picked by [`SurvivorGeneration`].
///
/// # Examples
///
/// ```
/// use u_moea::epsilon::EpsilonConfig;
/// use u_moea::model::{BasicIndividual, Objective, Objectives};
/// use u_moea::random::create_rng;
/// use u_moea::selector::{EpsilonSamplingSelector, Selector};
///
/// let pop: Vec<BasicIndividual> = (0..8)
///     .map(|i| {
///         let mut o = Objectives::new();
///         o.add(Objective::minimize("f1"), i as f64);
///         o.add(Objective::minimize("f2"), (7 - i) as f64);
///         BasicIndividual::new(i, o)
///     })
///     .collect();
/// let refs: Vec<&BasicIndividual> = pop.iter().collect();
///
/// let mut selector = EpsilonSamplingSelector::new(&EpsilonConfig::default()).unwrap();
/// let mut rng = create_rng(3);
/// assert_eq!(selector.get_parents(4, &refs, &mut rng).len(), 8);
/// assert_eq!(selector.get_lames(3, &refs, &mut rng).unwrap().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct EpsilonSamplingSelector<M = AdditiveEpsilonMapping> {
    survivors: SurvivorGeneration<M>,
}

impl EpsilonSamplingSelector<AdditiveEpsilonMapping> {
    /// Creates a selector with additive mapping and the given sampling
    /// epsilon configuration.
    pub fn new(config: &EpsilonConfig) -> Result<Self> {
        Ok(Self {
            survivors: SurvivorGeneration::new(config)?,
        })
    }
}

impl Default for EpsilonSamplingSelector<AdditiveEpsilonMapping> {
    fn default() -> Self {
        Self::with_survivor_generation(SurvivorGeneration::default())
    }
}

impl<M: EpsilonMapping> EpsilonSamplingSelector<M> {
    pub fn with_survivor_generation(survivors: SurvivorGeneration<M>) -> Self {
        Self { survivors }
    }

    pub fn survivor_generation(&self) -> &SurvivorGeneration<M> {
        &self.survivors
    }
}

impl<M: EpsilonMapping> Selector for EpsilonSamplingSelector<M> {
    fn init(&mut self, _max_size: usize) {}

    /// Returns the whole population; `mu` is ignored.
    fn get_parents<'a, I: Individual, R: Rng + ?Sized>(
        &mut self,
        _mu: usize,
        population: &[&'a I],
        _rng: &mut R,
    ) -> Vec<&'a I> {
        population.to_vec()
    }

    fn get_lames<'a, I: Individual, R: Rng + ?Sized>(
        &mut self,
        lambda: usize,
        population: &[&'a I],
        rng: &mut R,
    ) -> Result<Vec<&'a I>> {
        if lambda > population.len() {
            return Err(MoeaError::LambdaTooLarge {
                lambda,
                population: population.len(),
            });
        }
        let survivor_count = population.len() - lambda;
        let survivors: HashSet<IndividualId> = self
            .survivors
            .get_survivors(population, survivor_count, rng)
            .iter()
            .map(|ind| ind.id())
            .collect();

        Ok(population
            .iter()
            .copied()
            .filter(|ind| !survivors.contains(&ind.id()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BasicIndividual, Objective, Objectives};
    use crate::random::create_rng;

    fn ind(id: u64, a: f64, b: f64) -> BasicIndividual {
        let mut o = Objectives::new();
        o.add(Objective::minimize("a"), a);
        o.add(Objective::minimize("b"), b);
        BasicIndividual::new(id, o)
    }

    #[test]
    fn test_lames_complement_survivors() {
        let mut pop: Vec<BasicIndividual> = (0..6)
            .map(|i| ind(i, i as f64, (5 - i) as f64))
            .collect();
        pop.push(ind(6, 9.0, 9.0));
        let refs: Vec<&BasicIndividual> = pop.iter().collect();
        let mut selector = EpsilonSamplingSelector::new(&EpsilonConfig::default()).unwrap();
        let mut rng = create_rng(21);

        for lambda in 0..=refs.len() {
            let lames = selector.get_lames(lambda, &refs, &mut rng).unwrap();
            assert_eq!(lames.len(), lambda);
        }
    }

    #[test]
    fn test_dominated_individual_goes_first() {
        let mut pop: Vec<BasicIndividual> = (0..6)
            .map(|i| ind(i, i as f64, (5 - i) as f64))
            .collect();
        pop.push(ind(6, 9.0, 9.0));
        let refs: Vec<&BasicIndividual> = pop.iter().collect();
        let mut selector = EpsilonSamplingSelector::new(&EpsilonConfig::default()).unwrap();
        let mut rng = create_rng(2);

        let lames = selector.get_lames(1, &refs, &mut rng).unwrap();
        assert_eq!(lames[0].id.0, 6);
    }

    #[test]
    fn test_lames_too_large() {
        let pop = vec![ind(0, 0.0, 0.0)];
        let refs: Vec<&BasicIndividual> = pop.iter().collect();
        let mut selector = EpsilonSamplingSelector::new(&EpsilonConfig::default()).unwrap();
        let mut rng = create_rng(0);
        assert!(selector.get_lames(2, &refs, &mut rng).is_err());
    }
}
