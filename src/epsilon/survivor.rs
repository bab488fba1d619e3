//! Epsilon-sampling survivor selection (AeSeH).
//!
//! # References
//!
//! - Aguirre, Oyama & Tanaka (2013), "Adaptive ε-Sampling and ε-Hood for
//!   Evolutionary Many-Objective Optimization", EMO 2013, 322-336

use super::adaptive::{AdaptiveEpsilon, EpsilonConfig};
use super::mapping::{AdditiveEpsilonMapping, EpsilonMapping};
use super::partition::epsilon_partition;
use crate::error::Result;
use crate::model::{Individual, IndividualId};
use crate::random::sample_without_replacement;
use crate::sorting::{extreme_individuals, NonDominatedFronts};
use rand::Rng;
use std::collections::HashSet;

/// Outcome of epsilon sampling over a set of non-dominated individuals.
#[derive(Debug, Clone)]
pub struct EpsilonSample<'a, I> {
    /// The randomly picked cluster references.
    pub dominant: Vec<&'a I>,
    /// Everything the references epsilon-dominate.
    pub dominated: Vec<&'a I>,
}

/// Chooses the survivors of a generation.
///
/// When the Pareto front is larger than the survivor target, the extreme
/// individuals always survive and the rest of the front is thinned by
/// epsilon sampling; the sampling epsilon adapts after every such pass so
/// that the epsilon-dominant count approaches the target. Otherwise whole
/// fronts are taken best first and the cut-point front is sampled uniformly.
///
/// # Examples
///
/// ```
/// use u_moea::epsilon::{EpsilonConfig, SurvivorGeneration};
/// use u_moea::model::{BasicIndividual, Objective, Objectives};
/// use u_moea::random::create_rng;
///
/// let pop: Vec<BasicIndividual> = (0..10)
///     .map(|i| {
///         let mut o = Objectives::new();
///         o.add(Objective::minimize("f1"), i as f64);
///         o.add(Objective::minimize("f2"), (9 - i) as f64);
///         BasicIndividual::new(i, o)
///     })
///     .collect();
/// let refs: Vec<&BasicIndividual> = pop.iter().collect();
///
/// let mut generation = SurvivorGeneration::new(&EpsilonConfig::default()).unwrap();
/// let mut rng = create_rng(42);
/// let survivors = generation.get_survivors(&refs, 4, &mut rng);
/// assert_eq!(survivors.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct SurvivorGeneration<M = AdditiveEpsilonMapping> {
    mapping: M,
    epsilon: AdaptiveEpsilon,
}

impl SurvivorGeneration<AdditiveEpsilonMapping> {
    /// Creates a generator with additive mapping and the given sampling
    /// epsilon configuration.
    pub fn new(config: &EpsilonConfig) -> Result<Self> {
        Ok(Self::with_mapping(
            AdditiveEpsilonMapping,
            AdaptiveEpsilon::from_config(config)?,
        ))
    }
}

impl Default for SurvivorGeneration<AdditiveEpsilonMapping> {
    fn default() -> Self {
        Self::with_mapping(AdditiveEpsilonMapping, AdaptiveEpsilon::default())
    }
}

impl<M: EpsilonMapping> SurvivorGeneration<M> {
    /// Creates a generator from an explicit mapping and control loop.
    pub fn with_mapping(mapping: M, epsilon: AdaptiveEpsilon) -> Self {
        Self { mapping, epsilon }
    }

    /// The sampling epsilon control loop.
    pub fn epsilon(&self) -> &AdaptiveEpsilon {
        &self.epsilon
    }

    /// Returns exactly `min(survivor_count, population.len())` survivors.
    pub fn get_survivors<'a, I: Individual, R: Rng + ?Sized>(
        &mut self,
        population: &[&'a I],
        survivor_count: usize,
        rng: &mut R,
    ) -> Vec<&'a I> {
        if survivor_count >= population.len() {
            return population.to_vec();
        }
        if survivor_count == 0 {
            return Vec::new();
        }

        let fronts = NonDominatedFronts::new(population);
        let pareto = fronts.front(0);

        if pareto.len() > survivor_count {
            log::debug!(
                "epsilon sampling: pareto front {} > target {}",
                pareto.len(),
                survivor_count
            );
            let extremes = extreme_individuals(pareto);
            self.add_non_dominated_survivors(&extremes, pareto, survivor_count, rng)
        } else {
            log::debug!(
                "filling survivors from dominated fronts: pareto front {} <= target {}",
                pareto.len(),
                survivor_count
            );
            self.add_dominated_survivors(survivor_count, &fronts, rng)
        }
    }

    /// Survivors drawn from the first front only, which must be larger than
    /// `survivor_count`.
    ///
    /// Extremes survive first. The remaining front members are epsilon
    /// sampled; if the extremes plus the epsilon-dominant individuals exceed
    /// the target the sampling epsilon grows and survivors are drawn from the
    /// dominant set, otherwise it shrinks and all dominant individuals
    /// survive, topped up from the epsilon-dominated set.
    pub fn add_non_dominated_survivors<'a, I: Individual, R: Rng + ?Sized>(
        &mut self,
        extremes: &[&'a I],
        first_front: &[&'a I],
        survivor_count: usize,
        rng: &mut R,
    ) -> Vec<&'a I> {
        let extreme_ids: HashSet<IndividualId> = extremes.iter().map(|e| e.id()).collect();
        let others: Vec<&'a I> = first_front
            .iter()
            .copied()
            .filter(|ind| !extreme_ids.contains(&ind.id()))
            .collect();

        let sample = self.apply_epsilon_sampling(&others, rng);
        let too_many_dominant = extremes.len() + sample.dominant.len() > survivor_count;
        self.epsilon.adapt(too_many_dominant);

        let mut survivors = sample_without_replacement(extremes.to_vec(), survivor_count, rng);
        if too_many_dominant {
            let missing = survivor_count - survivors.len();
            survivors.extend(sample_without_replacement(sample.dominant, missing, rng));
        } else {
            survivors.extend(sample.dominant);
            let missing = survivor_count.saturating_sub(survivors.len());
            survivors.extend(sample_without_replacement(sample.dominated, missing, rng));
        }
        survivors
    }

    /// Splits `individuals` into epsilon-dominant and epsilon-dominated sets
    /// using the current sampling epsilon.
    pub fn apply_epsilon_sampling<'a, I: Individual, R: Rng + ?Sized>(
        &self,
        individuals: &[&'a I],
        rng: &mut R,
    ) -> EpsilonSample<'a, I> {
        let clusters = epsilon_partition(individuals, self.epsilon.epsilon(), &self.mapping, rng);
        let mut sample = EpsilonSample {
            dominant: Vec::with_capacity(clusters.len()),
            dominated: Vec::new(),
        };
        for cluster in clusters {
            sample.dominant.push(cluster.reference);
            sample.dominated.extend(cluster.dominated);
        }
        sample
    }

    /// Survivors when the first front does not exceed `survivor_count`.
    ///
    /// Whole fronts are taken best first while they fit; the front that
    /// would overshoot contributes a uniform random subset.
    pub fn add_dominated_survivors<'a, I: Individual, R: Rng + ?Sized>(
        &self,
        survivor_count: usize,
        fronts: &NonDominatedFronts<'a, I>,
        rng: &mut R,
    ) -> Vec<&'a I> {
        let mut survivors: Vec<&'a I> = Vec::with_capacity(survivor_count);
        for index in 0..fronts.front_count() {
            let front = fronts.front(index);
            let missing = survivor_count.saturating_sub(survivors.len());
            if missing == 0 {
                break;
            }
            if front.len() <= missing {
                survivors.extend_from_slice(front);
            } else {
                survivors.extend(sample_without_replacement(front.to_vec(), missing, rng));
                break;
            }
        }
        survivors
    }
}
