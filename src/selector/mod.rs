//! Parent and survivor selection.
//!
//! A selector is initialized once per run with [`Selector::init`] and then
//! asked, every generation, for the parents of the next offspring
//! ([`Selector::get_parents`]) and for the individuals to discard
//! ([`Selector::get_lames`]).
//!
//! # Selectors
//!
//! | Selector | Parents | Lames |
//! |----------|---------|-------|
//! | [`Nsga2`] | rank + density tournament | worst fronts, lowest density |
//! | [`Spea2`] | fitness + distance tournament | dominated, then most crowded |
//! | [`EpsilonSamplingSelector`] | whole population | complement of ε-sampled survivors |
//! | [`Elitism`] | uniform | largest objective sums |

mod config;
mod elitism;
mod epsilon_sampling;
mod nsga2;
mod spea2;

pub use config::{Nsga2Config, Spea2Config};
pub use elitism::Elitism;
pub use epsilon_sampling::EpsilonSamplingSelector;
pub use nsga2::Nsga2;
pub use spea2::Spea2;

use crate::error::Result;
use crate::model::Individual;
use rand::Rng;

/// Selection contract shared by all selectors.
///
/// Populations are passed as slices of references; returned individuals
/// borrow from the same owner. Implementations identify individuals by
/// [`Individual::id`], so ids must be unique within a population.
pub trait Selector {
    /// Prepares internal state for populations of up to `max_size`.
    fn init(&mut self, max_size: usize);

    /// Selects `mu` parents (with repetition) from `population`.
    ///
    /// An empty population yields no parents.
    fn get_parents<'a, I: Individual, R: Rng + ?Sized>(
        &mut self,
        mu: usize,
        population: &[&'a I],
        rng: &mut R,
    ) -> Vec<&'a I>;

    /// Selects exactly `lambda` distinct individuals to discard.
    ///
    /// Returns [`MoeaError::LambdaTooLarge`](crate::MoeaError::LambdaTooLarge)
    /// if `lambda > population.len()`.
    fn get_lames<'a, I: Individual, R: Rng + ?Sized>(
        &mut self,
        lambda: usize,
        population: &[&'a I],
        rng: &mut R,
    ) -> Result<Vec<&'a I>>;
}

/// Closed set of selectors, chosen at configuration time.
///
/// # Examples
///
/// ```
/// use u_moea::selector::{Nsga2, Nsga2Config, SelectorKind};
///
/// let selector = SelectorKind::from(Nsga2::new(Nsga2Config::default()));
/// assert!(matches!(selector, SelectorKind::Nsga2(_)));
/// ```
#[derive(Debug, Clone)]
pub enum SelectorKind {
    Nsga2(Nsga2),
    Spea2(Spea2),
    EpsilonSampling(EpsilonSamplingSelector),
    Elitism(Elitism),
}

impl Default for SelectorKind {
    fn default() -> Self {
        SelectorKind::Nsga2(Nsga2::default())
    }
}

impl From<Nsga2> for SelectorKind {
    fn from(s: Nsga2) -> Self {
        SelectorKind::Nsga2(s)
    }
}

impl From<Spea2> for SelectorKind {
    fn from(s: Spea2) -> Self {
        SelectorKind::Spea2(s)
    }
}

impl From<EpsilonSamplingSelector> for SelectorKind {
    fn from(s: EpsilonSamplingSelector) -> Self {
        SelectorKind::EpsilonSampling(s)
    }
}

impl From<Elitism> for SelectorKind {
    fn from(s: Elitism) -> Self {
        SelectorKind::Elitism(s)
    }
}

impl Selector for SelectorKind {
    fn init(&mut self, max_size: usize) {
        match self {
            SelectorKind::Nsga2(s) => s.init(max_size),
            SelectorKind::Spea2(s) => s.init(max_size),
            SelectorKind::EpsilonSampling(s) => s.init(max_size),
            SelectorKind::Elitism(s) => s.init(max_size),
        }
    }

    fn get_parents<'a, I: Individual, R: Rng + ?Sized>(
        &mut self,
        mu: usize,
        population: &[&'a I],
        rng: &mut R,
    ) -> Vec<&'a I> {
        match self {
            SelectorKind::Nsga2(s) => s.get_parents(mu, population, rng),
            SelectorKind::Spea2(s) => s.get_parents(mu, population, rng),
            SelectorKind::EpsilonSampling(s) => s.get_parents(mu, population, rng),
            SelectorKind::Elitism(s) => s.get_parents(mu, population, rng),
        }
    }

    fn get_lames<'a, I: Individual, R: Rng + ?Sized>(
        &mut self,
        lambda: usize,
        population: &[&'a I],
        rng: &mut R,
    ) -> Result<Vec<&'a I>> {
        match self {
            SelectorKind::Nsga2(s) => s.get_lames(lambda, population, rng),
            SelectorKind::Spea2(s) => s.get_lames(lambda, population, rng),
            SelectorKind::EpsilonSampling(s) => s.get_lames(lambda, population, rng),
            SelectorKind::Elitism(s) => s.get_lames(lambda, population, rng),
        }
    }
}
