//! Scalarized elitism.

use super::Selector;
use crate::error::{MoeaError, Result};
use crate::model::Individual;
use crate::random::pick_index;
use rand::Rng;

/// Ranks individuals by the plain sum of their normalized objective values.
///
/// Parents are drawn uniformly with replacement; the `lambda` individuals
/// with the largest sums become lames. Only meaningful when the objectives
/// share a scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Elitism;

impl Elitism {
    pub fn new() -> Self {
        Self
    }

    fn fitness<I: Individual>(individual: &I) -> f64 {
        individual.objectives().array().iter().sum()
    }
}

impl Selector for Elitism {
    fn init(&mut self, _max_size: usize) {}

    fn get_parents<'a, I: Individual, R: Rng + ?Sized>(
        &mut self,
        mu: usize,
        population: &[&'a I],
        rng: &mut R,
    ) -> Vec<&'a I> {
        if population.is_empty() {
            return Vec::new();
        }
        (0..mu)
            .map(|_| population[pick_index(population.len(), rng)])
            .collect()
    }

    fn get_lames<'a, I: Individual, R: Rng + ?Sized>(
        &mut self,
        lambda: usize,
        population: &[&'a I],
        _rng: &mut R,
    ) -> Result<Vec<&'a I>> {
        if lambda > population.len() {
            return Err(MoeaError::LambdaTooLarge {
                lambda,
                population: population.len(),
            });
        }
        let mut ranked: Vec<(f64, &'a I)> = population
            .iter()
            .map(|&ind| (Self::fitness(ind), ind))
            .collect();
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
        Ok(ranked.into_iter().take(lambda).map(|(_, ind)| ind).collect())
    }
}
