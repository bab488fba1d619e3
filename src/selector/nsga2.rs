//! NSGA-II selection: front rank first, density second.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - Beume, Naujoks & Emmerich (2007), "SMS-EMOA: Multiobjective selection
//!   based on dominated hypervolume" (NSGA-II with a hypervolume indicator)

use super::config::Nsga2Config;
use super::Selector;
use crate::density::{DensityIndicator, FrontDensityIndicator};
use crate::error::{MoeaError, Result};
use crate::model::Individual;
use crate::random::pick_index;
use crate::sorting::NonDominatedFronts;
use rand::Rng;

/// NSGA-II selector, generic over the density indicator.
///
/// With [`Crowding`](crate::density::Crowding) this is classic NSGA-II; with
/// [`Hypervolume`](crate::density::Hypervolume) it is SMS-EMOA.
///
/// # Examples
///
/// ```
/// use u_moea::model::{BasicIndividual, Objective, Objectives};
/// use u_moea::random::create_rng;
/// use u_moea::selector::{Nsga2, Nsga2Config, Selector};
///
/// let pop: Vec<BasicIndividual> = [(1.0, 4.0), (2.0, 3.0), (3.0, 2.0), (5.0, 5.0)]
///     .iter()
///     .enumerate()
///     .map(|(i, &(a, b))| {
///         let mut o = Objectives::new();
///         o.add(Objective::minimize("f1"), a);
///         o.add(Objective::minimize("f2"), b);
///         BasicIndividual::new(i as u64, o)
///     })
///     .collect();
/// let refs: Vec<&BasicIndividual> = pop.iter().collect();
///
/// let mut nsga2 = Nsga2::new(Nsga2Config::default().with_tournament(1));
/// let mut rng = create_rng(1);
/// let lames = nsga2.get_lames(1, &refs, &mut rng).unwrap();
/// assert_eq!(lames[0].id.0, 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Nsga2<D = DensityIndicator> {
    config: Nsga2Config,
    indicator: D,
}

impl Nsga2<DensityIndicator> {
    /// Creates an NSGA-II selector using crowding distance.
    pub fn new(config: Nsga2Config) -> Self {
        Self::with_indicator(config, DensityIndicator::default())
    }
}

impl<D: FrontDensityIndicator> Nsga2<D> {
    /// Creates a selector with an explicit density indicator.
    pub fn with_indicator(config: Nsga2Config, indicator: D) -> Self {
        Self { config, indicator }
    }

    pub fn config(&self) -> &Nsga2Config {
        &self.config
    }

    pub fn indicator(&self) -> &D {
        &self.indicator
    }
}

impl<D: FrontDensityIndicator> Selector for Nsga2<D> {
    fn init(&mut self, _max_size: usize) {}

    /// Tournament selection: lower front rank wins, then larger density.
    ///
    /// Density values are computed lazily, one front at a time.
    fn get_parents<'a, I: Individual, R: Rng + ?Sized>(
        &mut self,
        mu: usize,
        population: &[&'a I],
        rng: &mut R,
    ) -> Vec<&'a I> {
        let n = population.len();
        if n == 0 {
            return Vec::new();
        }

        let fronts = NonDominatedFronts::new(population);
        let ranks = fronts.ranks();
        let mut density: Vec<Option<f64>> = vec![None; n];

        let mut parents = Vec::with_capacity(mu);
        for _ in 0..mu {
            let mut winner = pick_index(n, rng);

            for _ in 0..self.config.tournament {
                let opponent = pick_index(n, rng);
                if ranks[opponent] < ranks[winner] || opponent == winner {
                    winner = opponent;
                } else if ranks[opponent] == ranks[winner] {
                    let rank = ranks[winner];
                    if density[winner].is_none() {
                        let values = self.indicator.density_values(fronts.front(rank));
                        for (&pos, value) in fronts.front_positions(rank).iter().zip(values) {
                            density[pos] = Some(value);
                        }
                    }
                    if density[opponent] > density[winner] {
                        winner = opponent;
                    }
                }
            }

            parents.push(population[winner]);
        }
        parents
    }

    /// Worst fronts first; the cut-point front gives up its lowest-density
    /// members.
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

        let fronts = NonDominatedFronts::new(population);
        let mut lames: Vec<&'a I> = Vec::with_capacity(lambda);

        for index in (0..fronts.front_count()).rev() {
            if lames.len() == lambda {
                break;
            }
            let front = fronts.front(index);
            if lames.len() + front.len() < lambda {
                lames.extend_from_slice(front);
            } else {
                let values = self.indicator.density_values(front);
                let mut order: Vec<usize> = (0..front.len()).collect();
                order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

                let missing = lambda - lames.len();
                lames.extend(order[..missing].iter().map(|&i| front[i]));
                break;
            }
        }
        Ok(lames)
    }
}
