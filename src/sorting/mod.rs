//! Non-dominated sorting.
//!
//! Partitions a population into Pareto fronts: front 0 holds the solutions no
//! other solution dominates, front `i` the solutions dominated only by members
//! of fronts `< i`.
//!
//! - [`non_dominated_sort`]: rank assignment over raw minimization vectors
//! - [`NonDominatedFronts`]: the same partition over [`Individual`]s
//! - [`extreme_individuals`]: the per-objective best members of a front
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - IEEE Transactions on Evolutionary Computation, 6(2), 182-197

use crate::model::Individual;

/// Result of non-dominated sorting.
///
/// Each element of `ranks` corresponds to the Pareto rank of the solution
/// at the same index. Rank 0 is the Pareto front (non-dominated solutions).
#[derive(Debug, Clone, Default)]
pub struct NondominatedSortResult {
    /// Pareto rank for each solution (0 = front).
    pub ranks: Vec<usize>,

    /// Indices grouped by front: `fronts[0]` contains rank-0 indices, etc.
    pub fronts: Vec<Vec<usize>>,
}

/// Fast non-dominated sorting.
///
/// All objectives are **minimized**: lower values are better. Feed
/// [`Objectives::array`](crate::model::Objectives::array) values to sort
/// mixed-sign objectives.
///
/// # Algorithm (Deb et al., 2002)
///
/// 1. For each pair of solutions, determine dominance
/// 2. Solutions dominated by no other belong to front 0 (rank 0)
/// 3. Remove front 0, repeat to find subsequent fronts
///
/// # Complexity
///
/// O(m * n²) where m = number of objectives, n = number of solutions
///
/// An empty input yields an empty result.
///
/// # Example
///
/// ```
/// use u_moea::sorting::non_dominated_sort;
///
/// let objectives = vec![
///     vec![1.0, 5.0],  // Solution A
///     vec![3.0, 3.0],  // Solution B
///     vec![5.0, 1.0],  // Solution C
///     vec![4.0, 4.0],  // Solution D, dominated by B
/// ];
///
/// let result = non_dominated_sort(&objectives);
///
/// assert_eq!(result.ranks, vec![0, 0, 0, 1]);
/// assert_eq!(result.fronts, vec![vec![0, 1, 2], vec![3]]);
/// ```
pub fn non_dominated_sort<V: AsRef<[f64]>>(objectives: &[V]) -> NondominatedSortResult {
    let n = objectives.len();
    if n == 0 {
        return NondominatedSortResult::default();
    }

    debug_assert!(
        objectives
            .iter()
            .all(|o| o.as_ref().len() == objectives[0].as_ref().len()),
        "all objective vectors must have the same length"
    );

    let mut domination_count = vec![0usize; n];
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut ranks = vec![0usize; n];

    for i in 0..n {
        for j in (i + 1)..n {
            match dominance_cmp(objectives[i].as_ref(), objectives[j].as_ref()) {
                Dominance::Left => {
                    dominated_by[i].push(j);
                    domination_count[j] += 1;
                }
                Dominance::Right => {
                    dominated_by[j].push(i);
                    domination_count[i] += 1;
                }
                Dominance::Neither => {}
            }
        }
    }

    // Front 0 in input order; counts are final only after all pairs are seen.
    let front_0: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();

    let mut fronts = Vec::new();
    let mut current = front_0;
    while !current.is_empty() {
        let mut next_front = Vec::new();

        for &i in &current {
            for &j in &dominated_by[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    ranks[j] = fronts.len() + 1;
                    next_front.push(j);
                }
            }
        }

        fronts.push(current);
        current = next_front;
    }

    NondominatedSortResult { ranks, fronts }
}

/// Dominance comparison result.
#[derive(Debug, PartialEq)]
enum Dominance {
    /// Left dominates right.
    Left,
    /// Right dominates left.
    Right,
    /// Neither dominates the other.
    Neither,
}

/// Compare two solutions for Pareto dominance (minimization).
fn dominance_cmp(a: &[f64], b: &[f64]) -> Dominance {
    let mut a_better_in_some = false;
    let mut b_better_in_some = false;

    for (&va, &vb) in a.iter().zip(b.iter()) {
        if va < vb {
            a_better_in_some = true;
        } else if vb < va {
            b_better_in_some = true;
        }
    }

    match (a_better_in_some, b_better_in_some) {
        (true, false) => Dominance::Left,
        (false, true) => Dominance::Right,
        _ => Dominance::Neither,
    }
}

/// Non-dominated fronts of a set of individuals.
///
/// Every input individual belongs to exactly one front. Front order within
/// a front follows discovery order, which for front 0 is input order.
#[derive(Debug, Clone)]
pub struct NonDominatedFronts<'a, I> {
    fronts: Vec<Vec<&'a I>>,
    positions: Vec<Vec<usize>>,
    ranks: Vec<usize>,
}

impl<'a, I: Individual> NonDominatedFronts<'a, I> {
    /// Sorts `individuals` into non-dominated fronts.
    pub fn new(individuals: &[&'a I]) -> Self {
        let arrays: Vec<&[f64]> = individuals
            .iter()
            .map(|ind| ind.objectives().array())
            .collect();
        let NondominatedSortResult { ranks, fronts } = non_dominated_sort(&arrays);
        let individual_fronts = fronts
            .iter()
            .map(|front| front.iter().map(|&i| individuals[i]).collect())
            .collect();

        Self {
            fronts: individual_fronts,
            positions: fronts,
            ranks,
        }
    }

    /// The front at `index` (0 = Pareto front).
    ///
    /// # Panics
    /// Panics if `index >= front_count()`.
    pub fn front(&self, index: usize) -> &[&'a I] {
        &self.fronts[index]
    }

    /// Input positions of the members of front `index`.
    pub fn front_positions(&self, index: usize) -> &[usize] {
        &self.positions[index]
    }

    /// Number of fronts (0 for an empty population).
    pub fn front_count(&self) -> usize {
        self.fronts.len()
    }

    /// Front index of every input position.
    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }

    /// All fronts, best first.
    pub fn fronts(&self) -> &[Vec<&'a I>] {
        &self.fronts
    }

    /// Consumes the partition, returning the fronts best first.
    pub fn into_fronts(self) -> Vec<Vec<&'a I>> {
        self.fronts
    }
}

/// Sorts `individuals` into an ordered list of non-dominated fronts.
///
/// # Example
///
/// ```
/// use u_moea::model::{BasicIndividual, Objective, Objectives};
/// use u_moea::sorting::generate_fronts;
///
/// let make = |id, a, b| {
///     let mut o = Objectives::new();
///     o.add(Objective::minimize("f1"), a);
///     o.add(Objective::minimize("f2"), b);
///     BasicIndividual::new(id, o)
/// };
/// let pop = vec![make(0, 1.0, 4.0), make(1, 5.0, 5.0), make(2, 3.0, 2.0)];
/// let refs: Vec<&BasicIndividual> = pop.iter().collect();
///
/// let fronts = generate_fronts(&refs);
/// assert_eq!(fronts.len(), 2);
/// assert_eq!(fronts[1][0].id.0, 1);
/// ```
pub fn generate_fronts<'a, I: Individual>(individuals: &[&'a I]) -> Vec<Vec<&'a I>> {
    NonDominatedFronts::new(individuals).into_fronts()
}

/// Returns, for each objective, the member of `front` with the best value.
///
/// Ties go to the first member seen. Each individual appears once even if it
/// is best on several objectives; the result follows objective order.
pub fn extreme_individuals<'a, I: Individual>(front: &[&'a I]) -> Vec<&'a I> {
    let Some(first) = front.first() else {
        return Vec::new();
    };
    let m = first.objectives().len();

    let mut best: Vec<&'a I> = vec![*first; m];
    for &candidate in &front[1..] {
        let values = candidate.objectives().array();
        for (k, slot) in best.iter_mut().enumerate() {
            if values[k] < slot.objectives().array()[k] {
                *slot = candidate;
            }
        }
    }

    let mut extremes: Vec<&'a I> = Vec::with_capacity(m);
    for ind in best {
        if !extremes.iter().any(|e| e.id() == ind.id()) {
            extremes.push(ind);
        }
    }
    extremes
}

// ============================================================================
// Tests
// ============================================================================
