//! Crowding distance (NSGA-II).

use super::FrontDensityIndicator;
use crate::model::Individual;

/// Crowding distance assignment for diversity preservation.
///
/// Computes the crowding distance for each solution, measuring how
/// spread out the solutions are in objective space. Higher distance
/// means the solution is more isolated (more diverse).
///
/// Boundary solutions (min/max of an objective with a positive range)
/// receive `f64::INFINITY`. An objective whose values are all equal
/// contributes nothing, so a lone member or a set of identical points
/// scores 0.
///
/// # Algorithm (Deb et al., 2002)
///
/// For each objective:
/// 1. Sort solutions by objective value
/// 2. Assign infinity to boundary solutions
/// 3. For interior solutions, add normalized distance to neighbors
///
/// # Complexity
///
/// O(m * n * log n) where m = number of objectives, n = number of solutions
///
/// # Example
///
/// ```
/// use u_moea::density::crowding_distance;
///
/// let objectives = vec![
///     vec![1.0, 5.0],
///     vec![3.0, 3.0],
///     vec![5.0, 1.0],
/// ];
///
/// let distances = crowding_distance(&objectives);
///
/// // Boundary solutions get infinity
/// assert!(distances[0].is_infinite());
/// assert!(distances[2].is_infinite());
/// // Interior solution gets finite distance
/// assert!(distances[1].is_finite());
/// ```
pub fn crowding_distance<V: AsRef<[f64]>>(objectives: &[V]) -> Vec<f64> {
    let n = objectives.len();
    if n == 0 {
        return Vec::new();
    }

    let m = objectives[0].as_ref().len();
    let mut distances = vec![0.0f64; n];

    for obj_idx in 0..m {
        let value = |i: usize| objectives[i].as_ref()[obj_idx];

        let mut indices: Vec<usize> = (0..n).collect();
        indices.sort_by(|&a, &b| value(a).total_cmp(&value(b)));

        let min_val = value(indices[0]);
        let max_val = value(indices[n - 1]);
        let range = max_val - min_val;

        // Zero range: every solution ties, nothing to add.
        if range > 0.0 {
            distances[indices[0]] = f64::INFINITY;
            distances[indices[n - 1]] = f64::INFINITY;

            for i in 1..(n - 1) {
                let prev = value(indices[i - 1]);
                let next = value(indices[i + 1]);
                distances[indices[i]] += (next - prev) / range;
            }
        }
    }

    distances
}

/// [`FrontDensityIndicator`] backed by [`crowding_distance`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Crowding;

impl FrontDensityIndicator for Crowding {
    fn density_values<I: Individual>(&self, front: &[&I]) -> Vec<f64> {
        let arrays: Vec<&[f64]> = front.iter().map(|ind| ind.objectives().array()).collect();
        crowding_distance(&arrays)
    }
}
