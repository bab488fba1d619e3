//! Exclusive hypervolume contribution (SMS-EMOA).
//!
//! # References
//!
//! - Emmerich, Beume & Naujoks (2005), "An EMO Algorithm Using the
//!   Hypervolume Measure as Selection Criterion", EMO 2005, 62-76
//! - Zitzler (2001), Hypervolume by slicing objectives

use super::FrontDensityIndicator;
use crate::error::{MoeaError, Result};
use crate::model::Individual;

/// Hypervolume contribution indicator.
///
/// The front is normalized to `[0, 1]` per objective and measured against a
/// reference point of `1 + offset` in every (minimized) objective. The
/// density value of a member is the hypervolume lost when it is removed, so
/// larger values mark members worth keeping.
///
/// - one objective: every contribution is 0
/// - two objectives: exact rectangle decomposition, O(n log n)
/// - three or more: `HV(front) - HV(front \ {i})` per member
///
/// # Example
///
/// ```
/// use u_moea::density::{FrontDensityIndicator, Hypervolume};
/// use u_moea::model::{BasicIndividual, Objective, Objectives};
///
/// let make = |id, a, b| {
///     let mut o = Objectives::new();
///     o.add(Objective::minimize("f1"), a);
///     o.add(Objective::minimize("f2"), b);
///     BasicIndividual::new(id, o)
/// };
/// let front = vec![make(0, 0.0, 1.0), make(1, 0.5, 0.5), make(2, 1.0, 0.0)];
/// let refs: Vec<&BasicIndividual> = front.iter().collect();
///
/// let values = Hypervolume::default().density_values(&refs);
/// assert!(values.iter().all(|&v| v > 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hypervolume {
    offset: f64,
}

impl Default for Hypervolume {
    fn default() -> Self {
        Self { offset: 1.0 }
    }
}

impl Hypervolume {
    /// Creates the indicator with a reference point offset.
    ///
    /// Returns [`MoeaError::InvalidConfig`] unless `offset` is finite and
    /// positive.
    pub fn new(offset: f64) -> Result<Self> {
        if !offset.is_finite() || offset <= 0.0 {
            return Err(MoeaError::InvalidConfig(format!(
                "hypervolume offset must be finite and positive, got {offset}"
            )));
        }
        Ok(Self { offset })
    }

    /// The reference point offset.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Contributions for raw minimization vectors.
    pub fn contributions<V: AsRef<[f64]>>(&self, front: &[V]) -> Vec<f64> {
        if front.is_empty() {
            return Vec::new();
        }
        let m = front[0].as_ref().len();
        if m < 2 {
            return vec![0.0; front.len()];
        }

        let points = invert(&normalize(front), self.offset);
        if m == 2 {
            contributions_2d(&points)
        } else {
            contributions_nd(&points)
        }
    }
}

impl FrontDensityIndicator for Hypervolume {
    fn density_values<I: Individual>(&self, front: &[&I]) -> Vec<f64> {
        let arrays: Vec<&[f64]> = front.iter().map(|ind| ind.objectives().array()).collect();
        self.contributions(&arrays)
    }
}

/// Scales every objective to `[0, 1]`; a zero-range objective maps to 0.
///
/// Values are halved before subtracting so that ranges spanning the
/// infeasible marker (`f64::MAX`) stay finite.
fn normalize<V: AsRef<[f64]>>(front: &[V]) -> Vec<Vec<f64>> {
    let m = front[0].as_ref().len();
    let mut min = vec![f64::MAX; m];
    let mut max = vec![-f64::MAX; m];
    for p in front {
        for (k, &v) in p.as_ref().iter().enumerate() {
            min[k] = min[k].min(v);
            max[k] = max[k].max(v);
        }
    }
    let half_range: Vec<f64> = (0..m).map(|k| max[k] / 2.0 - min[k] / 2.0).collect();

    front
        .iter()
        .map(|p| {
            p.as_ref()
                .iter()
                .enumerate()
                .map(|(k, &v)| {
                    if half_range[k] > 0.0 {
                        (v / 2.0 - min[k] / 2.0) / half_range[k]
                    } else {
                        0.0
                    }
                })
                .collect()
        })
        .collect()
}

/// Turns minimization points into maximization points relative to the nadir.
fn invert(front: &[Vec<f64>], offset: f64) -> Vec<Vec<f64>> {
    let nadir = 1.0 + offset;
    front
        .iter()
        .map(|p| p.iter().map(|&v| nadir - v).collect())
        .collect()
}

fn contributions_2d(points: &[Vec<f64>]) -> Vec<f64> {
    let n = points.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| points[a][0].total_cmp(&points[b][0]));

    let mut result = vec![0.0; n];
    for (pos, &i) in order.iter().enumerate() {
        let left = if pos > 0 { points[order[pos - 1]][0] } else { 0.0 };
        let below = if pos + 1 < n {
            points[order[pos + 1]][1]
        } else {
            0.0
        };
        let diff_x = points[i][0] - left;
        let diff_y = points[i][1] - below;
        result[i] = diff_x * diff_y;
    }
    result
}

fn contributions_nd(points: &[Vec<f64>]) -> Vec<f64> {
    let m = points[0].len();
    let all: Vec<&[f64]> = points.iter().map(|p| p.as_slice()).collect();
    let total = hypervolume(all.clone(), m);

    (0..points.len())
        .map(|i| {
            let mut without = all.clone();
            without.remove(i);
            total - hypervolume(without, m)
        })
        .collect()
}

/// Hypervolume of maximization points w.r.t. the origin, slicing along the
/// last of the first `n_objectives` objectives.
fn hypervolume(mut front: Vec<&[f64]>, n_objectives: usize) -> f64 {
    let mut volume = 0.0;
    let mut distance = 0.0;
    let last = n_objectives - 1;

    while !front.is_empty() {
        let nondominated = filter_nondominated(&front, last);
        let slice_volume = if n_objectives < 3 {
            nondominated[0][0]
        } else {
            hypervolume(nondominated, last)
        };

        let slice_distance = front.iter().map(|p| p[last]).fold(f64::MAX, f64::min);
        volume += slice_volume * (slice_distance - distance);
        distance = slice_distance;
        front.retain(|p| p[last] > distance);
    }
    volume
}

fn filter_nondominated<'p>(front: &[&'p [f64]], n_objectives: usize) -> Vec<&'p [f64]> {
    let mut nondominated: Vec<&'p [f64]> = Vec::new();
    for &p1 in front {
        if nondominated
            .iter()
            .any(|&p2| dominates_max(p2, p1, n_objectives))
        {
            continue;
        }
        nondominated.retain(|&p2| !dominates_max(p1, p2, n_objectives));
        nondominated.push(p1);
    }
    nondominated
}

fn dominates_max(p1: &[f64], p2: &[f64], n_objectives: usize) -> bool {
    let mut strong = false;
    for k in 0..n_objectives {
        if p1[k] > p2[k] {
            strong = true;
        } else if p1[k] < p2[k] {
            return false;
        }
    }
    strong
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_offset() {
        assert!(Hypervolume::new(0.0).is_err());
        assert!(Hypervolume::new(-1.0).is_err());
        assert!(Hypervolume::new(f64::NAN).is_err());
        assert!(Hypervolume::new(0.5).is_ok());
    }

    #[test]
    fn test_empty_front() {
        let front: Vec<Vec<f64>> = Vec::new();
        assert!(Hypervolume::default().contributions(&front).is_empty());
    }

    #[test]
    fn test_single_objective_is_zero() {
        let front = vec![vec![1.0], vec![2.0]];
        assert_eq!(Hypervolume::default().contributions(&front), vec![0.0, 0.0]);
    }

    #[test]
    fn test_2d_symmetric_front() {
        // Normalized: (0,1), (0.5,0.5), (1,0); nadir 2 → inverted
        // (2,1), (1.5,1.5), (1,2).
        let front = vec![vec![0.0, 1.0], vec![0.5, 0.5], vec![1.0, 0.0]];
        let c = Hypervolume::default().contributions(&front);
        // Sorted by x: (1,2), (1.5,1.5), (2,1)
        // (1,2): (1-0)*(2-1.5) = 0.5
        // (1.5,1.5): (1.5-1)*(1.5-1) = 0.25
        // (2,1): (2-1.5)*(1-0) = 0.5
        assert!((c[0] - 0.5).abs() < 1e-12);
        assert!((c[1] - 0.25).abs() < 1e-12);
        assert!((c[2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_hypervolume_of_box() {
        let p = [2.0, 3.0, 4.0];
        assert!((hypervolume(vec![&p], 3) - 24.0).abs() < 1e-12);
    }

    #[test]
    fn test_hypervolume_union_of_boxes_2d() {
        let a = [2.0, 1.0];
        let b = [1.0, 2.0];
        // 2*1 + 1*2 - 1*1 overlap = 3
        assert!((hypervolume(vec![&a, &b], 2) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_3d_contributions_positive_for_tradeoff_front() {
        let front = vec![
            vec![0.0, 1.0, 1.0],
            vec![1.0, 0.0, 1.0],
            vec![1.0, 1.0, 0.0],
        ];
        let c = Hypervolume::default().contributions(&front);
        assert_eq!(c.len(), 3);
        for v in &c {
            assert!(*v > 0.0);
        }
        // Symmetric front → equal contributions
        assert!((c[0] - c[1]).abs() < 1e-9);
        assert!((c[1] - c[2]).abs() < 1e-9);
    }

    #[test]
    fn test_3d_duplicate_contributes_nothing() {
        let front = vec![
            vec![0.0, 1.0, 0.5],
            vec![0.0, 1.0, 0.5],
            vec![1.0, 0.0, 0.0],
        ];
        let c = Hypervolume::default().contributions(&front);
        assert!(c[0].abs() < 1e-12);
        assert!(c[1].abs() < 1e-12);
        assert!(c[2] > 0.0);
    }

    // ---- Extreme values ----

    #[test]
    fn test_infeasible_constant_objective_stays_finite() {
        let front = vec![
            vec![1.0, f64::MAX],
            vec![2.0, f64::MAX],
            vec![3.0, f64::MAX],
        ];
        let c = Hypervolume::default().contributions(&front);
        assert!(c.iter().all(|v| v.is_finite()), "{c:?}");
    }

    #[test]
    fn test_huge_constant_objective_stays_finite() {
        let front = vec![vec![1.0, 1e17], vec![2.0, 1e17]];
        let c = Hypervolume::default().contributions(&front);
        assert!(c.iter().all(|v| v.is_finite()), "{c:?}");
    }

    #[test]
    fn test_range_spanning_both_extremes() {
        let front = vec![vec![0.0, f64::MAX], vec![1.0, -f64::MAX]];
        let c = Hypervolume::default().contributions(&front);
        assert!(c.iter().all(|&v| v.is_finite() && v > 0.0), "{c:?}");
    }
}
