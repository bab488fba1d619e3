//! Epsilon relaxation of objective vectors.

use crate::model::{Individual, Objective, Objectives, Sign};
use std::collections::HashMap;

/// Observed `max - min` per objective.
///
/// Objectives that are infeasible for every individual have no entry.
pub type ObjectiveAmplitudes = HashMap<Objective, f64>;

/// Relaxes an objective vector so that it epsilon-dominates its neighbors.
pub trait EpsilonMapping {
    /// Returns `original` improved on every objective by `epsilon` times the
    /// objective's amplitude. Objectives without an amplitude, and infeasible
    /// values, are copied unchanged.
    fn map_objectives(
        &self,
        original: &Objectives,
        epsilon: f64,
        amplitudes: &ObjectiveAmplitudes,
    ) -> Objectives;

    /// Computes the amplitude of every objective over `individuals`,
    /// ignoring infeasible values.
    fn find_objective_amplitudes<I: Individual>(&self, individuals: &[&I]) -> ObjectiveAmplitudes;
}

/// Additive mapping: `value ∓ epsilon * amplitude`.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use u_moea::epsilon::{AdditiveEpsilonMapping, EpsilonMapping};
/// use u_moea::model::{Objective, Objectives};
///
/// let cost = Objective::minimize("cost");
/// let mut amplitudes = HashMap::new();
/// amplitudes.insert(cost.clone(), 4.0);
///
/// let mut o = Objectives::new();
/// o.add(cost.clone(), 10.0);
///
/// let relaxed = AdditiveEpsilonMapping.map_objectives(&o, 0.25, &amplitudes);
/// assert_eq!(relaxed.get(&cost), Some(9.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdditiveEpsilonMapping;

impl EpsilonMapping for AdditiveEpsilonMapping {
    fn map_objectives(
        &self,
        original: &Objectives,
        epsilon: f64,
        amplitudes: &ObjectiveAmplitudes,
    ) -> Objectives {
        let mut result = Objectives::new();
        for (objective, value) in original.iter() {
            let mapped = match (value, amplitudes.get(objective)) {
                (Some(v), Some(&amplitude)) => Some(match objective.sign() {
                    Sign::Min => v - epsilon * amplitude,
                    Sign::Max => v + epsilon * amplitude,
                }),
                (value, _) => value,
            };
            result.add(objective.clone(), mapped);
        }
        result
    }

    fn find_objective_amplitudes<I: Individual>(&self, individuals: &[&I]) -> ObjectiveAmplitudes {
        let mut bounds: HashMap<Objective, (f64, f64)> = HashMap::new();
        for ind in individuals {
            let objectives = ind.objectives();
            for ((objective, value), &normalized) in objectives.iter().zip(objectives.array()) {
                if value.is_none() {
                    continue;
                }
                bounds
                    .entry(objective.clone())
                    .and_modify(|(min, max)| {
                        *min = min.min(normalized);
                        *max = max.max(normalized);
                    })
                    .or_insert((normalized, normalized));
            }
        }
        bounds
            .into_iter()
            .map(|(objective, (min, max))| (objective, max - min))
            .collect()
    }
}
