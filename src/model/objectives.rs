//! Objective vectors and the Pareto dominance relation.

use super::objective::{Objective, Sign};
use std::fmt;

/// Marker for an objective that could not be evaluated.
///
/// Infeasible values rank worse than every feasible value.
pub const INFEASIBLE: Option<f64> = None;

/// An ordered mapping from [`Objective`] to its value.
///
/// Entries are kept sorted by objective, independent of insertion order, so
/// two vectors over the same objectives always line up position by position.
/// Alongside the raw values a minimization-normalized array is maintained
/// (maximization values negated, infeasible values mapped to `f64::MAX`);
/// every comparison runs on that array.
///
/// # Examples
///
/// ```
/// use u_moea::model::{Objective, Objectives, INFEASIBLE};
///
/// let cost = Objective::minimize("cost");
/// let profit = Objective::maximize("profit");
///
/// let mut a = Objectives::new();
/// a.add(cost.clone(), 1.0);
/// a.add(profit.clone(), 10.0);
///
/// let mut b = Objectives::new();
/// b.add(cost, 2.0);
/// b.add(profit, INFEASIBLE);
///
/// assert!(a.dominates(&b));
/// assert!(!b.dominates(&a));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Objectives {
    keys: Vec<Objective>,
    values: Vec<Option<f64>>,
    array: Vec<f64>,
}

impl Objectives {
    /// Creates an empty objective vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of `objective`, replacing any previous value.
    ///
    /// Pass [`INFEASIBLE`] (or `None`) for an objective that has no value.
    pub fn add(&mut self, objective: Objective, value: impl Into<Option<f64>>) {
        let value = value.into();
        let normalized = objective.to_min_problem(value);
        match self.keys.binary_search(&objective) {
            Ok(pos) => {
                self.values[pos] = value;
                self.array[pos] = normalized;
            }
            Err(pos) => {
                self.keys.insert(pos, objective);
                self.values.insert(pos, value);
                self.array.insert(pos, normalized);
            }
        }
    }

    /// Shorthand for `add(Objective::new(name, sign), value)`.
    pub fn add_named(&mut self, name: &str, sign: Sign, value: impl Into<Option<f64>>) {
        self.add(Objective::new(name, sign), value);
    }

    /// Number of objectives.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if no objective has been added.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The objectives in their canonical order.
    pub fn keys(&self) -> &[Objective] {
        &self.keys
    }

    /// The raw value of `objective`.
    ///
    /// Returns `None` if the objective is missing or infeasible; use
    /// [`contains`](Self::contains) to tell the two apart.
    pub fn get(&self, objective: &Objective) -> Option<f64> {
        self.keys
            .binary_search(objective)
            .ok()
            .and_then(|pos| self.values[pos])
    }

    /// Returns `true` if a value (feasible or not) is recorded for `objective`.
    pub fn contains(&self, objective: &Objective) -> bool {
        self.keys.binary_search(objective).is_ok()
    }

    /// Iterates `(objective, raw value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&Objective, Option<f64>)> + '_ {
        self.keys.iter().zip(self.values.iter().copied())
    }

    /// Minimization-normalized values in canonical order.
    pub fn array(&self) -> &[f64] {
        &self.array
    }

    /// Pareto dominance: no worse on every objective and strictly better on
    /// at least one.
    ///
    /// This is a strict partial order: irreflexive, asymmetric and transitive.
    /// Vectors of different lengths are incomparable and never dominate.
    pub fn dominates(&self, opponent: &Objectives) -> bool {
        if self.len() != opponent.len() {
            return false;
        }
        let mut strictly_better = false;
        for (&a, &b) in self.array.iter().zip(opponent.array.iter()) {
            if a > b {
                return false;
            }
            if a < b {
                strictly_better = true;
            }
        }
        strictly_better
    }

    /// Weak dominance: no worse on every objective. False for vectors of
    /// different lengths.
    pub fn weakly_dominates(&self, opponent: &Objectives) -> bool {
        if self.len() != opponent.len() {
            return false;
        }
        self.array
            .iter()
            .zip(opponent.array.iter())
            .all(|(&a, &b)| a <= b)
    }

    /// Returns `true` if both vectors hold identical normalized values.
    pub fn is_equal(&self, other: &Objectives) -> bool {
        self.array == other.array
    }

    /// Euclidean distance between the normalized vectors.
    pub fn distance(&self, other: &Objectives) -> f64 {
        self.array
            .iter()
            .zip(other.array.iter())
            .map(|(&a, &b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}

impl fmt::Display for Objectives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (objective, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match value {
                Some(v) => write!(f, "{objective}={v}")?,
                None => write!(f, "{objective}=INFEASIBLE")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn min2(a: f64, b: f64) -> Objectives {
        let mut o = Objectives::new();
        o.add(Objective::minimize("f1"), a);
        o.add(Objective::minimize("f2"), b);
        o
    }

    fn max2(a: f64, b: f64) -> Objectives {
        let mut o = Objectives::new();
        o.add(Objective::maximize("f1"), a);
        o.add(Objective::maximize("f2"), b);
        o
    }

    // ---- Ordering ----

    #[test]
    fn test_canonical_order_independent_of_insertion() {
        let mut a = Objectives::new();
        a.add(Objective::minimize("b"), 2.0);
        a.add(Objective::minimize("a"), 1.0);
        assert_eq!(a.keys()[0].name(), "a");
        assert_eq!(a.array(), &[1.0, 2.0]);
    }

    #[test]
    fn test_add_replaces_value() {
        let mut a = min2(1.0, 2.0);
        a.add(Objective::minimize("f1"), 5.0);
        assert_eq!(a.len(), 2);
        assert_eq!(a.get(&Objective::minimize("f1")), Some(5.0));
    }

    #[test]
    fn test_infeasible_value() {
        let mut a = Objectives::new();
        let obj = Objective::maximize("x");
        a.add(obj.clone(), INFEASIBLE);
        assert!(a.contains(&obj));
        assert_eq!(a.get(&obj), None);
        assert_eq!(a.array(), &[f64::MAX]);
    }

    // ---- Dominance ----

    #[test]
    fn test_dominates_min() {
        assert!(min2(1.0, 1.0).dominates(&min2(2.0, 2.0)));
        assert!(min2(1.0, 2.0).dominates(&min2(1.0, 3.0)));
        assert!(!min2(1.0, 3.0).dominates(&min2(3.0, 1.0)));
    }

    #[test]
    fn test_dominates_max() {
        assert!(max2(5.0, 5.0).dominates(&max2(1.0, 1.0)));
        assert!(!max2(1.0, 1.0).dominates(&max2(5.0, 5.0)));
    }

    #[test]
    fn test_dominance_irreflexive() {
        let a = min2(1.0, 2.0);
        assert!(!a.dominates(&a));
        assert!(a.weakly_dominates(&a));
    }

    #[test]
    fn test_infeasible_is_worst() {
        let mut a = Objectives::new();
        a.add(Objective::minimize("f1"), 1e300);
        let mut b = Objectives::new();
        b.add(Objective::minimize("f1"), INFEASIBLE);
        assert!(a.dominates(&b));
    }

    #[test]
    fn test_weakly_dominates() {
        assert!(min2(1.0, 2.0).weakly_dominates(&min2(1.0, 2.0)));
        assert!(min2(1.0, 2.0).weakly_dominates(&min2(1.0, 3.0)));
        assert!(!min2(1.0, 4.0).weakly_dominates(&min2(1.0, 3.0)));
    }

    #[test]
    fn test_length_mismatch_is_incomparable() {
        let mut one = Objectives::new();
        one.add(Objective::minimize("f1"), 0.0);
        let two = min2(5.0, 5.0);
        assert!(!one.dominates(&two));
        assert!(!two.dominates(&one));
        assert!(!one.weakly_dominates(&two));
        assert!(!two.weakly_dominates(&one));
    }

    #[test]
    fn test_is_equal_and_distance() {
        assert!(min2(1.0, 2.0).is_equal(&min2(1.0, 2.0)));
        assert!(!min2(1.0, 2.0).is_equal(&min2(1.0, 2.5)));
        let d = min2(0.0, 0.0).distance(&min2(3.0, 4.0));
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        let mut a = Objectives::new();
        a.add(Objective::minimize("x"), 1.5);
        a.add(Objective::maximize("y"), INFEASIBLE);
        assert_eq!(a.to_string(), "x(MIN)=1.5 y(MAX)=INFEASIBLE");
    }
}
