//! Objective identity and optimization direction.

use std::fmt;
use std::sync::Arc;

/// Optimization direction of an [`Objective`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sign {
    /// Lower values are better.
    #[default]
    Min,
    /// Higher values are better.
    Max,
}

/// A named optimization criterion.
///
/// Objectives are immutable and cheap to clone (the name is shared).
/// Two objectives are equal when both name and sign match, so a value
/// created once per problem and cloned into every [`Objectives`] map acts as
/// a stable key.
///
/// [`Objectives`]: super::Objectives
///
/// # Examples
///
/// ```
/// use u_moea::model::{Objective, Sign};
///
/// let cost = Objective::new("cost", Sign::Min);
/// let profit = Objective::new("profit", Sign::Max);
/// assert_ne!(cost, profit);
/// assert_eq!(cost.to_string(), "cost(MIN)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Objective {
    name: Arc<str>,
    sign: Sign,
}

impl Objective {
    /// Creates a new objective.
    pub fn new(name: impl Into<Arc<str>>, sign: Sign) -> Self {
        Self {
            name: name.into(),
            sign,
        }
    }

    /// Creates a minimization objective.
    pub fn minimize(name: impl Into<Arc<str>>) -> Self {
        Self::new(name, Sign::Min)
    }

    /// Creates a maximization objective.
    pub fn maximize(name: impl Into<Arc<str>>) -> Self {
        Self::new(name, Sign::Max)
    }

    /// The objective name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The optimization direction.
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Maps a raw value onto the minimization scale.
    ///
    /// Maximization values are negated; infeasible values (`None`) become
    /// `f64::MAX`, the worst representable value.
    pub fn to_min_problem(&self, value: Option<f64>) -> f64 {
        match (value, self.sign) {
            (None, _) => f64::MAX,
            (Some(v), Sign::Min) => v,
            (Some(v), Sign::Max) => -v,
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.sign {
            Sign::Min => "MIN",
            Sign::Max => "MAX",
        };
        write!(f, "{}({})", self.name, sign)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sign_is_min() {
        assert_eq!(Sign::default(), Sign::Min);
    }

    #[test]
    fn test_to_min_problem() {
        let min = Objective::minimize("a");
        let max = Objective::maximize("b");
        assert_eq!(min.to_min_problem(Some(3.0)), 3.0);
        assert_eq!(max.to_min_problem(Some(3.0)), -3.0);
        assert_eq!(min.to_min_problem(None), f64::MAX);
        assert_eq!(max.to_min_problem(None), f64::MAX);
    }

    #[test]
    fn test_equality_includes_sign() {
        assert_eq!(Objective::minimize("x"), Objective::minimize("x"));
        assert_ne!(Objective::minimize("x"), Objective::maximize("x"));
    }

    #[test]
    fn test_ordering_by_name() {
        let mut objs = vec![Objective::minimize("b"), Objective::minimize("a")];
        objs.sort();
        assert_eq!(objs[0].name(), "a");
    }
}
