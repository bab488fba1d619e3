//! Density indicators over a single non-dominated front.
//!
//! Larger density values mean "more isolated" or "contributes more", so
//! selectors discard the members with the smallest values first.

mod crowding;
mod hypervolume;

pub use crowding::{crowding_distance, Crowding};
pub use hypervolume::Hypervolume;

use crate::model::Individual;

/// Scores each member of a front; one value per member, in front order.
pub trait FrontDensityIndicator {
    fn density_values<I: Individual>(&self, front: &[&I]) -> Vec<f64>;
}

/// Closed set of indicators, selectable at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DensityIndicator {
    Crowding(Crowding),
    Hypervolume(Hypervolume),
}

impl Default for DensityIndicator {
    fn default() -> Self {
        DensityIndicator::Crowding(Crowding)
    }
}

impl From<Crowding> for DensityIndicator {
    fn from(c: Crowding) -> Self {
        DensityIndicator::Crowding(c)
    }
}

impl From<Hypervolume> for DensityIndicator {
    fn from(h: Hypervolume) -> Self {
        DensityIndicator::Hypervolume(h)
    }
}

impl FrontDensityIndicator for DensityIndicator {
    fn density_values<I: Individual>(&self, front: &[&I]) -> Vec<f64> {
        match self {
            DensityIndicator::Crowding(c) => c.density_values(front),
            DensityIndicator::Hypervolume(h) => h.density_values(front),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BasicIndividual, Objective, Objectives};

    fn ind(id: u64, a: f64, b: f64) -> BasicIndividual {
        let mut o = Objectives::new();
        o.add(Objective::minimize("a"), a);
        o.add(Objective::minimize("b"), b);
        BasicIndividual::new(id, o)
    }

    #[test]
    fn test_default_is_crowding() {
        assert_eq!(
            DensityIndicator::default(),
            DensityIndicator::Crowding(Crowding)
        );
    }

    #[test]
    fn test_enum_dispatch_matches_concrete() {
        let pop = vec![ind(0, 1.0, 5.0), ind(1, 3.0, 3.0), ind(2, 5.0, 1.0)];
        let refs: Vec<&BasicIndividual> = pop.iter().collect();

        let via_enum = DensityIndicator::default().density_values(&refs);
        assert_eq!(via_enum, Crowding.density_values(&refs));

        let hv = Hypervolume::default();
        let via_enum = DensityIndicator::from(hv).density_values(&refs);
        assert_eq!(via_enum, hv.density_values(&refs));
    }
}
