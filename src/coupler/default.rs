//! Index-based pairing.

use super::Coupler;
use crate::error::{MoeaError, Result};
use crate::model::{Individual, Pair};
use rand::Rng;

/// Pairs parents in list order: `(p[2i], p[2i + 1])`, indices wrapping
/// modulo the parent count.
///
/// ```
/// use u_moea::coupler::{Coupler, DefaultCoupler};
/// use u_moea::model::{BasicIndividual, Objectives};
/// use u_moea::random::create_rng;
///
/// let pop: Vec<BasicIndividual> = (0..4).map(|i| BasicIndividual::new(i, Objectives::new())).collect();
/// let parents: Vec<&BasicIndividual> = pop.iter().collect();
///
/// let couples = DefaultCoupler.get_couples(2, &parents, &mut create_rng(0)).unwrap();
/// assert_eq!(couples[0].first.id.0, 0);
/// assert_eq!(couples[0].second.id.0, 1);
/// assert_eq!(couples[1].first.id.0, 2);
/// assert_eq!(couples[1].second.id.0, 3);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultCoupler;

impl Coupler for DefaultCoupler {
    fn get_couples<'a, I: Individual, R: Rng + ?Sized>(
        &mut self,
        size: usize,
        parents: &[&'a I],
        _rng: &mut R,
    ) -> Result<Vec<Pair<&'a I>>> {
        if size == 0 {
            return Ok(Vec::new());
        }
        let n = parents.len();
        if n == 0 {
            return Err(MoeaError::EmptyParents);
        }
        Ok((0..size)
            .map(|i| Pair::new(parents[(2 * i) % n], parents[(2 * i + 1) % n]))
            .collect())
    }
}
