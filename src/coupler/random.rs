//! Random pairing.

use super::Coupler;
use crate::error::{MoeaError, Result};
use crate::model::{Individual, IndividualId, Pair};
use crate::random::pick_index;
use rand::Rng;
use std::collections::HashSet;

/// Draws two distinct positions of `pool`; the same element twice only if
/// `pool` has one member.
fn distinct_pair<'a, I, R: Rng + ?Sized>(pool: &[&'a I], rng: &mut R) -> Pair<&'a I> {
    let n = pool.len();
    if n == 1 {
        return Pair::new(pool[0], pool[0]);
    }
    let x = pick_index(n, rng);
    let y = (x + pick_index(n - 1, rng) + 1) % n;
    Pair::new(pool[x], pool[y])
}

/// `size` couples drawn from `parents` deduplicated by id.
fn unique_couples<'a, I: Individual, R: Rng + ?Sized>(
    size: usize,
    parents: &[&'a I],
    rng: &mut R,
) -> Result<Vec<Pair<&'a I>>> {
    if size == 0 {
        return Ok(Vec::new());
    }
    if parents.is_empty() {
        return Err(MoeaError::EmptyParents);
    }
    let mut seen: HashSet<IndividualId> = HashSet::with_capacity(parents.len());
    let unique: Vec<&'a I> = parents
        .iter()
        .copied()
        .filter(|p| seen.insert(p.id()))
        .collect();

    Ok((0..size).map(|_| distinct_pair(&unique, rng)).collect())
}

/// Pairs two distinct individuals uniformly at random.
///
/// Parents listed more than once (tournament winners, for instance) count
/// once, so a couple holds the same individual twice only when the pool
/// has a single distinct member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomCoupler;

impl Coupler for RandomCoupler {
    fn get_couples<'a, I: Individual, R: Rng + ?Sized>(
        &mut self,
        size: usize,
        parents: &[&'a I],
        rng: &mut R,
    ) -> Result<Vec<Pair<&'a I>>> {
        unique_couples(size, parents, rng)
    }
}

/// Same draw as [`RandomCoupler`], under the name the unique-parent
/// coupler configuration uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UniqueCoupler;

impl Coupler for UniqueCoupler {
    fn get_couples<'a, I: Individual, R: Rng + ?Sized>(
        &mut self,
        size: usize,
        parents: &[&'a I],
        rng: &mut R,
    ) -> Result<Vec<Pair<&'a I>>> {
        unique_couples(size, parents, rng)
    }
}
