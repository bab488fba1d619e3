//! Epsilon-dominance clustering shared by survivor sampling and neighborhood
//! creation.

use super::mapping::EpsilonMapping;
use crate::model::Individual;
use crate::random::pick_index;
use rand::Rng;

/// A randomly picked reference and the individuals its relaxed objectives
/// dominate.
#[derive(Debug, Clone)]
pub struct EpsilonCluster<'a, I> {
    pub reference: &'a I,
    pub dominated: Vec<&'a I>,
}

impl<'a, I> EpsilonCluster<'a, I> {
    /// Number of members, the reference included.
    pub fn len(&self) -> usize {
        self.dominated.len() + 1
    }

    /// Always `false`: a cluster holds at least its reference.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Reference first, then the dominated members.
    pub fn members(&self) -> Vec<&'a I> {
        let mut members = Vec::with_capacity(self.len());
        members.push(self.reference);
        members.extend_from_slice(&self.dominated);
        members
    }
}

/// Partitions `pool` into epsilon-dominance clusters.
///
/// Until the pool is empty: pick a random reference, relax its objectives by
/// `epsilon` (amplitudes taken over the whole pool) and move every remaining
/// individual the relaxed vector dominates into the reference's cluster.
/// Every pool member ends up in exactly one cluster; clusters are returned in
/// creation order.
pub fn epsilon_partition<'a, I, M, R>(
    pool: &[&'a I],
    epsilon: f64,
    mapping: &M,
    rng: &mut R,
) -> Vec<EpsilonCluster<'a, I>>
where
    I: Individual,
    M: EpsilonMapping + ?Sized,
    R: Rng + ?Sized,
{
    let amplitudes = mapping.find_objective_amplitudes(pool);
    let mut remaining: Vec<&'a I> = pool.to_vec();
    let mut clusters = Vec::new();

    while !remaining.is_empty() {
        let reference = remaining.remove(pick_index(remaining.len(), rng));
        let relaxed = mapping.map_objectives(reference.objectives(), epsilon, &amplitudes);

        let (dominated, rest): (Vec<&'a I>, Vec<&'a I>) = remaining
            .into_iter()
            .partition(|candidate| relaxed.dominates(candidate.objectives()));
        remaining = rest;

        clusters.push(EpsilonCluster {
            reference,
            dominated,
        });
    }
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epsilon::AdditiveEpsilonMapping;
    use crate::model::{BasicIndividual, Objective, Objectives};
    use crate::random::create_rng;
    use std::collections::HashSet;

    fn ind(id: u64, a: f64, b: f64) -> BasicIndividual {
        let mut o = Objectives::new();
        o.add(Objective::minimize("a"), a);
        o.add(Objective::minimize("b"), b);
        BasicIndividual::new(id, o)
    }

    fn front(n: u64) -> Vec<BasicIndividual> {
        (0..n)
            .map(|i| ind(i, i as f64, (n - 1 - i) as f64))
            .collect()
    }

    #[test]
    fn test_zero_epsilon_gives_singletons() {
        let pop = front(6);
        let refs: Vec<&BasicIndividual> = pop.iter().collect();
        let mut rng = create_rng(1);
        let clusters = epsilon_partition(&refs, 0.0, &AdditiveEpsilonMapping, &mut rng);
        assert_eq!(clusters.len(), 6);
        assert!(clusters.iter().all(|c| c.len() == 1));
    }

    #[test]
    fn test_large_epsilon_gives_one_cluster() {
        let pop = front(6);
        let refs: Vec<&BasicIndividual> = pop.iter().collect();
        let mut rng = create_rng(1);
        let clusters = epsilon_partition(&refs, 2.0, &AdditiveEpsilonMapping, &mut rng);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 6);
    }

    #[test]
    fn test_partition_covers_pool_once() {
        let pop = front(20);
        let refs: Vec<&BasicIndividual> = pop.iter().collect();
        let mut rng = create_rng(9);
        let clusters = epsilon_partition(&refs, 0.2, &AdditiveEpsilonMapping, &mut rng);

        let mut seen = HashSet::new();
        for cluster in &clusters {
            for member in cluster.members() {
                assert!(seen.insert(member.id), "{} in two clusters", member.id);
            }
        }
        assert_eq!(seen.len(), 20);
    }

    #[test]
    fn test_empty_pool() {
        let refs: Vec<&BasicIndividual> = Vec::new();
        let mut rng = create_rng(0);
        assert!(epsilon_partition(&refs, 0.5, &AdditiveEpsilonMapping, &mut rng).is_empty());
    }
}
