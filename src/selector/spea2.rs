//! SPEA2 selection: strength-based fitness with nearest-neighbor truncation.
//!
//! Individuals with identical objective vectors are tracked as one set so
//! that duplicates share a distance-matrix slot. State persists across
//! generations; only the difference to the previous population is applied.
//!
//! # References
//!
//! - Zitzler, Laumanns & Thiele (2001), "SPEA2: Improving the Strength Pareto
//!   Evolutionary Algorithm", TIK-Report 103, ETH Zürich

use super::config::Spea2Config;
use super::Selector;
use crate::error::{MoeaError, Result};
use crate::model::{Individual, IndividualId, Objectives};
use crate::random::pick_index;
use rand::Rng;
use std::collections::{HashMap, HashSet, VecDeque};

/// Individuals sharing one objective vector.
#[derive(Debug, Clone)]
struct IndividualSet {
    members: Vec<IndividualId>,
    objectives: Objectives,
    fitness: usize,
    strength: usize,
}

impl IndividualSet {
    fn len(&self) -> usize {
        self.members.len()
    }
}

/// SPEA2 selector.
///
/// The set slots form an arena: `sets[slot]` is `Some` while the slot is in
/// use, free slots are recycled through a FIFO free list, and `distance` is a
/// dense `capacity × capacity` matrix indexed by slot. The arena grows when
/// more distinct objective vectors are tracked than [`init`](Selector::init)
/// reserved.
///
/// Objectives must not change while an individual is part of the tracked
/// population.
#[derive(Debug, Clone, Default)]
pub struct Spea2 {
    config: Spea2Config,
    map: HashMap<IndividualId, usize>,
    sets: Vec<Option<IndividualSet>>,
    order: Vec<usize>,
    free_ids: VecDeque<usize>,
    distance: Vec<f64>,
    capacity: usize,
    fitness_dirty: bool,
}

impl Spea2 {
    pub fn new(config: Spea2Config) -> Self {
        Self {
            config,
            fitness_dirty: true,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &Spea2Config {
        &self.config
    }

    /// Synchronizes the tracked state with `population` and recomputes
    /// fitness if anything changed.
    pub fn update<I: Individual>(&mut self, population: &[&I]) {
        let current: HashSet<IndividualId> = population.iter().map(|ind| ind.id()).collect();

        let mut removes: Vec<IndividualId> = self
            .map
            .keys()
            .copied()
            .filter(|id| !current.contains(id))
            .collect();
        removes.sort_unstable();
        for id in removes {
            self.remove(id);
        }

        for ind in population {
            if !self.map.contains_key(&ind.id()) {
                self.add(ind.id(), ind.objectives());
            }
        }
        debug_assert_eq!(
            self.map.len(),
            population.len(),
            "population ids must be unique"
        );

        self.refresh_fitness();
    }

    /// SPEA2 fitness of a tracked individual (0 = non-dominated).
    ///
    /// Reflects the tracked state after any removals made while choosing
    /// lames.
    pub fn fitness(&mut self, id: IndividualId) -> Option<usize> {
        self.refresh_fitness();
        self.set_of(id).map(|set| set.fitness)
    }

    /// SPEA2 strength of a tracked individual.
    pub fn strength(&mut self, id: IndividualId) -> Option<usize> {
        self.refresh_fitness();
        self.set_of(id).map(|set| set.strength)
    }

    fn refresh_fitness(&mut self) {
        if self.fitness_dirty {
            self.calculate_fitness();
            self.fitness_dirty = false;
        }
    }

    fn set_of(&self, id: IndividualId) -> Option<&IndividualSet> {
        self.map.get(&id).and_then(|&slot| self.sets[slot].as_ref())
    }

    fn set(&self, slot: usize) -> &IndividualSet {
        self.sets[slot]
            .as_ref()
            .unwrap_or_else(|| unreachable!("slot {slot} is free"))
    }

    fn set_mut(&mut self, slot: usize) -> &mut IndividualSet {
        self.sets[slot]
            .as_mut()
            .unwrap_or_else(|| unreachable!("slot {slot} is free"))
    }

    fn dist(&self, a: usize, b: usize) -> f64 {
        self.distance[a * self.capacity + b]
    }

    fn set_dist(&mut self, a: usize, b: usize, value: f64) {
        self.distance[a * self.capacity + b] = value;
        self.distance[b * self.capacity + a] = value;
    }

    fn reserve(&mut self, capacity: usize) {
        let old = self.capacity;
        if capacity <= old {
            return;
        }
        let mut distance = vec![0.0; capacity * capacity];
        for row in 0..old {
            distance[row * capacity..row * capacity + old]
                .copy_from_slice(&self.distance[row * old..(row + 1) * old]);
        }
        self.distance = distance;
        self.sets.resize(capacity, None);
        self.free_ids.extend(old..capacity);
        self.capacity = capacity;
    }

    fn next_free_slot(&mut self) -> usize {
        if self.free_ids.is_empty() {
            let grown = (self.capacity * 2).max(16);
            log::debug!(
                "SPEA2 arena exhausted, growing from {} to {} slots",
                self.capacity,
                grown
            );
            self.reserve(grown);
        }
        self.free_ids
            .pop_front()
            .unwrap_or_else(|| unreachable!("arena was just grown"))
    }

    fn add(&mut self, id: IndividualId, objectives: &Objectives) {
        let slot = self.next_free_slot();

        let mut equal = None;
        for i in 0..self.order.len() {
            let other = self.order[i];
            let d = objectives.distance(&self.set(other).objectives);
            if d == 0.0 {
                equal = Some(other);
                break;
            }
            self.set_dist(slot, other, d);
        }

        let target = match equal {
            Some(other) => {
                self.free_ids.push_back(slot);
                self.set_mut(other).members.push(id);
                other
            }
            None => {
                self.set_dist(slot, slot, 0.0);
                self.sets[slot] = Some(IndividualSet {
                    members: vec![id],
                    objectives: objectives.clone(),
                    fitness: 0,
                    strength: 0,
                });
                self.order.push(slot);
                slot
            }
        };

        self.map.insert(id, target);
        self.fitness_dirty = true;
    }

    fn remove(&mut self, id: IndividualId) {
        let Some(slot) = self.map.remove(&id) else {
            return;
        };
        if self.set(slot).len() == 1 {
            self.sets[slot] = None;
            self.order.retain(|&s| s != slot);
            self.free_ids.push_back(slot);
        } else {
            self.set_mut(slot).members.retain(|&m| m != id);
        }
        self.fitness_dirty = true;
    }

    fn calculate_fitness(&mut self) {
        let order = self.order.clone();

        for &a in &order {
            let mut strength = 0;
            for &b in &order {
                if a != b && self.set(a).objectives.dominates(&self.set(b).objectives) {
                    strength += self.set(b).len();
                }
            }
            self.set_mut(a).strength = strength;
        }

        for &a in &order {
            let mut fitness = 0;
            for &b in &order {
                if a != b && self.set(b).objectives.dominates(&self.set(a).objectives) {
                    fitness += self.set(b).strength * self.set(b).len();
                }
            }
            self.set_mut(a).fitness = fitness;
        }
    }

    fn min_distance(&self, slot: usize) -> f64 {
        self.order
            .iter()
            .filter(|&&other| other != slot)
            .map(|&other| self.dist(slot, other))
            .fold(f64::MAX, f64::min)
    }

    fn dominated_slots(&self) -> Vec<usize> {
        self.order
            .iter()
            .copied()
            .filter(|&slot| self.set(slot).fitness > 0)
            .collect()
    }

    fn non_dominated_slots(&self) -> Vec<usize> {
        self.order
            .iter()
            .copied()
            .filter(|&slot| self.set(slot).fitness == 0)
            .collect()
    }

    /// Removes `count` individuals from the non-dominated sets, most crowded
    /// first, and returns their ids.
    ///
    /// The largest sets give up a member each round; when more sets tie for
    /// largest than members are still needed, the k-th nearest neighbor
    /// truncation picks among them. Removed individuals leave the tracked
    /// state; fitness is recomputed on the next read or update.
    fn lames_from_non_dominated(&mut self, count: usize) -> Vec<IndividualId> {
        let mut lames: Vec<IndividualId> = Vec::with_capacity(count);

        while lames.len() < count {
            let mut max_size = 0;
            let mut candidates: Vec<usize> = Vec::new();
            for slot in self.non_dominated_slots() {
                let size = self.set(slot).len();
                if size > max_size {
                    max_size = size;
                    candidates.clear();
                }
                if size == max_size {
                    candidates.push(slot);
                }
            }
            if candidates.is_empty() {
                break;
            }

            let missing = count - lames.len();
            let chosen = if candidates.len() <= missing {
                candidates
            } else {
                self.nearest(missing, &candidates)
            };
            for slot in chosen {
                let id = self.set(slot).members[0];
                self.remove(id);
                lames.push(id);
            }
        }
        lames
    }

    /// Picks `n` of `candidates` by iterated k-th nearest neighbor
    /// truncation: the set with the smallest distance to its nearest
    /// neighbor goes first, ties broken by the 2nd nearest, and so on.
    fn nearest(&self, n: usize, candidates: &[usize]) -> Vec<usize> {
        debug_assert!(candidates.len() > n);

        let mut neighbors: Vec<(usize, Vec<usize>)> = candidates
            .iter()
            .map(|&a| {
                let mut list: Vec<usize> = candidates.iter().copied().filter(|&b| b != a).collect();
                list.sort_by(|&x, &y| self.dist(a, x).total_cmp(&self.dist(a, y)));
                (a, list)
            })
            .collect();

        let mut chosen = Vec::with_capacity(n);
        while chosen.len() < n {
            let mut remaining: Vec<usize> = (0..neighbors.len()).collect();
            let size = remaining.len();

            for k in 0..size.saturating_sub(1) {
                let kth = |i: usize| {
                    let (slot, list) = &neighbors[i];
                    self.dist(*slot, list[k])
                };
                let min = remaining.iter().map(|&i| kth(i)).fold(f64::MAX, f64::min);
                remaining.retain(|&i| kth(i) <= min);
                if remaining.len() == 1 {
                    break;
                }
            }

            let (lame, _) = neighbors.remove(remaining[0]);
            for (_, list) in neighbors.iter_mut() {
                list.retain(|&s| s != lame);
            }
            chosen.push(lame);
        }
        chosen
    }
}

impl Selector for Spea2 {
    /// Resets the tracked state and reserves `max_size` slots.
    fn init(&mut self, max_size: usize) {
        self.map.clear();
        self.sets.clear();
        self.order.clear();
        self.free_ids.clear();
        self.distance.clear();
        self.capacity = 0;
        self.fitness_dirty = true;
        self.reserve(max_size);
    }

    /// Tournament selection: lower fitness wins, ties go to the larger
    /// distance to the nearest other set.
    fn get_parents<'a, I: Individual, R: Rng + ?Sized>(
        &mut self,
        mu: usize,
        population: &[&'a I],
        rng: &mut R,
    ) -> Vec<&'a I> {
        self.update(population);
        let n = population.len();
        if n == 0 {
            return Vec::new();
        }

        let mut parents = Vec::with_capacity(mu);
        for _ in 0..mu {
            let mut winner = pick_index(n, rng);

            for _ in 0..self.config.tournament {
                let opponent = pick_index(n, rng);
                let w = self.map[&population[winner].id()];
                let o = self.map[&population[opponent].id()];
                let w_fitness = self.set(w).fitness;
                let o_fitness = self.set(o).fitness;

                if w_fitness > o_fitness || winner == opponent {
                    winner = opponent;
                } else if w_fitness == o_fitness && self.min_distance(o) > self.min_distance(w) {
                    winner = opponent;
                }
            }
            parents.push(population[winner]);
        }
        parents
    }

    /// Dominated individuals go first, worst fitness first; if they do not
    /// suffice, the most crowded non-dominated individuals follow.
    fn get_lames<'a, I: Individual, R: Rng + ?Sized>(
        &mut self,
        lambda: usize,
        population: &[&'a I],
        _rng: &mut R,
    ) -> Result<Vec<&'a I>> {
        if lambda > population.len() {
            return Err(MoeaError::LambdaTooLarge {
                lambda,
                population: population.len(),
            });
        }
        self.update(population);
        if lambda == 0 {
            return Ok(Vec::new());
        }

        let mut dominated = self.dominated_slots();
        let dominated_count: usize = dominated.iter().map(|&slot| self.set(slot).len()).sum();

        let lame_ids: Vec<IndividualId> = if dominated_count >= lambda {
            dominated.sort_by(|&a, &b| self.set(b).fitness.cmp(&self.set(a).fitness));
            dominated
                .iter()
                .flat_map(|&slot| self.set(slot).members.iter().copied())
                .take(lambda)
                .collect()
        } else {
            let mut ids: Vec<IndividualId> = dominated
                .iter()
                .flat_map(|&slot| self.set(slot).members.iter().copied())
                .collect();
            let missing = lambda - ids.len();
            ids.extend(self.lames_from_non_dominated(missing));
            ids
        };

        let by_id: HashMap<IndividualId, &'a I> =
            population.iter().map(|&ind| (ind.id(), ind)).collect();
        Ok(lame_ids.into_iter().map(|id| by_id[&id]).collect())
    }
}
