//! Random source helpers.
//!
//! Every component draws from a caller-owned `R: Rng`. Seeding that one source
//! once per run makes the whole selection pipeline reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a seeded, reproducible random number generator.
///
/// ```
/// use rand::Rng;
/// use u_moea::random::create_rng;
///
/// let mut a = create_rng(7);
/// let mut b = create_rng(7);
/// assert_eq!(a.random_range(0..100), b.random_range(0..100));
/// ```
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Uniform index in `0..len`.
///
/// # Panics
/// Panics if `len == 0`.
pub fn pick_index<R: Rng + ?Sized>(len: usize, rng: &mut R) -> usize {
    assert!(len > 0, "cannot pick from an empty range");
    rng.random_range(0..len)
}

/// Removes and returns a uniformly chosen element of `pool`.
///
/// The order of the remaining elements is not preserved.
///
/// # Panics
/// Panics if `pool` is empty.
pub fn take_random<T, R: Rng + ?Sized>(pool: &mut Vec<T>, rng: &mut R) -> T {
    let idx = pick_index(pool.len(), rng);
    pool.swap_remove(idx)
}

/// Draws `count` elements of `pool` uniformly without replacement.
///
/// Returns all of `pool` when `count >= pool.len()`.
pub fn sample_without_replacement<T, R: Rng + ?Sized>(
    mut pool: Vec<T>,
    count: usize,
    rng: &mut R,
) -> Vec<T> {
    if count >= pool.len() {
        return pool;
    }
    let mut picked = Vec::with_capacity(count);
    while picked.len() < count {
        picked.push(take_random(&mut pool, rng));
    }
    picked
}
