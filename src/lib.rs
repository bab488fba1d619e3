//! Multi-objective evolutionary selection and mating.
//!
//! Provides the parts of a multi-objective evolutionary algorithm that
//! decide who mates and who survives, independent of any encoding or
//! variation operator:
//!
//! - **Model**: objectives with a direction, Pareto dominance, and the
//!   [`Individual`](model::Individual) seam for caller solutions.
//! - **Sorting**: fast non-dominated sorting into Pareto fronts.
//! - **Density**: crowding distance and hypervolume contribution.
//! - **Epsilon**: self-adaptive epsilon control, epsilon mapping,
//!   epsilon-dominance partitioning and survivor sampling (AeSeH).
//! - **Selectors**: NSGA-II, SPEA2, epsilon sampling and elitism.
//! - **Couplers**: list-order, random, unique and epsilon-neighborhood
//!   pairing of parents.
//!
//! # Example
//!
//! ```
//! use u_moea::coupler::{offspring_couple_count, Coupler, UniqueCoupler};
//! use u_moea::model::{BasicIndividual, Objective, Objectives};
//! use u_moea::random::create_rng;
//! use u_moea::selector::{Nsga2, Nsga2Config, Selector};
//!
//! let population: Vec<BasicIndividual> = (0..10)
//!     .map(|i| {
//!         let mut o = Objectives::new();
//!         o.add(Objective::minimize("cost"), i as f64);
//!         o.add(Objective::minimize("time"), (9 - i) as f64 + (i % 3) as f64);
//!         BasicIndividual::new(i, o)
//!     })
//!     .collect();
//! let refs: Vec<&BasicIndividual> = population.iter().collect();
//! let mut rng = create_rng(42);
//!
//! let mut selector = Nsga2::new(Nsga2Config::default().with_tournament(2));
//! selector.init(refs.len());
//! let parents = selector.get_parents(6, &refs, &mut rng);
//! let couples = UniqueCoupler
//!     .get_couples(offspring_couple_count(6), &parents, &mut rng)
//!     .unwrap();
//! assert_eq!(couples.len(), 3);
//!
//! let lames = selector.get_lames(4, &refs, &mut rng).unwrap();
//! assert_eq!(lames.len(), 4);
//! ```
//!
//! Evaluation, variation and the generational loop belong to the caller.

pub mod coupler;
pub mod density;
pub mod epsilon;
pub mod error;
pub mod model;
pub mod random;
pub mod selector;
pub mod sorting;

pub use error::{MoeaError, Result};
