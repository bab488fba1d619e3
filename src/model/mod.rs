//! Dominance model.
//!
//! Value types shared by every other module:
//!
//! - [`Objective`] / [`Sign`]: a named criterion and its direction
//! - [`Objectives`]: an ordered objective vector with the Pareto
//!   [`dominates`](Objectives::dominates) relation
//! - [`Individual`]: the caller's solution type, seen through its id and
//!   objectives
//! - [`Pair`]: a couple of mating partners

mod individual;
mod objective;
mod objectives;
mod pair;

pub use individual::{BasicIndividual, Individual, IndividualId};
pub use objective::{Objective, Sign};
pub use objectives::{Objectives, INFEASIBLE};
pub use pair::Pair;
