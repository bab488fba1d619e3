//! Epsilon-dominance machinery of the AeSeH algorithm.
//!
//! - [`EpsilonMapping`]: relaxes objective vectors by a fraction of each
//!   objective's observed amplitude
//! - [`AdaptiveEpsilon`]: a doubling/halving control loop steering one
//!   epsilon value toward a target count
//! - [`EpsilonAdaptation`]: the sampling and neighborhood loops of a run
//! - [`SurvivorGeneration`]: epsilon-sampling survivor selection
//! - [`epsilon_partition`]: the clustering step shared by survivor sampling
//!   and neighborhood coupling

mod adaptive;
mod mapping;
mod partition;
mod survivor;

pub use adaptive::{AdaptiveEpsilon, EpsilonAdaptation, EpsilonConfig};
pub use mapping::{AdditiveEpsilonMapping, EpsilonMapping, ObjectiveAmplitudes};
pub use partition::{epsilon_partition, EpsilonCluster};
pub use survivor::{EpsilonSample, SurvivorGeneration};
