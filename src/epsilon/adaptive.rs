//! Self-tuning epsilon values.

use crate::error::{MoeaError, Result};

/// Start value and step bounds of an [`AdaptiveEpsilon`].
///
/// # Defaults
///
/// ```
/// use u_moea::epsilon::EpsilonConfig;
///
/// let config = EpsilonConfig::default();
/// assert_eq!(config.epsilon, 0.0);
/// assert_eq!(config.delta, 0.005);
/// assert_eq!(config.delta_min, 0.0001);
/// assert_eq!(config.delta_max, 0.005);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpsilonConfig {
    /// Initial epsilon.
    pub epsilon: f64,

    /// Initial adaptation step.
    pub delta: f64,

    /// Smallest step the control loop may shrink to.
    pub delta_min: f64,

    /// Largest step the control loop may grow to.
    pub delta_max: f64,
}

impl Default for EpsilonConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.0,
            delta: 0.005,
            delta_min: 0.0001,
            delta_max: 0.005,
        }
    }
}

impl EpsilonConfig {
    /// Sets the initial epsilon.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Sets the initial step.
    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    /// Sets the step bounds.
    pub fn with_delta_bounds(mut self, min: f64, max: f64) -> Self {
        self.delta_min = min;
        self.delta_max = max;
        self
    }

    /// Validates the configuration.
    ///
    /// All values must be finite and non-negative, and
    /// `delta_min <= delta <= delta_max`.
    pub fn validate(&self) -> Result<()> {
        let values = [
            ("epsilon", self.epsilon),
            ("delta", self.delta),
            ("delta_min", self.delta_min),
            ("delta_max", self.delta_max),
        ];
        for (name, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(MoeaError::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if self.delta < self.delta_min || self.delta > self.delta_max {
            return Err(MoeaError::InvalidConfig(format!(
                "epsilon delta {} must lie within [{}, {}]",
                self.delta, self.delta_min, self.delta_max
            )));
        }
        Ok(())
    }
}

/// An epsilon value steered toward a target by a doubling/halving step.
///
/// Each [`adapt`](Self::adapt) call moves epsilon by the current step and then
/// doubles the step (on increase) or halves it (on decrease), clamped to
/// `[delta_min, delta_max]`. Epsilon never drops below 0.
///
/// # Examples
///
/// ```
/// use u_moea::epsilon::AdaptiveEpsilon;
///
/// let mut eps = AdaptiveEpsilon::new(0.0, 0.5, 0.4, 1.5).unwrap();
/// eps.adapt(true);
/// assert_eq!(eps.epsilon(), 0.5);
/// assert_eq!(eps.delta(), 1.0);
///
/// eps.adapt(false);
/// assert_eq!(eps.epsilon(), 0.0);
/// assert_eq!(eps.delta(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveEpsilon {
    epsilon: f64,
    delta: f64,
    delta_min: f64,
    delta_max: f64,
}

impl AdaptiveEpsilon {
    /// Creates an adaptive epsilon.
    ///
    /// Returns [`MoeaError::InvalidConfig`] if `delta` lies outside
    /// `[delta_min, delta_max]` or any value is negative or not finite.
    pub fn new(epsilon: f64, delta: f64, delta_min: f64, delta_max: f64) -> Result<Self> {
        Self::from_config(&EpsilonConfig {
            epsilon,
            delta,
            delta_min,
            delta_max,
        })
    }

    /// Creates an adaptive epsilon from a validated configuration.
    pub fn from_config(config: &EpsilonConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            epsilon: config.epsilon,
            delta: config.delta,
            delta_min: config.delta_min,
            delta_max: config.delta_max,
        })
    }

    /// Current epsilon.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Current step.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Lower step bound.
    pub fn delta_min(&self) -> f64 {
        self.delta_min
    }

    /// Upper step bound.
    pub fn delta_max(&self) -> f64 {
        self.delta_max
    }

    /// Runs one control step.
    ///
    /// `too_small` signals that the current epsilon produced too many
    /// elements (epsilon-dominant survivors or neighborhoods); epsilon then
    /// grows. Otherwise it shrinks.
    pub fn adapt(&mut self, too_small: bool) {
        let (old_epsilon, old_delta) = (self.epsilon, self.delta);
        if too_small {
            self.increase();
        } else {
            self.decrease();
        }
        log::debug!(
            "epsilon {} -> {} (delta {} -> {})",
            old_epsilon,
            self.epsilon,
            old_delta,
            self.delta
        );
    }

    fn increase(&mut self) {
        self.epsilon += self.delta;
        self.delta = self.delta_max.min(2.0 * self.delta);
    }

    fn decrease(&mut self) {
        self.epsilon = (self.epsilon - self.delta).max(0.0);
        self.delta = self.delta_min.max(self.delta / 2.0);
    }
}

impl Default for AdaptiveEpsilon {
    fn default() -> Self {
        let config = EpsilonConfig::default();
        Self {
            epsilon: config.epsilon,
            delta: config.delta,
            delta_min: config.delta_min,
            delta_max: config.delta_max,
        }
    }
}

/// The two epsilon control loops of an AeSeH run.
///
/// The sampling epsilon is tuned by survivor selection (targeting the
/// population size); the neighborhood epsilon by neighborhood creation
/// (targeting the planned neighborhood count). The two never influence each
/// other.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EpsilonAdaptation {
    sampling: AdaptiveEpsilon,
    neighborhood: AdaptiveEpsilon,
}

impl EpsilonAdaptation {
    /// Creates both control loops; fails if either configuration is invalid.
    pub fn new(sampling: &EpsilonConfig, neighborhood: &EpsilonConfig) -> Result<Self> {
        Ok(Self {
            sampling: AdaptiveEpsilon::from_config(sampling)?,
            neighborhood: AdaptiveEpsilon::from_config(neighborhood)?,
        })
    }

    pub fn sampling_epsilon(&self) -> f64 {
        self.sampling.epsilon()
    }

    pub fn neighborhood_epsilon(&self) -> f64 {
        self.neighborhood.epsilon()
    }

    /// Adapts the sampling epsilon; `too_many_dominant` grows it.
    pub fn adapt_sampling_epsilon(&mut self, too_many_dominant: bool) {
        self.sampling.adapt(too_many_dominant);
    }

    /// Adapts the neighborhood epsilon; `too_many_neighborhoods` grows it.
    pub fn adapt_neighborhood_epsilon(&mut self, too_many_neighborhoods: bool) {
        self.neighborhood.adapt(too_many_neighborhoods);
    }

    pub fn sampling(&self) -> &AdaptiveEpsilon {
        &self.sampling
    }

    pub fn neighborhood(&self) -> &AdaptiveEpsilon {
        &self.neighborhood
    }

    /// Splits into `(sampling, neighborhood)` so each loop can be handed to
    /// the component that drives it.
    pub fn split(self) -> (AdaptiveEpsilon, AdaptiveEpsilon) {
        (self.sampling, self.neighborhood)
    }
}
