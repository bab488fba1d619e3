//! Error types shared by all selection and coupling components.

/// Errors raised by the selection engine.
///
/// Every variant indicates misconfiguration or a violated call contract in
/// the embedding optimizer. None of them is transient, so callers should
/// surface them instead of retrying.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MoeaError {
    /// A configuration value is outside its legal range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A coupler was called with a `size` that violates its contract.
    #[error("couple count {actual} violates the coupler contract (expected {expected})")]
    SizeMismatch { expected: usize, actual: usize },

    /// Couples were requested from an empty parent pool.
    #[error("cannot build couples from an empty parent pool")]
    EmptyParents,

    /// More lames were requested than the population holds.
    #[error("cannot select {lambda} lames from a population of {population}")]
    LambdaTooLarge { lambda: usize, population: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MoeaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = MoeaError::SizeMismatch {
            expected: 2,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "couple count 3 violates the coupler contract (expected 2)"
        );

        let err = MoeaError::InvalidConfig("planned_neighborhoods must be at least 1".into());
        assert!(err.to_string().contains("planned_neighborhoods must be at least 1"));
    }
}
