//! Selector configuration.

/// Configuration for [`Nsga2`](super::Nsga2).
///
/// # Builder Pattern
///
/// ```
/// use u_moea::selector::Nsga2Config;
///
/// let config = Nsga2Config::default().with_tournament(2);
/// assert_eq!(config.tournament, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nsga2Config {
    /// Number of opponents each parent candidate faces.
    ///
    /// 0 draws parents uniformly at random; 1 is a binary tournament.
    pub tournament: usize,
}

impl Nsga2Config {
    /// Sets the tournament size.
    pub fn with_tournament(mut self, tournament: usize) -> Self {
        self.tournament = tournament;
        self
    }
}

/// Configuration for [`Spea2`](super::Spea2).
///
/// ```
/// use u_moea::selector::Spea2Config;
///
/// let config = Spea2Config::default().with_tournament(1);
/// assert_eq!(config.tournament, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spea2Config {
    /// Number of opponents each parent candidate faces (0 = uniform random).
    pub tournament: usize,
}

impl Spea2Config {
    /// Sets the tournament size.
    pub fn with_tournament(mut self, tournament: usize) -> Self {
        self.tournament = tournament;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tournament_is_zero() {
        assert_eq!(Nsga2Config::default().tournament, 0);
        assert_eq!(Spea2Config::default().tournament, 0);
    }

    #[test]
    fn test_builder_pattern() {
        assert_eq!(Nsga2Config::default().with_tournament(3).tournament, 3);
        assert_eq!(Spea2Config::default().with_tournament(4).tournament, 4);
    }
}
