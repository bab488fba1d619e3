//! Arbitration between neighborhoods.

/// Decides which neighborhood supplies the next couple.
pub trait NeighborhoodScheduler {
    /// Index of the next neighborhood, or `None` if there are none.
    fn next_neighborhood(&mut self) -> Option<usize>;
}

/// Cycles through `count` neighborhoods in creation order, wrapping to 0.
///
/// ```
/// use u_moea::coupler::{NeighborhoodScheduler, RoundRobinScheduler};
///
/// let mut scheduler = RoundRobinScheduler::new(3);
/// let visits: Vec<usize> = (0..5).filter_map(|_| scheduler.next_neighborhood()).collect();
/// assert_eq!(visits, vec![0, 1, 2, 0, 1]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRobinScheduler {
    count: usize,
    cursor: usize,
}

impl RoundRobinScheduler {
    pub fn new(count: usize) -> Self {
        Self { count, cursor: 0 }
    }

    /// Number of neighborhoods being cycled.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl NeighborhoodScheduler for RoundRobinScheduler {
    fn next_neighborhood(&mut self) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let index = self.cursor;
        self.cursor = (self.cursor + 1) % self.count;
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_rounds_visit_each_twice_in_order() {
        let mut scheduler = RoundRobinScheduler::new(4);
        let visits: Vec<usize> = (0..8)
            .map(|_| scheduler.next_neighborhood().unwrap())
            .collect();
        assert_eq!(visits, vec![0, 1, 2, 3, 0, 1, 2, 3]);
    }

    #[test]
    fn test_single_neighborhood() {
        let mut scheduler = RoundRobinScheduler::new(1);
        assert_eq!(scheduler.next_neighborhood(), Some(0));
        assert_eq!(scheduler.next_neighborhood(), Some(0));
    }

    #[test]
    fn test_no_neighborhoods() {
        let mut scheduler = RoundRobinScheduler::new(0);
        assert_eq!(scheduler.next_neighborhood(), None);
    }
}
