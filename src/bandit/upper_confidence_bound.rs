use crate::estimator::ValueEstimator;
use crate::utils::argmax;

use super::BanditPolicy;

/// Never-visited actions get a near-infinite bonus through this floor
/// instead of dividing by zero.
const VISIT_FLOOR: f64 = 1e-8;

/// Optimism under uncertainty: maximizes the running mean plus a bonus
/// that shrinks with the action's own visit count.
///
/// The logarithm needs at least one recorded pull overall, so the driver
/// must warm the policy up with one random pull before relying on it.
#[derive(Debug, Clone)]
pub struct UpperConfidenceBound {
    estimator: ValueEstimator,
}

impl UpperConfidenceBound {
    pub fn new(n_actions: usize) -> Self {
        Self {
            estimator: ValueEstimator::new(n_actions),
        }
    }

    pub fn estimator(&self) -> &ValueEstimator {
        &self.estimator
    }

    pub fn bonus(total_visits: u64, visits: u64) -> f64 {
        (2.0 * (total_visits as f64).ln() / (visits as f64 + VISIT_FLOOR)).sqrt()
    }
}

impl BanditPolicy for UpperConfidenceBound {
    fn select(&mut self) -> usize {
        let total_visits = self.estimator.total_visits();
        let mut ucbs: Vec<f64> = Vec::with_capacity(self.estimator.n_actions());
        for action in 0..self.estimator.n_actions() {
            ucbs.push(
                self.estimator.mean(action)
                    + Self::bonus(total_visits, self.estimator.visits(action)),
            );
        }
        argmax(&ucbs)
    }

    fn observe(&mut self, action: usize, reward: f64) {
        self.estimator.record(action, reward);
    }
}

#[cfg(test)]
mod tests {
    use super::UpperConfidenceBound;
    use crate::bandit::BanditPolicy;

    #[test]
    fn bonus_shrinks_as_the_action_is_visited() {
        let mut previous = UpperConfidenceBound::bonus(100, 1);
        for visits in 2..20 {
            let bonus = UpperConfidenceBound::bonus(100, visits);
            assert!(bonus < previous, "visits {}: {} >= {}", visits, bonus, previous);
            previous = bonus;
        }
    }

    #[test]
    fn bonus_grows_with_total_visits() {
        let mut previous = UpperConfidenceBound::bonus(2, 5);
        for total in [4, 8, 16, 32, 64] {
            let bonus = UpperConfidenceBound::bonus(total, 5);
            assert!(bonus > previous, "total {}: {} <= {}", total, bonus, previous);
            previous = bonus;
        }
    }

    #[test]
    fn prefers_the_undersampled_action() {
        let mut policy = UpperConfidenceBound::new(2);
        // Action 0 well sampled and rewarding, action 1 seen once: the
        // bonus should still pull selection toward action 1.
        for _ in 0..50 {
            policy.observe(0, 1.0);
        }
        policy.observe(1, 1.0);
        assert_eq!(policy.select(), 1);
    }
}
