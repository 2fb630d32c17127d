use rand::distributions::{Distribution, Uniform};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::estimator::ValueEstimator;
use crate::utils::argmax;

use super::BanditPolicy;

/// Exploits the greedy action, except that with probability `epsilon` it
/// picks uniformly among all actions (the greedy one included).
#[derive(Debug, Clone)]
pub struct EpsilonGreedy {
    epsilon: f64,
    estimator: ValueEstimator,
    exploration_decider: Uniform<f64>,
    rand_action_selecter: Uniform<usize>,
    rng: SmallRng,
}

impl EpsilonGreedy {
    pub fn new(n_actions: usize, epsilon: f64, seed: u64) -> Self {
        Self {
            epsilon,
            estimator: ValueEstimator::new(n_actions),
            exploration_decider: Uniform::from(0.0..1.0),
            rand_action_selecter: Uniform::from(0..n_actions),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn estimator(&self) -> &ValueEstimator {
        &self.estimator
    }

    fn should_explore(&mut self) -> bool {
        self.epsilon != 0.0 && self.exploration_decider.sample(&mut self.rng) < self.epsilon
    }
}

impl BanditPolicy for EpsilonGreedy {
    fn select(&mut self) -> usize {
        if self.should_explore() {
            self.rand_action_selecter.sample(&mut self.rng)
        } else {
            argmax(self.estimator.means())
        }
    }

    fn observe(&mut self, action: usize, reward: f64) {
        self.estimator.record(action, reward);
    }
}

#[cfg(test)]
mod tests {
    use super::EpsilonGreedy;
    use crate::bandit::{BanditPolicy, Greedy};
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn zero_epsilon_behaves_like_greedy() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut greedy = Greedy::new(4);
        let mut policy = EpsilonGreedy::new(4, 0.0, 99);
        for _ in 0..300 {
            assert_eq!(policy.select(), greedy.select());
            let action = rng.gen_range(0..4);
            let reward = if rng.gen::<f64>() < 0.5 { 1.0 } else { 0.0 };
            greedy.observe(action, reward);
            policy.observe(action, reward);
        }
    }

    #[test]
    fn full_epsilon_selects_uniformly() {
        let mut policy = EpsilonGreedy::new(2, 1.0, 5);
        policy.observe(0, 1.0);
        let mut counts = [0usize; 2];
        for _ in 0..2000 {
            counts[policy.select()] += 1;
        }
        for count in counts {
            let frequency = count as f64 / 2000.0;
            assert!((frequency - 0.5).abs() < 0.1, "frequency {}", frequency);
        }
    }
}
