use rand::rngs::SmallRng;
use rand::SeedableRng;
use rand_distr::{Beta, Distribution};

use crate::estimator::ValueEstimator;
use crate::utils::argmax;

use super::BanditPolicy;

/// Keeps a Beta posterior over every action's success probability, samples
/// one value per posterior and plays the best sample.
///
/// Rewards must be binary: 1.0 bumps the action's alpha shape, anything
/// else bumps beta. Feeding other reward domains is a caller error.
#[derive(Debug, Clone)]
pub struct ThompsonSampling {
    estimator: ValueEstimator,
    alpha: Vec<f64>,
    beta: Vec<f64>,
    rng: SmallRng,
}

impl ThompsonSampling {
    pub fn new(n_actions: usize, seed: u64) -> Self {
        Self {
            estimator: ValueEstimator::new(n_actions),
            alpha: vec![1.0; n_actions],
            beta: vec![1.0; n_actions],
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn estimator(&self) -> &ValueEstimator {
        &self.estimator
    }

    pub fn posterior(&self, action: usize) -> (f64, f64) {
        (self.alpha[action], self.beta[action])
    }
}

impl BanditPolicy for ThompsonSampling {
    fn select(&mut self) -> usize {
        let mut samples: Vec<f64> = Vec::with_capacity(self.estimator.n_actions());
        for action in 0..self.estimator.n_actions() {
            // Shapes start at 1.0 and only grow, so construction cannot fail.
            let posterior =
                Beta::new(self.alpha[action], self.beta[action]).expect("valid Beta shapes");
            samples.push(posterior.sample(&mut self.rng));
        }
        argmax(&samples)
    }

    fn observe(&mut self, action: usize, reward: f64) {
        self.estimator.record(action, reward);
        if reward == 1.0 {
            self.alpha[action] += 1.0;
        } else {
            self.beta[action] += 1.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ThompsonSampling;
    use crate::bandit::BanditPolicy;

    #[test]
    fn posterior_shapes_track_observations() {
        let mut policy = ThompsonSampling::new(2, 17);
        for _ in 0..4 {
            policy.observe(0, 1.0);
        }
        policy.observe(0, 0.0);
        assert_eq!(policy.posterior(0), (5.0, 2.0));
        assert_eq!(policy.posterior(1), (1.0, 1.0));
        // alpha + beta stays at 2 plus the action's visit count
        let (alpha, beta) = policy.posterior(0);
        assert_eq!(alpha + beta, 2.0 + policy.estimator().visits(0) as f64);
    }

    #[test]
    fn concentrates_on_the_winning_action() {
        let mut policy = ThompsonSampling::new(2, 23);
        for _ in 0..50 {
            policy.observe(0, 1.0);
        }
        let mut winner_picks = 0;
        for _ in 0..1000 {
            if policy.select() == 0 {
                winner_picks += 1;
            }
        }
        let frequency = winner_picks as f64 / 1000.0;
        assert!(frequency > 0.9, "frequency {}", frequency);
    }
}
