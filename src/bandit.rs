mod epsilon_greedy;
mod greedy;
mod thompson;
mod upper_confidence_bound;

use enum_dispatch::enum_dispatch;

pub use epsilon_greedy::EpsilonGreedy;
pub use greedy::Greedy;
pub use thompson::ThompsonSampling;
pub use upper_confidence_bound::UpperConfidenceBound;

use rand::distributions::{Distribution, Uniform};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Bernoulli reward source: `pull` pays 1.0 with the configured probability.
#[derive(Debug, Clone)]
pub struct Arm {
    p: f64,
    dist: Uniform<f64>,
    rng: SmallRng,
}

impl Arm {
    pub fn new(p: f64, seed: u64) -> Self {
        Self {
            p,
            dist: Uniform::from(0.0..1.0),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn pull(&mut self) -> f64 {
        if self.dist.sample(&mut self.rng) < self.p {
            1.0
        } else {
            0.0
        }
    }
}

#[enum_dispatch]
pub trait BanditPolicy {
    /// Picks the next action from the current value estimates.
    fn select(&mut self) -> usize;
    /// Feeds back the reward obtained for `action`.
    fn observe(&mut self, action: usize, reward: f64);
}

#[derive(Debug, Clone)]
#[enum_dispatch(BanditPolicy)]
pub enum EnumBanditPolicy {
    Greedy(Greedy),
    EpsilonGreedy(EpsilonGreedy),
    UpperConfidenceBound(UpperConfidenceBound),
    ThompsonSampling(ThompsonSampling),
}
