use std::hash::Hash;

use fxhash::FxHashMap;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::env::Env;
use crate::utils::argmax;

use super::ControlAlgorithm;

/// On-policy Monte Carlo control over a lazily materialized Q-table.
///
/// The 1/N step size uses a single episode counter shared by every
/// state-action pair, so the learning rate decays globally across the
/// whole run rather than per pair.
pub struct MonteCarloControl<T: Hash + PartialEq + Eq + Clone, const COUNT: usize, R: Rng = SmallRng>
{
    epsilon: f64,
    q: FxHashMap<T, [f64; COUNT]>,
    default: [f64; COUNT],
    n: u64,
    trajectory: Vec<(T, usize)>,
    exploration_decider: Uniform<f64>,
    rand_action_selecter: Uniform<usize>,
    rng: R,
}

impl<T: Hash + PartialEq + Eq + Clone, const COUNT: usize> MonteCarloControl<T, COUNT, SmallRng> {
    pub fn new(epsilon: f64, seed: u64) -> Self {
        Self::with_rng(epsilon, SmallRng::seed_from_u64(seed))
    }
}

impl<T: Hash + PartialEq + Eq + Clone, const COUNT: usize, R: Rng>
    MonteCarloControl<T, COUNT, R>
{
    pub fn with_rng(epsilon: f64, rng: R) -> Self {
        Self {
            epsilon,
            q: FxHashMap::default(),
            default: [0.0; COUNT],
            n: 1,
            trajectory: vec![],
            exploration_decider: Uniform::from(0.0..1.0),
            rand_action_selecter: Uniform::from(0..COUNT),
            rng,
        }
    }

    pub fn values(&self, obs: &T) -> [f64; COUNT] {
        *self.q.get(obs).unwrap_or(&self.default)
    }

    fn should_explore(&mut self) -> bool {
        self.epsilon != 0.0 && self.exploration_decider.sample(&mut self.rng) < self.epsilon
    }

    fn get_action(&mut self, obs: &T) -> usize {
        if self.should_explore() {
            self.rand_action_selecter.sample(&mut self.rng)
        } else {
            argmax(self.q.get(obs).unwrap_or(&self.default))
        }
    }
}

impl<T: Hash + PartialEq + Eq + Clone, const COUNT: usize, R: Rng> ControlAlgorithm<T, COUNT>
    for MonteCarloControl<T, COUNT, R>
{
    fn run_episode(&mut self, env: &mut dyn Env<T>) -> f64 {
        let mut obs = env.reset();
        self.trajectory.clear();
        let reward = loop {
            let action = self.get_action(&obs);
            self.trajectory.push((obs.clone(), action));
            let (next_obs, reward, terminated) = env.step(action).unwrap();
            if terminated {
                break reward;
            }
            obs = next_obs;
        };
        for (obs, action) in &self.trajectory {
            let values = self.q.entry(obs.clone()).or_insert(self.default);
            values[*action] += (reward - values[*action]) / self.n as f64;
        }
        self.n += 1;
        reward
    }
}
