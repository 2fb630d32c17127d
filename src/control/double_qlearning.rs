use std::hash::Hash;

use fxhash::FxHashMap;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::env::Env;
use crate::utils::argmax;

use super::ControlAlgorithm;

/// Off-policy Double Q-learning over two independent lazily materialized
/// Q-tables.
///
/// Action selection is the biased variant: a fair coin picks one of the
/// two tables and the greedy action is taken under it alone (canonical
/// Double-Q is greedy over the sum). States whose rows are still all zero
/// select uniformly at random. One coin flip per episode decides which
/// table learns; every recorded pair is then updated with the terminal
/// reward and the other table's value at the learner's greedy action for
/// the same state.
pub struct DoubleQLearning<T: Hash + PartialEq + Eq + Clone, const COUNT: usize, R: Rng = SmallRng>
{
    learning_rate: f64,
    q1: FxHashMap<T, [f64; COUNT]>,
    q2: FxHashMap<T, [f64; COUNT]>,
    default: [f64; COUNT],
    trajectory: Vec<(T, usize)>,
    coin: Uniform<f64>,
    rand_action_selecter: Uniform<usize>,
    rng: R,
}

impl<T: Hash + PartialEq + Eq + Clone, const COUNT: usize> DoubleQLearning<T, COUNT, SmallRng> {
    pub fn new(learning_rate: f64, seed: u64) -> Self {
        Self::with_rng(learning_rate, SmallRng::seed_from_u64(seed))
    }
}

impl<T: Hash + PartialEq + Eq + Clone, const COUNT: usize, R: Rng> DoubleQLearning<T, COUNT, R> {
    pub fn with_rng(learning_rate: f64, rng: R) -> Self {
        Self {
            learning_rate,
            q1: FxHashMap::default(),
            q2: FxHashMap::default(),
            default: [0.0; COUNT],
            trajectory: vec![],
            coin: Uniform::from(0.0..1.0),
            rand_action_selecter: Uniform::from(0..COUNT),
            rng,
        }
    }

    fn get_action(&mut self, obs: &T) -> usize {
        let a_values = self.q1.get(obs).unwrap_or(&self.default);
        let b_values = self.q2.get(obs).unwrap_or(&self.default);
        let total: f64 = a_values.iter().sum::<f64>() + b_values.iter().sum::<f64>();
        if total == 0.0 {
            // nothing learned for this state yet
            self.rand_action_selecter.sample(&mut self.rng)
        } else if self.coin.sample(&mut self.rng) < 0.5 {
            argmax(a_values)
        } else {
            argmax(b_values)
        }
    }

    fn update_table(
        learner: &mut FxHashMap<T, [f64; COUNT]>,
        bootstrap: &FxHashMap<T, [f64; COUNT]>,
        trajectory: &[(T, usize)],
        reward: f64,
        learning_rate: f64,
        default: &[f64; COUNT],
    ) {
        for (obs, action) in trajectory {
            let greedy = argmax(learner.get(obs).unwrap_or(default));
            let target = bootstrap.get(obs).unwrap_or(default)[greedy];
            let values = learner.entry(obs.clone()).or_insert(*default);
            values[*action] += learning_rate * (reward + target - values[*action]);
        }
    }
}

impl<T: Hash + PartialEq + Eq + Clone, const COUNT: usize, R: Rng> ControlAlgorithm<T, COUNT>
    for DoubleQLearning<T, COUNT, R>
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
        // one coin flip picks the learning table for the whole episode
        if self.coin.sample(&mut self.rng) < 0.5 {
            Self::update_table(
                &mut self.q1,
                &self.q2,
                &self.trajectory,
                reward,
                self.learning_rate,
                &self.default,
            );
        } else {
            Self::update_table(
                &mut self.q2,
                &self.q1,
                &self.trajectory,
                reward,
                self.learning_rate,
                &self.default,
            );
        }
        reward
    }
}
