mod blackjack;

pub use blackjack::{BlackJackEnv, BlackJackObservation};

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

#[derive(Debug, Clone)]
pub struct EnvNotReady;

/// Episodic environment over discrete actions. `step` reports the next
/// observation, the reward and whether the episode terminated; a terminal
/// signal is normal control flow, not an error.
pub trait Env<T> {
    fn reset(&mut self) -> T;
    fn step(&mut self, action: usize) -> Result<(T, f64, bool), EnvNotReady>;
    fn action_space(&self) -> ActionSpace;
    fn render(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct ActionSpace {
    pub size: usize,
    dist: Uniform<usize>,
}

impl ActionSpace {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            dist: Uniform::from(0..size),
        }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        self.dist.sample(rng)
    }
}
