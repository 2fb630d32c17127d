/// Per-action running statistics shared by every bandit policy: how often
/// each action was taken and the incremental mean of its observed rewards.
#[derive(Debug, Clone)]
pub struct ValueEstimator {
    counts: Vec<u64>,
    values: Vec<f64>,
}

impl ValueEstimator {
    pub fn new(n_actions: usize) -> Self {
        Self {
            counts: vec![0; n_actions],
            values: vec![0.0; n_actions],
        }
    }

    pub fn n_actions(&self) -> usize {
        self.values.len()
    }

    /// Folds `reward` into the running mean for `action`.
    pub fn record(&mut self, action: usize, reward: f64) {
        self.counts[action] += 1;
        let value = self.values[action];
        self.values[action] = value + (reward - value) / self.counts[action] as f64;
    }

    /// Mean reward observed for `action`, 0.0 while unvisited.
    pub fn mean(&self, action: usize) -> f64 {
        self.values[action]
    }

    pub fn means(&self) -> &[f64] {
        &self.values
    }

    pub fn visits(&self, action: usize) -> u64 {
        self.counts[action]
    }

    pub fn total_visits(&self) -> u64 {
        self.counts.iter().sum()
    }
}
