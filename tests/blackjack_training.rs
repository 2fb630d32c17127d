use bandit_control::control::{ControlAlgorithm, DoubleQLearning, MonteCarloControl};
use bandit_control::env::{BlackJackEnv, BlackJackObservation};

fn trend(win_rate: &[f64]) -> (f64, f64) {
    let head = &win_rate[..10];
    let tail = &win_rate[win_rate.len() - 10..];
    (
        head.iter().sum::<f64>() / head.len() as f64,
        tail.iter().sum::<f64>() / tail.len() as f64,
    )
}

#[test]
fn monte_carlo_win_rate_trend_is_non_decreasing() {
    let mut env = BlackJackEnv::new(123);
    let mut agent: MonteCarloControl<BlackJackObservation, 2> = MonteCarloControl::new(0.2, 321);
    let win_rate = agent.train(&mut env, 50_000);
    assert_eq!(win_rate.len(), 50);
    let (first, last) = trend(&win_rate);
    assert!(last >= first, "first blocks {} last blocks {}", first, last);
}

#[test]
fn double_q_learning_win_rate_trend_is_non_decreasing() {
    let mut env = BlackJackEnv::new(456);
    let mut agent: DoubleQLearning<BlackJackObservation, 2> = DoubleQLearning::new(0.2, 654);
    let win_rate = agent.train(&mut env, 50_000);
    assert_eq!(win_rate.len(), 50);
    let (first, last) = trend(&win_rate);
    assert!(last >= first, "first blocks {} last blocks {}", first, last);
}
