use std::time::Instant;

use bandit_control::control::{
    block_rewards, ControlAlgorithm, DoubleQLearning, MonteCarloControl, EACH_ROUND,
};
use bandit_control::env::{BlackJackEnv, BlackJackObservation};
use bandit_control::utils::{plot_blocks, save_json};

use kdam::tqdm;
use serde_json::json;
use structopt::StructOpt;

/// Train Monte Carlo control and Double Q-learning on Blackjack and report
/// their win-rate curves
#[derive(StructOpt, Debug)]
#[structopt(name = "Bandit Control - BlackJack")]
struct Cli {
    /// Number of episodes for the training
    #[structopt(long = "n_episodes", short = "n", default_value = "100000")]
    n_episodes: usize,

    /// Exploration ratio of the Monte Carlo control policy
    #[structopt(long = "epsilon", default_value = "0.2")]
    epsilon: f64,

    /// Learning rate of the Double Q-learning agent
    #[structopt(long = "learning_rate", default_value = "0.2")]
    learning_rate: f64,

    /// Seed for reproducibility
    #[structopt(long = "seed", default_value = "42")]
    seed: u64,

    /// Path of the generated win-rate plot
    #[structopt(long = "plot", default_value = "blackjack_win_rate.png")]
    plot: String,

    /// Path of the generated results file
    #[structopt(long = "output", default_value = "blackjack_results.json")]
    output: String,
}

fn train_with_progress<A: ControlAlgorithm<BlackJackObservation, 2>>(
    label: &str,
    agent: &mut A,
    env: &mut BlackJackEnv,
    n_episodes: usize,
) -> Vec<f64> {
    let now = Instant::now();
    let mut rewards: Vec<f64> = Vec::with_capacity(n_episodes);
    for _ in tqdm!(0..n_episodes, desc = label.to_string()) {
        rewards.push(agent.run_episode(env));
    }
    let win_rate = block_rewards(&rewards, EACH_ROUND);
    let wins = rewards.iter().filter(|&&r| r == 1.0).count();
    println!(
        "\n{} has:\n - training time of {:.2?}\n - win-rate of {:.2}%",
        label,
        now.elapsed(),
        100.0 * wins as f64 / n_episodes as f64
    );
    win_rate
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli: Cli = Cli::from_args();

    let mut env = BlackJackEnv::new(cli.seed);
    let mut monte_carlo: MonteCarloControl<BlackJackObservation, 2> =
        MonteCarloControl::new(cli.epsilon, cli.seed + 1);
    let mc_win_rate = train_with_progress(
        "Monte Carlo Control",
        &mut monte_carlo,
        &mut env,
        cli.n_episodes,
    );
    println!(" - block rewards of {:?}", mc_win_rate);

    let mut env = BlackJackEnv::new(cli.seed + 2);
    let mut double_q: DoubleQLearning<BlackJackObservation, 2> =
        DoubleQLearning::new(cli.learning_rate, cli.seed + 3);
    let dq_win_rate =
        train_with_progress("Double Q-Learning", &mut double_q, &mut env, cli.n_episodes);
    println!(" - block rewards of {:?}", dq_win_rate);

    plot_blocks(
        &cli.plot,
        "Blackjack reward per 1000-episode block",
        &[
            ("Monte Carlo Control", mc_win_rate.as_slice()),
            ("Double Q-Learning", dq_win_rate.as_slice()),
        ],
    )?;

    match save_json(
        &cli.output,
        json!({
            "monte_carlo_control": mc_win_rate,
            "double_q_learning": dq_win_rate,
        }),
    ) {
        Ok(_) => println!("saved {}", cli.output),
        Err(e) => println!("failed to save {}: {}", cli.output, e),
    }
    Ok(())
}
