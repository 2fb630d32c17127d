use std::time::Instant;

use bandit_control::bandit::{
    Arm, BanditPolicy, EnumBanditPolicy, EpsilonGreedy, Greedy, ThompsonSampling,
    UpperConfidenceBound,
};
use bandit_control::utils::save_json;

use plotters::prelude::*;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::json;
use structopt::StructOpt;

/// Sweep a grid of two-armed bandit configurations and compare the four policies
#[derive(StructOpt, Debug)]
#[structopt(name = "Bandit Control - Sweep")]
struct Cli {
    /// Number of pulls per repetition
    #[structopt(long = "n_pulls", short = "n", default_value = "100")]
    n_pulls: usize,

    /// Number of repetitions averaged per grid cell
    #[structopt(long = "repetitions", default_value = "5")]
    repetitions: usize,

    /// Exploration ratio of the epsilon-greedy policy
    #[structopt(long = "epsilon", default_value = "0.2")]
    epsilon: f64,

    /// Seed for reproducibility
    #[structopt(long = "seed", default_value = "42")]
    seed: u64,

    /// Path of the generated comparison plot
    #[structopt(long = "plot", default_value = "bandit_comparison.png")]
    plot: String,

    /// Path of the generated results file
    #[structopt(long = "output", default_value = "bandit_results.json")]
    output: String,
}

const POLICY_NAMES: [&str; 4] = ["Greedy", "Epsilon-Greedy", "UCB", "Thompson Sampling"];
const POLICY_COLORS: [RGBColor; 4] = [RED, BLUE, GREEN, MAGENTA];

fn build_policies(n_arms: usize, epsilon: f64, seed: u64) -> Vec<EnumBanditPolicy> {
    vec![
        Greedy::new(n_arms).into(),
        EpsilonGreedy::new(n_arms, epsilon, seed).into(),
        UpperConfidenceBound::new(n_arms).into(),
        ThompsonSampling::new(n_arms, seed + 1).into(),
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli: Cli = Cli::from_args();

    let probabilities: Vec<f64> = (1..10).map(|i| i as f64 / 10.0).collect();
    let mut results = vec![vec![[0.0f64; 4]; probabilities.len()]; probabilities.len()];

    let mut warmup_rng = SmallRng::seed_from_u64(cli.seed);
    let warmup = Uniform::from(0..2usize);
    let mut next_seed = cli.seed;

    let now = Instant::now();
    for (a_idx, a_win) in probabilities.iter().enumerate() {
        for (b_idx, b_win) in probabilities.iter().enumerate() {
            let mut arms = [Arm::new(*a_win, next_seed), Arm::new(*b_win, next_seed + 1)];
            let mut policies = build_policies(2, cli.epsilon, next_seed + 2);
            next_seed += 4;
            for (policy_idx, policy) in policies.iter_mut().enumerate() {
                // The policy keeps learning across the repetitions; only
                // the reward tally restarts, and every repetition opens
                // with one random warm-up pull.
                for _ in 0..cli.repetitions {
                    let mut total_reward = 0.0;
                    for pull in 0..cli.n_pulls {
                        let action = if pull == 0 {
                            warmup.sample(&mut warmup_rng)
                        } else {
                            policy.select()
                        };
                        let reward = arms[action].pull();
                        policy.observe(action, reward);
                        total_reward += reward;
                    }
                    results[a_idx][b_idx][policy_idx] += total_reward / cli.repetitions as f64;
                }
            }
        }
    }
    println!(
        "swept {0}x{0} probability grid in {1:.2?}",
        probabilities.len(),
        now.elapsed()
    );

    for (policy_idx, name) in POLICY_NAMES.iter().enumerate() {
        let total: f64 = results
            .iter()
            .flatten()
            .map(|cell| cell[policy_idx])
            .sum();
        println!("{}:\n - total reward of {:.1}", name, total);
    }

    let root = BitMapBackend::new(&cli.plot, (900, 900)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Comparison of Bandit Algorithms", ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..1.0f64, 0.0..1.0f64)?;
    chart
        .configure_mesh()
        .x_desc("E(P(A))")
        .y_desc("E(P(B))")
        .draw()?;
    for (policy_idx, name) in POLICY_NAMES.iter().enumerate() {
        let color = POLICY_COLORS[policy_idx];
        let mut points = vec![];
        for (a_idx, a_win) in probabilities.iter().enumerate() {
            for (b_idx, b_win) in probabilities.iter().enumerate() {
                let value = results[a_idx][b_idx][policy_idx];
                points.push(Circle::new(
                    (
                        a_win + 0.01 * policy_idx as f64,
                        b_win + 0.01 * policy_idx as f64,
                    ),
                    (value / 10.0).max(1.0) as i32,
                    color.mix(0.3).filled(),
                ));
            }
        }
        chart
            .draw_series(points)?
            .label(*name)
            .legend(move |(x, y)| Circle::new((x + 10, y), 5, color.filled()));
    }
    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()?;
    root.present()?;

    match save_json(
        &cli.output,
        json!({
            "probabilities": probabilities,
            "policies": POLICY_NAMES,
            "results": results,
        }),
    ) {
        Ok(_) => println!("saved {}", cli.output),
        Err(e) => println!("failed to save {}: {}", cli.output, e),
    }
    Ok(())
}
