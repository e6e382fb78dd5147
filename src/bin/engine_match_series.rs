//! Standalone engine-vs-engine series runner.
//!
//! Run with:
//! `cargo run --release --bin engine_match_series`
//! `cargo run --release --bin engine_match_series -- --games 20 --depth 3 --verbose`

use std::process::ExitCode;

use ataxx_engine::engines::engine_minimax::MinimaxEngine;
use ataxx_engine::engines::engine_random::RandomEngine;
use ataxx_engine::engines::engine_trait::Engine;
use ataxx_engine::game_state::ataxx_rules::DEFAULT_SEARCH_DEPTH;
use ataxx_engine::utils::engine_match_harness::{
    play_engine_match_series, MatchConfig, MatchSeriesConfig,
};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Minimax vs random Ataxx match series")]
struct Args {
    /// Number of games
    #[arg(long, default_value_t = 10)]
    games: u16,

    /// Base seed; game i uses seed + i
    #[arg(long, default_value_t = 1234)]
    seed: u64,

    /// Minimax search depth
    #[arg(long, default_value_t = DEFAULT_SEARCH_DEPTH)]
    depth: u8,

    /// Log every game start and result
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let depth = args.depth;
    let player1 = move || Box::new(MinimaxEngine::new(depth)) as Box<dyn Engine>;
    let player2 = || Box::new(RandomEngine::new()) as Box<dyn Engine>;

    let stats = match play_engine_match_series(
        player1,
        player2,
        MatchSeriesConfig {
            games: args.games,
            base_seed: args.seed,
            per_game: MatchConfig {
                max_plies: 400,
                opening_random_plies: 2,
            },
        },
    ) {
        Ok(stats) => stats,
        Err(err) => {
            error!(error = %err, "match series failed");
            return ExitCode::FAILURE;
        }
    };

    println!("{}", stats.report());
    println!("outcomes: {:?}", stats.outcomes);
    ExitCode::SUCCESS
}
