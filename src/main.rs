//! Stdio front end: runs the command loop over the given command files, then
//! standard input.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use ataxx_engine::game::game_controller::{Game, GameConfig, PlayerKind};
use ataxx_engine::game::reporter::StdoutReporter;
use ataxx_engine::game_state::ataxx_rules::DEFAULT_SEARCH_DEPTH;
use ataxx_engine::game_state::ataxx_types::PieceColor;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ataxx", version, about = "Play Ataxx against the minimax engine")]
struct Args {
    /// Seed for the engine's tie-break RNG
    #[arg(long)]
    seed: Option<u64>,

    /// Let the engine play this side (red or blue); repeatable
    #[arg(long, value_parser = parse_player)]
    auto: Vec<PieceColor>,

    /// Take this side's moves from input (red or blue); repeatable
    #[arg(long, value_parser = parse_player)]
    manual: Vec<PieceColor>,

    /// Maximum search depth
    #[arg(long, default_value_t = DEFAULT_SEARCH_DEPTH)]
    depth: u8,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Command files read before standard input
    files: Vec<PathBuf>,
}

fn parse_player(text: &str) -> Result<PieceColor, String> {
    PieceColor::parse_player(text).ok_or_else(|| format!("expected red or blue, got '{text}'"))
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut config = GameConfig {
        search_depth: args.depth,
        seed: args.seed,
        ..GameConfig::default()
    };
    for color in &args.auto {
        set_player(&mut config, *color, PlayerKind::Auto);
    }
    for color in &args.manual {
        set_player(&mut config, *color, PlayerKind::Manual);
    }
    info!(?config, "starting session");

    let mut game = Game::new(config, StdoutReporter);
    game.push_source(Box::new(BufReader::new(io::stdin())));
    for path in args.files.iter().rev() {
        match File::open(path) {
            Ok(file) => game.push_source(Box::new(BufReader::new(file))),
            Err(err) => {
                error!(path = %path.display(), error = %err, "cannot open command file");
                eprintln!("error: cannot read {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
        }
    }

    game.run();
    ExitCode::SUCCESS
}

fn set_player(config: &mut GameConfig, color: PieceColor, kind: PlayerKind) {
    if color == PieceColor::Red {
        config.red = kind;
    } else {
        config.blue = kind;
    }
}
