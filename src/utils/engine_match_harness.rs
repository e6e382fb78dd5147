//! Head-to-head engine match harness for local testing.
//!
//! Runs two `Engine` implementations against each other on a plain `Board`,
//! with an optional seeded random opening prefix, and aggregates series
//! statistics.

use chrono::Local;
use rand::prelude::IndexedRandom;
use rand::{rngs::StdRng, SeedableRng};
use std::time::Instant;
use tracing::{debug, info};

use crate::engines::engine_trait::Engine;
use crate::game_state::ataxx_types::{Board, PieceColor};
use crate::game_state::board_errors::{BoardError, BoardResult};
use crate::move_generation::legal_move_generator::generate_legal_moves;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    RedWin,
    BlueWin,
    Draw,
    DrawMaxPlies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOutcome {
    PlayerWin { player: PlayerId, color: PieceColor },
    Draw,
    DrawMaxPlies,
}

#[derive(Debug, Clone, Copy)]
pub struct MatchConfig {
    pub max_plies: u16,
    /// Uniform random plies played before the engines take over.
    pub opening_random_plies: u8,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 400,
            opening_random_plies: 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_board: Board,
    pub opening_moves: Vec<String>,
    pub played_moves: Vec<String>,
    pub red_move_count: u32,
    pub blue_move_count: u32,
    pub red_total_time_ns: u128,
    pub blue_total_time_ns: u128,
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 10,
            base_seed: 0,
            per_game: MatchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub started_at: String,
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    pub outcomes: Vec<SeriesOutcome>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
    pub player1_avg_move_time_ms: f64,
    pub player2_avg_move_time_ms: f64,
    pub overall_avg_move_time_ms: f64,
}

impl MatchSeriesStats {
    pub fn report(&self) -> String {
        format!(
            "started={} games={} player1_wins={} player2_wins={} draws={} p1_avg_ms={:.3} p2_avg_ms={:.3} overall_avg_ms={:.3}",
            self.started_at,
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.draws,
            self.player1_avg_move_time_ms,
            self.player2_avg_move_time_ms,
            self.overall_avg_move_time_ms
        )
    }
}

/// Play a single seeded engine-vs-engine match from the starting position.
///
/// `engine_red` moves first.
pub fn play_engine_match(
    engine_red: &mut dyn Engine,
    engine_blue: &mut dyn Engine,
    seed: u64,
    config: MatchConfig,
) -> BoardResult<MatchResult> {
    engine_red.new_game();
    engine_blue.new_game();
    engine_red.set_seed(seed);
    engine_blue.set_seed(seed.rotate_left(17));

    let mut board = Board::new();
    let opening_moves = apply_seeded_random_opening(&mut board, seed, config.opening_random_plies)?;

    let mut result = MatchResult {
        outcome: MatchOutcome::DrawMaxPlies,
        final_board: Board::new(),
        opening_moves,
        played_moves: Vec::new(),
        red_move_count: 0,
        blue_move_count: 0,
        red_total_time_ns: 0,
        blue_total_time_ns: 0,
    };

    for _ in 0..config.max_plies {
        if board.game_over() {
            break;
        }

        let mover = board.side_to_move();
        let started = Instant::now();
        let out = if mover == PieceColor::Red {
            engine_red.choose_move(&board, mover)?
        } else {
            engine_blue.choose_move(&board, mover)?
        };
        let elapsed_ns = started.elapsed().as_nanos();

        if mover == PieceColor::Red {
            result.red_move_count = result.red_move_count.saturating_add(1);
            result.red_total_time_ns = result.red_total_time_ns.saturating_add(elapsed_ns);
        } else {
            result.blue_move_count = result.blue_move_count.saturating_add(1);
            result.blue_total_time_ns = result.blue_total_time_ns.saturating_add(elapsed_ns);
        }

        for line in &out.info_lines {
            debug!(target: "ataxx::match", color = %mover, "{line}");
        }
        result.played_moves.push(out.best_move.to_string());
        board.make_move(out.best_move)?;
    }

    if board.game_over() {
        result.outcome = match board.winner() {
            Some(PieceColor::Red) => MatchOutcome::RedWin,
            Some(_) => MatchOutcome::BlueWin,
            None => MatchOutcome::Draw,
        };
    }
    result.final_board = board;
    Ok(result)
}

/// Play a series of matches and aggregate win/loss/draw statistics.
///
/// Player 1 takes Red in even-numbered games and Blue in odd-numbered ones.
pub fn play_engine_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: MatchSeriesConfig,
) -> BoardResult<MatchSeriesStats>
where
    F1: Fn() -> Box<dyn Engine>,
    F2: Fn() -> Box<dyn Engine>,
{
    let mut stats = MatchSeriesStats {
        started_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        games: config.games,
        ..MatchSeriesStats::default()
    };

    for i in 0..config.games {
        let player1_is_red = i % 2 == 0;
        let seed = config.base_seed.wrapping_add(u64::from(i));
        let mut player1 = player1_factory();
        let mut player2 = player2_factory();
        let (red_name, blue_name) = if player1_is_red {
            (player1.name().to_owned(), player2.name().to_owned())
        } else {
            (player2.name().to_owned(), player1.name().to_owned())
        };
        info!(
            target: "ataxx::match",
            game = i + 1,
            games = config.games,
            seed,
            red = %red_name,
            blue = %blue_name,
            "series game starting"
        );

        let result = if player1_is_red {
            play_engine_match(player1.as_mut(), player2.as_mut(), seed, config.per_game)?
        } else {
            play_engine_match(player2.as_mut(), player1.as_mut(), seed, config.per_game)?
        };

        let (p1_moves, p2_moves, p1_ns, p2_ns) = if player1_is_red {
            (
                result.red_move_count,
                result.blue_move_count,
                result.red_total_time_ns,
                result.blue_total_time_ns,
            )
        } else {
            (
                result.blue_move_count,
                result.red_move_count,
                result.blue_total_time_ns,
                result.red_total_time_ns,
            )
        };
        stats.player1_moves = stats.player1_moves.saturating_add(p1_moves);
        stats.player2_moves = stats.player2_moves.saturating_add(p2_moves);
        stats.player1_total_time_ns = stats.player1_total_time_ns.saturating_add(p1_ns);
        stats.player2_total_time_ns = stats.player2_total_time_ns.saturating_add(p2_ns);

        let winner_color = match result.outcome {
            MatchOutcome::RedWin => Some(PieceColor::Red),
            MatchOutcome::BlueWin => Some(PieceColor::Blue),
            MatchOutcome::Draw | MatchOutcome::DrawMaxPlies => None,
        };
        let mapped = match winner_color {
            Some(color) => {
                let player = if (color == PieceColor::Red) == player1_is_red {
                    stats.player1_wins += 1;
                    PlayerId::Player1
                } else {
                    stats.player2_wins += 1;
                    PlayerId::Player2
                };
                SeriesOutcome::PlayerWin { player, color }
            }
            None => {
                stats.draws += 1;
                if result.outcome == MatchOutcome::DrawMaxPlies {
                    SeriesOutcome::DrawMaxPlies
                } else {
                    SeriesOutcome::Draw
                }
            }
        };
        stats.outcomes.push(mapped);

        info!(
            target: "ataxx::match",
            game = i + 1,
            result = ?mapped,
            red = result.final_board.num_pieces(PieceColor::Red),
            blue = result.final_board.num_pieces(PieceColor::Blue),
            p1_wins = stats.player1_wins,
            p2_wins = stats.player2_wins,
            draws = stats.draws,
            "series game finished"
        );
    }

    stats.player1_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player1_total_time_ns, stats.player1_moves);
    stats.player2_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player2_total_time_ns, stats.player2_moves);

    let total_ns = stats
        .player1_total_time_ns
        .saturating_add(stats.player2_total_time_ns);
    let total_moves = stats.player1_moves.saturating_add(stats.player2_moves);
    stats.overall_avg_move_time_ms = avg_ns_per_move_ms(total_ns, total_moves);

    Ok(stats)
}

#[inline]
fn avg_ns_per_move_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        (total_ns as f64) / (moves as f64) / 1_000_000.0
    }
}

fn apply_seeded_random_opening(
    board: &mut Board,
    seed: u64,
    plies: u8,
) -> BoardResult<Vec<String>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut opening_moves = Vec::with_capacity(usize::from(plies));

    for _ in 0..plies {
        if board.game_over() {
            break;
        }
        let legal_moves = generate_legal_moves(board);
        let chosen = *legal_moves
            .choose(&mut rng)
            .ok_or_else(|| BoardError::InvalidState("no legal opening move".to_owned()))?;
        opening_moves.push(chosen.to_string());
        board.make_move(chosen)?;
    }

    Ok(opening_moves)
}
