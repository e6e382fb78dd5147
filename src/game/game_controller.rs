//! Command-driven Ataxx session.
//!
//! `Game` owns the board, the phase state machine (setup, playing,
//! finished), the kind of player on each side and a stack of input sources.
//! Commands are dispatched with a single `match`; every failure is reported
//! through the [`Reporter`] and the session carries on.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::engines::engine_minimax::MinimaxEngine;
use crate::engines::engine_trait::Engine;
use crate::game::command::{Command, CommandError, HELP_TEXT};
use crate::game::reporter::Reporter;
use crate::game_state::ataxx_rules::DEFAULT_SEARCH_DEPTH;
use crate::game_state::ataxx_types::{Board, PieceColor};
use crate::game_state::board_errors::BoardError;
use crate::game_state::board_events::{BoardEvent, BoardObserver};
use crate::moves::ataxx_move::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Blocks and moves arrange the position; nobody plays automatically.
    Setup,
    Playing,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Manual,
    Auto,
}

#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    pub red: PlayerKind,
    pub blue: PlayerKind,
    pub search_depth: u8,
    /// Engine seed; `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            red: PlayerKind::Manual,
            blue: PlayerKind::Auto,
            search_depth: DEFAULT_SEARCH_DEPTH,
            seed: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Logs board changes as `tracing` debug events.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl BoardObserver for TracingObserver {
    fn board_changed(&self, event: &BoardEvent) {
        match event {
            BoardEvent::Cleared => debug!(target: "ataxx::board", "board cleared"),
            BoardEvent::MovePlayed(mv) => debug!(target: "ataxx::board", %mv, "move played"),
            BoardEvent::BlockPlaced(square) => {
                debug!(target: "ataxx::board", square, "block placed")
            }
            BoardEvent::MoveUndone(mv) => debug!(target: "ataxx::board", %mv, "move undone"),
        }
    }
}

pub struct Game<R: Reporter> {
    board: Board,
    phase: GamePhase,
    red: PlayerKind,
    blue: PlayerKind,
    engine: Box<dyn Engine>,
    reporter: R,
    sources: Vec<Box<dyn BufRead>>,
    quit: bool,
}

impl<R: Reporter> Game<R> {
    pub fn new(config: GameConfig, reporter: R) -> Self {
        let engine: Box<dyn Engine> = match config.seed {
            Some(seed) => Box::new(MinimaxEngine::seeded(config.search_depth, seed)),
            None => Box::new(MinimaxEngine::new(config.search_depth)),
        };
        Self::with_engine(config, engine, reporter)
    }

    pub fn with_engine(config: GameConfig, engine: Box<dyn Engine>, reporter: R) -> Self {
        let mut board = Board::new();
        board.add_observer(Arc::new(TracingObserver));
        Self {
            board,
            phase: GamePhase::Setup,
            red: config.red,
            blue: config.blue,
            engine,
            reporter,
            sources: Vec::new(),
            quit: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn player(&self, color: PieceColor) -> PlayerKind {
        if color == PieceColor::Red {
            self.red
        } else {
            self.blue
        }
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Push an input source; it is read to the end before the sources
    /// pushed earlier resume.
    pub fn push_source(&mut self, source: Box<dyn BufRead>) {
        self.sources.push(source);
    }

    /// Read and execute commands until every source is exhausted or `quit`.
    pub fn run(&mut self) {
        let mut line = String::new();
        while !self.quit {
            let Some(source) = self.sources.last_mut() else {
                break;
            };

            line.clear();
            match source.read_line(&mut line) {
                Ok(0) => {
                    self.sources.pop();
                }
                Ok(_) => self.handle_line(&line),
                Err(err) => {
                    warn!(target: "ataxx::game", error = %err, "input source failed");
                    self.reporter.err_msg(&format!("input error: {err}"));
                    self.sources.pop();
                }
            }
        }
    }

    /// Execute one line, reporting any failure instead of returning it.
    pub fn handle_line(&mut self, line: &str) {
        if let Err(err) = self.execute_line(line) {
            warn!(target: "ataxx::game", command = line.trim(), error = %err, "command rejected");
            self.reporter.err_msg(&err.to_string());
        }
    }

    pub fn execute_line(&mut self, line: &str) -> Result<(), GameError> {
        match Command::parse(line)? {
            Some(command) => self.execute(command),
            None => Ok(()),
        }
    }

    pub fn execute(&mut self, command: Command) -> Result<(), GameError> {
        match command {
            Command::Move(mv) => self.manual_move(mv)?,
            Command::Block(square) => {
                if self.phase != GamePhase::Setup {
                    return Err(BoardError::InvalidState(
                        "blocks may only be placed before the game starts".to_owned(),
                    )
                    .into());
                }
                self.board.set_block(square)?;
            }
            Command::Start => {
                if self.phase != GamePhase::Setup {
                    return Err(BoardError::InvalidState("game already started".to_owned()).into());
                }
                info!(target: "ataxx::game", red = ?self.red, blue = ?self.blue, "game started");
                self.phase = GamePhase::Playing;
                self.check_finished();
            }
            Command::Clear => {
                self.board.clear();
                self.phase = GamePhase::Setup;
                self.engine.new_game();
            }
            Command::Auto(color) => self.set_player(color, PlayerKind::Auto),
            Command::Manual(color) => self.set_player(color, PlayerKind::Manual),
            Command::Seed(seed) => self.engine.set_seed(seed),
            Command::Dump => {
                let dump = self.board.to_string();
                self.reporter.info_msg(&dump);
            }
            Command::Load(path) => {
                let file = File::open(&path).map_err(|source| GameError::Io {
                    path: path.clone(),
                    source,
                })?;
                info!(target: "ataxx::game", path = %path.display(), "loading commands");
                self.push_source(Box::new(BufReader::new(file)));
            }
            Command::Help => self.reporter.info_msg(HELP_TEXT),
            Command::Quit => self.quit = true,
        }

        self.play_auto_moves()
    }

    fn set_player(&mut self, color: PieceColor, kind: PlayerKind) {
        if color == PieceColor::Red {
            self.red = kind;
        } else {
            self.blue = kind;
        }
    }

    fn manual_move(&mut self, mv: Move) -> Result<(), GameError> {
        match self.phase {
            GamePhase::Setup => self.board.make_move(mv)?,
            GamePhase::Playing => {
                let mover = self.board.side_to_move();
                if self.player(mover) == PlayerKind::Auto {
                    return Err(BoardError::InvalidState(format!(
                        "{mover} is played automatically"
                    ))
                    .into());
                }
                self.board.make_move(mv)?;
                if mv.is_pass() {
                    self.reporter.move_msg(&format!("{mover} passes."));
                }
                self.check_finished();
            }
            GamePhase::Finished => return Err(BoardError::GameOver.into()),
        }
        Ok(())
    }

    /// Let the engine move for every automatic side to move until a manual
    /// player is due or the game ends.
    pub fn play_auto_moves(&mut self) -> Result<(), GameError> {
        while self.phase == GamePhase::Playing
            && self.player(self.board.side_to_move()) == PlayerKind::Auto
        {
            self.play_auto_move()?;
        }
        Ok(())
    }

    fn play_auto_move(&mut self) -> Result<(), GameError> {
        let mover = self.board.side_to_move();
        let out = self.engine.choose_move(&self.board, mover)?;
        for line in &out.info_lines {
            debug!(target: "ataxx::engine", engine = self.engine.name(), "{line}");
        }

        self.board.make_move(out.best_move)?;
        let text = if out.best_move.is_pass() {
            format!("{mover} passes.")
        } else {
            format!("{mover} moves {}.", out.best_move)
        };
        self.reporter.move_msg(&text);
        self.check_finished();
        Ok(())
    }

    fn check_finished(&mut self) {
        if self.phase != GamePhase::Playing || !self.board.game_over() {
            return;
        }

        self.phase = GamePhase::Finished;
        let text = match self.board.winner() {
            Some(color) => format!("{color} wins."),
            None => "Draw.".to_owned(),
        };
        info!(
            target: "ataxx::game",
            red = self.board.num_pieces(PieceColor::Red),
            blue = self.board.num_pieces(PieceColor::Blue),
            moves = self.board.move_count(),
            "{text}"
        );
        self.reporter.outcome_msg(&text);
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{Game, GameConfig, GamePhase, PlayerKind};
    use crate::game::reporter::{RecordingReporter, ReportKind};
    use crate::game_state::ataxx_types::PieceColor;
    use crate::moves::ataxx_move::Move;

    fn game(config: GameConfig) -> Game<RecordingReporter> {
        Game::new(
            GameConfig {
                seed: Some(17),
                ..config
            },
            RecordingReporter::default(),
        )
    }

    fn run_script(game: &mut Game<RecordingReporter>, script: &str) {
        game.push_source(Box::new(Cursor::new(script.to_owned())));
        game.run();
    }

    #[test]
    fn defaults_are_manual_red_and_auto_blue() {
        let mut game = game(GameConfig::default());
        assert_eq!(game.player(PieceColor::Red), PlayerKind::Manual);
        assert_eq!(game.player(PieceColor::Blue), PlayerKind::Auto);
        assert_eq!(game.phase(), GamePhase::Setup);

        run_script(&mut game, "start\na7-b7\n");
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.board().move_count(), 2);
        assert_eq!(game.board().side_to_move(), PieceColor::Red);

        let moves = game.reporter().of_kind(ReportKind::Move);
        assert_eq!(moves.len(), 1);
        assert!(moves[0].starts_with("Blue moves "), "{}", moves[0]);
        assert!(moves[0].ends_with('.'));
    }

    #[test]
    fn setup_moves_apply_without_engine_replies() {
        let mut game = game(GameConfig::default());
        run_script(&mut game, "a7-b7\na1-a2\nblock c4\n");
        assert_eq!(game.phase(), GamePhase::Setup);
        assert_eq!(game.board().move_count(), 2);
        assert_eq!(game.board().num_blocks(), 2);
        assert!(game.reporter().of_kind(ReportKind::Move).is_empty());
        assert!(game.reporter().of_kind(ReportKind::Error).is_empty());
    }

    #[test]
    fn blocks_are_refused_after_start() {
        let mut game = game(GameConfig::default());
        run_script(&mut game, "start\nblock c3\nstart\n");
        let errors = game.reporter().of_kind(ReportKind::Error);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("before the game starts"));
        assert_eq!(game.board().num_blocks(), 0);
    }

    #[test]
    fn bad_commands_are_reported_and_session_continues() {
        let mut game = game(GameConfig::default());
        run_script(&mut game, "fly away\na1-a2\nblock z9\na7-b7\n");
        assert_eq!(game.reporter().of_kind(ReportKind::Error).len(), 3);
        assert_eq!(game.board().move_count(), 1);
    }

    #[test]
    fn engines_play_a_full_game_and_report_the_result() {
        let mut game = game(GameConfig {
            red: PlayerKind::Auto,
            blue: PlayerKind::Auto,
            ..GameConfig::default()
        });
        run_script(&mut game, "seed 4\nstart\na7-b7\n");

        assert_eq!(game.phase(), GamePhase::Finished);
        assert!(game.board().game_over());
        let outcome = game.reporter().of_kind(ReportKind::Outcome);
        let expected = match game.board().winner() {
            Some(PieceColor::Red) => "Red wins.",
            Some(_) => "Blue wins.",
            None => "Draw.",
        };
        assert_eq!(outcome, vec![expected]);
        assert_eq!(
            game.reporter().of_kind(ReportKind::Move).len() as u32,
            game.board().move_count()
        );
        // The move after the end is refused.
        assert_eq!(game.reporter().of_kind(ReportKind::Error).len(), 1);
    }

    #[test]
    fn clear_returns_to_setup() {
        let mut game = game(GameConfig {
            red: PlayerKind::Auto,
            ..GameConfig::default()
        });
        run_script(&mut game, "start\nclear\nblock b2\n");
        assert_eq!(game.phase(), GamePhase::Setup);
        assert_eq!(game.board().move_count(), 0);
        assert_eq!(game.board().num_blocks(), 4);
    }

    #[test]
    fn walled_start_is_an_immediate_draw() {
        let mut game = game(GameConfig::default());
        run_script(
            &mut game,
            "block b1\nblock c1\nblock a2\nblock b2\nblock c2\nblock a3\nblock b3\nblock c3\nstart\n",
        );
        assert_eq!(game.phase(), GamePhase::Finished);
        assert_eq!(game.reporter().of_kind(ReportKind::Outcome), vec!["Draw."]);
    }

    #[test]
    fn automatic_pass_is_announced() {
        let mut game = game(GameConfig {
            red: PlayerKind::Manual,
            blue: PlayerKind::Manual,
            ..GameConfig::default()
        });
        // Red leaves its a7 corner for the center while Blue jumps out and
        // back, then every corner is walled in. Only Red's d4 piece can move.
        run_script(
            &mut game,
            "a7-b5\na1-a3\nb5-d4\na3-a1\n\
             block b1\nblock c1\nblock a2\nblock b2\nblock c2\nblock a3\nblock b3\nblock c3\n",
        );
        assert!(game.reporter().of_kind(ReportKind::Error).is_empty());
        assert!(game.board().can_move(PieceColor::Red));
        assert!(!game.board().can_move(PieceColor::Blue));

        run_script(&mut game, "auto blue\nstart\nd4-d5\n");
        assert!(game.reporter().of_kind(ReportKind::Error).is_empty());
        assert_eq!(game.reporter().of_kind(ReportKind::Move), vec!["Blue passes."]);
        assert_eq!(game.board().last_move(), Some(Move::Pass));
        assert_eq!(game.board().side_to_move(), PieceColor::Red);
        assert_eq!(game.phase(), GamePhase::Playing);
    }

    #[test]
    fn manual_pass_is_announced() {
        let mut game = game(GameConfig {
            red: PlayerKind::Manual,
            blue: PlayerKind::Manual,
            ..GameConfig::default()
        });
        run_script(
            &mut game,
            "a7-b5\na1-a3\nb5-d4\na3-a1\n\
             block b1\nblock c1\nblock a2\nblock b2\nblock c2\nblock a3\nblock b3\nblock c3\n\
             start\nd4-d5\n-\n",
        );

        assert!(game.reporter().of_kind(ReportKind::Error).is_empty());
        assert_eq!(game.reporter().of_kind(ReportKind::Move), vec!["Blue passes."]);
        assert_eq!(game.board().last_move(), Some(Move::Pass));
        assert_eq!(game.board().side_to_move(), PieceColor::Red);
    }

    #[test]
    fn dump_help_and_quit() {
        let mut game = game(GameConfig::default());
        run_script(&mut game, "dump\nhelp\nquit\nstart\n");
        let info = game.reporter().of_kind(ReportKind::Info);
        assert_eq!(info.len(), 2);
        assert!(info[0].starts_with("===\n r"));
        assert!(info[1].contains("block c3"));
        assert!(game.quit_requested());
        assert_eq!(game.phase(), GamePhase::Setup);
    }

    #[test]
    fn load_reads_a_command_file_before_resuming() {
        let path = std::env::temp_dir().join(format!("ataxx_load_{}.txt", std::process::id()));
        std::fs::write(&path, "# opening\na7-b7\na1-a2\n").expect("temp file should be writable");

        let mut game = game(GameConfig::default());
        run_script(&mut game, &format!("load {}\ndump\n", path.display()));
        std::fs::remove_file(&path).expect("temp file should be removable");

        assert_eq!(game.board().move_count(), 2);
        assert_eq!(game.reporter().of_kind(ReportKind::Info).len(), 1);

        run_script(&mut game, "load /definitely/not/here.txt\n");
        let errors = game.reporter().of_kind(ReportKind::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("cannot read"));
    }
}
