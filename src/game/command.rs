//! Text commands accepted by the game controller.
//!
//! One line of input parses into at most one [`Command`]. Blank lines and
//! `#` comments parse to `None`.

use std::path::PathBuf;

use thiserror::Error;

use crate::game_state::ataxx_types::{PieceColor, Square};
use crate::game_state::board_errors::BoardError;
use crate::moves::ataxx_move::Move;
use crate::utils::algebraic::algebraic_to_square;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A move or `-` for a pass.
    Move(Move),
    Block(Square),
    Start,
    Clear,
    Auto(PieceColor),
    Manual(PieceColor),
    Seed(u64),
    Dump,
    Load(PathBuf),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("{command} expects {expected}")]
    MissingOperand {
        command: &'static str,
        expected: &'static str,
    },

    #[error("{command} takes no operand, found \"{found}\"")]
    UnexpectedOperand { command: &'static str, found: String },

    #[error("not a player: {0}")]
    BadPlayer(String),

    #[error("not a seed: {0}")]
    BadSeed(String),

    #[error(transparent)]
    Notation(#[from] BoardError),
}

pub const HELP_TEXT: &str = "\
Commands:
  a7-b7          play a move (from-to)
  -              pass
  block c3       block c3 and its reflections (setup only)
  start          begin play from the current position
  clear          reset to the starting position
  auto red|blue  let the engine play a side
  manual red|blue
                 take moves for a side from input
  seed N         reseed the engines
  dump           print the board
  load FILE      read commands from FILE
  help           print this text
  quit           end the session";

impl Command {
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "block" => Command::Block(algebraic_to_square(operand("block", "a square", rest)?)?),
            "start" => no_operand("start", rest, Command::Start)?,
            "clear" => no_operand("clear", rest, Command::Clear)?,
            "auto" => Command::Auto(player(operand("auto", "red or blue", rest)?)?),
            "manual" => Command::Manual(player(operand("manual", "red or blue", rest)?)?),
            "seed" => {
                let text = operand("seed", "a number", rest)?;
                Command::Seed(
                    text.parse()
                        .map_err(|_| CommandError::BadSeed(text.to_owned()))?,
                )
            }
            "dump" => no_operand("dump", rest, Command::Dump)?,
            "load" => Command::Load(PathBuf::from(operand("load", "a file name", rest)?)),
            "help" => no_operand("help", rest, Command::Help)?,
            "quit" => no_operand("quit", rest, Command::Quit)?,
            _ if looks_like_move(line) => Command::Move(line.parse()?),
            _ => return Err(CommandError::Unknown(line.to_owned())),
        };

        Ok(Some(command))
    }
}

fn operand<'a>(
    command: &'static str,
    expected: &'static str,
    rest: &'a str,
) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingOperand { command, expected })
    } else {
        Ok(rest)
    }
}

fn no_operand(command: &'static str, rest: &str, parsed: Command) -> Result<Command, CommandError> {
    if rest.is_empty() {
        Ok(parsed)
    } else {
        Err(CommandError::UnexpectedOperand {
            command,
            found: rest.to_owned(),
        })
    }
}

fn player(text: &str) -> Result<PieceColor, CommandError> {
    PieceColor::parse_player(text).ok_or_else(|| CommandError::BadPlayer(text.to_owned()))
}

#[inline]
fn looks_like_move(text: &str) -> bool {
    text == "-" || text.contains('-')
}
