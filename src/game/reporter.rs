//! Output channel of the game controller.
//!
//! Moves, errors, outcomes and informational text each have their own
//! method so front ends can style or capture them separately.

use std::io::Write;

pub trait Reporter {
    /// An automated move or any pass during play, e.g. "Blue moves a1-b2.".
    fn move_msg(&mut self, text: &str);

    /// A rejected command. The session continues.
    fn err_msg(&mut self, text: &str);

    /// The result line of a finished game.
    fn outcome_msg(&mut self, text: &str);

    /// Board dumps, help text and other plain output.
    fn info_msg(&mut self, text: &str);
}

/// Writes moves, outcomes and info to standard output and errors to
/// standard error.
#[derive(Debug, Default)]
pub struct StdoutReporter;

impl StdoutReporter {
    fn emit(text: &str) {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        // Closed stdout ends the session through the input side; ignore here.
        let _ = writeln!(lock, "{text}");
        let _ = lock.flush();
    }
}

impl Reporter for StdoutReporter {
    fn move_msg(&mut self, text: &str) {
        Self::emit(text);
    }

    fn err_msg(&mut self, text: &str) {
        eprintln!("error: {text}");
    }

    fn outcome_msg(&mut self, text: &str) {
        Self::emit(text);
    }

    fn info_msg(&mut self, text: &str) {
        Self::emit(text);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Move,
    Error,
    Outcome,
    Info,
}

/// Keeps every message in order, for tests and embedding.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub messages: Vec<(ReportKind, String)>,
}

impl RecordingReporter {
    pub fn of_kind(&self, kind: ReportKind) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, text)| text.as_str())
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn move_msg(&mut self, text: &str) {
        self.messages.push((ReportKind::Move, text.to_owned()));
    }

    fn err_msg(&mut self, text: &str) {
        self.messages.push((ReportKind::Error, text.to_owned()));
    }

    fn outcome_msg(&mut self, text: &str) {
        self.messages.push((ReportKind::Outcome, text.to_owned()));
    }

    fn info_msg(&mut self, text: &str) {
        self.messages.push((ReportKind::Info, text.to_owned()));
    }
}
