//! Status lines for the poster CLI.
//!
//! Lines look like Cargo's: a right-aligned coloured verb, then the message.
//! They go to stderr so `--json` output on stdout stays clean.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const VERB_WIDTH: usize = 12;

/// Colour of the verb column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Done,
    Detail,
    Warn,
}

impl Tone {
    fn ansi(self) -> &'static str {
        match self {
            Tone::Done => "\x1b[32m",
            Tone::Detail => "\x1b[36m",
            Tone::Warn => "\x1b[33m",
        }
    }
}

/// Writes status lines to stderr, coloured when stderr is a terminal.
pub struct Printer {
    color: bool,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// Progress or result of a command, e.g. `     Updated .poster`.
    pub fn status(&self, verb: &str, message: &str) {
        self.emit(Tone::Done, verb, message);
    }

    /// A file was written.
    pub fn success(&self, verb: &str, message: &str) {
        self.emit(Tone::Done, verb, message);
    }

    /// One field of a summary, e.g. `       Title PARIS`.
    pub fn info(&self, verb: &str, message: &str) {
        self.emit(Tone::Detail, verb, message);
    }

    /// Fallbacks and other non-fatal surprises.
    pub fn warning(&self, verb: &str, message: &str) {
        self.emit(Tone::Warn, verb, message);
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn line(&self, tone: Tone, verb: &str, message: &str) -> String {
        if self.color {
            format!("{BOLD}{}{verb:>VERB_WIDTH$}{RESET} {message}", tone.ansi())
        } else {
            format!("{verb:>VERB_WIDTH$} {message}")
        }
    }

    fn emit(&self, tone: Tone, verb: &str, message: &str) {
        let _ = writeln!(io::stderr().lock(), "{}", self.line(tone, verb, message));
    }
}

/// `plural(1, "shape", "shapes")` is "1 shape".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    let word = if n == 1 { singular } else { pluralized };
    format!("{} {}", n, word)
}

/// `path` relative to the working directory when it lies inside it.
pub fn display_path(path: &Path) -> String {
    let relative = std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf));
    match relative {
        Some(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Some(rel) => rel.display().to_string(),
        None => path.display().to_string(),
    }
}
