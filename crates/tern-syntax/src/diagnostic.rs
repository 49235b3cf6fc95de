//! Diagnostic rendering for the tern compiler.
//!
//! Source errors print the message followed by the whole source line that
//! contains the error, underlined:
//!
//! ```text
//! error: expected param name
//!  | main( { }
//!  |       ^
//! ```
//!
//! With colors enabled the line itself is underlined with ANSI codes and the
//! caret row is omitted. Internal errors print the file and line of the
//! failed check instead of source text.

use crate::error::SyntaxError;
use crate::span::Span;
use std::io::{self, IsTerminal, Write};
use std::process;

const RED: &str = "\x1b[31m";
const BLUE: &str = "\x1b[34m";
const WHITE_UNDERLINE: &str = "\x1b[4;37m";
const RESET: &str = "\x1b[0m";

/// Formats and prints diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Emitter {
    use_colors: bool,
}

impl Emitter {
    /// Creates a new diagnostic emitter.
    #[must_use]
    pub const fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Creates an emitter that colors output only when stderr is a terminal.
    #[must_use]
    pub fn for_stderr() -> Self {
        Self::new(io::stderr().is_terminal())
    }

    /// Returns `true` if ANSI colors are used.
    #[must_use]
    pub const fn use_colors(&self) -> bool {
        self.use_colors
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Renders an error against the source it came from.
    #[must_use]
    pub fn render(&self, error: &SyntaxError, source: &str) -> String {
        match error {
            SyntaxError::Source { message, span } => self.render_source(message, *span, source),
            SyntaxError::Internal {
                message,
                file,
                line,
            } => format!(
                "{}{file}:{line}: {message}\n",
                self.paint(BLUE, "internal error: ")
            ),
        }
    }

    fn render_source(&self, message: &str, span: Span, source: &str) -> String {
        let mut out = format!("{}: {message}\n", self.paint(RED, "error"));

        let (line_start, line) = containing_line(source, span.start);
        if self.use_colors {
            out.push_str(&format!(" | {WHITE_UNDERLINE}{line}{RESET}\n"));
        } else {
            let indent = span.start.saturating_sub(line_start).min(line.len());
            let width = span.len.min(line.len() - indent).max(1);
            out.push_str(&format!(" | {line}\n"));
            out.push_str(&format!(" | {}{}\n", " ".repeat(indent), "^".repeat(width)));
        }
        out
    }

    /// Prints an error to stderr and keeps going.
    pub fn emit_error(&self, error: &SyntaxError, source: &str) {
        // Nothing sensible to do if stderr itself is gone.
        let _ = io::stderr().write_all(self.render(error, source).as_bytes());
    }

    /// Prints an error to stderr and terminates with a failure status.
    pub fn exit_with(&self, error: &SyntaxError, source: &str) -> ! {
        self.emit_error(error, source);
        process::exit(1)
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::for_stderr()
    }
}

/// Finds the line containing byte `offset`.
///
/// Scans back to the previous newline (or the buffer start) and forward to
/// the next one. Offsets past the end select the last line. Returns the
/// line's start offset and its text without the newline.
fn containing_line(source: &str, offset: usize) -> (usize, &str) {
    let bytes = source.as_bytes();
    let offset = offset.min(bytes.len());

    let start = bytes[..offset]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |newline| newline + 1);
    let end = bytes[start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |len| start + len);

    (start, &source[start..end])
}

/// Renders `error`, prints it to stderr and exits with a failure status.
///
/// This is the top-level driver behaviour: the first error ends the process.
pub fn exit_with(error: &SyntaxError, source: &str) -> ! {
    Emitter::for_stderr().exit_with(error, source)
}
