//! Line-oriented input with an explicit end-of-input signal
//!
//! Every prompt in the game is one line of text. End-of-input is not an
//! error and does not unwind: it is a value the caller routes up the call
//! chain, so the auto-save-on-exit path is an ordinary, testable branch.

use std::io::{self, BufRead, Write};

/// What a prompt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// One line of input, trailing newline stripped.
    Line(String),
    /// The input source is exhausted; the session is over.
    Eof,
}

/// Print the prompt marker and read one line.
pub fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<Signal> {
    write!(out, "> ")?;
    out.flush()?;
    read_line(input, out)
}

/// Read one line without prompting.
pub fn read_line<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<Signal> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        // Keep the next output off the prompt line.
        writeln!(out)?;
        return Ok(Signal::Eof);
    }

    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(Signal::Line(line))
}
