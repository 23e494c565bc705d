//! Interactive y/N confirmation.
use std::io::{BufRead, Write};

pub const PROMPT: &str = "Do you want to proceed? (y/N): ";

/// True only for `y`/`yes` (case-insensitive, surrounding whitespace ignored). EOF and
/// read errors count as a refusal.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Write the prompt to `out`, then read one line from `input`.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> bool {
    let _ = write!(out, "\n{PROMPT}");
    let _ = out.flush();
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => false,
        Ok(_) => is_affirmative(&line),
    }
}
