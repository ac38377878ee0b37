//! Runs an input transcript of setup lines and messages through a machine.

use tracing::{debug, trace};

use crate::config::Setup;
use crate::error::EnigmaError;
use crate::machine::Machine;

/// Symbols per output group.
const GROUP_SIZE: usize = 5;

/// Processes `input` line by line and returns the converted transcript.
///
/// Lines starting with `*` reconfigure `machine`. Every other line is a
/// message: whitespace is dropped, the rest is converted and written in
/// groups of five. Rotor positions carry over from one message line to the
/// next until the next setup line.
///
/// A blank line between two messages yields a blank output line. Blank lines
/// before a setup line or at the end of the input are dropped, and each
/// session after the first is preceded by exactly one blank output line.
///
/// # Errors
/// - [`EnigmaError::MissingSetup`] if a message comes before any setup line,
///   or if the input has no setup line at all.
/// - Any setup or conversion error, which stops processing immediately.
pub fn process(machine: &mut Machine, input: &str) -> Result<String, EnigmaError> {
    let mut out = String::with_capacity(input.len() + input.len() / GROUP_SIZE);
    let mut sessions = 0usize;
    let mut pending_blanks = 0usize;

    for (number, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with('*') {
            Setup::parse(trimmed, machine.num_rotors())?.apply(machine)?;
            if sessions > 0 {
                out.push('\n');
            }
            sessions += 1;
            pending_blanks = 0;
            debug!(line = number + 1, session = sessions, "machine reconfigured");
            continue;
        }
        if trimmed.is_empty() {
            pending_blanks += 1;
            continue;
        }
        if sessions == 0 {
            return Err(EnigmaError::MissingSetup);
        }

        for _ in 0..pending_blanks {
            out.push('\n');
        }
        pending_blanks = 0;

        let message: String = line.chars().filter(|c| !c.is_whitespace()).collect();
        let converted = machine.convert(&message)?;
        trace!(line = number + 1, symbols = converted.len(), "converted message line");
        out.push_str(&group_in_fives(&converted));
        out.push('\n');
    }

    if sessions == 0 {
        return Err(EnigmaError::MissingSetup);
    }
    Ok(out)
}

/// Splits `msg` into space-separated groups of five symbols. The last group
/// may be shorter.
pub fn group_in_fives(msg: &str) -> String {
    let mut grouped = String::with_capacity(msg.len() + msg.len() / GROUP_SIZE);
    for (i, c) in msg.chars().enumerate() {
        if i != 0 && i.is_multiple_of(GROUP_SIZE) {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    grouped
}
