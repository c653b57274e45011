use super::style::Palette;
use crate::output::WriteMode;
use std::{
    io::{self, BufRead, Write},
    path::Path,
};

/// What to do with an output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteDecision {
    Append,
    Overwrite,
    /// The answer was not understood; nothing is written.
    Aborted,
}

impl WriteDecision {
    pub fn mode(self) -> Option<WriteMode> {
        match self {
            WriteDecision::Append => Some(WriteMode::Append),
            WriteDecision::Overwrite => Some(WriteMode::Overwrite),
            WriteDecision::Aborted => None,
        }
    }
}

/// `a`, `A` or nothing appends; `o`, `O` or `0` overwrites.
pub fn parse_write_answer(answer: &str) -> WriteDecision {
    match answer {
        "" | "a" | "A" => WriteDecision::Append,
        "o" | "O" | "0" => WriteDecision::Overwrite,
        _ => WriteDecision::Aborted,
    }
}

/// Decide how to open `path`, asking only when it already exists.
pub fn resolve_write_mode<R: BufRead, W: Write>(
    path: &Path,
    input: &mut R,
    out: &mut W,
    palette: Palette,
) -> io::Result<WriteDecision> {
    if !path.exists() {
        return Ok(WriteDecision::Overwrite);
    }
    write!(
        out,
        "{}File '{}' already exists.\n({})ppend (default) to it or ({})verwrite it? ",
        palette.warn("\nWarning: "),
        path.display(),
        palette.bold("A"),
        palette.bold("O"),
    )?;
    out.flush()?;

    let decision = parse_write_answer(&read_answer(input)?);
    match decision {
        WriteDecision::Append => writeln!(out, "{}", palette.warn("Output file will be appended."))?,
        WriteDecision::Overwrite => writeln!(out, "{}", palette.fail("File will be overwritten!"))?,
        WriteDecision::Aborted => writeln!(out, "Incorrect input, try again.")?,
    }
    Ok(decision)
}

/// Answer to "Start processing?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Proceed,
    Declined,
    Invalid,
}

pub fn parse_confirmation(answer: &str) -> Confirmation {
    match answer {
        "y" | "Y" => Confirmation::Proceed,
        "n" | "N" => Confirmation::Declined,
        _ => Confirmation::Invalid,
    }
}

pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    palette: Palette,
) -> io::Result<Confirmation> {
    write!(out, "{}", palette.warn("Start processing? (y/n): "))?;
    out.flush()?;
    let confirmation = parse_confirmation(&read_answer(input)?);
    match confirmation {
        Confirmation::Proceed => {}
        Confirmation::Declined => writeln!(out, "{}\n", palette.fail("Operation aborted."))?,
        Confirmation::Invalid => writeln!(out, "Incorrect input, try again.\n")?,
    }
    Ok(confirmation)
}

/// One line without its line ending. End of input reads as an empty answer.
fn read_answer<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
