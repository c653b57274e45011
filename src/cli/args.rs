use crate::format::OutputFormat;
use std::path::PathBuf;
use thiserror::Error;

pub const VERSION: &str = concat!(
    "Text Processor. Ver ",
    env!("CARGO_PKG_VERSION"),
    " (c) 2017-2021 Denis Rasulev. All Rights Reserved."
);

pub const USAGE: &str = "usage: tp source [-o output] [-f format]";

pub const SHORT_USAGE: &str = "\
usage: tp source [-o output] [-f format]
 source   required, file name or URL
 output   optional, file name
 format   optional, csv or txt

help:     tp -h, --help";

pub const HELP: &str = "\
usage: tp source [-o output] [-f format]

Cleans SOURCE and saves the list of unique words it contains.

Removed from SOURCE:
- HTML tags and entities
- punctuation
- digits
- single letters
- extra spaces

Remaining words are lower-cased, deduplicated and sorted.

If no output file name is given, the result is saved next to SOURCE with
'_cleaned' appended: 'tp text.txt' saves to 'text_cleaned.csv'. For a URL
the name is derived from the address.

positional arguments:
  SOURCE                 file name, or URL starting with http(s)

options:
  -o, --ofile OUTPUT     output file name
  -f, --format FORMAT    csv (default, comma-separated) or txt (one per line)
  -y, --yes              do not ask before processing
      --ascii            treat only ASCII letters and digits as word characters
  -h, --help             show this help message and exit
  -v, --version          show version and exit

Settings can also come from ./textproc.toml and TEXTPROC_* variables.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("option `{0}` needs a value")]
    MissingValue(String),
    #[error("unknown option `{0}`")]
    UnknownOption(String),
    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),
    #[error("the SOURCE argument is required")]
    MissingSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunArgs {
    pub source: String,
    pub output: Option<PathBuf>,
    /// `None` when `-f` was not given.
    pub format: Option<OutputFormat>,
    pub assume_yes: bool,
    pub ascii: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ShortUsage,
    Help,
    Version,
    Run(RunArgs),
}

impl Command {
    /// Text printed by the informational commands, `None` for a run.
    pub fn info_text(&self) -> Option<String> {
        match self {
            Command::ShortUsage => Some(format!("{VERSION}\n\n{SHORT_USAGE}")),
            Command::Help => Some(format!("{HELP}\n\n{VERSION}")),
            Command::Version => Some(VERSION.to_string()),
            Command::Run(_) => None,
        }
    }
}

/// Parse arguments, program name excluded.
pub fn parse<I, S>(args: I) -> Result<Command, ArgsError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::into).peekable();
    if args.peek().is_none() {
        return Ok(Command::ShortUsage);
    }

    let mut source = None;
    let mut output = None;
    let mut format = None;
    let mut assume_yes = false;
    let mut ascii = false;

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };
        match flag.as_str() {
            "?" | "/?" | "-h" | "--help" => return Ok(Command::Help),
            "-v" | "--version" => return Ok(Command::Version),
            "-y" | "--yes" => assume_yes = true,
            "--ascii" => ascii = true,
            "-o" | "--ofile" => {
                let value = inline
                    .or_else(|| args.next())
                    .ok_or_else(|| ArgsError::MissingValue(flag.clone()))?;
                output = Some(PathBuf::from(value));
            }
            "-f" | "--format" => {
                let value = inline
                    .or_else(|| args.next())
                    .ok_or_else(|| ArgsError::MissingValue(flag.clone()))?;
                format = Some(OutputFormat::from_selector(&value));
            }
            other if other.starts_with('-') && other.len() > 1 => {
                return Err(ArgsError::UnknownOption(other.to_string()));
            }
            _ if source.is_none() => source = Some(arg),
            _ => return Err(ArgsError::UnexpectedArgument(arg)),
        }
    }

    let source = source.ok_or(ArgsError::MissingSource)?;
    Ok(Command::Run(RunArgs {
        source,
        output,
        format,
        assume_yes,
        ascii,
    }))
}
