//! The `tp` command: argument parsing, console dialogue and the run itself.
//!
//! [`run`] takes its console as generic reader/writer pairs so that whole
//! sessions, prompts included, can be driven from tests.

pub mod args;
pub mod prompt;
pub mod style;

use crate::{
    cleaner::Cleaner,
    config::Settings,
    context::WordClass,
    output::{OutputError, write_output},
    profile::preset,
    source::{Source, SourceError, http, read_file},
};
use args::{ArgsError, RunArgs};
use prompt::{Confirmation, WriteDecision, confirm, resolve_write_mode};
use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    time::Duration,
};
use style::Palette;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Usage(#[from] ArgsError),
    #[error("invalid configuration: {0}")]
    Config(#[from] figment::Error),
    #[error(transparent)]
    InputUnavailable(SourceError),
    #[error(transparent)]
    UnsupportedContentType(SourceError),
    #[error(transparent)]
    OutputUnwritable(#[from] OutputError),
    #[error("console I/O failed: {0}")]
    Console(#[from] io::Error),
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::UnsupportedContentType { .. } => AppError::UnsupportedContentType(err),
            _ => AppError::InputUnavailable(err),
        }
    }
}

impl AppError {
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Usage(_) => 2,
            _ => 1,
        }
    }
}

/// How a run ended, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed { words: usize, output: PathBuf },
    /// The user declined to go on.
    Aborted,
}

/// Read, clean and write one source.
///
/// Command-line flags take precedence over `settings`. Unless `assume_yes`
/// is set the user confirms before anything is processed and, for an
/// existing destination, picks append or overwrite. With `assume_yes` an
/// existing destination is appended to.
pub fn run<R: BufRead, W: Write>(
    args: RunArgs,
    settings: &Settings,
    input: &mut R,
    out: &mut W,
) -> Result<Outcome, AppError> {
    let palette = Palette::from_settings(settings);
    let format = args.format.unwrap_or(settings.format);
    let word_class = if args.ascii {
        WordClass::Ascii
    } else {
        settings.word_class
    };

    let source = Source::parse(&args.source);
    let document = match &source {
        Source::File(path) => read_file(path)?,
        Source::Url(url) => http::fetch(url, Duration::from_secs(settings.timeout_secs))?,
    };
    let output = args
        .output
        .unwrap_or_else(|| source.default_output(format));

    writeln!(out, "{}", palette.warn("\nHere's what will be processed:"))?;
    writeln!(out, "Input  : {}", source.display())?;
    writeln!(out, "Output : {}", output.display())?;
    writeln!(out, "Size   : {}", document.stats.human_size())?;
    writeln!(out, "Lines  : {}", document.stats.lines)?;
    writeln!(out, "Words  : {}", document.stats.words)?;

    if !args.assume_yes && confirm(input, out, palette)? != Confirmation::Proceed {
        return Ok(Outcome::Aborted);
    }

    let decision = if args.assume_yes {
        if output.exists() {
            WriteDecision::Append
        } else {
            WriteDecision::Overwrite
        }
    } else {
        resolve_write_mode(&output, input, out, palette)?
    };
    let Some(mode) = decision.mode() else {
        return Ok(Outcome::Aborted);
    };

    let cleaner = Cleaner::builder()
        .word_class(word_class)
        .single_char_gap(settings.single_char_gap)
        .build();
    let tokens = if document.markup {
        cleaner.clean_with_profile(&preset::web_page(), &document.text)
    } else {
        cleaner.clean(&document.text)
    };

    write_output(&output, &tokens.render(format), mode, format)?;
    info!(
        source = %source.display(),
        output = %output.display(),
        %format,
        words = tokens.len(),
        "processing completed"
    );

    writeln!(out, "{}", palette.ok("\nProcessing completed."))?;
    writeln!(out, "Words written: {}\n", tokens.len())?;
    Ok(Outcome::Completed {
        words: tokens.len(),
        output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::OutputFormat;
    use std::{fs, io::Cursor, path::Path};

    fn plain_settings() -> Settings {
        Settings {
            color: false,
            ..Settings::default()
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("textproc-cli-{}-{name}", std::process::id()))
    }

    fn run_args(source: &Path, output: &Path) -> RunArgs {
        RunArgs {
            source: source.display().to_string(),
            output: Some(output.to_path_buf()),
            format: None,
            assume_yes: false,
            ascii: false,
        }
    }

    fn session(args: RunArgs, answers: &str) -> (Result<Outcome, AppError>, String) {
        let mut input = Cursor::new(answers.to_string());
        let mut out = Vec::new();
        let result = run(args, &plain_settings(), &mut input, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn fresh_output_is_created() {
        let src = temp_path("fresh-src.txt");
        let dst = temp_path("fresh-dst.csv");
        fs::write(&src, "Hello, World! 123 a b test-case.").unwrap();
        let _ = fs::remove_file(&dst);

        let (result, shown) = session(run_args(&src, &dst), "y\n");
        assert_eq!(
            result.unwrap(),
            Outcome::Completed {
                words: 4,
                output: dst.clone()
            }
        );
        assert_eq!(fs::read_to_string(&dst).unwrap(), "case, hello, test, world");
        assert!(shown.contains("Here's what will be processed:"));
        assert!(shown.contains("Words  : 6"));
        assert!(shown.contains("Processing completed."));

        fs::remove_file(&src).unwrap();
        fs::remove_file(&dst).unwrap();
    }

    #[test]
    fn empty_answer_appends_with_one_separator() {
        let src = temp_path("append-src.txt");
        let dst = temp_path("append-dst.csv");
        fs::write(&src, "Hello, World! 123 a b test-case.").unwrap();
        fs::write(&dst, "alpha, beta").unwrap();

        let (result, _) = session(run_args(&src, &dst), "y\n\n");
        assert!(matches!(result.unwrap(), Outcome::Completed { words: 4, .. }));
        assert_eq!(
            fs::read_to_string(&dst).unwrap(),
            "alpha, beta, case, hello, test, world"
        );

        fs::remove_file(&src).unwrap();
        fs::remove_file(&dst).unwrap();
    }

    #[test]
    fn declined_confirmation_writes_nothing() {
        let src = temp_path("declined-src.txt");
        let dst = temp_path("declined-dst.csv");
        fs::write(&src, "some words here").unwrap();
        let _ = fs::remove_file(&dst);

        let (result, shown) = session(run_args(&src, &dst), "n\n");
        assert_eq!(result.unwrap(), Outcome::Aborted);
        assert!(shown.contains("Operation aborted."));
        assert!(!dst.exists());

        let (result, shown) = session(run_args(&src, &dst), "later\n");
        assert_eq!(result.unwrap(), Outcome::Aborted);
        assert!(shown.contains("Incorrect input"));
        assert!(!dst.exists());

        fs::remove_file(&src).unwrap();
    }

    #[test]
    fn unclear_write_answer_keeps_existing_file() {
        let src = temp_path("unclear-src.txt");
        let dst = temp_path("unclear-dst.csv");
        fs::write(&src, "some words here").unwrap();
        fs::write(&dst, "kept").unwrap();

        let (result, _) = session(run_args(&src, &dst), "y\nx\n");
        assert_eq!(result.unwrap(), Outcome::Aborted);
        assert_eq!(fs::read_to_string(&dst).unwrap(), "kept");

        fs::remove_file(&src).unwrap();
        fs::remove_file(&dst).unwrap();
    }

    #[test]
    fn assume_yes_skips_prompts() {
        let src = temp_path("yes-src.txt");
        let dst = temp_path("yes-dst.txt");
        fs::write(&src, "Zeta alpha ALPHA").unwrap();
        fs::write(&dst, "first\n").unwrap();

        let args = RunArgs {
            format: Some(OutputFormat::Txt),
            assume_yes: true,
            ..run_args(&src, &dst)
        };
        let (result, shown) = session(args, "");
        assert!(matches!(result.unwrap(), Outcome::Completed { words: 2, .. }));
        assert!(!shown.contains("Start processing?"));
        assert_eq!(fs::read_to_string(&dst).unwrap(), "first\nalpha\nzeta");

        fs::remove_file(&src).unwrap();
        fs::remove_file(&dst).unwrap();
    }

    #[test]
    fn ascii_flag_changes_word_class() {
        let src = temp_path("ascii-src.txt");
        let dst = temp_path("ascii-dst.csv");
        fs::write(&src, "Café crème").unwrap();
        let _ = fs::remove_file(&dst);

        let args = RunArgs {
            assume_yes: true,
            ascii: true,
            ..run_args(&src, &dst)
        };
        let (result, _) = session(args, "");
        result.unwrap();
        assert_eq!(fs::read_to_string(&dst).unwrap(), "caf, cr, me");

        fs::remove_file(&src).unwrap();
        fs::remove_file(&dst).unwrap();
    }

    #[test]
    fn missing_source_is_input_error() {
        let args = run_args(Path::new("no/such/source.txt"), &temp_path("never.csv"));
        let (result, shown) = session(args, "y\n");
        let err = result.unwrap_err();
        assert!(matches!(err, AppError::InputUnavailable(_)));
        assert_eq!(err.exit_code(), 1);
        assert!(shown.is_empty());
    }

    #[test]
    fn exit_codes() {
        assert_eq!(AppError::Usage(ArgsError::MissingSource).exit_code(), 2);
        let unsupported = AppError::from(SourceError::UnsupportedContentType {
            content_type: "image/png".into(),
        });
        assert!(matches!(unsupported, AppError::UnsupportedContentType(_)));
        assert_eq!(unsupported.exit_code(), 1);
    }
}
