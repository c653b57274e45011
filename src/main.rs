use std::{
    env,
    io::{self, Write},
    process::ExitCode,
};
use textproc::{
    cli::{
        self, AppError, Outcome,
        args::{self, Command},
    },
    config::Settings,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            if matches!(err, AppError::Usage(_)) {
                eprintln!("{}", args::USAGE);
            }
            ExitCode::from(err.exit_code())
        }
    }
}

fn try_main() -> Result<(), AppError> {
    let run_args = match args::parse(env::args().skip(1))? {
        Command::Run(run_args) => run_args,
        info => {
            if let Some(text) = info.info_text() {
                println!("{text}");
            }
            return Ok(());
        }
    };

    let settings = Settings::load()?;
    init_tracing(&settings.log);
    debug!(?settings, "loaded settings");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut out = stdout.lock();
    match cli::run(run_args, &settings, &mut input, &mut out)? {
        Outcome::Completed { words, output } => {
            debug!(words, output = %output.display(), "run completed");
        }
        Outcome::Aborted => debug!("run aborted by user"),
    }
    out.flush()?;
    Ok(())
}

fn init_tracing(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
