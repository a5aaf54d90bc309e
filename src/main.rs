use clap::Parser;
use std::io;
use std::process::ExitCode;
use tilde::{finish, logging, run_terminal, Config, ShutdownSignals, TermError, Tty};

fn main() -> ExitCode {
    let config = Config::parse();
    if let Some(path) = &config.log_file {
        if let Err(e) = logging::init(path) {
            eprintln!("tilde: cannot open log file {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let result = ShutdownSignals::register()
        .map_err(TermError::Signals)
        .and_then(|signals| run_terminal(Tty::stdio(), config.probe, &signals));
    ExitCode::from(finish(result, &mut io::stderr()))
}
