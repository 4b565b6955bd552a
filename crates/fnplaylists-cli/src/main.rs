use clap::Parser;
use std::process::ExitCode;
use tracing::{Level, debug, error};

use fnplaylists_cli::RunArgs;
use fnplaylists_core::RunError;

#[derive(Parser)]
#[command(
    name = "fnplaylists",
    about = "Resolve Fortnite playlist codenames to their display names",
    version,
    author,
    long_about = "Looks up playlist codenames from a search list in the game's packaged data and prints the localized display name of each matching playlist."
)]
struct Cli {
    /// Set the logging level
    #[arg(short, long, value_enum, default_value = "info")]
    log_level: LogLevel,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Report lines own stdout
    tracing_subscriber::fmt()
        .with_max_level(Level::from(cli.log_level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match fnplaylists_cli::run(&cli.run, std::io::stdout().lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            // Abort messages are part of the report
            if let Some(abort) = e.downcast_ref::<RunError>() {
                println!("{abort}");
            } else {
                error!("{}", e);
            }
            debug!("{:?}", e);
            ExitCode::FAILURE
        }
    }
}
