use clap::{Parser, Subcommand};
use flowtag_core::cli::{self, CheckArgs, RunArgs};
use flowtag_core::config::LoggingConfig;
use flowtag_core::logging::init_logging;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "flowtag",
    version,
    about = "flowtag: tag flow log records by destination port and protocol"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tag a flow log and write the count report (default)
    Run(RunArgs),

    /// Validate the lookup table and flow log without writing a report
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Run(args)) => run(args),
        Some(Command::Check(args)) => check(args),
        None => run(RunArgs::default()),
    }
}

fn run(args: RunArgs) -> ExitCode {
    let cfg = match args.resolve_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("config error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let _guard = match init_logging(&cfg.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match cli::run(&cfg) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn check(args: CheckArgs) -> ExitCode {
    // The report goes to stdout; only failures are logged unless RUST_LOG says otherwise.
    let logging = LoggingConfig {
        level: "error".to_string(),
        ..LoggingConfig::default()
    };
    if let Err(e) = init_logging(&logging) {
        eprintln!("failed to initialize logging: {e:#}");
        return ExitCode::FAILURE;
    }

    match cli::check(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("check error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
