//! Lectern CLI entry point.

use clap::Parser;
use lectern::cli::{self, Cli, Commands, EXIT_ERROR};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "LECTERN_LOG";

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info,lectern=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn,lectern=info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config.as_deref();
    let result = match &cli.command {
        Commands::Process(args) => cli::run_process(args, config),
        Commands::Content(args) => cli::run_content(args, config),
        Commands::Explain(args) => cli::run_explain(args),
        Commands::Summarize(args) => cli::run_summarize(args),
        Commands::Audio(args) => cli::run_audio(args, config),
        Commands::Handle => cli::run_handle(config),
        Commands::Init(args) => cli::run_init(args),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
