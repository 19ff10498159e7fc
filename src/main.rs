use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use online_store::{
    cli::{
        args::Args,
        console::{LineConsole, TerminalConsole},
        runner::{run, EXIT_USAGE},
    },
    utils::Config,
};

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match Config::from_env() {
        Ok(config) => config.with_args(&args),
        Err(e) => {
            eprintln!("{} {}", style("Configuration error:").red().bold(), e);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    tracing::info!(
        "Online store starting with catalog {}, {} listing order",
        config.catalog_path.display(),
        config.listing_order
    );

    let interactive = !args.plain && io::stdin().is_terminal() && io::stdout().is_terminal();
    let code = if interactive {
        run(&args, &config, TerminalConsole::new(), io::stdout(), io::stderr())
    } else {
        let console = LineConsole::new(io::stdin().lock(), io::stdout());
        run(&args, &config, console, io::stdout(), io::stderr())
    };
    ExitCode::from(code)
}
