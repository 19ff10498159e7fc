use std::io::{self, Write};

use console::style;
use tracing::{error, info};

use crate::{
    cli::{
        args::{Args, CatalogCommands, Commands},
        commands::StoreApp,
        console::Console,
    },
    services::catalog_service::{load_catalog, CatalogLoad},
    utils::{formatting::format_listing, Config},
};

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_USAGE: u8 = 2;

/// Loads the catalog and dispatches the selected command. Catalog reports go
/// to `output`, load issues to `errors`; the interactive store talks through
/// `console`. Returns the process exit code.
pub fn run<C, W, E>(args: &Args, config: &Config, console: C, mut output: W, mut errors: E) -> u8
where
    C: Console,
    W: Write,
    E: Write,
{
    let load = load_catalog(&config.catalog_path);
    if let Err(e) = report_issues(&load, &mut errors) {
        error!("Failed to report catalog issues: {}", e);
        return EXIT_FAILURE;
    }

    if config.require_catalog && load.is_missing() {
        info!("Catalog {} is required but missing", config.catalog_path.display());
        return EXIT_USAGE;
    }

    let result = match &args.command {
        Some(Commands::Catalog {
            command: CatalogCommands::List,
        }) => writeln!(
            output,
            "{}",
            format_listing(load.catalog.products(), config.listing_order)
        )
        .map(|_| EXIT_SUCCESS),
        Some(Commands::Catalog {
            command: CatalogCommands::Check,
        }) => check_catalog(&load, config, &mut output, &mut errors),
        Some(Commands::Shop) | None => {
            let outcome = StoreApp::new(console, load.catalog, config.listing_order).run();
            info!("Online store stopped: {:?}", outcome);
            Ok(EXIT_SUCCESS)
        }
    };

    result.unwrap_or_else(|e| {
        error!("Failed to write command output: {}", e);
        EXIT_FAILURE
    })
}

fn check_catalog<W: Write, E: Write>(
    load: &CatalogLoad,
    config: &Config,
    output: &mut W,
    errors: &mut E,
) -> io::Result<u8> {
    if load.has_issues() {
        writeln!(
            errors,
            "{} issue(s) found in {}",
            load.issues.len(),
            config.catalog_path.display()
        )?;
        Ok(EXIT_FAILURE)
    } else {
        writeln!(output, "{} products, no issues", load.catalog.len())?;
        Ok(EXIT_SUCCESS)
    }
}

fn report_issues<E: Write>(load: &CatalogLoad, errors: &mut E) -> io::Result<()> {
    for issue in &load.issues {
        if issue.is_warning() {
            writeln!(errors, "{}", style(issue).yellow())?;
        } else {
            writeln!(errors, "{}", style(issue).red())?;
        }
    }
    Ok(())
}
