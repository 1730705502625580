//! catalog-import - validate and import product catalogs from CSV files
//!
//! This binary is a terminal host for the import pipeline. It stands in for
//! the dashboard's import dialog: it reads the selected file, shows the
//! preview with invalid cells marked, writes the download template, and
//! commits clean imports into a JSON product catalog.
//!
//! # Program Flow
//!
//! 1. Parse command-line arguments and set up logging
//! 2. Build the application configuration
//! 3. Dispatch to the requested subcommand
//! 4. Report structural failures as a notification and a non-zero exit code

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use log::debug;

use catalog_import::catalog::Catalog;
use catalog_import::cli::{self, Command, LabelArgs};
use catalog_import::config::AppConfig;
use catalog_import::import_gate::{self, CommitOutcome};
use catalog_import::pipeline::{self, ParseOutcome};
use catalog_import::preview::PreviewStore;
use catalog_import::repl::Repl;
use catalog_import::report;
use catalog_import::template::{render_template, TemplateLabels};

/// Exit status when validation errors were found
const EXIT_INVALID_ROWS: u8 = 1;

/// Exit status when the file could not be read or has no importable rows
const EXIT_INVALID_FILE: u8 = 2;

/// Main entry point for the catalog-import utility
fn main() -> Result<ExitCode> {
    let args = cli::parse_args()?;

    init_logger(args.verbose);
    debug!("Arguments: {args:?}");

    match args.command {
        Command::Check { file, view, json } => {
            let config = AppConfig::new(args.verbose, TemplateLabels::default())
                .with_filter(view.filter.clone())
                .with_sort(view.sort_key());
            check(&config, &file, json)
        }
        Command::Template {
            labels,
            dir,
            stdout,
        } => {
            let config = AppConfig::new(args.verbose, resolve_labels(&labels)?);
            if stdout {
                print!("{}", render_template(config.labels())?);
            } else {
                let path = pipeline::download_template(config.labels(), &dir)
                    .with_context(|| format!("Failed to write template into {}", dir.display()))?;
                println!("Template written to {}", path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Import { file, into } => {
            let config = AppConfig::new(args.verbose, TemplateLabels::default())
                .with_catalog(Some(into));
            import(&config, &file)
        }
        Command::Interactive {
            file,
            into,
            view,
            labels,
        } => {
            let config = AppConfig::new(args.verbose, resolve_labels(&labels)?)
                .with_filter(view.filter.clone())
                .with_sort(view.sort_key())
                .with_catalog(into);
            let mut repl = Repl::new(config, &file).context("Failed to start interactive mode")?;
            repl.run().context("Interactive mode failed")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Initialize env_logger: warnings by default, debug with --verbose
fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}

fn resolve_labels(args: &LabelArgs) -> Result<TemplateLabels> {
    match &args.labels {
        Some(list) => list.parse().context("Failed to parse --labels"),
        None => Ok(TemplateLabels::default()),
    }
}

/// Parse a file, turning any read or format failure into a notification
///
/// Returns `None` after printing the notification.
fn parse_or_notify(file: &Path) -> Option<ParseOutcome> {
    match pipeline::parse_file(file) {
        Ok(outcome) => Some(outcome),
        Err(e) => {
            eprintln!("{}: {}", file.display(), e);
            None
        }
    }
}

/// Print the preview of a file and its errors
fn check(config: &AppConfig, file: &Path, json: bool) -> Result<ExitCode> {
    let Some(outcome) = parse_or_notify(file) else {
        return Ok(ExitCode::from(EXIT_INVALID_FILE));
    };

    let mut store = PreviewStore::new(outcome);
    config.apply_view(&mut store);

    if json {
        println!("{}", report::render_json(&store)?);
    } else {
        print!("{}", report::render_text(&store)?);
        if !store.errors().is_empty() {
            eprint!("{}", report::render_errors(store.errors()));
        }
    }

    if import_gate::check(store.errors()).is_allowed() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_INVALID_ROWS))
    }
}

/// Commit a file into the configured catalog, all or nothing
fn import(config: &AppConfig, file: &Path) -> Result<ExitCode> {
    let Some(outcome) = parse_or_notify(file) else {
        return Ok(ExitCode::from(EXIT_INVALID_FILE));
    };
    let Some(catalog_path) = config.catalog_path() else {
        anyhow::bail!("No catalog file given");
    };

    let mut catalog = Catalog::open(catalog_path)
        .with_context(|| format!("Failed to open catalog {}", catalog_path.display()))?;

    match pipeline::commit(catalog.products_mut(), &outcome) {
        CommitOutcome::Committed { added } => {
            catalog
                .save()
                .with_context(|| format!("Failed to save catalog {}", catalog_path.display()))?;
            println!(
                "Imported {} products into {} ({} total)",
                added,
                catalog_path.display(),
                catalog.len()
            );
            Ok(ExitCode::SUCCESS)
        }
        CommitOutcome::Blocked { error_count } => {
            eprint!("{}", report::render_errors(&outcome.errors));
            eprintln!(
                "Import blocked: {} validation errors, catalog left unchanged",
                error_count
            );
            Ok(ExitCode::from(EXIT_INVALID_ROWS))
        }
    }
}
