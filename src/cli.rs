//! CLI argument parsing module for catalog-import
//!
//! This module defines the command-line interface using clap. Each
//! subcommand maps onto one host operation of the import pipeline:
//!
//! - `check`: parse a file and show the preview with its errors
//! - `template`: write the CSV template
//! - `import`: parse a file and commit it into a catalog, all or nothing
//! - `interactive`: browse, filter and sort the preview in a shell

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::preview::{SortDirection, SortField, SortKey};

/// Command-line arguments for catalog-import
#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Validate and import product catalogs from CSV files"
)]
pub struct ImportArgs {
    /// Enable verbose diagnostic output
    ///
    /// Raises the log level to debug. RUST_LOG still takes precedence.
    #[clap(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a CSV file and print the preview and its validation errors
    ///
    /// Exits with status 1 when validation errors were found and 2 when the
    /// file cannot be imported at all.
    Check {
        /// CSV file to check
        file: PathBuf,

        #[clap(flatten)]
        view: ViewArgs,

        /// Print the preview as JSON
        #[clap(long)]
        json: bool,
    },

    /// Write products_template.csv
    Template {
        #[clap(flatten)]
        labels: LabelArgs,

        /// Directory to write the template into
        #[clap(short, long, default_value = ".", conflicts_with = "stdout")]
        dir: PathBuf,

        /// Print the template instead of writing a file
        #[clap(long)]
        stdout: bool,
    },

    /// Import a CSV file into a JSON catalog
    ///
    /// Nothing is written when any row has a validation error.
    Import {
        /// CSV file to import
        file: PathBuf,

        /// Catalog file to append to (created if missing)
        #[clap(long)]
        into: PathBuf,
    },

    /// Browse a file's preview interactively
    Interactive {
        /// CSV file to load
        file: PathBuf,

        /// Catalog file used by .commit
        #[clap(long)]
        into: Option<PathBuf>,

        #[clap(flatten)]
        view: ViewArgs,

        #[clap(flatten)]
        labels: LabelArgs,
    },
}

/// Initial filter and sort for a preview
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Only show rows whose name, description or pricing contains TEXT
    #[clap(short, long, value_name = "TEXT")]
    pub filter: Option<String>,

    /// Sort the preview by a column
    #[clap(short, long, value_enum, value_name = "FIELD")]
    pub sort: Option<SortField>,

    /// Sort in descending order
    #[clap(long, requires = "sort")]
    pub desc: bool,
}

impl ViewArgs {
    /// The sort requested on the command line
    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort.map(|field| SortKey {
            field,
            direction: if self.desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            },
        })
    }
}

/// Template header labels
#[derive(Args, Debug, Clone, Default)]
pub struct LabelArgs {
    /// Five comma-separated column labels for the template header
    ///
    /// Example: --labels "Nombre,Precio,Descripción,Características,Beneficios"
    #[clap(long, value_name = "L1,L2,L3,L4,L5")]
    pub labels: Option<String>,
}

/// Parse command-line arguments into the ImportArgs structure
///
/// # Returns
/// * `Ok(ImportArgs)` - Command-line arguments successfully parsed
/// * `Err` - Error during argument parsing (handled by clap, usually results in help text display)
pub fn parse_args() -> Result<ImportArgs> {
    Ok(ImportArgs::parse())
}
