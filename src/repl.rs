//! Interactive preview shell for catalog-import
//!
//! Loads one file into a [`PreviewStore`] and lets the user filter, sort,
//! inspect errors and finally commit, the way the import dialog does. Plain
//! text filters the preview; dot commands do everything else.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use log::{debug, warn};
use rustyline::completion::{Completer, Pair};
use rustyline::config::CompletionType;
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::{self, Validator};
use rustyline::{Config, Context, Editor, Helper};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::error::ImportError;
use crate::import_gate::{self, CommitOutcome};
use crate::pipeline::{self, ParseOutcome};
use crate::preview::{PreviewStore, SortDirection, SortField};
use crate::report;

/// Errors that stop a shell command
#[derive(Error, Debug)]
pub enum ReplError {
    #[error("Input error: {0}")]
    Readline(#[from] ReadlineError),

    #[error("{0}")]
    Import(#[from] ImportError),
}

pub type Result<T> = std::result::Result<T, ReplError>;

const HISTORY_FILE: &str = ".catalog_import_history";

const COMMANDS: [&str; 13] = [
    ".clear", ".commit", ".errors", ".exit", ".filter", ".help", ".load", ".quit", ".row",
    ".show", ".sort", ".template", ".unsort",
];

/// Dot command completer
#[derive(Default)]
struct CommandCompleter;

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        if !line.starts_with('.') || line.contains(' ') {
            return Ok((pos, vec![]));
        }

        let candidates = COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();

        Ok((0, candidates))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<Self::Hint> {
        None
    }
}

impl Highlighter for CommandCompleter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        false
    }
}

impl Validator for CommandCompleter {
    fn validate(
        &self,
        _ctx: &mut validate::ValidationContext,
    ) -> rustyline::Result<validate::ValidationResult> {
        Ok(validate::ValidationResult::Valid(None))
    }
}

impl Helper for CommandCompleter {}

/// Commands understood by the shell
#[derive(Debug, PartialEq, Eq)]
pub enum ReplCommand {
    /// Filter by text; an empty string clears the filter
    Filter(String),
    /// Sort by a field; without a direction the current direction is flipped
    Sort(SortField, Option<SortDirection>),
    /// Return to file order
    Unsort,
    /// Drop filter and sort
    Clear,
    /// Print the preview
    Show,
    /// Print all validation errors
    Errors,
    /// Print the errors of the row at a 1-based display position
    Row(usize),
    /// Parse another file, replacing the current preview
    Load(PathBuf),
    /// Commit the preview into the catalog
    Commit,
    /// Write the template into a directory
    Template(PathBuf),
    Help,
    Exit,
    /// Anything that could not be parsed, with the message to show
    Unknown(String),
}

/// Parse one line of user input
pub fn parse_command(input: &str) -> ReplCommand {
    let input = input.trim();

    let Some(stripped) = input.strip_prefix('.') else {
        return ReplCommand::Filter(input.to_string());
    };

    let (command, arg) = match stripped.split_once(' ') {
        Some((command, arg)) => (command.to_lowercase(), arg.trim()),
        None => (stripped.to_lowercase(), ""),
    };

    match command.as_str() {
        "filter" => ReplCommand::Filter(arg.to_string()),
        "sort" => parse_sort(arg),
        "unsort" => ReplCommand::Unsort,
        "clear" => ReplCommand::Clear,
        "show" => ReplCommand::Show,
        "errors" => ReplCommand::Errors,
        "row" => match arg.parse::<usize>() {
            Ok(position) if position > 0 => ReplCommand::Row(position),
            _ => ReplCommand::Unknown("Usage: .row N (1-based position in the preview)".to_string()),
        },
        "load" if !arg.is_empty() => ReplCommand::Load(PathBuf::from(arg)),
        "load" => ReplCommand::Unknown("File path required for .load command".to_string()),
        "commit" => ReplCommand::Commit,
        "template" if arg.is_empty() => ReplCommand::Template(PathBuf::from(".")),
        "template" => ReplCommand::Template(PathBuf::from(arg)),
        "help" => ReplCommand::Help,
        "exit" | "quit" => ReplCommand::Exit,
        _ => ReplCommand::Unknown(format!(
            "Unknown command: .{} (use .filter TEXT to filter for text starting with '.')",
            command
        )),
    }
}

fn parse_sort(arg: &str) -> ReplCommand {
    let mut parts = arg.split_whitespace();
    let Some(field) = parts.next() else {
        return ReplCommand::Unknown("Usage: .sort FIELD [asc|desc]".to_string());
    };
    let Ok(field) = SortField::from_str(field, true) else {
        return ReplCommand::Unknown(format!(
            "Cannot sort by '{}': use name, pricing or description",
            field
        ));
    };

    match parts.next() {
        None => ReplCommand::Sort(field, None),
        Some(direction) => match SortDirection::from_str(direction, true) {
            Ok(direction) => ReplCommand::Sort(field, Some(direction)),
            Err(_) => ReplCommand::Unknown(format!("Unknown sort direction '{}'", direction)),
        },
    }
}

/// Interactive preview shell
pub struct Repl {
    /// Rustyline editor for command line editing
    editor: Editor<CommandCompleter, DefaultHistory>,
    /// Application settings
    config: AppConfig,
    /// Preview of the loaded file; empty after a failed load or a commit
    store: PreviewStore,
    /// File the preview was parsed from
    source: Option<PathBuf>,
    /// Whether the shell is running
    running: bool,
}

impl Repl {
    /// Create a shell and load `file` into it
    pub fn new(config: AppConfig, file: &Path) -> Result<Self> {
        let editor_config = Config::builder()
            .completion_type(CompletionType::List)
            .build();

        let mut editor = Editor::with_config(editor_config)?;
        editor.set_helper(Some(CommandCompleter));
        if let Err(e) = editor.load_history(HISTORY_FILE) {
            debug!("No shell history loaded: {}", e);
        }

        let mut repl = Self {
            editor,
            config,
            store: PreviewStore::new(ParseOutcome::default()),
            source: None,
            running: true,
        };
        repl.load_file(file);
        Ok(repl)
    }

    /// Run the shell until `.exit` or end of input
    pub fn run(&mut self) -> Result<()> {
        println!("catalog-import interactive preview");
        println!("Type text to filter, or .help for commands.");

        while self.running {
            match self.editor.readline("import> ") {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = self.editor.add_history_entry(line.as_str());
                    }
                    if let Err(e) = self.execute_command(parse_command(&line)) {
                        eprintln!("Error: {}", e);
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            }
        }

        if let Err(e) = self.editor.save_history(HISTORY_FILE) {
            warn!("Failed to save history: {}", e);
        }

        Ok(())
    }

    /// The current preview
    pub fn store(&self) -> &PreviewStore {
        &self.store
    }

    /// Execute a command
    pub fn execute_command(&mut self, command: ReplCommand) -> Result<()> {
        match command {
            ReplCommand::Filter(query) => {
                self.store.set_filter(&query);
                self.show()?;
            }
            ReplCommand::Sort(field, direction) => {
                match direction {
                    Some(direction) => self.store.set_sort(field, direction),
                    None => {
                        self.store.toggle_sort(field);
                    }
                }
                self.show()?;
            }
            ReplCommand::Unsort => {
                self.store.clear_sort();
                self.show()?;
            }
            ReplCommand::Clear => {
                self.store.clear_filter();
                self.store.clear_sort();
                self.show()?;
            }
            ReplCommand::Show => self.show()?,
            ReplCommand::Errors => {
                if self.store.errors().is_empty() {
                    println!("No validation errors");
                } else {
                    print!("{}", report::render_errors(self.store.errors()));
                }
            }
            ReplCommand::Row(position) => {
                match position
                    .checked_sub(1)
                    .filter(|&index| self.store.row_at(index).is_some())
                {
                    None => println!("No row at position {}", position),
                    Some(index) => {
                        let errors = self.store.errors_at(index);
                        if errors.is_empty() {
                            println!("Row {} is valid", position);
                        }
                        for error in errors {
                            println!("{}", error);
                        }
                    }
                }
            }
            ReplCommand::Load(path) => self.load_file(&path),
            ReplCommand::Commit => self.commit()?,
            ReplCommand::Template(dir) => {
                let path = pipeline::download_template(self.config.labels(), dir)?;
                println!("Template written to {}", path.display());
            }
            ReplCommand::Help => show_help(),
            ReplCommand::Exit => self.running = false,
            ReplCommand::Unknown(msg) => eprintln!("{}", msg),
        }
        Ok(())
    }

    /// Parse a file into a fresh preview
    ///
    /// A file that cannot be imported leaves an empty preview behind and is
    /// reported, not returned as an error.
    fn load_file(&mut self, path: &Path) {
        let outcome = match pipeline::parse_file(path) {
            Ok(outcome) => outcome,
            Err(e) => {
                eprintln!("{}", e);
                ParseOutcome::default()
            }
        };

        self.store = PreviewStore::new(outcome);
        self.config.apply_view(&mut self.store);
        self.source = Some(path.to_path_buf());

        println!(
            "Loaded {} products with {} errors from {}",
            self.store.rows().len(),
            self.store.errors().len(),
            path.display()
        );
        if self.config.verbose() && !self.store.errors().is_empty() {
            print!("{}", report::render_errors(self.store.errors()));
        }
    }

    /// Commit the preview into the configured catalog
    fn commit(&mut self) -> Result<()> {
        let Some(catalog_path) = self.config.catalog_path() else {
            eprintln!("No catalog configured: start with --into CATALOG");
            return Ok(());
        };
        if self.store.rows().is_empty() {
            println!("Nothing to import");
            return Ok(());
        }

        let mut catalog = Catalog::open(catalog_path)?;
        match import_gate::commit(
            catalog.products_mut(),
            self.store.rows(),
            self.store.errors(),
        ) {
            CommitOutcome::Committed { added } => {
                catalog.save()?;
                println!(
                    "Imported {} products into {} ({} total)",
                    added,
                    catalog.path().display(),
                    catalog.len()
                );
                // Committed rows must not be appended twice
                self.store = PreviewStore::new(ParseOutcome::default());
                self.source = None;
            }
            CommitOutcome::Blocked { error_count } => {
                println!(
                    "Import blocked: fix {} validation errors and load the file again",
                    error_count
                );
            }
        }
        Ok(())
    }

    fn show(&self) -> Result<()> {
        if let Some(source) = &self.source {
            debug!("Showing preview of {}", source.display());
        }
        print!("{}", report::render_text(&self.store)?);
        Ok(())
    }
}

/// Show help message
fn show_help() {
    println!("Available commands:");
    println!("  TEXT                  Filter rows by name, description or pricing");
    println!("  .filter ?TEXT?        Filter rows; without TEXT clear the filter");
    println!("                        (use this for TEXT that starts with '.')");
    println!("  .sort FIELD ?DIR?     Sort by name, pricing or description (asc|desc)");
    println!("  .unsort               Return to file order");
    println!("  .clear                Clear filter and sort");
    println!("  .show                 Show the preview");
    println!("  .errors               List all validation errors");
    println!("  .row N                Show errors of the row at position N");
    println!("  .load FILE            Load another CSV file");
    println!("  .commit               Import all rows into the catalog");
    println!("  .template ?DIR?       Write products_template.csv into DIR");
    println!("  .help                 Show this help message");
    println!("  .exit, .quit          Leave the shell");
}
