//! catalog-import library crate
//!
//! This is the library component of catalog-import, the bulk product import
//! pipeline. It provides:
//!
//! - A small CSV tokenizer that keeps quoted commas inside their cell
//! - Row mapping into product records that remember their file line
//! - Per-field validation that reports every problem with its origin row
//! - A filterable, sortable preview whose error highlighting follows rows,
//!   not display positions
//! - A CSV template writer whose output imports cleanly
//! - An all-or-nothing import gate and a JSON product catalog to commit into
//!
//! The usual entry points are [`pipeline::parse_file`],
//! [`pipeline::download_template`] and [`pipeline::commit`].

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod import_gate;
pub mod pipeline;
pub mod preview;
pub mod product;
pub mod repl;
pub mod report;
pub mod row_mapper;
pub mod template;
pub mod tokenizer;
pub mod validator;
