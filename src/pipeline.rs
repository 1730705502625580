//! Import pipeline entry points for catalog-import
//!
//! This module exposes the three operations a host needs:
//!
//! - [`parse_file`] / [`parse_text`]: tokenize, map and validate in one pass
//! - [`download_template`]: write the CSV template next to the user's files
//! - [`commit`]: append the parsed records to a product list through the
//!   import gate
//!
//! Nothing is kept between calls. Each parse returns a fresh
//! [`ParseOutcome`] and the host decides how long to keep it.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Serialize;

use crate::error::{ImportError, ImportResult};
use crate::import_gate::{self, CommitOutcome};
use crate::product::{CandidateRow, ProductRecord, COLUMN_COUNT};
use crate::row_mapper::{is_blank_row, map_rows};
use crate::template::{render_template, TemplateLabels, TEMPLATE_FILE_NAME, TEMPLATE_MIME_TYPE};
use crate::tokenizer::tokenize;
use crate::validator::{validate_rows, ValidationError};

/// Candidate rows and their validation errors, produced together
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseOutcome {
    pub rows: Vec<CandidateRow>,
    pub errors: Vec<ValidationError>,
}

impl ParseOutcome {
    /// Whether the outcome can be committed
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// The candidate records without their origin rows
    pub fn records(&self) -> Vec<&ProductRecord> {
        self.rows.iter().map(|row| &row.record).collect()
    }
}

/// Parse CSV text into candidate rows and validation errors
///
/// # Returns
/// * `Ok(ParseOutcome)` - possibly with validation errors, which are data
/// * `Err(ImportError::InvalidFormat)` - when no row has the five product
///   columns, or when the file has data rows but none of them could be mapped
///
/// A file with a valid header and no data rows parses to an empty outcome.
pub fn parse_text(text: &str) -> ImportResult<ParseOutcome> {
    let tokenized = tokenize(text);
    debug!("Tokenized {} lines", tokenized.len());

    if !tokenized.iter().any(|cells| cells.len() >= COLUMN_COUNT) {
        return Err(ImportError::InvalidFormat(format!(
            "no row has the {} required columns",
            COLUMN_COUNT
        )));
    }

    let rows = map_rows(&tokenized);
    if rows.is_empty() {
        let data_rows = tokenized
            .iter()
            .skip(1)
            .filter(|cells| !is_blank_row(cells))
            .count();
        if data_rows > 0 {
            return Err(ImportError::InvalidFormat(format!(
                "none of the {} data rows has the {} required columns",
                data_rows, COLUMN_COUNT
            )));
        }
    }

    let errors = validate_rows(&rows);
    info!(
        "Parsed {} candidate products with {} validation errors",
        rows.len(),
        errors.len()
    );

    Ok(ParseOutcome { rows, errors })
}

/// Read a file as UTF-8 and parse it
pub fn parse_file(path: impl AsRef<Path>) -> ImportResult<ParseOutcome> {
    let path = path.as_ref();
    debug!("Reading import file {}", path.display());

    let bytes = fs::read(path)?;
    let text = String::from_utf8(bytes)
        .map_err(|_| ImportError::EncodingError(path.display().to_string()))?;

    parse_text(&text)
}

/// Write `products_template.csv` into `dir`
///
/// # Returns
/// The path of the written file
pub fn download_template(labels: &TemplateLabels, dir: impl AsRef<Path>) -> ImportResult<PathBuf> {
    let contents = render_template(labels)?;
    let path = dir.as_ref().join(TEMPLATE_FILE_NAME);
    fs::write(&path, contents)?;
    info!("Template written to {} ({})", path.display(), TEMPLATE_MIME_TYPE);
    Ok(path)
}

/// Commit a parse outcome into `destination`, all or nothing
pub fn commit(destination: &mut Vec<ProductRecord>, outcome: &ParseOutcome) -> CommitOutcome {
    import_gate::commit(destination, &outcome.rows, &outcome.errors)
}
