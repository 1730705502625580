//! Row mapping for catalog-import
//!
//! Converts tokenized rows into [`CandidateRow`]s. The header row is dropped,
//! rows that are too short or entirely blank are skipped, and every kept row
//! is numbered after skipping: the first retained row is row 2.

use log::debug;

use crate::product::{CandidateRow, ProductRecord, COLUMN_COUNT, FEATURE_SEPARATOR};
use crate::tokenizer::QUOTE;

/// Map tokenized rows (header included) into candidate rows
///
/// Column order is name, pricing, description, features, benefits. Extra
/// cells past the fifth are ignored. The origin row of a candidate is its
/// position among the retained rows plus 2, counting the header as row 1.
pub fn map_rows(rows: &[Vec<String>]) -> Vec<CandidateRow> {
    let mut candidates = Vec::new();

    for (index, cells) in rows.iter().enumerate().skip(1) {
        if cells.len() < COLUMN_COUNT {
            if !is_blank_row(cells) {
                debug!(
                    "Skipping line {}: {} cells, expected {}",
                    index + 1,
                    cells.len(),
                    COLUMN_COUNT
                );
            }
            continue;
        }
        if is_blank_row(cells) {
            continue;
        }

        candidates.push(CandidateRow {
            origin_row: candidates.len() + 2,
            record: map_record(cells),
        });
    }

    candidates
}

/// Build a record from the first five cells of a row
///
/// The caller guarantees at least [`COLUMN_COUNT`] cells.
pub fn map_record(cells: &[String]) -> ProductRecord {
    ProductRecord {
        name: clean_cell(&cells[0]),
        pricing: clean_cell(&cells[1]),
        description: clean_cell(&cells[2]),
        features: split_features(&clean_cell(&cells[3])),
        benefits: clean_cell(&cells[4]),
    }
}

/// Strip one leading and one trailing quote, then surrounding whitespace
pub fn clean_cell(raw: &str) -> String {
    let unquoted = raw.strip_prefix(QUOTE).unwrap_or(raw);
    let unquoted = unquoted.strip_suffix(QUOTE).unwrap_or(unquoted);
    unquoted.trim().to_string()
}

/// Split a features cell on `;`, dropping blank entries
pub fn split_features(cell: &str) -> Vec<String> {
    cell.split(FEATURE_SEPARATOR)
        .map(str::trim)
        .filter(|feature| !feature.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whether every cell of a row is empty once cleaned
pub fn is_blank_row(cells: &[String]) -> bool {
    cells.iter().all(|cell| clean_cell(cell).is_empty())
}
