//! Preview rendering for catalog-import
//!
//! Turns a [`PreviewStore`] into text for the terminal or JSON for scripts.
//! Both renderings follow the current filter and sort, and mark invalid
//! cells by looking them up through the store.

use serde::Serialize;

use crate::error::{ImportError, ImportResult};
use crate::preview::{PreviewStore, SortKey};
use crate::product::{Field, ProductRecord};
use crate::validator::ValidationError;

/// Prefix written before the value of an invalid cell
pub const INVALID_MARK: char = '!';

/// Render the current view as CSV lines
///
/// The first line is the header. Each row starts with its display position
/// (1-based) and origin row, then the five fields; invalid cells are prefixed
/// with `!`. Cells holding a comma or a quote are quoted by the `csv` writer,
/// so every line splits back into the same cells. A summary line closes the
/// output.
pub fn render_text(store: &PreviewStore) -> ImportResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let mut header = vec!["#".to_string(), "row".to_string()];
    header.extend(Field::ALL.iter().map(|field| field.as_str().to_string()));
    writer.write_record(&header)?;

    for (position, row) in store.view().into_iter().enumerate() {
        let mut record = vec![(position + 1).to_string(), row.origin_row.to_string()];
        for field in Field::ALL {
            let text = row.record.field_text(field);
            if store.has_error(position, field) {
                record.push(format!("{}{}", INVALID_MARK, text));
            } else {
                record.push(text);
            }
        }
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ImportError::IoError(e.into_error()))?;
    let mut out = String::from_utf8(bytes)
        .map_err(|_| ImportError::EncodingError("preview".to_string()))?;

    out.push_str(&format!(
        "{} shown, {} total, {} errors\n",
        store.len(),
        store.rows().len(),
        store.errors().len()
    ));
    Ok(out)
}

/// Render one line per validation error
pub fn render_errors(errors: &[ValidationError]) -> String {
    errors.iter().map(|e| format!("{}\n", e)).collect()
}

#[derive(Serialize)]
struct JsonRow<'a> {
    position: usize,
    origin_row: usize,
    record: &'a ProductRecord,
    invalid_fields: Vec<Field>,
}

#[derive(Serialize)]
struct JsonPreview<'a> {
    shown: usize,
    total: usize,
    filter: Option<&'a str>,
    sort: Option<SortKey>,
    rows: Vec<JsonRow<'a>>,
    errors: &'a [ValidationError],
}

/// Render the current view, its invalid cells and all errors as JSON
pub fn render_json(store: &PreviewStore) -> ImportResult<String> {
    let rows = store
        .view()
        .into_iter()
        .enumerate()
        .map(|(position, row)| JsonRow {
            position,
            origin_row: row.origin_row,
            record: &row.record,
            invalid_fields: Field::ALL
                .into_iter()
                .filter(|&field| store.has_error(position, field))
                .collect(),
        })
        .collect();

    let preview = JsonPreview {
        shown: store.len(),
        total: store.rows().len(),
        filter: store.filter(),
        sort: store.sort(),
        rows,
        errors: store.errors(),
    };

    Ok(serde_json::to_string_pretty(&preview)?)
}
