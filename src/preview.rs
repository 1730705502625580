//! Import preview for catalog-import
//!
//! The preview wraps one [`ParseOutcome`] and offers a filtered, sorted view
//! of its rows for display. The rows themselves are never reordered or
//! modified: the view is a list of indices into them, rebuilt whenever the
//! filter or sort changes.
//!
//! Error highlighting always goes through a displayed row's `origin_row`.
//! A display position is only used to find the row, never as the key into
//! the error set, so highlights stay on the right cells whatever the current
//! order.

use std::cmp::Ordering;
use std::collections::HashSet;

use clap::ValueEnum;
use log::debug;
use serde::Serialize;

use crate::pipeline::ParseOutcome;
use crate::product::{CandidateRow, Field};
use crate::validator::ValidationError;

/// Fields the preview can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Name,
    #[value(alias = "price")]
    Pricing,
    Description,
}

impl SortField {
    /// The product field this sort key reads
    pub fn field(self) -> Field {
        match self {
            SortField::Name => Field::Name,
            SortField::Pricing => Field::Pricing,
            SortField::Description => Field::Description,
        }
    }
}

/// Sort direction, similar to SQL's ASC/DESC
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[value(alias = "asc")]
    Ascending,
    #[value(alias = "desc")]
    Descending,
}

impl SortDirection {
    /// The opposite direction
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Active sort column and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Filterable, sortable view over one parse result
#[derive(Debug, Clone)]
pub struct PreviewStore {
    /// Candidate rows in file order; never reordered
    rows: Vec<CandidateRow>,

    /// Validation errors exactly as produced by the validator
    errors: Vec<ValidationError>,

    /// `(origin_row, field)` pairs that have at least one error
    invalid_cells: HashSet<(usize, Field)>,

    /// Current filter text, if any
    filter: Option<String>,

    /// Current sort, if any
    sort: Option<SortKey>,

    /// Indices into `rows`, in display order
    order: Vec<usize>,
}

impl PreviewStore {
    /// Create a preview showing every row in file order
    pub fn new(outcome: ParseOutcome) -> Self {
        let ParseOutcome { rows, errors } = outcome;
        let invalid_cells = errors.iter().map(|e| (e.row, e.field)).collect();
        let order = (0..rows.len()).collect();

        PreviewStore {
            rows,
            errors,
            invalid_cells,
            filter: None,
            sort: None,
            order,
        }
    }

    /// Keep only rows whose name, description or pricing contains `query`,
    /// ignoring case
    ///
    /// An empty query removes the filter.
    pub fn set_filter(&mut self, query: &str) {
        self.filter = if query.is_empty() {
            None
        } else {
            Some(query.to_lowercase())
        };
        self.rebuild();
    }

    /// Show all rows again
    pub fn clear_filter(&mut self) {
        self.filter = None;
        self.rebuild();
    }

    /// Sort the view by `field` in `direction`
    pub fn set_sort(&mut self, field: SortField, direction: SortDirection) {
        self.sort = Some(SortKey { field, direction });
        self.rebuild();
    }

    /// Sort by `field`, flipping the direction if it is already the sort
    /// column
    ///
    /// This mirrors clicking a sortable column header. Returns the sort now
    /// in effect.
    pub fn toggle_sort(&mut self, field: SortField) -> SortKey {
        let direction = match self.sort {
            Some(current) if current.field == field => current.direction.reversed(),
            _ => SortDirection::Ascending,
        };
        self.set_sort(field, direction);
        SortKey { field, direction }
    }

    /// Return to file order
    pub fn clear_sort(&mut self) {
        self.sort = None;
        self.rebuild();
    }

    /// The current filter text, lowercased
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// The current sort
    pub fn sort(&self) -> Option<SortKey> {
        self.sort
    }

    /// Rows in display order
    pub fn view(&self) -> Vec<&CandidateRow> {
        self.order.iter().map(|&index| &self.rows[index]).collect()
    }

    /// The row shown at `position`
    pub fn row_at(&self, position: usize) -> Option<&CandidateRow> {
        self.order.get(position).map(|&index| &self.rows[index])
    }

    /// Number of rows currently displayed
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether the row shown at `position` has an error on `field`
    ///
    /// Positions outside the view have no errors.
    pub fn has_error(&self, position: usize, field: Field) -> bool {
        self.row_at(position)
            .map(|row| self.invalid_cells.contains(&(row.origin_row, field)))
            .unwrap_or(false)
    }

    /// All errors for the row shown at `position`
    pub fn errors_at(&self, position: usize) -> Vec<&ValidationError> {
        match self.row_at(position) {
            Some(row) => self
                .errors
                .iter()
                .filter(|e| e.row == row.origin_row)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Every candidate row in file order, regardless of filter and sort
    pub fn rows(&self) -> &[CandidateRow] {
        &self.rows
    }

    /// Every validation error
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Give the untouched rows and errors back
    pub fn into_outcome(self) -> ParseOutcome {
        ParseOutcome {
            rows: self.rows,
            errors: self.errors,
        }
    }

    /// Recompute `order` from the filter and sort
    fn rebuild(&mut self) {
        let mut order: Vec<usize> = match &self.filter {
            Some(query) => (0..self.rows.len())
                .filter(|&index| matches_query(&self.rows[index], query))
                .collect(),
            None => (0..self.rows.len()).collect(),
        };

        if let Some(SortKey { field, direction }) = self.sort {
            let field = field.field();
            let keys: Vec<String> = self
                .rows
                .iter()
                .map(|row| row.record.field_text(field))
                .collect();

            order.sort_by(|&a, &b| {
                let ordering = compare_text(&keys[a], &keys[b]);
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }

        debug!(
            "Preview view rebuilt: {} of {} rows shown (filter: {:?}, sort: {:?})",
            order.len(),
            self.rows.len(),
            self.filter,
            self.sort
        );
        self.order = order;
    }
}

/// Case-insensitive substring match over the searchable fields
///
/// `query` must already be lowercased.
fn matches_query(row: &CandidateRow, query: &str) -> bool {
    let record = &row.record;
    [&record.name, &record.description, &record.pricing]
        .iter()
        .any(|value| value.to_lowercase().contains(query))
}

/// Compare display text ignoring case, falling back to the exact text so
/// that "apple" and "Apple" still have a fixed order
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
