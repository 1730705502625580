//! Field validation for catalog-import
//!
//! Each rule is independent, so one record can produce several errors. A
//! record with errors is still a candidate: the preview needs it to show
//! which cells are invalid.

use std::fmt;

use serde::Serialize;

use crate::product::{CandidateRow, Field, ProductRecord};

/// Message for an empty required scalar field
pub const REQUIRED_MESSAGE: &str = "is required";

/// Message for an empty feature list
pub const FEATURES_REQUIRED_MESSAGE: &str = "at least one feature is required";

/// One validation finding
///
/// `row` is the origin row of the record (header is row 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub row: usize,
    pub field: Field,
    pub message: String,
}

impl ValidationError {
    pub fn new(row: usize, field: Field, message: impl Into<String>) -> Self {
        Self {
            row,
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {} {}", self.row, self.field, self.message)
    }
}

/// Validate one record against its origin row number
///
/// Errors come back in column order. Benefits are never checked.
pub fn validate_record(record: &ProductRecord, row: usize) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let required = [
        (Field::Name, &record.name),
        (Field::Pricing, &record.pricing),
        (Field::Description, &record.description),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            errors.push(ValidationError::new(row, field, REQUIRED_MESSAGE));
        }
    }

    if record.features.is_empty() {
        errors.push(ValidationError::new(
            row,
            Field::Features,
            FEATURES_REQUIRED_MESSAGE,
        ));
    }

    errors
}

/// Validate every candidate row and concatenate the findings
///
/// Rows are processed in order and none is skipped because an earlier row
/// failed.
pub fn validate_rows(rows: &[CandidateRow]) -> Vec<ValidationError> {
    rows.iter()
        .flat_map(|row| validate_record(&row.record, row.origin_row))
        .collect()
}
