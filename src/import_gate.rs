//! Import gate for catalog-import
//!
//! Decides whether candidate rows may be appended to the destination product
//! list. The rule is all-or-nothing: any validation error blocks the whole
//! import, and there is no way to commit only the valid rows.

use log::{info, warn};

use crate::product::{CandidateRow, ProductRecord};
use crate::validator::ValidationError;

/// Whether a commit may go ahead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitDecision {
    Allowed,
    Blocked { error_count: usize },
}

impl CommitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, CommitDecision::Allowed)
    }
}

/// Result of a commit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Every record was appended
    Committed { added: usize },
    /// Nothing was appended because of validation errors
    Blocked { error_count: usize },
}

impl CommitOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, CommitOutcome::Committed { .. })
    }
}

/// Decide whether a commit is allowed given the current errors
pub fn check(errors: &[ValidationError]) -> CommitDecision {
    if errors.is_empty() {
        CommitDecision::Allowed
    } else {
        CommitDecision::Blocked {
            error_count: errors.len(),
        }
    }
}

/// Append every candidate record to `destination` if there are no errors
///
/// Records are cloned, so the destination never shares data with the
/// preview. When blocked, `destination` is left exactly as it was.
pub fn commit(
    destination: &mut Vec<ProductRecord>,
    rows: &[CandidateRow],
    errors: &[ValidationError],
) -> CommitOutcome {
    match check(errors) {
        CommitDecision::Allowed => {
            destination.extend(rows.iter().map(|row| row.record.clone()));
            info!("Committed {} products", rows.len());
            CommitOutcome::Committed { added: rows.len() }
        }
        CommitDecision::Blocked { error_count } => {
            warn!("Import blocked by {} validation errors", error_count);
            CommitOutcome::Blocked { error_count }
        }
    }
}
