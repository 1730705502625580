//! Product record module for catalog-import
//!
//! This module provides the typed values that flow through the import pipeline:
//!
//! - [`ProductRecord`]: one catalog entry as read from a file row
//! - [`Field`]: the five product columns, used to key validation errors
//! - [`CandidateRow`]: a record paired with the file line it came from

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ImportError, ImportResult};

/// Number of columns every product row must provide
pub const COLUMN_COUNT: usize = 5;

/// Separator used inside the features cell
pub const FEATURE_SEPARATOR: char = ';';

/// One catalog entry
///
/// All fields are owned so that a record handed to the preview, to the
/// import gate and to the destination catalog never shares state with the
/// copy held by another stage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product name (required)
    pub name: String,

    /// Free-form pricing text such as "$99/month" (required)
    pub pricing: String,

    /// Short product description (required)
    pub description: String,

    /// Feature list, at least one entry required
    pub features: Vec<String>,

    /// Optional benefits text
    #[serde(default)]
    pub benefits: String,
}

impl ProductRecord {
    /// Get the scalar text of a field
    ///
    /// For [`Field::Features`] the entries are joined with `"; "`.
    pub fn field_text(&self, field: Field) -> String {
        match field {
            Field::Name => self.name.clone(),
            Field::Pricing => self.pricing.clone(),
            Field::Description => self.description.clone(),
            Field::Features => self.features.join("; "),
            Field::Benefits => self.benefits.clone(),
        }
    }
}

/// The product columns, in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Pricing,
    Description,
    Features,
    Benefits,
}

impl Field {
    /// All fields in column order
    pub const ALL: [Field; COLUMN_COUNT] = [
        Field::Name,
        Field::Pricing,
        Field::Description,
        Field::Features,
        Field::Benefits,
    ];

    /// Lowercase identifier used in messages and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Pricing => "pricing",
            Field::Description => "description",
            Field::Features => "features",
            Field::Benefits => "benefits",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = ImportError;

    fn from_str(s: &str) -> ImportResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(Field::Name),
            // The template header calls this column "price"
            "pricing" | "price" => Ok(Field::Pricing),
            "description" => Ok(Field::Description),
            "features" => Ok(Field::Features),
            "benefits" => Ok(Field::Benefits),
            _ => Err(ImportError::UnknownField(s.to_string())),
        }
    }
}

/// A candidate record together with its origin row number
///
/// `origin_row` is the record's position among the retained rows plus 2, so
/// the first data row after the header is row 2 however many blank or short
/// rows were skipped. It is fixed when the row is mapped and is the only key
/// used to look up validation errors for the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateRow {
    pub origin_row: usize,
    pub record: ProductRecord,
}
