//! Template writer for catalog-import
//!
//! Produces a small CSV file users can download, fill in and import again.
//! The header uses whatever column labels the host supplies (typically
//! localized); the two example rows are fixed. Every field is quoted and the
//! features are joined with `;`, which is exactly what the tokenizer and row
//! mapper read back, so the template imports with no validation errors.

use std::str::FromStr;

use crate::error::{ImportError, ImportResult};
use crate::product::{ProductRecord, COLUMN_COUNT, FEATURE_SEPARATOR};
use crate::tokenizer::QUOTE;

/// File name the template is saved under
pub const TEMPLATE_FILE_NAME: &str = "products_template.csv";

/// MIME type of the template download
pub const TEMPLATE_MIME_TYPE: &str = "text/csv;charset=utf-8";

/// Header labels for the five template columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLabels {
    pub name: String,
    pub pricing: String,
    pub description: String,
    pub features: String,
    pub benefits: String,
}

impl Default for TemplateLabels {
    fn default() -> Self {
        TemplateLabels {
            name: "name".to_string(),
            pricing: "price".to_string(),
            description: "description".to_string(),
            features: "features".to_string(),
            benefits: "benefits".to_string(),
        }
    }
}

impl TemplateLabels {
    /// Labels in column order
    pub fn as_row(&self) -> [&str; COLUMN_COUNT] {
        [
            self.name.as_str(),
            self.pricing.as_str(),
            self.description.as_str(),
            self.features.as_str(),
            self.benefits.as_str(),
        ]
    }

    /// Check that every label can be written and read back by the tokenizer
    ///
    /// Labels must be non-empty and may not contain a quote or a line break.
    pub fn validate(&self) -> ImportResult<()> {
        for label in self.as_row() {
            if label.trim().is_empty() {
                return Err(ImportError::InvalidLabels(
                    "labels cannot be empty".to_string(),
                ));
            }
            if label.contains(QUOTE) || label.contains('\n') || label.contains('\r') {
                return Err(ImportError::InvalidLabels(format!(
                    "label '{}' contains a quote or line break",
                    label
                )));
            }
        }
        Ok(())
    }
}

impl FromStr for TemplateLabels {
    type Err = ImportError;

    /// Parse a comma-separated list of exactly five labels
    ///
    /// `"Nombre,Precio,Descripción,Características,Beneficios"`
    fn from_str(s: &str) -> ImportResult<Self> {
        let parts: Vec<String> = s.split(',').map(|part| part.trim().to_string()).collect();
        let [name, pricing, description, features, benefits]: [String; COLUMN_COUNT] = parts
            .try_into()
            .map_err(|parts: Vec<String>| {
                ImportError::InvalidLabels(format!(
                    "expected {} labels, got {}",
                    COLUMN_COUNT,
                    parts.len()
                ))
            })?;

        let labels = TemplateLabels {
            name,
            pricing,
            description,
            features,
            benefits,
        };
        labels.validate()?;
        Ok(labels)
    }
}

/// The two example products shipped in the template
pub fn example_records() -> Vec<ProductRecord> {
    vec![
        ProductRecord {
            name: "Content Planner Pro".to_string(),
            pricing: "$49/month".to_string(),
            description: "Plan, approve and schedule brand content in one place".to_string(),
            features: vec![
                "Topic ideation".to_string(),
                "Approval workflow".to_string(),
                "Publishing calendar".to_string(),
            ],
            benefits: "Saves hours of coordination every week".to_string(),
        },
        ProductRecord {
            name: "Brand Voice Kit".to_string(),
            pricing: "$199 one-time".to_string(),
            description: "Guidelines and templates that keep every channel on-brand".to_string(),
            features: vec![
                "Tone guide".to_string(),
                "Message templates".to_string(),
            ],
            benefits: "Consistent messaging across teams".to_string(),
        },
    ]
}

/// Render the template CSV text
///
/// # Example
/// ```
/// # use catalog_import::template::{render_template, TemplateLabels};
/// let csv = render_template(&TemplateLabels::default()).unwrap();
/// assert!(csv.starts_with("\"name\",\"price\",\"description\",\"features\",\"benefits\"\n"));
/// assert_eq!(csv.lines().count(), 3);
/// ```
pub fn render_template(labels: &TemplateLabels) -> ImportResult<String> {
    labels.validate()?;

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(labels.as_row())?;

    let separator = FEATURE_SEPARATOR.to_string();
    for record in example_records() {
        let features = record.features.join(&separator);
        writer.write_record([
            record.name.as_str(),
            record.pricing.as_str(),
            record.description.as_str(),
            features.as_str(),
            record.benefits.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ImportError::IoError(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|_| ImportError::EncodingError(TEMPLATE_FILE_NAME.to_string()))
}
