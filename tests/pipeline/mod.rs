//! Tests for parsing files and committing them
//!
//! Covers the full tokenize → map → validate pass and the all-or-nothing
//! commit on top of it.

use catalog_import::error::ImportError;
use catalog_import::import_gate::CommitOutcome;
use catalog_import::pipeline::{commit, parse_file, parse_text};
use catalog_import::product::{Field, ProductRecord};
use catalog_import::validator::ValidationError;
use proptest::prelude::*;

use crate::helpers::{create_custom_csv, create_temp_dir, quoted_row, CLEAN_SAMPLE, HEADER, MIXED_SAMPLE};

#[test]
fn test_mixed_sample_scenario() {
    let outcome = parse_text(MIXED_SAMPLE).unwrap();

    assert_eq!(outcome.rows.len(), 2);
    assert_eq!(
        outcome.rows[0].record,
        ProductRecord {
            name: "Product A".to_string(),
            pricing: "$99".to_string(),
            description: "Desc A".to_string(),
            features: vec!["F1".to_string(), "F2".to_string()],
            benefits: "B1".to_string(),
        }
    );
    assert_eq!(
        outcome.rows[1].record,
        ProductRecord {
            name: String::new(),
            pricing: "$50".to_string(),
            description: "Desc B".to_string(),
            features: Vec::new(),
            benefits: String::new(),
        }
    );
    assert_eq!(
        outcome.errors,
        vec![
            ValidationError::new(3, Field::Name, "is required"),
            ValidationError::new(3, Field::Features, "at least one feature is required"),
        ]
    );

    let mut destination = vec![ProductRecord::default()];
    assert_eq!(
        commit(&mut destination, &outcome),
        CommitOutcome::Blocked { error_count: 2 }
    );
    assert_eq!(destination.len(), 1);
}

#[test]
fn test_clean_file_commits_every_row() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = create_temp_dir()?;
    let path = create_custom_csv(temp_dir.path(), "products.csv", CLEAN_SAMPLE)?;

    let outcome = parse_file(&path)?;
    assert!(outcome.is_clean());
    assert_eq!(outcome.rows.len(), 3);
    assert_eq!(outcome.rows[2].record.description, "Smith, Jones and partners");
    assert_eq!(outcome.rows[2].record.features, vec!["Audit", "Review"]);

    let mut destination = Vec::new();
    assert_eq!(
        commit(&mut destination, &outcome),
        CommitOutcome::Committed { added: 3 }
    );
    let names: Vec<&str> = destination.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Zeta Suite", "alpha kit", "Beta Pack"]);
    Ok(())
}

#[test]
fn test_quoted_comma_stays_in_one_cell() {
    let text = format!("{HEADER}\n{}", quoted_row(&["Smith, Jones", "$1", "d", "f", ""]));
    let outcome = parse_text(&text).unwrap();
    assert_eq!(outcome.rows[0].record.name, "Smith, Jones");
    assert_eq!(outcome.rows[0].record.pricing, "$1");
}

#[test]
fn test_features_split_drops_blank_segments() {
    let text = format!("{HEADER}\n{}", quoted_row(&["n", "$1", "d", "A;B; ;C", ""]));
    let outcome = parse_text(&text).unwrap();
    assert_eq!(outcome.rows[0].record.features, vec!["A", "B", "C"]);
}

#[test]
fn test_crlf_file_parses_like_lf() {
    let text = MIXED_SAMPLE.replace('\n', "\r\n");
    let crlf = parse_text(&text).unwrap();
    let lf = parse_text(MIXED_SAMPLE).unwrap();
    assert_eq!(crlf, lf);
}

#[test]
fn test_interior_blank_line_does_not_shift_row_numbers() {
    let text = format!(
        "{HEADER}\n{}\n\n{}\n",
        quoted_row(&["a", "$1", "d", "f", ""]),
        quoted_row(&["b", "", "d", "f", ""])
    );
    let outcome = parse_text(&text).unwrap();
    assert_eq!(outcome.rows[1].origin_row, 3);
    assert_eq!(outcome.errors, vec![ValidationError::new(3, Field::Pricing, "is required")]);
}

#[test]
fn test_short_row_before_invalid_row() {
    let text = format!("{HEADER}
short,row
{}", quoted_row(&["", "$1", "d", "f", ""]));
    let outcome = parse_text(&text).unwrap();
    assert_eq!(outcome.errors, vec![ValidationError::new(2, Field::Name, "is required")]);
}

#[test]
fn test_non_utf8_file_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = create_temp_dir()?;
    let path = temp_dir.path().join("latin1.csv");
    std::fs::write(&path, b"name,price,description,features,benefits\n\xff\xfe,1,2,3,4\n")?;

    assert!(matches!(parse_file(&path), Err(ImportError::EncodingError(_))));
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    assert!(matches!(
        parse_file("does/not/exist.csv"),
        Err(ImportError::IoError(_))
    ));
}

#[test]
fn test_structural_failure_yields_no_records() {
    let result = parse_text("name;price;description\nA;1;d\n");
    assert!(matches!(result, Err(ImportError::InvalidFormat(_))));
}

fn cell() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 $]{0,8}"
}

fn features_cell() -> impl Strategy<Value = String> {
    "[A-Za-z ;]{0,10}"
}

/// One generated data line
#[derive(Debug, Clone)]
enum Line {
    Product(String, String, String, String),
    Blank,
    EmptyCells,
    Short(String),
}

impl Line {
    fn render(&self) -> String {
        match self {
            Line::Product(name, pricing, description, features) => quoted_row(&[
                name.as_str(),
                pricing.as_str(),
                description.as_str(),
                features.as_str(),
                "b",
            ]),
            Line::Blank => String::new(),
            Line::EmptyCells => quoted_row(&["", "", "", "", ""]),
            Line::Short(cell) => format!("{cell},{cell}"),
        }
    }
}

fn line() -> impl Strategy<Value = Line> {
    prop_oneof![
        4 => (cell(), cell(), cell(), features_cell())
            .prop_map(|(n, p, d, f)| Line::Product(n, p, d, f)),
        1 => Just(Line::Blank),
        1 => Just(Line::EmptyCells),
        1 => "[a-z]{1,5}".prop_map(Line::Short),
    ]
}

proptest! {
    /// Blank and short lines are skipped without leaving gaps: every error
    /// points at its record's retained position + 2
    #[test]
    fn prop_error_rows_follow_retained_position(
        lines in prop::collection::vec(line(), 0..25)
    ) {
        let mut text = HEADER.to_string();
        for line in &lines {
            text.push('\n');
            text.push_str(&line.render());
        }
        let products = lines.iter().filter(|l| matches!(l, Line::Product(..))).count();
        let shorts = lines.iter().filter(|l| matches!(l, Line::Short(_))).count();

        let outcome = match parse_text(&text) {
            Ok(outcome) => outcome,
            Err(ImportError::InvalidFormat(_)) => {
                prop_assert_eq!(products, 0);
                prop_assert!(shorts > 0);
                return Ok(());
            }
            Err(e) => return Err(TestCaseError::fail(e.to_string())),
        };

        prop_assert_eq!(outcome.rows.len(), products);
        for (position, row) in outcome.rows.iter().enumerate() {
            prop_assert_eq!(row.origin_row, position + 2);
        }
        for error in &outcome.errors {
            prop_assert!(error.row >= 2 && error.row - 2 < outcome.rows.len());
            let record = &outcome.rows[error.row - 2].record;
            prop_assert!(record.field_text(error.field).is_empty());
        }
    }

    /// A blocked commit never changes the destination
    #[test]
    fn prop_blocked_commit_leaves_destination(existing in 0usize..5, names in prop::collection::vec(cell(), 1..10)) {
        let mut text = HEADER.to_string();
        for name in &names {
            text.push('\n');
            // empty features always fail validation
            text.push_str(&quoted_row(&[name.as_str(), "$1", "d", "", "x"]));
        }
        let outcome = parse_text(&text).unwrap();
        prop_assert!(!outcome.errors.is_empty());

        let mut destination = vec![ProductRecord::default(); existing];
        let result = commit(&mut destination, &outcome);
        prop_assert!(!result.is_committed());
        prop_assert_eq!(destination.len(), existing);
    }
}
