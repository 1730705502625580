//! Tests for the downloadable CSV template
//!
//! The template must import cleanly whatever header labels it was written
//! with.

use std::fs;

use catalog_import::pipeline::{download_template, parse_file, parse_text};
use catalog_import::template::{
    example_records, render_template, TemplateLabels, TEMPLATE_FILE_NAME,
};

use crate::helpers::create_temp_dir;

#[test]
fn test_default_template_round_trip() {
    let csv = render_template(&TemplateLabels::default()).unwrap();
    let outcome = parse_text(&csv).unwrap();

    assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);
    assert_eq!(outcome.rows.len(), 2);

    let records: Vec<_> = outcome.records().into_iter().cloned().collect();
    assert_eq!(records, example_records());
}

#[test]
fn test_localized_labels_round_trip() {
    let labels: TemplateLabels = "Nombre,Precio,Descripción,Características,Beneficios"
        .parse()
        .unwrap();
    let csv = render_template(&labels).unwrap();
    assert!(csv.starts_with("\"Nombre\",\"Precio\""));

    let outcome = parse_text(&csv).unwrap();
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.rows.len(), 2);
}

#[test]
fn test_labels_with_commas_still_round_trip() {
    let labels = TemplateLabels {
        pricing: "Price, USD".to_string(),
        ..TemplateLabels::default()
    };
    let outcome = parse_text(&render_template(&labels).unwrap()).unwrap();
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.rows.len(), 2);
}

#[test]
fn test_download_writes_named_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = create_temp_dir()?;
    let path = download_template(&TemplateLabels::default(), temp_dir.path())?;

    assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(TEMPLATE_FILE_NAME));
    let contents = fs::read_to_string(&path)?;
    assert_eq!(contents.lines().count(), 3);

    let outcome = parse_file(&path)?;
    assert!(outcome.is_clean());
    assert_eq!(outcome.rows.len(), 2);
    Ok(())
}
