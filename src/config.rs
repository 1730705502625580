//! Configuration module for catalog-import
//!
//! This module provides a centralized configuration structure for the host
//! application. Settings are gathered once from the command line and passed
//! down to the commands and the interactive shell instead of living in global
//! state.

use std::path::{Path, PathBuf};

use crate::preview::{PreviewStore, SortKey};
use crate::template::TemplateLabels;

/// Application configuration
///
/// Created at startup and handed to every component that needs settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Whether to show verbose output
    verbose: bool,

    /// Header labels used when writing the template
    labels: TemplateLabels,

    /// Filter applied to the preview when it is first shown
    filter: Option<String>,

    /// Sort applied to the preview when it is first shown
    sort: Option<SortKey>,

    /// Catalog file committed imports are appended to
    catalog_path: Option<PathBuf>,
}

impl AppConfig {
    /// Create a new application configuration
    ///
    /// # Arguments
    /// * `verbose` - Whether to show verbose output
    /// * `labels` - Template header labels
    pub fn new(verbose: bool, labels: TemplateLabels) -> Self {
        Self {
            verbose,
            labels,
            filter: None,
            sort: None,
            catalog_path: None,
        }
    }

    /// Set the initial preview filter
    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter;
        self
    }

    /// Set the initial preview sort
    pub fn with_sort(mut self, sort: Option<SortKey>) -> Self {
        self.sort = sort;
        self
    }

    /// Set the destination catalog file
    pub fn with_catalog(mut self, catalog_path: Option<PathBuf>) -> Self {
        self.catalog_path = catalog_path;
        self
    }

    /// Get the verbose flag
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Get the template labels
    pub fn labels(&self) -> &TemplateLabels {
        &self.labels
    }

    /// Get the initial preview filter
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Get the initial preview sort
    pub fn sort(&self) -> Option<SortKey> {
        self.sort
    }

    /// Get the destination catalog file
    pub fn catalog_path(&self) -> Option<&Path> {
        self.catalog_path.as_deref()
    }

    /// Apply the configured filter and sort to a fresh preview
    pub fn apply_view(&self, store: &mut PreviewStore) {
        if let Some(filter) = self.filter() {
            store.set_filter(filter);
        }
        if let Some(key) = self.sort {
            store.set_sort(key.field, key.direction);
        }
    }
}
