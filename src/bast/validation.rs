//! Schema validation for the uploaded manifest.
//!
//! All detected problems are collected and returned together so the form can
//! display the full list at once.

use super::manifest::ManifestTable;

/// Column that must exist for the koli aggregate (case-sensitive).
pub const REQUIRED_QTY_COLUMN: &str = "KOLI QTY";

/// Collection of validation messages in user-facing Indonesian.
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn into_messages(self) -> Vec<String> {
        self.errors
    }
}

/// Check the manifest against the minimal schema.
///
/// An absent or empty table short-circuits with `File kosong.` because the
/// remaining checks are not meaningful; otherwise every rule is evaluated
/// independently. The result is valid iff the error list is empty.
pub fn validate_manifest(table: Option<&ManifestTable>) -> (bool, Vec<String>) {
    let mut errors = ValidationErrors::new();

    let Some(table) = table.filter(|table| !table.is_empty()) else {
        errors.add("File kosong.");
        return (false, errors.into_messages());
    };

    if table.column_index(REQUIRED_QTY_COLUMN).is_none() {
        errors.add("Kolom KOLI QTY wajib ada.");
    }

    let valid = errors.is_empty();
    (valid, errors.into_messages())
}
