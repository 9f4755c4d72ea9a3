//! Form feedback types.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Visual level of a field note, ordered least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Form-group CSS class colouring the field.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "has-success",
            Self::Warning => "has-warning",
            Self::Error => "has-error",
        }
    }
}

// ---------------------------------------------------------------------------
// Field notes
// ---------------------------------------------------------------------------

/// A single per-field message.
///
/// Success notes carry an empty message; they only drive the field colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNote {
    pub field: String,
    pub severity: Severity,
    pub message: String,
}

impl FieldNote {
    pub fn success(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            severity: Severity::Success,
            message: String::new(),
        }
    }

    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Aggregated outcome of checking a form snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub notes: Vec<FieldNote>,
}

impl ValidationReport {
    pub fn push(&mut self, note: FieldNote) {
        self.notes.push(note);
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.notes.extend(other.notes);
    }

    /// True when any note blocks submission.
    pub fn is_blocking(&self) -> bool {
        self.notes.iter().any(|note| note.severity == Severity::Error)
    }

    /// All notes attached to one field, in the order they were raised.
    pub fn notes_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldNote> {
        self.notes.iter().filter(move |note| note.field == field)
    }

    /// Severity shown on a field, the worst of its notes.
    pub fn field_severity(&self, field: &str) -> Option<Severity> {
        self.notes_for(field).map(|note| note.severity).max()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
