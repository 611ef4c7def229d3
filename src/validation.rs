//! Validation errors and helpers for records.
//!
//! Records report failed checks as a list of [`ValidationError`]s. A batch
//! validation over a model collection can gather every failing record into
//! an [`ErrorCollector`] for reporting.
//!
//! # Example
//!
//! ```ignore
//! use ironseq::validation::*;
//!
//! let checks = combine_validations(vec![
//!     validators::not_empty("name", name),
//!     validators::min_length("name", name, 3),
//!     validators::in_range("age", age, 0, 150),
//! ]);
//! if let Err(errors) = checks {
//!     collector.add_error(Some("7".into()), errors);
//! }
//! ```

use serde::Serialize;
use std::fmt;

/// Result type for validation checks.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A single validation error with context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// The field that failed validation (optional)
    pub field: Option<String>,
    /// Human-readable error message
    pub message: String,
    /// Error code for categorization (optional)
    pub code: Option<String>,
}

impl ValidationError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            field: None,
            message: message.into(),
            code: None,
        }
    }

    /// Create a validation error for a specific field.
    pub fn field<S: Into<String>, M: Into<String>>(field: S, message: M) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code<S: Into<String>>(mut self, code: S) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref field) = self.field {
            write!(f, "[{}] {}", field, self.message)?;
        } else {
            write!(f, "{}", self.message)?;
        }
        if let Some(ref code) = self.code {
            write!(f, " (code: {})", code)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Collects validation errors of many records.
#[derive(Debug, Clone, Default)]
pub struct ErrorCollector {
    errors: Vec<RecordError>,
}

/// The validation errors of one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordError {
    /// Key of the record inside its collection
    pub record_id: Option<String>,
    pub errors: Vec<ValidationError>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, record_id: Option<String>, errors: Vec<ValidationError>) {
        self.errors.push(RecordError { record_id, errors });
    }

    /// Number of failed records.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[RecordError] {
        &self.errors
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Emit one warning event per failed record.
    pub fn log_errors(&self) {
        for (idx, record_err) in self.errors.iter().enumerate() {
            let record = record_err
                .record_id
                .clone()
                .unwrap_or_else(|| format!("#{idx}"));
            tracing::warn!(record = %record, errors = %format_errors(&record_err.errors), "record failed validation");
        }
    }

    /// Export errors to JSON format.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.errors)
    }
}

impl fmt::Display for ErrorCollector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ErrorCollector({} errors)", self.error_count())
    }
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validation helpers for common field checks.
pub mod validators {
    use super::{ValidationError, ValidationResult};
    use std::fmt;

    pub fn not_empty(field: &str, value: &str) -> ValidationResult {
        if value.is_empty() {
            Err(vec![ValidationError::field(field, "must not be empty")])
        } else {
            Ok(())
        }
    }

    /// Inclusive range check.
    pub fn in_range<T: PartialOrd + fmt::Display>(
        field: &str,
        value: T,
        min: T,
        max: T,
    ) -> ValidationResult {
        if value >= min && value <= max {
            Ok(())
        } else {
            Err(vec![ValidationError::field(
                field,
                format!("must be between {} and {}", min, max),
            )])
        }
    }

    /// Minimum length in characters.
    pub fn min_length(field: &str, value: &str, min: usize) -> ValidationResult {
        if value.chars().count() >= min {
            Ok(())
        } else {
            Err(vec![ValidationError::field(
                field,
                format!("must have at least {} characters", min),
            )])
        }
    }

    /// Maximum length in characters.
    pub fn max_length(field: &str, value: &str, max: usize) -> ValidationResult {
        if value.chars().count() <= max {
            Ok(())
        } else {
            Err(vec![ValidationError::field(
                field,
                format!("must have at most {} characters", max),
            )])
        }
    }
}

/// Combine multiple validation results.
pub fn combine_validations(results: Vec<ValidationResult>) -> ValidationResult {
    let mut all_errors = Vec::new();
    for result in results {
        if let Err(mut errors) = result {
            all_errors.append(&mut errors);
        }
    }
    if all_errors.is_empty() {
        Ok(())
    } else {
        Err(all_errors)
    }
}
