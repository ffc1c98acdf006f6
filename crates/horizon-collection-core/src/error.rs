//! Error types for Horizon Collection.
//!
//! Two families live here:
//!
//! - [`ContractViolation`]: a caller broke a precondition of a store or data
//!   source operation (mismatched parallel arguments, out-of-range section,
//!   update of a missing item). These are programmer errors. Operations never
//!   return them; they are logged and turned into a panic by
//!   [`contract_violation`].
//! - [`ConfigError`]: the only recoverable failure, raised while loading a
//!   configuration.

use std::fmt;

/// A broken precondition of a store or data source operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractViolation {
    /// Two parallel argument lists have different lengths.
    #[error("{operation}: the number of values ({actual}) must match the number of indices ({expected})")]
    LengthMismatch {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A section index is outside `0..sections`.
    #[error("section {section} is out of bounds, number of sections: {sections}")]
    SectionOutOfBounds { section: usize, sections: usize },

    /// An item index is outside the items of an existing section.
    #[error("item {item} is out of bounds in section {section} holding {len} items")]
    ItemOutOfBounds {
        section: usize,
        item: usize,
        len: usize,
    },

    /// An update targeted a coordinate that holds no item.
    #[error("attempting to update non existent item at {0}")]
    MissingItem(CoordinateText),

    /// The operation requires at least one section.
    #[error("{operation}: there are no sections, the store is empty")]
    EmptyStore { operation: &'static str },

    /// A flat index is outside `0..=len` (insertion) or `0..len` (removal).
    #[error("index {index} is out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// A `(section, item)` pair rendered for diagnostics.
///
/// Kept separate from the model's coordinate type so the core crate does not
/// depend on the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateText {
    pub section: usize,
    pub item: usize,
}

impl fmt::Display for CoordinateText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.section, self.item)
    }
}

impl ContractViolation {
    /// Create a length mismatch violation.
    pub fn length_mismatch(operation: &'static str, expected: usize, actual: usize) -> Self {
        Self::LengthMismatch {
            operation,
            expected,
            actual,
        }
    }

    /// Create a section bounds violation.
    pub fn section_out_of_bounds(section: usize, sections: usize) -> Self {
        Self::SectionOutOfBounds { section, sections }
    }

    /// Create a missing item violation.
    pub fn missing_item(section: usize, item: usize) -> Self {
        Self::MissingItem(CoordinateText { section, item })
    }
}

/// Log a contract violation and abort the current operation.
///
/// The violation is recorded at `error` level on the model target before the
/// panic unwinds, so it shows up in traces even when the panic is caught by a
/// test harness.
#[track_caller]
#[cold]
pub fn contract_violation(violation: ContractViolation) -> ! {
    tracing::error!(
        target: crate::logging::targets::MODEL,
        %violation,
        "contract violation"
    );
    panic!("{violation}")
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML source could not be parsed or did not match the schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is not acceptable.
    #[error("invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },
}

impl ConfigError {
    /// Create an invalid value error.
    pub fn invalid_value(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }
}

/// A specialized Result type for Horizon Collection configuration.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_messages() {
        let err = ContractViolation::length_mismatch("insert_items", 2, 3);
        assert_eq!(
            err.to_string(),
            "insert_items: the number of values (3) must match the number of indices (2)"
        );

        let err = ContractViolation::section_out_of_bounds(4, 2);
        assert_eq!(
            err.to_string(),
            "section 4 is out of bounds, number of sections: 2"
        );

        let err = ContractViolation::missing_item(5, 0);
        assert_eq!(
            err.to_string(),
            "attempting to update non existent item at (5, 0)"
        );
    }

    #[test]
    #[should_panic(expected = "there are no sections")]
    fn test_contract_violation_panics() {
        contract_violation(ContractViolation::EmptyStore {
            operation: "coordinate_of_last_item",
        });
    }

    #[test]
    fn test_config_error_from_toml() {
        let err = toml::from_str::<toml::Table>("= nope").unwrap_err();
        let err = ConfigError::from(err);
        assert!(err.to_string().starts_with("failed to parse configuration"));
    }
}
