//! Data source configuration.
//!
//! Every field has a default, so an empty document is a valid configuration.
//!
//! ```
//! use horizon_collection::config::DataSourceConfig;
//! use horizon_collection::Size;
//!
//! let config = DataSourceConfig::from_toml_str(r#"
//! default_item_size = { width = 120.0, height = 44.0 }
//! reload_on_reset = false
//! "#).unwrap();
//!
//! assert_eq!(config.default_item_size, Size::new(120.0, 44.0));
//! assert!(!config.reload_on_reset);
//! ```

use horizon_collection_core::{ConfigError, DiagnosticLevel, Result, Size};
use serde::{Deserialize, Serialize};

/// Tunables for a [`CollectionDataSource`](crate::view::CollectionDataSource).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataSourceConfig {
    /// Size reported for an existing item when no item size handler is set.
    pub default_item_size: Size,
    /// Size reported for an existing header or footer when no size handler
    /// is set.
    pub default_supplementary_size: Size,
    /// Whether `reset` tells the widget to reload everything.
    pub reload_on_reset: bool,
    /// Minimum level recorded by the default diagnostic sink.
    pub diagnostic_level: DiagnosticLevel,
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            default_item_size: Size::new(50.0, 50.0),
            default_supplementary_size: Size::ZERO,
            reload_on_reset: true,
            diagnostic_level: DiagnosticLevel::Debug,
        }
    }
}

impl DataSourceConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys, and
    /// [`ConfigError::InvalidValue`] for negative or non-finite sizes.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        horizon_collection_core::collection_debug!(?config, "loaded data source configuration");
        Ok(config)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.default_item_size.is_valid() {
            return Err(ConfigError::invalid_value(
                "default_item_size",
                format!("{:?} must be finite and non-negative", self.default_item_size),
            ));
        }
        if !self.default_supplementary_size.is_valid() {
            return Err(ConfigError::invalid_value(
                "default_supplementary_size",
                format!(
                    "{:?} must be finite and non-negative",
                    self.default_supplementary_size
                ),
            ));
        }
        Ok(())
    }

    /// Sets the default item size.
    pub fn with_default_item_size(mut self, size: Size) -> Self {
        self.default_item_size = size;
        self
    }

    /// Sets the default header and footer size.
    pub fn with_default_supplementary_size(mut self, size: Size) -> Self {
        self.default_supplementary_size = size;
        self
    }

    /// Sets whether `reset` reloads the widget.
    pub fn with_reload_on_reset(mut self, reload: bool) -> Self {
        self.reload_on_reset = reload;
        self
    }

    /// Sets the minimum level of the default diagnostic sink.
    pub fn with_diagnostic_level(mut self, level: DiagnosticLevel) -> Self {
        self.diagnostic_level = level;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DataSourceConfig::default();
        assert_eq!(config.default_item_size, Size::new(50.0, 50.0));
        assert_eq!(config.default_supplementary_size, Size::ZERO);
        assert!(config.reload_on_reset);
        assert_eq!(config.diagnostic_level, DiagnosticLevel::Debug);
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = DataSourceConfig::from_toml_str("").unwrap();
        assert_eq!(config, DataSourceConfig::default());
    }

    #[test]
    fn test_parse_fields() {
        let config = DataSourceConfig::from_toml_str(
            r#"
            default_supplementary_size = { width = 320.0, height = 28.0 }
            diagnostic_level = "warn"
            "#,
        )
        .unwrap();
        assert_eq!(config.default_supplementary_size, Size::new(320.0, 28.0));
        assert_eq!(config.diagnostic_level, DiagnosticLevel::Warn);
        assert_eq!(config.default_item_size, Size::new(50.0, 50.0));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = DataSourceConfig::from_toml_str("cell_padding = 4").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_negative_size_rejected() {
        let err = DataSourceConfig::from_toml_str(
            "default_item_size = { width = -1.0, height = 10.0 }",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "default_item_size",
                ..
            }
        ));
    }

    #[test]
    fn test_builders() {
        let config = DataSourceConfig::default()
            .with_default_item_size(Size::new(10.0, 20.0))
            .with_reload_on_reset(false)
            .with_diagnostic_level(DiagnosticLevel::Trace);
        assert_eq!(config.default_item_size, Size::new(10.0, 20.0));
        assert!(!config.reload_on_reset);
        assert_eq!(config.diagnostic_level, DiagnosticLevel::Trace);
        assert!(config.validate().is_ok());
    }
}
