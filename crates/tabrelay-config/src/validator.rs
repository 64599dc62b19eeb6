//! Configuration validation.

use tracing::warn;

use crate::mapping::MappingConfig;
use crate::schema::AppConfig;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Emit every warning through `tracing`.
    pub fn log_warnings(&self) {
        for w in &self.warnings {
            warn!(path = %w.path, "{}", w.message);
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Settings file validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the settings file.
    pub fn validate(config: &AppConfig) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_browser(config, &mut result);
        Self::validate_transfer(config, &mut result);
        Self::validate_storage(config, &mut result);

        result
    }

    fn validate_browser(config: &AppConfig, result: &mut ValidationResult) {
        let endpoint = &config.browser.endpoint;
        if endpoint.is_empty() {
            result.add_error(ValidationError::new(
                "browser.endpoint",
                "Endpoint cannot be empty",
            ));
        } else if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            result.add_error(ValidationError::new(
                "browser.endpoint",
                format!("Invalid URL: {}, must start with http:// or https://", endpoint),
            ));
        }

        if config.browser.request_timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "browser.request_timeout_secs",
                "request_timeout_secs must be greater than 0",
            ));
        }
    }

    fn validate_transfer(config: &AppConfig, result: &mut ValidationResult) {
        if config.transfer.settle_delay_ms > 5_000 {
            result.add_warning(ValidationWarning::new(
                "transfer.settle_delay_ms",
                "settle_delay_ms is above 5 seconds, every copy will wait that long",
            ));
        }
    }

    fn validate_storage(config: &AppConfig, result: &mut ValidationResult) {
        if config.storage.dir.trim().is_empty() {
            result.add_error(ValidationError::new(
                "storage.dir",
                "Storage directory cannot be empty",
            ));
        }
    }
}

/// Mapping validator.
///
/// Only produces warnings: anything that parsed is usable.
pub struct MappingValidator;

impl MappingValidator {
    pub fn validate(config: &MappingConfig) -> ValidationResult {
        let mut result = ValidationResult::default();

        for dest in config.duplicate_destinations() {
            result.add_warning(ValidationWarning::new(
                format!("mapping.dest.{}", dest),
                format!(
                    "Destination field {} is mapped more than once; the last mapping wins",
                    dest
                ),
            ));
        }

        if config
            .source_tab_filter()
            .eq_ignore_ascii_case(config.dest_tab_filter())
        {
            result.add_warning(ValidationWarning::new(
                "mapping.tab_names",
                "Source and destination tab names are the same; one tab will match both",
            ));
        }

        result
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
