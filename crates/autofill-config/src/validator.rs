//! Configuration validation.

use crate::schema::Config;

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

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();
        Self::validate_http(config, &mut result);
        Self::validate_extractor(config, &mut result);
        Self::validate_executor(config, &mut result);
        Self::validate_providers(config, &mut result);
        Self::validate_profiles(config, &mut result);
        result
    }

    fn validate_http(config: &Config, result: &mut ValidationResult) {
        if config.http.timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "http.timeout_secs",
                "timeout_secs must be greater than 0",
            ));
        }
        if config.http.connect_timeout_secs > config.http.timeout_secs {
            result.add_warning(ValidationWarning::new(
                "http.connect_timeout_secs",
                "connect timeout exceeds the request timeout",
            ));
        }
    }

    fn validate_extractor(config: &Config, result: &mut ValidationResult) {
        if config.extractor.min_text_len >= config.extractor.max_text_len {
            result.add_error(ValidationError::new(
                "extractor.min_text_len",
                "min_text_len must be smaller than max_text_len",
            ));
        }
    }

    fn validate_executor(config: &Config, result: &mut ValidationResult) {
        if config.executor.highlight_ms == 0 {
            result.add_error(ValidationError::new(
                "executor.highlight_ms",
                "highlight_ms must be greater than 0",
            ));
        }
    }

    fn validate_providers(config: &Config, result: &mut ValidationResult) {
        let selected = config.providers.get(config.provider);
        if selected.api_key.as_deref().is_none_or(|key| key.trim().is_empty()) {
            result.add_warning(ValidationWarning::new(
                format!("providers.{}.api_key", config.provider),
                "API key is not set, requests will fail unless one is passed on the command line",
            ));
        }

        for kind in autofill_protocols::BackendKind::ALL {
            if let Some(url) = &config.providers.get(kind).base_url {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    result.add_error(ValidationError::new(
                        format!("providers.{}.base_url", kind),
                        "base_url must start with http:// or https://",
                    ));
                }
            }
        }
    }

    fn validate_profiles(config: &Config, result: &mut ValidationResult) {
        if let Some(name) = &config.profiles.selected {
            if !config.profiles.entries.contains_key(name) {
                result.add_warning(ValidationWarning::new(
                    "profiles.selected",
                    format!("Profile '{}' is not defined, using the first entry", name),
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
