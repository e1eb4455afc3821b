use super::*;

fn keyed() -> Config {
    let mut config = Config::default();
    config.providers.gemini.api_key = Some("key".into());
    config
}

#[test]
fn test_validate_default_config() {
    let result = ConfigValidator::validate(&keyed());
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_missing_api_key_is_warning() {
    let result = ConfigValidator::validate(&Config::default());
    assert!(result.is_valid());
    assert!(result
        .warnings
        .iter()
        .any(|w| w.path == "providers.gemini.api_key"));
}

#[test]
fn test_zero_timeout() {
    let mut config = keyed();
    config.http.timeout_secs = 0;
    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "http.timeout_secs"));
}

#[test]
fn test_zero_highlight() {
    let mut config = keyed();
    config.executor.highlight_ms = 0;
    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "executor.highlight_ms"));
}

#[test]
fn test_text_bounds() {
    let mut config = keyed();
    config.extractor.min_text_len = 2000;
    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "extractor.min_text_len"));
}

#[test]
fn test_invalid_base_url() {
    let mut config = keyed();
    config.providers.anthropic.base_url = Some("localhost:9000".into());
    let result = ConfigValidator::validate(&config);
    assert!(result
        .errors
        .iter()
        .any(|e| e.path == "providers.anthropic.base_url"));
}

#[test]
fn test_unknown_selected_profile() {
    let mut config = keyed();
    config.profiles.selected = Some("travel".into());
    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "profiles.selected"));
}
