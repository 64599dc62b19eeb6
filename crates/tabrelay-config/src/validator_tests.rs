use super::*;
use crate::mapping::MappingParser;

#[test]
fn test_validate_default_config() {
    let config = AppConfig::default();
    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_empty_endpoint() {
    let mut config = AppConfig::default();
    config.browser.endpoint = String::new();

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "browser.endpoint"));
}

#[test]
fn test_validate_non_http_endpoint() {
    let mut config = AppConfig::default();
    config.browser.endpoint = "ws://127.0.0.1:9222".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
}

#[test]
fn test_validate_zero_request_timeout() {
    let mut config = AppConfig::default();
    config.browser.request_timeout_secs = 0;

    let result = ConfigValidator::validate(&config);
    assert!(result
        .errors
        .iter()
        .any(|e| e.path == "browser.request_timeout_secs"));
}

#[test]
fn test_validate_long_settle_delay_warning() {
    let mut config = AppConfig::default();
    config.transfer.settle_delay_ms = 10_000;

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn test_validate_empty_storage_dir() {
    let mut config = AppConfig::default();
    config.storage.dir = "  ".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "storage.dir"));
}

#[test]
fn test_mapping_duplicate_destination_warning() {
    let config = MappingParser::parse(
        "SOURCE_TAB_NAME: A\nDESTINATION_TAB_NAME: B\nSOURCE -> DESTINATION\n1 -> 5\n2 -> 5",
    )
    .unwrap();

    let result = MappingValidator::validate(&config);
    assert!(result.is_valid());
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].path, "mapping.dest.5");
    assert!(result.warnings[0].message.contains("last mapping wins"));
}

#[test]
fn test_mapping_same_tab_names_warning() {
    let config = MappingParser::parse(
        "SOURCE_TAB_NAME: Form\nDESTINATION_TAB_NAME: form\nSOURCE -> DESTINATION\n1 -> 2",
    )
    .unwrap();

    let result = MappingValidator::validate(&config);
    assert!(result.warnings.iter().any(|w| w.path == "mapping.tab_names"));
}

#[test]
fn test_mapping_clean_has_no_warnings() {
    let config = MappingParser::parse(
        "SOURCE_TAB_NAME: A\nDESTINATION_TAB_NAME: B\nSOURCE -> DESTINATION\n1 -> 1\n2 -> 2",
    )
    .unwrap();

    let result = MappingValidator::validate(&config);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validation_error_new() {
    let err = ValidationError::new("browser.endpoint", "must be http");
    assert_eq!(err.path, "browser.endpoint");
    assert_eq!(err.message, "must be http");
}
