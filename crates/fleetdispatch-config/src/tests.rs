//! Tests for dispatch configuration.

use std::time::Duration;

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        solve_time_limit_ms = 5000
        max_relaxation_attempts = 4
        relaxation_growth = 1.5
    "#;

    let config = DispatchConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.solve_time_limit_ms, 5000);
    assert_eq!(config.max_relaxation_attempts, 4);
    assert_eq!(config.relaxation_growth, 1.5);
    assert_eq!(config.solve_time_limit(), Duration::from_secs(5));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        solve_time_limit_ms: 2500
        max_relaxation_attempts: 6
    "#;

    let config = DispatchConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.solve_time_limit_ms, 2500);
    assert_eq!(config.max_relaxation_attempts, 6);
    // Unspecified fields fall back to defaults.
    assert_eq!(config.relaxation_growth, 2.0);
}

#[test]
fn test_defaults() {
    let config = DispatchConfig::default();
    assert_eq!(config.solve_time_limit(), Duration::from_secs(20));
    assert_eq!(config.max_relaxation_attempts, 8);
    assert_eq!(config.relaxation_growth, 2.0);

    let empty = DispatchConfig::from_toml_str("").unwrap();
    assert_eq!(empty, config);
}

#[test]
fn test_invalid_time_limit() {
    let err = DispatchConfig::from_toml_str("solve_time_limit_ms = 0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_invalid_relaxation_bounds() {
    let err = DispatchConfig::from_toml_str("max_relaxation_attempts = 0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = DispatchConfig::from_toml_str("relaxation_growth = 1.0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = DispatchConfig::from_toml_str("relaxation_growth = 0.5").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_unknown_field_rejected() {
    let err = DispatchConfig::from_toml_str("warm_start = true").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn test_missing_file() {
    let err = DispatchConfig::load("/nonexistent/dispatch.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
