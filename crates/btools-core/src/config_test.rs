use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "BTOOLS_ENV"));
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.catalog, "./json/bloggers.json");
    assert_eq!(cfg.data_dir, std::path::PathBuf::from("./data"));
    assert!(cfg.api_keys.is_empty());
    assert_eq!(cfg.catalog_timeout_secs, 30);
    assert_eq!(cfg.catalog_user_agent, "btools/0.1 (catalog)");
    assert_eq!(cfg.catalog_max_retries, 3);
    assert_eq!(cfg.catalog_retry_backoff_ms, 500);
    assert_eq!(cfg.saved_searches_max, 100);
    assert!((cfg.gender_dominance_min - 60.0).abs() < f64::EPSILON);
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("BTOOLS_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BTOOLS_BIND_ADDR"),
        "expected InvalidEnvVar(BTOOLS_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_splits_api_keys() {
    let mut map = HashMap::new();
    map.insert("BTOOLS_API_KEYS", " alpha, ,beta ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_keys, vec!["alpha".to_string(), "beta".to_string()]);
}

#[test]
fn debug_output_redacts_api_keys() {
    let mut map = HashMap::new();
    map.insert("BTOOLS_API_KEYS", "super-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("1 redacted"));
}

#[test]
fn catalog_timeout_override() {
    let mut map = HashMap::new();
    map.insert("BTOOLS_CATALOG_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.catalog_timeout_secs, 5);
}

#[test]
fn catalog_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("BTOOLS_CATALOG_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BTOOLS_CATALOG_TIMEOUT_SECS"),
        "expected InvalidEnvVar(BTOOLS_CATALOG_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn catalog_max_retries_invalid() {
    let mut map = HashMap::new();
    map.insert("BTOOLS_CATALOG_MAX_RETRIES", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BTOOLS_CATALOG_MAX_RETRIES"),
        "expected InvalidEnvVar(BTOOLS_CATALOG_MAX_RETRIES), got: {result:?}"
    );
}

#[test]
fn saved_searches_max_rejects_zero() {
    let mut map = HashMap::new();
    map.insert("BTOOLS_SAVED_SEARCHES_MAX", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BTOOLS_SAVED_SEARCHES_MAX"),
        "expected InvalidEnvVar(BTOOLS_SAVED_SEARCHES_MAX), got: {result:?}"
    );
}

#[test]
fn gender_dominance_override() {
    let mut map = HashMap::new();
    map.insert("BTOOLS_GENDER_DOMINANCE_MIN", "55.5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!((cfg.gender_dominance_min - 55.5).abs() < f64::EPSILON);
}

#[test]
fn gender_dominance_out_of_range() {
    let mut map = HashMap::new();
    map.insert("BTOOLS_GENDER_DOMINANCE_MIN", "140");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BTOOLS_GENDER_DOMINANCE_MIN"),
        "expected InvalidEnvVar(BTOOLS_GENDER_DOMINANCE_MIN), got: {result:?}"
    );
}
