use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("BTOOLS_ENV", "development"))?;

    let bind_addr = parse_addr("BTOOLS_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("BTOOLS_LOG_LEVEL", "info");
    let catalog = or_default("BTOOLS_CATALOG", "./json/bloggers.json");
    let data_dir = PathBuf::from(or_default("BTOOLS_DATA_DIR", "./data"));
    let api_keys = or_default("BTOOLS_API_KEYS", "")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect();

    let catalog_timeout_secs = parse_u64("BTOOLS_CATALOG_TIMEOUT_SECS", "30")?;
    let catalog_user_agent = or_default("BTOOLS_CATALOG_USER_AGENT", "btools/0.1 (catalog)");
    let catalog_max_retries = parse_u32("BTOOLS_CATALOG_MAX_RETRIES", "3")?;
    let catalog_retry_backoff_ms = parse_u64("BTOOLS_CATALOG_RETRY_BACKOFF_MS", "500")?;

    let saved_searches_max = parse_usize("BTOOLS_SAVED_SEARCHES_MAX", "100")?;
    if saved_searches_max == 0 {
        return Err(invalid(
            "BTOOLS_SAVED_SEARCHES_MAX",
            "must be at least 1".to_string(),
        ));
    }

    let raw_dominance = or_default("BTOOLS_GENDER_DOMINANCE_MIN", "60");
    let gender_dominance_min = raw_dominance
        .parse::<f64>()
        .map_err(|e| invalid("BTOOLS_GENDER_DOMINANCE_MIN", e.to_string()))?;
    if !(0.0..=100.0).contains(&gender_dominance_min) {
        return Err(invalid(
            "BTOOLS_GENDER_DOMINANCE_MIN",
            format!("{raw_dominance} is outside 0..=100"),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        catalog,
        data_dir,
        api_keys,
        catalog_timeout_secs,
        catalog_user_agent,
        catalog_max_retries,
        catalog_retry_backoff_ms,
        saved_searches_max,
        gender_dominance_min,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BTOOLS_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
