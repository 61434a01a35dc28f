use crate::app_config::{AppConfig, Environment};
use crate::locations::DEFAULT_STUB_PLACEHOLDER;
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
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
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

    let database_url = lookup("DATABASE_URL").ok().filter(|v| !v.trim().is_empty());

    let env = parse_environment(&or_default("ANZEIGE_ENV", "development"))?;
    let log_level = or_default("ANZEIGE_LOG_LEVEL", "info");
    let catalog_path = PathBuf::from(or_default(
        "ANZEIGE_CATALOG_PATH",
        "./config/locations.yaml",
    ));

    let fallback_year = or_default("ANZEIGE_FALLBACK_YEAR", "2025")
        .parse::<i32>()
        .map_err(|e| invalid("ANZEIGE_FALLBACK_YEAR", e.to_string()))?;
    if !(1900..=9999).contains(&fallback_year) {
        return Err(invalid(
            "ANZEIGE_FALLBACK_YEAR",
            format!("{fallback_year} is not a four-digit year"),
        ));
    }

    let fuzzy_threshold = or_default("ANZEIGE_FUZZY_THRESHOLD", "0.6")
        .parse::<f64>()
        .map_err(|e| invalid("ANZEIGE_FUZZY_THRESHOLD", e.to_string()))?;
    if !(0.0..=1.0).contains(&fuzzy_threshold) {
        return Err(invalid(
            "ANZEIGE_FUZZY_THRESHOLD",
            format!("{fuzzy_threshold} is outside [0, 1]"),
        ));
    }

    let stub_placeholder = or_default("ANZEIGE_STUB_PLACEHOLDER", DEFAULT_STUB_PLACEHOLDER);
    if stub_placeholder.trim().is_empty() {
        return Err(invalid(
            "ANZEIGE_STUB_PLACEHOLDER",
            "must not be blank".to_string(),
        ));
    }

    let db_max_connections = parse_u32("ANZEIGE_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("ANZEIGE_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("ANZEIGE_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        database_url,
        env,
        log_level,
        catalog_path,
        fallback_year,
        fuzzy_threshold,
        stub_placeholder,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ANZEIGE_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
