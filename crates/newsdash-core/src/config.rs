use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
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
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can pass a plain map.
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

    let env = parse_environment(&or_default("NEWSDASH_ENV", "development"));
    let bind_addr = parse_addr("NEWSDASH_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("NEWSDASH_LOG_LEVEL", "info");

    let backend_url = or_default("NEWSDASH_BACKEND_URL", "http://localhost:8002");
    if !(backend_url.starts_with("http://") || backend_url.starts_with("https://")) {
        return Err(invalid(
            "NEWSDASH_BACKEND_URL",
            format!("'{backend_url}' must start with http:// or https://"),
        ));
    }

    let backend_timeout_secs = parse_u64("NEWSDASH_BACKEND_TIMEOUT_SECS", "15")?;
    if backend_timeout_secs == 0 {
        return Err(invalid(
            "NEWSDASH_BACKEND_TIMEOUT_SECS",
            "timeout must be at least 1 second".to_string(),
        ));
    }

    let sessions_path = PathBuf::from(or_default(
        "NEWSDASH_SESSIONS_PATH",
        "./config/sessions.yaml",
    ));
    let rate_limit_per_minute = parse_usize("NEWSDASH_RATE_LIMIT_PER_MINUTE", "120")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        backend_url,
        backend_timeout_secs,
        sessions_path,
        rate_limit_per_minute,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
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
    fn parse_environment_known_values() {
        assert_eq!(parse_environment("production"), Environment::Production);
        assert_eq!(parse_environment("test"), Environment::Test);
        assert_eq!(parse_environment("development"), Environment::Development);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn build_app_config_uses_defaults() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).expect("defaults are valid");
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.backend_url, "http://localhost:8002");
        assert_eq!(cfg.backend_timeout_secs, 15);
        assert_eq!(cfg.sessions_path.to_str(), Some("./config/sessions.yaml"));
        assert_eq!(cfg.rate_limit_per_minute, 120);
        assert!(cfg.is_development());
    }

    #[test]
    fn build_app_config_applies_overrides() {
        let mut map = HashMap::new();
        map.insert("NEWSDASH_ENV", "production");
        map.insert("NEWSDASH_BACKEND_URL", "https://analytics.internal:8443");
        map.insert("NEWSDASH_BACKEND_TIMEOUT_SECS", "10");
        map.insert("NEWSDASH_RATE_LIMIT_PER_MINUTE", "30");
        let cfg = build_app_config(lookup_from_map(&map)).expect("valid overrides");
        assert_eq!(cfg.env, Environment::Production);
        assert_eq!(cfg.backend_url, "https://analytics.internal:8443");
        assert_eq!(cfg.backend_timeout_secs, 10);
        assert_eq!(cfg.rate_limit_per_minute, 30);
        assert!(!cfg.is_development());
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map = HashMap::new();
        map.insert("NEWSDASH_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEWSDASH_BIND_ADDR"),
            "expected InvalidEnvVar(NEWSDASH_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_non_http_backend_url() {
        let mut map = HashMap::new();
        map.insert("NEWSDASH_BACKEND_URL", "localhost:8002");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEWSDASH_BACKEND_URL"),
            "expected InvalidEnvVar(NEWSDASH_BACKEND_URL), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_zero_timeout() {
        let mut map = HashMap::new();
        map.insert("NEWSDASH_BACKEND_TIMEOUT_SECS", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEWSDASH_BACKEND_TIMEOUT_SECS"),
            "expected InvalidEnvVar(NEWSDASH_BACKEND_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_non_numeric_rate_limit() {
        let mut map = HashMap::new();
        map.insert("NEWSDASH_RATE_LIMIT_PER_MINUTE", "lots");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEWSDASH_RATE_LIMIT_PER_MINUTE"),
            "expected InvalidEnvVar(NEWSDASH_RATE_LIMIT_PER_MINUTE), got: {result:?}"
        );
    }
}
