pub mod app;
pub mod server;
pub mod tracing;

pub use app::AppInfo;

use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Application environment
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Helper to load and parse environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Helper to load and parse environment variable or return error
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Trimmed value of an optional environment variable; unset and blank are both `None`.
pub fn env_optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Load an environment variable and parse it into `T`, falling back to `default`
/// when the variable is unset.
pub fn env_parse_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Boolean flag from the environment. Accepts `1/0`, `true/false`, `yes/no`, `on/off`.
pub fn env_flag(key: &str, default: bool) -> Result<bool, ConfigError> {
    let Ok(raw) = env::var(key) else {
        return Ok(default);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::ParseError {
            key: key.to_string(),
            details: format!("'{}' is not a boolean", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(env.is_development());
            assert!(!env.is_production());
        });
    }

    #[test]
    fn test_environment_production_case_insensitive() {
        for value in ["production", "PRODUCTION", "Production"] {
            temp_env::with_var("APP_ENV", Some(value), || {
                assert_eq!(Environment::from_env(), Environment::Production);
            });
        }
    }

    #[test]
    fn test_environment_unknown_defaults_to_development() {
        temp_env::with_var("APP_ENV", Some("staging"), || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_env_or_default() {
        temp_env::with_var("PASS_IN_TEST_VAR", Some("test_value"), || {
            assert_eq!(env_or_default("PASS_IN_TEST_VAR", "default"), "test_value");
        });
        temp_env::with_var_unset("PASS_IN_TEST_VAR", || {
            assert_eq!(env_or_default("PASS_IN_TEST_VAR", "default"), "default");
        });
    }

    #[test]
    fn test_env_required_missing() {
        temp_env::with_var_unset("PASS_IN_MISSING_REQUIRED", || {
            let err = env_required("PASS_IN_MISSING_REQUIRED").unwrap_err();
            assert!(err.to_string().contains("PASS_IN_MISSING_REQUIRED"));
            assert!(err.to_string().contains("required"));
        });
    }

    #[test]
    fn test_env_optional() {
        temp_env::with_var("PASS_IN_OPTIONAL", Some(" https://pass.in "), || {
            assert_eq!(env_optional("PASS_IN_OPTIONAL").as_deref(), Some("https://pass.in"));
        });
        temp_env::with_var("PASS_IN_OPTIONAL", Some("   "), || {
            assert!(env_optional("PASS_IN_OPTIONAL").is_none());
        });
        temp_env::with_var_unset("PASS_IN_OPTIONAL", || {
            assert!(env_optional("PASS_IN_OPTIONAL").is_none());
        });
    }

    #[test]
    fn test_env_parse_or() {
        temp_env::with_var("PASS_IN_POOL", Some(" 25 "), || {
            assert_eq!(env_parse_or("PASS_IN_POOL", 10u32).unwrap(), 25);
        });
        temp_env::with_var_unset("PASS_IN_POOL", || {
            assert_eq!(env_parse_or("PASS_IN_POOL", 10u32).unwrap(), 10);
        });
        temp_env::with_var("PASS_IN_POOL", Some("lots"), || {
            let err = env_parse_or("PASS_IN_POOL", 10u32).unwrap_err();
            assert!(matches!(err, ConfigError::ParseError { ref key, .. } if key == "PASS_IN_POOL"));
        });
    }

    #[test]
    fn test_env_flag() {
        temp_env::with_var("PASS_IN_FLAG", Some("Yes"), || {
            assert!(env_flag("PASS_IN_FLAG", false).unwrap());
        });
        temp_env::with_var("PASS_IN_FLAG", Some("0"), || {
            assert!(!env_flag("PASS_IN_FLAG", true).unwrap());
        });
        temp_env::with_var_unset("PASS_IN_FLAG", || {
            assert!(env_flag("PASS_IN_FLAG", true).unwrap());
        });
        temp_env::with_var("PASS_IN_FLAG", Some("maybe"), || {
            assert!(env_flag("PASS_IN_FLAG", false).is_err());
        });
    }
}
