use std::env;
use std::path::PathBuf;

use thiserror::Error;

use midwifery_assistant_domain::entities::patient::DEFAULT_CYCLE_LENGTH;

/// Errors raised while reading the server configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} has an invalid value: {value}")]
    InvalidValue { key: String, value: String },
}

/// Server settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port the server listens on
    pub port: u16,
    /// Directory holding the SQLite file
    pub data_dir: String,
    /// Cycle length used when a calculator request omits it
    pub default_cycle_length: i32,
    /// Deployment name reported by the health endpoint
    pub environment: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            data_dir: "data".to_string(),
            default_cycle_length: DEFAULT_CYCLE_LENGTH,
            environment: "development".to_string(),
        }
    }
}

impl AppConfig {
    /// Read `PORT`, `DATA_DIR`, `DEFAULT_CYCLE_LENGTH` and `APP_ENV`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            port: parse_or(&lookup, "PORT", defaults.port)?,
            data_dir: lookup("DATA_DIR").unwrap_or(defaults.data_dir),
            default_cycle_length: parse_or(&lookup, "DEFAULT_CYCLE_LENGTH", defaults.default_cycle_length)?,
            environment: lookup("APP_ENV").unwrap_or(defaults.environment),
        })
    }

    /// Default location of the SQLite file
    pub fn sqlite_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("midwifery.db")
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) => value.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.sqlite_path(), PathBuf::from("data").join("midwifery.db"));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("DATA_DIR", "/var/lib/midwifery"),
            ("DEFAULT_CYCLE_LENGTH", "30"),
            ("APP_ENV", "production"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.default_cycle_length, 30);
        assert_eq!(config.environment, "production");
        assert_eq!(config.sqlite_path(), PathBuf::from("/var/lib/midwifery/midwifery.db"));
    }

    #[test]
    fn test_invalid_port() {
        let result = AppConfig::from_lookup(lookup(&[("PORT", "http")]));

        assert_eq!(
            result,
            Err(ConfigError::InvalidValue {
                key: "PORT".to_string(),
                value: "http".to_string(),
            })
        );
    }
}
