use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::telemetry::LogFormat;
use crate::workflows::shortlist::{SettingsError, ShortlistSettings};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub shortlist: ShortlistSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let format = match env::var("APP_LOG_FORMAT") {
            Ok(raw) => raw
                .parse::<LogFormat>()
                .map_err(|_| ConfigError::InvalidValue {
                    variable: "APP_LOG_FORMAT",
                    value: raw,
                })?,
            Err(_) => LogFormat::default(),
        };

        let shortlist = load_shortlist_settings()?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level, format },
            shortlist,
        })
    }
}

fn load_shortlist_settings() -> Result<ShortlistSettings, ConfigError> {
    let defaults = ShortlistSettings::default();

    let skill_keywords = match env::var("SHORTLIST_KEYWORDS") {
        Ok(raw) => split_list(&raw),
        Err(_) => defaults.skill_keywords.clone(),
    };

    let settings = ShortlistSettings {
        skill_weight: parse_var("SHORTLIST_SKILL_WEIGHT", defaults.skill_weight)?,
        experience_weight: parse_var("SHORTLIST_EXPERIENCE_WEIGHT", defaults.experience_weight)?,
        top_n: parse_var("SHORTLIST_TOP_N", defaults.top_n)?,
        reference_year: parse_var("SHORTLIST_REFERENCE_YEAR", defaults.reference_year)?,
        skill_keywords,
        ..defaults
    };

    settings.validate()?;
    Ok(settings)
}

fn parse_var<T: FromStr>(variable: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(variable) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue { variable, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Splits a comma separated list, dropping blank entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Log filter and output shape.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidValue { variable: &'static str, value: String },
    Shortlist(SettingsError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidValue { variable, value } => {
                write!(f, "{variable} has an invalid value '{value}'")
            }
            ConfigError::Shortlist(err) => write!(f, "invalid shortlist defaults: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidValue { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::Shortlist(err) => Some(err),
        }
    }
}

impl From<SettingsError> for ConfigError {
    fn from(value: SettingsError) -> Self {
        Self::Shortlist(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for variable in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_LOG_FORMAT",
            "SHORTLIST_SKILL_WEIGHT",
            "SHORTLIST_EXPERIENCE_WEIGHT",
            "SHORTLIST_TOP_N",
            "SHORTLIST_KEYWORDS",
            "SHORTLIST_REFERENCE_YEAR",
        ] {
            env::remove_var(variable);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.telemetry.format, LogFormat::Compact);
        assert_eq!(config.shortlist, ShortlistSettings::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_shortlist_overrides_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SHORTLIST_SKILL_WEIGHT", "0.8");
        env::set_var("SHORTLIST_TOP_N", "10");
        env::set_var("SHORTLIST_KEYWORDS", "rust, go,, kafka");
        env::set_var("SHORTLIST_REFERENCE_YEAR", "2030");

        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.shortlist.skill_weight, 0.8);
        assert_eq!(config.shortlist.experience_weight, 0.4);
        assert_eq!(config.shortlist.top_n, 10);
        assert_eq!(config.shortlist.skill_keywords, vec!["rust", "go", "kafka"]);
        assert_eq!(config.shortlist.reference_year, 2030);
    }

    #[test]
    fn rejects_unparseable_and_invalid_shortlist_values() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SHORTLIST_TOP_N", "many");
        let error = AppConfig::load().expect_err("top_n must be numeric");
        assert!(matches!(
            error,
            ConfigError::InvalidValue {
                variable: "SHORTLIST_TOP_N",
                ..
            }
        ));

        reset_env();
        env::set_var("SHORTLIST_EXPERIENCE_WEIGHT", "-1");
        let error = AppConfig::load().expect_err("negative weight rejected");
        reset_env();
        assert!(matches!(error, ConfigError::Shortlist(_)));
    }
}
