use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::matching::{
    LevelScale, WeightPolicy, DEFAULT_PREFERRED_WEIGHT, DEFAULT_REQUIRED_WEIGHT,
};

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
    pub matching: MatchingConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            matching: MatchingConfig::from_env()?,
        })
    }
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

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Scoring knobs: requirement weights, the level scale, and an optional result limit.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchingConfig {
    pub weights: WeightPolicy,
    pub scale: LevelScale,
    pub default_limit: Option<i64>,
}

impl MatchingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let required = env_or("MATCH_REQUIRED_WEIGHT", DEFAULT_REQUIRED_WEIGHT)?;
        let preferred = env_or("MATCH_PREFERRED_WEIGHT", DEFAULT_PREFERRED_WEIGHT)?;
        let weights = WeightPolicy::new(required, preferred).map_err(|_| {
            ConfigError::InvalidWeights {
                required,
                preferred,
            }
        })?;

        let min = env_or("MATCH_LEVEL_MIN", LevelScale::DEFAULT_MIN)?;
        let max = env_or("MATCH_LEVEL_MAX", LevelScale::DEFAULT_MAX)?;
        let scale = LevelScale::new(min, max).ok_or(ConfigError::InvalidLevelScale { min, max })?;

        let default_limit = match env::var("MATCH_DEFAULT_LIMIT") {
            Ok(raw) if !raw.trim().is_empty() => Some(parse_value("MATCH_DEFAULT_LIMIT", &raw)?),
            _ => None,
        };

        Ok(Self {
            weights,
            scale,
            default_limit,
        })
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            weights: WeightPolicy::default(),
            scale: LevelScale::default(),
            default_limit: None,
        }
    }
}

fn env_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidNumber { key })
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { key: &'static str },
    InvalidWeights { required: f64, preferred: f64 },
    InvalidLevelScale { min: u8, max: u8 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key } => write!(f, "{key} must be a number"),
            ConfigError::InvalidWeights {
                required,
                preferred,
            } => write!(
                f,
                "match weights must be finite and non-negative (required {required}, preferred {preferred})"
            ),
            ConfigError::InvalidLevelScale { min, max } => {
                write!(f, "MATCH_LEVEL_MIN ({min}) must not exceed MATCH_LEVEL_MAX ({max})")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
