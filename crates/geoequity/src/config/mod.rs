use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::scoring::{default_reference_year, InvalidLocation, LocationKey, ScoringSettings};

pub const DEFAULT_CENSUS_BASE_URL: &str = "https://api.census.gov/data";

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
    pub census: CensusConfig,
    pub scoring: ScoringConfig,
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

        let census = CensusConfig {
            base_url: env::var("CENSUS_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_CENSUS_BASE_URL.to_string()),
            timeout: Duration::from_secs(seconds_var("CENSUS_TIMEOUT_SECS", 10)?),
            cache_ttl: Duration::from_secs(seconds_var("CENSUS_CACHE_TTL_SECS", 3600)?),
            offline: flag_var("CENSUS_OFFLINE")?,
        };

        let reference_year = match env::var("EJV_REFERENCE_YEAR") {
            Ok(raw) => raw
                .trim()
                .parse::<i32>()
                .map_err(|_| ConfigError::InvalidReferenceYear { value: raw })?,
            Err(_) => default_reference_year(),
        };
        let default_zip = env::var("EJV_DEFAULT_ZIP").unwrap_or_else(|_| "10001".to_string());
        let default_location = default_zip
            .parse::<LocationKey>()
            .map_err(|source| ConfigError::InvalidDefaultLocation { source })?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            census,
            scoring: ScoringConfig {
                reference_year,
                default_location,
            },
        })
    }
}

fn seconds_var(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidDuration { name }),
        Err(_) => Ok(default),
    }
}

fn flag_var(name: &'static str) -> Result<bool, ConfigError> {
    match env::var(name) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(ConfigError::InvalidFlag { name }),
        },
        Err(_) => Ok(false),
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Census ACS lookups backing the economic context resolver.
#[derive(Debug, Clone)]
pub struct CensusConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub cache_ttl: Duration,
    /// Skip the network entirely and score against the fallback context.
    pub offline: bool,
}

impl Default for CensusConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CENSUS_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            cache_ttl: Duration::from_secs(3600),
            offline: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub reference_year: i32,
    pub default_location: LocationKey,
}

impl ScoringConfig {
    pub fn settings(&self) -> ScoringSettings {
        ScoringSettings::new(self.reference_year, self.default_location.clone())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidDuration { name: &'static str },
    InvalidFlag { name: &'static str },
    InvalidReferenceYear { value: String },
    InvalidDefaultLocation { source: InvalidLocation },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidDuration { name } => {
                write!(f, "{name} must be a whole number of seconds")
            }
            ConfigError::InvalidFlag { name } => write!(f, "{name} must be true or false"),
            ConfigError::InvalidReferenceYear { value } => {
                write!(f, "EJV_REFERENCE_YEAR must be a year, got '{value}'")
            }
            ConfigError::InvalidDefaultLocation { source } => {
                write!(f, "EJV_DEFAULT_ZIP is invalid: {source}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidDefaultLocation { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidDuration { .. }
            | ConfigError::InvalidFlag { .. }
            | ConfigError::InvalidReferenceYear { .. } => None,
        }
    }
}
