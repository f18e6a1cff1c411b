use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::rating::{CatalogError, QualificationCatalog, ScoringEngine, ScoringVariant};

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
    pub rating: RatingConfig,
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

        let variant_name =
            env::var("RATING_DEFAULT_VARIANT").unwrap_or_else(|_| "yci+".to_string());
        let default_variant = variant_name
            .parse::<ScoringVariant>()
            .map_err(|_| ConfigError::UnknownVariant(variant_name.clone()))?;

        let catalog_path = env::var("RATING_CATALOG_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            rating: RatingConfig {
                default_variant,
                catalog_path,
            },
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Scoring defaults and the optional catalog resource.
#[derive(Debug, Clone)]
pub struct RatingConfig {
    pub default_variant: ScoringVariant,
    pub catalog_path: Option<PathBuf>,
}

impl RatingConfig {
    /// Builds the engine once at startup, reading the catalog resource when configured.
    pub fn build_engine(&self) -> Result<ScoringEngine, ConfigError> {
        let catalog = match &self.catalog_path {
            Some(path) => QualificationCatalog::from_path(path).map_err(|source| {
                ConfigError::Catalog {
                    path: path.clone(),
                    source,
                }
            })?,
            None => QualificationCatalog::standard(),
        };
        Ok(ScoringEngine::new(catalog))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    UnknownVariant(String),
    Catalog { path: PathBuf, source: CatalogError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::UnknownVariant(name) => {
                write!(f, "RATING_DEFAULT_VARIANT '{}' is not a registered variant", name)
            }
            ConfigError::Catalog { path, source } => {
                write!(f, "RATING_CATALOG_PATH {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::UnknownVariant(_) => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::Catalog { source, .. } => Some(source),
        }
    }
}
