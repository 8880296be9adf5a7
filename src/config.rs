use anyhow::{bail, Context, Result};
use once_cell::sync::OnceCell;
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: Option<DatabaseConfig>,
    pub app: AppConfig,
    pub quiz: QuizConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub name: String,
    pub environment: Environment,
    pub static_dir: String,
}

#[derive(Debug, Clone, Default)]
pub struct QuizConfig {
    /// Alternative catalog file; the built-in catalog is used when unset
    pub catalog_path: Option<PathBuf>,
    /// Reject submissions with unknown item ids or unanswered items
    pub strict_submissions: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server configuration
        let host = var("SERVER_HOST")
            .unwrap_or_else(|| "0.0.0.0".to_string())
            .parse::<IpAddr>()
            .context("Failed to parse SERVER_HOST")?;

        let port = var("SERVER_PORT")
            .unwrap_or_else(|| "8000".to_string())
            .parse::<u16>()
            .context("Failed to parse SERVER_PORT")?;

        // Database configuration (optional, memory store otherwise)
        let database = match var("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            Some(url) => {
                let max_connections = match var("DATABASE_MAX_CONNECTIONS") {
                    Some(val) => val.parse().context("Failed to parse DATABASE_MAX_CONNECTIONS")?,
                    None => 10,
                };
                let min_connections = match var("DATABASE_MIN_CONNECTIONS") {
                    Some(val) => val.parse().context("Failed to parse DATABASE_MIN_CONNECTIONS")?,
                    None => 1,
                };
                Some(DatabaseConfig {
                    url,
                    max_connections: Some(max_connections),
                    min_connections: Some(min_connections),
                })
            }
            None => None,
        };

        // App configuration
        let environment = var("APP_ENVIRONMENT")
            .map(|val| val.parse::<Environment>())
            .transpose()
            .map_err(anyhow::Error::msg)
            .context("Failed to parse APP_ENVIRONMENT")?
            .unwrap_or_default();

        let name = var("APP_NAME").unwrap_or_else(|| "Loyalty Maturity Assessment".to_string());
        let static_dir = var("STATIC_DIR").unwrap_or_else(|| "static".to_string());

        // Quiz configuration
        let catalog_path = var("QUIZ_CATALOG_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);
        let strict_submissions = match var("QUIZ_STRICT_SUBMISSIONS") {
            Some(val) => parse_flag(&val).context("Failed to parse QUIZ_STRICT_SUBMISSIONS")?,
            None => false,
        };

        Ok(Config {
            server: ServerConfig { host, port },
            database,
            app: AppConfig {
                name,
                environment,
                static_dir,
            },
            quiz: QuizConfig {
                catalog_path,
                strict_submissions,
            },
        })
    }

    pub fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server.host, self.server.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: IpAddr::from([127, 0, 0, 1]),
                port: 8000,
            },
            database: None,
            app: AppConfig {
                name: "Loyalty Maturity Assessment".to_string(),
                environment: Environment::Development,
                static_dir: "static".to_string(),
            },
            quiz: QuizConfig::default(),
        }
    }
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Environment::Production),
            "staging" => Ok(Environment::Staging),
            "development" => Ok(Environment::Development),
            _ => Err(format!("Unknown environment: {}", s)),
        }
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got {:?}", other),
    }
}

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Reads the environment once and keeps the result for the process lifetime
pub fn init() -> Result<&'static Config> {
    CONFIG.get_or_try_init(Config::from_env)
}
