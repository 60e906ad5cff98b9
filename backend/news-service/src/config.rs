/// Configuration management for News Service
///
/// All settings come from environment variables (optionally seeded from a
/// `.env` file by `main`). Missing values fall back to development defaults;
/// malformed values are configuration errors.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::services::moderation::{DEFAULT_FORBIDDEN_WORDS, DEFAULT_WARNING};

const DEV_JWT_SECRET: &str = "development-only-session-secret-change-me";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Storage backend selection
    pub storage: StorageConfig,
    /// News listing configuration
    pub news: NewsConfig,
    /// Comment moderation configuration
    pub moderation: ModerationConfig,
    /// Session (login) configuration
    pub session: SessionConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Postgres => write!(f, "postgres"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

/// Storage configuration; PostgreSQL pool tuning lives in `db_pool::DbConfig`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

/// News listing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    /// Maximum number of news items on the home page
    pub count_on_home_page: usize,
}

/// Comment moderation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationConfig {
    /// Banned substrings
    pub forbidden_words: Vec<String>,
    /// Optional file with extra banned substrings, one per line
    pub forbidden_words_file: Option<String>,
    /// Warning returned on the `text` field when a banned word is found
    pub warning: String,
}

/// Session configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub jwt_secret: String,
    pub ttl_hours: i64,
    pub cookie_name: String,
    pub secure_cookie: bool,
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("ttl_hours", &self.ttl_hours)
            .field("cookie_name", &self.cookie_name)
            .field("secure_cookie", &self.secure_cookie)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            app: AppConfig {
                env: "development".to_string(),
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            cors: CorsConfig {
                allowed_origins: "http://localhost:3000".to_string(),
            },
            storage: StorageConfig {
                backend: StorageBackend::Postgres,
            },
            news: NewsConfig {
                count_on_home_page: 10,
            },
            moderation: ModerationConfig {
                forbidden_words: DEFAULT_FORBIDDEN_WORDS
                    .iter()
                    .map(|w| w.to_string())
                    .collect(),
                forbidden_words_file: None,
                warning: DEFAULT_WARNING.to_string(),
            },
            session: SessionConfig {
                jwt_secret: DEV_JWT_SECRET.to_string(),
                ttl_hours: 24,
                cookie_name: "news_session".to_string(),
                secure_cookie: false,
            },
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let defaults = Config::default();
        let app_env = std::env::var("APP_ENV").unwrap_or(defaults.app.env);
        let production = app_env.eq_ignore_ascii_case("production");

        let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
            Ok(value) => value,
            Err(_) if production => {
                return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
            }
            Err(_) => defaults.cors.allowed_origins,
        };
        if production && allowed_origins.trim() == "*" {
            return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
        }

        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(value) => value,
            Err(_) if production => return Err("JWT_SECRET must be set in production".to_string()),
            Err(_) => defaults.session.jwt_secret,
        };

        let count_on_home_page: usize =
            parse_env_or_default("NEWS_COUNT_ON_HOME_PAGE", defaults.news.count_on_home_page)?;
        if count_on_home_page == 0 {
            return Err("NEWS_COUNT_ON_HOME_PAGE must be at least 1".to_string());
        }

        let forbidden_words = match std::env::var("FORBIDDEN_WORDS") {
            Ok(raw) => split_list(&raw),
            Err(_) => defaults.moderation.forbidden_words,
        };

        Ok(Config {
            app: AppConfig {
                env: app_env,
                host: std::env::var("NEWS_SERVICE_HOST").unwrap_or(defaults.app.host),
                port: parse_env_or_default("NEWS_SERVICE_PORT", defaults.app.port)?,
            },
            cors: CorsConfig { allowed_origins },
            storage: StorageConfig {
                backend: parse_env_or_default("STORAGE_BACKEND", defaults.storage.backend)?,
            },
            news: NewsConfig { count_on_home_page },
            moderation: ModerationConfig {
                forbidden_words,
                forbidden_words_file: std::env::var("FORBIDDEN_WORDS_FILE")
                    .ok()
                    .filter(|p| !p.trim().is_empty()),
                warning: std::env::var("FORBIDDEN_WORDS_WARNING")
                    .unwrap_or(defaults.moderation.warning),
            },
            session: SessionConfig {
                jwt_secret,
                ttl_hours: parse_env_or_default("SESSION_TTL_HOURS", defaults.session.ttl_hours)?,
                cookie_name: std::env::var("SESSION_COOKIE_NAME")
                    .unwrap_or(defaults.session.cookie_name),
                secure_cookie: parse_env_or_default("SESSION_COOKIE_SECURE", production)?,
            },
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .trim()
            .parse()
            .map_err(|e| format!("Failed to parse {}='{}': {}", key, val, e)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 13] = [
        "APP_ENV",
        "CORS_ALLOWED_ORIGINS",
        "JWT_SECRET",
        "NEWS_COUNT_ON_HOME_PAGE",
        "FORBIDDEN_WORDS",
        "FORBIDDEN_WORDS_FILE",
        "FORBIDDEN_WORDS_WARNING",
        "NEWS_SERVICE_HOST",
        "NEWS_SERVICE_PORT",
        "STORAGE_BACKEND",
        "SESSION_TTL_HOURS",
        "SESSION_COOKIE_NAME",
        "SESSION_COOKIE_SECURE",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::from_env().unwrap();

        assert_eq!(config.news.count_on_home_page, 10);
        assert_eq!(config.moderation.forbidden_words, vec!["редиска", "негодяй"]);
        assert_eq!(config.moderation.warning, "Не ругайтесь!");
        assert_eq!(config.storage.backend, StorageBackend::Postgres);
        assert_eq!(config.app.port, 8000);
        assert!(!config.session.secure_cookie);
    }

    #[test]
    #[serial]
    fn test_overrides() {
        clear_env();
        std::env::set_var("NEWS_COUNT_ON_HOME_PAGE", "5");
        std::env::set_var("FORBIDDEN_WORDS", " spam , , scam ");
        std::env::set_var("STORAGE_BACKEND", "memory");

        let config = Config::from_env().unwrap();
        assert_eq!(config.news.count_on_home_page, 5);
        assert_eq!(config.moderation.forbidden_words, vec!["spam", "scam"]);
        assert_eq!(config.storage.backend, StorageBackend::Memory);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_malformed_values_are_errors() {
        clear_env();
        std::env::set_var("NEWS_COUNT_ON_HOME_PAGE", "ten");
        assert!(Config::from_env().is_err());

        std::env::set_var("NEWS_COUNT_ON_HOME_PAGE", "0");
        assert!(Config::from_env().is_err());

        clear_env();
        std::env::set_var("STORAGE_BACKEND", "mongo");
        assert!(Config::from_env().is_err());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_production_requires_secrets() {
        clear_env();
        std::env::set_var("APP_ENV", "production");
        std::env::set_var("CORS_ALLOWED_ORIGINS", "https://news.example.com");
        let err = Config::from_env().unwrap_err();
        assert!(err.contains("JWT_SECRET"));

        std::env::set_var("JWT_SECRET", "a-production-secret-of-sufficient-length");
        let config = Config::from_env().unwrap();
        assert!(config.session.secure_cookie);

        std::env::set_var("CORS_ALLOWED_ORIGINS", "*");
        assert!(Config::from_env().is_err());

        clear_env();
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", Config::default());
        assert!(!rendered.contains(DEV_JWT_SECRET));
    }
}
