//! Server configuration
//!
//! All settings can be overridden through environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | WORK_DIR | /var/lib/canteen | working directory (database, logs) |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | SEED_DEMO_MENU | false | seed a demo menu into an empty database |
//! | JWT_SECRET | (generated in dev) | token signing secret |
//! | JWT_EXPIRATION_MINUTES | 1440 | token lifetime |

use std::path::PathBuf;

use crate::auth::JwtConfig;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Seed a demo menu when the menu table is empty
    pub seed_demo_menu: bool,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Fails when the JWT secret is misconfigured, so a broken deployment
    /// stops at startup instead of serving with a bad key.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/canteen".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::from_env()
                .map_err(|e| AppError::internal(format!("JWT configuration failed: {}", e)))?,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            seed_demo_menu: std::env::var("SEED_DEMO_MENU")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        })
    }

    /// Override parts of the configuration, mostly for tests
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> AppResult<Self> {
        let mut config = Self::from_env()?;
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        Ok(config)
    }

    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Create the working directory layout if missing
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
