use std::env::{self, VarError};
use std::fmt;

/// Deployment environment, selected by `APP_ENV`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn from_env() -> Self {
        match env::var("APP_ENV").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime configuration assembled once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub database_url: String,
    pub bind_addr: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, VarError> {
        let environment = Environment::from_env();

        // Development may point at a separate database; production always
        // takes DATABASE_URL
        let database_url = match environment {
            Environment::Development => {
                env::var("DEV_DATABASE_URL").or_else(|_| env::var("DATABASE_URL"))?
            }
            Environment::Production => env::var("DATABASE_URL")?,
        };

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        Ok(AppConfig {
            environment,
            database_url,
            bind_addr,
        })
    }
}
