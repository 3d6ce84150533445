use serde::Deserialize;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct Settings {
    pub environment: Environment,
    pub log_level: String,
    pub server: ServerSettings,
    pub jwt: JwtSettings,
    pub storage: StorageSettings,
    /// Seed the store with the four demo department accounts at startup.
    pub seed_demo: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Prod,
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            other => Err(format!("unknown environment '{}', expected dev or prod", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct JwtSettings {
    /// Process-wide HS256 signing secret for session credentials.
    pub secret: String,
    /// Session credential lifetime, in hours from issuance.
    pub session_ttl_hours: i64,
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub upload_dir: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        let env_str = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string());
        let environment: Environment = env_str
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let is_prod = environment == Environment::Prod;

        Ok(Settings {
            environment,
            log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
            server: ServerSettings {
                host: get_env("SERVER_HOST", Some("0.0.0.0"), is_prod)?,
                port: get_env("SERVER_PORT", Some("8080"), is_prod)?
                    .parse()
                    .map_err(|e| {
                        AppError::ConfigError(anyhow::anyhow!("invalid SERVER_PORT: {}", e))
                    })?,
            },
            jwt: JwtSettings {
                secret: get_env("JWT_SECRET", Some("dev_only_signing_secret"), is_prod)?,
                session_ttl_hours: get_env("SESSION_TTL_HOURS", Some("24"), is_prod)?
                    .parse()
                    .map_err(|e| {
                        AppError::ConfigError(anyhow::anyhow!("invalid SESSION_TTL_HOURS: {}", e))
                    })?,
            },
            storage: StorageSettings {
                upload_dir: get_env("UPLOAD_DIR", Some("uploads"), is_prod)?,
            },
            seed_demo: get_env("SEED_DEMO", Some("false"), is_prod)? == "true",
        })
    }
}

/// Read an environment variable, falling back to `default` outside prod.
/// In prod every key must be set explicitly.
fn get_env(name: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(name) {
        Ok(value) => Ok(value),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "missing required environment variable {} in prod",
                    name
                )))
            } else {
                default.map(str::to_string).ok_or_else(|| {
                    AppError::ConfigError(anyhow::anyhow!(
                        "missing environment variable {} with no default",
                        name
                    ))
                })
            }
        }
    }
}
