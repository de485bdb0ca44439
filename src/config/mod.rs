use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub notes_path: PathBuf,
    pub users_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
}

const DEV_JWT_SECRET: &str = "notes-api-development-secret";

impl Environment {
    /// Preset selected by `APP_ENV`; anything unrecognised is development
    fn detect() -> Self {
        match env::var("APP_ENV").unwrap_or_default().to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Development,
        }
    }
}

/// Parsed value of `key`; unset or unparsable values are ignored
fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok()?.trim().parse().ok()
}

impl AppConfig {
    pub fn from_env() -> Self {
        let preset = match Environment::detect() {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        };
        preset.with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server
        if let Ok(host) = env::var("NOTES_HOST") {
            self.server.host = host;
        }
        if let Some(port) = env_parse("NOTES_PORT").or_else(|| env_parse("PORT")) {
            self.server.port = port;
        }

        // Storage
        if let Ok(path) = env::var("NOTES_FILE") {
            self.storage.notes_path = PathBuf::from(path);
        }
        if let Ok(path) = env::var("USERS_FILE") {
            self.storage.users_path = PathBuf::from(path);
        }

        // API
        if let Some(enabled) = env_parse("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = enabled;
        }

        // Security
        if let Some(enabled) = env_parse("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = enabled;
        }
        if let Ok(secret) = env::var("ACCESS_TOKEN_SECRET") {
            self.security.jwt_secret = secret;
        }
        if let Some(hours) = env_parse("JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = hours;
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            storage: StorageConfig {
                notes_path: PathBuf::from("notes.json"),
                users_path: PathBuf::from("users.json"),
            },
            api: ApiConfig {
                enable_request_logging: true,
            },
            security: SecurityConfig {
                enable_cors: true,
                jwt_secret: DEV_JWT_SECRET.to_string(),
                jwt_expiry_hours: 7 * 24,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            storage: StorageConfig {
                notes_path: PathBuf::from("data/notes.json"),
                users_path: PathBuf::from("data/users.json"),
            },
            api: ApiConfig {
                enable_request_logging: true,
            },
            security: SecurityConfig {
                enable_cors: true,
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            storage: StorageConfig {
                notes_path: PathBuf::from("data/notes.json"),
                users_path: PathBuf::from("data/users.json"),
            },
            api: ApiConfig {
                enable_request_logging: false,
            },
            security: SecurityConfig {
                enable_cors: false,
                jwt_secret: String::new(),
                jwt_expiry_hours: 4,
            },
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Process-wide configuration, read from the environment on first access
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}
