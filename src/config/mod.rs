use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub api: ApiConfig,
    pub workspace: WorkspaceConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
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
pub struct ApiConfig {
    pub enable_request_logging: bool,
    pub enable_etag: bool,
    /// Responses whose body is known to exceed this size are sent without an ETag
    pub max_etag_body_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    pub max_sessions: usize,
    pub max_tabs_per_session: usize,
    pub default_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("BOOKING_API_HOST") {
            self.server.host = v;
        }
        if let Some(port) = env::var("BOOKING_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }

        // API overrides
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("API_ENABLE_ETAG") {
            self.api.enable_etag = v.parse().unwrap_or(self.api.enable_etag);
        }
        if let Ok(v) = env::var("API_MAX_ETAG_BODY_BYTES") {
            self.api.max_etag_body_bytes = v.parse().unwrap_or(self.api.max_etag_body_bytes);
        }

        // Workspace overrides
        if let Ok(v) = env::var("WORKSPACE_MAX_SESSIONS") {
            self.workspace.max_sessions = v.parse().unwrap_or(self.workspace.max_sessions);
        }
        if let Ok(v) = env::var("WORKSPACE_MAX_TABS_PER_SESSION") {
            self.workspace.max_tabs_per_session = v.parse().unwrap_or(self.workspace.max_tabs_per_session);
        }
        if let Ok(v) = env::var("WORKSPACE_DEFAULT_PATH") {
            if v.starts_with('/') {
                self.workspace.default_path = v;
            }
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            api: ApiConfig {
                enable_request_logging: true,
                enable_etag: true,
                max_etag_body_bytes: 10 * 1024 * 1024, // 10MB
            },
            workspace: WorkspaceConfig {
                max_sessions: 1000,
                max_tabs_per_session: 20,
                default_path: "/workspace".to_string(),
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
            },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            api: ApiConfig {
                enable_request_logging: true,
                enable_etag: true,
                max_etag_body_bytes: 5 * 1024 * 1024, // 5MB
            },
            workspace: WorkspaceConfig {
                max_sessions: 5000,
                max_tabs_per_session: 20,
                default_path: "/workspace".to_string(),
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            api: ApiConfig {
                enable_request_logging: false,
                enable_etag: true,
                max_etag_body_bytes: 2 * 1024 * 1024, // 2MB
            },
            workspace: WorkspaceConfig {
                max_sessions: 20000,
                max_tabs_per_session: 12,
                default_path: "/workspace".to_string(),
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_development {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Development)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert!(config.api.enable_etag);
        assert!(config.api.enable_request_logging);
        assert_eq!(config.workspace.default_path, "/workspace");
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(!config.api.enable_request_logging);
        assert_eq!(config.api.max_etag_body_bytes, 2 * 1024 * 1024);
        assert!(config.workspace.max_sessions > AppConfig::development().workspace.max_sessions);
    }
}
