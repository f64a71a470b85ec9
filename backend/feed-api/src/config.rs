/// Configuration management for the feed API
///
/// Configuration is loaded from environment variables with development
/// defaults; production deployments must set the security-sensitive values
/// explicitly.
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Session validation configuration
    pub auth: AuthConfig,
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

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

/// Session validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret shared with the identity provider (validation only)
    pub session_secret: String,
}

const DEV_SESSION_SECRET: &str = "dev-session-secret";

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let production = app_env.eq_ignore_ascii_case("production");

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("FEED_API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("FEED_API_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            cors: {
                let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
                    Ok(value) => value,
                    Err(_) if production => {
                        return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                    }
                    Err(_) => "http://localhost:3000".to_string(),
                };

                if production && allowed_origins.trim() == "*" {
                    return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
                }

                CorsConfig { allowed_origins }
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/ripple".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(10),
            },
            auth: {
                let session_secret = std::env::var("SESSION_JWT_SECRET")
                    .unwrap_or_else(|_| DEV_SESSION_SECRET.to_string());

                if production
                    && (session_secret.trim().is_empty() || session_secret == DEV_SESSION_SECRET)
                {
                    return Err(
                        "SESSION_JWT_SECRET must be set to a non-default value in production"
                            .to_string(),
                    );
                }

                AuthConfig { session_secret }
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "APP_ENV",
            "FEED_API_HOST",
            "FEED_API_PORT",
            "CORS_ALLOWED_ORIGINS",
            "DATABASE_URL",
            "DATABASE_MAX_CONNECTIONS",
            "SESSION_JWT_SECRET",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_development_defaults() {
        clear_env();

        let config = Config::from_env().expect("defaults should load");
        assert_eq!(config.app.env, "development");
        assert_eq!(config.app.port, 8080);
        assert_eq!(config.cors.allowed_origins, "http://localhost:3000");
        assert_eq!(config.auth.session_secret, DEV_SESSION_SECRET);
    }

    #[test]
    #[serial]
    fn test_production_requires_explicit_values() {
        clear_env();
        std::env::set_var("APP_ENV", "production");

        // Missing CORS origins
        assert!(Config::from_env().is_err());

        // Wildcard CORS rejected
        std::env::set_var("CORS_ALLOWED_ORIGINS", "*");
        assert!(Config::from_env().is_err());

        // Default session secret rejected
        std::env::set_var("CORS_ALLOWED_ORIGINS", "https://ripple.example");
        assert!(Config::from_env().is_err());

        std::env::set_var("SESSION_JWT_SECRET", "a-real-secret");
        let config = Config::from_env().expect("production config should load");
        assert_eq!(config.cors.allowed_origins, "https://ripple.example");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_port_override() {
        clear_env();
        std::env::set_var("FEED_API_PORT", "9090");

        let config = Config::from_env().unwrap();
        assert_eq!(config.app.port, 9090);

        clear_env();
    }
}
