use serde::{Deserialize, Serialize};
use std::env;
use std::ops::RangeInclusive;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
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
pub struct DatabaseConfig {
    /// Postgres connection URL. Required to serve, optional for tooling.
    pub url: Option<String>,
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection before giving up
    pub connection_timeout: u64,
    pub enable_query_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub cookie_secure: bool,
    /// Allowed CORS origins. Empty means permissive.
    pub cors_origins: Vec<String>,
    pub password_min_length: usize,
}

/// Accepted session lifetimes, one hour up to a year
pub const JWT_EXPIRY_HOURS: RangeInclusive<u64> = 1..=24 * 365;

impl SecurityConfig {
    /// `jwt_expiry_hours` pulled into [`JWT_EXPIRY_HOURS`], for configs
    /// built by hand rather than through `from_lookup`
    pub fn session_hours(&self) -> u64 {
        self.jwt_expiry_hours.clamp(*JWT_EXPIRY_HOURS.start(), *JWT_EXPIRY_HOURS.end())
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source (the process
    /// environment in production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };
        Self::preset(environment).with_overrides(lookup)
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed = |key: &str, slot: &mut dyn ParseSlot| {
            if let Some(raw) = lookup(key) {
                if !slot.parse_from(raw.trim()) {
                    tracing::warn!("Ignoring unparsable {}={:?}", key, raw);
                }
            }
        };

        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        parsed("PORT", &mut self.server.port);

        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = Some(url).filter(|s| !s.trim().is_empty());
        }
        parsed("DATABASE_MAX_CONNECTIONS", &mut self.database.max_connections);
        parsed("DATABASE_CONNECTION_TIMEOUT", &mut self.database.connection_timeout);
        parsed("DATABASE_ENABLE_QUERY_LOGGING", &mut self.database.enable_query_logging);

        parsed("API_ENABLE_REQUEST_LOGGING", &mut self.api.enable_request_logging);
        parsed("API_MAX_REQUEST_SIZE_BYTES", &mut self.api.max_request_size_bytes);

        if let Some(secret) = lookup("JWT_SECRET") {
            self.security.jwt_secret = secret;
        }
        let preset_expiry = self.security.jwt_expiry_hours;
        parsed("SECURITY_JWT_EXPIRY_HOURS", &mut self.security.jwt_expiry_hours);
        if !JWT_EXPIRY_HOURS.contains(&self.security.jwt_expiry_hours) {
            tracing::warn!(
                "Ignoring SECURITY_JWT_EXPIRY_HOURS={} (allowed {}..={})",
                self.security.jwt_expiry_hours,
                JWT_EXPIRY_HOURS.start(),
                JWT_EXPIRY_HOURS.end()
            );
            self.security.jwt_expiry_hours = preset_expiry;
        }
        parsed("SECURITY_COOKIE_SECURE", &mut self.security.cookie_secure);
        parsed("SECURITY_PASSWORD_MIN_LENGTH", &mut self.security.password_min_length);
        if let Some(origins) = lookup("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect();
        }

        self
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn development() -> Self {
        Self::preset(Environment::Development)
    }

    pub fn production() -> Self {
        Self::preset(Environment::Production)
    }

    /// Defaults per environment. Pools grow and timeouts shrink towards
    /// production; only development logs queries and sends plain cookies.
    fn preset(environment: Environment) -> Self {
        const MB: usize = 1024 * 1024;
        let (max_connections, connection_timeout, body_limit) = match environment {
            Environment::Development => (10, 30, 10 * MB),
            Environment::Staging => (20, 10, 5 * MB),
            Environment::Production => (50, 5, 2 * MB),
        };
        let production = environment == Environment::Production;
        let development = environment == Environment::Development;

        Self {
            environment,
            server: ServerConfig { host: "0.0.0.0".to_string(), port: 3000 },
            database: DatabaseConfig {
                url: None,
                max_connections,
                connection_timeout,
                enable_query_logging: !production,
            },
            api: ApiConfig {
                enable_request_logging: !production,
                max_request_size_bytes: body_limit,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24 * 7,
                cookie_secure: !development,
                cors_origins: Vec::new(),
                password_min_length: 6,
            },
        }
    }
}

/// An override target that keeps its value when the input does not parse
trait ParseSlot {
    fn parse_from(&mut self, raw: &str) -> bool;
}

impl<T: FromStr> ParseSlot for T {
    fn parse_from(&mut self, raw: &str) -> bool {
        match raw.parse() {
            Ok(value) => {
                *self = value;
                true
            }
            Err(_) => false,
        }
    }
}
