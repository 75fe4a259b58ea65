use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Signing secret used when none is configured in development
const DEVELOPMENT_JWT_SECRET: &str = "foodlink-development-secret";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
    pub inventory: InventoryConfig,
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
    #[serde(skip_serializing)]
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub strict_attribute_decoding: bool,
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Window used by the expiring query when the caller gives no positive `days`
    pub default_expiring_days: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source: `APP_ENV` picks the preset,
    /// then individual variables override it
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_overrides(lookup)
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Server overrides
        if let Some(v) = lookup("SERVER_HOST") {
            self.server.host = v;
        }
        override_parsed(&lookup, "PORT", &mut self.server.port);
        override_parsed(&lookup, "FOODLINK_API_PORT", &mut self.server.port);

        // Database overrides
        if let Some(v) = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            self.database.url = Some(v);
        }
        override_parsed(&lookup, "DATABASE_MAX_CONNECTIONS", &mut self.database.max_connections);
        override_parsed(&lookup, "DATABASE_CONNECTION_TIMEOUT", &mut self.database.connection_timeout);
        override_parsed(&lookup, "DATABASE_STRICT_ATTRIBUTES", &mut self.database.strict_attribute_decoding);
        override_parsed(&lookup, "DATABASE_RUN_MIGRATIONS", &mut self.database.run_migrations);

        // API overrides
        override_parsed(&lookup, "API_MAX_REQUEST_SIZE_BYTES", &mut self.api.max_request_size_bytes);

        // Security overrides
        if let Some(v) = lookup("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        override_parsed(&lookup, "SECURITY_JWT_EXPIRY_HOURS", &mut self.security.jwt_expiry_hours);
        override_parsed(&lookup, "SECURITY_ENABLE_CORS", &mut self.security.enable_cors);
        if let Some(v) = lookup("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // Inventory overrides
        override_parsed(
            &lookup,
            "INVENTORY_EXPIRING_DEFAULT_DAYS",
            &mut self.inventory.default_expiring_days,
        );

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
                strict_attribute_decoding: false,
                run_migrations: true,
            },
            api: ApiConfig {
                max_request_size_bytes: 10 * 1024 * 1024, // 10MB
            },
            security: SecurityConfig {
                jwt_secret: DEVELOPMENT_JWT_SECRET.to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
            },
            inventory: InventoryConfig { default_expiring_days: 7 },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 10,
                strict_attribute_decoding: false,
                run_migrations: false,
            },
            api: ApiConfig {
                max_request_size_bytes: 5 * 1024 * 1024, // 5MB
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                enable_cors: true,
                cors_origins: vec!["https://staging.foodlink.app".to_string()],
            },
            inventory: InventoryConfig { default_expiring_days: 7 },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
                strict_attribute_decoding: true,
                run_migrations: false,
            },
            api: ApiConfig {
                max_request_size_bytes: 2 * 1024 * 1024, // 2MB
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 4,
                enable_cors: true,
                cors_origins: vec!["https://app.foodlink.app".to_string()],
            },
            inventory: InventoryConfig { default_expiring_days: 7 },
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

/// Replace `target` when the variable is set and parses; keep the preset otherwise
fn override_parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, target: &mut T) {
    if let Some(parsed) = lookup(key).and_then(|v| v.trim().parse().ok()) {
        *target = parsed;
    }
}
