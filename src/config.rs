use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub db_endpoint: String,
    pub db_username: Option<String>,
    pub db_password: Option<String>,
    pub db_namespace: String,
    pub db_database: String,
    pub jwt_secret: String,
    pub jwt_ttl_minutes: i64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            bind_addr: env_or("CHRONOS_BIND_ADDR", "127.0.0.1:3587"),
            db_endpoint: env_or("CHRONOS_DB_ENDPOINT", "ws://localhost:8050"),
            db_username: env::var("CHRONOS_DB_USERNAME").ok(),
            db_password: env::var("CHRONOS_DB_PASSWORD").ok(),
            db_namespace: env_or("CHRONOS_DB_NAMESPACE", "chronos"),
            db_database: env_or("CHRONOS_DB_DATABASE", "hr"),
            jwt_secret: env_or("CHRONOS_JWT_SECRET", "secret"),
            jwt_ttl_minutes: env_or("CHRONOS_JWT_TTL_MINUTES", "60")
                .parse()
                .unwrap_or(60),
        }
    }

    /// Embedded-engine configuration, used by the test suite and local runs
    /// without a SurrealDB server.
    pub fn in_memory() -> Self {
        Self {
            bind_addr: "127.0.0.1:0".to_string(),
            db_endpoint: "mem://".to_string(),
            db_username: None,
            db_password: None,
            db_namespace: "chronos".to_string(),
            db_database: "hr".to_string(),
            jwt_secret: "test-secret".to_string(),
            jwt_ttl_minutes: 60,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
