use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let store = match env_or("ISSUES_STORE", "postgres").as_str() {
            "postgres" => StoreBackend::Postgres,
            "memory" => StoreBackend::Memory,
            other => return Err(format!("Invalid ISSUES_STORE: {other}")),
        };

        let database_url = match store {
            StoreBackend::Postgres => Some(env_required("DATABASE_URL")?),
            StoreBackend::Memory => std::env::var("DATABASE_URL").ok(),
        };

        let db_max_connections: u32 = env_or("ISSUES_DB_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|e| format!("Invalid ISSUES_DB_MAX_CONNECTIONS: {e}"))?;

        let host: IpAddr = env_or("ISSUES_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid ISSUES_HOST: {e}"))?;

        let port: u16 = env_or("ISSUES_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid ISSUES_PORT: {e}"))?;

        let max_body_size: usize = env_or("ISSUES_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid ISSUES_MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("ISSUES_LOG_LEVEL", "info");

        Ok(Config {
            store,
            database_url,
            db_max_connections,
            host,
            port,
            max_body_size,
            log_level,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
