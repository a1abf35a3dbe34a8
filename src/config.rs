use std::env;
use std::time::Duration;

use crate::error::{AdminError, Result};
use crate::types::ServerAddress;

/// Authentication database used when none is configured.
pub const DEFAULT_AUTH_SOURCE: &str = "admin";

/// Connection configuration for the MongoDB deployment being administered.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub hosts: Vec<ServerAddress>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub auth_source: String,
    pub app_name: Option<String>,
    pub max_pool_size: u32,
    pub server_selection_timeout: Duration,
}

impl ServerConfig {
    /// Build configuration from environment variables:
    /// `MONGODB_HOSTS` (comma-separated `host[:port]`), `MONGODB_USER`,
    /// `MONGODB_PASSWORD`, `MONGODB_AUTH_SOURCE` (default `admin`),
    /// `MONGODB_APP_NAME`, `MONGODB_MAX_POOL_SIZE` (default 5) and
    /// `MONGODB_SERVER_SELECTION_TIMEOUT_MS` (default 30000).
    pub fn from_env() -> Result<Self> {
        let hosts = parse_hosts(&require_env("MONGODB_HOSTS")?)?;
        let user = env::var("MONGODB_USER").ok();
        let password = env::var("MONGODB_PASSWORD").ok();
        let auth_source =
            env::var("MONGODB_AUTH_SOURCE").unwrap_or_else(|_| DEFAULT_AUTH_SOURCE.to_string());
        let app_name = env::var("MONGODB_APP_NAME").ok();
        let max_pool_size = parse_env("MONGODB_MAX_POOL_SIZE").unwrap_or(5);
        let timeout_ms = parse_env("MONGODB_SERVER_SELECTION_TIMEOUT_MS").unwrap_or(30_000);

        let config = Self {
            hosts,
            user,
            password,
            auth_source,
            app_name,
            max_pool_size,
            server_selection_timeout: Duration::from_millis(timeout_ms),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that cannot be expressed in the field types.
    pub fn validate(&self) -> Result<()> {
        if self.hosts.is_empty() {
            return Err(AdminError::Config("at least one host is required".into()));
        }
        if self.user.is_some() != self.password.is_some() {
            return Err(AdminError::Config(
                "user and password must be set together".into(),
            ));
        }
        if self.max_pool_size == 0 {
            return Err(AdminError::Config("max_pool_size must be positive".into()));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            hosts: vec![ServerAddress::new("127.0.0.1", crate::types::DEFAULT_PORT)],
            user: None,
            password: None,
            auth_source: DEFAULT_AUTH_SOURCE.to_string(),
            app_name: None,
            max_pool_size: 5,
            server_selection_timeout: Duration::from_secs(30),
        }
    }
}

/// Parse a comma-separated `host[:port]` list, skipping empty entries.
pub fn parse_hosts(raw: &str) -> Result<Vec<ServerAddress>> {
    let hosts = raw
        .split(',')
        .filter(|entry| !entry.trim().is_empty())
        .map(str::parse)
        .collect::<Result<Vec<ServerAddress>>>()?;
    if hosts.is_empty() {
        return Err(AdminError::Config(format!("no hosts in {raw:?}")));
    }
    Ok(hosts)
}

fn require_env(key: &str) -> Result<String> {
    env::var(key).map_err(|_| AdminError::Config(format!("missing env: {key}")))
}

fn parse_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}
