use std::sync::Arc;

use mongodb::Database;

use crate::admin::AdminService;
use crate::config::ServerConfig;
use crate::error::{AdminError, Result};
use crate::server::ServerClient;

/// Blocking/synchronous wrapper around [`AdminService`].
///
/// This type is only available when the `sync` feature is enabled. It runs all
/// operations on an internal Tokio runtime using `block_on`.
///
/// Note: do not call these blocking APIs from within an existing Tokio runtime,
/// as that panics. In async contexts, use [`AdminService`] directly instead.
#[derive(Clone)]
pub struct SyncAdminService {
    inner: Arc<Inner>,
}

struct Inner {
    rt: tokio::runtime::Runtime,
    admin: AdminService<ServerClient>,
}

impl SyncAdminService {
    /// Build a synchronous service from a [`ServerConfig`].
    pub fn from_config(config: ServerConfig) -> Result<Self> {
        let rt = runtime()?;
        let client = rt.block_on(ServerClient::from_config(config))?;
        Ok(Self::with_runtime(rt, client))
    }

    /// Build a synchronous service from `MONGODB_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_config(ServerConfig::from_env()?)
    }

    /// Build a synchronous service from a `mongodb://` URI.
    pub fn connect(uri: &str) -> Result<Self> {
        let rt = runtime()?;
        let client = rt.block_on(ServerClient::connect(uri))?;
        Ok(Self::with_runtime(rt, client))
    }

    fn with_runtime(rt: tokio::runtime::Runtime, client: ServerClient) -> Self {
        let admin = AdminService::new(Arc::new(client));
        Self {
            inner: Arc::new(Inner { rt, admin }),
        }
    }

    pub fn database_exists(&self, name: &str) -> Result<bool> {
        self.inner.rt.block_on(self.inner.admin.database_exists(name))
    }

    pub fn delete_database(&self, name: &str) -> Result<()> {
        self.inner.rt.block_on(self.inner.admin.delete_database(name))
    }

    pub fn create_database(&self, name: &str) -> Result<Database> {
        self.inner.rt.block_on(self.inner.admin.create_database(name))
    }

    pub fn create_user(&self, database: &str, username: &str, password: &str) -> Result<()> {
        self.inner
            .rt
            .block_on(self.inner.admin.create_user(database, username, password))
    }

    pub fn delete_user(&self, database: &str, username: &str) -> Result<()> {
        self.inner
            .rt
            .block_on(self.inner.admin.delete_user(database, username))
    }

    pub fn connection_string(&self, database: &str, username: &str, password: &str) -> String {
        self.inner
            .admin
            .connection_string(database, username, password)
    }

    pub fn server_addresses(&self) -> String {
        self.inner.admin.server_addresses()
    }
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().map_err(|e| AdminError::Other(anyhow::Error::new(e)))
}
