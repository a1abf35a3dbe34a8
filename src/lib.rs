//! Database and user provisioning for MongoDB-backed service brokers.

pub mod admin;
pub mod backend;
pub mod config;
pub mod error;
pub mod server;
#[cfg(feature = "sync")]
pub mod sync;
pub mod topology;
pub mod types;

pub use crate::admin::{AdminApi, AdminService, PLACEHOLDER_COLLECTION, USER_ROLE};
pub use crate::backend::MongoBackend;
pub use crate::config::ServerConfig;
pub use crate::error::{AdminError, Result};
pub use crate::server::{ServerClient, ServerClientBuilder};
#[cfg(feature = "sync")]
pub use crate::sync::SyncAdminService;
pub use crate::types::ServerAddress;
