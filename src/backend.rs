use mongodb::bson::Document;

use crate::error::Result;
use crate::types::ServerAddress;

/// Asynchronous driver abstraction used by [`AdminService`](crate::AdminService).
///
/// This is the whole command/query surface the admin operations need from a
/// pre-connected client. `ServerClient` implements it over the official
/// driver; tests provide in-memory implementations.
#[async_trait::async_trait]
pub trait MongoBackend: Send + Sync {
    /// Handle for a single database, as returned by [`MongoBackend::database`].
    type Database: Clone + Send + Sync + 'static;

    /// Names of all databases on the deployment.
    async fn list_database_names(&self) -> Result<Vec<String>>;

    /// Obtain a handle for `name`. Does not touch the server.
    fn database(&self, name: &str) -> Self::Database;

    async fn drop_database(&self, name: &str) -> Result<()>;

    async fn create_collection(&self, database: &Self::Database, name: &str) -> Result<()>;

    async fn insert_document(
        &self,
        database: &Self::Database,
        collection: &str,
        document: Document,
    ) -> Result<()>;

    /// Run a command against `database` and return the raw reply.
    async fn run_command(&self, database: &Self::Database, command: Document) -> Result<Document>;

    /// Server addresses currently known to the client, in client order.
    fn server_addresses(&self) -> Vec<ServerAddress>;

    /// Return a short mode string (e.g., "server", "memory") for logging.
    fn mode(&self) -> &'static str;
}
