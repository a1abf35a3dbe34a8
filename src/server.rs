use async_trait::async_trait;
use mongodb::bson::Document;
use mongodb::options::{ClientOptions, Credential};
use mongodb::{Client, Database};
use tracing::debug;

use crate::backend::MongoBackend;
use crate::config::ServerConfig;
use crate::error::{AdminError, Result};
use crate::topology::TopologyTracker;
use crate::types::{DEFAULT_PORT, ServerAddress};

/// Builder for configuring and constructing a [`ServerClient`].
///
/// Mirrors [`ServerConfig`]; every setter is optional and falls back to the
/// defaults of a local, unauthenticated deployment.
pub struct ServerClientBuilder {
    config: ServerConfig,
    hosts_set: bool,
}

/// Pre-connected handle to a MongoDB deployment.
///
/// Owned by the hosting application and shared with the admin service; the
/// admin service never connects or shuts it down. The member list is tracked
/// from the driver's topology events, starting from the seed hosts.
#[derive(Clone, Debug)]
pub struct ServerClient {
    client: Client,
    topology: TopologyTracker,
}

impl ServerClient {
    /// Build a client from a `ServerConfig`.
    pub async fn from_config(config: ServerConfig) -> Result<Self> {
        config.validate()?;
        Self::connect_internal(client_options(&config))
    }

    pub async fn from_env() -> Result<Self> {
        let config = ServerConfig::from_env()?;
        Self::from_config(config).await
    }

    /// Build a client from a `mongodb://` or `mongodb+srv://` URI.
    pub async fn connect(uri: &str) -> Result<Self> {
        let options = ClientOptions::parse(uri)
            .await
            .map_err(|e| AdminError::Config(e.to_string()))?;
        Self::connect_internal(options)
    }

    /// Build a client from options the host application prepared.
    ///
    /// Any `sdam_event_handler` already set on `options` is replaced by the
    /// topology tracker.
    pub fn from_options(options: ClientOptions) -> Result<Self> {
        Self::connect_internal(options)
    }

    pub fn builder() -> ServerClientBuilder {
        ServerClientBuilder::new()
    }

    /// Get the underlying driver client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Hosts the client was seeded with.
    pub fn seed_hosts(&self) -> &[ServerAddress] {
        self.topology.seeds()
    }

    fn connect_internal(mut options: ClientOptions) -> Result<Self> {
        let topology = TopologyTracker::new(options.hosts.iter().map(ServerAddress::from).collect());
        options.sdam_event_handler = Some(topology.event_handler());
        let client =
            Client::with_options(options).map_err(|e| AdminError::Connection(e.to_string()))?;
        Ok(Self { client, topology })
    }
}

fn client_options(config: &ServerConfig) -> ClientOptions {
    let mut options = ClientOptions::default();
    options.hosts = config.hosts.iter().map(Into::into).collect();
    options.app_name = config.app_name.clone();
    options.max_pool_size = Some(config.max_pool_size);
    options.server_selection_timeout = Some(config.server_selection_timeout);

    if let (Some(user), Some(password)) = (&config.user, &config.password) {
        let mut credential = Credential::default();
        credential.username = Some(user.clone());
        credential.password = Some(password.clone());
        credential.source = Some(config.auth_source.clone());
        options.credential = Some(credential);
    }
    options
}

#[async_trait]
impl MongoBackend for ServerClient {
    type Database = Database;

    async fn list_database_names(&self) -> Result<Vec<String>> {
        Ok(self.client.list_database_names().await?)
    }

    fn database(&self, name: &str) -> Database {
        self.client.database(name)
    }

    async fn drop_database(&self, name: &str) -> Result<()> {
        self.client.database(name).drop().await?;
        Ok(())
    }

    async fn create_collection(&self, database: &Database, name: &str) -> Result<()> {
        database.create_collection(name).await?;
        Ok(())
    }

    async fn insert_document(
        &self,
        database: &Database,
        collection: &str,
        document: Document,
    ) -> Result<()> {
        let result = database
            .collection::<Document>(collection)
            .insert_one(document)
            .await?;
        debug!(database = %database.name(), collection, id = %result.inserted_id, "inserted document");
        Ok(())
    }

    async fn run_command(&self, database: &Database, command: Document) -> Result<Document> {
        Ok(database.run_command(command).await?)
    }

    fn server_addresses(&self) -> Vec<ServerAddress> {
        self.topology.current()
    }

    fn mode(&self) -> &'static str {
        "server"
    }
}

impl ServerClientBuilder {
    fn new() -> Self {
        Self {
            config: ServerConfig::default(),
            hosts_set: false,
        }
    }

    /// Populate the builder from `MONGODB_*` environment variables using
    /// [`ServerConfig::from_env`]. Individual fields can still be overridden
    /// afterwards via the other builder methods.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            config: ServerConfig::from_env()?,
            hosts_set: true,
        })
    }

    /// Add a host. The first call replaces the default `127.0.0.1:27017`.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        if !self.hosts_set {
            self.config.hosts.clear();
            self.hosts_set = true;
        }
        self.config
            .hosts
            .push(ServerAddress::new(host, DEFAULT_PORT));
        self
    }

    /// Set the port of the most recently added host.
    pub fn port(mut self, port: u16) -> Self {
        if let Some(last) = self.config.hosts.last_mut() {
            last.port = port;
        }
        self
    }

    pub fn hosts(mut self, hosts: Vec<ServerAddress>) -> Self {
        self.config.hosts = hosts;
        self.hosts_set = true;
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.config.user = Some(user.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.config.password = Some(password.into());
        self
    }

    pub fn auth_source(mut self, auth_source: impl Into<String>) -> Self {
        self.config.auth_source = auth_source.into();
        self
    }

    pub fn app_name(mut self, app_name: impl Into<String>) -> Self {
        self.config.app_name = Some(app_name.into());
        self
    }

    pub fn max_pool_size(mut self, max_pool_size: u32) -> Self {
        self.config.max_pool_size = max_pool_size;
        self
    }

    /// Consume the builder and return the resulting configuration.
    pub fn into_config(self) -> ServerConfig {
        self.config
    }

    pub async fn build(self) -> Result<ServerClient> {
        ServerClient::from_config(self.config).await
    }
}
