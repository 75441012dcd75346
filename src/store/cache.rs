//! Client store
//!
//! [`ClientStore`] memoizes client handles per `(configuration, bucket)` key.
//! Concurrent misses on one key await a single in-flight build, so at most
//! one client is ever constructed per unique key; misses on unrelated keys
//! build in parallel. A failed build leaves no entry behind.

use std::sync::Arc;

use moka::future::Cache;
use tracing::debug;

use crate::config::S3Config;
use crate::error::StoreError;
use crate::store::endpoint::{DefaultEndpointResolver, EndpointResolver};
use crate::store::factory::{
    resolve_static_credentials, ClientFactory, ClientParams, SdkClientFactory, TransportSettings,
};
use crate::store::key::ClientKey;

/// A cache of client handles keyed by configuration and bucket name.
///
/// The store owns one cache per client flavor; clearing one leaves the other
/// untouched. Entries never expire: a configuration with different effective
/// values is a different key and therefore a different client, so there is
/// nothing to refresh.
pub struct ClientStore<F: ClientFactory = SdkClientFactory> {
    factory: F,
    resolver: Arc<dyn EndpointResolver>,
    transport: TransportSettings,
    clients: Cache<ClientKey, F::Client>,
    async_clients: Cache<ClientKey, F::AsyncClient>,
}

impl ClientStore<SdkClientFactory> {
    /// Create a store producing AWS SDK clients.
    pub fn new() -> Self {
        Self::with_factory(SdkClientFactory::new())
    }
}

impl Default for ClientStore<SdkClientFactory> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ClientFactory> ClientStore<F> {
    /// Create a store around a custom client factory.
    pub fn with_factory(factory: F) -> Self {
        Self {
            factory,
            resolver: Arc::new(DefaultEndpointResolver),
            transport: TransportSettings::default(),
            clients: Cache::builder().build(),
            async_clients: Cache::builder().build(),
        }
    }

    /// Replace the endpoint resolver.
    pub fn with_endpoint_resolver(mut self, resolver: Arc<dyn EndpointResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Replace the transport settings applied to asynchronous clients.
    pub fn with_transport(mut self, transport: TransportSettings) -> Self {
        self.transport = transport;
        self
    }

    /// Get the cached client for `(config, bucket)`, building it on first
    /// access.
    ///
    /// The bucket name is trimmed before keying; a blank name fails with
    /// [`StoreError::InvalidBucketName`] before any client is constructed.
    /// Validation and build errors are returned to every caller waiting on
    /// the same key and cache nothing.
    pub async fn get_client(
        &self,
        config: &S3Config,
        bucket: &str,
    ) -> Result<F::Client, StoreError> {
        let key = ClientKey::new(config.clone(), bucket);
        debug!(config = ?key.config(), bucket = %key.bucket(), "obtaining client");

        self.clients
            .try_get_with(key.clone(), self.generate_client(key))
            .await
            .map_err(|err| (*err).clone())
    }

    /// Get the cached asynchronous client for `(config, bucket)`, building
    /// it on first access.
    ///
    /// Same contract as [`ClientStore::get_client`]; the build additionally
    /// carries the store's transport settings.
    pub async fn get_async_client(
        &self,
        config: &S3Config,
        bucket: &str,
    ) -> Result<F::AsyncClient, StoreError> {
        let key = ClientKey::new(config.clone(), bucket);
        debug!(config = ?key.config(), bucket = %key.bucket(), "obtaining async client");

        self.async_clients
            .try_get_with(key.clone(), self.generate_async_client(key))
            .await
            .map_err(|err| (*err).clone())
    }

    /// Drop every cached client.
    ///
    /// Builds already in flight are not cancelled; their entries land in the
    /// cache when they complete.
    pub fn clear_client_cache(&self) {
        self.clients.invalidate_all();
    }

    /// Drop every cached asynchronous client.
    pub fn clear_async_client_cache(&self) {
        self.async_clients.invalidate_all();
    }

    async fn generate_client(&self, key: ClientKey) -> Result<F::Client, StoreError> {
        let params = self.client_params(&key, None)?;
        debug!(config = ?key.config(), bucket = %key.bucket(), "generating client");
        self.factory.build_client(&params).await
    }

    async fn generate_async_client(&self, key: ClientKey) -> Result<F::AsyncClient, StoreError> {
        let params = self.client_params(&key, Some(self.transport.clone()))?;
        debug!(config = ?key.config(), bucket = %key.bucket(), "generating async client");
        self.factory.build_async_client(&params).await
    }

    /// Resolve everything a build needs off the key. Runs before the factory
    /// is consulted, so a validation failure never constructs anything.
    fn client_params(
        &self,
        key: &ClientKey,
        transport: Option<TransportSettings>,
    ) -> Result<ClientParams, StoreError> {
        let config = key.config();
        let connection = self
            .resolver
            .resolve(&config.endpoint(), key.bucket(), &config.region())?;
        let credentials = resolve_static_credentials(config)?;

        Ok(ClientParams {
            region: config.region(),
            connection,
            credentials,
            transport,
        })
    }
}
