//! Client construction
//!
//! The [`ClientFactory`] trait is the seam between the client store and the
//! transport: the store resolves configuration into [`ClientParams`] and the
//! factory turns those into client handles. [`SdkClientFactory`] is the
//! production implementation backed by the AWS SDK.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_s3::config::Credentials;
use aws_smithy_types::timeout::TimeoutConfig;

use crate::config::S3Config;
use crate::error::StoreError;
use crate::store::endpoint::ConnectionParams;

/// Provider name recorded on statically supplied credentials.
const STATIC_PROVIDER_NAME: &str = "s3-client-store";

// ============================================================================
// Static credentials
// ============================================================================

/// An explicit access/secret key pair taken from configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    pub access_key: String,
    pub secret_key: String,
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"******")
            .finish()
    }
}

/// Extract the static credential pair from a configuration.
///
/// Supplying exactly one of the two keys fails with
/// [`StoreError::IncompleteCredentials`]; supplying neither returns `None`,
/// which leaves credential resolution to the ambient provider chain.
/// Whitespace-only values count as absent.
pub fn resolve_static_credentials(
    config: &S3Config,
) -> Result<Option<StaticCredentials>, StoreError> {
    let access_key = config.access_key();
    let secret_key = config.secret_key();

    let access_key_provided = !access_key.trim().is_empty();
    let secret_key_provided = !secret_key.trim().is_empty();

    if access_key_provided != secret_key_provided {
        return Err(StoreError::IncompleteCredentials {
            access_key,
            secret_key,
        });
    }

    if access_key_provided {
        Ok(Some(StaticCredentials {
            access_key,
            secret_key,
        }))
    } else {
        Ok(None)
    }
}

// ============================================================================
// Transport settings
// ============================================================================

/// Transport tuning applied to asynchronous clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportSettings {
    /// Time allowed for establishing a connection.
    pub connect_timeout: Duration,
    /// Upper bound on concurrent connections, for transports that expose one.
    pub max_connections: u32,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(3),
            max_connections: 100,
        }
    }
}

impl TransportSettings {
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }
}

// ============================================================================
// Client factory
// ============================================================================

/// Everything a factory needs to build one client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientParams {
    /// Region the client operates in.
    pub region: Region,
    /// Resolved endpoint and addressing style.
    pub connection: ConnectionParams,
    /// Explicit credentials; `None` delegates to the ambient chain.
    pub credentials: Option<StaticCredentials>,
    /// Transport tuning; populated on the asynchronous build path only.
    pub transport: Option<TransportSettings>,
}

/// Builds the client handles the store caches.
///
/// Implementations must be cheap to share across tasks; the expensive work
/// happens inside the build methods, which the store guarantees to invoke at
/// most once per cache key.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    /// Handle produced for synchronous-style use.
    type Client: Clone + Send + Sync + 'static;
    /// Handle produced for asynchronous use, with transport tuning applied.
    type AsyncClient: Clone + Send + Sync + 'static;

    async fn build_client(&self, params: &ClientParams) -> Result<Self::Client, StoreError>;

    async fn build_async_client(
        &self,
        params: &ClientParams,
    ) -> Result<Self::AsyncClient, StoreError>;
}

// ============================================================================
// AWS SDK factory
// ============================================================================

/// Factory producing [`aws_sdk_s3::Client`] handles.
///
/// Both build paths share the ambient SDK configuration and differ only in
/// transport tuning: the asynchronous variant applies the connect timeout
/// from [`TransportSettings`]. The default SDK transport has no connection
/// cap, so `max_connections` is carried for factories whose transport
/// honors one.
#[derive(Debug, Clone, Copy, Default)]
pub struct SdkClientFactory;

impl SdkClientFactory {
    pub fn new() -> Self {
        Self
    }

    async fn load_sdk_config(params: &ClientParams) -> SdkConfig {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(params.region.clone());

        if let Some(credentials) = &params.credentials {
            loader = loader.credentials_provider(Credentials::new(
                credentials.access_key.clone(),
                credentials.secret_key.clone(),
                None,
                None,
                STATIC_PROVIDER_NAME,
            ));
        }

        loader.load().await
    }

    fn service_builder(
        sdk_config: &SdkConfig,
        params: &ClientParams,
    ) -> aws_sdk_s3::config::Builder {
        aws_sdk_s3::config::Builder::from(sdk_config)
            .endpoint_url(&params.connection.endpoint_url)
            .force_path_style(params.connection.path_style)
    }
}

#[async_trait]
impl ClientFactory for SdkClientFactory {
    type Client = aws_sdk_s3::Client;
    type AsyncClient = aws_sdk_s3::Client;

    async fn build_client(&self, params: &ClientParams) -> Result<Self::Client, StoreError> {
        let sdk_config = Self::load_sdk_config(params).await;
        let config = Self::service_builder(&sdk_config, params).build();
        Ok(aws_sdk_s3::Client::from_conf(config))
    }

    async fn build_async_client(
        &self,
        params: &ClientParams,
    ) -> Result<Self::AsyncClient, StoreError> {
        let sdk_config = Self::load_sdk_config(params).await;
        let mut builder = Self::service_builder(&sdk_config, params);

        if let Some(transport) = &params.transport {
            builder = builder.timeout_config(
                TimeoutConfig::builder()
                    .connect_timeout(transport.connect_timeout)
                    .build(),
            );
        }

        Ok(aws_sdk_s3::Client::from_conf(builder.build()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(credentials: Option<StaticCredentials>) -> ClientParams {
        ClientParams {
            region: Region::new("us-east-1"),
            connection: ConnectionParams {
                endpoint_url: "http://localhost:9000".to_string(),
                bucket: "data".to_string(),
                path_style: true,
            },
            credentials,
            transport: None,
        }
    }

    #[test]
    fn test_no_credentials_defer_to_ambient_chain() {
        let config = S3Config::new()
            .with_access_key("")
            .with_secret_key("");
        assert_eq!(resolve_static_credentials(&config).unwrap(), None);
    }

    #[test]
    fn test_both_credentials_become_static_pair() {
        let config = S3Config::new()
            .with_access_key("testKey")
            .with_secret_key("testSecret");
        let credentials = resolve_static_credentials(&config).unwrap().unwrap();
        assert_eq!(credentials.access_key, "testKey");
        assert_eq!(credentials.secret_key, "testSecret");
    }

    #[test]
    fn test_access_key_without_secret_key_fails() {
        let config = S3Config::new().with_access_key("testKey");
        assert_eq!(
            resolve_static_credentials(&config).unwrap_err(),
            StoreError::IncompleteCredentials {
                access_key: "testKey".to_string(),
                secret_key: String::new(),
            }
        );
    }

    #[test]
    fn test_secret_key_without_access_key_fails() {
        let config = S3Config::new().with_secret_key("testSecret");
        assert_eq!(
            resolve_static_credentials(&config).unwrap_err(),
            StoreError::IncompleteCredentials {
                access_key: String::new(),
                secret_key: "testSecret".to_string(),
            }
        );
    }

    #[test]
    fn test_whitespace_credentials_count_as_absent() {
        let config = S3Config::new()
            .with_access_key("   ")
            .with_secret_key("\t");
        assert_eq!(resolve_static_credentials(&config).unwrap(), None);
    }

    #[test]
    fn test_static_credentials_debug_masks_the_secret() {
        let credentials = StaticCredentials {
            access_key: "AKIDEXAMPLE".to_string(),
            secret_key: "hunter2".to_string(),
        };
        let printed = format!("{:?}", credentials);
        assert!(printed.contains("AKIDEXAMPLE"));
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn test_transport_settings_defaults_and_builders() {
        let defaults = TransportSettings::default();
        assert_eq!(defaults.connect_timeout, Duration::from_secs(3));
        assert_eq!(defaults.max_connections, 100);

        let tuned = TransportSettings::default()
            .with_connect_timeout(Duration::from_secs(7))
            .with_max_connections(5);
        assert_eq!(tuned.connect_timeout, Duration::from_secs(7));
        assert_eq!(tuned.max_connections, 5);
    }

    #[tokio::test]
    async fn test_sdk_factory_builds_a_client() {
        let credentials = StaticCredentials {
            access_key: "testKey".to_string(),
            secret_key: "testSecret".to_string(),
        };
        let _client = SdkClientFactory::new()
            .build_client(&params(Some(credentials)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_sdk_factory_builds_an_async_client_with_transport() {
        let mut build_params = params(None);
        build_params.transport = Some(TransportSettings::default());
        let _client = SdkClientFactory::new()
            .build_async_client(&build_params)
            .await
            .unwrap();
    }
}
