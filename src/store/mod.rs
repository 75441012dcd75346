//! Client store module
//!
//! Caching of S3 client handles keyed by configuration and bucket, with the
//! endpoint-resolution and client-construction seams it builds on.

pub mod cache;
pub mod endpoint;
pub mod factory;
pub mod key;

pub use cache::ClientStore;
pub use endpoint::{ConnectionParams, DefaultEndpointResolver, EndpointResolver};
pub use factory::{
    resolve_static_credentials, ClientFactory, ClientParams, SdkClientFactory, StaticCredentials,
    TransportSettings,
};
pub use key::ClientKey;
