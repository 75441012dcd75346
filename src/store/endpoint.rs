//! Endpoint resolution
//!
//! Turns a configured endpoint, a bucket name, and a region into the
//! connection parameters a client builder needs. Resolution always requires a
//! concrete bucket: a blank name fails before any client is built.

use aws_config::Region;

use crate::error::StoreError;

/// Connection parameters produced by endpoint resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    /// Endpoint the client connects to, without the bucket component.
    pub endpoint_url: String,
    /// Bucket the client is built for, trimmed and non-empty.
    pub bucket: String,
    /// Whether the client must address the bucket in the request path
    /// instead of the host name.
    pub path_style: bool,
}

/// Resolves connection parameters for a client build.
pub trait EndpointResolver: Send + Sync {
    /// Resolve connection parameters for `bucket` against `endpoint`.
    ///
    /// Fails with [`StoreError::InvalidBucketName`] when the bucket name is
    /// blank.
    fn resolve(
        &self,
        endpoint: &str,
        bucket: &str,
        region: &Region,
    ) -> Result<ConnectionParams, StoreError>;
}

/// Default resolver: virtual-hosted addressing for Amazon endpoints,
/// path-style for everything else.
///
/// S3-compatible stores reached through a custom endpoint (MinIO, LocalStack
/// and friends) generally do not serve wildcard DNS for bucket subdomains,
/// so any endpoint outside `amazonaws.com` is addressed path-style.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEndpointResolver;

impl EndpointResolver for DefaultEndpointResolver {
    fn resolve(
        &self,
        endpoint: &str,
        bucket: &str,
        _region: &Region,
    ) -> Result<ConnectionParams, StoreError> {
        let bucket = bucket.trim();
        if bucket.is_empty() {
            return Err(StoreError::InvalidBucketName);
        }

        Ok(ConnectionParams {
            endpoint_url: endpoint.to_string(),
            bucket: bucket.to_string(),
            path_style: !is_amazon_endpoint(endpoint),
        })
    }
}

fn is_amazon_endpoint(endpoint: &str) -> bool {
    let host = endpoint_host(endpoint);
    host == "amazonaws.com" || host.ends_with(".amazonaws.com")
}

/// Extract the host portion of an endpoint URL: strip the scheme, cut at the
/// first path or query separator, then drop a trailing numeric port.
fn endpoint_host(endpoint: &str) -> &str {
    let without_scheme = endpoint
        .split_once("://")
        .map_or(endpoint, |(_, rest)| rest);
    let authority = without_scheme
        .split(['/', '?'])
        .next()
        .unwrap_or(without_scheme);
    match authority.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
        _ => authority,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> Region {
        Region::new("us-east-1")
    }

    #[test]
    fn test_amazon_endpoint_uses_virtual_hosted_addressing() {
        let params = DefaultEndpointResolver
            .resolve("https://s3.us-east-1.amazonaws.com", "data", &region())
            .unwrap();
        assert_eq!(params.endpoint_url, "https://s3.us-east-1.amazonaws.com");
        assert_eq!(params.bucket, "data");
        assert!(!params.path_style);
    }

    #[test]
    fn test_custom_endpoint_uses_path_style() {
        let params = DefaultEndpointResolver
            .resolve("http://localhost:9000", "data", &region())
            .unwrap();
        assert!(params.path_style);
    }

    #[test]
    fn test_blank_bucket_is_rejected() {
        let resolver = DefaultEndpointResolver;
        let endpoint = "https://s3.us-east-1.amazonaws.com";
        assert_eq!(
            resolver.resolve(endpoint, "", &region()).unwrap_err(),
            StoreError::InvalidBucketName
        );
        assert_eq!(
            resolver.resolve(endpoint, "   ", &region()).unwrap_err(),
            StoreError::InvalidBucketName
        );
    }

    #[test]
    fn test_bucket_is_trimmed() {
        let params = DefaultEndpointResolver
            .resolve("http://localhost:9000", " data ", &region())
            .unwrap();
        assert_eq!(params.bucket, "data");
    }

    #[test]
    fn test_endpoint_host_extraction() {
        assert_eq!(
            endpoint_host("https://s3.us-east-1.amazonaws.com"),
            "s3.us-east-1.amazonaws.com"
        );
        assert_eq!(endpoint_host("http://localhost:9000"), "localhost");
        assert_eq!(endpoint_host("http://minio:9000/path"), "minio");
        assert_eq!(endpoint_host("storage.example.com"), "storage.example.com");
    }

    #[test]
    fn test_amazonaws_suffix_must_be_a_label_boundary() {
        assert!(is_amazon_endpoint("https://s3.eu-west-1.amazonaws.com"));
        assert!(!is_amazon_endpoint("https://notamazonaws.com"));
        assert!(!is_amazon_endpoint("https://amazonaws.com.evil.example"));
    }
}
