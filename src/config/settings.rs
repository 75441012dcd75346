//! Layered S3 configuration
//!
//! [`S3Config`] resolves property values from three layers with a fixed
//! precedence: process properties and environment variables, captured once
//! at construction, outrank explicitly supplied values, which in turn
//! outrank the built-in defaults.

use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::hash::{Hash, Hasher};

use aws_config::Region;

use crate::config::properties::ConfigProperty;
use crate::config::system_props;
use crate::error::ConfigError;

/// Mask used in place of a secret when a configuration is printed.
const SECRET_MASK: &str = "******";

/// Layered configuration for S3 clients.
///
/// Two internal layers back the resolver:
/// - the *base* layer holds explicitly supplied values (constructor map or
///   `with_*` setters);
/// - the *override* layer holds values snapshotted from the environment and
///   the process property table at construction time. Overrides always win
///   and cannot be changed through the public surface.
///
/// Equality and hashing are structural, computed over the merged effective
/// entry set (base plus overrides, overrides winning), so two independently
/// constructed configurations with identical effective values are
/// interchangeable as cache keys. Defaults are not part of the entry set:
/// a property explicitly set to its default value compares different from
/// one left unset.
#[derive(Clone)]
pub struct S3Config {
    base: BTreeMap<String, String>,
    overrides: BTreeMap<String, String>,
}

impl S3Config {
    /// Create a configuration with an empty base layer.
    ///
    /// The override layer is populated here, exactly once: for every known
    /// property the matching environment variable is read first, then the
    /// process property table, which overwrites any environment-derived
    /// value. Later changes to either source are not observed by this
    /// instance.
    pub fn new() -> Self {
        Self {
            base: BTreeMap::new(),
            overrides: snapshot_overrides(),
        }
    }

    /// Create a configuration from explicitly supplied entries.
    ///
    /// Every key must be a known property name; the first unknown key fails
    /// the whole construction with [`ConfigError::UnknownProperty`]. The
    /// override snapshot happens here as well, so environment and process
    /// properties still outrank the supplied entries.
    pub fn from_map<I>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut base = BTreeMap::new();
        for (name, value) in entries {
            let property = ConfigProperty::from_name(&name)
                .ok_or(ConfigError::UnknownProperty(name))?;
            base.insert(property.name().to_string(), value);
        }
        Ok(Self {
            base,
            overrides: snapshot_overrides(),
        })
    }

    /// Resolve a property by its dotted name.
    ///
    /// Fails with [`ConfigError::UnknownProperty`] for names outside the
    /// fixed set; otherwise returns the effective value (override layer,
    /// then base layer, then default).
    pub fn get(&self, name: &str) -> Result<String, ConfigError> {
        let property = ConfigProperty::from_name(name)
            .ok_or_else(|| ConfigError::UnknownProperty(name.to_string()))?;
        Ok(self.value_of(property))
    }

    /// Set a property in the base layer by its dotted name.
    ///
    /// Fails with [`ConfigError::UnknownProperty`] for unknown names. The
    /// override layer is never touched.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), ConfigError> {
        let property = ConfigProperty::from_name(name)
            .ok_or_else(|| ConfigError::UnknownProperty(name.to_string()))?;
        self.put(property, value.into());
        Ok(())
    }

    /// Set the maximum fragment size, in bytes.
    pub fn with_max_fragment_size(mut self, size: usize) -> Self {
        self.put(ConfigProperty::MaxFragmentSize, size.to_string());
        self
    }

    /// Set the maximum number of fragments fetched per read.
    pub fn with_max_fragment_number(mut self, number: usize) -> Self {
        self.put(ConfigProperty::MaxFragmentNumber, number.to_string());
        self
    }

    /// Set the service endpoint URI.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.put(ConfigProperty::Endpoint, endpoint.into());
        self
    }

    /// Set the region.
    pub fn with_region(mut self, region: Region) -> Self {
        self.put(ConfigProperty::Region, region.to_string());
        self
    }

    /// Set an explicit access key. Must be paired with a secret key before
    /// a client can be built.
    pub fn with_access_key(mut self, access_key: impl Into<String>) -> Self {
        self.put(ConfigProperty::AccessKey, access_key.into());
        self
    }

    /// Set an explicit secret key. Must be paired with an access key before
    /// a client can be built.
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.put(ConfigProperty::SecretKey, secret_key.into());
        self
    }

    /// Effective maximum fragment size, in bytes.
    ///
    /// Fails with [`ConfigError::MalformedValue`] when the resolved value is
    /// not an unsigned integer; there is no silent fallback to the default.
    pub fn max_fragment_size(&self) -> Result<usize, ConfigError> {
        self.parse_usize(ConfigProperty::MaxFragmentSize)
    }

    /// Effective maximum fragment count per read.
    pub fn max_fragment_number(&self) -> Result<usize, ConfigError> {
        self.parse_usize(ConfigProperty::MaxFragmentNumber)
    }

    /// Effective endpoint URI.
    pub fn endpoint(&self) -> String {
        self.value_of(ConfigProperty::Endpoint)
    }

    /// Effective region.
    pub fn region(&self) -> Region {
        Region::new(self.value_of(ConfigProperty::Region))
    }

    /// Effective access key; empty when none was supplied.
    pub fn access_key(&self) -> String {
        self.value_of(ConfigProperty::AccessKey)
    }

    /// Effective secret key; empty when none was supplied.
    pub fn secret_key(&self) -> String {
        self.value_of(ConfigProperty::SecretKey)
    }

    /// The merged effective entry set: base layer plus override layer,
    /// overrides winning on conflicts. Defaults are not included.
    pub fn entries(&self) -> BTreeMap<String, String> {
        let mut merged = self.base.clone();
        merged.extend(
            self.overrides
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        merged
    }

    fn put(&mut self, property: ConfigProperty, value: String) {
        self.base.insert(property.name().to_string(), value);
    }

    fn value_of(&self, property: ConfigProperty) -> String {
        let name = property.name();
        self.overrides
            .get(name)
            .or_else(|| self.base.get(name))
            .cloned()
            .unwrap_or_else(|| property.default_value().to_string())
    }

    fn parse_usize(&self, property: ConfigProperty) -> Result<usize, ConfigError> {
        let value = self.value_of(property);
        value.parse().map_err(|_| ConfigError::MalformedValue {
            property: property.name(),
            value,
        })
    }
}

/// Capture the override layer: environment variables first, then process
/// properties, the latter overwriting the former per-property.
fn snapshot_overrides() -> BTreeMap<String, String> {
    let mut overrides = BTreeMap::new();
    for property in ConfigProperty::ALL {
        if let Ok(value) = env::var(property.env_var()) {
            overrides.insert(property.name().to_string(), value);
        }
        if let Some(value) = system_props::get(property.name()) {
            overrides.insert(property.name().to_string(), value);
        }
    }
    overrides
}

impl Default for S3Config {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for S3Config {
    fn eq(&self, other: &Self) -> bool {
        self.entries() == other.entries()
    }
}

impl Eq for S3Config {}

impl Hash for S3Config {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entries().hash(state);
    }
}

impl fmt::Debug for S3Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries = self.entries();
        if let Some(secret) = entries.get_mut(ConfigProperty::SecretKey.name()) {
            if !secret.is_empty() {
                *secret = SECRET_MASK.to_string();
            }
        }
        f.debug_struct("S3Config").field("entries", &entries).finish()
    }
}
