//! Configuration property definitions
//!
//! The closed set of properties understood by the configuration resolver.
//! Every property has a canonical dotted name and a default value; names
//! outside this set are rejected wherever they are supplied.

use std::fmt;

/// A named configuration property with a built-in default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigProperty {
    /// Upper bound, in bytes, for a single fragmented read.
    MaxFragmentSize,
    /// Upper bound on the number of fragments fetched per read.
    MaxFragmentNumber,
    /// Service endpoint URI.
    Endpoint,
    /// Region identifier.
    Region,
    /// Explicit access key; empty means "use the ambient credential chain".
    AccessKey,
    /// Explicit secret key; empty means "use the ambient credential chain".
    SecretKey,
}

impl ConfigProperty {
    /// All properties, in override-scan order.
    pub const ALL: [ConfigProperty; 6] = [
        ConfigProperty::MaxFragmentSize,
        ConfigProperty::MaxFragmentNumber,
        ConfigProperty::Endpoint,
        ConfigProperty::Region,
        ConfigProperty::AccessKey,
        ConfigProperty::SecretKey,
    ];

    /// Canonical dotted property name.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigProperty::MaxFragmentSize => "s3.spi.read.max-fragment-size",
            ConfigProperty::MaxFragmentNumber => "s3.spi.read.max-fragment-number",
            ConfigProperty::Endpoint => "s3.spi.endpoint",
            ConfigProperty::Region => "s3.spi.region",
            ConfigProperty::AccessKey => "s3.spi.access_key",
            ConfigProperty::SecretKey => "s3.spi.secret_key",
        }
    }

    /// Default value, as the raw string the resolver falls back to.
    pub fn default_value(&self) -> &'static str {
        match self {
            ConfigProperty::MaxFragmentSize => "5242880",
            ConfigProperty::MaxFragmentNumber => "50",
            ConfigProperty::Endpoint => "https://s3.us-east-1.amazonaws.com",
            ConfigProperty::Region => "us-east-1",
            ConfigProperty::AccessKey => "",
            ConfigProperty::SecretKey => "",
        }
    }

    /// Look up a property by its dotted name.
    ///
    /// Returns `None` for any name outside the fixed set.
    pub fn from_name(name: &str) -> Option<ConfigProperty> {
        ConfigProperty::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Environment variable carrying this property's override.
    pub fn env_var(&self) -> String {
        env_var_name(self.name())
    }
}

impl fmt::Display for ConfigProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Convert a dotted property name into its environment variable form.
///
/// Blank input yields the empty string; otherwise the name is trimmed,
/// `.` and `-` become `_`, and the result is uppercased.
pub fn env_var_name(property_name: &str) -> String {
    let trimmed = property_name.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    trimmed
        .replace(['.', '-'], "_")
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_names_and_defaults() {
        assert_eq!(
            ConfigProperty::MaxFragmentSize.name(),
            "s3.spi.read.max-fragment-size"
        );
        assert_eq!(ConfigProperty::MaxFragmentSize.default_value(), "5242880");
        assert_eq!(
            ConfigProperty::MaxFragmentNumber.name(),
            "s3.spi.read.max-fragment-number"
        );
        assert_eq!(ConfigProperty::MaxFragmentNumber.default_value(), "50");
        assert_eq!(
            ConfigProperty::Endpoint.default_value(),
            "https://s3.us-east-1.amazonaws.com"
        );
        assert_eq!(ConfigProperty::Region.default_value(), "us-east-1");
        assert_eq!(ConfigProperty::AccessKey.default_value(), "");
        assert_eq!(ConfigProperty::SecretKey.default_value(), "");
    }

    #[test]
    fn test_from_name_round_trips() {
        for property in ConfigProperty::ALL {
            assert_eq!(ConfigProperty::from_name(property.name()), Some(property));
        }
    }

    #[test]
    fn test_from_name_rejects_unknown() {
        assert_eq!(ConfigProperty::from_name("s3.spi.unknown"), None);
        assert_eq!(ConfigProperty::from_name(""), None);
        assert_eq!(ConfigProperty::from_name("S3.SPI.REGION"), None);
    }

    #[test]
    fn test_env_var_name_transform() {
        assert_eq!(
            env_var_name("s3.spi.read.max-fragment-size"),
            "S3_SPI_READ_MAX_FRAGMENT_SIZE"
        );
        assert_eq!(env_var_name("s3.spi.access_key"), "S3_SPI_ACCESS_KEY");
        assert_eq!(env_var_name("some.property"), "SOME_PROPERTY");
    }

    #[test]
    fn test_env_var_name_is_total() {
        assert_eq!(env_var_name(""), "");
        assert_eq!(env_var_name("   "), "");
        assert_eq!(env_var_name("  s3.spi.region  "), "S3_SPI_REGION");
    }

    #[test]
    fn test_display_is_the_dotted_name() {
        assert_eq!(ConfigProperty::Endpoint.to_string(), "s3.spi.endpoint");
    }
}
