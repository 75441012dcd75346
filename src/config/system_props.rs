//! Process-level property overrides
//!
//! A small process-wide table playing the role that `-D` style system
//! properties play in other runtimes. Embedders populate it at startup
//! (keys are the dotted property names); configuration instances snapshot
//! it once at construction, and a value set here outranks the matching
//! environment variable.

use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

fn table() -> &'static RwLock<HashMap<String, String>> {
    static TABLE: OnceLock<RwLock<HashMap<String, String>>> = OnceLock::new();
    TABLE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Set a process property, returning the previous value if any.
pub fn set(name: impl Into<String>, value: impl Into<String>) -> Option<String> {
    table().write().unwrap().insert(name.into(), value.into())
}

/// Read a process property.
pub fn get(name: &str) -> Option<String> {
    table().read().unwrap().get(name).cloned()
}

/// Remove a process property, returning the removed value if any.
pub fn remove(name: &str) -> Option<String> {
    table().write().unwrap().remove(name)
}

/// Remove all process properties.
pub fn clear() {
    table().write().unwrap().clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_set_get_remove() {
        clear();
        assert_eq!(get("s3.spi.region"), None);
        assert_eq!(set("s3.spi.region", "eu-west-1"), None);
        assert_eq!(get("s3.spi.region"), Some("eu-west-1".to_string()));
        assert_eq!(
            set("s3.spi.region", "ap-southeast-2"),
            Some("eu-west-1".to_string())
        );
        assert_eq!(remove("s3.spi.region"), Some("ap-southeast-2".to_string()));
        assert_eq!(get("s3.spi.region"), None);
    }

    #[test]
    #[serial]
    fn test_clear_empties_the_table() {
        set("s3.spi.endpoint", "http://localhost:9000");
        set("s3.spi.region", "us-west-2");
        clear();
        assert_eq!(get("s3.spi.endpoint"), None);
        assert_eq!(get("s3.spi.region"), None);
    }
}
