//! Configuration resolution module
//!
//! The property set, the layered [`S3Config`] resolver, and the process
//! property table that feeds its override layer.

pub mod properties;
pub mod settings;
pub mod system_props;

pub use properties::{env_var_name, ConfigProperty};
pub use settings::S3Config;
