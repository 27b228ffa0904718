//! Application configuration
//!
//! Where the admin repository lives, how deep group expansion may go and how
//! to log. Loaded from TOML files and `GITOLITE_ADMIN__*` environment
//! variables.

pub mod loader;
pub mod types;

pub use loader::{load_config, load_config_from_str};
pub use types::*;
