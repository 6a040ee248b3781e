//! pairmatch-storage: local persistence and configuration.
//!
//! Provides a JSON-file implementation of the core `KeyValueStore` port (the
//! stand-in for browser local storage) and loads `pairmatch.toml`.

pub mod config;
pub mod error;
pub mod file_store;

pub use config::{load_config, load_config_from, AdminCredentials, PairmatchConfig};
pub use error::StoreError;
pub use file_store::FileStore;
