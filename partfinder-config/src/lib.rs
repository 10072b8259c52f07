//! Shared configuration library for partfinder.
//!
//! Resolves the catalog endpoint, paging and filter policy from defaults, a
//! `partfinder.toml` file and `PARTFINDER_*` environment variables so every
//! front end applies the same precedence and validation rules.
#![allow(missing_docs)]

pub mod constants;
pub mod loader;
pub mod models;
pub mod util;

pub use loader::{ConfigLoad, ConfigLoader, ConfigLoaderOptions, error::ConfigLoadError, resolve};
pub use models::sources::FileConfig;
pub use models::{ApiConfig, Config, ConfigMetadata, FilterConfig, PagingConfig};
