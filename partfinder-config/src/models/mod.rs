pub mod sources;

use std::path::PathBuf;
use std::time::Duration;

use partfinder_core::FilterPolicy;
use url::Url;

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api: ApiConfig,
    pub paging: PagingConfig,
    pub filter: FilterConfig,
    pub metadata: ConfigMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingConfig {
    pub page_size: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterConfig {
    pub reset_category_on_brand_change: bool,
}

impl FilterConfig {
    pub fn policy(&self) -> FilterPolicy {
        FilterPolicy {
            reset_category_on_brand_change: self.reset_category_on_brand_change,
        }
    }
}

/// Where the resolved values came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_size: partfinder_core::PAGE_SIZE,
        }
    }
}
