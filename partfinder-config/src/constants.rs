use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "partfinder.toml";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_API_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_CONFIG_PATH: &str = "PARTFINDER_CONFIG";
pub const ENV_API_URL: &str = "PARTFINDER_API_URL";
pub const ENV_API_TIMEOUT: &str = "PARTFINDER_API_TIMEOUT";
pub const ENV_PAGE_SIZE: &str = "PARTFINDER_PAGE_SIZE";
pub const ENV_RESET_CATEGORY: &str = "PARTFINDER_RESET_CATEGORY";
