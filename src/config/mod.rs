pub mod file;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str =
    "https://servicespub.prod.api.aws.grupokabum.com.br/catalog/v2/products-by-category/hardware";
pub const DEFAULT_PRODUCT_BASE: &str = "https://www.kabum.com.br/produto";

/// Which sink receives the finished aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    Archive,
    Sqlite,
    Both,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Parser))]
#[cfg_attr(
    feature = "cli",
    command(
        name = "catalog-etl",
        about = "Fetches a paginated product catalog and persists the aggregate"
    )
)]
pub struct CatalogConfig {
    /// Catalog listing endpoint, paginated via query parameters.
    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_BASE_URL))]
    pub base_url: String,

    /// Storefront base used to derive product URLs.
    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_PRODUCT_BASE))]
    pub product_base: String,

    #[cfg_attr(feature = "cli", arg(long, default_value_t = 100))]
    pub page_size: u32,

    /// Attempts per page request before giving up on that page.
    #[cfg_attr(feature = "cli", arg(long, default_value_t = 3))]
    pub max_retries: u32,

    /// Per-attempt request timeout in seconds.
    #[cfg_attr(feature = "cli", arg(long, default_value_t = 20))]
    pub timeout_secs: u64,

    /// Linear backoff unit in milliseconds (attempt N waits N units).
    #[cfg_attr(feature = "cli", arg(long, default_value_t = 1000))]
    pub backoff_ms: u64,

    /// Page fetches allowed in flight at once.
    #[cfg_attr(feature = "cli", arg(long, default_value_t = 5))]
    pub concurrent_requests: usize,

    #[cfg_attr(feature = "cli", arg(long, default_value = "./output"))]
    pub output_path: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "./output/catalog.db"))]
    pub database_path: String,

    #[cfg_attr(feature = "cli", arg(long, value_enum, default_value = "archive"))]
    pub sink: SinkKind,

    /// TOML file whose values override the flags above.
    #[cfg_attr(feature = "cli", arg(long, value_name = "FILE"))]
    pub config: Option<PathBuf>,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Log run statistics"))]
    pub monitor: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            product_base: DEFAULT_PRODUCT_BASE.to_string(),
            page_size: 100,
            max_retries: 3,
            timeout_secs: 20,
            backoff_ms: 1000,
            concurrent_requests: 5,
            output_path: "./output".to_string(),
            database_path: "./output/catalog.db".to_string(),
            sink: SinkKind::Archive,
            config: None,
            verbose: false,
            monitor: false,
        }
    }
}

impl ConfigProvider for CatalogConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn product_base(&self) -> &str {
        &self.product_base
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }

    fn max_retries(&self) -> u32 {
        self.max_retries
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn backoff_unit(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }

    fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
    }
}

impl Validate for CatalogConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_url("product_base", &self.product_base)?;
        validate_range("page_size", self.page_size, 1, 500)?;
        validate_positive_number("max_retries", self.max_retries as usize, 1)?;
        validate_positive_number("concurrent_requests", self.concurrent_requests, 1)?;
        validate_non_empty_string("output_path", &self.output_path)?;
        validate_non_empty_string("database_path", &self.database_path)?;
        Ok(())
    }
}
