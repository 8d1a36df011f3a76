use crate::config::{CatalogConfig, SinkKind};
use crate::utils::error::{EtlError, Result};
use serde::Deserialize;
use std::path::Path;

/// Optional TOML overrides; any field left out keeps the CLI/default value.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub product_base: Option<String>,
    pub page_size: Option<u32>,
    pub max_retries: Option<u32>,
    pub timeout_secs: Option<u64>,
    pub backoff_ms: Option<u64>,
    pub concurrent_requests: Option<usize>,
    pub output_path: Option<String>,
    pub database_path: Option<String>,
    pub sink: Option<SinkKind>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| EtlError::ConfigError {
            message: format!("{}: {}", path.display(), e),
        })
    }

    pub fn apply(self, config: &mut CatalogConfig) {
        if let Some(v) = self.base_url {
            config.base_url = v;
        }
        if let Some(v) = self.product_base {
            config.product_base = v;
        }
        if let Some(v) = self.page_size {
            config.page_size = v;
        }
        if let Some(v) = self.max_retries {
            config.max_retries = v;
        }
        if let Some(v) = self.timeout_secs {
            config.timeout_secs = v;
        }
        if let Some(v) = self.backoff_ms {
            config.backoff_ms = v;
        }
        if let Some(v) = self.concurrent_requests {
            config.concurrent_requests = v;
        }
        if let Some(v) = self.output_path {
            config.output_path = v;
        }
        if let Some(v) = self.database_path {
            config.database_path = v;
        }
        if let Some(v) = self.sink {
            config.sink = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override() {
        let file: FileConfig = toml::from_str(
            r#"
            max_retries = 5
            sink = "both"
            "#,
        )
        .unwrap();

        let mut config = CatalogConfig::default();
        file.apply(&mut config);

        assert_eq!(config.max_retries, 5);
        assert_eq!(config.sink, SinkKind::Both);
        // untouched fields keep their defaults
        assert_eq!(config.page_size, 100);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let parsed: std::result::Result<FileConfig, _> = toml::from_str("no_such_field = 1");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = FileConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, EtlError::IoError(_)));
    }
}
