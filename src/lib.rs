pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{ArchiveSink, LocalStorage, SqliteSink};
pub use config::file::FileConfig;
pub use config::{CatalogConfig, SinkKind};
pub use crate::core::{
    etl::EtlEngine, fetch::Fetcher, orchestrator::Orchestrator, translate::Translator,
};
pub use domain::model::{Harvest, PageFailure, ProductRecord, RunReport};
pub use domain::ports::{ConfigProvider, Sink, Storage};
pub use utils::error::{EtlError, Result};
