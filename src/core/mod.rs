pub mod etl;
pub mod fetch;
pub mod orchestrator;
pub mod translate;

pub use crate::domain::model::{Harvest, PageFailure, ProductRecord, RunReport};
pub use crate::domain::ports::{ConfigProvider, Sink, Storage};
pub use crate::utils::error::Result;
