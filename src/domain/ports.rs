use crate::domain::model::ProductRecord;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Tunables the pipeline needs; injected instead of read from globals.
pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn product_base(&self) -> &str;
    fn page_size(&self) -> u32;
    fn max_retries(&self) -> u32;
    fn request_timeout(&self) -> Duration;
    fn backoff_unit(&self) -> Duration;
    fn concurrent_requests(&self) -> usize;
}

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Durable storage for the finished aggregate. The core makes no assumption
/// about atomicity, schema, or dedup policy behind this call.
#[async_trait]
pub trait Sink: Send + Sync {
    async fn store(&self, records: &[ProductRecord]) -> Result<()>;
}
