use crate::core::orchestrator::Orchestrator;
use crate::domain::model::RunReport;
use crate::domain::ports::{ConfigProvider, Sink};
use crate::utils::error::Result;

/// Wires the run together: orchestrate, summarize, hand the aggregate to
/// every configured sink. Sink failures propagate uninterpreted.
pub struct EtlEngine<C: ConfigProvider + 'static> {
    orchestrator: Orchestrator<C>,
    sinks: Vec<Box<dyn Sink>>,
}

impl<C: ConfigProvider + 'static> EtlEngine<C> {
    pub fn new(orchestrator: Orchestrator<C>, sinks: Vec<Box<dyn Sink>>) -> Self {
        Self {
            orchestrator,
            sinks,
        }
    }

    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("starting catalog run");
        let harvest = self.orchestrator.run().await?;
        let report = harvest.report.clone();

        tracing::info!(
            records = report.records,
            pages_ok = report.pages_ok,
            pages_failed = report.pages_failed(),
            elapsed_ms = report.elapsed().num_milliseconds(),
            "catalog run finished"
        );
        for failure in &report.failures {
            tracing::warn!(page = failure.page, error = %failure.error, "page contributed no records");
        }

        for sink in &self.sinks {
            sink.store(&harvest.records).await?;
        }

        Ok(report)
    }
}
