use catalog_etl::utils::{logger, monitor::RunMonitor, validation::Validate};
use catalog_etl::{
    ArchiveSink, CatalogConfig, EtlEngine, EtlError, FileConfig, LocalStorage, Orchestrator,
    Sink, SinkKind, SqliteSink,
};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CatalogConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting catalog-etl");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Some(path) = config.config.clone() {
        match FileConfig::load(&path) {
            Ok(file_config) => {
                file_config.apply(&mut config);
                tracing::info!("Applied overrides from {}", path.display());
            }
            Err(e) => {
                tracing::error!("Could not load config file: {}", e);
                eprintln!("❌ Could not load config file: {}", e);
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let monitor = RunMonitor::new(config.monitor);
    if monitor.is_enabled() {
        tracing::info!("Run statistics enabled");
    }

    let mut sinks: Vec<Box<dyn Sink>> = Vec::new();
    if matches!(config.sink, SinkKind::Archive | SinkKind::Both) {
        sinks.push(Box::new(ArchiveSink::new(LocalStorage::new(
            config.output_path.clone(),
        ))));
    }
    if matches!(config.sink, SinkKind::Sqlite | SinkKind::Both) {
        let sink = SqliteSink::open(Path::new(&config.database_path)).await?;
        sinks.push(Box::new(sink));
    }

    let orchestrator = Orchestrator::new(Arc::new(config));
    let engine = EtlEngine::new(orchestrator, sinks);

    match engine.run().await {
        Ok(report) => {
            monitor.log_stats("run complete");
            println!(
                "✅ Collected {} records from {}/{} pages",
                report.records,
                report.pages_ok,
                report.total_pages
            );
            for failure in &report.failures {
                println!("⚠️ page {} failed: {}", failure.page, failure.error);
            }
        }
        Err(e) => {
            tracing::error!("Catalog run failed: {}", e);
            eprintln!("❌ {}", e);
            let exit_code = match e {
                EtlError::DiscoveryFailure { .. } => 1,
                _ => 2,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
