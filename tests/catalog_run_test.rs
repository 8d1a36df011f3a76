use anyhow::Result;
use catalog_etl::{ArchiveSink, CatalogConfig, EtlEngine, EtlError, LocalStorage, Orchestrator, Sink};
use httpmock::prelude::*;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

fn run_config(server: &MockServer, output_path: &str) -> CatalogConfig {
    CatalogConfig {
        base_url: server.url("/catalog"),
        product_base: "https://store.example/produto".to_string(),
        max_retries: 2,
        timeout_secs: 5,
        backoff_ms: 1,
        concurrent_requests: 3,
        output_path: output_path.to_string(),
        ..CatalogConfig::default()
    }
}

fn page_body(ids: &[u64], total_pages: u64) -> serde_json::Value {
    let data: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| {
            json!({
                "id": id.to_string(),
                "attributes": {
                    "title": format!("Product {id}"),
                    "price": 100 + id,
                    "offer": {"quantity_available": 2}
                }
            })
        })
        .collect();
    json!({"data": data, "meta": {"total_pages_count": total_pages}})
}

fn mock_page(server: &MockServer, page: u64, body: serde_json::Value) {
    server.mock(|when, then| {
        when.method(GET)
            .path("/catalog")
            .query_param("page_number", page.to_string());
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(body);
    });
}

fn read_archive_csv(output_path: &std::path::Path) -> Result<String> {
    let zip_data = std::fs::read(output_path.join("catalog_products.zip"))?;
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data))?;
    let mut file = archive.by_name("products.csv")?;
    let mut content = String::new();
    std::io::Read::read_to_string(&mut file, &mut content)?;
    Ok(content)
}

#[tokio::test]
async fn test_end_to_end_paginated_run() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    mock_page(&server, 1, page_body(&[1, 2], 2));
    mock_page(&server, 2, page_body(&[3], 2));

    let config = run_config(&server, &output_path);
    let storage = LocalStorage::new(output_path.clone());
    let sinks: Vec<Box<dyn Sink>> = vec![Box::new(ArchiveSink::new(storage))];
    let engine = EtlEngine::new(Orchestrator::new(Arc::new(config)), sinks);

    let report = engine.run().await?;

    assert_eq!(report.records, 3);
    assert_eq!(report.pages_ok, 2);
    assert!(report.failures.is_empty());

    let csv_content = read_archive_csv(temp_dir.path())?;
    assert!(csv_content.contains("Product 1"));
    assert!(csv_content.contains("Product 2"));
    assert!(csv_content.contains("Product 3"));
    assert!(csv_content.contains("https://store.example/produto/3/product-3"));

    Ok(())
}

#[tokio::test]
async fn test_run_survives_a_permanently_failing_page() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    mock_page(&server, 1, page_body(&[1], 3));
    // page 2 fails every attempt
    let failing = server.mock(|when, then| {
        when.method(GET)
            .path("/catalog")
            .query_param("page_number", "2");
        then.status(500);
    });
    mock_page(&server, 3, page_body(&[3], 3));

    let config = run_config(&server, &output_path);
    let storage = LocalStorage::new(output_path.clone());
    let sinks: Vec<Box<dyn Sink>> = vec![Box::new(ArchiveSink::new(storage))];
    let engine = EtlEngine::new(Orchestrator::new(Arc::new(config)), sinks);

    let report = engine.run().await?;

    // retries were exhausted inside the fetcher, not at the run level
    assert_eq!(failing.hits(), 2);
    assert_eq!(report.records, 2);
    assert_eq!(report.pages_ok, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].page, 2);

    let csv_content = read_archive_csv(temp_dir.path())?;
    assert!(csv_content.contains("Product 1"));
    assert!(csv_content.contains("Product 3"));

    Ok(())
}

#[tokio::test]
async fn test_discovery_failure_reaches_the_caller() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/catalog");
        then.status(500);
    });

    let config = run_config(&server, &output_path);
    let storage = LocalStorage::new(output_path.clone());
    let sinks: Vec<Box<dyn Sink>> = vec![Box::new(ArchiveSink::new(storage))];
    let engine = EtlEngine::new(Orchestrator::new(Arc::new(config)), sinks);

    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, EtlError::DiscoveryFailure { .. }));

    // nothing was persisted
    assert!(!temp_dir.path().join("catalog_products.zip").exists());

    Ok(())
}
