use crate::domain::model::ProductRecord;
use crate::domain::ports::{Sink, Storage};
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const ARCHIVE_NAME: &str = "catalog_products.zip";

/// Bundles the aggregate into a zip holding `products.csv` and
/// `products.json`, written through the storage port.
pub struct ArchiveSink<S: Storage> {
    storage: S,
}

impl<S: Storage> ArchiveSink<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl<S: Storage> Sink for ArchiveSink<S> {
    async fn store(&self, records: &[ProductRecord]) -> Result<()> {
        tracing::debug!(records = records.len(), "building archive");

        let csv_data = render_csv(records)?;
        let json_data = serde_json::to_string_pretty(records)?;

        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            zip.start_file("products.csv", SimpleFileOptions::default())?;
            zip.write_all(&csv_data)?;

            zip.start_file("products.json", SimpleFileOptions::default())?;
            zip.write_all(json_data.as_bytes())?;

            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!(bytes = zip_data.len(), "writing archive to storage");
        self.storage.write_file(ARCHIVE_NAME, &zip_data).await?;
        Ok(())
    }
}

fn render_csv(records: &[ProductRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| EtlError::PersistenceError {
            message: format!("could not finish CSV output: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn sample_record(id: &str, name: &str) -> ProductRecord {
        ProductRecord {
            id: Some(id.to_string()),
            name: name.to_string(),
            price: Some(300.0),
            price_with_discount: None,
            quantity_available: 5,
            score_of_ratings: None,
            number_of_ratings: None,
            photo_reference: None,
            warranty: None,
            url: Some(format!("https://store.example/produto/{id}/{name}")),
        }
    }

    #[tokio::test]
    async fn test_archive_holds_csv_and_json() {
        let storage = MockStorage::new();
        let sink = ArchiveSink::new(storage.clone());

        let records = vec![sample_record("1", "ram"), sample_record("2", "ssd")];
        sink.store(&records).await.unwrap();

        let zip_data = storage.get_file(ARCHIVE_NAME).await.unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
        assert_eq!(archive.len(), 2);

        let csv_content = {
            let mut file = archive.by_name("products.csv").unwrap();
            let mut content = String::new();
            std::io::Read::read_to_string(&mut file, &mut content).unwrap();
            content
        };
        assert!(csv_content.starts_with(
            "id,name,price,price_with_discount,quantity_available,score_of_ratings,number_of_ratings,photo_reference,warranty,url"
        ));
        assert!(csv_content.contains("1,ram,300.0"));
        assert!(csv_content.contains("2,ssd,300.0"));

        let json_content = {
            let mut file = archive.by_name("products.json").unwrap();
            let mut content = String::new();
            std::io::Read::read_to_string(&mut file, &mut content).unwrap();
            content
        };
        let parsed: serde_json::Value = serde_json::from_str(&json_content).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_aggregate_still_writes_archive() {
        let storage = MockStorage::new();
        let sink = ArchiveSink::new(storage.clone());

        sink.store(&[]).await.unwrap();

        let zip_data = storage.get_file(ARCHIVE_NAME).await.unwrap();
        let archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
        assert_eq!(archive.len(), 2);
    }
}
