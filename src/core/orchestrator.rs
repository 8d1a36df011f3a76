use crate::core::fetch::Fetcher;
use crate::core::translate::{SlugFn, Translator};
use crate::domain::model::{Harvest, PageFailure, ProductRecord, RunReport};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::json::pluck;
use crate::utils::slug::slugify;
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Drives one catalog run: discovers the page count from page 1, fans out
/// bounded-parallel fetch+translate tasks, and aggregates their results in
/// completion order. A failed page contributes zero records and is only
/// reported; the run itself fails fast solely when discovery fails.
pub struct Orchestrator<C: ConfigProvider> {
    config: Arc<C>,
    fetcher: Arc<Fetcher>,
    translator: Arc<Translator>,
}

impl<C: ConfigProvider + 'static> Orchestrator<C> {
    pub fn new(config: Arc<C>) -> Self {
        let slug: Arc<SlugFn> = Arc::new(slugify);
        let translator = Translator::new(config.product_base(), slug);
        let fetcher = Fetcher::from_config(config.as_ref());
        Self::with_parts(config, fetcher, translator)
    }

    /// Injection point for a custom fetcher or slug normalization.
    pub fn with_parts(config: Arc<C>, fetcher: Fetcher, translator: Translator) -> Self {
        Self {
            config,
            fetcher: Arc::new(fetcher),
            translator: Arc::new(translator),
        }
    }

    fn page_url(&self, page: u64) -> String {
        format!(
            "{}?page_number={}&page_size={}&facet_filters=&sort=most_searched&is_prime=false&payload_data=products_category_filters&include=gift",
            self.config.base_url(),
            page,
            self.config.page_size()
        )
    }

    /// Page count from the discovery payload; anything absent, non-integer,
    /// or below 1 falls back to a single page.
    fn total_pages(payload: &Value) -> u64 {
        pluck(payload, &["meta", "total_pages_count"])
            .and_then(Value::as_u64)
            .filter(|&total| total >= 1)
            .unwrap_or(1)
    }

    pub async fn run(&self) -> Result<Harvest> {
        let started_at = Utc::now();

        let discovery_url = self.page_url(1);
        tracing::info!(url = %discovery_url, "discovering total page count");
        let first_page = self
            .fetcher
            .fetch_json(&discovery_url)
            .await
            .map_err(|source| EtlError::DiscoveryFailure {
                source: Box::new(source),
            })?;
        let total_pages = Self::total_pages(&first_page);
        tracing::info!(total_pages, "dispatching page fetches");

        let semaphore = Arc::new(Semaphore::new(self.config.concurrent_requests().max(1)));
        let mut tasks = JoinSet::new();
        let mut page_of_task = HashMap::new();
        for page in 1..=total_pages {
            let semaphore = Arc::clone(&semaphore);
            let fetcher = Arc::clone(&self.fetcher);
            let translator = Arc::clone(&self.translator);
            let url = self.page_url(page);
            let handle = tasks.spawn(async move {
                // the semaphore is never closed, so acquisition cannot fail
                let _permit = semaphore.acquire_owned().await.ok();
                let outcome = match fetcher.fetch_json(&url).await {
                    Ok(payload) => Ok(translator.translate_page(page, &payload)),
                    Err(err) => Err(err),
                };
                (page, outcome)
            });
            page_of_task.insert(handle.id(), page);
        }

        let mut records: Vec<ProductRecord> = Vec::new();
        let mut pages_ok = 0;
        let mut failures = Vec::new();
        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((_, (page, Ok(page_records)))) => {
                    pages_ok += 1;
                    tracing::info!(
                        page,
                        total_pages,
                        count = page_records.len(),
                        "page fetched"
                    );
                    records.extend(page_records);
                }
                Ok((_, (page, Err(err)))) => {
                    tracing::error!(page, total_pages, error = %err, "page failed; contributing no records");
                    failures.push(PageFailure {
                        page,
                        error: err.to_string(),
                    });
                }
                Err(join_err) => {
                    let page = page_of_task.get(&join_err.id()).copied().unwrap_or(0);
                    tracing::error!(page, error = %join_err, "page task did not complete");
                    failures.push(PageFailure {
                        page,
                        error: join_err.to_string(),
                    });
                }
            }
        }

        let report = RunReport {
            total_pages,
            pages_ok,
            failures,
            records: records.len(),
            started_at,
            finished_at: Utc::now(),
        };
        Ok(Harvest { records, report })
    }
}
