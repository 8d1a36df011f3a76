use chrono::{DateTime, Utc};
use serde::Serialize;

/// Sentinel name for catalog entries without a usable title.
pub const NO_TITLE: &str = "NO_TITLE";

/// One normalized catalog entry. Built once during page translation and
/// immutable afterwards; `url` is `Some` exactly when `id` is `Some`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    pub id: Option<String>,
    pub name: String,
    pub price: Option<f64>,
    pub price_with_discount: Option<f64>,
    pub quantity_available: i64,
    pub score_of_ratings: Option<f64>,
    pub number_of_ratings: Option<i64>,
    pub photo_reference: Option<String>,
    pub warranty: Option<String>,
    pub url: Option<String>,
}

/// A page whose fetch exhausted its retries; carried in the run report.
#[derive(Debug, Clone, Serialize)]
pub struct PageFailure {
    pub page: u64,
    pub error: String,
}

/// Per-run statistics: how many pages were dispatched, which failed, and how
/// many records the aggregate holds.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub total_pages: u64,
    pub pages_ok: u64,
    pub failures: Vec<PageFailure>,
    pub records: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    pub fn pages_failed(&self) -> u64 {
        self.failures.len() as u64
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// The full outcome of one orchestrator run: the unordered aggregate plus
/// its report. Handed to the sinks by the engine.
#[derive(Debug)]
pub struct Harvest {
    pub records: Vec<ProductRecord>,
    pub report: RunReport,
}
