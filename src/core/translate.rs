use crate::domain::model::{ProductRecord, NO_TITLE};
use crate::utils::json::{display_string, pluck};
use serde_json::Value;
use std::sync::Arc;

/// Slug normalization is a pure string transform owned by the caller.
pub type SlugFn = dyn Fn(&str) -> String + Send + Sync;

/// Turns one page's raw JSON payload into normalized records. Field-level
/// damage degrades to defaults; only an entry that is not an object at all
/// is skipped. Never fails for the whole page.
pub struct Translator {
    product_base: String,
    slug: Arc<SlugFn>,
}

impl Translator {
    pub fn new(product_base: impl Into<String>, slug: Arc<SlugFn>) -> Self {
        Self {
            product_base: product_base.into(),
            slug,
        }
    }

    pub fn translate_page(&self, page: u64, payload: &Value) -> Vec<ProductRecord> {
        let Some(items) = payload.get("data").and_then(Value::as_array) else {
            tracing::warn!(page, "response has no 'data' list; treating page as empty");
            return Vec::new();
        };

        let mut records = Vec::with_capacity(items.len());
        for item in items {
            match self.translate_entry(item) {
                Some(record) => records.push(record),
                None => tracing::warn!(page, "skipping malformed catalog entry"),
            }
        }
        records
    }

    fn translate_entry(&self, item: &Value) -> Option<ProductRecord> {
        let obj = item.as_object()?;

        let id = obj
            .get("id")
            .filter(|v| !v.is_null())
            .map(display_string);

        let name = pluck(item, &["attributes", "title"])
            .and_then(Value::as_str)
            .filter(|title| !title.is_empty())
            .map_or_else(|| NO_TITLE.to_string(), str::to_string);

        let url = id
            .as_ref()
            .map(|pid| format!("{}/{}/{}", self.product_base, pid, (self.slug)(&name)));

        Some(ProductRecord {
            price: pluck(item, &["attributes", "price"]).and_then(Value::as_f64),
            price_with_discount: pluck(item, &["attributes", "price_with_discount"])
                .and_then(Value::as_f64),
            quantity_available: pluck(item, &["attributes", "offer", "quantity_available"])
                .and_then(Value::as_i64)
                .unwrap_or(0),
            score_of_ratings: pluck(item, &["attributes", "score_of_ratings"])
                .and_then(Value::as_f64),
            number_of_ratings: pluck(item, &["attributes", "number_of_ratings"])
                .and_then(Value::as_i64),
            photo_reference: pluck(item, &["attributes", "photos", "g"]).map(display_string),
            warranty: pluck(item, &["attributes", "warranty"])
                .and_then(Value::as_str)
                .map(str::to_string),
            id,
            name,
            url,
        })
    }
}
