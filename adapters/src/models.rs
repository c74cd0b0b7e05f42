//! Generic data models for the `adapters` crate.
//!
//! Appfigures payloads are treated as opaque JSON. The only thing this crate
//! interprets is the product identifier, which is the key of every mapping
//! the API returns when results are grouped by product.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// Key of the products mapping. Numeric ids arrive as JSON object keys, so
/// they are always strings here.
pub type ProductId = String;

pub type JsonObject = Map<String, Value>;

/// Sales, usage or ratings data keyed by product id.
pub type MetricsBucket = JsonObject;

/// Everything known about one product after merging the four responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedRecord {
    pub product: Value,
    pub sales: Value,
    pub usage: Value,
    pub ratings: Value,
}

impl CombinedRecord {
    /// Builds the record for `id`, substituting `{}` for every bucket that has
    /// no entry for it.
    pub fn from_buckets(
        id: &str,
        product: Value,
        sales: &MetricsBucket,
        usage: &MetricsBucket,
        ratings: &MetricsBucket,
    ) -> Self {
        Self {
            product,
            sales: bucket_entry(sales, id),
            usage: bucket_entry(usage, id),
            ratings: bucket_entry(ratings, id),
        }
    }
}

/// Product id to combined record, in the order the products endpoint listed them.
pub type AggregateResult = IndexMap<ProductId, CombinedRecord>;

fn bucket_entry(bucket: &MetricsBucket, id: &str) -> Value {
    bucket
        .get(id)
        .cloned()
        .unwrap_or_else(|| Value::Object(JsonObject::new()))
}

/// Name of the JSON type of `value`, used in shape errors and logs.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
