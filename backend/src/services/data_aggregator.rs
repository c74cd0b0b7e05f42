//! Logic for collecting and merging Appfigures data per product.
//!
//! The products list is fetched first because its ids filter every other
//! call. Sales, usage and ratings are independent of each other and are
//! fetched concurrently, then folded into one record per product. A metrics
//! response that is not a JSON object counts as an empty bucket.

use adapters::{
    json_kind, AdapterError, AggregateResult, CombinedRecord, JsonObject, MetricsBucket,
    QueryParams, UpstreamApi,
};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::errors::AggregateError;

pub const STORE: &str = "apple";
pub const USAGE_TYPES: &str = "app_store_views,impressions";

const PRODUCTS_ENDPOINT: &str = "/products/mine";
const SALES_ENDPOINT: &str = "/reports/sales";
const USAGE_ENDPOINT: &str = "/reports/usage";
const RATINGS_ENDPOINT: &str = "/ratings";

pub struct DataAggregator<A> {
    api: A,
}

impl<A: UpstreamApi> DataAggregator<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    #[cfg(test)]
    pub(crate) fn api(&self) -> &A {
        &self.api
    }

    /// Fetches products, sales, usage and ratings and merges them by product id.
    ///
    /// Fails as a whole if any call fails; partial results are never returned.
    pub async fn fetch_combined(&self) -> Result<AggregateResult, AggregateError> {
        self.collect().await.inspect_err(|err| {
            error!(error = %err, details = ?err, "failed to fetch appfigures data");
        })
    }

    async fn collect(&self) -> Result<AggregateResult, AggregateError> {
        info!("fetching products");
        let store: &[(&str, &str)] = &[("store", STORE)];
        let products = self.api.request_object(PRODUCTS_ENDPOINT, Some(store)).await?;
        if products.is_empty() {
            return Err(AggregateError::NoProducts);
        }

        let product_ids = products.keys().map(String::as_str).collect::<Vec<_>>().join(",");
        let ids = product_ids.as_str();
        info!(count = products.len(), products = ids, "fetching sales, usage and ratings");

        let sales_params: &[(&str, &str)] = &[("group_by", "product"), ("products", ids)];
        let usage_params: &[(&str, &str)] = &[
            ("group_by", "product"),
            ("products", ids),
            ("usage_type", USAGE_TYPES),
            ("storefront", STORE),
        ];
        let ratings_params: &[(&str, &str)] = &[("products", ids)];

        let (sales, usage, ratings) = tokio::try_join!(
            self.metrics_bucket(SALES_ENDPOINT, sales_params),
            self.metrics_bucket(USAGE_ENDPOINT, usage_params),
            self.metrics_bucket(RATINGS_ENDPOINT, ratings_params),
        )?;

        Ok(merge(products, &sales, &usage, &ratings))
    }

    async fn metrics_bucket(
        &self,
        endpoint: &str,
        params: QueryParams<'_>,
    ) -> Result<MetricsBucket, AdapterError> {
        match self.api.request(endpoint, Some(params)).await? {
            Value::Object(bucket) => Ok(bucket),
            other => {
                warn!(
                    endpoint,
                    found = json_kind(&other),
                    "metrics response is not an object, using empty bucket"
                );
                Ok(MetricsBucket::new())
            }
        }
    }
}

/// One record per product, in products order. Ids that only appear in a
/// metrics bucket are ignored.
pub fn merge(
    products: JsonObject,
    sales: &MetricsBucket,
    usage: &MetricsBucket,
    ratings: &MetricsBucket,
) -> AggregateResult {
    products
        .into_iter()
        .map(|(id, product)| {
            let record = CombinedRecord::from_buckets(&id, product, sales, usage, ratings);
            (id, record)
        })
        .collect()
}
