//! Core `adapters` crate for talking to the Appfigures analytics API.
//!
//! This crate defines the `UpstreamApi` trait, which is the seam the backend
//! aggregates through, and provides the concrete Appfigures implementation
//! together with the data models shared by both crates.

pub mod appfigures;
pub mod errors;
pub mod models;

use async_trait::async_trait;
use serde_json::Value;

pub use appfigures::{AppfiguresClient, AppfiguresConfig};
pub use errors::AdapterError;
pub use models::*;

/// Query parameters for an upstream call, in the order they are sent.
pub type QueryParams<'a> = &'a [(&'a str, &'a str)];

/// Authenticated GET access to an analytics API.
#[async_trait]
pub trait UpstreamApi: Send + Sync {
    /// Calls `endpoint` (a path relative to the API base) and returns the
    /// decoded JSON body of a successful response.
    async fn request(
        &self,
        endpoint: &str,
        params: Option<QueryParams<'_>>,
    ) -> Result<Value, AdapterError>;

    /// Like [`UpstreamApi::request`], but fails with [`AdapterError::Shape`]
    /// unless the body is a JSON object.
    async fn request_object(
        &self,
        endpoint: &str,
        params: Option<QueryParams<'_>>,
    ) -> Result<JsonObject, AdapterError> {
        match self.request(endpoint, params).await? {
            Value::Object(map) => Ok(map),
            other => Err(AdapterError::Shape {
                endpoint: endpoint.to_string(),
                found: json_kind(&other),
            }),
        }
    }
}
