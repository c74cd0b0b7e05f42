//! Custom error types specific to the `adapters` crate.
//!
//! This module defines errors that can occur while talking to the Appfigures
//! API: missing credentials, non-success HTTP statuses, transport failures and
//! responses whose body does not have the shape the caller asked for.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    /// The client was built without an access token.
    #[error("{0}")]
    Configuration(String),

    /// The API answered with a non-2xx status.
    #[error("API Error: {status} - {message}")]
    Http { status: u16, message: String },

    /// DNS, connect, TLS, timeout or any other failure below HTTP.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid JSON in response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected response from {endpoint}: expected a JSON object, found {found}")]
    Shape {
        endpoint: String,
        found: &'static str,
    },
}
