//! Module for the Appfigures data API.
//!
//! Exposes the merged per-product view of products, sales, usage and ratings.

pub mod handlers;
pub mod routes;
