//! Module for core business logic services.
//!
//! This module encapsulates services that orchestrate calls to the upstream
//! analytics API and shape the results for the HTTP layer.

pub mod data_aggregator;
