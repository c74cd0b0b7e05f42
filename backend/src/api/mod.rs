//! Central module for organizing the application's API endpoints.
//!
//! Builds the top-level router: the welcome endpoint, the Appfigures data
//! endpoint and the CORS layer wrapping both.

pub mod appfigures;

use std::sync::Arc;

use adapters::AppfiguresClient;
use axum::{routing::get, Router};

use crate::middleware::cors_layer;
use crate::services::data_aggregator::DataAggregator;

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<DataAggregator<AppfiguresClient>>,
}

impl AppState {
    pub fn new(client: AppfiguresClient) -> Self {
        Self {
            aggregator: Arc::new(DataAggregator::new(client)),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(appfigures::handlers::root_handler))
        .merge(appfigures::routes::appfigures_router())
        .layer(cors_layer())
        .with_state(state)
}
