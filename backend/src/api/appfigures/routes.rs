//! Defines the HTTP routes for the Appfigures data API.

use axum::{routing::get, Router};

use super::handlers::get_appfigures_data;
use crate::api::AppState;

pub fn appfigures_router() -> Router<AppState> {
    Router::new().route("/appfigures-data", get(get_appfigures_data))
}
