//! Handler functions for the Appfigures data API.
//!
//! These functions call `services::data_aggregator` and format its output;
//! failures are turned into responses by `errors::ApiError`.

use adapters::AggregateResult;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::api::AppState;
use crate::errors::ApiError;

pub const WELCOME_MESSAGE: &str =
    "Welcome to the Appfigures Data API! Use /appfigures-data to get your app data.";

pub async fn root_handler() -> Json<Value> {
    Json(json!({ "message": WELCOME_MESSAGE }))
}

pub async fn get_appfigures_data(
    State(state): State<AppState>,
) -> Result<Json<AggregateResult>, ApiError> {
    let data = state.aggregator.fetch_combined().await?;
    Ok(Json(data))
}

#[cfg(test)]
mod tests {
    use adapters::{AppfiguresClient, AppfiguresConfig};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use axum::Router;
    use httpmock::prelude::*;
    use tower::ServiceExt;

    use super::*;
    use crate::api::router;

    fn app(server: &MockServer, token: Option<&str>) -> Router {
        let config =
            AppfiguresConfig::new(token.map(str::to_string)).with_base_url(server.base_url());
        router(AppState::new(AppfiguresClient::new(config)))
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn root_returns_welcome_message() {
        let server = MockServer::start();

        let response = get(app(&server, Some("t")), "/").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "message": WELCOME_MESSAGE }));
    }

    #[tokio::test]
    async fn appfigures_data_returns_merged_products_in_order() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/products/mine").query_param("store", "apple");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"222": {"name": "App B"}, "111": {"name": "App A"}}"#);
        });
        server.mock(|when, then| {
            when.method(GET)
                .path("/reports/sales")
                .query_param("group_by", "product")
                .query_param("products", "222,111");
            then.status(200).json_body(json!({"111": {"revenue": 100}}));
        });
        server.mock(|when, then| {
            when.method(GET)
                .path("/reports/usage")
                .query_param("usage_type", "app_store_views,impressions")
                .query_param("storefront", "apple");
            then.status(200).json_body(json!({}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/ratings").query_param("products", "222,111");
            then.status(200).json_body(json!({"222": {"avg": 4.5}}));
        });

        let response = get(app(&server, Some("t")), "/appfigures-data").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.find("\"222\"").unwrap() < text.find("\"111\"").unwrap());

        let data: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            data,
            json!({
                "222": {"product": {"name": "App B"}, "sales": {}, "usage": {}, "ratings": {"avg": 4.5}},
                "111": {"product": {"name": "App A"}, "sales": {"revenue": 100}, "usage": {}, "ratings": {}}
            })
        );
    }

    #[tokio::test]
    async fn upstream_failure_is_500_with_detail() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/products/mine");
            then.status(200).json_body(json!({"111": {}}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/reports/sales");
            then.status(200).json_body(json!({}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/reports/usage");
            then.status(503).json_body(json!({"message": "Service unavailable"}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/ratings");
            then.status(200).json_body(json!({}));
        });

        let response = get(app(&server, Some("t")), "/appfigures-data").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"detail": "API Error: 503 - Service unavailable"})
        );
    }

    #[tokio::test]
    async fn empty_products_is_500_and_skips_metrics() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/products/mine");
            then.status(200).json_body(json!({}));
        });
        let sales = server.mock(|when, then| {
            when.method(GET).path("/reports/sales");
            then.status(200).json_body(json!({}));
        });

        let response = get(app(&server, Some("t")), "/appfigures-data").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({"detail": "No products found."}));
        sales.assert_hits(0);
    }

    #[tokio::test]
    async fn missing_token_is_500_without_upstream_calls() {
        let server = MockServer::start();
        let any = server.mock(|when, then| {
            when.method(GET);
            then.status(200).json_body(json!({}));
        });

        let response = get(app(&server, None), "/appfigures-data").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let detail = body_json(response).await["detail"].as_str().unwrap().to_string();
        assert!(!detail.is_empty());
        any.assert_hits(0);
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let server = MockServer::start();
        let request = Request::builder()
            .uri("/")
            .header("origin", "https://dashboard.example.com")
            .body(Body::empty())
            .unwrap();

        let response = app(&server, Some("t")).oneshot(request).await.unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }
}
