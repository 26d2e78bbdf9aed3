//! statboard REST API
//!
//! HTTP API layer for statboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Dashboards
//! - `GET /api/v1/dashboards` - List dashboards
//! - `GET /api/v1/dashboards/:id` - Layout, binding and default inputs
//! - `POST /api/v1/dashboards/:id/update` - Recompute outputs for new inputs
//!
//! ## Datasets
//! - `GET /api/v1/datasets` - Loaded table summaries
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! ## WebSocket
//! - `GET /ws` - Interactive dashboard sessions
//!
//! # Example
//!
//! ```rust,ignore
//! use statboard::api::{serve, ApiConfig, AppState};
//! use statboard::dashboard::DashboardRegistry;
//!
//! let config = ApiConfig::default();
//! let state = AppState::new(registry, datasets, config.clone());
//! serve(state, &config).await?;
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::websocket::websocket_handler;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Dashboard routes
        .route("/dashboards", get(routes::dashboards::list_dashboards))
        .route("/dashboards/:id", get(routes::dashboards::get_dashboard))
        .route(
            "/dashboards/:id/update",
            post(routes::dashboards::update_dashboard),
        )
        // Dataset routes
        .route("/datasets", get(routes::datasets::list_datasets));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .route("/ws", get(websocket_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Permissive when no origins are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("statboard listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("statboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{
        AutomobileSalesDashboard, DashboardRegistry, FlightDelayDashboard, OutputValue,
    };
    use crate::table::parse_csv;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use tower::util::ServiceExt;

    const FLIGHTS_CSV: &str = "\
Year,Month,Reporting_Airline,CarrierDelay,WeatherDelay,NASDelay,SecurityDelay,LateAircraftDelay
2010,1,AA,10,0,5,0,20
2010,2,UA,4,1,1,0,0
2011,1,DL,50,5,5,1,5
";

    const AUTOS_CSV: &str = "\
Year,Recession,Automobile_Sales,Advertising_Expenditure,Vehicle_Type
1980,1,100,1000,Supperminicar
1981,0,500,4000,Sports
";

    fn create_test_app() -> Router {
        let flights = parse_csv(
            FLIGHTS_CSV.as_bytes(),
            "flights",
            &FlightDelayDashboard::load_options(),
        )
        .unwrap();
        let autos = parse_csv(
            AUTOS_CSV.as_bytes(),
            "autos",
            &AutomobileSalesDashboard::load_options(),
        )
        .unwrap();
        let datasets = vec![flights.info(), autos.info()];

        let mut registry = DashboardRegistry::new();
        registry
            .register(Arc::new(FlightDelayDashboard::new(Arc::new(flights)).unwrap()))
            .unwrap();
        registry
            .register(Arc::new(
                AutomobileSalesDashboard::new(Arc::new(autos)).unwrap(),
            ))
            .unwrap();

        build_router(AppState::new(registry, datasets, ApiConfig::default()))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        for uri in ["/health/live", "/health/ready", "/health"] {
            let response = create_test_app().oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_list_dashboards() {
        let response = create_test_app()
            .oneshot(get("/api/v1/dashboards"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["total"], 2);
        assert_eq!(body["dashboards"][0]["id"], "flight-delays");
        assert_eq!(body["dashboards"][1]["id"], "automobile-sales");
    }

    #[tokio::test]
    async fn test_get_dashboard() {
        let response = create_test_app()
            .oneshot(get("/api/v1/dashboards/automobile-sales"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["layout"]["type"], "container");
        assert_eq!(body["defaults"]["select-year"], "1980");
        assert_eq!(body["binding"]["outputs"][0], "output-container");
    }

    #[tokio::test]
    async fn test_get_unknown_dashboard() {
        let response = create_test_app()
            .oneshot(get("/api/v1/dashboards/nope"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "DASHBOARD_NOT_FOUND");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_update_flight_dashboard() {
        let response = create_test_app()
            .oneshot(post_json(
                "/api/v1/dashboards/flight-delays/update",
                r#"{"inputs": {"input-year": 2010}}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: dto::UpdateResponse = serde_json::from_value(json_body(response).await).unwrap();
        assert_eq!(body.dashboard, "flight-delays");
        assert_eq!(body.outputs.len(), 5);
        match &body.outputs[0].value {
            OutputValue::Figure { figure } => {
                let names: Vec<_> = figure.series.iter().map(|s| s.name.as_str()).collect();
                assert_eq!(names, vec!["AA", "UA"]);
            }
            other => panic!("Expected figure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_with_empty_body_uses_defaults() {
        let response = create_test_app()
            .oneshot(post_json("/api/v1/dashboards/automobile-sales/update", "{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["outputs"][0]["value"]["type"], "grid");
    }

    #[tokio::test]
    async fn test_update_unknown_input() {
        let response = create_test_app()
            .oneshot(post_json(
                "/api/v1/dashboards/flight-delays/update",
                r#"{"inputs": {"input-month": 3}}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "UNKNOWN_INPUT");
    }

    #[tokio::test]
    async fn test_update_invalid_json() {
        let response = create_test_app()
            .oneshot(post_json("/api/v1/dashboards/flight-delays/update", "not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_datasets() {
        let response = create_test_app()
            .oneshot(get("/api/v1/datasets"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["total"], 2);
        assert_eq!(body["datasets"][0]["source"], "flights");
        assert_eq!(body["datasets"][1]["rows"], 2);
    }

    #[test]
    fn test_cors_layer_accepts_configured_origins() {
        let _ = cors_layer(&["http://localhost:3000".to_string(), "bad\norigin".to_string()]);
        let _ = cors_layer(&[]);
    }
}
