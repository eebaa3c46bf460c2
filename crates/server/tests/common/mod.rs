//! Common test utilities for E2E testing.
//!
//! This module provides a test fixture that writes a catalog CSV into a
//! temp directory, loads it, and builds the full router in-process, so
//! every endpoint can be exercised without binding a socket.

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use shopsight_core::config::{AssistantConfig, CatalogConfig, EngineConfig, ServerConfig};
use shopsight_core::{load_catalog, Config};
use shopsight_server::api::create_router;
use shopsight_server::state::AppState;

/// Catalog used by default fixtures. Eight products across three
/// categories, one out of stock, one unrated.
pub const SAMPLE_CSV: &str = "\
product_id,name,description,price,category,brand,color,size,material,weight,in_stock,rating
P100,Espresso Grinder,Conical burr grinder,129.00,Kitchen,Brewer,black,,steel,1.8,true,4.7
P101,Pour Over Kettle,Gooseneck kettle,49.00,Kitchen,Brewer,silver,1L,steel,0.9,true,4.4
P102,French Press,Glass french press,32.00,Kitchen,Carafe,clear,0.75L,glass,0.7,false,4.1
P103,Yoga Mat,Non-slip yoga mat,39.00,Fitness,Corepath,purple,6mm,rubber,1.1,true,4.6
P104,Foam Roller,High-density foam roller,25.00,Fitness,Corepath,blue,,foam,0.6,true,3.8
P105,Resistance Bands,Set of five bands,19.00,Fitness,Flexkit,multi,,latex,0.3,true,
P106,USB Microphone,Cardioid USB microphone,89.00,Audio,Wavecast,black,,metal,0.5,true,4.3
P107,Studio Headphones,Closed-back headphones,149.00,Audio,Wavecast,black,,plastic,0.4,false,4.8
";

/// Test fixture for E2E testing against an in-process router.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_search() {
///     let fixture = TestFixture::new().await;
///
///     let response = fixture.get("/api/v1/products?category=Kitchen").await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// Router under test, cloned per request
    pub router: Router,
    /// Temporary directory holding the catalog CSV
    pub temp_dir: TempDir,
}

/// Status and decoded JSON body of one in-process request.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a fixture backed by the default sample catalog.
    pub async fn new() -> Self {
        Self::with_csv(SAMPLE_CSV).await
    }

    /// Create a fixture backed by a caller-provided catalog CSV.
    pub async fn with_csv(csv: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let catalog_path = temp_dir.path().join("products.csv");
        std::fs::write(&catalog_path, csv).expect("Failed to write catalog CSV");

        let config = Config {
            catalog: CatalogConfig {
                path: catalog_path.clone(),
            },
            server: ServerConfig {
                host: IpAddr::V4(Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            engine: EngineConfig {
                featured_seed: Some(5),
                ..EngineConfig::default()
            },
            assistant: Some(AssistantConfig {
                api_key: "sk-test-do-not-leak".to_string(),
                model: Some("test-model".to_string()),
            }),
        };

        let catalog = load_catalog(&catalog_path).expect("Failed to load catalog");

        let state = Arc::new(AppState::new(config, Arc::new(catalog)));
        let router = create_router(state);

        Self { router, temp_dir }
    }

    /// Send a GET request and decode the JSON body.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a GET request and return the raw body text (for non-JSON
    /// endpoints like /metrics).
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        (status, String::from_utf8_lossy(&body_bytes).to_string())
    }

    /// Send a POST request carrying a JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a POST request with a raw string body, bypassing JSON
    /// serialization so malformed payloads reach the handler as-is.
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    /// Build a request with an optional JSON body and send it.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Assert a response status, dumping the body on mismatch.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "unexpected status, body: {}",
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}

/// Assert one field of a JSON body equals the expected value.
#[macro_export]
macro_rules! assert_json_path {
    ($json:expr, $path:expr, $expected:expr) => {
        let actual = &$json[$path];
        assert_eq!(actual, &$expected, "mismatch at '{}'", $path);
    };
}
