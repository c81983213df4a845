use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use presentation_service::config::{DatabaseConfig, PresentationConfig};
use presentation_service::dtos::ProbeResponse;
use presentation_service::services::{DatabaseCollaborator, DatabaseHandle};
use presentation_service::startup::{build_router, AppState};
use std::sync::Arc;
use tower::ServiceExt;

struct FakeDb {
    collections: Result<Vec<String>, String>,
}

#[async_trait]
impl DatabaseHandle for FakeDb {
    fn name(&self) -> &str {
        "fake"
    }

    async fn list_collection_names(&self) -> anyhow::Result<Vec<String>> {
        self.collections.clone().map_err(|e| anyhow::anyhow!(e))
    }
}

fn configured() -> PresentationConfig {
    let mut config = PresentationConfig::default();
    config.database = DatabaseConfig {
        url: Some("mongodb://db.internal:27017".to_string()),
        name: Some("slides".to_string()),
    };
    config
}

async fn probe(config: PresentationConfig, database: DatabaseCollaborator) -> ProbeResponse {
    let app = build_router(AppState::new(config, database));

    let response = app
        .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn reports_missing_database_support() {
    let report = probe(PresentationConfig::default(), DatabaseCollaborator::NotFound).await;

    assert_eq!(report.backend, "✅ Running");
    assert_eq!(
        report.database,
        "❌ Database module not found (run enable-database first)"
    );
    assert_eq!(report.database_url, "❌ Not Set");
    assert_eq!(report.database_name, "❌ Not Set");
    assert_eq!(report.connection_status, "Not Connected");
    assert!(report.collections.is_empty());
}

#[tokio::test]
async fn reports_uninitialized_handle() {
    let report = probe(configured(), DatabaseCollaborator::Uninitialized).await;

    assert_eq!(report.database, "⚠️  Available but not initialized");
    assert_eq!(report.database_url, "✅ Set");
    assert_eq!(report.database_name, "✅ Set");
    assert_eq!(report.connection_status, "Not Connected");
}

#[tokio::test]
async fn lists_at_most_ten_collections() {
    let names: Vec<String> = (1..=12).map(|i| format!("collection_{}", i)).collect();
    let database = DatabaseCollaborator::Ready(Arc::new(FakeDb {
        collections: Ok(names.clone()),
    }));

    let report = probe(configured(), database).await;

    assert_eq!(report.database, "✅ Connected & Working");
    assert_eq!(report.connection_status, "Connected");
    assert_eq!(report.collections, names[..10].to_vec());
}

#[tokio::test]
async fn listing_failure_is_reported_not_raised() {
    let message = "server selection timeout after 30000ms while contacting db.internal";
    let database = DatabaseCollaborator::Ready(Arc::new(FakeDb {
        collections: Err(message.to_string()),
    }));

    let report = probe(configured(), database).await;

    let truncated: String = message.chars().take(50).collect();
    assert_eq!(report.database, format!("⚠️  Connected but Error: {}", truncated));
    assert_eq!(report.connection_status, "Connected");
    assert!(report.collections.is_empty());
}

#[tokio::test]
async fn configuration_values_are_never_echoed() {
    let report = probe(configured(), DatabaseCollaborator::Uninitialized).await;

    let body = serde_json::to_string(&report).unwrap();
    assert!(!body.contains("db.internal"));
    assert!(!body.contains("slides"));
}
