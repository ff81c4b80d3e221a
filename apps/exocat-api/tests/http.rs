use std::sync::Arc;

use axum::{
	Router,
	body::{self, Body},
	http::{Request, StatusCode},
};
use serde_json::Value;
use tower::util::ServiceExt;

use exocat_api::{routes, state::AppState};
use exocat_config::{Catalog, Config, Loader, LoaderKind, Search, Service};
use exocat_loader::{LoadCause, ShardLoader};
use exocat_service::CatalogService;
use exocat_testkit::{MemoryLoader, record};

fn test_config(total_shards: u32) -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
			bind_localhost_only: true,
		},
		catalog: Catalog { total_shards },
		loader: Loader {
			kind: LoaderKind::Fs,
			location: "unused".to_string(),
			file_pattern: "candidate_predictions_{index}.json".to_string(),
			timeout_ms: 1_000,
			max_concurrent_fetches: 4,
		},
		search: Search { debounce_ms: 0, max_results: None },
	}
}

fn test_app(loader: MemoryLoader) -> Router {
	let total = loader.total_shards();
	let loader: Arc<dyn ShardLoader> = Arc::new(loader);
	let service = CatalogService::with_loader(test_config(total), loader);

	routes::router(AppState::with_service(service))
}

fn three_shards() -> MemoryLoader {
	MemoryLoader::new(vec![
		vec![record("X", 0.1)],
		vec![record("Y", 0.5)],
		vec![record("Kepler-22b", 0.9), record("Kepler-442b", 0.95)],
	])
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
	let response = app
		.oneshot(Request::builder().uri(uri).body(Body::empty()).expect("Failed to build request."))
		.await
		.expect("Failed to call router.");
	let status = response.status();
	let bytes =
		body::to_bytes(response.into_body(), usize::MAX).await.expect("Failed to read body.");
	let json = if bytes.is_empty() {
		Value::Null
	} else {
		serde_json::from_slice(&bytes).expect("Response body must be JSON.")
	};

	(status, json)
}

fn record_names(json: &Value) -> Vec<String> {
	json["records"]
		.as_array()
		.expect("Expected records array.")
		.iter()
		.map(|record| record["planet_name"].as_str().expect("Expected name.").to_string())
		.collect()
}

#[tokio::test]
async fn health_is_ok() {
	let (status, _) = get_json(test_app(three_shards()), "/health").await;

	assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn catalog_reports_shard_count() {
	let (status, json) = get_json(test_app(three_shards()), "/v1/catalog").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["total_shards"], 3);
}

#[tokio::test]
async fn page_defaults_to_score_a_descending() {
	let (status, json) = get_json(test_app(three_shards()), "/v1/catalog/pages/1").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["shard"], 3);
	assert_eq!(json["page"], 1);
	assert_eq!(json["field"], "score_a");
	assert_eq!(json["direction"], "desc");
	assert_eq!(json["total_pages"], 3);
	assert_eq!(record_names(&json), vec!["Kepler-22b", "Kepler-442b"]);
}

#[tokio::test]
async fn page_accepts_explicit_sort_key() {
	let (status, json) = get_json(
		test_app(three_shards()),
		"/v1/catalog/pages/2?field=prob_false_positive&direction=asc",
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["shard"], 2);
	assert_eq!(json["field"], "score_b");
	assert_eq!(record_names(&json), vec!["Y"]);
}

#[tokio::test]
async fn out_of_range_page_is_bad_request() {
	let (status, json) = get_json(test_app(three_shards()), "/v1/catalog/pages/4").await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(json["error_code"], "out_of_range");
}

#[tokio::test]
async fn shard_failures_map_to_status_codes() {
	let loader = three_shards()
		.with_failure(3, LoadCause::NotFound)
		.with_failure(1, LoadCause::Transport("reset".to_string()));
	let app = test_app(loader);
	let (missing, json) = get_json(app.clone(), "/v1/catalog/pages/1").await;

	assert_eq!(missing, StatusCode::NOT_FOUND);
	assert_eq!(json["error_code"], "shard_not_found");

	let (unavailable, json) = get_json(app, "/v1/catalog/pages/1?direction=asc").await;

	assert_eq!(unavailable, StatusCode::BAD_GATEWAY);
	assert_eq!(json["error_code"], "shard_unavailable");
}

#[tokio::test]
async fn search_ranks_across_shards() {
	let (status, json) = get_json(test_app(three_shards()), "/v1/catalog/search?q=kepler-22b").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["query"], "kepler-22b");
	assert_eq!(json["scanned_shards"], 3);
	assert_eq!(record_names(&json), vec!["Kepler-22b"]);
}

#[tokio::test]
async fn search_reports_failed_shards() {
	let app = test_app(three_shards().with_failure(2, LoadCause::NotFound));
	let (status, json) = get_json(app, "/v1/catalog/search?q=x").await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(record_names(&json), vec!["X"]);
	assert_eq!(json["failed_shards"], serde_json::json!([2]));
}

#[tokio::test]
async fn empty_search_returns_no_records() {
	let (status, json) = get_json(test_app(three_shards()), "/v1/catalog/search").await;

	assert_eq!(status, StatusCode::OK);
	assert!(record_names(&json).is_empty());
}
