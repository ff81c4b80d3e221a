use axum::{
	Json, Router,
	extract::{Path, Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use exocat_domain::{Direction, ScoreField, SortKey};
use exocat_loader::LoadCause;
use exocat_service::{BrowsePage, BrowseRequest, Error as ServiceError, ScanOutcome};

#[derive(Debug, Serialize)]
pub struct CatalogInfo {
	pub total_shards: u32,
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
	pub field: Option<ScoreField>,
	pub direction: Option<Direction>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
	#[serde(default)]
	pub q: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::OutOfRange(err) =>
				ApiError::new(StatusCode::BAD_REQUEST, "out_of_range", err.to_string()),
			ServiceError::Load(err) if err.cause == LoadCause::NotFound =>
				ApiError::new(StatusCode::NOT_FOUND, "shard_not_found", err.to_string()),
			ServiceError::Load(err) =>
				ApiError::new(StatusCode::BAD_GATEWAY, "shard_unavailable", err.to_string()),
			ServiceError::Loader(err) => {
				tracing::error!(error = %err, "Loader misconfigured.");

				ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", "Loader unavailable.")
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/catalog", get(catalog))
		.route("/v1/catalog/pages/{page}", get(page))
		.route("/v1/catalog/search", get(search))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn catalog(State(state): State<AppState>) -> Json<CatalogInfo> {
	Json(CatalogInfo { total_shards: state.service.total_shards() })
}

async fn page(
	State(state): State<AppState>,
	Path(page): Path<u32>,
	Query(params): Query<PageParams>,
) -> Result<Json<BrowsePage>, ApiError> {
	let default = SortKey::default();
	let sort = SortKey::new(
		params.field.unwrap_or(default.field),
		params.direction.unwrap_or(default.direction),
	);
	let response = state.service.browse(BrowseRequest::new(page, sort)).await?;

	Ok(Json(response))
}

async fn search(
	State(state): State<AppState>,
	Query(params): Query<SearchParams>,
) -> Json<ScanOutcome> {
	Json(state.service.search(&params.q).await)
}
