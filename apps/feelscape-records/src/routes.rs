use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use feelscape_domain::EmotionRecord;
use feelscape_service::Error;

use crate::state::AppState;

pub const BANNER: &str = "Emotion records relay is running. Use /records to get data.";

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/", get(banner))
		.route("/health", get(health))
		.route("/records", get(list_records))
		.layer(TraceLayer::new_for_http())
		.layer(CorsLayer::permissive())
		.with_state(state)
}

async fn banner() -> &'static str {
	BANNER
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn list_records(
	State(state): State<AppState>,
) -> Result<Json<Vec<EmotionRecord>>, ApiError> {
	let records = state.records.list_records().await?;

	Ok(Json(records))
}

/// Any failure behind `/records` is a store failure; the cause is logged, not returned.
#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	message: String,
}
impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		tracing::error!(error = %err, "Records request failed.");

		Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: "Server error".to_string() }
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		(self.status, Json(json!({ "error": self.message }))).into_response()
	}
}
