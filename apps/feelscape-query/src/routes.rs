use axum::{
	Json, Router,
	extract::{State, rejection::JsonRejection},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use feelscape_domain::QueryResultPoint;
use feelscape_service::Error;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/query", post(relay_query))
		.layer(TraceLayer::new_for_http())
		.layer(CorsLayer::permissive())
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn relay_query(
	State(state): State<AppState>,
	payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Vec<QueryResultPoint>>, ApiError> {
	let Json(payload) = payload.map_err(ApiError::from)?;
	let points = state.query.relay_query(&payload).await?;

	Ok(Json(points))
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error: &'static str,
	details: Option<Value>,
}
impl ApiError {
	fn new(status: StatusCode, error: &'static str, details: Option<Value>) -> Self {
		Self { status, error, details }
	}
}
impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::Validation { message } => {
				tracing::warn!(%message, "Rejected query.");

				Self::new(StatusCode::BAD_REQUEST, "Invalid query", None)
			},
			Error::UpstreamFormat =>
				Self::new(StatusCode::BAD_GATEWAY, "Invalid response from analysis service", None),
			Error::UpstreamTransport { message, details } => {
				tracing::error!(%message, "Analysis service call failed.");

				Self::new(
					StatusCode::INTERNAL_SERVER_ERROR,
					"Analysis service error",
					Some(details),
				)
			},
			Error::Store { message } => {
				tracing::error!(%message, "Unexpected store error on the query path.");

				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Server error", None)
			},
		}
	}
}
impl From<JsonRejection> for ApiError {
	fn from(rejection: JsonRejection) -> Self {
		tracing::warn!(error = %rejection.body_text(), "Rejected malformed query body.");

		Self::new(StatusCode::BAD_REQUEST, "Invalid query", None)
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = match self.details {
			Some(details) => json!({ "error": self.error, "details": details }),
			None => json!({ "error": self.error }),
		};

		(self.status, Json(body)).into_response()
	}
}
