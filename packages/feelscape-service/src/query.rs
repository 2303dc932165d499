use std::sync::Arc;

use serde_json::Value;

use feelscape_domain::QueryResultPoint;

use crate::{AnalysisProvider, Error, Result};

#[derive(Clone)]
pub struct QueryService {
	provider: Arc<dyn AnalysisProvider>,
}
impl QueryService {
	pub fn new(provider: Arc<dyn AnalysisProvider>) -> Self {
		Self { provider }
	}

	/// Forwards the `query` field of a request body and passes the scored points back.
	///
	/// The body must be an object whose `query` is a non-empty string. The upstream reply must
	/// be a JSON list; its elements are returned untouched.
	pub async fn relay_query(&self, payload: &Value) -> Result<Vec<QueryResultPoint>> {
		let query = validate_query(payload)?;

		tracing::info!(query, "Received query.");

		let body = self.provider.analyze(query).await.inspect_err(|err| {
			tracing::error!(error = %err, "Analysis service call failed.");
		})?;
		let points = match body {
			Value::Array(points) => points,
			other => {
				tracing::warn!(response = %other, "Analysis service returned invalid data.");

				return Err(Error::UpstreamFormat);
			},
		};

		tracing::info!(count = points.len(), "Analysis service returned points.");

		Ok(points.into_iter().map(QueryResultPoint::new).collect())
	}
}

pub fn validate_query(payload: &Value) -> Result<&str> {
	match payload.get("query") {
		Some(Value::String(query)) if !query.is_empty() => Ok(query.as_str()),
		Some(Value::String(_)) =>
			Err(Error::Validation { message: "query must be non-empty.".to_string() }),
		Some(_) => Err(Error::Validation { message: "query must be a string.".to_string() }),
		None => Err(Error::Validation { message: "query is required.".to_string() }),
	}
}
