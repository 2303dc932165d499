//! Client for the external analysis service.
//!
//! One request per call: no timeout, no retry. Whatever the service returns on success is handed
//! back as JSON so the caller decides whether the shape is acceptable.

use reqwest::{Client, header::HeaderMap};
use serde_json::{Value, json};

use crate::{Error, Result};

pub struct AnalysisClient {
	client: Client,
	endpoint: String,
	headers: HeaderMap,
}
impl AnalysisClient {
	pub fn new(cfg: &feelscape_config::Analysis) -> Result<Self> {
		let client = Client::builder().build()?;
		let headers = crate::default_headers(&cfg.default_headers)?;

		Ok(Self { client, endpoint: cfg.endpoint(), headers })
	}

	pub async fn analyze(&self, query: &str) -> Result<Value> {
		let res = self
			.client
			.post(&self.endpoint)
			.headers(self.headers.clone())
			.json(&json!({ "query": query }))
			.send()
			.await?;
		let status = res.status();
		let raw = res.text().await?;
		let body = parse_body(&raw);

		if !status.is_success() {
			tracing::warn!(%status, endpoint = %self.endpoint, "Analysis service rejected the query.");

			return Err(Error::Status { status: status.as_u16(), body });
		}

		Ok(body)
	}
}

/// JSON when the body parses, the raw text otherwise, `null` when empty.
fn parse_body(raw: &str) -> Value {
	if raw.trim().is_empty() {
		return Value::Null;
	}

	serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn keeps_unparseable_bodies_as_text() {
		assert_eq!(parse_body("[1,2]"), json!([1, 2]));
		assert_eq!(parse_body("<html>oops</html>"), json!("<html>oops</html>"));
		assert_eq!(parse_body("  "), Value::Null);
	}

	#[test]
	fn status_details_prefer_the_upstream_body() {
		let err = Error::Status { status: 503, body: json!({ "error": "model loading" }) };

		assert_eq!(err.details(), json!({ "error": "model loading" }));

		let err = Error::Status { status: 500, body: Value::Null };

		assert_eq!(err.details(), json!("Analysis service responded with status 500."));
	}
}
